//! Runtime configuration passed explicitly to every pipeline stage.
//!
//! Values come from three layers, later ones winning: built-in defaults,
//! an optional YAML file, and CLI flags.
//!
//! ```yaml
//! working_dir: ./bld/data/raw
//! base_url: https://www.bis.org/review/
//! start_date: 1997-01-06
//! mode: sparse
//! ```

use crate::cli::Cli;
use crate::dates::{DateMode, archive_start};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, instrument};
use url::Url;

/// Default location of the speech review archive.
pub const DEFAULT_BASE_URL: &str = "https://www.bis.org/review/";

const DEFAULT_USER_AGENT: &str = concat!("bis_speeches/", env!("CARGO_PKG_VERSION"));

/// Resolved pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the ledger, raw PDFs, text files and datasets.
    pub working_dir: PathBuf,
    /// Archive base URL; page URLs are `<base_url>r<document_id>.htm`.
    pub base_url: Url,
    /// First day to crawl.
    pub start_date: NaiveDate,
    /// Last day to crawl; `None` means today.
    pub end_date: Option<NaiveDate>,
    pub mode: DateMode,
    /// User-Agent header sent to the archive.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap(),
            start_date: archive_start(),
            end_date: None,
            mode: DateMode::Dense,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Last day of the crawl, falling back to the local date today.
    pub fn end_date_or_today(&self) -> NaiveDate {
        self.end_date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Shape of the YAML config file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub working_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub mode: Option<DateMode>,
    pub user_agent: Option<String>,
}

impl ConfigFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Parse a base URL, making sure relative joins land inside its path.
pub fn parse_base_url(raw: &str) -> Result<Url, Box<dyn Error>> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Merge defaults, the file layer and the CLI layer.
pub fn merge(file: ConfigFile, cli: &Cli) -> Result<Config, Box<dyn Error>> {
    let mut config = Config::default();

    if let Some(dir) = file.working_dir {
        config.working_dir = dir;
    }
    if let Some(url) = file.base_url.as_deref() {
        config.base_url = parse_base_url(url)?;
    }
    if let Some(start) = file.start_date {
        config.start_date = start;
    }
    config.end_date = file.end_date;
    if let Some(mode) = file.mode {
        config.mode = mode;
    }
    if let Some(agent) = file.user_agent {
        config.user_agent = agent;
    }

    if let Some(dir) = cli.working_dir.as_deref() {
        config.working_dir = PathBuf::from(dir);
    }
    if let Some(url) = cli.base_url.as_deref() {
        config.base_url = parse_base_url(url)?;
    }
    if let Some(start) = cli.start_date {
        config.start_date = start;
    }
    if cli.end_date.is_some() {
        config.end_date = cli.end_date;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }

    Ok(config)
}

/// Build the configuration for this run from the CLI and its optional config file.
#[instrument(level = "info", skip_all)]
pub async fn load(cli: &Cli) -> Result<Config, Box<dyn Error>> {
    let file = match cli.config.as_deref() {
        Some(path) => {
            let yaml = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("cannot read config {path}: {e}"))?;
            info!(config_path = path, "Loaded configuration file");
            ConfigFile::from_yaml(&yaml)?
        }
        None => ConfigFile::default(),
    };

    let config = merge(file, cli)?;
    info!(
        working_dir = %config.working_dir.display(),
        base_url = %config.base_url,
        start = %config.start_date,
        mode = ?config.mode,
        "Resolved configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(1997, 1, 6).unwrap());
        assert_eq!(config.mode, DateMode::Dense);
        assert!(config.end_date.is_none());
    }

    #[test]
    fn test_yaml_layer() {
        let file = ConfigFile::from_yaml(
            "working_dir: /srv/bis\nstart_date: 2001-05-01\nmode: sparse\n",
        )
        .unwrap();
        let cli = Cli::parse_from(&["bis_speeches", "scrape"]);
        let config = merge(file, &cli).unwrap();

        assert_eq!(config.working_dir, PathBuf::from("/srv/bis"));
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2001, 5, 1).unwrap());
        assert_eq!(config.mode, DateMode::Sparse);
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let file = ConfigFile::from_yaml("working_dir: /srv/bis\nmode: sparse\n").unwrap();
        let cli = Cli::parse_from(&[
            "bis_speeches",
            "-w",
            "/tmp/override",
            "--mode",
            "dense",
            "--base-url",
            "http://localhost:8080/review",
            "scrape",
        ]);
        let config = merge(file, &cli).unwrap();

        assert_eq!(config.working_dir, PathBuf::from("/tmp/override"));
        assert_eq!(config.mode, DateMode::Dense);
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/review/");
    }

    #[test]
    fn test_unknown_yaml_key_rejected() {
        assert!(ConfigFile::from_yaml("workdir: /srv/bis\n").is_err());
    }

    #[test]
    fn test_base_url_join() {
        let base = parse_base_url("https://www.bis.org/review").unwrap();
        assert_eq!(
            base.join("r970106a.htm").unwrap().as_str(),
            "https://www.bis.org/review/r970106a.htm"
        );
    }
}
