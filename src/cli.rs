//! Command-line interface definitions for the speech pipeline.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. Global options override values from the optional YAML config file.

use crate::dates::DateMode;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Command-line arguments for the speech pipeline.
///
/// # Examples
///
/// ```sh
/// # Full crawl and assembly into ./data
/// bis_speeches -w ./data run
///
/// # Crawl only the first day of every month
/// bis_speeches -w ./data --mode sparse scrape
///
/// # Re-assemble the dataset from an existing ledger
/// bis_speeches -w ./data assemble
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Working directory holding the ledger, documents and datasets
    #[arg(short, long, env = "BIS_WORKING_DIR")]
    pub working_dir: Option<String>,

    /// Date sampling mode for the crawl
    #[arg(long, value_enum)]
    pub mode: Option<DateMode>,

    /// First day to crawl (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day to crawl (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Base URL of the speech archive
    #[arg(long, env = "BIS_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline stages.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Crawl the archive, appending to the ledger and storing raw PDFs
    Scrape,
    /// Convert downloaded PDFs to text files
    Convert,
    /// Join the ledger with the text files into merged_raw.jsonl
    Assemble,
    /// Clean the assembled speeches into merged_processed.jsonl
    Process,
    /// Attach country and populism dummies into merged_final_ind.jsonl
    Merge,
    /// Average merged speeches by year and country into merged_final_collapse.jsonl
    Collapse,
    /// Run every stage in order
    Run,
}
