//! # BIS Speeches
//!
//! A research-data pipeline that crawls the central bank speech archive of
//! the Bank for International Settlements, converts the speech PDFs to
//! text, and assembles a single dataset of speeches with their speaker,
//! date and issuing institution.
//!
//! ## Usage
//!
//! ```sh
//! bis_speeches -w ./bld/data/raw run
//! bis_speeches -w ./bld/data/raw --mode sparse scrape
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture over one working directory:
//! 1. **Scraping**: Walk day codes and letters, append `meta_data.txt`, store PDFs
//! 2. **Conversion**: Extract text from each PDF into `<id>.pdf.txt`
//! 3. **Assembly**: Join the ledger and texts into `merged_raw.jsonl`
//! 4. **Processing**: Clean the texts and count topics into `merged_processed.jsonl`
//! 5. **Merge**: Map institutions to countries and attach populism dummies
//! 6. **Collapse**: Average the merged speeches by year and country

use clap::Parser;
use std::error::Error;
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod convert;
mod dataset;
mod dates;
mod features;
mod institutions;
mod ledger;
mod models;
mod outputs;
mod panel;
mod pipeline;
mod populism;
mod scrapers;
mod utils;

use cli::{Cli, Command};
use convert::PdfExtractor;
use scrapers::HttpArchive;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("bis_speeches starting up");

    let args = Cli::parse();
    let config = config::load(&args).await?;

    if let Err(e) = ensure_writable_dir(&config.working_dir).await {
        error!(
            path = %config.working_dir.display(),
            error = %e,
            "Working directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let command = args.command;
    if matches!(command, Command::Scrape | Command::Run) {
        let archive = HttpArchive::new(&config.user_agent)?;
        pipeline::scrape(&archive, &config).await;
    }
    if matches!(command, Command::Convert | Command::Run) {
        pipeline::convert(&PdfExtractor, &config).await?;
    }
    if matches!(command, Command::Assemble | Command::Run) {
        pipeline::assemble(&config).await?;
    }
    if matches!(command, Command::Process | Command::Run) {
        pipeline::process(&config).await?;
    }
    if matches!(command, Command::Merge | Command::Run) {
        pipeline::merge(&config).await?;
    }
    if matches!(command, Command::Collapse | Command::Run) {
        pipeline::collapse(&config).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        ?command,
        "Execution complete"
    );

    Ok(())
}
