//! Pipeline stages wired to the working directory.
//!
//! Each stage reads what the previous one left in [`Config::working_dir`]:
//!
//! 1. **Scrape**: crawl the archive, append the ledger, store raw PDFs
//! 2. **Convert**: turn PDFs into `.pdf.txt` files
//! 3. **Assemble**: join ledger and texts into `merged_raw.jsonl`
//! 4. **Process**: clean texts into `merged_processed.jsonl`
//! 5. **Merge**: attach country and populism dummies into `merged_final_ind.jsonl`
//! 6. **Collapse**: average by year and country into `merged_final_collapse.jsonl`

use crate::config::Config;
use crate::convert::{self, ConvertSummary, TextExtractor};
use crate::dataset;
use crate::dates;
use crate::features;
use crate::models::{CollapsedRow, MergedSpeech, ProcessedSpeech, SpeechRecord};
use crate::outputs::json::{
    self, COLLAPSED_DATASET_FILE_NAME, MERGED_DATASET_FILE_NAME, PROCESSED_DATASET_FILE_NAME,
    RAW_DATASET_FILE_NAME,
};
use crate::panel;
use crate::scrapers::Archive;
use crate::scrapers::bis::{self, ScrapeSummary};
use std::error::Error;
use tracing::{info, instrument};

#[instrument(level = "info", skip_all)]
pub async fn scrape<A: Archive>(archive: &A, config: &Config) -> ScrapeSummary {
    let end = config.end_date_or_today();
    let codes = dates::day_codes(config.start_date, end, config.mode);
    info!(
        days = codes.len(),
        start = %config.start_date,
        %end,
        mode = ?config.mode,
        "Starting crawl"
    );
    bis::scrape_range(archive, config, &codes).await
}

#[instrument(level = "info", skip_all)]
pub async fn convert<E: TextExtractor>(
    extractor: &E,
    config: &Config,
) -> Result<ConvertSummary, Box<dyn Error>> {
    convert::convert_dir(extractor, &config.working_dir).await
}

#[instrument(level = "info", skip_all)]
pub async fn assemble(config: &Config) -> Result<Vec<SpeechRecord>, Box<dyn Error>> {
    let rows = dataset::assemble(&config.working_dir).await?;
    json::write_jsonl(&config.working_dir.join(RAW_DATASET_FILE_NAME), &rows).await?;
    Ok(rows)
}

#[instrument(level = "info", skip_all)]
pub async fn process(config: &Config) -> Result<Vec<ProcessedSpeech>, Box<dyn Error>> {
    let rows: Vec<SpeechRecord> =
        json::read_jsonl(&config.working_dir.join(RAW_DATASET_FILE_NAME)).await?;
    let processed = features::process_all(rows);
    json::write_jsonl(&config.working_dir.join(PROCESSED_DATASET_FILE_NAME), &processed).await?;
    Ok(processed)
}

#[instrument(level = "info", skip_all)]
pub async fn merge(config: &Config) -> Result<Vec<MergedSpeech>, Box<dyn Error>> {
    let rows: Vec<ProcessedSpeech> =
        json::read_jsonl(&config.working_dir.join(PROCESSED_DATASET_FILE_NAME)).await?;
    let merged = panel::merge(rows);
    json::write_jsonl(&config.working_dir.join(MERGED_DATASET_FILE_NAME), &merged).await?;
    Ok(merged)
}

#[instrument(level = "info", skip_all)]
pub async fn collapse(config: &Config) -> Result<Vec<CollapsedRow>, Box<dyn Error>> {
    let rows: Vec<MergedSpeech> =
        json::read_jsonl(&config.working_dir.join(MERGED_DATASET_FILE_NAME)).await?;
    let collapsed = panel::collapse(&rows);
    json::write_jsonl(&config.working_dir.join(COLLAPSED_DATASET_FILE_NAME), &collapsed).await?;
    Ok(collapsed)
}
