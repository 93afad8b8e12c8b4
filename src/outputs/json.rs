//! JSON-lines output for the assembled datasets.
//!
//! Each stage writes its table as one JSON object per line so later
//! analysis steps can stream it row by row.
//!
//! # Output Structure
//!
//! ```text
//! working_dir/
//! ├── merged_raw.jsonl             # one SpeechRecord per ledger line
//! ├── merged_processed.jsonl       # one ProcessedSpeech per row
//! ├── merged_final_ind.jsonl       # one MergedSpeech per matched speech
//! └── merged_final_collapse.jsonl  # one CollapsedRow per country-year
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// File name of the assembled dataset.
pub const RAW_DATASET_FILE_NAME: &str = "merged_raw.jsonl";
/// File name of the processed dataset.
pub const PROCESSED_DATASET_FILE_NAME: &str = "merged_processed.jsonl";
/// File name of the speech-level dataset merged with the populism panel.
pub const MERGED_DATASET_FILE_NAME: &str = "merged_final_ind.jsonl";
/// File name of the country-year means.
pub const COLLAPSED_DATASET_FILE_NAME: &str = "merged_final_collapse.jsonl";

/// Serialize `rows` as JSON lines.
pub fn to_jsonl<T: Serialize>(rows: &[T]) -> Result<String, Box<dyn Error>> {
    let mut out = String::new();
    for row in rows {
        out.push_str(&serde_json::to_string(row)?);
        out.push('\n');
    }
    Ok(out)
}

/// Write `rows` to `path` as JSON lines, replacing any previous file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let body = to_jsonl(rows)?;
    if let Err(e) = fs::write(path, body).await {
        error!(error = %e, "Failed to write dataset");
        return Err(e.into());
    }
    info!(rows = rows.len(), "Wrote dataset");
    Ok(())
}

/// Read a JSON-lines file written by [`write_jsonl`].
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, Box<dyn Error>> {
    let contents = fs::read_to_string(path).await?;
    let mut rows = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(line)
            .map_err(|e| format!("{}:{}: {e}", path.display(), index + 1))?;
        rows.push(row);
    }
    Ok(rows)
}
