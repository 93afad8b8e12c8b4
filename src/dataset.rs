//! Assembly of the speech dataset from the ledger and extracted texts.
//!
//! The ledger decides which rows exist. Each row gets the contents of its
//! `<id>.pdf.txt` file, or an empty string when that file is missing or
//! not valid UTF-8.

use crate::ledger;
use crate::models::{MetadataRecord, SpeechRecord};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Join ledger records with the text files in `dir`.
pub async fn attach_texts(dir: &Path, records: Vec<MetadataRecord>) -> Vec<SpeechRecord> {
    let mut rows = Vec::with_capacity(records.len());
    let mut missing = 0usize;

    for metadata in records {
        let path = dir.join(metadata.text_file_name());
        let speech_text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) => {
                debug!(document_id = %metadata.document_id, error = %e, "No speech text; using empty string");
                missing += 1;
                String::new()
            }
        };
        rows.push(SpeechRecord { metadata, speech_text });
    }

    info!(rows = rows.len(), missing_text = missing, "Attached speech texts");
    rows
}

/// Read the ledger in `dir` and build one row per ledger line.
///
/// # Arguments
///
/// * `dir` - Working directory holding the ledger and `<id>.pdf.txt` files
///
/// # Returns
///
/// One [`SpeechRecord`] per ledger line, in ledger order. Rows whose text
/// is missing or undecodable carry an empty `speech_text`.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn assemble(dir: &Path) -> Result<Vec<SpeechRecord>, Box<dyn Error>> {
    let records = ledger::read(dir).await?;
    Ok(attach_texts(dir, records).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEDGER: &str = "\
970106a, 1997-01-06, Hans Tietmeyer, deutsche bundesbank: Speech by Mr Tietmeyer, Frankfurt
970106b, 1997-01-06, NA, NA: Untitled remarks
970107a, 1997-01-07, Alan Greenspan, board of governors of the federal reserve system: Remarks: risk, return
";

    #[tokio::test]
    async fn test_assemble_joins_texts_in_ledger_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ledger::LEDGER_FILE_NAME), LEDGER).unwrap();
        std::fs::write(dir.path().join("970106a.pdf.txt"), "Ladies and gentlemen").unwrap();
        std::fs::write(dir.path().join("970107a.pdf.txt"), "Thank you").unwrap();
        // Not in the ledger, so not in the dataset.
        std::fs::write(dir.path().join("990101a.pdf.txt"), "orphan").unwrap();

        let rows = assemble(dir.path()).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].metadata.document_id, "970106a");
        assert_eq!(rows[0].speech_text, "Ladies and gentlemen");
        assert_eq!(rows[2].metadata.raw_title_text, "Remarks: risk, return");
        assert_eq!(rows[2].speech_text, "Thank you");
    }

    #[tokio::test]
    async fn test_missing_text_yields_empty_speech() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ledger::LEDGER_FILE_NAME), LEDGER).unwrap();

        let rows = assemble(dir.path()).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.speech_text.is_empty()));
        assert_eq!(rows[1].metadata.institution, "NA");
    }

    #[tokio::test]
    async fn test_undecodable_text_yields_empty_speech() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ledger::LEDGER_FILE_NAME), LEDGER).unwrap();
        std::fs::write(dir.path().join("970106a.pdf.txt"), b"\xff\xfe\x00").unwrap();

        let rows = assemble(dir.path()).await.unwrap();
        assert_eq!(rows[0].speech_text, "");
    }

    #[tokio::test]
    async fn test_missing_ledger_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(assemble(dir.path()).await.is_err());
    }
}
