//! The metadata ledger: an append-only text file with one line per scraped speech.
//!
//! # Line Format
//!
//! ```text
//! <document_id>, <iso_date>, <author_name>, <institution>: <raw_title_text>
//! ```
//!
//! Titles may themselves contain commas and colons, so the reader splits
//! on the first three commas only and then splits the remainder on its
//! first colon. Nothing is escaped.

use crate::models::MetadataRecord;
use std::error::Error;
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// File name of the ledger inside the working directory.
pub const LEDGER_FILE_NAME: &str = "meta_data.txt";

/// Render a record as a single ledger line, including the trailing newline.
///
/// Line breaks inside fields are flattened to spaces so one record always
/// occupies exactly one line.
pub fn format_line(record: &MetadataRecord) -> String {
    format!(
        "{}, {}, {}, {}: {}\n",
        single_line(&record.document_id),
        single_line(&record.date),
        single_line(&record.author_name),
        single_line(&record.institution),
        single_line(&record.raw_title_text),
    )
}

fn single_line(field: &str) -> String {
    field.replace(['\r', '\n'], " ")
}

/// Parse one ledger line.
///
/// Returns `None` for blank lines. Lines missing delimiters still produce a
/// record; the absent fields are left empty.
pub fn parse_line(line: &str) -> Option<MetadataRecord> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    let mut fields = line.splitn(4, ',');
    let document_id = fields.next().unwrap_or_default().trim().to_string();
    let date = fields.next().unwrap_or_default().trim().to_string();
    let author_name = fields.next().unwrap_or_default().trim().to_string();
    let residual = fields.next().unwrap_or_default();

    let (institution, raw_title_text) = residual.split_once(':').unwrap_or((residual, ""));

    Some(MetadataRecord {
        document_id,
        date,
        author_name,
        institution: institution.trim().to_string(),
        raw_title_text: raw_title_text.trim().to_string(),
    })
}

/// Parse the full contents of a ledger file, in order.
pub fn parse_ledger(contents: &str) -> Vec<MetadataRecord> {
    contents.lines().filter_map(parse_line).collect()
}

/// Append a record to the ledger in `dir`, creating the file if needed.
///
/// Existing content is never truncated or rewritten.
///
/// # Arguments
///
/// * `dir` - Working directory that holds `meta_data.txt`
/// * `record` - Record to write as one line
///
/// # Errors
///
/// Returns an error if the ledger cannot be opened or written.
#[instrument(level = "debug", skip_all, fields(document_id = %record.document_id))]
pub async fn append(dir: &Path, record: &MetadataRecord) -> Result<(), Box<dyn Error>> {
    let path = dir.join(LEDGER_FILE_NAME);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    file.write_all(format_line(record).as_bytes()).await?;
    file.flush().await?;
    debug!(path = %path.display(), "Appended ledger line");
    Ok(())
}

/// Read and parse every record of the ledger in `dir`.
///
/// # Returns
///
/// Records in file order. Blank lines are skipped; malformed lines still
/// yield a record with empty missing fields.
///
/// # Errors
///
/// Returns an error if the ledger is missing or is not valid UTF-8.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn read(dir: &Path) -> Result<Vec<MetadataRecord>, Box<dyn Error>> {
    let path = dir.join(LEDGER_FILE_NAME);
    let contents = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("cannot read ledger {}: {e}", path.display()))?;
    let records = parse_ledger(&contents);
    debug!(count = records.len(), "Parsed ledger");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str) -> MetadataRecord {
        MetadataRecord {
            document_id: id.to_string(),
            date: "1997-01-06".to_string(),
            author_name: "Alan Greenspan".to_string(),
            institution: "board of governors of the federal reserve system".to_string(),
            raw_title_text: title.to_string(),
        }
    }

    #[test]
    fn test_format_line() {
        let line = format_line(&record("970106a", "Remarks by Chairman Greenspan"));
        assert_eq!(
            line,
            "970106a, 1997-01-06, Alan Greenspan, board of governors of the federal reserve system: Remarks by Chairman Greenspan\n"
        );
    }

    #[test]
    fn test_title_with_commas_and_colons_survives() {
        let title = "Remarks by Mr Greenspan, at the conference: \"Risk, return, and regulation\", Washington DC, 6 January 1997";
        let line = format_line(&record("970106b", title));
        let parsed = parse_line(&line).unwrap();
        assert_eq!(parsed, record("970106b", title));
    }

    #[test]
    fn test_embedded_newlines_are_flattened() {
        let line = format_line(&record("970106c", "First line\nsecond line"));
        assert_eq!(line.matches('\n').count(), 1);
        assert_eq!(parse_line(&line).unwrap().raw_title_text, "First line second line");
    }

    #[test]
    fn test_parse_legacy_line() {
        let parsed = parse_line(
            "990315a, 1999-03-15, NA, bank of japan: Speech by the Governor of the Bank of Japan, Tokyo\n",
        )
        .unwrap();
        assert_eq!(parsed.document_id, "990315a");
        assert_eq!(parsed.date, "1999-03-15");
        assert_eq!(parsed.author_name, "NA");
        assert_eq!(parsed.institution, "bank of japan");
        assert_eq!(
            parsed.raw_title_text,
            "Speech by the Governor of the Bank of Japan, Tokyo"
        );
    }

    #[test]
    fn test_parse_incomplete_line_keeps_row() {
        let parsed = parse_line("990315a, 1999-03-15").unwrap();
        assert_eq!(parsed.document_id, "990315a");
        assert_eq!(parsed.date, "1999-03-15");
        assert!(parsed.author_name.is_empty());
        assert!(parsed.institution.is_empty());
        assert!(parsed.raw_title_text.is_empty());
    }

    #[test]
    fn test_parse_ledger_skips_blank_lines() {
        let contents = "970106a, 1997-01-06, NA, ecb: One\n\n970106b, 1997-01-06, NA, ecb: Two\n";
        let records = parse_ledger(contents);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].raw_title_text, "Two");
    }

    #[tokio::test]
    async fn test_append_never_truncates() {
        let dir = tempfile::tempdir().unwrap();
        append(dir.path(), &record("970106a", "One")).await.unwrap();
        append(dir.path(), &record("970106b", "Two")).await.unwrap();

        let records = read(dir.path()).await.unwrap();
        assert_eq!(records, vec![record("970106a", "One"), record("970106b", "Two")]);
    }

    #[tokio::test]
    async fn test_read_missing_ledger_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read(dir.path()).await.is_err());
    }
}
