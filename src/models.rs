//! Data models for scraped speeches and their assembled representations.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`DocumentId`]: The `(day_code, letter)` key of a single archived speech
//! - [`MetadataRecord`]: One ledger entry written at scrape time
//! - [`SpeechRecord`]: A ledger entry joined with its extracted text
//! - [`ProcessedSpeech`]: A speech with cleaned text and derived variables
//! - [`MergedSpeech`]: A processed speech matched to its country-year populism cell
//! - [`CollapsedRow`]: Country-year means of the merged speeches

use crate::populism::PopulismStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel written for fields the archive page did not provide.
pub const NOT_AVAILABLE: &str = "NA";

/// Composite key of an archived speech.
///
/// The archive numbers documents by publication day (`YYMMDD`) and a
/// lowercase letter that disambiguates documents of the same day. The
/// rendered form (`970106a`) is the filename stem of both the raw PDF and
/// its extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    /// Six-digit `YYMMDD` day code.
    pub day_code: String,
    /// Letter suffix in `a..=z`.
    pub letter: char,
}

impl DocumentId {
    pub fn new(day_code: impl Into<String>, letter: char) -> Self {
        Self {
            day_code: day_code.into(),
            letter,
        }
    }

    /// Filename of the raw document, e.g. `970106a.pdf`.
    pub fn pdf_file_name(&self) -> String {
        format!("{self}.pdf")
    }

    /// Filename of the extracted text, e.g. `970106a.pdf.txt`.
    pub fn text_file_name(&self) -> String {
        format!("{self}.pdf.txt")
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.day_code, self.letter)
    }
}

/// A single line of the metadata ledger.
///
/// Records are created once when a speech page is parsed and never
/// mutated afterwards. `document_id` is kept in its rendered form so that
/// ledger lines written by older tooling round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetadataRecord {
    /// Rendered [`DocumentId`], e.g. `970106a`.
    pub document_id: String,
    /// Publication date in `YYYY-MM-DD` format.
    pub date: String,
    /// Speaker name, or [`NOT_AVAILABLE`].
    pub author_name: String,
    /// Canonical lowercase institution name, or [`NOT_AVAILABLE`].
    pub institution: String,
    /// Free-text title block as shown on the archive page.
    pub raw_title_text: String,
}

impl MetadataRecord {
    /// Filename of the extracted text for this record.
    pub fn text_file_name(&self) -> String {
        format!("{}.pdf.txt", self.document_id)
    }
}

/// One row of the assembled speech dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpeechRecord {
    #[serde(flatten)]
    pub metadata: MetadataRecord,
    /// Extracted speech text; empty when the text file was missing or unreadable.
    pub speech_text: String,
}

/// A speech row enriched with cleaned text and simple count variables.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProcessedSpeech {
    #[serde(flatten)]
    pub speech: SpeechRecord,
    /// Publication year, if the date parsed.
    pub year: Option<i32>,
    /// Casefolded, letters-only text with stop words removed.
    pub speech_clean: String,
    /// Whitespace-delimited word count of the raw speech text.
    pub num_words: usize,
    pub growth_count: usize,
    pub inflation_count: usize,
    pub inequality_count: usize,
    pub climate_count: usize,
}

/// A processed speech joined with the populism panel.
///
/// Only speeches with a known year, a country and a matching panel cell
/// become merged rows; the cleaned text is not carried over.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MergedSpeech {
    pub document_id: String,
    pub date: String,
    pub author_name: String,
    pub institution: String,
    pub country: String,
    pub year: i32,
    pub num_words: usize,
    pub growth_count: usize,
    pub inflation_count: usize,
    pub inequality_count: usize,
    pub climate_count: usize,
    #[serde(flatten)]
    pub populism: PopulismStatus,
}

/// Means of the merged speeches of one country in one year.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CollapsedRow {
    pub year: i32,
    pub country: String,
    /// Number of speeches averaged into this row.
    pub speeches: usize,
    pub num_words: f64,
    pub growth_count: f64,
    pub inflation_count: f64,
    pub inequality_count: f64,
    pub climate_count: f64,
    #[serde(flatten)]
    pub populism: PopulismStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> MetadataRecord {
        MetadataRecord {
            document_id: "970106a".to_string(),
            date: "1997-01-06".to_string(),
            author_name: "Hans Tietmeyer".to_string(),
            institution: "deutsche bundesbank".to_string(),
            raw_title_text: "Speech by the President of the Deutsche Bundesbank".to_string(),
        }
    }

    #[test]
    fn test_document_id_file_names() {
        let id = DocumentId::new("970106", 'a');
        assert_eq!(id.to_string(), "970106a");
        assert_eq!(id.pdf_file_name(), "970106a.pdf");
        assert_eq!(id.text_file_name(), "970106a.pdf.txt");
        assert_eq!(sample_record().text_file_name(), id.text_file_name());
    }

    #[test]
    fn test_speech_record_serializes_flat() {
        let row = SpeechRecord {
            metadata: sample_record(),
            speech_text: "Ladies and gentlemen".to_string(),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["document_id"], "970106a");
        assert_eq!(json["institution"], "deutsche bundesbank");
        assert_eq!(json["speech_text"], "Ladies and gentlemen");
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_speech_record_deserialization() {
        let json = r#"{
            "document_id": "970106a",
            "date": "1997-01-06",
            "author_name": "NA",
            "institution": "NA",
            "raw_title_text": "Untitled",
            "speech_text": ""
        }"#;

        let row: SpeechRecord = serde_json::from_str(json).unwrap();
        assert_eq!(row.metadata.author_name, NOT_AVAILABLE);
        assert!(row.speech_text.is_empty());
    }
}
