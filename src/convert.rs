//! Conversion of downloaded speech PDFs into plain text files.
//!
//! Each `<id>.pdf` in the working directory becomes `<id>.pdf.txt`. The
//! text is written to a `.part` file first and renamed into place, and the
//! PDF is only deleted once the text file is verified on disk. A failed
//! extraction leaves the PDF where it is for the next run.

use itertools::Itertools;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Suffix appended to a PDF file name to name its text file.
pub const TEXT_SUFFIX: &str = ".txt";

/// Trait for turning a stored document into plain text.
pub trait TextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, Box<dyn Error>>;
}

/// [`TextExtractor`] backed by the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String, Box<dyn Error>> {
        let bytes = fs::read(path).await?;
        // Extraction is CPU bound and may panic on malformed input.
        let text =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await??;
        Ok(text)
    }
}

/// Counters describing one conversion pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Path of the text file derived from `pdf_path`.
pub fn text_path(pdf_path: &Path) -> PathBuf {
    let mut name = pdf_path.as_os_str().to_owned();
    name.push(TEXT_SUFFIX);
    PathBuf::from(name)
}

async fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut pdfs = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "pdf") && entry.file_type().await?.is_file() {
            pdfs.push(path);
        }
    }
    Ok(pdfs.into_iter().sorted().collect())
}

/// Extract, write, verify, then delete the source PDF.
async fn convert_file<E: TextExtractor>(extractor: &E, pdf_path: &Path) -> Result<(), Box<dyn Error>> {
    let text = extractor.extract(pdf_path).await?;

    let final_path = text_path(pdf_path);
    let mut partial = final_path.clone().into_os_string();
    partial.push(".part");
    let partial_path = PathBuf::from(partial);

    let written = async {
        fs::write(&partial_path, text.as_bytes()).await?;
        fs::rename(&partial_path, &final_path).await?;
        Ok::<_, Box<dyn Error>>(())
    }
    .await;
    if let Err(e) = written {
        let _ = fs::remove_file(&partial_path).await;
        return Err(e);
    }

    if !fs::try_exists(&final_path).await? {
        return Err(format!("{} missing after write", final_path.display()).into());
    }
    fs::remove_file(pdf_path).await?;
    debug!(path = %final_path.display(), bytes = text.len(), "Converted document");
    Ok(())
}

/// Convert every PDF in `dir`, in file name order.
///
/// # Arguments
///
/// * `extractor` - Text extraction backend
/// * `dir` - Working directory holding the `<id>.pdf` files
///
/// # Returns
///
/// How many documents were converted and how many failed. A failed
/// document keeps its PDF and leaves no text file behind.
///
/// # Errors
///
/// Returns an error only if `dir` cannot be listed. Per-document failures
/// are counted, not returned.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn convert_dir<E: TextExtractor>(
    extractor: &E,
    dir: &Path,
) -> Result<ConvertSummary, Box<dyn Error>> {
    let pdfs = list_pdfs(dir).await?;
    info!(count = pdfs.len(), "Converting PDFs to text");

    let mut summary = ConvertSummary::default();
    for pdf in &pdfs {
        match convert_file(extractor, pdf).await {
            Ok(()) => summary.converted += 1,
            Err(e) => {
                warn!(path = %pdf.display(), error = %e, "Text extraction failed; keeping PDF");
                summary.failed += 1;
            }
        }
    }

    info!(converted = summary.converted, failed = summary.failed, "Conversion finished");
    Ok(summary)
}
