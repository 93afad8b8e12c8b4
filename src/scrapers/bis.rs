//! BIS central bank speech archive crawler.
//!
//! For every day code the crawler requests letter suffixes `a` through `z`.
//! The archive allocates letters contiguously from `a`, so the first 404 of
//! a day ends that day. Each document found is parsed, resolved to its
//! issuing institution, stored as `<id>.pdf` and recorded in the ledger.
//!
//! Failures are scoped to a single document: they are logged, counted and
//! the crawl moves on to the next letter. Nothing is retried within a run;
//! a document that failed is simply requested again on the next run because
//! only completed documents are skipped.

use crate::config::Config;
use crate::dates::day_code_to_iso;
use crate::institutions;
use crate::ledger;
use crate::models::{DocumentId, MetadataRecord, NOT_AVAILABLE};
use crate::scrapers::Archive;
use crate::utils::{collapse_whitespace, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, info, instrument, warn};

static AUTHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.authorlnk.dashed").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("#extratitle-div").unwrap());

/// Counters describing one crawl.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Day codes visited.
    pub days: usize,
    /// Documents parsed, stored and recorded in the ledger.
    pub stored: usize,
    /// Letters skipped because their document was already on disk.
    pub skipped_complete: usize,
    /// Documents lost to a transport, parse or write failure.
    pub failed: usize,
    /// HTTP requests issued.
    pub requests: usize,
}

/// Author and title block extracted from a speech page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub author_name: String,
    pub title: String,
}

/// Extract the author and title block from a speech page.
///
/// A missing author link yields [`NOT_AVAILABLE`]; a missing title block is
/// an error because the document cannot be attributed without it.
pub fn parse_page(html: &str) -> Result<PageMetadata, Box<dyn Error>> {
    let document = Html::parse_document(html);

    let author_name = document
        .select(&AUTHOR_SELECTOR)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<Vec<_>>().join(" ")))
        .ok_or("page has no #extratitle-div block")?;

    Ok(PageMetadata { author_name, title })
}

/// Whether a document was already scraped by an earlier run.
///
/// The extracted text is the completion marker; a raw PDF still waiting
/// for conversion counts as complete as well.
pub async fn is_complete(dir: &Path, id: &DocumentId) -> bool {
    let text = fs::try_exists(dir.join(id.text_file_name())).await.unwrap_or(false);
    let pdf = fs::try_exists(dir.join(id.pdf_file_name())).await.unwrap_or(false);
    text || pdf
}

/// Crawl every day code in order.
#[instrument(level = "info", skip_all, fields(days = day_codes.len()))]
pub async fn scrape_range<A: Archive>(
    archive: &A,
    config: &Config,
    day_codes: &[String],
) -> ScrapeSummary {
    let mut summary = ScrapeSummary::default();
    for code in day_codes {
        scrape_day(archive, config, code, &mut summary).await;
    }
    info!(
        days = summary.days,
        stored = summary.stored,
        skipped = summary.skipped_complete,
        failed = summary.failed,
        requests = summary.requests,
        "Crawl finished"
    );
    summary
}

/// Walk the letters of a single day until the archive reports 404.
#[instrument(level = "debug", skip_all, fields(day_code = %day_code))]
pub async fn scrape_day<A: Archive>(
    archive: &A,
    config: &Config,
    day_code: &str,
    summary: &mut ScrapeSummary,
) {
    summary.days += 1;

    for letter in 'a'..='z' {
        let id = DocumentId::new(day_code, letter);

        if is_complete(&config.working_dir, &id).await {
            debug!(%id, "Already scraped; skipping");
            summary.skipped_complete += 1;
            continue;
        }

        let page_url = match config.base_url.join(&format!("r{id}.htm")) {
            Ok(url) => url,
            Err(e) => {
                error!(%id, error = %e, "Cannot build page URL");
                summary.failed += 1;
                continue;
            }
        };

        summary.requests += 1;
        let page = match archive.get(&page_url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(%id, url = %page_url, error = %e, "Page request failed; skipping document");
                summary.failed += 1;
                continue;
            }
        };

        if page.is_not_found() {
            debug!(%id, "No more documents for this day");
            break;
        }
        if !page.is_success() {
            warn!(%id, status = page.status, "Unexpected page status; skipping document");
            summary.failed += 1;
            continue;
        }

        match store_document(archive, config, &id, &page.body, summary).await {
            Ok(record) => {
                info!(
                    %id,
                    institution = %record.institution,
                    author = %record.author_name,
                    "Stored speech"
                );
                summary.stored += 1;
            }
            Err(e) => {
                warn!(%id, error = %e, "Failed to scrape document; skipping");
                summary.failed += 1;
            }
        }
    }
}

/// Parse a fetched page, download its PDF and record it in the ledger.
///
/// The PDF is written before the ledger line, and removed again if the
/// ledger append fails, so the ledger never names a document that is not
/// on disk.
async fn store_document<A: Archive>(
    archive: &A,
    config: &Config,
    id: &DocumentId,
    page_body: &[u8],
    summary: &mut ScrapeSummary,
) -> Result<MetadataRecord, Box<dyn Error>> {
    let html = String::from_utf8_lossy(page_body);
    let page = parse_page(&html)?;

    let institution = institutions::resolve(&page.title);
    if institution == institutions::Resolution::Unresolved {
        warn!(%id, title = %truncate_for_log(&page.title, 120), "Institution not recognized");
    }

    let record = MetadataRecord {
        document_id: id.to_string(),
        date: day_code_to_iso(&id.day_code)?,
        author_name: page.author_name,
        institution: institution.name_or(NOT_AVAILABLE).to_string(),
        raw_title_text: page.title,
    };

    let pdf_url = config.base_url.join(&format!("r{id}.pdf"))?;
    summary.requests += 1;
    let pdf = archive.get(&pdf_url).await?;
    if !pdf.is_success() {
        return Err(format!("PDF request returned status {}", pdf.status).into());
    }

    let pdf_path = config.working_dir.join(id.pdf_file_name());
    fs::write(&pdf_path, &pdf.body).await?;

    if let Err(e) = ledger::append(&config.working_dir, &record).await {
        let _ = fs::remove_file(&pdf_path).await;
        return Err(e);
    }

    Ok(record)
}
