//! Archive access and speech scraping.
//!
//! HTTP access sits behind the [`Archive`] trait so the crawl logic in
//! [`bis`] can run against the live archive ([`HttpArchive`]) or against
//! scripted responses in tests.
//!
//! # URL Pattern
//!
//! Every speech has a metadata page and a companion PDF at
//! `https://www.bis.org/review/r<YYMMDD><letter>.htm` and `.pdf`.

use reqwest::{Client, header};
use std::error::Error;
use std::time::Instant;
use tracing::{debug, instrument};
use url::Url;

pub mod bis;

/// Status and body of an archive response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ArchiveResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Trait for fetching documents from the speech archive.
///
/// Implementations return the response for any HTTP status; only transport
/// failures are reported as errors.
pub trait Archive {
    async fn get(&self, url: &Url) -> Result<ArchiveResponse, Box<dyn Error>>;
}

/// [`Archive`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpArchive {
    client: Client,
}

impl HttpArchive {
    /// Build a client that identifies itself with `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self, Box<dyn Error>> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("text/html,application/xhtml+xml,application/pdf;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.9"),
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }
}

impl Archive for HttpArchive {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get(&self, url: &Url) -> Result<ArchiveResponse, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Archive response"
        );
        Ok(ArchiveResponse { status, body })
    }
}
