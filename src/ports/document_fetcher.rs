//! # Document Fetcher Port
//!
//! Defines the capability the extraction engine needs from a fetch strategy:
//! given a URL, return a document the selector-based extraction can run on,
//! or a classified failure.

use crate::{Error, Result};
use async_trait::async_trait;
use scraper::Html;
use std::fmt::Debug;

/// What to fetch
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    /// Absolute URL of the page
    pub url: &'a str,
    /// Selectors the extraction will read. Strategies that render
    /// client-side wait for these; none of them is required.
    pub anchors: &'a [&'a str],
}

impl<'a> FetchRequest<'a> {
    #[must_use]
    pub const fn new(url: &'a str, anchors: &'a [&'a str]) -> Self {
        Self { url, anchors }
    }
}

/// A fetched page.
///
/// Holds markup rather than a parsed tree so it can cross await points;
/// call [`Document::parse`] inside synchronous extraction code.
#[derive(Debug, Clone)]
pub struct Document {
    pub url: String,
    pub html: String,
    /// Anchors that did not appear before their wait expired
    pub missing_anchors: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            missing_anchors: Vec::new(),
        }
    }

    #[must_use]
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

/// Port interface for page retrieval strategies
///
/// Implementations classify failures as:
/// - `Error::NotFound` for an upstream 404
/// - `Error::Timeout` when the fetch exceeded its budget
/// - `Error::Upstream` / `Error::UpstreamStatus` for anything else
///
/// No retries are performed.
#[async_trait]
pub trait DocumentFetcherPort: Send + Sync + Debug {
    /// Retrieve the page at `request.url`
    async fn fetch(&self, request: FetchRequest<'_>) -> Result<Document>;

    /// Short strategy name for logs
    fn name(&self) -> &'static str;
}

/// Map an upstream HTTP status to the fetch error taxonomy
pub fn classify_status(url: &str, code: u16) -> Result<()> {
    match code {
        200..=299 => Ok(()),
        404 => Err(Error::NotFound {
            resource: url.to_string(),
        }),
        _ => Err(Error::UpstreamStatus {
            url: url.to_string(),
            code,
        }),
    }
}
