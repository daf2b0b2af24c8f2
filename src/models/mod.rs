//! Request-scoped value types produced by the extraction engine.

use serde::{Deserialize, Serialize};

/// A featured item from the repository landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationSummary {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// A full record page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Taken from the request, never scraped
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: Vec<String>,
    pub advisors: Vec<String>,
    /// Absolute, host-qualified bitstream URLs
    pub download_urls: Vec<String>,
    /// ISO-8601 instant, `None` when absent or unparsable
    pub issue_date: Option<String>,
}

/// One row of the search results table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultRow {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub advisors: String,
    /// `None` exactly when the cell renders the "no date" placeholder
    pub issue_date: Option<String>,
}

/// Pagination state reconciled against the rendered control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub current_page: u32,
    pub last_page: u32,
    pub next_page: u32,
    pub previous_page: u32,
}

impl PageMetadata {
    /// Derive next/previous from the current and last page
    #[must_use]
    pub fn new(current_page: u32, last_page: u32) -> Self {
        Self {
            current_page,
            last_page,
            next_page: last_page.min(current_page.saturating_add(1)),
            previous_page: current_page.saturating_sub(1).max(1),
        }
    }

    /// Metadata for a result set that fits on a single page
    #[must_use]
    pub fn single() -> Self {
        Self::new(1, 1)
    }
}

/// Additive search filters; empty values are omitted from the upstream query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub issue_date: String,
}

/// A reconciled page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    pub rows: Vec<SearchResultRow>,
    pub meta: PageMetadata,
    /// Message for the caller to surface, e.g. a beyond-last-page warning
    pub message: String,
}
