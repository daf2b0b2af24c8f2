//! # Static Fetcher
//!
//! Single HTTP GET per page; the body is handed to the extractor as-is.

use crate::config::FetchConfig;
use crate::ports::document_fetcher::{
    classify_status, Document, DocumentFetcherPort, FetchRequest,
};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};

/// Fetch strategy backed by a plain `reqwest` client
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    http_client: Client,
    timeout: Duration,
}

impl StaticFetcher {
    /// Create a new static fetcher with the given configuration
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .redirect(reqwest::redirect::Policy::limited(10))
            .gzip(true)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Upstream {
                url: String::new(),
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http_client,
            timeout: config.timeout(),
        })
    }
}

#[async_trait]
impl DocumentFetcherPort for StaticFetcher {
    #[instrument(skip(self, request), fields(url = request.url))]
    async fn fetch(&self, request: FetchRequest<'_>) -> Result<Document> {
        let start_time = Instant::now();

        let response = self
            .http_client
            .get(request.url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|e| {
                error!("HTTP request failed for {}: {}", request.url, e);
                if e.is_timeout() {
                    Error::Timeout {
                        timeout: self.timeout,
                    }
                } else {
                    Error::Upstream {
                        url: request.url.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        classify_status(request.url, response.status().as_u16())?;

        let html = response.text().await.map_err(|e| Error::Upstream {
            url: request.url.to_string(),
            reason: format!("Failed to read response body: {e}"),
        })?;

        debug!(
            "Fetched {} bytes in {}ms",
            html.len(),
            start_time.elapsed().as_millis()
        );

        Ok(Document::new(request.url, html))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
