//! # Rendered Fetcher
//!
//! Drives headless Chromium: navigate, wait for the extraction anchors, then
//! serialise the live DOM from inside the page. Each fetch runs in its own
//! browser session which is torn down on every exit path.

use crate::config::FetchConfig;
use crate::ports::document_fetcher::{
    classify_status, Document, DocumentFetcherPort, FetchRequest,
};
use crate::resilience::{missing_anchors, TimeoutExt};
use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Interval between element lookups while waiting for an anchor
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// HTTP status of the main navigation, 0 when the engine does not expose it
const NAVIGATION_STATUS_JS: &str = "(() => { \
    const nav = performance.getEntriesByType('navigation')[0]; \
    return nav && nav.responseStatus ? nav.responseStatus : 0; \
})()";

const OUTER_HTML_JS: &str = "document.documentElement.outerHTML";

/// Fetch strategy backed by a headless browser
#[derive(Debug, Clone)]
pub struct RenderedFetcher {
    element_wait: Duration,
    navigation_timeout: Duration,
    executable: Option<PathBuf>,
}

impl RenderedFetcher {
    #[must_use]
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            element_wait: config.element_wait(),
            navigation_timeout: config.timeout(),
            executable: config.browser_executable.clone(),
        }
    }

    async fn render(
        &self,
        session: &BrowserSession,
        request: FetchRequest<'_>,
    ) -> Result<Document> {
        let page = session
            .browser
            .new_page(request.url)
            .with_timeout_duration(self.navigation_timeout)
            .await?
            .map_err(|e| Error::Upstream {
                url: request.url.to_string(),
                reason: format!("Navigation failed: {e}"),
            })?;

        let outcome = self.extract(&page, request).await;

        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }

        outcome
    }

    async fn extract(&self, page: &Page, request: FetchRequest<'_>) -> Result<Document> {
        let status: u16 = evaluate(page, NAVIGATION_STATUS_JS).await.unwrap_or(0);
        if status != 0 {
            classify_status(request.url, status)?;
        }

        // A missing anchor is absent data, not a failure
        let missing = missing_anchors(request.anchors, self.element_wait, |anchor| {
            wait_for_element(page, anchor)
        })
        .await;

        if !missing.is_empty() {
            warn!("Anchors not rendered on {}: {:?}", request.url, missing);
        }

        let html: String = evaluate(page, OUTER_HTML_JS).await?;

        Ok(Document {
            url: request.url.to_string(),
            html,
            missing_anchors: missing,
        })
    }
}

#[async_trait]
impl DocumentFetcherPort for RenderedFetcher {
    #[instrument(skip(self, request), fields(url = request.url))]
    async fn fetch(&self, request: FetchRequest<'_>) -> Result<Document> {
        let session =
            BrowserSession::launch(self.executable.as_ref(), self.navigation_timeout).await?;
        let result = self.render(&session, request).await;
        session.close().await;
        result
    }

    fn name(&self) -> &'static str {
        "rendered"
    }
}

/// An isolated browser process plus its CDP event loop.
///
/// `close` shuts the browser down gracefully. If the owning future is
/// dropped first, `Drop` stops the event loop and dropping the `Browser`
/// kills the child process.
struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(executable: Option<&PathBuf>, request_timeout: Duration) -> Result<Self> {
        let mut builder = BrowserConfig::builder().request_timeout(request_timeout);
        if let Some(path) = executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| Error::Browser(format!("Failed to launch browser: {e}")))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!("Launched browser session");
        Ok(Self {
            browser,
            handler_task,
        })
    }

    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!("Browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Browser wait failed: {}", e);
        }
        debug!("Browser session closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

async fn wait_for_element(page: &Page, selector: &str) {
    loop {
        if page.find_element(selector).await.is_ok() {
            return;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

async fn evaluate<T: serde::de::DeserializeOwned>(page: &Page, expression: &str) -> Result<T> {
    page.evaluate(expression)
        .await
        .map_err(|e| Error::Browser(format!("Evaluation failed: {e}")))?
        .into_value()
        .map_err(|e| Error::Browser(format!("Unexpected evaluation result: {e}")))
}
