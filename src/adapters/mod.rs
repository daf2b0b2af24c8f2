//! # Adapters Module
//!
//! Concrete implementations of the [`crate::ports`] interfaces.
//!
//! ## Fetch strategies
//!
//! - [`StaticFetcher`]: one HTTP GET, raw HTML handed to the extractor
//! - `RenderedFetcher` (feature `browser`): headless Chromium, waits for the
//!   extraction anchors and serialises the live DOM
//!
//! Both yield the same [`crate::ports::Document`], so the engine runs the
//! same selectors regardless of strategy. Pick one with [`build_fetcher`].

#[cfg(feature = "browser")]
pub mod rendered_fetcher;
pub mod static_fetcher;

#[cfg(feature = "browser")]
pub use rendered_fetcher::RenderedFetcher;
pub use static_fetcher::StaticFetcher;

use crate::config::{Config, FetchStrategy};
use crate::ports::DocumentFetcherPort;
use crate::Result;
use std::sync::Arc;
use tracing::info;

/// Build the fetch strategy selected in configuration
pub fn build_fetcher(config: &Config) -> Result<Arc<dyn DocumentFetcherPort>> {
    let fetcher: Arc<dyn DocumentFetcherPort> = match config.fetch.strategy {
        FetchStrategy::Static => Arc::new(StaticFetcher::new(&config.fetch)?),
        #[cfg(feature = "browser")]
        FetchStrategy::Rendered => Arc::new(RenderedFetcher::new(&config.fetch)),
        #[cfg(not(feature = "browser"))]
        FetchStrategy::Rendered => {
            return Err(crate::Error::InvalidInput {
                field: "fetch.strategy".to_string(),
                reason: "the rendered strategy requires building with the `browser` feature"
                    .to_string(),
            })
        }
    };

    info!("Using {} fetch strategy", fetcher.name());
    Ok(fetcher)
}
