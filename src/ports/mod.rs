//! # Ports Module
//!
//! Port interfaces for the hexagonal architecture pattern. The extraction
//! engine depends only on these traits; concrete strategies live in
//! [`crate::adapters`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use uinjkt_repository_api::ports::{DocumentFetcherPort, FetchRequest};
//!
//! async fn landing_html(
//!     fetcher: Arc<dyn DocumentFetcherPort>,
//! ) -> uinjkt_repository_api::Result<String> {
//!     let url = "https://repository.uinjkt.ac.id/dspace/";
//!     let document = fetcher
//!         .fetch(FetchRequest::new(url, &[".carousel-inner"]))
//!         .await?;
//!     Ok(document.html)
//! }
//! ```

pub mod document_fetcher;

pub use document_fetcher::{classify_status, Document, DocumentFetcherPort, FetchRequest};
