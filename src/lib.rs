pub mod adapters;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod models;
pub mod ports;
pub mod resilience;
pub mod server;

pub use adapters::{build_fetcher, StaticFetcher};
pub use config::{Config, ConfigOverrides, FetchStrategy};
pub use engine::ExtractionEngine;
pub use error::{Error, ErrorKind, Result};
pub use extract::IdResolver;
pub use models::{
    PageMetadata, Publication, PublicationSummary, SearchFilters, SearchPage, SearchResultRow,
};
pub use ports::{Document, DocumentFetcherPort, FetchRequest};
pub use resilience::{TimeoutExt, TimeoutWrapper};
pub use server::Server;
