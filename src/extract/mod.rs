//! Structural extraction from repository HTML.

pub mod date;
pub mod id;
pub mod locator;
pub mod pagination;
pub mod selectors;

pub use id::IdResolver;
pub use locator::{
    extract_absolute_urls, extract_attr, extract_list, extract_scalar, ListLocator, Locator,
};
pub use pagination::{PaginationControl, PaginationItem};
