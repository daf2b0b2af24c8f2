use std::time::Duration;
use thiserror::Error;

/// Error taxonomy for the extraction pipeline and its HTTP boundary
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (permanent failures)
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Transport errors
    #[error("Upstream request to {url} failed: {reason}")]
    Upstream { url: String, reason: String },

    #[error("Upstream returned HTTP {code} for {url}")]
    UpstreamStatus { url: String, code: u16 },

    #[error("Browser session error: {0}")]
    Browser(String),

    #[error("Timeout error: operation timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    // Request-level failures
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Requested page {requested} but upstream rendered page {rendered}")]
    PageDesync { requested: u32, rendered: u32 },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    // Field-level failures, normally degraded by the caller
    #[error("Malformed date: {raw:?}")]
    MalformedDate { raw: String },

    #[error("Parse error in {context}: {message}")]
    Parse { context: String, message: String },
}

/// Classification used at the boundary to pick a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Target record absent upstream
    NotFound,
    /// Caller-supplied input is inconsistent with upstream state
    BadRequest,
    /// Transport failure, non-2xx, or anything unclassified
    Upstream,
    /// The operation exceeded its time budget
    Timeout,
}

impl Error {
    /// Classify the error for the transport layer
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,

            Error::PageDesync { .. } | Error::BadRequest(_) | Error::InvalidInput { .. } => {
                ErrorKind::BadRequest
            }

            Error::Timeout { .. } => ErrorKind::Timeout,

            Error::Config(_)
            | Error::Io(_)
            | Error::Upstream { .. }
            | Error::UpstreamStatus { .. }
            | Error::Browser(_)
            | Error::MalformedDate { .. }
            | Error::Parse { .. } => ErrorKind::Upstream,
        }
    }

    /// Message suitable for the response envelope
    pub fn public_message(&self) -> String {
        match self {
            Error::PageDesync { .. } => {
                "Your page request is greater than the last page or lower than 1!".to_string()
            }
            Error::NotFound { resource } => format!("{resource} not found!"),
            Error::BadRequest(message) => message.clone(),
            Error::InvalidInput { field, reason } => format!("Invalid {field}: {reason}"),
            Error::Timeout { .. } => "The repository took too long to respond.".to_string(),
            _ => "Failed to fetch data from the repository.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
