//! Response envelopes and error-to-status mapping.

use crate::error::ErrorKind;
use crate::models::PageMetadata;
use crate::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

/// `{data, status, message}` or `{data, status, meta, message}`
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope<T> {
    pub data: T,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMetadata>,
    pub message: String,
}

impl<T: Serialize> ResponseEnvelope<T> {
    pub fn normal(data: T, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            data,
            status: status.as_u16(),
            meta: None,
            message: message.into(),
        }
    }

    pub fn paginated(
        data: T,
        status: StatusCode,
        meta: PageMetadata,
        message: impl Into<String>,
    ) -> Self {
        Self {
            data,
            status: status.as_u16(),
            meta: Some(meta),
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseEnvelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// HTTP status for an error class
#[must_use]
pub const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(self.kind());
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        ResponseEnvelope::normal(serde_json::Value::Null, status, self.public_message())
            .into_response()
    }
}
