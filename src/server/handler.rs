//! Route handlers mapping HTTP requests onto the extraction engine.

use super::response::ResponseEnvelope;
use crate::engine::{ExtractionEngine, PAGE_OUT_OF_RANGE_MESSAGE};
use crate::models::{Publication, PublicationSummary, SearchFilters, SearchResultRow};
use crate::{Error, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: Arc<ExtractionEngine>,
}

/// Router for the publication API
pub fn router(engine: Arc<ExtractionEngine>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/publications", get(search_publications))
        .route("/publications/newest", get(newest_publications))
        .route("/publications/:id", get(publication_by_id))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { engine })
}

async fn home() -> ResponseEnvelope<&'static str> {
    ResponseEnvelope::normal(
        "Welcome to UINJKT Institutional Repository API!",
        StatusCode::OK,
        "Successfully accessed home page!",
    )
}

async fn newest_publications(
    State(state): State<AppState>,
) -> Result<ResponseEnvelope<Vec<PublicationSummary>>> {
    let publications = state.engine.newest().await?;
    Ok(ResponseEnvelope::normal(
        publications,
        StatusCode::OK,
        "Successfully get newest publication data.",
    ))
}

async fn publication_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseEnvelope<Publication>> {
    let publication = state.engine.publication(&id).await?;
    let message = format!("Successfully get publication with the id {}.", publication.id);
    Ok(ResponseEnvelope::normal(publication, StatusCode::OK, message))
}

/// Query string of `GET /publications`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub current_page: Option<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub issue_date: String,
}

impl SearchParams {
    /// Required positive `current_page`
    pub fn page(&self) -> Result<u32> {
        let raw = self.current_page.as_deref().map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(Error::BadRequest(
                "Validation failed (numeric string is expected)".to_string(),
            ));
        }

        match raw.parse::<u32>() {
            Ok(0) => Err(Error::BadRequest(PAGE_OUT_OF_RANGE_MESSAGE.to_string())),
            Ok(page) => Ok(page),
            Err(_) if raw.starts_with('-') && raw[1..].bytes().all(|b| b.is_ascii_digit()) => {
                Err(Error::BadRequest(PAGE_OUT_OF_RANGE_MESSAGE.to_string()))
            }
            Err(_) => Err(Error::BadRequest(
                "Validation failed (numeric string is expected)".to_string(),
            )),
        }
    }

    fn filters(self) -> SearchFilters {
        SearchFilters {
            query: self.query,
            authors: self.authors,
            issue_date: self.issue_date,
        }
    }
}

async fn search_publications(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<ResponseEnvelope<Vec<SearchResultRow>>> {
    let page = params.page()?;
    let result = state.engine.search(page, &params.filters()).await?;
    Ok(ResponseEnvelope::paginated(
        result.rows,
        StatusCode::OK,
        result.meta,
        result.message,
    ))
}
