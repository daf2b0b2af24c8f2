//! # Extraction Engine
//!
//! Orchestrates fetch → extract → normalise for the three result shapes the
//! service exposes. The engine is strategy-agnostic: it only sees the
//! [`DocumentFetcherPort`] it was constructed with.

use crate::config::{BeyondLastPagePolicy, Config, RepositoryConfig};
use crate::extract::locator::selector;
use crate::extract::{
    date, extract_absolute_urls, extract_attr, extract_list, extract_scalar, selectors,
    IdResolver, PaginationControl,
};
use crate::models::{
    PageMetadata, Publication, PublicationSummary, SearchFilters, SearchPage, SearchResultRow,
};
use crate::ports::{Document, DocumentFetcherPort, FetchRequest};
use crate::resilience::timeout::TimeoutWrapper;
use crate::{Error, Result};
use scraper::ElementRef;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const SEARCH_SUCCESS_MESSAGE: &str = "Successfully searched publications.";
pub const BEYOND_LAST_PAGE_MESSAGE: &str =
    "Your page request is higher than the last available page!";
pub const PAGE_OUT_OF_RANGE_MESSAGE: &str =
    "Your page request is greater than the last page or lower than 1!";

/// Extraction pipeline over the upstream repository
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    fetcher: Arc<dyn DocumentFetcherPort>,
    base_url: Url,
    repository: RepositoryConfig,
    ids: IdResolver,
    beyond_last_page: BeyondLastPagePolicy,
    request_timeout: Duration,
}

impl ExtractionEngine {
    /// Create an engine over `fetcher` for the repository in `config`
    pub fn new(fetcher: Arc<dyn DocumentFetcherPort>, config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            fetcher,
            base_url: config.base_url()?,
            repository: config.repository.clone(),
            ids: IdResolver::new(config.repository.handle_path.clone()),
            beyond_last_page: config.search.beyond_last_page,
            request_timeout: config.server.request_timeout(),
        })
    }

    /// Featured items from the landing page carousel
    #[instrument(skip(self))]
    pub async fn newest(&self) -> Result<Vec<PublicationSummary>> {
        let url = self.site_url(&self.repository.landing_path)?;
        let document = self
            .fetch("get_newest", &url, selectors::newest::ANCHORS)
            .await
            .map_err(|e| not_found_as_upstream(e, &url))?;

        let summaries = parse_newest(&document, &self.ids)?;
        info!("Extracted {} featured publications", summaries.len());
        Ok(summaries)
    }

    /// A single record by id
    #[instrument(skip(self))]
    pub async fn publication(&self, id: &str) -> Result<Publication> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::InvalidInput {
                field: "id".to_string(),
                reason: "id cannot be empty".to_string(),
            });
        }

        let url = self.ids.record_url(&self.base_url, id);
        let document = self
            .fetch("get_publication", &url, selectors::record::ANCHORS)
            .await
            .map_err(|e| match e {
                Error::NotFound { .. } => Error::NotFound {
                    resource: format!("Publication with the id {id}"),
                },
                other => other,
            })?;

        let publication = parse_publication(&document, id, &self.base_url)?;
        info!(
            "Extracted publication {} with {} authors, {} advisors, {} downloads",
            publication.id,
            publication.authors.len(),
            publication.advisors.len(),
            publication.download_urls.len()
        );
        Ok(publication)
    }

    /// One reconciled page of search results
    #[instrument(skip(self))]
    pub async fn search(&self, page: u32, filters: &SearchFilters) -> Result<SearchPage> {
        if page == 0 {
            return Err(Error::BadRequest(PAGE_OUT_OF_RANGE_MESSAGE.to_string()));
        }

        let url = self.search_url(page, filters)?;
        let document = self
            .fetch("search", &url, selectors::search::ANCHORS)
            .await
            .map_err(|e| not_found_as_upstream(e, &url))?;

        let (rows, meta) = parse_search(&document, page, &self.ids)?;

        let message = if page > meta.last_page {
            match self.beyond_last_page {
                BeyondLastPagePolicy::Strict => {
                    return Err(Error::BadRequest(BEYOND_LAST_PAGE_MESSAGE.to_string()));
                }
                BeyondLastPagePolicy::Soft => {
                    warn!(
                        "Page {} is beyond last page {}, returning rendered page",
                        page, meta.last_page
                    );
                    BEYOND_LAST_PAGE_MESSAGE
                }
            }
        } else {
            SEARCH_SUCCESS_MESSAGE
        };

        info!(
            "Search page {}/{} returned {} rows",
            meta.current_page,
            meta.last_page,
            rows.len()
        );

        Ok(SearchPage {
            rows,
            meta,
            message: message.to_string(),
        })
    }

    /// Upstream simple-search URL for `page` with the non-empty `filters`
    pub fn search_url(&self, page: u32, filters: &SearchFilters) -> Result<String> {
        let per_page = self.repository.items_per_page;
        let start = page.saturating_sub(1).saturating_mul(per_page);

        let mut url = Url::parse(&self.site_url(&self.repository.search_path)?).map_err(|e| {
            Error::InvalidInput {
                field: "repository.search_path".to_string(),
                reason: e.to_string(),
            }
        })?;

        {
            let mut query = url.query_pairs_mut();

            let text = filters.query.trim();
            if !text.is_empty() {
                query.append_pair("query", text);
            }

            let authors = filters.authors.trim();
            if !authors.is_empty() {
                query
                    .append_pair("filter_field_1", "author")
                    .append_pair("filter_type_1", "contains")
                    .append_pair("filter_value_1", authors);
            }

            let issue_date = filters.issue_date.trim();
            if !issue_date.is_empty() {
                query
                    .append_pair("filter_field_2", "dateIssued")
                    .append_pair("filter_type_2", "contains")
                    .append_pair("filter_value_2", issue_date);
            }

            query
                .append_pair("sort_by", "score")
                .append_pair("order", "desc")
                .append_pair("rpp", &per_page.to_string())
                .append_pair("etal", "0")
                .append_pair("start", &start.to_string());
        }

        Ok(url.into())
    }

    fn site_url(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&url).map_err(|e| Error::InvalidInput {
            field: "repository".to_string(),
            reason: format!("{url}: {e}"),
        })?;
        Ok(url)
    }

    async fn fetch(&self, operation: &str, url: &str, anchors: &[&str]) -> Result<Document> {
        debug!("Fetching {} with {} strategy", url, self.fetcher.name());
        TimeoutWrapper::new(operation, self.request_timeout)
            .execute(self.fetcher.fetch(FetchRequest::new(url, anchors)))
            .await
    }
}

fn not_found_as_upstream(error: Error, url: &str) -> Error {
    match error {
        Error::NotFound { .. } => Error::UpstreamStatus {
            url: url.to_string(),
            code: 404,
        },
        other => other,
    }
}

/// Featured items from a landing page document
pub fn parse_newest(document: &Document, ids: &IdResolver) -> Result<Vec<PublicationSummary>> {
    use selectors::newest as sel;

    let html = document.parse();
    let Some(carousel) = html.root_element().select(&selector(sel::CAROUSEL)?).next() else {
        warn!("No featured carousel on {}", document.url);
        return Ok(Vec::new());
    };

    let mut summaries = Vec::new();
    for item in carousel.children().filter_map(ElementRef::wrap) {
        let href = extract_attr(item, &sel::LINK, "href")?.unwrap_or_default();
        let id = ids.resolve(&href);
        if id.is_empty() {
            warn!("Skipping featured item without a record link: {:?}", href);
            continue;
        }

        summaries.push(PublicationSummary {
            id,
            title: extract_scalar(item, &sel::TITLE)?,
            abstract_text: extract_scalar(item, &sel::ABSTRACT)?,
        });
    }

    Ok(summaries)
}

/// All fields of a record page; `id` comes from the request
pub fn parse_publication(document: &Document, id: &str, base_url: &Url) -> Result<Publication> {
    use selectors::record as sel;

    let html = document.parse();
    let root = html.root_element();

    let raw_issue_date = extract_scalar(root, &sel::ISSUE_DATE)?;

    Ok(Publication {
        id: id.to_string(),
        title: extract_scalar(root, &sel::TITLE)?,
        abstract_text: extract_scalar(root, &sel::ABSTRACT)?,
        authors: extract_list(root, &sel::AUTHORS)?,
        advisors: extract_list(root, &sel::ADVISORS)?,
        download_urls: extract_absolute_urls(root, &sel::DOWNLOADS, base_url)?,
        issue_date: date::normalize_lossy(&raw_issue_date),
    })
}

/// Result rows and reconciled pagination of a search page
pub fn parse_search(
    document: &Document,
    requested_page: u32,
    ids: &IdResolver,
) -> Result<(Vec<SearchResultRow>, PageMetadata)> {
    use selectors::search as sel;

    let html = document.parse();
    let root = html.root_element();

    let meta = PaginationControl::parse(root)?.reconcile(requested_page)?;

    let bodies: Vec<ElementRef<'_>> = root.select(&selector(sel::RESULTS_BODY)?).collect();
    if bodies.is_empty() {
        debug!("No results table, search matched nothing");
        return Ok((Vec::new(), PageMetadata::single()));
    }

    let mut rows = Vec::new();
    for row in bodies
        .into_iter()
        .flat_map(|body| body.children().filter_map(ElementRef::wrap))
    {
        let cells: Vec<ElementRef<'_>> = row.children().filter_map(ElementRef::wrap).collect();
        if cells.iter().all(|cell| cell.value().name() == "th") {
            continue;
        }
        if cells.len() < sel::COLUMNS {
            debug!("Skipping row with {} cells", cells.len());
            continue;
        }

        let href = extract_attr(row, &sel::TITLE, "href")?.unwrap_or_default();
        let id = ids.resolve(&href);
        if id.is_empty() {
            warn!("Skipping search row without a record link: {:?}", href);
            continue;
        }

        rows.push(SearchResultRow {
            id,
            title: extract_scalar(row, &sel::TITLE)?,
            authors: extract_scalar(row, &sel::AUTHORS)?,
            advisors: extract_scalar(row, &sel::ADVISORS)?,
            issue_date: date::normalize_lossy(&extract_scalar(row, &sel::ISSUE_DATE)?),
        });
    }

    Ok((rows, meta))
}
