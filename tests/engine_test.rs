mod common;

use common::*;
use std::time::Duration;
use uinjkt_repository_api::config::BeyondLastPagePolicy;
use uinjkt_repository_api::{Error, ErrorKind, PageMetadata, SearchFilters};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_newest_publications_from_carousel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dspace/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(landing_page()))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let newest = engine.newest().await.unwrap();

    assert_eq!(newest.len(), 2);
    assert_eq!(newest[0].id, "76780");
    assert_eq!(newest[0].title, "lorem ipsum 1");
    assert_eq!(newest[0].abstract_text, "abstract one");
    assert_eq!(newest[1].id, "16782");
    assert_eq!(newest[1].title, "lorem ipsum 2");
}

#[tokio::test]
async fn test_newest_without_carousel_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dspace/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&mock_server)
        .await;

    let newest = engine_for(&mock_server).newest().await.unwrap();
    assert!(newest.is_empty());
}

#[tokio::test]
async fn test_publication_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dspace/handle/123456789/76780"))
        .respond_with(ResponseTemplate::new(200).set_body_string(record_page()))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let publication = engine.publication("76780").await.unwrap();

    assert_eq!(publication.id, "76780");
    assert_eq!(publication.title, "lorem ipsum 1");
    assert_eq!(publication.abstract_text, "dolor sit amet");
    assert_eq!(
        publication.authors,
        vec!["Doe, Jane", "Roe, Rick", "Poe, Edgar"]
    );
    assert_eq!(publication.advisors, vec!["Smith, Anna"]);
    assert_eq!(
        publication.download_urls,
        vec![format!(
            "{}/dspace/bitstream/123456789/76780/1/42.pdf",
            mock_server.uri()
        )]
    );
    assert_eq!(
        publication.issue_date.as_deref(),
        Some("2022-01-01T00:00:00.000Z")
    );
}

#[tokio::test]
async fn test_publication_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dspace/handle/123456789/99999999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let error = engine_for(&mock_server)
        .publication("99999999")
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert_eq!(
        error.public_message(),
        "Publication with the id 99999999 not found!"
    );
}

#[tokio::test]
async fn test_publication_upstream_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dspace/handle/123456789/76780"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let error = engine_for(&mock_server)
        .publication("76780")
        .await
        .unwrap_err();

    assert!(matches!(error, Error::UpstreamStatus { code: 500, .. }));
    assert_eq!(error.kind(), ErrorKind::Upstream);
}

#[tokio::test]
async fn test_publication_with_sparse_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dspace/handle/123456789/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><table>
                <tr><td class="metadataFieldLabel">Title:&nbsp;</td><td>Only a title</td></tr>
                <tr><td class="metadataFieldLabel">Issue Date:&nbsp;</td><td>sometime</td></tr>
            </table></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let publication = engine_for(&mock_server).publication("5").await.unwrap();

    assert_eq!(publication.title, "Only a title");
    assert_eq!(publication.abstract_text, "");
    assert!(publication.authors.is_empty());
    assert!(publication.advisors.is_empty());
    assert!(publication.download_urls.is_empty());
    assert_eq!(publication.issue_date, None);
}

#[tokio::test]
async fn test_search_first_page() {
    let mock_server = MockServer::start().await;

    let rows = vec![
        search_row("15-Jan-2022", "76780", "lorem ipsum 1", "Doe, Jane", "Smith, Anna"),
        search_row("-", "16782", "lorem ipsum 2", "Roe, Rick", "Smith, Anna"),
    ];

    Mock::given(method("GET"))
        .and(path("/dspace/simple-search"))
        .and(query_param("start", "0"))
        .and(query_param("query", "lorem"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(search_page(&pagination(1, 76), &rows)),
        )
        .mount(&mock_server)
        .await;

    let filters = SearchFilters {
        query: "lorem".to_string(),
        ..SearchFilters::default()
    };
    let page = engine_for(&mock_server).search(1, &filters).await.unwrap();

    assert_eq!(
        page.meta,
        PageMetadata {
            current_page: 1,
            last_page: 76,
            next_page: 2,
            previous_page: 1,
        }
    );
    assert_eq!(page.message, "Successfully searched publications.");
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[0].id, "76780");
    assert_eq!(page.rows[0].title, "lorem ipsum 1");
    assert_eq!(page.rows[0].authors, "Doe, Jane");
    assert_eq!(page.rows[0].advisors, "Smith, Anna");
    assert_eq!(
        page.rows[0].issue_date.as_deref(),
        Some("2022-01-15T00:00:00.000Z")
    );
    assert_eq!(page.rows[1].issue_date, None);
}

#[tokio::test]
async fn test_search_last_page() {
    let mock_server = MockServer::start().await;

    let rows = vec![search_row("2020", "1", "Last", "A", "B")];
    Mock::given(method("GET"))
        .and(path("/dspace/simple-search"))
        .and(query_param("start", "20"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(search_page(&pagination(3, 3), &rows)),
        )
        .mount(&mock_server)
        .await;

    let page = engine_for(&mock_server)
        .search(3, &SearchFilters::default())
        .await
        .unwrap();

    assert_eq!(page.meta, PageMetadata::new(3, 3));
    assert_eq!(page.meta.next_page, 3);
    assert_eq!(page.meta.previous_page, 2);
}

#[tokio::test]
async fn test_search_page_desync() {
    let mock_server = MockServer::start().await;

    // Upstream renders page 1 regardless of the requested offset
    let rows = vec![search_row("2020", "1", "One", "A", "B")];
    Mock::given(method("GET"))
        .and(path("/dspace/simple-search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(search_page(&pagination(1, 2), &rows)),
        )
        .mount(&mock_server)
        .await;

    let error = engine_for(&mock_server)
        .search(5, &SearchFilters::default())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        Error::PageDesync {
            requested: 5,
            rendered: 1
        }
    ));
    assert_eq!(error.kind(), ErrorKind::BadRequest);
    assert_eq!(
        error.public_message(),
        "Your page request is greater than the last page or lower than 1!"
    );
}

#[tokio::test]
async fn test_search_without_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dspace/simple-search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_search_page()))
        .mount(&mock_server)
        .await;

    let page = engine_for(&mock_server)
        .search(1, &SearchFilters::default())
        .await
        .unwrap();

    assert!(page.rows.is_empty());
    assert_eq!(page.meta, PageMetadata::single());
}

#[tokio::test]
async fn test_search_beyond_last_page_policies() {
    let mock_server = MockServer::start().await;

    // A stale control whose active page exceeds its own last entry
    let control = r##"<ul class="pagination">
        <li><a href="#">previous</a></li>
        <li class="active"><span>4</span></li>
        <li><a href="#">2</a></li>
        <li><a href="#">next</a></li>
    </ul>"##;
    let rows = vec![search_row("2020", "1", "One", "A", "B")];
    Mock::given(method("GET"))
        .and(path("/dspace/simple-search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(control, &rows)))
        .mount(&mock_server)
        .await;

    let soft = engine_for(&mock_server)
        .search(4, &SearchFilters::default())
        .await
        .unwrap();
    assert_eq!(soft.meta.current_page, 4);
    assert_eq!(soft.meta.last_page, 2);
    assert_eq!(soft.rows.len(), 1);
    assert_eq!(
        soft.message,
        "Your page request is higher than the last available page!"
    );

    let mut config = config_for(&mock_server);
    config.search.beyond_last_page = BeyondLastPagePolicy::Strict;
    let strict = engine_with(&config)
        .search(4, &SearchFilters::default())
        .await
        .unwrap_err();
    assert_eq!(strict.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn test_search_upstream_404_is_upstream_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dspace/simple-search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let error = engine_for(&mock_server)
        .search(1, &SearchFilters::default())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Upstream);
}

#[tokio::test]
async fn test_request_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dspace/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(landing_page())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server);
    config.server.request_timeout_secs = 1;

    let error = engine_with(&config).newest().await.unwrap_err();
    assert!(matches!(error, Error::Timeout { .. }));
    assert_eq!(error.kind(), ErrorKind::Timeout);
}
