//! DSpace-shaped HTML fixtures and engine setup shared by integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use uinjkt_repository_api::{Config, ExtractionEngine, StaticFetcher};
use wiremock::MockServer;

pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.repository.base_url = server.uri();
    config.server.request_timeout_secs = 5;
    config.fetch.timeout_secs = 5;
    config
}

pub fn engine_with(config: &Config) -> ExtractionEngine {
    let fetcher = Arc::new(StaticFetcher::new(&config.fetch).unwrap());
    ExtractionEngine::new(fetcher, config).unwrap()
}

pub fn engine_for(server: &MockServer) -> ExtractionEngine {
    engine_with(&config_for(server))
}

pub fn landing_page() -> String {
    r#"<!DOCTYPE html>
<html><body>
<div id="carousel" class="carousel slide">
  <div class="carousel-inner">
    <div class="item active">
      <div style="padding-bottom: 50px; min-height: 200px;" class="carousel-caption">
        <h4><a href="/dspace/handle/123456789/76780">lorem ipsum 1</a></h4>
        <p>abstract   one</p>
      </div>
    </div>
    <div class="item">
      <div class="carousel-caption">
        <h4><a href="/dspace/handle/123456789/16782">lorem ipsum 2</a></h4>
        <p>abstract two</p>
      </div>
    </div>
  </div>
</div>
</body></html>"#
        .to_string()
}

pub fn record_page() -> String {
    r#"<!DOCTYPE html>
<html><body>
<table class="table itemDisplayTable">
  <tr><td class="metadataFieldLabel dc_title">Title:&nbsp;</td>
      <td class="metadataFieldValue dc_title">lorem ipsum 1</td></tr>
  <tr><td class="metadataFieldLabel dc_contributor_author">Authors:&nbsp;</td>
      <td class="metadataFieldValue dc_contributor_author">
        <a class="author" href="/dspace/browse?type=author&value=Doe">Doe, Jane</a><br />
        <a class="author" href="/dspace/browse?type=author&value=Roe">Roe, Rick</a><br />
        <a class="author" href="/dspace/browse?type=author&value=Poe">Poe, Edgar</a>
      </td></tr>
  <tr><td class="metadataFieldLabel dc_contributor_advisor">Advisors:&nbsp;</td>
      <td class="metadataFieldValue dc_contributor_advisor">
        <a class="author" href="/dspace/browse?type=author&value=Smith">Smith, Anna</a>
      </td></tr>
  <tr><td class="metadataFieldLabel dc_date_issued">Issue Date:&nbsp;</td>
      <td class="metadataFieldValue dc_date_issued">2022-01</td></tr>
  <tr><td class="metadataFieldLabel dc_description_abstract">Abstract:&nbsp;</td>
      <td class="metadataFieldValue dc_description_abstract">  dolor sit amet  </td></tr>
</table>
<div class="panel panel-info">
  <div class="panel-heading">Files in This Item:</div>
  <table class="table panelBody">
    <tr><th id="t1" class="standard">File</th><th id="t2" class="standard">Description</th></tr>
    <tr><td headers="t1" class="standard break-all"><a target="_blank" href="/dspace/bitstream/123456789/76780/1/42.pdf">42.pdf</a></td>
        <td headers="t2" class="standard break-all">Fulltext</td></tr>
  </table>
</div>
</body></html>"#
        .to_string()
}

pub fn pagination(active: u32, last: u32) -> String {
    let mut items = String::new();
    if active == 1 {
        items.push_str(r#"<li class="disabled"><span>previous</span></li>"#);
    } else {
        items.push_str(r##"<li><a href="#">previous</a></li>"##);
    }
    let mut pages: Vec<u32> = (1..=last.min(5)).collect();
    if !pages.contains(&active) {
        pages.push(active);
    }
    if !pages.contains(&last) {
        pages.push(last);
    }
    for page in pages {
        if page == active {
            items.push_str(&format!(r#"<li class="active"><span>{page}</span></li>"#));
        } else {
            items.push_str(&format!(r##"<li><a href="#">{page}</a></li>"##));
        }
    }
    if active == last {
        items.push_str(r#"<li class="disabled"><span>next</span></li>"#);
    } else {
        items.push_str(r##"<li><a href="#">next</a></li>"##);
    }
    format!(r#"<ul class="pagination pull-right">{items}</ul>"#)
}

pub fn search_row(date: &str, id: &str, title: &str, authors: &str, advisors: &str) -> String {
    format!(
        r#"<tr><td headers="t1" nowrap="nowrap" align="right">{date}</td>
<td headers="t2"><a href="/dspace/handle/123456789/{id}">{title}</a></td>
<td headers="t3"><em>{authors}</em></td>
<td headers="t4"><em>{advisors}</em></td></tr>"#
    )
}

pub fn search_page(pagination: &str, rows: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><body>
<div class="discovery-result-pagination">{pagination}</div>
<div class="panel panel-info">
  <table align="center" class="table" summary="This table browses all dspace content">
    <tr><th id="t1" class="oddRowEvenCol">Issue Date</th><th id="t2">Title</th><th id="t3">Author(s)</th><th id="t4">Advisor(s)</th></tr>
    {}
  </table>
</div>
</body></html>"#,
        rows.join("\n")
    )
}

pub fn empty_search_page() -> String {
    r#"<!DOCTYPE html>
<html><body>
<div class="discovery-result-results"><p>Search produced no results.</p></div>
</body></html>"#
        .to_string()
}
