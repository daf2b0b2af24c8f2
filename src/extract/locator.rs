//! Declarative field locators and the extractor that interprets them.
//!
//! A [`Locator`] says where a value lives; the `extract_*` functions turn it
//! into text. All functions work on an [`ElementRef`] scope so the same
//! locator can run against a whole document or a single carousel item or
//! table row. Missing nodes produce empty values, never errors.

use crate::{Error, Result};
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

/// Where a field's node lives relative to the scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// The scope itself
    Scope,
    /// First descendant matching a CSS selector
    Css(&'static str),
    /// The element following a label cell whose text starts with `label`
    Labeled {
        label_selector: &'static str,
        label: &'static str,
    },
    /// The first child element of the scope's `index`-th child element
    Column(usize),
}

/// A list-valued field: each `item` match inside the located container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLocator {
    pub container: Locator,
    pub item: &'static str,
}

/// Parse a CSS selector, mapping failures into the crate error
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse {
        context: "CSS selector".to_string(),
        message: format!("Invalid CSS selector {css:?}: {e}"),
    })
}

/// Text content with non-breaking spaces folded and whitespace runs collapsed
#[must_use]
pub fn clean_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Collapse whitespace within lines and blank runs between lines, then trim
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    static INLINE: OnceLock<Regex> = OnceLock::new();
    static NEWLINES: OnceLock<Regex> = OnceLock::new();

    let inline = INLINE.get_or_init(|| Regex::new(r"[^\S\n]+").expect("static regex"));
    let newlines = NEWLINES.get_or_init(|| Regex::new(r"\s*\n\s*").expect("static regex"));

    let folded = text.replace('\u{a0}', " ");
    let collapsed = inline.replace_all(&folded, " ");
    newlines.replace_all(&collapsed, "\n").trim().to_string()
}

/// Resolve a locator to its node within `scope`
pub fn locate<'a>(scope: ElementRef<'a>, locator: &Locator) -> Result<Option<ElementRef<'a>>> {
    match *locator {
        Locator::Scope => Ok(Some(scope)),
        Locator::Css(css) => {
            let sel = selector(css)?;
            Ok(scope.select(&sel).next())
        }
        Locator::Labeled {
            label_selector,
            label,
        } => {
            let sel = selector(label_selector)?;
            let value = scope
                .select(&sel)
                .find(|candidate| clean_text(*candidate).starts_with(label))
                .and_then(|label_cell| label_cell.next_siblings().find_map(ElementRef::wrap));
            if value.is_none() {
                debug!("Label {:?} not present", label);
            }
            Ok(value)
        }
        Locator::Column(index) => Ok(scope
            .children()
            .filter_map(ElementRef::wrap)
            .nth(index)
            .map(|cell| cell.children().find_map(ElementRef::wrap).unwrap_or(cell))),
    }
}

/// Trimmed text of the located node, or an empty string when absent
pub fn extract_scalar(scope: ElementRef<'_>, locator: &Locator) -> Result<String> {
    Ok(locate(scope, locator)?.map(clean_text).unwrap_or_default())
}

/// Value of `attr` on the located node, if both exist
pub fn extract_attr(
    scope: ElementRef<'_>,
    locator: &Locator,
    attr: &str,
) -> Result<Option<String>> {
    Ok(locate(scope, locator)?
        .and_then(|node| node.value().attr(attr))
        .map(|value| value.trim().to_string()))
}

/// Text of every item in the located container, in document order
pub fn extract_list(scope: ElementRef<'_>, locator: &ListLocator) -> Result<Vec<String>> {
    let Some(container) = locate(scope, &locator.container)? else {
        return Ok(Vec::new());
    };

    let item = selector(locator.item)?;
    Ok(container
        .select(&item)
        .map(clean_text)
        .filter(|text| !text.is_empty())
        .collect())
}

/// `href` of every item in the located container, resolved against `base`
pub fn extract_absolute_urls(
    scope: ElementRef<'_>,
    locator: &ListLocator,
    base: &Url,
) -> Result<Vec<String>> {
    let Some(container) = locate(scope, &locator.container)? else {
        return Ok(Vec::new());
    };

    let item = selector(locator.item)?;
    Ok(container
        .select(&item)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| match base.join(href.trim()) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!("Skipping unresolvable href {:?}: {}", href, e);
                None
            }
        })
        .collect())
}
