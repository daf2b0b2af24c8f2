//! Reconciling a requested page number with the rendered pagination control.

use super::locator::{clean_text, selector};
use super::selectors::search as sel;
use crate::models::PageMetadata;
use crate::{Error, Result};
use scraper::ElementRef;
use tracing::debug;

/// One `<li>` of the pagination control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationItem {
    /// Text of the item's first child element
    pub text: String,
    pub disabled: bool,
}

/// The pagination control as rendered upstream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationControl {
    /// Text of the active item, `None` when nothing is marked active
    pub active: Option<String>,
    pub items: Vec<PaginationItem>,
}

impl PaginationControl {
    /// Read the control from a document scope; an absent control is empty
    pub fn parse(scope: ElementRef<'_>) -> Result<Self> {
        let Some(control) = scope.select(&selector(sel::PAGINATION)?).next() else {
            debug!("No pagination control rendered");
            return Ok(Self::default());
        };

        let active = control
            .select(&selector(sel::ACTIVE_PAGE)?)
            .next()
            .map(clean_text)
            .filter(|text| !text.is_empty());

        let items = control
            .children()
            .filter_map(ElementRef::wrap)
            .map(|item| PaginationItem {
                text: item
                    .children()
                    .find_map(ElementRef::wrap)
                    .map(clean_text)
                    .unwrap_or_default(),
                disabled: item.value().classes().any(|class| class == sel::DISABLED_CLASS),
            })
            .collect();

        Ok(Self { active, items })
    }

    /// Page the upstream site actually rendered
    pub fn current_page(&self) -> Result<u32> {
        match &self.active {
            None => Ok(1),
            Some(text) => text.parse::<u32>().map_err(|_| Error::Parse {
                context: "pagination".to_string(),
                message: format!("active page {text:?} is not a number"),
            }),
        }
    }

    /// Last available page given the rendered `current` page
    #[must_use]
    pub fn last_page(&self, current: u32) -> u32 {
        let [.., penultimate, last] = self.items.as_slice() else {
            return current;
        };

        if last.disabled {
            return current;
        }

        if penultimate.text.is_empty() {
            return 1;
        }

        penultimate.text.parse().unwrap_or_else(|_| {
            debug!("Unparsable last page {:?}, using current page", penultimate.text);
            current
        })
    }

    /// Check `requested` against the rendered page and derive the metadata.
    ///
    /// Fails with `Error::PageDesync` when upstream rendered a different page
    /// than the one asked for.
    pub fn reconcile(&self, requested: u32) -> Result<PageMetadata> {
        let current = self.current_page()?;
        if requested != current {
            return Err(Error::PageDesync {
                requested,
                rendered: current,
            });
        }

        Ok(PageMetadata::new(current, self.last_page(current)))
    }
}
