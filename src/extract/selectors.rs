//! Where each field lives in DSpace markup.
//!
//! Markup drift upstream should be fixed here, not in the engine.

use super::locator::{ListLocator, Locator};

/// Landing page carousel of featured items
pub mod newest {
    use super::Locator;

    /// Each child of this node is one featured item
    pub const CAROUSEL: &str = ".carousel-inner";

    pub const LINK: Locator = Locator::Css("a");
    pub const TITLE: Locator = Locator::Css("h4");
    pub const ABSTRACT: Locator = Locator::Css("p");

    /// Nodes the rendered strategy waits for
    pub const ANCHORS: &[&str] = &[CAROUSEL];
}

/// Single record page
pub mod record {
    use super::{ListLocator, Locator};

    const LABEL: &str = ".metadataFieldLabel";

    pub const TITLE: Locator = Locator::Labeled {
        label_selector: LABEL,
        label: "Title:",
    };

    pub const ABSTRACT: Locator = Locator::Labeled {
        label_selector: LABEL,
        label: "Abstract:",
    };

    pub const ISSUE_DATE: Locator = Locator::Labeled {
        label_selector: LABEL,
        label: "Issue Date:",
    };

    pub const AUTHORS: ListLocator = ListLocator {
        container: Locator::Labeled {
            label_selector: LABEL,
            label: "Authors:",
        },
        item: "a",
    };

    pub const ADVISORS: ListLocator = ListLocator {
        container: Locator::Labeled {
            label_selector: LABEL,
            label: "Advisors:",
        },
        item: "a",
    };

    /// Every file link across all info panels; a record may carry several
    pub const DOWNLOADS: ListLocator = ListLocator {
        container: Locator::Scope,
        item: r#".panel.panel-info td[headers="t1"] > a[target="_blank"]"#,
    };

    pub const ANCHORS: &[&str] = &[LABEL, ".panel.panel-info"];
}

/// Simple-search results page
pub mod search {
    use super::Locator;

    pub const PAGINATION: &str = ".pagination";
    pub const ACTIVE_PAGE: &str = ".active > span";
    pub const DISABLED_CLASS: &str = "disabled";

    /// Every results table body; collection and community hits come first
    pub const RESULTS_BODY: &str = ".panel tbody";

    /// Minimum cells a row needs to be a result
    pub const COLUMNS: usize = 4;

    pub const ISSUE_DATE: Locator = Locator::Column(0);
    pub const TITLE: Locator = Locator::Column(1);
    pub const AUTHORS: Locator = Locator::Column(2);
    pub const ADVISORS: Locator = Locator::Column(3);

    pub const ANCHORS: &[&str] = &[PAGINATION, RESULTS_BODY];
}
