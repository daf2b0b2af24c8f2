//! Record identifiers embedded in handle URLs.

use url::Url;

/// Maps between record ids and the handle URLs that carry them
#[derive(Debug, Clone)]
pub struct IdResolver {
    /// Subpath preceding the id, e.g. `/dspace/handle/123456789/`
    marker: String,
}

impl IdResolver {
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Extract the id trailing the handle marker.
    ///
    /// Returns an empty string when the marker is absent; callers treat that
    /// as malformed upstream markup.
    #[must_use]
    pub fn resolve(&self, url_path: &str) -> String {
        let Some((_, tail)) = url_path.rsplit_once(self.marker.as_str()) else {
            return String::new();
        };

        let segment = tail
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        urlencoding::decode(segment).map_or_else(|_| segment.to_string(), |id| id.into_owned())
    }

    /// Absolute record URL for `id` under `base`
    #[must_use]
    pub fn record_url(&self, base: &Url, id: &str) -> String {
        format!(
            "{}{}{}",
            base.as_str().trim_end_matches('/'),
            self.marker,
            urlencoding::encode(id)
        )
    }
}
