use serde::{Deserialize, Serialize};

/// One listing's calendar feed, as configured.
///
/// Accepts either a bare URL or a `{ name, url }` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingSource {
    Url(String),
    Named {
        #[serde(default)]
        name: Option<String>,
        url: String,
    },
}

impl ListingSource {
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Named { url, .. } => url,
        }
    }

    /// Human-readable label for logs: the configured name, or the feed URL
    /// without its query string (Airbnb puts an access token there).
    pub fn label(&self) -> String {
        match self {
            Self::Named {
                name: Some(name), ..
            } if !name.trim().is_empty() => name.clone(),
            _ => redact_query(self.url()),
        }
    }
}

/// Feed URL with its query string (Airbnb puts an access token there) removed.
pub fn redact_query(url: &str) -> String {
    url.split('?').next().unwrap_or(url).to_string()
}

impl std::fmt::Display for ListingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
