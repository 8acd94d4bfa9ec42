//! Catalog trait and configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::book::{COVERS_BASE_URL, SITE_BASE_URL};
use crate::{BookQuery, BookSummary, Result};

/// Default search endpoint.
pub const SEARCH_ENDPOINT: &str = "https://openlibrary.org/search.json";

/// Configuration for a catalog client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Display name of the catalog.
    #[serde(default = "default_name")]
    pub name: String,
    /// Search endpoint queried with `title` and `limit`.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Base URL for cover images.
    #[serde(default = "default_covers_url")]
    pub covers_url: String,
    /// Base URL for record pages.
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_name() -> String {
    "Open Library".to_string()
}

fn default_search_url() -> String {
    SEARCH_ENDPOINT.to_string()
}

fn default_covers_url() -> String {
    COVERS_BASE_URL.to_string()
}

fn default_site_url() -> String {
    SITE_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("bookfinder/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            search_url: default_search_url(),
            covers_url: default_covers_url(),
            site_url: default_site_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// A searchable book catalog.
///
/// One call issues exactly one outbound request. Implementations never
/// retry; the caller decides what an error means for the UI.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Returns the catalog configuration.
    fn config(&self) -> &CatalogConfig;

    /// Searches by title, returning at most `query.limit` records.
    async fn search(&self, query: &BookQuery) -> Result<Vec<BookSummary>>;

    /// Returns the catalog name.
    fn name(&self) -> &str {
        &self.config().name
    }
}
