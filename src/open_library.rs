//! Open Library catalog client.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::book::CoverSize;
use crate::{BookQuery, BookSummary, Catalog, CatalogConfig, Result, SearchError};

/// Catalog backed by the Open Library search API.
pub struct OpenLibrary {
    config: CatalogConfig,
    client: Client,
}

impl OpenLibrary {
    /// Creates a client for the public Open Library endpoints.
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default()).expect("Failed to create HTTP client")
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: CatalogConfig) -> Result<Self> {
        url::Url::parse(&config.search_url)?;
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { config, client })
    }

    /// Creates a client around an existing reqwest client.
    pub fn with_client(config: CatalogConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Full request URL for a query.
    pub fn search_url(&self, query: &BookQuery) -> String {
        let separator = if self.config.search_url.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{}{}",
            self.config.search_url,
            separator,
            query.to_query_string()
        )
    }

    /// Cover URL for a record on this catalog's cover host.
    pub fn cover_url(&self, book: &BookSummary, size: CoverSize) -> Option<String> {
        book.cover_url_on(&self.config.covers_url, size)
    }

    /// Record page URL on this catalog's site.
    pub fn record_url(&self, book: &BookSummary) -> String {
        book.record_url_on(&self.config.site_url)
    }

    /// Loads a cover image, failing when there is none to show.
    pub async fn fetch_cover(&self, book: &BookSummary, size: CoverSize) -> Result<Vec<u8>> {
        let url = self
            .cover_url(book, size)
            .ok_or_else(|| SearchError::Other(format!("{} has no cover", book.key)))?;
        let response = self.get(&url).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        if bytes.is_empty() {
            return Err(SearchError::Parse(format!("empty cover image at {}", url)));
        }
        Ok(bytes.to_vec())
    }

    /// Keys of the records whose cover could not be loaded.
    ///
    /// Records without a cover identifier are skipped; they render the
    /// fallback regardless.
    pub async fn failed_covers(&self, books: &[BookSummary], size: CoverSize) -> HashSet<String> {
        let probes = books
            .iter()
            .filter(|book| book.cover_i.is_some())
            .map(|book| async move {
                match self.fetch_cover(book, size).await {
                    Ok(_) => None,
                    Err(e) => {
                        debug!("Cover for {} failed: {}", book.key, e);
                        Some(book.key.clone())
                    }
                }
            });
        join_all(probes).await.into_iter().flatten().collect()
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

impl Default for OpenLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Option<Vec<BookSummary>>,
}

/// Parses a search response body, treating a missing `docs` as no results.
pub(crate) fn parse_docs(body: &str, limit: usize) -> Result<Vec<BookSummary>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let mut docs = response.docs.unwrap_or_default();
    docs.truncate(limit);
    Ok(docs)
}

fn transport_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::Http(err)
    }
}

#[async_trait]
impl Catalog for OpenLibrary {
    fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn search(&self, query: &BookQuery) -> Result<Vec<BookSummary>> {
        let url = self.search_url(query);
        let response = self.get(&url).await?;
        let body = response.text().await.map_err(transport_error)?;
        let docs = parse_docs(&body, query.limit)?;
        debug!("{} returned {} records for '{}'", self.name(), docs.len(), query.title);
        Ok(docs)
    }
}
