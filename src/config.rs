//! Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::query::SEARCH_LIMIT;
use crate::{CatalogConfig, FeedConfig, Result, SearchError};

/// Everything configurable about the application.
///
/// Every field has a default, so a config file only needs the settings it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog endpoints and HTTP settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Suggestion debounce settings.
    #[serde(default)]
    pub suggestions: FeedConfig,
    /// Records requested per primary search.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_search_limit() -> usize {
    SEARCH_LIMIT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            suggestions: FeedConfig::default(),
            search_limit: default_search_limit(),
        }
    }
}

impl AppConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Loads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}
