//! Catalog query representation.

use serde::{Deserialize, Serialize};

/// Result limit used for as-you-type suggestions.
pub const SUGGESTION_LIMIT: usize = 5;

/// Result limit used for a full search.
pub const SEARCH_LIMIT: usize = 24;

/// A title query with the number of records to ask for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookQuery {
    /// Free-text title terms, sent as-is (URL-encoded).
    pub title: String,
    /// Maximum number of records to return.
    pub limit: usize,
}

impl BookQuery {
    /// Creates a full-search query.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            limit: SEARCH_LIMIT,
        }
    }

    /// Creates a suggestion query.
    pub fn suggestion(title: impl Into<String>) -> Self {
        Self::new(title).with_limit(SUGGESTION_LIMIT)
    }

    /// Sets the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether the query has any non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Query string for the search endpoint: `title=<encoded>&limit=<n>`.
    pub fn to_query_string(&self) -> String {
        format!(
            "title={}&limit={}",
            urlencoding::encode(&self.title),
            self.limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_query_new() {
        let query = BookQuery::new("dune");
        assert_eq!(query.title, "dune");
        assert_eq!(query.limit, SEARCH_LIMIT);
    }

    #[test]
    fn test_book_query_suggestion() {
        let query = BookQuery::suggestion("du");
        assert_eq!(query.limit, 5);
    }

    #[test]
    fn test_book_query_with_limit() {
        let query = BookQuery::new("dune").with_limit(3);
        assert_eq!(query.limit, 3);
    }

    #[test]
    fn test_book_query_is_blank() {
        assert!(BookQuery::new("").is_blank());
        assert!(BookQuery::new(" \t\n").is_blank());
        assert!(!BookQuery::new(" dune ").is_blank());
    }

    #[test]
    fn test_query_string_encodes_title() {
        let query = BookQuery::new("the lord & rings?");
        assert_eq!(
            query.to_query_string(),
            "title=the%20lord%20%26%20rings%3F&limit=24"
        );
    }

    #[test]
    fn test_query_string_unicode() {
        let query = BookQuery::suggestion("été");
        assert_eq!(query.to_query_string(), "title=%C3%A9t%C3%A9&limit=5");
    }
}
