//! Book records as returned by the catalog.

use serde::{Deserialize, Serialize};

/// Base URL for cover images, keyed by cover identifier.
pub const COVERS_BASE_URL: &str = "https://covers.openlibrary.org/b/id";

/// Base URL for canonical record pages; the record key is appended as-is.
pub const SITE_BASE_URL: &str = "https://openlibrary.org";

/// Placeholder shown in place of a missing or broken cover.
pub const FALLBACK_GLYPH: &str = "📚";

/// Cover image size variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoverSize {
    /// Medium, used for grid thumbnails.
    Medium,
    /// Large, used in the detail view.
    Large,
}

impl CoverSize {
    /// Size letter used in the cover URL.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Medium => "M",
            Self::Large => "L",
        }
    }
}

/// A single search result record.
///
/// Field names follow the catalog's JSON so the type deserializes straight
/// from a `docs` entry. Only `key` and `title` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Catalog key, e.g. `/works/OL45804W`.
    pub key: String,
    /// Book title.
    pub title: String,
    /// Author names.
    #[serde(default)]
    pub author_name: Vec<String>,
    /// Cover image identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_i: Option<u64>,
    /// Year of first publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
    /// Publisher names.
    #[serde(default)]
    pub publisher: Vec<String>,
    /// ISBNs across editions.
    #[serde(default)]
    pub isbn: Vec<String>,
    /// Subject headings.
    #[serde(default)]
    pub subject: Vec<String>,
    /// Language codes (e.g. `eng`).
    #[serde(default)]
    pub language: Vec<String>,
}

impl BookSummary {
    /// Creates a record with just a key and a title.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            author_name: Vec::new(),
            cover_i: None,
            first_publish_year: None,
            publisher: Vec::new(),
            isbn: Vec::new(),
            subject: Vec::new(),
            language: Vec::new(),
        }
    }

    /// Sets the author names.
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_name = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the cover identifier.
    pub fn with_cover(mut self, cover_i: u64) -> Self {
        self.cover_i = Some(cover_i);
        self
    }

    /// Sets the first publication year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.first_publish_year = Some(year);
        self
    }

    /// Sets the publishers.
    pub fn with_publishers<I, S>(mut self, publishers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.publisher = publishers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the subjects.
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subject = subjects.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the language codes.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.language = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Cover image URL on the default cover host.
    pub fn cover_url(&self, size: CoverSize) -> Option<String> {
        self.cover_url_on(COVERS_BASE_URL, size)
    }

    /// Cover image URL under `base`, or `None` without a cover identifier.
    pub fn cover_url_on(&self, base: &str, size: CoverSize) -> Option<String> {
        self.cover_i.map(|id| {
            format!("{}/{}-{}.jpg", base.trim_end_matches('/'), id, size.suffix())
        })
    }

    /// Link to the record's canonical page on the default site.
    pub fn record_url(&self) -> String {
        self.record_url_on(SITE_BASE_URL)
    }

    /// Link to the record's canonical page under `base`.
    pub fn record_url_on(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.key)
    }

    /// First two authors joined, or "Unknown Author".
    pub fn author_line(&self) -> String {
        if self.author_name.is_empty() {
            return "Unknown Author".to_string();
        }
        self.author_name
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// First listed author.
    pub fn primary_author(&self) -> Option<&str> {
        self.author_name.first().map(String::as_str)
    }

    /// Title cut to `max` characters with a trailing ellipsis when cut.
    pub fn short_title(&self, max: usize) -> String {
        truncate_chars(&self.title, max)
    }
}

/// Truncates on character boundaries, appending "..." when anything was cut.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
