//! Detail overlay for a single record.

use serde::Serialize;

use crate::book::{CoverSize, FALLBACK_GLYPH};
use crate::view::CoverView;
use crate::BookSummary;

const MAX_PUBLISHERS: usize = 3;
const MAX_LANGUAGES: usize = 5;
const MAX_SUBJECTS: usize = 8;

/// Extended view of one record.
///
/// Lists are already cut to what is shown; absent or empty fields are
/// `None`/empty and should be omitted by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetail {
    pub key: String,
    pub title: String,
    pub authors: Option<String>,
    pub first_published: Option<i32>,
    pub publishers: Option<String>,
    pub languages: Vec<String>,
    pub subjects: Vec<String>,
    pub record_url: String,
    cover_url: Option<String>,
    cover_failed: bool,
}

impl BookDetail {
    /// Builds the detail view with the large cover and the record link.
    pub fn new(book: &BookSummary, covers_base: &str, site_base: &str) -> Self {
        Self {
            key: book.key.clone(),
            title: book.title.clone(),
            authors: non_empty(book.author_name.join(", ")),
            first_published: book.first_publish_year,
            publishers: non_empty(
                book.publisher
                    .iter()
                    .take(MAX_PUBLISHERS)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            languages: book
                .language
                .iter()
                .take(MAX_LANGUAGES)
                .map(|lang| lang.to_uppercase())
                .collect(),
            subjects: book.subject.iter().take(MAX_SUBJECTS).cloned().collect(),
            record_url: book.record_url_on(site_base),
            cover_url: book.cover_url_on(covers_base, CoverSize::Large),
            cover_failed: false,
        }
    }

    /// Large cover, or the glyph with the full title.
    pub fn cover(&self) -> CoverView {
        match &self.cover_url {
            Some(url) if !self.cover_failed => CoverView::Image { url: url.clone() },
            _ => CoverView::Fallback {
                glyph: FALLBACK_GLYPH.to_string(),
                caption: self.title.clone(),
            },
        }
    }

    /// Marks the large cover as unloadable.
    pub fn mark_cover_failed(&mut self) {
        self.cover_failed = true;
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
