//! Result grid cards.

use serde::Serialize;

use crate::book::{CoverSize, FALLBACK_GLYPH};
use crate::BookSummary;

/// Characters of title shown under the fallback glyph.
pub const CARD_TITLE_CHARS: usize = 40;

/// What to draw in a cover slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CoverView {
    /// Load and show the image at `url`.
    Image { url: String },
    /// Show the placeholder glyph with a caption.
    Fallback { glyph: String, caption: String },
}

/// One card in the result grid.
///
/// Owns its cover-failure flag; flipping it affects this card only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookCard {
    book: BookSummary,
    cover_url: Option<String>,
    cover_failed: bool,
}

impl BookCard {
    /// Builds a card with its medium cover on `covers_base`.
    pub fn new(book: BookSummary, covers_base: &str) -> Self {
        let cover_url = book.cover_url_on(covers_base, CoverSize::Medium);
        Self {
            book,
            cover_url,
            cover_failed: false,
        }
    }

    /// Underlying record.
    pub fn book(&self) -> &BookSummary {
        &self.book
    }

    /// Record key.
    pub fn key(&self) -> &str {
        &self.book.key
    }

    /// Card heading.
    pub fn title(&self) -> &str {
        &self.book.title
    }

    /// Up to two authors, or "Unknown Author".
    pub fn authors(&self) -> String {
        self.book.author_line()
    }

    /// Year badge text, absent without a first-publish year.
    pub fn year_badge(&self) -> Option<String> {
        self.book.first_publish_year.map(|year| year.to_string())
    }

    /// Cover image, or the fallback once loading it failed.
    pub fn cover(&self) -> CoverView {
        match &self.cover_url {
            Some(url) if !self.cover_failed => CoverView::Image { url: url.clone() },
            _ => CoverView::Fallback {
                glyph: FALLBACK_GLYPH.to_string(),
                caption: self.book.short_title(CARD_TITLE_CHARS),
            },
        }
    }

    /// Marks the cover image as unloadable.
    pub fn mark_cover_failed(&mut self) {
        self.cover_failed = true;
    }

    /// Whether the cover image failed to load.
    pub fn cover_failed(&self) -> bool {
        self.cover_failed
    }
}

/// Cards for one result batch, in response order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultGrid {
    cards: Vec<BookCard>,
}

impl ResultGrid {
    /// Builds fresh cards; per-card state from any previous batch is gone.
    pub fn new(books: &[BookSummary], covers_base: &str) -> Self {
        Self {
            cards: books
                .iter()
                .cloned()
                .map(|book| BookCard::new(book, covers_base))
                .collect(),
        }
    }

    /// All cards.
    pub fn cards(&self) -> &[BookCard] {
        &self.cards
    }

    /// Card at `index`.
    pub fn get(&self, index: usize) -> Option<&BookCard> {
        self.cards.get(index)
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the grid has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Flags the cover of the card with `key` as failed.
    ///
    /// Returns false when no card has that key.
    pub fn mark_cover_failed(&mut self, key: &str) -> bool {
        match self.cards.iter_mut().find(|card| card.key() == key) {
            Some(card) => {
                card.mark_cover_failed();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::COVERS_BASE_URL;

    #[test]
    fn test_card_without_cover_or_year() {
        let card = BookCard::new(BookSummary::new("/works/OL1W", "Dune"), COVERS_BASE_URL);
        assert_eq!(card.title(), "Dune");
        assert_eq!(card.authors(), "Unknown Author");
        assert!(card.year_badge().is_none());
        assert_eq!(
            card.cover(),
            CoverView::Fallback {
                glyph: "📚".to_string(),
                caption: "Dune".to_string()
            }
        );
    }

    #[test]
    fn test_card_with_cover_and_year() {
        let book = BookSummary::new("/works/OL1W", "Dune")
            .with_cover(11481354)
            .with_year(1965)
            .with_authors(["Frank Herbert"]);
        let card = BookCard::new(book, COVERS_BASE_URL);
        assert_eq!(card.year_badge().as_deref(), Some("1965"));
        assert_eq!(card.authors(), "Frank Herbert");
        assert_eq!(
            card.cover(),
            CoverView::Image {
                url: "https://covers.openlibrary.org/b/id/11481354-M.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_card_cover_failure_falls_back_with_short_title() {
        let title = "A Very Long Title That Keeps Going Well Past Forty Characters";
        let book = BookSummary::new("/works/OL1W", title).with_cover(1);
        let mut card = BookCard::new(book, COVERS_BASE_URL);
        card.mark_cover_failed();
        assert!(card.cover_failed());
        match card.cover() {
            CoverView::Fallback { caption, .. } => {
                assert_eq!(caption, "A Very Long Title That Keeps Going Well ...");
            }
            other => panic!("Expected fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_cover_failure_is_per_card() {
        let books = vec![
            BookSummary::new("/works/OL1W", "Dune").with_cover(1),
            BookSummary::new("/works/OL2W", "Emma").with_cover(2),
        ];
        let mut grid = ResultGrid::new(&books, COVERS_BASE_URL);
        assert!(grid.mark_cover_failed("/works/OL2W"));
        assert!(!grid.mark_cover_failed("/works/OL9W"));

        assert!(matches!(grid.get(0).unwrap().cover(), CoverView::Image { .. }));
        assert!(matches!(grid.get(1).unwrap().cover(), CoverView::Fallback { .. }));
    }

    #[test]
    fn test_new_grid_resets_card_state() {
        let books = vec![BookSummary::new("/works/OL1W", "Dune").with_cover(1)];
        let mut grid = ResultGrid::new(&books, COVERS_BASE_URL);
        grid.mark_cover_failed("/works/OL1W");

        let grid = ResultGrid::new(&books, COVERS_BASE_URL);
        assert!(!grid.get(0).unwrap().cover_failed());
        assert_eq!(grid.len(), 1);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_cover_view_serialization() {
        let view = CoverView::Image {
            url: "u".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&view).unwrap(),
            r#"{"kind":"image","url":"u"}"#
        );
    }
}
