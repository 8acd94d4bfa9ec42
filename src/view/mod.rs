//! Presentation layer.
//!
//! View models here are display-ready snapshots computed from feed and
//! session state; they carry no business logic. [`render`] turns them into
//! terminal text.

mod card;
mod detail;
mod page;
mod suggestions;

pub mod render;

pub use card::{BookCard, CoverView, ResultGrid, CARD_TITLE_CHARS};
pub use detail::BookDetail;
pub use page::PageView;
pub use suggestions::{SuggestionList, SuggestionRow};
