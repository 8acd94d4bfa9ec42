//! # bookfinder
//!
//! Book search over the Open Library catalog.
//!
//! This library provides everything behind a search-as-you-type book
//! finder, with support for:
//!
//! - An async catalog client with typed records
//! - Debounced suggestions that never show stale responses
//! - A primary search flow with user-facing notifications
//! - Display-ready view models and a plain-text renderer
//!
//! ## Example
//!
//! ```rust,no_run
//! use bookfinder::{BookQuery, Catalog, OpenLibrary};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let catalog = OpenLibrary::new();
//!     let books = catalog.search(&BookQuery::new("dune")).await?;
//!
//!     for book in &books {
//!         println!("{} ({})", book.title, book.author_line());
//!     }
//!     Ok(())
//! }
//! ```

mod app;
mod book;
mod catalog;
mod config;
mod error;
mod open_library;
mod query;
mod session;
mod suggest;

pub mod view;

#[cfg(test)]
mod test_support;

pub use app::{Action, App, AppView};
pub use book::{BookSummary, CoverSize, COVERS_BASE_URL, FALLBACK_GLYPH, SITE_BASE_URL};
pub use catalog::{Catalog, CatalogConfig, SEARCH_ENDPOINT};
pub use config::AppConfig;
pub use error::{Result, SearchError};
pub use open_library::OpenLibrary;
pub use query::{BookQuery, SEARCH_LIMIT, SUGGESTION_LIMIT};
pub use session::{
    Notification, NotificationKind, SearchPhase, SearchSession, SearchTicket, Severity,
};
pub use suggest::{FeedConfig, FeedEvent, FeedMessage, SuggestionFeed};
