//! Primary search flow.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::query::SEARCH_LIMIT;
use crate::{BookQuery, BookSummary, Catalog, Result};

/// Where the primary search currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    /// Nothing searched yet, or the query was cleared.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last search returned records.
    Results,
    /// The last search succeeded with no records.
    Empty,
    /// The last search failed.
    Failed,
}

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Destructive,
}

/// What a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NoResults,
    SearchFailed,
}

/// A non-blocking, user-visible message about a primary search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    /// A search succeeded but found nothing.
    pub fn no_results() -> Self {
        Self {
            kind: NotificationKind::NoResults,
            title: "No books found".to_string(),
            description: "Try searching with different keywords or check your spelling."
                .to_string(),
            severity: Severity::Info,
        }
    }

    /// A search request failed.
    pub fn search_failed() -> Self {
        Self {
            kind: NotificationKind::SearchFailed,
            title: "Search failed".to_string(),
            description: "Please check your connection and try again.".to_string(),
            severity: Severity::Destructive,
        }
    }
}

/// A search that has been started and awaits its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Token the result must be completed with.
    pub token: u64,
    /// The request to send.
    pub query: BookQuery,
}

/// State of the primary search: current results, phase and notifications.
///
/// Starting a search hands out a [`SearchTicket`]; only the result for the
/// most recent ticket is ever applied.
#[derive(Debug)]
pub struct SearchSession {
    books: Vec<BookSummary>,
    phase: SearchPhase,
    has_searched: bool,
    latest: u64,
    limit: usize,
    notifications: Vec<Notification>,
}

impl SearchSession {
    /// Creates an idle session using the default page size.
    pub fn new() -> Self {
        Self::with_limit(SEARCH_LIMIT)
    }

    /// Creates an idle session requesting `limit` records per search.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            books: Vec::new(),
            phase: SearchPhase::Idle,
            has_searched: false,
            latest: 0,
            limit,
            notifications: Vec::new(),
        }
    }

    /// Starts a search.
    ///
    /// A blank query resets the session to idle and returns `None`: there is
    /// nothing to send.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        self.latest += 1;
        let query = query.trim();

        if query.is_empty() {
            debug!("Blank query, clearing results");
            self.books.clear();
            self.has_searched = false;
            self.phase = SearchPhase::Idle;
            return None;
        }

        self.phase = SearchPhase::Loading;
        self.has_searched = true;
        Some(SearchTicket {
            token: self.latest,
            query: BookQuery::new(query).with_limit(self.limit),
        })
    }

    /// Applies the result of the search started with `token`.
    ///
    /// Returns false when a newer search has been started since.
    pub fn complete(&mut self, token: u64, result: Result<Vec<BookSummary>>) -> bool {
        if token != self.latest {
            debug!(
                "Discarding stale search result (token {}, latest {})",
                token, self.latest
            );
            return false;
        }

        match result {
            Ok(books) => {
                self.books = dedup_by_key(books);
                if self.books.is_empty() {
                    self.phase = SearchPhase::Empty;
                    self.notifications.push(Notification::no_results());
                } else {
                    info!("Found {} books", self.books.len());
                    self.phase = SearchPhase::Results;
                }
            }
            Err(e) => {
                error!("Search error: {}", e);
                self.books.clear();
                self.phase = SearchPhase::Failed;
                self.notifications.push(Notification::search_failed());
            }
        }
        true
    }

    /// Runs a whole search against `catalog` and returns the resulting phase.
    pub async fn search(&mut self, catalog: &dyn Catalog, query: &str) -> SearchPhase {
        if let Some(ticket) = self.begin(query) {
            let result = catalog.search(&ticket.query).await;
            self.complete(ticket.token, result);
        }
        self.phase
    }

    /// Records from the last successful search.
    pub fn books(&self) -> &[BookSummary] {
        &self.books
    }

    /// Current phase.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Whether a search is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    /// Whether any search has been started since the last reset.
    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Notifications not yet shown.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Takes the pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the first record for each key.
fn dedup_by_key(books: Vec<BookSummary>) -> Vec<BookSummary> {
    let mut seen = HashSet::new();
    books
        .into_iter()
        .filter(|book| {
            let fresh = seen.insert(book.key.clone());
            if !fresh {
                debug!("Dropping duplicate record {}", book.key);
            }
            fresh
        })
        .collect()
}
