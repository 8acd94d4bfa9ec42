//! Debounced as-you-type suggestions.
//!
//! [`SuggestionFeed`] turns a rapidly changing text input into at most one
//! catalog request per pause in typing. Every input change bumps a request
//! token and aborts the pending debounce task; results travel back over a
//! channel tagged with the token they were issued under, and [`SuggestionFeed::apply`]
//! drops anything that is not from the latest token. A response can
//! therefore never overwrite fresher suggestions, whatever order the
//! network delivers them in.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::{debug, warn};

use crate::query::SUGGESTION_LIMIT;
use crate::{BookQuery, BookSummary, Catalog, Result};

/// Timing and size settings for the suggestion feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Quiet period after the last keystroke before fetching, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Inputs shorter than this (in characters) never fetch.
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    /// Number of suggestions to request and show.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_delay_ms() -> u64 {
    300
}

fn default_min_chars() -> usize {
    2
}

fn default_limit() -> usize {
    SUGGESTION_LIMIT
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            min_chars: default_min_chars(),
            limit: default_limit(),
        }
    }
}

impl FeedConfig {
    /// Debounce delay as a duration.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Progress of one suggestion request.
#[derive(Debug)]
pub enum FeedEvent {
    /// The debounce window elapsed and the request went out.
    Started,
    /// The request finished.
    Finished(Result<Vec<BookSummary>>),
}

/// A feed event tagged with the request token it belongs to.
#[derive(Debug)]
pub struct FeedMessage {
    /// Token of the request that produced this event.
    pub token: u64,
    /// What happened.
    pub event: FeedEvent,
}

/// Suggestion state for a search box.
pub struct SuggestionFeed {
    catalog: Arc<dyn Catalog>,
    config: FeedConfig,
    sender: mpsc::UnboundedSender<FeedMessage>,
    input: String,
    items: Vec<BookSummary>,
    open: bool,
    loading: bool,
    latest: u64,
    pending: Option<JoinHandle<()>>,
}

impl SuggestionFeed {
    /// Creates a feed and the receiver its requests report to.
    ///
    /// Every message from the receiver must be handed back to
    /// [`SuggestionFeed::apply`].
    pub fn new(
        catalog: Arc<dyn Catalog>,
        config: FeedConfig,
    ) -> (Self, mpsc::UnboundedReceiver<FeedMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let feed = Self {
            catalog,
            config,
            sender,
            input: String::new(),
            items: Vec::new(),
            open: false,
            loading: false,
            latest: 0,
            pending: None,
        };
        (feed, receiver)
    }

    /// Records a new input value and restarts the debounce window.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.invalidate();

        if self.input.chars().count() < self.config.min_chars {
            self.items.clear();
            self.open = false;
            return;
        }

        self.schedule();
    }

    /// Applies a message from the feed's channel.
    ///
    /// Returns false when the message belongs to a superseded request and
    /// was discarded.
    pub fn apply(&mut self, message: FeedMessage) -> bool {
        if message.token != self.latest {
            debug!(
                "Discarding stale suggestion event (token {}, latest {})",
                message.token, self.latest
            );
            return false;
        }

        match message.event {
            FeedEvent::Started => {
                self.loading = true;
            }
            FeedEvent::Finished(Ok(mut items)) => {
                items.truncate(self.config.limit);
                debug!("Showing {} suggestions for '{}'", items.len(), self.input);
                self.items = items;
                self.open = true;
                self.loading = false;
                self.pending = None;
            }
            FeedEvent::Finished(Err(e)) => {
                warn!("Error fetching suggestions for '{}': {}", self.input, e);
                self.loading = false;
                self.pending = None;
            }
        }
        true
    }

    /// Picks a suggestion, returning its title for an immediate search.
    ///
    /// The input takes the suggestion's title, the list closes and no
    /// further suggestion results will be applied for the old input.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let title = self.items.get(index)?.title.clone();
        self.input = title.clone();
        self.open = false;
        self.invalidate();
        Some(title)
    }

    /// Returns the trimmed input for a search, or `None` when blank.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let query = trimmed.to_string();
        self.open = false;
        self.invalidate();
        Some(query)
    }

    /// Empties the input and the suggestion list.
    pub fn clear(&mut self) {
        self.input.clear();
        self.items.clear();
        self.open = false;
        self.invalidate();
    }

    /// Reopens the list when there is something to show for the input.
    pub fn focus(&mut self) {
        if self.input.chars().count() >= self.config.min_chars && !self.items.is_empty() {
            self.open = true;
        }
    }

    /// Hides the list without touching its contents.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Current input value.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current suggestions.
    pub fn items(&self) -> &[BookSummary] {
        &self.items
    }

    /// Whether a request is in flight for the current input.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the list is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the list should be drawn: open and non-empty.
    pub fn is_visible(&self) -> bool {
        self.open && !self.items.is_empty()
    }

    /// Token of the most recently issued request.
    pub fn latest_token(&self) -> u64 {
        self.latest
    }

    /// Feed settings.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Cancels pending work and makes every outstanding message stale.
    fn invalidate(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.latest += 1;
        self.loading = false;
    }

    fn schedule(&mut self) {
        let token = self.latest;
        let catalog = Arc::clone(&self.catalog);
        let sender = self.sender.clone();
        let deadline = Instant::now() + self.config.delay();
        let query = BookQuery::suggestion(self.input.clone()).with_limit(self.config.limit);

        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            if sender
                .send(FeedMessage {
                    token,
                    event: FeedEvent::Started,
                })
                .is_err()
            {
                return;
            }
            debug!("Fetching suggestions for '{}'", query.title);
            let result = catalog.search(&query).await;
            let _ = sender.send(FeedMessage {
                token,
                event: FeedEvent::Finished(result),
            });
        }));
    }
}

impl Drop for SuggestionFeed {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
