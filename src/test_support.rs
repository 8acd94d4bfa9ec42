//! Scripted catalog shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::{sleep, Duration};

use crate::{BookQuery, BookSummary, Catalog, CatalogConfig, Result, SearchError};

/// Canned response for one title.
#[derive(Debug, Clone)]
pub enum Reply {
    Books(Vec<BookSummary>),
    Status(u16),
    Malformed,
}

impl Reply {
    /// Records titled as given, keyed `/works/OL<n>W`.
    pub fn titles(titles: &[&str]) -> Self {
        Self::Books(
            titles
                .iter()
                .enumerate()
                .map(|(i, title)| BookSummary::new(format!("/works/OL{}W", i + 1), *title))
                .collect(),
        )
    }
}

/// Catalog answering from a script and recording every request.
pub struct ScriptedCatalog {
    config: CatalogConfig,
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    respect_limit: bool,
    calls: Mutex<Vec<BookQuery>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self {
            config: CatalogConfig {
                name: "Scripted".to_string(),
                ..Default::default()
            },
            replies: HashMap::new(),
            delays: HashMap::new(),
            respect_limit: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(mut self, title: &str, reply: Reply) -> Self {
        self.replies.insert(title.to_string(), reply);
        self
    }

    pub fn delay(mut self, title: &str, delay: Duration) -> Self {
        self.delays.insert(title.to_string(), delay);
        self
    }

    /// Returns every scripted record regardless of the requested limit.
    pub fn ignore_limit(mut self) -> Self {
        self.respect_limit = false;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.title.clone())
            .collect()
    }

    pub fn limits(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(|q| q.limit).collect()
    }
}

#[async_trait]
impl Catalog for ScriptedCatalog {
    fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn search(&self, query: &BookQuery) -> Result<Vec<BookSummary>> {
        self.calls.lock().unwrap().push(query.clone());
        if let Some(delay) = self.delays.get(&query.title) {
            sleep(*delay).await;
        }
        match self.replies.get(&query.title) {
            Some(Reply::Books(books)) => {
                let mut books = books.clone();
                if self.respect_limit {
                    books.truncate(query.limit);
                }
                Ok(books)
            }
            Some(Reply::Status(code)) => Err(SearchError::Status(*code)),
            Some(Reply::Malformed) => Err(SearchError::Parse("expected value".to_string())),
            None => Ok(Vec::new()),
        }
    }
}
