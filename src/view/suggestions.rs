//! Suggestion dropdown.

use serde::Serialize;

use crate::SuggestionFeed;

/// One suggestion row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRow {
    pub title: String,
    /// "by <first author>", when there is one.
    pub byline: Option<String>,
}

/// The dropdown under the search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionList {
    /// When set, a loading row replaces the suggestion rows.
    pub loading: bool,
    pub rows: Vec<SuggestionRow>,
}

impl SuggestionList {
    /// The dropdown for `feed`, or `None` while it should stay hidden.
    pub fn from_feed(feed: &SuggestionFeed) -> Option<Self> {
        if !feed.is_visible() {
            return None;
        }
        let rows = feed
            .items()
            .iter()
            .map(|book| SuggestionRow {
                title: book.title.clone(),
                byline: book.primary_author().map(|author| format!("by {}", author)),
            })
            .collect();
        Some(Self {
            loading: feed.is_loading(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedCatalog;
    use crate::{BookSummary, FeedConfig, FeedEvent, FeedMessage};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_hidden_until_results_arrive() {
        let (mut feed, _rx) =
            SuggestionFeed::new(Arc::new(ScriptedCatalog::new()), FeedConfig::default());
        assert!(SuggestionList::from_feed(&feed).is_none());

        feed.set_input("dune");
        let token = feed.latest_token();
        feed.apply(FeedMessage {
            token,
            event: FeedEvent::Finished(Ok(vec![
                BookSummary::new("/works/OL1W", "Dune").with_authors(["Frank Herbert"]),
                BookSummary::new("/works/OL2W", "Dune Road"),
            ])),
        });

        let list = SuggestionList::from_feed(&feed).unwrap();
        assert!(!list.loading);
        assert_eq!(
            list.rows,
            vec![
                SuggestionRow {
                    title: "Dune".to_string(),
                    byline: Some("by Frank Herbert".to_string()),
                },
                SuggestionRow {
                    title: "Dune Road".to_string(),
                    byline: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_result_stays_hidden() {
        let (mut feed, _rx) =
            SuggestionFeed::new(Arc::new(ScriptedCatalog::new()), FeedConfig::default());
        feed.set_input("qqqq");
        let token = feed.latest_token();
        feed.apply(FeedMessage {
            token,
            event: FeedEvent::Finished(Ok(vec![])),
        });
        assert!(feed.is_open());
        assert!(SuggestionList::from_feed(&feed).is_none());
    }
}
