//! Page-level glue: search box, suggestions, results grid and detail view.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::session::{Notification, SearchSession};
use crate::suggest::FeedMessage;
use crate::view::{BookDetail, PageView, ResultGrid, SuggestionList};
use crate::{AppConfig, BookSummary, Catalog, Result, SuggestionFeed};

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The search box text changed.
    Input(String),
    /// The search form was submitted.
    Submit,
    /// The suggestion at this index was picked.
    Select(usize),
    /// The clear button was pressed.
    Clear,
    /// The search box gained focus.
    Focus,
    /// The suggestion dropdown was dismissed.
    CloseSuggestions,
    /// The grid card at this index was opened.
    Open(usize),
    /// The detail view was closed.
    CloseDetail,
    /// A grid cover image failed to load.
    CoverFailed(String),
    /// The detail view's cover image failed to load.
    DetailCoverFailed,
}

struct SearchDone {
    token: u64,
    result: Result<Vec<BookSummary>>,
}

/// Borrowed snapshot of everything on screen.
#[derive(Debug)]
pub struct AppView<'a> {
    pub query: &'a str,
    pub suggestions: Option<SuggestionList>,
    pub page: PageView,
    pub grid: &'a ResultGrid,
    pub detail: Option<&'a BookDetail>,
}

/// The book search application.
///
/// Actions are applied synchronously through [`App::handle`]; network work
/// runs on spawned tasks whose results come back through
/// [`App::next_update`].
pub struct App {
    catalog: Arc<dyn Catalog>,
    feed: SuggestionFeed,
    feed_rx: mpsc::UnboundedReceiver<FeedMessage>,
    session: SearchSession,
    search_tx: mpsc::UnboundedSender<SearchDone>,
    search_rx: mpsc::UnboundedReceiver<SearchDone>,
    grid: ResultGrid,
    detail: Option<BookDetail>,
}

impl App {
    /// Creates an idle application over `catalog`.
    pub fn new(catalog: Arc<dyn Catalog>, config: AppConfig) -> Self {
        let (feed, feed_rx) = SuggestionFeed::new(Arc::clone(&catalog), config.suggestions);
        let (search_tx, search_rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            feed,
            feed_rx,
            session: SearchSession::with_limit(config.search_limit),
            search_tx,
            search_rx,
            grid: ResultGrid::default(),
            detail: None,
        }
    }

    /// Applies one user action. Must be called within a tokio runtime.
    pub fn handle(&mut self, action: Action) {
        debug!("Handling {:?}", action);
        match action {
            Action::Input(text) => self.feed.set_input(text),
            Action::Submit => {
                if let Some(query) = self.feed.submit() {
                    self.start_search(&query);
                }
            }
            Action::Select(index) => {
                if let Some(title) = self.feed.select(index) {
                    self.start_search(&title);
                }
            }
            Action::Clear => {
                self.feed.clear();
                self.start_search("");
            }
            Action::Focus => self.feed.focus(),
            Action::CloseSuggestions => self.feed.close(),
            Action::Open(index) => {
                let config = self.catalog.config();
                self.detail = self
                    .grid
                    .get(index)
                    .map(|card| BookDetail::new(card.book(), &config.covers_url, &config.site_url));
            }
            Action::CloseDetail => self.detail = None,
            Action::CoverFailed(key) => {
                self.grid.mark_cover_failed(&key);
            }
            Action::DetailCoverFailed => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.mark_cover_failed();
                }
            }
        }
    }

    /// Waits for the next background result and applies it.
    ///
    /// Returns false when the result was stale and nothing changed.
    pub async fn next_update(&mut self) -> bool {
        tokio::select! {
            Some(message) = self.feed_rx.recv() => self.feed.apply(message),
            Some(done) = self.search_rx.recv() => self.finish_search(done),
            else => false,
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> AppView<'_> {
        AppView {
            query: self.feed.input(),
            suggestions: SuggestionList::from_feed(&self.feed),
            page: PageView::compute(
                self.grid.len(),
                self.session.is_loading(),
                self.session.has_searched(),
            ),
            grid: &self.grid,
            detail: self.detail.as_ref(),
        }
    }

    /// Takes notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.session.take_notifications()
    }

    /// Suggestion state.
    pub fn feed(&self) -> &SuggestionFeed {
        &self.feed
    }

    /// Primary search state.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Current result cards.
    pub fn grid(&self) -> &ResultGrid {
        &self.grid
    }

    /// Open detail view, if any.
    pub fn detail(&self) -> Option<&BookDetail> {
        self.detail.as_ref()
    }

    fn start_search(&mut self, query: &str) {
        let Some(ticket) = self.session.begin(query) else {
            self.grid = ResultGrid::default();
            self.detail = None;
            return;
        };

        let catalog = Arc::clone(&self.catalog);
        let sender = self.search_tx.clone();
        tokio::spawn(async move {
            let result = catalog.search(&ticket.query).await;
            let _ = sender.send(SearchDone {
                token: ticket.token,
                result,
            });
        });
    }

    fn finish_search(&mut self, done: SearchDone) -> bool {
        if !self.session.complete(done.token, done.result) {
            return false;
        }
        self.grid = ResultGrid::new(self.session.books(), &self.catalog.config().covers_url);
        self.detail = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{NotificationKind, SearchPhase};
    use crate::test_support::{Reply, ScriptedCatalog};
    use crate::view::{render, CoverView};
    use tokio::time::Duration;

    fn app_with(catalog: &Arc<ScriptedCatalog>) -> App {
        App::new(catalog.clone(), AppConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_dune_renders_one_fallback_card() {
        let catalog = Arc::new(ScriptedCatalog::new().reply("dune", Reply::titles(&["Dune"])));
        let mut app = app_with(&catalog);

        app.handle(Action::Input("dune".to_string()));
        app.handle(Action::Submit);
        assert!(app.session().is_loading());
        assert!(app.next_update().await);

        assert_eq!(app.grid().len(), 1);
        let card = app.grid().get(0).unwrap();
        assert_eq!(card.title(), "Dune");
        assert!(card.year_badge().is_none());
        assert!(matches!(card.cover(), CoverView::Fallback { .. }));

        let text = render::app(&app.view());
        assert!(text.contains("Found 1 books"));
        assert!(text.contains("1. Dune"));
        assert!(text.contains("Cover: 📚 Dune"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_suggestion_searches_immediately() {
        let catalog = Arc::new(
            ScriptedCatalog::new()
                .reply("du", Reply::titles(&["Dune", "Dubliners"]))
                .reply("Dubliners", Reply::titles(&["Dubliners"])),
        );
        let mut app = app_with(&catalog);

        app.handle(Action::Input("du".to_string()));
        assert!(app.next_update().await); // started
        assert!(app.next_update().await); // finished
        assert!(app.view().suggestions.is_some());

        app.handle(Action::Select(1));
        assert!(app.view().suggestions.is_none());
        assert_eq!(app.view().query, "Dubliners");
        assert!(app.session().is_loading());

        assert!(app.next_update().await);
        assert_eq!(app.session().phase(), SearchPhase::Results);
        assert_eq!(catalog.calls(), vec!["du".to_string(), "Dubliners".to_string()]);
        assert_eq!(catalog.limits(), vec![5, 24]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submit_does_nothing() {
        let catalog = Arc::new(ScriptedCatalog::new());
        let mut app = app_with(&catalog);

        app.handle(Action::Input("   ".to_string()));
        app.handle(Action::Submit);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(catalog.calls().is_empty());
        assert_eq!(app.session().phase(), SearchPhase::Idle);
        assert!(app.view().page.welcome);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_returns_to_idle_without_network() {
        let catalog = Arc::new(ScriptedCatalog::new().reply("dune", Reply::titles(&["Dune"])));
        let mut app = app_with(&catalog);

        app.handle(Action::Input("dune".to_string()));
        app.handle(Action::Submit);
        app.next_update().await;
        assert_eq!(app.grid().len(), 1);

        app.handle(Action::Clear);
        assert!(app.grid().is_empty());
        assert_eq!(app.view().query, "");
        assert!(app.view().page.welcome);
        assert_eq!(catalog.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_search_wins_over_slower_earlier_one() {
        let catalog = Arc::new(
            ScriptedCatalog::new()
                .reply("dune", Reply::titles(&["Dune"]))
                .delay("dune", Duration::from_secs(3))
                .reply("emma", Reply::titles(&["Emma"])),
        );
        let mut app = app_with(&catalog);

        app.handle(Action::Input("dune".to_string()));
        app.handle(Action::Submit);
        app.handle(Action::Input("emma".to_string()));
        app.handle(Action::Submit);

        assert!(app.next_update().await);
        assert_eq!(app.grid().get(0).unwrap().title(), "Emma");

        assert!(!app.next_update().await);
        assert_eq!(app.grid().len(), 1);
        assert_eq!(app.grid().get(0).unwrap().title(), "Emma");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_notifies_and_empties() {
        let catalog = Arc::new(
            ScriptedCatalog::new()
                .reply("dune", Reply::titles(&["Dune"]))
                .reply("emma", Reply::Status(503)),
        );
        let mut app = app_with(&catalog);

        app.handle(Action::Input("dune".to_string()));
        app.handle(Action::Submit);
        app.next_update().await;
        app.handle(Action::Input("emma".to_string()));
        app.handle(Action::Submit);
        app.next_update().await;

        assert!(app.grid().is_empty());
        let notifications = app.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::SearchFailed);
        assert!(app.view().page.no_results);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_search_notifies_once() {
        let catalog = Arc::new(ScriptedCatalog::new());
        let mut app = app_with(&catalog);

        app.handle(Action::Input("qqqqq".to_string()));
        app.handle(Action::Submit);
        app.next_update().await;

        let notifications = app.take_notifications();
        assert_eq!(notifications, vec![Notification::no_results()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_detail_and_cover_failures() {
        let catalog = Arc::new(ScriptedCatalog::new().reply(
            "dune",
            Reply::Books(vec![
                BookSummary::new("/works/OL1W", "Dune").with_cover(1),
                BookSummary::new("/works/OL2W", "Dune Messiah").with_cover(2),
            ]),
        ));
        let mut app = app_with(&catalog);

        app.handle(Action::Input("dune".to_string()));
        app.handle(Action::Submit);
        app.next_update().await;

        app.handle(Action::CoverFailed("/works/OL1W".to_string()));
        assert!(app.grid().get(0).unwrap().cover_failed());
        assert!(!app.grid().get(1).unwrap().cover_failed());

        app.handle(Action::Open(1));
        let detail = app.detail().unwrap();
        assert_eq!(detail.title, "Dune Messiah");
        assert!(matches!(detail.cover(), CoverView::Image { .. }));

        app.handle(Action::DetailCoverFailed);
        assert!(matches!(app.detail().unwrap().cover(), CoverView::Fallback { .. }));

        app.handle(Action::CloseDetail);
        assert!(app.detail().is_none());

        app.handle(Action::Open(7));
        assert!(app.detail().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_reopens_suggestions() {
        let catalog = Arc::new(ScriptedCatalog::new().reply("du", Reply::titles(&["Dune"])));
        let mut app = app_with(&catalog);

        app.handle(Action::Input("du".to_string()));
        app.next_update().await;
        app.next_update().await;
        app.handle(Action::CloseSuggestions);
        assert!(app.view().suggestions.is_none());

        app.handle(Action::Focus);
        assert!(app.view().suggestions.is_some());
    }
}
