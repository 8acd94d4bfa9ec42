//! Plain-text rendering for terminals.

use crate::session::{Notification, Severity};
use crate::view::{BookCard, BookDetail, CoverView, PageView, ResultGrid, SuggestionList};
use crate::AppView;

/// Application banner.
pub fn header() -> String {
    [
        "BookFinder",
        "Discover your next great read from millions of books in the Open Library",
    ]
    .join("\n")
}

/// The search box line.
pub fn search_bar(query: &str, loading: bool) -> String {
    if loading {
        format!("Search: {} (searching...)", query)
    } else {
        format!("Search: {}", query)
    }
}

/// The suggestion dropdown, numbered from 1.
pub fn suggestions(list: &SuggestionList) -> String {
    if list.loading {
        return "  Loading suggestions...".to_string();
    }
    list.rows
        .iter()
        .enumerate()
        .map(|(i, row)| match &row.byline {
            Some(byline) => format!("  {}) {} ({})", i + 1, row.title, byline),
            None => format!("  {}) {}", i + 1, row.title),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One grid card, numbered from 1.
pub fn card(index: usize, card: &BookCard) -> String {
    let mut lines = vec![format!("{}. {}", index + 1, card.title())];
    lines.push(format!("   {}", card.authors()));
    if let Some(year) = card.year_badge() {
        lines.push(format!("   [{}]", year));
    }
    lines.push(format!("   Cover: {}", cover(&card.cover())));
    lines.join("\n")
}

/// The main content area.
pub fn page(page: &PageView, grid: &ResultGrid) -> String {
    let mut blocks = Vec::new();

    if page.welcome {
        blocks.push(
            [
                "Start Your Literary Journey",
                "Search for books by title, author, or subject to discover amazing reads from the world's largest digital library.",
            ]
            .join("\n"),
        );
    }
    if page.loading {
        blocks.push("Searching for books...".to_string());
    }
    if page.no_results {
        blocks.push(
            [
                "No books found",
                "Try different search terms or check your spelling.",
            ]
            .join("\n"),
        );
    }
    if let Some(heading) = &page.results_heading {
        blocks.push(heading.clone());
        for (i, c) in grid.cards().iter().enumerate() {
            blocks.push(card(i, c));
        }
    }

    blocks.join("\n\n")
}

/// The detail overlay.
pub fn detail(detail: &BookDetail) -> String {
    let mut lines = vec![detail.title.clone(), format!("Cover: {}", cover(&detail.cover()))];

    if let Some(authors) = &detail.authors {
        lines.push(format!("Authors: {}", authors));
    }
    if let Some(year) = detail.first_published {
        lines.push(format!("First Published: {}", year));
    }
    if let Some(publishers) = &detail.publishers {
        lines.push(format!("Publishers: {}", publishers));
    }
    if !detail.languages.is_empty() {
        lines.push(format!("Languages: {}", detail.languages.join(" ")));
    }
    if !detail.subjects.is_empty() {
        lines.push(format!("Subjects: {}", detail.subjects.join(", ")));
    }
    lines.push(format!("View on Open Library: {}", detail.record_url));

    lines.join("\n")
}

/// A notification line.
pub fn notification(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Info => "[i]",
        Severity::Destructive => "[!]",
    };
    format!(
        "{} {}: {}",
        marker, notification.title, notification.description
    )
}

/// Everything on screen for one application state.
pub fn app(view: &AppView<'_>) -> String {
    let mut blocks = vec![search_bar(view.query, view.page.loading)];
    if let Some(list) = &view.suggestions {
        blocks.push(suggestions(list));
    }
    blocks.push(page(&view.page, view.grid));
    if let Some(open) = view.detail {
        blocks.push(detail(open));
    }
    blocks.join("\n\n")
}

fn cover(view: &CoverView) -> String {
    match view {
        CoverView::Image { url } => url.clone(),
        CoverView::Fallback { glyph, caption } => format!("{} {}", glyph, caption),
    }
}
