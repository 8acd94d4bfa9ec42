//! Example: a full search followed by suggestions for partial input.

use std::sync::Arc;

use bookfinder::{
    view::render, Catalog, FeedConfig, FeedEvent, OpenLibrary, SearchSession, SuggestionFeed,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let catalog = Arc::new(OpenLibrary::new());
    println!("Searching {}", catalog.name());

    // Full search
    let mut session = SearchSession::new();
    session.search(catalog.as_ref(), "the left hand of darkness").await;
    for notification in session.take_notifications() {
        println!("{}", render::notification(&notification));
    }
    for (i, book) in session.books().iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, book.title, book.author_line());
        if let Some(year) = book.first_publish_year {
            println!("   First published {}", year);
        }
        println!("   {}", book.record_url());
    }
    println!();

    // Suggestions, as a search box would request them
    let (mut feed, mut messages) = SuggestionFeed::new(catalog, FeedConfig::default());
    feed.set_input("earths");
    while let Some(message) = messages.recv().await {
        let finished = matches!(message.event, FeedEvent::Finished(_));
        feed.apply(message);
        if finished {
            break;
        }
    }
    println!("Suggestions for \"{}\":", feed.input());
    for book in feed.items() {
        println!("  {}", book.title);
    }

    Ok(())
}
