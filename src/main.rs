//! BookFinder CLI - search the Open Library catalog from a terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use bookfinder::{
    view::{self, render},
    Action, App, AppConfig, Catalog, CoverSize, FeedEvent, OpenLibrary, SearchSession,
    SuggestionFeed,
};

/// BookFinder - discover books in the Open Library
#[derive(Parser)]
#[command(name = "bookfinder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Search endpoint URL (overrides the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search books by title
    Search(SearchArgs),

    /// Show title suggestions for partial input
    Suggest {
        /// Partial title
        query: String,
    },

    /// Search and show the details of one result
    Show {
        /// Search query
        query: String,

        /// Result number as listed by `search` (1-based)
        number: usize,

        /// Check that the cover image loads
        #[arg(long)]
        check_cover: bool,
    },

    /// Type queries line by line with live suggestions
    Interactive,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Maximum number of results to request
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Check that every cover image loads
    #[arg(long)]
    check_covers: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Search(args) => run_search(config, args).await,
        Commands::Suggest { query } => run_suggest(config, query).await,
        Commands::Show {
            query,
            number,
            check_cover,
        } => run_show(config, query, number, check_cover).await,
        Commands::Interactive => run_interactive(config).await,
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(timeout) = cli.timeout {
        config.catalog.timeout = timeout;
    }
    if let Some(endpoint) = &cli.endpoint {
        config.catalog.search_url = endpoint.clone();
    }
    Ok(config)
}

async fn run_search(mut config: AppConfig, args: SearchArgs) -> Result<()> {
    if let Some(limit) = args.limit {
        config.search_limit = limit;
    }
    let catalog = OpenLibrary::with_config(config.catalog.clone())?;
    let mut session = SearchSession::with_limit(config.search_limit);
    session.search(&catalog, &args.query).await;

    for notification in session.take_notifications() {
        eprintln!("{}", render::notification(&notification));
    }

    let mut grid = view::ResultGrid::new(session.books(), &config.catalog.covers_url);
    if args.check_covers {
        for key in catalog
            .failed_covers(session.books(), CoverSize::Medium)
            .await
        {
            grid.mark_cover_failed(&key);
        }
    }

    match args.format {
        OutputFormat::Text => {
            let page = view::PageView::compute(
                grid.len(),
                session.is_loading(),
                session.has_searched(),
            );
            println!("{}\n", render::header());
            println!("{}", render::page(&page, &grid));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(session.books())?);
        }
        OutputFormat::Compact => {
            for book in session.books() {
                println!("{}\t{}", book.title, catalog.record_url(book));
            }
        }
    }

    Ok(())
}

async fn run_suggest(config: AppConfig, query: String) -> Result<()> {
    let catalog = Arc::new(OpenLibrary::with_config(config.catalog)?);
    let (mut feed, mut messages) = SuggestionFeed::new(catalog, config.suggestions);

    feed.set_input(query);
    if feed.input().chars().count() < feed.config().min_chars {
        return Ok(());
    }

    while let Some(message) = messages.recv().await {
        let finished = matches!(message.event, FeedEvent::Finished(_));
        feed.apply(message);
        if finished {
            break;
        }
    }

    if let Some(list) = view::SuggestionList::from_feed(&feed) {
        println!("{}", render::suggestions(&list));
    }
    Ok(())
}

async fn run_show(config: AppConfig, query: String, number: usize, check_cover: bool) -> Result<()> {
    let catalog = OpenLibrary::with_config(config.catalog.clone())?;
    let mut session = SearchSession::with_limit(config.search_limit);
    session.search(&catalog, &query).await;

    for notification in session.take_notifications() {
        eprintln!("{}", render::notification(&notification));
    }

    let book = number
        .checked_sub(1)
        .and_then(|index| session.books().get(index))
        .with_context(|| {
            format!(
                "No result #{} for \"{}\" ({} results)",
                number,
                query,
                session.books().len()
            )
        })?;

    let mut detail = view::BookDetail::new(book, &config.catalog.covers_url, &config.catalog.site_url);
    if check_cover && catalog.fetch_cover(book, CoverSize::Large).await.is_err() {
        detail.mark_cover_failed();
    }
    println!("{}", render::detail(&detail));
    Ok(())
}

/// Reads stdin line by line. A plain line replaces the search box text;
/// lines starting with ':' are commands.
async fn run_interactive(config: AppConfig) -> Result<()> {
    let catalog: Arc<dyn Catalog> = Arc::new(OpenLibrary::with_config(config.catalog.clone())?);
    let mut app = App::new(catalog, config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", render::header());
    println!("Type to search. Commands: :submit :pick N :open N :close :clear :quit\n");
    println!("{}", render::app(&app.view()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Action(action)) => app.handle(action),
                    None => {
                        eprintln!("Unknown command: {}", line.trim());
                        continue;
                    }
                }
            }
            changed = app.next_update() => {
                if !changed {
                    continue;
                }
            }
        }

        for notification in app.take_notifications() {
            println!("{}", render::notification(&notification));
        }
        println!("\n{}", render::app(&app.view()));
    }

    Ok(())
}

enum Command {
    Action(Action),
    Quit,
}

fn parse_line(line: &str) -> Option<Command> {
    let Some(command) = line.strip_prefix(':') else {
        return Some(Command::Action(Action::Input(line.to_string())));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or("submit");
    let number = parts
        .next()
        .and_then(|n| n.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1));

    let action = match (name, number) {
        ("submit" | "s", _) => Action::Submit,
        ("pick" | "p", Some(index)) => Action::Select(index),
        ("open" | "o", Some(index)) => Action::Open(index),
        ("close" | "c", _) => Action::CloseDetail,
        ("clear", _) => Action::Clear,
        ("focus" | "f", _) => Action::Focus,
        ("quit" | "q", _) => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Action(action))
}
