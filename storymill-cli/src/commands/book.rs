//! Book command handlers
//!
//! Handles all book-related CLI commands: one-shot status, live
//! progress watching, regeneration of failed books, and the library
//! listing.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use storymill_client::{
    ApiClient, BookWatcher, EnvToken, EventHandlers, StaticToken, TokenProvider, WatchError,
    WatchEvent, WatchHandle,
};
use storymill_core::domain::book::{BookPhase, BookStatus};
use storymill_core::dto::book::BookSummary;

use crate::config::Config;

/// Book subcommands
#[derive(Subcommand)]
pub enum BookCommands {
    /// Show the current status of a book
    Status {
        /// Book id
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Follow a book until it completes or fails
    Watch {
        /// Book id
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,

        /// Seconds between status polls
        #[arg(long, default_value_t = 3)]
        interval: u64,
    },
    /// Ask the server to regenerate a failed book, then follow it
    Retry {
        /// Book id
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,

        /// Seconds between status polls
        #[arg(long, default_value_t = 3)]
        interval: u64,
    },
    /// List your books
    List,
}

/// Handle book commands
///
/// Routes book subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The book command to execute
/// * `config` - The CLI configuration
pub async fn handle_book_command(command: BookCommands, config: &Config) -> Result<()> {
    let client = Arc::new(build_client(config));

    match command {
        BookCommands::Status { id } => show_status(&client, id).await,
        BookCommands::Watch { id, interval } => watch_book(client, id, interval).await,
        BookCommands::Retry { id, interval } => retry_book(client, id, interval).await,
        BookCommands::List => list_books(&client).await,
    }
}

/// Build the API client with CLI-appropriate event handlers
fn build_client(config: &Config) -> ApiClient {
    let events = EventHandlers::new()
        .on_unreachable(|message| {
            eprintln!(
                "{} {}",
                "⚠ Server unreachable:".yellow(),
                message.dimmed()
            );
        })
        .on_update_required(|| {
            eprintln!(
                "{}",
                "✗ This client version is no longer supported; please update.".red()
            );
        });

    let token: Arc<dyn TokenProvider> = match &config.token {
        Some(token) => Arc::new(StaticToken::new(token.clone())),
        None => Arc::new(EnvToken::new("STORYMILL_TOKEN")),
    };

    ApiClient::new(&config.api_url, token).with_event_handlers(events)
}

/// Fetch and display a single status snapshot
async fn show_status(client: &ApiClient, id: i64) -> Result<()> {
    let status = client.get_book_status(id).await?;
    print_book_details(&status);
    Ok(())
}

/// Poll a book until it reaches a terminal state
async fn watch_book(client: Arc<ApiClient>, id: i64, interval: u64) -> Result<()> {
    let watcher = BookWatcher::with_interval(client, Duration::from_secs(interval.max(1)));
    let handle = watcher.start(id)?;

    println!("{}", format!("Watching book {}...", id).bold());
    follow(handle).await
}

/// Retry a failed book, then follow the fresh generation run
async fn retry_book(client: Arc<ApiClient>, id: i64, interval: u64) -> Result<()> {
    let watcher = BookWatcher::with_interval(client, Duration::from_secs(interval.max(1)));

    println!("{}", "Requesting regeneration...".dimmed());
    match watcher.retry(id).await {
        Ok(handle) => {
            println!("{}", "Regeneration accepted.".green());
            follow(handle).await
        }
        Err(error) => Err(anyhow::anyhow!("retry rejected: {}", error)),
    }
}

/// Consume watch events until the watch ends
async fn follow(mut handle: WatchHandle) -> Result<()> {
    let book_id = handle.book_id();

    while let Some(event) = handle.recv().await {
        match event {
            WatchEvent::Status(status) => {
                render_progress_line(&status);
                if status.is_terminal() {
                    println!();
                    println!();
                    print_terminal_summary(&status);
                }
            }
            WatchEvent::Transient { message } => {
                println!();
                println!(
                    "{} {}",
                    "⚠ Poll failed (still watching):".yellow(),
                    message.dimmed()
                );
            }
            WatchEvent::Fatal(error) => {
                println!();
                return Err(fatal_error(error, book_id));
            }
        }
    }

    Ok(())
}

/// Translate a watch-ending failure into a command error
fn fatal_error(error: WatchError, book_id: i64) -> anyhow::Error {
    match error {
        WatchError::SessionExpired => {
            anyhow::anyhow!("session expired; sign in again and re-run the command")
        }
        WatchError::NotFound => anyhow::anyhow!("book {} was not found", book_id),
        WatchError::UpdateRequired => {
            anyhow::anyhow!("this client version is no longer supported; please update")
        }
    }
}

/// Redraw the single-line progress display
fn render_progress_line(status: &BookStatus) {
    let percent = status.display_percent();
    print!(
        "\r  {} {:>3}%  {}          ",
        progress_bar(percent, 24),
        percent,
        status.phase.label().cyan()
    );
    let _ = std::io::stdout().flush();
}

/// Fixed-width textual progress bar, e.g. `[=========>      ]`
fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent as usize * width) / 100;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        if i < filled {
            bar.push('=');
        } else if i == filled && percent < 100 {
            bar.push('>');
        } else {
            bar.push(' ');
        }
    }
    bar.push(']');
    bar
}

/// Print the closing summary for a terminal snapshot
fn print_terminal_summary(status: &BookStatus) {
    match status.phase {
        BookPhase::Completed => {
            println!("{}", "✓ Your book is ready!".green().bold());
            if let Some(completed) = status.completed_at {
                let duration = completed.signed_duration_since(status.created_at);
                println!(
                    "  Finished at {} ({}s total)",
                    completed.format("%Y-%m-%d %H:%M:%S"),
                    duration.num_seconds()
                );
            }
        }
        BookPhase::Failed => {
            println!("{}", "✗ Generation failed".red().bold());
            if let Some(message) = &status.error_message {
                println!("  {}", message.red());
            }
            println!(
                "  {}",
                format!("Run `storymill book retry {}` to regenerate.", status.id).dimmed()
            );
        }
        _ => {}
    }
}

/// Print detailed book status information
fn print_book_details(status: &BookStatus) {
    println!("{}", "Book Status:".bold());
    println!("  ID:        {}", status.id.to_string().cyan());
    println!(
        "  Status:    {} ({})",
        colorize_phase(&status.phase),
        status.phase.label()
    );
    println!("  Progress:  {}%", status.display_percent());
    println!(
        "  Created:   {}",
        status.created_at.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(completed) = status.completed_at {
        println!("  Completed: {}", completed.format("%Y-%m-%d %H:%M:%S"));

        let duration = completed.signed_duration_since(status.created_at);
        println!("  Duration:  {}s", duration.num_seconds());
    }

    if let Some(message) = &status.error_message {
        println!("\n{}", "Error:".bold());
        println!("  {}", message.red());
    }
}

/// List the caller's books
async fn list_books(client: &ApiClient) -> Result<()> {
    let books = client.list_books().await?;

    if books.is_empty() {
        println!("{}", "No books yet.".yellow());
    } else {
        println!("{}", format!("Found {} book(s):", books.len()).bold());
        println!();
        for book in books {
            print_book_summary(&book);
        }
    }

    Ok(())
}

/// Print a one-book library entry
fn print_book_summary(book: &BookSummary) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        book.title.bold(),
        format!("(book {})", book.id).dimmed()
    );
    println!("    Status:   {}", colorize_phase(&book.phase()));
    println!(
        "    Created:  {}",
        book.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Colorize a lifecycle phase for display
fn colorize_phase(phase: &BookPhase) -> colored::ColoredString {
    let text = phase.as_str().to_string();
    match phase {
        BookPhase::Creating => text.yellow(),
        BookPhase::GeneratingStory | BookPhase::GeneratingImages | BookPhase::Composing => {
            text.cyan()
        }
        BookPhase::Completed => text.green(),
        BookPhase::Failed => text.red(),
        BookPhase::Other(_) => text.dimmed(),
    }
}
