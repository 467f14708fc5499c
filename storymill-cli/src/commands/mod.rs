//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod book;

pub use book::BookCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Book management
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Book { command } => book::handle_book_command(command, config).await,
    }
}
