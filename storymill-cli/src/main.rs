//! Storymill CLI
//!
//! Command-line companion for the Storymill book service: check on a
//! book, follow its generation progress, retry a failed one, or list
//! your library.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "storymill")]
#[command(about = "Storymill personalized book CLI", long_about = None)]
struct Cli {
    /// Book service URL
    #[arg(
        long,
        env = "STORYMILL_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    /// Bearer token for the book service. When omitted, the token is
    /// read from STORYMILL_TOKEN before every request.
    #[arg(long, env = "STORYMILL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        token: cli.token,
    };

    handle_command(cli.command, &config).await
}
