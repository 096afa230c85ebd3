use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vibecheck_analysis::{run_vibe_check, GeminiClient};
use vibecheck_core::{AppConfig, Handle};
use vibecheck_instagram::ProfileFetcher;

#[derive(Debug, Parser)]
#[command(name = "vibecheck-cli")]
#[command(about = "Run vibe checks and Instagram diagnostics from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full vibe check for a profile link or handle and print the JSON report
    Check {
        /// Instagram profile URL, `@handle`, or bare handle
        link: String,
        /// Maximum number of posts to fetch (0-50)
        #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u16).range(0..=50))]
        max_posts: u16,
    },
    /// Print Instagram credential and token diagnostics
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(vibecheck_core::load_app_config()?);
    // Logs go to stderr so stdout stays valid JSON.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { link, max_posts } => check(&config, &link, usize::from(max_posts)).await,
        Commands::Status => status(config).await,
    }
}

async fn check(config: &Arc<AppConfig>, link: &str, max_posts: usize) -> anyhow::Result<()> {
    let api_key = config
        .gemini_api_key()
        .context("Gemini API key not configured")?;
    let gemini = GeminiClient::new(
        &config.gemini,
        api_key,
        config.http_timeout_secs,
        &config.user_agent,
    )?;
    let fetcher = ProfileFetcher::new(Arc::clone(config));

    let handle = Handle::extract(link);
    if handle.is_empty() {
        tracing::warn!(link, "no valid handle in link; using demo profile");
    }

    let report = run_vibe_check(&fetcher, &gemini, &handle, max_posts).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn status(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let report = ProfileFetcher::new(config).status().await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests;
