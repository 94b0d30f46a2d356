//! Enrollwise CLI: dry-run the context pipeline locally.
//!
//! Commands:
//! - `classify`: show the funnel stage, language, and detected signals
//! - `assemble`: build the full context payload (no generation call)
//! - `config`:   show, locate, or validate configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod input;

#[derive(Parser)]
#[command(
    name = "enrollwise",
    about = "Enrollwise: enrollment conversation context pipeline",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.enrollwise/config.toml)
    #[arg(short, long, global = true, env = "ENROLLWISE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a conversation without calling any collaborator
    Classify {
        /// The current user message
        #[arg(short, long)]
        query: String,

        /// JSON file with the prior turns
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Assemble the full context payload
    Assemble {
        /// The current user message
        #[arg(short, long)]
        query: String,

        /// JSON file with the prior turns
        #[arg(long)]
        history: Option<PathBuf>,

        /// JSON file with retrieved passages, in rank order
        #[arg(long)]
        passages: Option<PathBuf>,

        /// Evaluate dates as of this day (YYYY-MM-DD)
        #[arg(long)]
        today: Option<chrono::NaiveDate>,

        /// Print the payload as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the default config file path
    Path,
    /// Validate the configuration and catalog
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Classify { query, history } => {
            commands::classify::run(config_path, &query, history.as_deref()).await?
        }
        Commands::Assemble {
            query,
            history,
            passages,
            today,
            json,
        } => {
            commands::assemble::run(
                config_path,
                &query,
                history.as_deref(),
                passages.as_deref(),
                today,
                json,
            )
            .await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path).await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate(config_path).await?,
        },
    }

    Ok(())
}
