//! # equiprent
//!
//! Terminal front end for the equipment rental request flow.
//!
//! ## Commands
//!
//! - `init`: Write a config file for the lead backend
//! - `request`: Walk the rental form, syncing each step as a lead
//! - `status`: Show configuration and the saved draft
//! - `reset`: Discard the saved draft
//! - `equipment`: List equipment options
//! - `check`: Validate fields offline
//! - `ping`: Check that the lead backend is reachable
//!
//! ## Example
//!
//! ```bash
//! # Point at a backend
//! equiprent init --api-base https://rentals.example.com
//!
//! # Fill the first two steps, then stop
//! equiprent request --zip 17601 --model not-sure --through 2
//!
//! # Finish later; the saved lead is updated, not duplicated
//! equiprent request --zip 17601 --model not-sure --start 2026-11-02 \
//!     --customer-type individual --first-name Ada --last-name Lovelace \
//!     --email ada@example.com --phone 7174252683
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{check, equipment, init, ping, request, reset, status, DraftArgs, Session};
use config::AppConfig;

/// Terminal front end for the equipment rental request flow.
#[derive(Parser, Debug)]
#[command(name = "equiprent")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data directory for the config file and saved draft
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use the in-process mock backend instead of HTTP (for testing/demo)
    #[arg(long, global = true)]
    mock: bool,

    /// Lead backend base URL (overrides the config file)
    #[arg(long, global = true, env = "EQUIPRENT_API_BASE")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a config file for the lead backend
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Walk the rental form, syncing each step as a lead
    Request {
        #[command(flatten)]
        draft: DraftArgs,

        /// Stop after this step (1-5) and keep the draft for later
        #[arg(long)]
        through: Option<u8>,
    },

    /// Show configuration and the saved draft
    Status,

    /// Discard the saved draft
    Reset,

    /// List equipment options
    Equipment {
        /// Read models from a JSON file instead of the backend
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Validate fields offline
    Check {
        #[command(flatten)]
        draft: DraftArgs,

        /// Print the lead payload that would be sent for the final step
        #[arg(long)]
        payload: bool,
    },

    /// Check that the lead backend is reachable
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // Determine data directory
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir)
        .await
        .context("Failed to create data directory")?;

    let api_base = cli.api_base.as_deref();
    let open_session = || -> Result<Session> {
        let config = AppConfig::load(&data_dir).context("Failed to load config")?;
        Ok(Session::new(&data_dir, config, api_base, cli.mock))
    };

    match cli.command {
        Commands::Init { force } => {
            init::run(&data_dir, api_base, force).await?;
        }
        Commands::Request { draft, through } => {
            request::run(&open_session()?, &draft, through).await?;
        }
        Commands::Status => {
            status::run(&open_session()?).await?;
        }
        Commands::Reset => {
            reset::run(&open_session()?).await?;
        }
        Commands::Equipment { catalog } => {
            equipment::run(&open_session()?, catalog.as_deref()).await?;
        }
        Commands::Check { draft, payload } => {
            check::run(&draft, payload)?;
        }
        Commands::Ping => {
            ping::run(&open_session()?).await?;
        }
    }

    Ok(())
}

/// Get the default data directory for equiprent.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "equiprent", "equiprent")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
