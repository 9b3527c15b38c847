mod commands;
mod config;
mod render;
mod rest;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use clubplan_core::cache::CacheStore;
use clubplan_core::reconcile::MatchEdits;

use crate::config::Config;
use crate::rest::RestMatchStore;

#[derive(Parser)]
#[command(name = "clubplan")]
#[command(about = "Manage your club's match schedule: ICS imports, results, and the hosted match table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import ICS schedule files into the local cache
    Import {
        /// ICS files, processed in order
        files: Vec<PathBuf>,

        /// Team assigned to events whose title does not name one
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Show the unified schedule (remote and imported matches)
    Schedule {
        /// Only show this team
        #[arg(short, long)]
        team: Option<String>,

        /// Filter by team or opponent name
        #[arg(short, long)]
        search: Option<String>,

        /// Reference day for the matchday view (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,
    },
    /// Record a result (promotes an imported match)
    Result {
        /// Match id (remote id, or imported id / ICS UID)
        id: String,
        home: u32,
        away: u32,
    },
    /// Edit match details (promotes an imported match)
    Edit {
        id: String,

        #[arg(long)]
        team: Option<String>,

        #[arg(long)]
        opponent: Option<String>,

        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Create a remote match manually
    Add {
        team: String,
        opponent: String,
        /// Match date (YYYY-MM-DD)
        date: String,

        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },
    /// Remove a match (imported: from the cache, remote: from the store)
    Remove { id: String },
    /// Mark a remote match as canceled
    Cancel { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let cache_store = CacheStore::new(config.cache_path()?);

    match cli.command {
        Commands::Import { files, team } => {
            if files.is_empty() {
                anyhow::bail!("No files given");
            }
            commands::import::run(&cache_store, &files, team).await
        }
        Commands::Schedule {
            team,
            search,
            today,
        } => {
            let store = RestMatchStore::new(&config.store_url, &config.store_key)?;
            commands::schedule::run(&store, &cache_store, team, search, today).await
        }
        Commands::Result { id, home, away } => {
            let store = RestMatchStore::new(&config.store_url, &config.store_key)?;
            commands::result::run(&store, &cache_store, &id, home, away).await
        }
        Commands::Edit {
            id,
            team,
            opponent,
            time,
            location,
            description,
        } => {
            let store = RestMatchStore::new(&config.store_url, &config.store_key)?;
            let edits = MatchEdits {
                result: None,
                team,
                opponent,
                time,
                location,
                description,
            };
            commands::edit::run(&store, &cache_store, &id, edits).await
        }
        Commands::Add {
            team,
            opponent,
            date,
            time,
            location,
        } => {
            let store = RestMatchStore::new(&config.store_url, &config.store_key)?;
            commands::add::run(&store, team, opponent, date, time, location).await
        }
        Commands::Remove { id } => {
            let store = RestMatchStore::new(&config.store_url, &config.store_key)?;
            commands::remove::run(&store, &cache_store, &id).await
        }
        Commands::Cancel { id } => {
            let store = RestMatchStore::new(&config.store_url, &config.store_key)?;
            commands::cancel::run(&store, &id).await
        }
    }
}
