//! `labor-ledger` entry-point.
//!
//! Available sub-commands:
//! - `serve`   — create the tables if needed, then start the API server.
//! - `migrate` — create the tables and exit.

mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use db::{MemoryStore, MySqlStore, Store};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{DbArgs, ServeArgs};

#[derive(Parser)]
#[command(
    name = "labor-ledger",
    about = "Worker payment records over a small REST API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve(ServeArgs),
    /// Create the database tables if they do not exist.
    Migrate(DbArgs),
}

async fn connect(db: &DbArgs) -> anyhow::Result<db::DbPool> {
    let options = db.connect_options().context("invalid database settings")?;
    let pool = db::pool::create_pool(options, db.max_connections)
        .await
        .context("failed to connect to database")?;
    db::pool::ensure_schema(&pool)
        .await
        .context("failed to create tables")?;
    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => {
            let store: Arc<dyn Store> = if args.in_memory {
                warn!("Using in-memory store; data is lost on exit");
                Arc::new(MemoryStore::new())
            } else {
                Arc::new(MySqlStore::new(connect(&args.db).await?))
            };

            let public_dir = args.public_dir.is_dir().then(|| args.public_dir.clone());
            if public_dir.is_none() {
                warn!("Static directory {} not found; serving API only", args.public_dir.display());
            }

            let bind = args.bind_addr();
            info!("Starting API server on {bind}");
            api::serve(&bind, store, public_dir).await?;
        }
        Command::Migrate(db) => {
            connect(&db).await?;
            info!("Database tables are in place");
        }
    }

    Ok(())
}
