//! # aura-web
//!
//! Aura migraine tracker server binary — opens the database, runs
//! migrations, and starts the HTTP server.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use aura_server::config::{config_path, load_config_from_path};
use aura_server::server::AuraServer;
use aura_store::{ConnectionConfig, TrackerStore};

/// Aura migraine tracker server.
#[derive(Parser, Debug)]
#[command(name = "aura-web", about = "Aura migraine tracker server")]
struct Cli {
    /// Host to bind (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (0 for auto-assign; overrides config).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the `SQLite` database (overrides config).
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Log level filter (overrides config).
    #[arg(long)]
    log_level: Option<String>,

    /// Path to the JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn default_db_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home).join(".aura").join("aura.db")
    }
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Config file first, then CLI flags override field by field.
    let config_file = args.config.unwrap_or_else(config_path);
    let mut config = load_config_from_path(&config_file)
        .with_context(|| format!("Failed to load config: {}", config_file.display()))?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(db_path) = args.db_path {
        config.db_path = Some(db_path);
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }

    aura_core::logging::init_subscriber(&config.log_level);

    // Database — created on first run.
    let db_path = config.db_path.clone().unwrap_or_else(Cli::default_db_path);
    ensure_parent_dir(&db_path)?;
    let pool = aura_store::new_file(&db_path.to_string_lossy(), &ConnectionConfig::default())
        .context("Failed to open database")?;
    {
        let conn = pool.get().context("Failed to get DB connection")?;
        let _ = aura_store::run_migrations(&conn).context("Failed to run migrations")?;
    }

    let store = TrackerStore::new(pool);
    let server = AuraServer::new(config, store);

    let (addr, handle) = server.listen().await.context("Failed to bind server")?;
    tracing::info!("Aura listening on http://{addr}");

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().shutdown();
    let _ = handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
