mod config;
mod logging;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::api::grpc;
use configuration::domain::service::{Service, ServiceConfig};
use configuration::infra::storage::{Migrator, SeaOrmConfigStore};
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, CliOverrides, DatabaseConfig, redact_credentials_in_dsn};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Configuration Server - client and global configuration over gRPC
#[derive(Parser)]
#[command(name = "configuration-server")]
#[command(about = "Configuration Server - client and global configuration over gRPC")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address override for the gRPC server (overrides config)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Database DSN override (overrides config and DB_* variables)
    #[arg(long)]
    dsn: Option<String>,

    /// Print effective configuration (JSON, credentials masked) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*, DB_*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        listen: cli.listen,
        dsn: cli.dsn.clone(),
        verbose: cli.verbose,
    });

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_pretty_json()?);
        return Ok(());
    }

    logging::init(&config.logging, cli.verbose > 0)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    println!("{}", config.to_pretty_json()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    tracing::info!("Configuration Server starting");

    let db = connect_database(&config.database).await?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run configuration migrations")?;

    let store = Arc::new(SeaOrmConfigStore::new(db));
    let service = Arc::new(Service::new(
        store,
        ServiceConfig::from(&config.configuration),
    ));

    let listener = TcpListener::bind(config.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen_addr))?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
        }
        shutdown.cancel();
    });

    grpc::serve(listener, service, cancel).await
}

async fn connect_database(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let dsn = cfg.effective_dsn();
    tracing::debug!(dsn = %redact_credentials_in_dsn(&dsn), "Connecting to database");

    let mut options = ConnectOptions::new(dsn);
    options
        .max_connections(cfg.max_conns)
        .acquire_timeout(Duration::from_millis(cfg.acquire_timeout_ms))
        .sqlx_logging(false);

    Database::connect(options)
        .await
        .context("Failed to connect to database")
}
