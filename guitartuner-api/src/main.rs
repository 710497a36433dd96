//! guitartuner-api - REST backend for a guitar learning app
//!
//! Serves the song catalog and the chord diagram reference table over HTTP.
//! Startup resolves configuration (command line and environment, then the
//! TOML file, then defaults), opens the configured store, seeds empty tables
//! and serves until Ctrl+C or SIGTERM. Any bootstrap failure is fatal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use guitartuner_common::config::{
    load_toml_config, Config, ConfigOverrides, StoreConfig, StoreKind,
};
use guitartuner_common::store::SqliteStore;
use guitartuner_common::Store;
use guitartuner_api::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for guitartuner-api
#[derive(Parser, Debug)]
#[command(name = "guitartuner-api")]
#[command(about = "REST backend for songs and guitar chord diagrams")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Storage backend (sqlite or mysql)
    #[arg(long, env = "GT_STORE")]
    store: Option<StoreKind>,

    /// SQLite database file
    #[arg(long, env = "GT_DATABASE_PATH")]
    database_path: Option<PathBuf>,

    /// MySQL host
    #[arg(long, env = "DB_HOST")]
    db_host: Option<String>,

    /// MySQL port
    #[arg(long, env = "DB_PORT")]
    db_port: Option<u16>,

    /// MySQL user
    #[arg(long, env = "DB_USER")]
    db_user: Option<String>,

    /// MySQL password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    db_password: Option<String>,

    /// MySQL database name
    #[arg(long, env = "DB_NAME")]
    db_name: Option<String>,

    /// Connection pool size
    #[arg(long, env = "GT_MAX_CONNECTIONS")]
    max_connections: Option<u32>,

    /// Skip inserting sample songs and chords into empty tables
    #[arg(long, env = "GT_NO_SEED")]
    no_seed: bool,

    /// TOML configuration file
    #[arg(short, long, env = "GT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, env = "GT_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            store: self.store,
            database_path: self.database_path.clone(),
            mysql_host: self.db_host.clone(),
            mysql_port: self.db_port,
            mysql_user: self.db_user.clone(),
            mysql_password: self.db_password.clone(),
            mysql_database: self.db_name.clone(),
            max_connections: self.max_connections,
            no_seed: self.no_seed,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config =
        load_toml_config(args.config.as_deref()).context("Failed to load configuration file")?;
    let config = Config::resolve(&args.overrides(), toml_config.as_ref())
        .context("Invalid configuration")?;

    // RUST_LOG wins over the configured level
    let level = &config.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "guitartuner_api={level},guitartuner_common={level},tower_http={level}"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Guitar Tuner API (guitartuner-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let store = match open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize store: {:#}", e);
            return Err(e);
        }
    };

    let app = build_router(AppState::new(store));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("guitartuner-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Open the configured store and seed it when enabled
async fn open_store(config: &Config) -> Result<Arc<dyn Store>> {
    match &config.store {
        StoreConfig::Sqlite { path } => {
            info!("Database path: {}", path.display());
            let store = SqliteStore::open(path, config.max_connections)
                .await
                .context("Failed to open SQLite database")?;

            if config.seed_sample_data {
                let report = store.seed().await.context("Failed to seed sample data")?;
                info!(
                    "Seed complete: {} songs, {} chords inserted",
                    report.songs, report.chords
                );
            }

            Ok(Arc::new(store))
        }
        StoreConfig::MySql(settings) => open_mysql(settings, config).await,
    }
}

#[cfg(feature = "mysql")]
async fn open_mysql(
    settings: &guitartuner_common::config::MySqlSettings,
    config: &Config,
) -> Result<Arc<dyn Store>> {
    use guitartuner_common::store::MySqlStore;

    let store = MySqlStore::connect(settings, config.max_connections)
        .await
        .context("Failed to connect to MySQL")?;

    if config.seed_sample_data {
        let report = store.seed().await.context("Failed to seed sample data")?;
        info!(
            "Seed complete: {} songs, {} chords inserted",
            report.songs, report.chords
        );
    }

    Ok(Arc::new(store))
}

#[cfg(not(feature = "mysql"))]
async fn open_mysql(
    _settings: &guitartuner_common::config::MySqlSettings,
    _config: &Config,
) -> Result<Arc<dyn Store>> {
    anyhow::bail!("MySQL store requested but this binary was built without the `mysql` feature")
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
