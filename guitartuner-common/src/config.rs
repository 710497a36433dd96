//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Explicit overrides (command-line arguments, each also readable from the
//!    environment by the binary)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! Resolution itself is a pure function of the overrides and the parsed TOML
//! file, so it can be tested without touching the process environment.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MYSQL_HOST: &str = "localhost";
pub const DEFAULT_MYSQL_PORT: u16 = 3306;
pub const DEFAULT_MYSQL_USER: &str = "root";
pub const DEFAULT_MYSQL_DATABASE: &str = "guitartuner";

const APP_DIR: &str = "guitartuner";
const DATABASE_FILE: &str = "guitartuner.db";

/// Which persistence backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Embedded file store
    #[default]
    Sqlite,
    /// Networked relational store
    Mysql,
}

impl FromStr for StoreKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "mysql" => Ok(StoreKind::Mysql),
            other => Err(Error::Config(format!(
                "Unknown store '{}' (expected sqlite or mysql)",
                other
            ))),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Sqlite => f.write_str("sqlite"),
            StoreKind::Mysql => f.write_str("mysql"),
        }
    }
}

/// Connection settings for the networked relational store
#[derive(Clone, PartialEq, Eq)]
pub struct MySqlSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

// Keep the password out of logs
impl fmt::Debug for MySqlSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Resolved store selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Sqlite { path: PathBuf },
    MySql(MySqlSettings),
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    /// Upper bound on concurrent store operations
    pub max_connections: u32,
    /// Insert sample songs and chord diagrams into empty tables at startup
    pub seed_sample_data: bool,
    pub log_level: String,
}

// ========================================
// TOML file
// ========================================

/// Bootstrap configuration file layout
///
/// ```toml
/// [server]
/// host = "127.0.0.1"
/// port = 5001
///
/// [store]
/// kind = "sqlite"
/// database_path = "/var/lib/guitartuner/guitartuner.db"
/// max_connections = 10
/// seed_sample_data = true
///
/// [store.mysql]
/// host = "localhost"
/// port = 3306
/// user = "root"
/// password = ""
/// database = "guitartuner"
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub store: StoreSection,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub kind: Option<StoreKind>,
    pub database_path: Option<PathBuf>,
    pub max_connections: Option<u32>,
    pub seed_sample_data: Option<bool>,
    pub mysql: MySqlSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MySqlSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
}

impl TomlConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

/// Locate the platform config file, if one exists
///
/// Checks the user config directory first (`~/.config/guitartuner/config.toml`
/// on Linux), then `/etc/guitartuner/config.toml` on Unix.
pub fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc").join(APP_DIR).join("config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Load the TOML config
///
/// An explicit path must exist and parse. Without one, the platform config
/// file is used when present; a malformed discovered file is skipped with a
/// warning.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    if let Some(path) = explicit {
        return TomlConfig::load(path).map(Some);
    }

    let Some(path) = find_config_file() else {
        return Ok(None);
    };

    match TomlConfig::load(&path) {
        Ok(config) => Ok(Some(config)),
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

/// OS-dependent default database file
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR).join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

// ========================================
// Resolution
// ========================================

/// Highest-priority settings, typically parsed from the command line and
/// environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub store: Option<StoreKind>,
    pub database_path: Option<PathBuf>,
    pub mysql_host: Option<String>,
    pub mysql_port: Option<u16>,
    pub mysql_user: Option<String>,
    pub mysql_password: Option<String>,
    pub mysql_database: Option<String>,
    pub max_connections: Option<u32>,
    /// Disable seeding regardless of the file setting
    pub no_seed: bool,
    pub log_level: Option<String>,
}

impl Config {
    /// Merge overrides, the TOML file and compiled defaults
    pub fn resolve(overrides: &ConfigOverrides, file: Option<&TomlConfig>) -> Result<Self> {
        let empty = TomlConfig::default();
        let file = file.unwrap_or(&empty);

        let host = overrides
            .host
            .clone()
            .or_else(|| file.server.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = overrides
            .port
            .or(file.server.port)
            .unwrap_or(DEFAULT_PORT);

        let kind = overrides.store.or(file.store.kind).unwrap_or_default();

        let store = match kind {
            StoreKind::Sqlite => StoreConfig::Sqlite {
                path: overrides
                    .database_path
                    .clone()
                    .or_else(|| file.store.database_path.clone())
                    .unwrap_or_else(default_database_path),
            },
            StoreKind::Mysql => {
                let section = &file.store.mysql;
                StoreConfig::MySql(MySqlSettings {
                    host: overrides
                        .mysql_host
                        .clone()
                        .or_else(|| section.host.clone())
                        .unwrap_or_else(|| DEFAULT_MYSQL_HOST.to_string()),
                    port: overrides
                        .mysql_port
                        .or(section.port)
                        .unwrap_or(DEFAULT_MYSQL_PORT),
                    user: overrides
                        .mysql_user
                        .clone()
                        .or_else(|| section.user.clone())
                        .unwrap_or_else(|| DEFAULT_MYSQL_USER.to_string()),
                    password: overrides
                        .mysql_password
                        .clone()
                        .or_else(|| section.password.clone())
                        .unwrap_or_default(),
                    database: overrides
                        .mysql_database
                        .clone()
                        .or_else(|| section.database.clone())
                        .unwrap_or_else(|| DEFAULT_MYSQL_DATABASE.to_string()),
                })
            }
        };

        let max_connections = overrides
            .max_connections
            .or(file.store.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if max_connections == 0 {
            return Err(Error::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        let seed_sample_data =
            !overrides.no_seed && file.store.seed_sample_data.unwrap_or(true);

        let log_level = overrides
            .log_level
            .clone()
            .or_else(|| file.logging.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            host,
            port,
            store,
            max_connections,
            seed_sample_data,
            log_level,
        })
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
