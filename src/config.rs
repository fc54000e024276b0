//! Server configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TASKHUB_HOST` | `0.0.0.0` | Listen address |
//! | `TASKHUB_PORT` | `3000` | Listen port |
//! | `STORAGE_MODE` | `in_memory` | `in_memory` or `postgres` |
//! | `DATABASE_URL` | none | Required when `STORAGE_MODE=postgres` |
//! | `DATABASE_POOL_SIZE` | `8` | Maximum pooled connections |
//! | `TASKHUB_PAGE_SIZE` | `10` | Tasks per list page, at least 1 |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

use crate::task::domain::DEFAULT_PAGE_SIZE;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_SIZE: u32 = 8;

/// Backing store for tasks, projects and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process memory; contents are lost on exit.
    #[default]
    InMemory,
    /// `PostgreSQL` through Diesel.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `STORAGE_MODE` holds an unknown value.
    #[error("invalid STORAGE_MODE: {0}")]
    InvalidStorageMode(String),

    /// `DATABASE_URL` is missing while postgres storage is selected.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// A variable could not be parsed.
    #[error("invalid {name}: {value}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Settings for the taskhub server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// Selected backing store.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: u32,
    /// Tasks per list page.
    pub page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            storage_mode: StorageMode::InMemory,
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment, loading a
    /// `.env` file first when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or a required
    /// one is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            tracing::warn!(error = %err, "ignoring unreadable .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is malformed or `DATABASE_URL` is
    /// missing for postgres storage.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();
        let page_size = parse_var(read("TASKHUB_PAGE_SIZE"), "TASKHUB_PAGE_SIZE")?
            .unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "TASKHUB_PAGE_SIZE",
                value: page_size.to_string(),
            });
        }

        let config = Self {
            host: parse_var(read("TASKHUB_HOST"), "TASKHUB_HOST")?.unwrap_or(defaults.host),
            port: parse_var(read("TASKHUB_PORT"), "TASKHUB_PORT")?.unwrap_or(defaults.port),
            storage_mode,
            database_url: read("DATABASE_URL"),
            pool_size: parse_var(read("DATABASE_POOL_SIZE"), "DATABASE_POOL_SIZE")?
                .unwrap_or(defaults.pool_size),
            page_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that settings required by the selected storage are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] for postgres storage
    /// without a URL.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.storage_mode, StorageMode::Postgres) && self.database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(())
    }

    /// Socket address the server binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: FromStr>(
    value: Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| ConfigError::InvalidValue { name, value: raw })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    fn empty_environment_yields_defaults() -> eyre::Result<()> {
        let config = AppConfig::from_lookup(lookup_from(&[]))?;
        eyre::ensure!(config == AppConfig::default(), "unexpected config {config:?}");
        eyre::ensure!(config.socket_addr().port() == 3000, "unexpected port");
        Ok(())
    }

    #[rstest]
    fn postgres_settings_are_read() -> eyre::Result<()> {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STORAGE_MODE", "PostgreSQL"),
            ("DATABASE_URL", " postgres://localhost/taskhub "),
            ("DATABASE_POOL_SIZE", "4"),
            ("TASKHUB_PORT", "8080"),
            ("TASKHUB_HOST", "127.0.0.1"),
            ("TASKHUB_PAGE_SIZE", "25"),
        ]))?;
        eyre::ensure!(config.storage_mode == StorageMode::Postgres, "mode");
        eyre::ensure!(
            config.database_url.as_deref() == Some("postgres://localhost/taskhub"),
            "url not trimmed"
        );
        eyre::ensure!(config.pool_size == 4, "pool size");
        eyre::ensure!(config.page_size == 25, "page size");
        eyre::ensure!(
            config.socket_addr() == SocketAddr::from(([127, 0, 0, 1], 8080)),
            "address"
        );
        Ok(())
    }

    #[rstest]
    #[case::missing_url(&[("STORAGE_MODE", "postgres")], ConfigError::MissingDatabaseUrl)]
    #[case::blank_url(
        &[("STORAGE_MODE", "postgres"), ("DATABASE_URL", "  ")],
        ConfigError::MissingDatabaseUrl
    )]
    #[case::unknown_mode(
        &[("STORAGE_MODE", "sqlite")],
        ConfigError::InvalidStorageMode("sqlite".to_owned())
    )]
    #[case::zero_page_size(
        &[("TASKHUB_PAGE_SIZE", "0")],
        ConfigError::InvalidValue { name: "TASKHUB_PAGE_SIZE", value: "0".to_owned() }
    )]
    #[case::bad_port(
        &[("TASKHUB_PORT", "http")],
        ConfigError::InvalidValue { name: "TASKHUB_PORT", value: "http".to_owned() }
    )]
    fn invalid_environments_are_rejected(
        #[case] pairs: &[(&str, &str)],
        #[case] expected: ConfigError,
    ) {
        assert_eq!(AppConfig::from_lookup(lookup_from(pairs)), Err(expected));
    }
}
