//! Server configuration.

use std::net::SocketAddr;
use std::num::ParseIntError;

/// Default listening port.
const DEFAULT_PORT: u16 = 8000;

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("{name} has invalid value {value:?}: {source}")]
    Invalid {
        name: &'static str,
        value: String,
        source: ParseIntError,
    },
}

/// Configuration for the HTTP server and its database connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Database connection string (`DATABASE_URL`)
    pub database_url: Option<String>,

    /// Database name (`DATABASE_NAME`)
    pub database_name: Option<String>,

    /// Port to listen on (`PORT`)
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration using `lookup` to fetch each variable.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(value) => value.trim().parse().map_err(|source| ConfigError::Invalid {
                name: "PORT",
                value,
                source,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
            port,
        })
    }

    /// Connection string and database name, if both are configured.
    pub fn database(&self) -> Option<(&str, &str)> {
        Some((self.database_url.as_deref()?, self.database_name.as_deref()?))
    }

    /// Address to bind the listener to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_name: None,
            port: DEFAULT_PORT,
        }
    }
}
