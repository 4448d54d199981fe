use std::env;

use crate::cli::Cli;
use crate::db::DEFAULT_MAX_CONNECTIONS;

/// Default HTTP port when neither `--port` nor `API_PORT` is given.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// Resolve configuration from CLI flags, falling back to the process
    /// environment.
    pub fn load(cli: &Cli) -> Result<Self, String> {
        Self::from_sources(cli, |key| env::var(key).ok())
    }

    /// Resolve configuration from CLI flags and an arbitrary variable
    /// lookup. Flags win over variables.
    pub fn from_sources<F>(cli: &Cli, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match &cli.database_url {
            Some(url) => url.clone(),
            None => lookup("DATABASE_URL").ok_or("DATABASE_URL is required")?,
        };

        let port = match cli.port {
            Some(port) => port,
            None => match lookup("API_PORT") {
                Some(raw) => raw
                    .parse::<u16>()
                    .map_err(|_| format!("API_PORT must be a valid port, got {}", raw))?,
                None => DEFAULT_PORT,
            },
        };

        let max_connections = match cli.max_connections {
            Some(n) => n,
            None => match lookup("DB_MAX_CONNECTIONS") {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number")?,
                None => DEFAULT_MAX_CONNECTIONS,
            },
        };

        if max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        Ok(Self {
            database_url,
            port,
            max_connections,
        })
    }
}
