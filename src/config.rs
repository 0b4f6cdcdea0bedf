//! Connection settings read from the environment.

use std::fmt;

use sqlx::postgres::PgConnectOptions;

use crate::error::{Error, Result};

/// Where the store connects and how many connections it may hold.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
    /// When set, every pooled connection runs `SET search_path TO <schema>`.
    pub schema: Option<String>,
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables (`DB_HOST`, `DB_PORT`,
    /// `DB_NAME`, `DB_USER`, `DB_PASSWORD`, `DB_SCHEMA`, `DB_MAX_CONNECTIONS`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset, same as a missing line in `.env`.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("DB_PORT must be a port number, got `{raw}`")))?,
            None => 5432,
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(Error::Config(format!(
                        "DB_MAX_CONNECTIONS must be a positive integer, got `{raw}`"
                    )))
                }
            },
            None => 1,
        };

        let schema = get("DB_SCHEMA").map(|s| s.trim().to_string());
        if let Some(schema) = &schema {
            if !is_identifier(schema) {
                return Err(Error::Config(format!(
                    "DB_SCHEMA must be a plain identifier, got `{schema}`"
                )));
            }
        }

        Ok(Self {
            host: get("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port,
            database: get("DB_NAME").unwrap_or_else(|| "staffsync_pro".into()),
            user: get("DB_USER").unwrap_or_else(|| "postgres".into()),
            password: get("DB_PASSWORD"),
            schema,
            max_connections,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);
        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("schema", &self.schema)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
