/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables and
 * opens the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * | Variable | Required | Default |
 * |---|---|---|
 * | `DATABASE_URL` | yes | - |
 * | `JWT_SECRET` | yes | - |
 * | `SERVER_PORT` | no | 3000 |
 * | `BCRYPT_COST` | no | 10 |
 * | `TOKEN_TTL_HOURS` | no | 24 |
 * | `DATABASE_MAX_CONNECTIONS` | no | 5 |
 *
 * Secrets have no fallback: a missing `JWT_SECRET` or `DATABASE_URL` stops
 * the server from starting.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection URL, e.g. `sqlite://blog.db` or `sqlite::memory:`
    pub database_url: String,
    /// HMAC secret used to sign bearer tokens
    pub jwt_secret: String,
    pub port: u16,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Bearer token validity window in hours
    pub token_ttl_hours: i64,
    pub max_connections: u32,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(port) = parse_var(&lookup, "SERVER_PORT")? {
            builder = builder.port(port);
        }
        if let Some(cost) = parse_var(&lookup, "BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(hours) = parse_var(&lookup, "TOKEN_TTL_HOURS")? {
            builder = builder.token_ttl_hours(hours);
        }
        if let Some(max) = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")? {
            builder = builder.max_connections(max);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                message: format!("must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}"),
            });
        }
        if self.token_ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_HOURS",
                message: "must be positive".to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Token validity window
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                message: e.to_string(),
            }),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    port: Option<u16>,
    bcrypt_cost: Option<u32>,
    token_ttl_hours: Option<i64>,
    max_connections: Option<u32>,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            database_url: self
                .database_url
                .ok_or(ConfigError::MissingValue("DATABASE_URL"))?,
            jwt_secret: self
                .jwt_secret
                .ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            port: self.port.unwrap_or(DEFAULT_PORT),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            token_ttl_hours: self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
            max_connections: self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Open the SQLite pool and create the schema
///
/// Foreign keys are switched on for every connection so that deleting a user
/// or a post cascades to the rows that reference it. In-memory databases
/// exist per connection, so they are pinned to a single connection that is
/// never recycled.
pub async fn open_database(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = url.contains(":memory:") || url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
    };

    tracing::info!("Connecting to database...");
    let pool = pool_options.connect_with(options).await?;

    tracing::info!("Applying database schema...");
    sqlx::raw_sql(include_str!("schema.sql"))
        .execute(&pool)
        .await?;
    tracing::info!("Database ready");

    Ok(pool)
}
