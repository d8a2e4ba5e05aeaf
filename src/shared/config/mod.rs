//! Application configuration module
//!
//! Settings are resolved in three layers: built-in defaults, an optional TOML
//! file named by `STOREFRONT_CONFIG`, then environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `DATABASE_URL` | unset (in-memory stores) |
//! | `JWT_SECRET` | development secret |
//! | `TOKEN_TTL_HOURS` | `720` |
//! | `BCRYPT_COST` | `12` |
//! | `STATIC_DIR` | `public` |

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Default token lifetime (30 days)
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 720;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Secret used when `JWT_SECRET` is not set
pub const DEV_JWT_SECRET: &str = "storefront-dev-secret-change-in-production";

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_VAR: &str = "STOREFRONT_CONFIG";

/// Longest accepted token lifetime, 100 years
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 100;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// PostgreSQL URL; `None` keeps everything in memory
    pub database_url: Option<String>,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub token_ttl_hours: i64,
    /// bcrypt cost for new password hashes
    pub bcrypt_cost: u32,
    /// Directory of static assets
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            static_dir: PathBuf::from("public"),
        }
    }
}

/// Shape of the optional TOML file; every key may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<i64>,
    bcrypt_cost: Option<u32>,
    static_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = match lookup(CONFIG_PATH_VAR) {
            Some(path) if !path.trim().is_empty() => AppConfigBuilder::from_file(Path::new(&path))?,
            _ => AppConfigBuilder::default(),
        };

        if let Some(host) = lookup("HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = lookup("PORT") {
            builder = builder.port(parse_var("PORT", &port)?);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            if !url.trim().is_empty() {
                builder = builder.database_url(url);
            }
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ttl) = lookup("TOKEN_TTL_HOURS") {
            builder = builder.token_ttl_hours(parse_var("TOKEN_TTL_HOURS", &ttl)?);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_var("BCRYPT_COST", &cost)?);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingValue("host"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(ConfigError::InvalidValue {
                key: "token_ttl_hours",
                message: format!(
                    "must be between 1 and {}, got {}",
                    MAX_TOKEN_TTL_HOURS, self.token_ttl_hours
                ),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "bcrypt_cost",
                message: format!("must be between 4 and 31, got {}", self.bcrypt_cost),
            });
        }
        Ok(())
    }

    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the built-in development secret is in use
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Start from the values in a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut builder = Self::default();
        if let Some(host) = file.host {
            builder = builder.host(host);
        }
        if let Some(port) = file.port {
            builder = builder.port(port);
        }
        if let Some(url) = file.database_url {
            builder = builder.database_url(url);
        }
        if let Some(secret) = file.jwt_secret {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ttl) = file.token_ttl_hours {
            builder = builder.token_ttl_hours(ttl);
        }
        if let Some(cost) = file.bcrypt_cost {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(dir) = file.static_dir {
            builder = builder.static_dir(dir);
        }
        Ok(builder)
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn token_ttl_hours(mut self, hours: i64) -> Self {
        self.config.token_ttl_hours = hours;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.static_dir = dir.into();
        self
    }

    /// Build the configuration, validating it
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key,
        message: format!("{raw:?}: {e}"),
    })
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}
