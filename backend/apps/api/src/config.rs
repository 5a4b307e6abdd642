//! Server configuration
//!
//! Everything comes from environment variables (a `.env` file is loaded
//! first). Parsing goes through [`ApiConfig::from_lookup`] so it can be tested
//! without touching the process environment.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use kernel::email::Email;
use platform::password::{ClearTextPassword, DEFAULT_COST};
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SEED_NAME: &str = "Admin";

/// bcrypt accepts costs 4 through 31
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend `{other}`")),
        }
    }
}

/// Account created at startup when its email is not registered yet
pub struct SeedUser {
    pub name: String,
    pub email: Email,
    pub password: ClearTextPassword,
}

impl fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

pub struct ApiConfig {
    pub server_addr: SocketAddr,
    pub storage: StorageBackend,
    /// Present whenever `storage` is `Postgres`
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
    pub seed_user: Option<SeedUser>,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("server_addr", &self.server_addr)
            .field("storage", &self.storage)
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_secret", &"[REDACTED]")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("request_timeout", &self.request_timeout)
            .field("cors_origins", &self.cors_origins)
            .field("seed_user", &self.seed_user)
            .finish()
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    lookup(var).filter(|v| !v.trim().is_empty())
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server_addr = parse_or(
            &lookup,
            "SERVER_ADDR",
            SocketAddr::from(([0, 0, 0, 0], 8000)),
        )?;

        let storage = parse_or(&lookup, "STORAGE_BACKEND", StorageBackend::Postgres)?;

        let database_url = non_empty(&lookup, "DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let database_max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DATABASE_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", DEFAULT_COST)?;
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                var: "BCRYPT_COST",
                reason: format!(
                    "must be between {} and {}",
                    BCRYPT_COST_RANGE.start(),
                    BCRYPT_COST_RANGE.end()
                ),
            });
        }

        let timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                reason: "must be at least 1".into(),
            });
        }

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            server_addr,
            storage,
            database_url,
            database_max_connections,
            jwt_secret: lookup("JWT_SECRET").unwrap_or_default(),
            bcrypt_cost,
            request_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
            seed_user: Self::seed_user(&lookup)?,
        })
    }

    fn seed_user(lookup: &impl Fn(&str) -> Option<String>) -> Result<Option<SeedUser>, ConfigError> {
        let email = non_empty(lookup, "SEED_USER_EMAIL");
        let password = non_empty(lookup, "SEED_USER_PASSWORD");

        let (email, password) = match (email, password) {
            (None, None) => return Ok(None),
            (Some(_), None) => return Err(ConfigError::Missing("SEED_USER_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("SEED_USER_EMAIL")),
            (Some(email), Some(password)) => (email, password),
        };

        let email = Email::new(email).map_err(|e| ConfigError::Invalid {
            var: "SEED_USER_EMAIL",
            reason: e.to_string(),
        })?;
        let password = ClearTextPassword::new(password).map_err(|e| ConfigError::Invalid {
            var: "SEED_USER_PASSWORD",
            reason: e.to_string(),
        })?;
        let name = non_empty(lookup, "SEED_USER_NAME")
            .map(|n| n.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SEED_NAME.to_string());

        Ok(Some(SeedUser {
            name,
            email,
            password,
        }))
    }
}
