//! Server configuration loaded from the environment.
//!
//! | Variable                   | Default   |
//! |----------------------------|-----------|
//! | `BACKEND_HOST`             | `0.0.0.0` |
//! | `BACKEND_PORT`             | `3000`    |
//! | `GAME_TTL_HOURS`           | `24`      |
//! | `GAME_SWEEP_INTERVAL_SECS` | `86400`   |
//! | `CORS_ALLOWED_ORIGINS`     | localhost |

use std::env;
use std::str::FromStr;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TTL_HOURS: u32 = 24;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Games idle for longer than this are swept.
    pub game_ttl_hours: u32,
    pub sweep_interval_secs: u64,
    /// Validated origins; empty means "localhost only".
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            game_ttl_hours: DEFAULT_TTL_HOURS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank values take the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = value("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(value("BACKEND_PORT"), "BACKEND_PORT", DEFAULT_PORT)?;
        let game_ttl_hours = parse_or(value("GAME_TTL_HOURS"), "GAME_TTL_HOURS", DEFAULT_TTL_HOURS)?;
        let sweep_interval_secs = parse_or(
            value("GAME_SWEEP_INTERVAL_SECS"),
            "GAME_SWEEP_INTERVAL_SECS",
            DEFAULT_SWEEP_INTERVAL_SECS,
        )?;
        if sweep_interval_secs == 0 {
            return Err(AppError::config(
                "GAME_SWEEP_INTERVAL_SECS must be greater than zero",
            ));
        }

        let cors_allowed_origins = value("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            game_ttl_hours,
            sweep_interval_secs,
            cors_allowed_origins,
        })
    }

    pub fn game_ttl(&self) -> time::Duration {
        time::Duration::hours(i64::from(self.game_ttl_hours))
    }

    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("{key} has an invalid value: {raw:?}"))),
    }
}

/// Comma-separated origins; anything that is not an http(s) URL is dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}
