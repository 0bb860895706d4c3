//! Process configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use crate::services::auth::DEFAULT_LOGIN_DELAY;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STORAGE_DIR: &str = ".cloudcycle";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Directory holding the persisted session record.
    pub storage_dir: PathBuf,
    /// Simulated latency of the mock authenticator.
    pub login_delay: Duration,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `CLOUDCYCLE_STORAGE_DIR`: default `.cloudcycle`
    /// - `LOGIN_DELAY_MS`: default 1000
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = parse_var("BIND_ADDR", env_opt("BIND_ADDR").as_deref())?
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = parse_var("PORT", env_opt("PORT").as_deref())?.unwrap_or(DEFAULT_PORT);
        let storage_dir = env_opt("CLOUDCYCLE_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);
        let login_delay = parse_var::<u64>("LOGIN_DELAY_MS", env_opt("LOGIN_DELAY_MS").as_deref())?
            .map_or(DEFAULT_LOGIN_DELAY, Duration::from_millis);

        Ok(Self { bind_addr, port, storage_dir, login_delay })
    }
}

/// Unset and blank variables read as `None`.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: Option<&str>) -> Result<Option<T>, ConfigError> {
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value: value.to_owned() })
    })
    .transpose()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
