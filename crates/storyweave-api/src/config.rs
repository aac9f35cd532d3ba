//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 1800;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Settings the server needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the upstream story backend.
    pub story_api_endpoint: String,
    /// Bearer token forwarded to the backend, if any.
    pub story_api_token: Option<String>,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// How long a session may sit untouched before it is evicted.
    pub session_idle_timeout: Duration,
    /// Per-request timeout for backend calls.
    pub upstream_timeout: Duration,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `STORY_API_ENDPOINT` is unset or any
    /// numeric setting does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let story_api_endpoint = lookup("STORY_API_ENDPOINT")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("STORY_API_ENDPOINT environment variable must be set".into())
            })?;
        let story_api_token = lookup("STORY_API_TOKEN").filter(|value| !value.trim().is_empty());
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let session_idle_timeout = seconds_or(
            &lookup,
            "SESSION_IDLE_TIMEOUT_SECS",
            DEFAULT_SESSION_IDLE_TIMEOUT_SECS,
        )?;
        let upstream_timeout =
            seconds_or(&lookup, "UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;

        Ok(Self {
            story_api_endpoint,
            story_api_token,
            host,
            port,
            session_idle_timeout,
            upstream_timeout,
        })
    }

    /// Address the server listens on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if host and port do not form a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}

fn seconds_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<Duration, AppError> {
    match parse_or(lookup, key, default)? {
        0 => Err(AppError::Config(format!("{key} must be at least 1 second"))),
        secs => Ok(Duration::from_secs(secs)),
    }
}
