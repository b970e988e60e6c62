//! Process configuration loaded from the environment.
//!
//! Tokens, the webhook secret, and endpoint overrides are read once at
//! startup into an immutable [`Config`] that is passed explicitly into each
//! component. Nothing reads the environment after startup.
//!
//! # Variables
//!
//! - `GITHUB_TOKEN` (required) - token for GitHub API calls
//! - `GROQ_API_KEY` (required) - API key for the completion endpoint
//! - `GITHUB_WEBHOOK_SECRET` - webhook shared secret; empty or unset
//!   disables signature verification
//! - `REVIEW_MODEL` - chat model to request
//! - `GITHUB_API_BASE`, `GROQ_API_BASE` - endpoint overrides
//! - `BIND_ADDR` - listen address for the HTTP server

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// `BIND_ADDR` is not a valid socket address.
    #[error("invalid BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Immutable process configuration.
///
/// Constructed once at startup; every component that needs a credential or
/// an endpoint receives it from here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token for GitHub API calls (`Authorization: token ...`).
    pub github_token: String,

    /// API key for the completion endpoint (`Authorization: Bearer ...`).
    pub groq_api_key: String,

    /// Shared secret for webhook signature verification.
    /// Empty disables verification.
    pub webhook_secret: String,

    /// Chat model requested from the completion endpoint.
    pub model: String,

    /// Base URL for the GitHub REST API.
    pub github_api_base: String,

    /// Base URL for the Groq API.
    pub groq_api_base: String,

    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads configuration through a lookup function.
    ///
    /// `from_env` passes `env::var`; tests pass a closure over a map so they
    /// don't mutate the process environment.
    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let require = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(ConfigError::MissingVar(name)),
            }
        };
        let or_default =
            |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let bind_addr_str = or_default("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr_str
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_addr_str,
                source,
            })?;

        Ok(Config {
            github_token: require("GITHUB_TOKEN")?,
            groq_api_key: require("GROQ_API_KEY")?,
            webhook_secret: lookup("GITHUB_WEBHOOK_SECRET").unwrap_or_default(),
            model: or_default("REVIEW_MODEL", DEFAULT_MODEL),
            github_api_base: or_default("GITHUB_API_BASE", DEFAULT_GITHUB_API_BASE),
            groq_api_base: or_default("GROQ_API_BASE", DEFAULT_GROQ_API_BASE),
            bind_addr,
        })
    }
}
