//! # Client Configuration
//!
//! Serde-backed settings for `HibpClient`. Field names use PascalCase on the
//! wire so they line up with the rest of the project's JSON configs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Base endpoint of the v2 API. Operation paths are appended to it.
pub const DEFAULT_BASE_URL: &str = "https://haveibeenpwned.com/api/v2/";

/// Versioned media type the service expects in the `Accept` header.
pub const DEFAULT_ACCEPT: &str = "application/vnd.haveibeenpwned.v2+json";

/// Product token sent as `User-Agent`. The service answers 403 without one.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "lib_hibp/",
    env!("CARGO_PKG_VERSION"),
    " (HIBP Rust API client library) - https://haveibeenpwned.com/API/v2"
);

/// Errors raised while loading or validating a `ClientConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration document is not valid JSON or has the wrong shape.
    #[error("JSON parse error: {0}")]
    JsonError(String),

    /// The base URL does not parse or cannot carry endpoint paths.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The offending value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A header value is empty or contains characters HTTP does not allow.
    #[error("Invalid {name} header value: {reason}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// # Client Configuration
///
/// Every field has a default, so a partial JSON document such as
/// `{"TimeoutSecs": 10}` is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClientConfig {
    /// Absolute http(s) URL ending in `/`.
    pub base_url: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Value of the `Accept` header.
    pub accept: String,
    /// Whole-request timeout applied to the transport. `None` keeps the
    /// transport's own default.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Parses a JSON document and validates the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::JsonError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the base URL. A missing trailing `/` is added.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    /// Replaces the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the transport timeout in whole seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// The transport timeout as a `Duration`, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Checks every field and returns the parsed base URL.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("scheme must be http or https"));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base"));
        }
        if !url.path().ends_with('/') {
            return Err(invalid("path must end with '/'"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed"));
        }

        check_header("User-Agent", &self.user_agent)?;
        check_header("Accept", &self.accept)?;

        Ok(url)
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClientConfig
    Base URL: {},
    User agent: {},
    Accept: {},
    Timeout: {:?}
",
            self.base_url, self.user_agent, self.accept, self.timeout_secs
        )
    }
}

fn check_header(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidHeader {
            name,
            reason: "value is empty".to_string(),
        });
    }
    // Visible ASCII plus space and tab.
    if let Some(bad) = value
        .chars()
        .find(|c| !(*c == '\t' || (' '..='~').contains(c)))
    {
        return Err(ConfigError::InvalidHeader {
            name,
            reason: format!("character {:?} is not allowed", bad),
        });
    }
    Ok(())
}
