//! # HIBP Endpoint Operations
//!
//! One method per v2 endpoint. Each method builds its path and parameters,
//! then hands off to the shared `ApiClient` executor, so every call is a
//! single blocking GET with no retries.

use crate::breaches::models::{Breach, DataClasses, Paste};
use crate::configs::{ClientConfig, ConfigError};
use crate::retrieve::api_client::{ApiClient, ApiResponse, HibpError, Parameters};
use reqwest::blocking::Client;

/// Optional filters for `breachedaccount/{account}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreachQuery {
    /// Restrict results to breaches of this domain.
    pub domain: Option<String>,
    /// Ask the service to return only breach names.
    pub truncate_response: bool,
    /// Include breaches not yet flagged as verified.
    pub include_unverified: bool,
}

impl BreachQuery {
    /// Restricts results to one breached domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Requests name-only breach records.
    pub fn truncated(mut self) -> Self {
        self.truncate_response = true;
        self
    }

    /// Includes unverified breaches.
    pub fn unverified(mut self) -> Self {
        self.include_unverified = true;
        self
    }

    /// Query parameters for this filter set. Flags are only sent when set.
    pub fn to_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        if let Some(domain) = &self.domain {
            params.insert("domain".to_string(), domain.clone());
        }
        if self.truncate_response {
            params.insert("truncateResponse".to_string(), "true".to_string());
        }
        if self.include_unverified {
            params.insert("includeUnverified".to_string(), "true".to_string());
        }
        params
    }
}

/// Client for the Have I Been Pwned v2 API.
///
/// Stateless apart from its configuration, so it can be shared between
/// threads by reference or cloned cheaply.
#[derive(Debug, Clone)]
pub struct HibpClient {
    api: ApiClient,
}

impl HibpClient {
    /// A client with the default base URL and headers.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(&ClientConfig::default())
    }

    /// A client built from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    /// A client that sends requests through a caller-configured transport.
    pub fn with_http_client(config: &ClientConfig, http: Client) -> Result<Self, ConfigError> {
        Ok(Self {
            api: ApiClient::with_http_client(config, http)?,
        })
    }

    /// The underlying executor, for endpoints this type does not cover.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Every breach `account` appears in, in server order.
    ///
    /// A 404 means the account was not found in any breach; it comes back as
    /// `Ok` with `data == None` and the not-found diagnostic.
    pub fn breaches_for_account(
        &self,
        account: &str,
        query: &BreachQuery,
    ) -> Result<ApiResponse<Vec<Breach>>, HibpError> {
        self.api
            .get_json(&["breachedaccount", account], &query.to_parameters())
    }

    /// All breaches in the system, optionally only those of `domain`.
    pub fn breaches(&self, domain: Option<&str>) -> Result<ApiResponse<Vec<Breach>>, HibpError> {
        let mut params = Parameters::new();
        if let Some(domain) = domain {
            params.insert("domain".to_string(), domain.to_string());
        }
        self.api.get_json(&["breaches"], &params)
    }

    /// A single breach by its `Name`. `data` is `None` when it does not exist.
    pub fn breach(&self, name: &str) -> Result<ApiResponse<Breach>, HibpError> {
        self.api.get_json(&["breach", name], &Parameters::new())
    }

    /// The taxonomy of data classes.
    ///
    /// Requests `pasteaccount/` with a trailing slash and no account, which
    /// is the path this client has always used for the taxonomy lookup.
    pub fn data_classes(&self) -> Result<ApiResponse<DataClasses>, HibpError> {
        self.api.get_json(&["pasteaccount", ""], &Parameters::new())
    }

    /// Every paste `account` was found in, in server order.
    pub fn pastes_for_account(&self, account: &str) -> Result<ApiResponse<Vec<Paste>>, HibpError> {
        self.api
            .get_json(&["pasteaccount", account], &Parameters::new())
    }
}
