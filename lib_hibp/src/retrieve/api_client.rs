//! # HIBP HTTP Executor
//!
//! A blocking wrapper around `reqwest::blocking::Client` that knows the base
//! URL and the two fixed headers of the v2 API. Every call is one GET: no
//! retry middleware, no caching, no throttling. Failures are returned to the
//! caller as `HibpError`; nothing in here logs an error or exits the process.

use crate::configs::{ClientConfig, ConfigError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Query parameters for one request. Built per call, dropped once the URL
/// is assembled. The service treats the query string as a set.
pub type Parameters = BTreeMap<String, String>;

/// Diagnostic for HTTP 400.
pub const DIAG_BAD_REQUEST: &str =
    "Bad request — the account does not comply with an acceptable format (i.e. it's an empty string)";
/// Diagnostic for HTTP 403.
pub const DIAG_FORBIDDEN: &str = "Forbidden — no user agent has been specified in the request";
/// Diagnostic for HTTP 404.
pub const DIAG_NOT_FOUND: &str =
    "Not found — the account could not be found and has therefore not been pwned";
/// Diagnostic for HTTP 429.
pub const DIAG_TOO_MANY_REQUESTS: &str = "Too many requests — the rate limit has been exceeded";

/// Maps an HTTP status code to the reason the service documents for it.
/// Unlisted codes map to the empty string.
pub fn status_diagnostic(status: u16) -> &'static str {
    match status {
        400 => DIAG_BAD_REQUEST,
        403 => DIAG_FORBIDDEN,
        404 => DIAG_NOT_FOUND,
        429 => DIAG_TOO_MANY_REQUESTS,
        _ => "",
    }
}

/// The two ways a request can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HibpError {
    /// DNS, connect, timeout, body read or request construction failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The body is not JSON or does not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for HibpError {
    fn from(e: reqwest::Error) -> Self {
        HibpError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for HibpError {
    fn from(e: serde_json::Error) -> Self {
        HibpError::Decode(e.to_string())
    }
}

/// A decoded response together with its HTTP metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The decoded body. Present only for 2xx responses.
    pub data: Option<T>,
    /// Raw body of a non-2xx response, if the server sent one.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
    /// Human-readable reason derived from `status` (see `status_diagnostic`).
    pub diagnostic: &'static str,
    /// The headers returned by the server.
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    /// True when the service answered 404, i.e. the account or breach is unknown.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Blocking executor shared by every endpoint operation.
///
/// Holds only immutable state, so one instance can be used from several
/// threads at once.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The underlying blocking client.
    inner: Client,
    /// The base URL every endpoint path is appended to.
    base_url: Url,
    /// `Accept` and `User-Agent`, attached to every request.
    headers: HeaderMap,
}

impl ApiClient {
    /// Builds a client from `config`, applying its timeout to the transport.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Self::with_http_client(config, inner)
    }

    /// Builds a client around a caller-supplied transport. Timeouts and
    /// proxies configured on `inner` are kept; `config.timeout_secs` is not
    /// applied.
    pub fn with_http_client(config: &ClientConfig, inner: Client) -> Result<Self, ConfigError> {
        let base_url = config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value("Accept", &config.accept)?);
        headers.insert(USER_AGENT, header_value("User-Agent", &config.user_agent)?);

        Ok(Self {
            inner,
            base_url,
            headers,
        })
    }

    /// The base URL endpoint paths are appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the absolute URL for an endpoint.
    ///
    /// Each segment is percent-encoded on its own, so an account or breach
    /// name can never add path levels or start a query. `.` and `..` are
    /// rejected since they would address a different endpoint. An empty
    /// trailing segment yields a trailing `/`. The query string is appended
    /// only when `params` is non-empty.
    pub fn endpoint_url(&self, segments: &[&str], params: &Parameters) -> Result<Url, HibpError> {
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(HibpError::Transport(format!(
                "path segment '{}' is not allowed",
                dot
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HibpError::Transport(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }

    /// Performs one GET against the endpoint and decodes a 2xx body as `T`.
    ///
    /// Non-2xx responses are not decoded: they come back as `Ok` with
    /// `data == None`, the status, its diagnostic and the raw body text.
    ///
    /// # Errors
    /// `HibpError::Transport` if the request cannot be built, sent or read;
    /// `HibpError::Decode` if a 2xx body does not decode into `T`.
    pub fn get_json<T>(&self, segments: &[&str], params: &Parameters) -> Result<ApiResponse<T>, HibpError>
    where
        T: DeserializeOwned,
    {
        // 1. Construct the full absolute URL
        let url = self.endpoint_url(segments, params)?;
        debug!(%url, "Sending HIBP request");

        // 2. Execute the request and capture response metadata
        let response = self.inner.get(url).headers(self.headers.clone()).send()?;
        let status = response.status();
        let resp_headers = response.headers().clone();
        debug!(status = status.as_u16(), "HIBP response received");

        let diagnostic = status_diagnostic(status.as_u16());

        // 3. Decode only what the service marked as a success
        if status.is_success() {
            let body = response.text()?;
            let data = serde_json::from_str::<T>(&body)?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
                diagnostic,
                headers: resp_headers,
            })
        } else {
            // Capture the error body as a string for debugging; a failed read
            // must not hide the status
            let error_text = response.text().ok().filter(|body| !body.is_empty());
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
                diagnostic,
                headers: resp_headers,
            })
        }
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> ApiClient {
        ApiClient::new(&ClientConfig::default()).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn diagnostics_are_verbatim() {
        assert_eq!(
            status_diagnostic(400),
            "Bad request — the account does not comply with an acceptable format (i.e. it's an empty string)"
        );
        assert_eq!(
            status_diagnostic(403),
            "Forbidden — no user agent has been specified in the request"
        );
        assert_eq!(
            status_diagnostic(404),
            "Not found — the account could not be found and has therefore not been pwned"
        );
        assert_eq!(
            status_diagnostic(429),
            "Too many requests — the rate limit has been exceeded"
        );
    }

    #[test]
    fn unlisted_codes_have_no_diagnostic() {
        for code in [200, 201, 401, 500, 503] {
            assert_eq!(status_diagnostic(code), "");
        }
    }

    #[test]
    fn url_without_params_has_no_query() {
        let url = client()
            .endpoint_url(&["breachedaccount", "test@example.com"], &Parameters::new())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://haveibeenpwned.com/api/v2/breachedaccount/test@example.com"
        );
        assert_eq!(url.query(), None);
    }

    #[test]
    fn url_with_params_carries_every_pair() {
        let url = client()
            .endpoint_url(
                &["breachedaccount", "test@example.com"],
                &params(&[("domain", "adobe.com"), ("truncateResponse", "true")]),
            )
            .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("domain".to_string(), "adobe.com".to_string())));
        assert!(pairs.contains(&("truncateResponse".to_string(), "true".to_string())));
        assert_eq!(url.path(), "/api/v2/breachedaccount/test@example.com");
    }

    #[test]
    fn query_values_are_form_encoded() {
        let url = client()
            .endpoint_url(&["breaches"], &params(&[("domain", "a b&c.com")]))
            .unwrap();
        assert_eq!(url.query(), Some("domain=a+b%26c.com"));
    }

    #[test]
    fn segments_cannot_escape_their_level() {
        let url = client()
            .endpoint_url(&["breach", "../evil?x=1#frag"], &Parameters::new())
            .unwrap();
        assert_eq!(url.path(), "/api/v2/breach/..%2Fevil%3Fx=1%23frag");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn dot_segments_are_rejected() {
        let api = client();
        for segments in [["breach", ".."], ["breach", "."], ["pasteaccount", ".."]] {
            let result = api.endpoint_url(&segments, &Parameters::new());
            assert!(
                matches!(result, Err(HibpError::Transport(_))),
                "{:?} should not build a URL, got {:?}",
                segments,
                result
            );
        }
    }

    #[test]
    fn dots_inside_a_segment_are_kept() {
        let url = client()
            .endpoint_url(&["breachedaccount", "first.last@example.com"], &Parameters::new())
            .unwrap();
        assert_eq!(url.path(), "/api/v2/breachedaccount/first.last@example.com");
    }

    #[test]
    fn empty_trailing_segment_keeps_slash() {
        let url = client()
            .endpoint_url(&["pasteaccount", ""], &Parameters::new())
            .unwrap();
        assert_eq!(url.as_str(), "https://haveibeenpwned.com/api/v2/pasteaccount/");
    }

    #[test]
    fn base_url_on_root_path() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080");
        let api = ApiClient::new(&config).unwrap();
        let url = api.endpoint_url(&["breaches"], &Parameters::new()).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/breaches");
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = ClientConfig::default().with_user_agent("");
        assert!(matches!(
            ApiClient::new(&config),
            Err(ConfigError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn serde_errors_map_to_decode() {
        let err: HibpError = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert!(matches!(err, HibpError::Decode(_)));
    }
}
