//! # Data Retrieval Module
//!
//! This module holds the generic HTTP plumbing shared by every endpoint
//! operation: URL construction, the fixed request headers, the single
//! blocking GET, JSON decoding and the status-code diagnostics.
//!
//! ## Contained Modules:
//!
//! - **`api_client`**: A blocking `ApiClient` built on `reqwest::blocking`.
//!   It performs exactly one request per call and returns either an
//!   `ApiResponse<T>` or a `HibpError`. There is no retry middleware here:
//!   the caller decides what to do with a failure.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Generic blocking JSON executor for the HIBP API.
pub mod api_client;
