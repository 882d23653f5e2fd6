//! # lib_hibp
//!
//! A blocking client for the Have I Been Pwned v2 REST API. Modules are gated
//! by folder-level features so hosts only pull the dependencies they need.
//!
//! ```no_run
//! use lib_hibp::breaches::hibp::{BreachQuery, HibpClient};
//!
//! let client = HibpClient::new()?;
//! let response = client.breaches_for_account("test@example.com", &BreachQuery::default())?;
//! for breach in response.data.unwrap_or_default() {
//!     println!("{}", breach);
//! }
//! println!("{}", response.diagnostic);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Client configuration and its validation.
#[cfg(feature = "configs")]
pub mod configs;

/// Generic blocking JSON executor and status diagnostics.
#[cfg(feature = "retrieve")]
pub mod retrieve;

/// Breach, paste and data class models plus the endpoint operations.
#[cfg(feature = "breaches")]
pub mod breaches;

/// Structured logging setup for host programs.
#[cfg(feature = "loggers")]
pub mod loggers;

#[cfg(feature = "breaches")]
pub use breaches::hibp::{BreachQuery, HibpClient};
#[cfg(feature = "breaches")]
pub use breaches::models::{Breach, Paste};
#[cfg(feature = "retrieve")]
pub use retrieve::api_client::{status_diagnostic, ApiResponse, HibpError, Parameters};
