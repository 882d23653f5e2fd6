//! # Configuration Modules
//!
//! Settings that shape how the client talks to the service: base URL,
//! request headers and the optional transport timeout. The library never
//! reads files or environment variables itself; hosts build a
//! `ClientConfig` in code or hand it a JSON document they loaded.

/// Client configuration, defaults and validation.
pub mod config_client;

pub use config_client::{ClientConfig, ConfigError};
