//! # Breach Data Module
//!
//! Everything specific to the Have I Been Pwned service lives here.
//!
//! ## Contained Modules:
//!
//! - **`models`**: `Breach`, `Paste` and the data class taxonomy, decoded
//!   straight from the service's PascalCase JSON.
//! - **`hibp`**: `HibpClient`, one method per endpoint, all built on the
//!   generic executor in `retrieve`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Endpoint operations.
pub mod hibp;
/// Response record types.
pub mod models;
