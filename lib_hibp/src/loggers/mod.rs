//! # Logging Setup
//!
//! The library itself only emits `tracing` events. This module gives host
//! programs a one-call subscriber setup so those events become visible.

/// `tracing-subscriber` initialization for host programs.
pub mod tracing_init;

pub use tracing_init::{init_tracing, LogFormat};
