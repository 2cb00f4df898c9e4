//! Grouping Common Utilities
//!
//! Shared infrastructure for all grouping crates:
//! - Error types and result aliases
//! - Elapsed-time instrumentation
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;
pub mod timing;

pub use config::*;
pub use error::*;
pub use timing::*;
