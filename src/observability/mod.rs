//! Observability module
//!
//! Structured logging for `stylecfg` operations.

pub mod logging;

pub use logging::{LogFormat, init_logging};
