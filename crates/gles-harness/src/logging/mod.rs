//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else in the harness talks to
//! the `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig};
