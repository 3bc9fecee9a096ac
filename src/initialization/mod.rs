//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a scan:
//! - Logger
//! - DNS resolver
//!
//! All initialization functions return proper error types for error handling.

mod logger;
mod resolver;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::{default_resolver_timeout, init_resolver};
