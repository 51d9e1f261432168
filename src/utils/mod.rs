//! Configuration and startup utilities.

/// Environment-driven process configuration.
pub mod config;
/// Startup download of the supermarket reference data.
pub mod supermarkets;
