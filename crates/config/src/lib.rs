//! Configuration management for the DMS client.
//!
//! This crate provides types and an environment-based loader for the
//! connection settings of a d.velop-style document management system:
//! hostname, API key, optional repository id, timeouts and cache policy
//! knobs.

pub mod constants;
mod loader;
mod types;

pub use loader::{ConfigError, ConfigLoader};
pub use types::{AuthConfig, Config, ConnectionConfig};
