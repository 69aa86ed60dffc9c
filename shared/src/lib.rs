//! Shared configuration types for the account store
//!
//! This crate holds the plain configuration values used by the other
//! workspace crates:
//! - Database connection and pool settings
//! - Environment detection and logging settings

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig};
