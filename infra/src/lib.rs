//! # Infrastructure Layer
//!
//! Concrete storage for the account store:
//! - **Database**: PostgreSQL connection pool and `AccountRepository`
//!   implementation using SQLx
//! - **Config**: layered configuration loading (`.env`, config files,
//!   `ACCOUNT__*` environment variables)
//! - **Logging**: tracing subscriber installation

// Re-export core types for convenience
pub use acct_core::errors::*;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

/// Configuration loading
pub mod config;

/// Tracing subscriber setup
pub mod logging;

pub use database::{DatabasePool, PoolStatistics, PostgresAccountRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<::config::ConfigError> for InfrastructureError {
    fn from(err: ::config::ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}
