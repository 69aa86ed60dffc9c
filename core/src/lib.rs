//! # Account Store Core
//!
//! Domain layer for the account store. This crate contains the persisted
//! record shapes, the repository contract the storage backends implement,
//! credential hashing helpers, and the error types shared by every layer.

pub mod credentials;
pub mod domain;
pub mod errors;
pub mod repositories;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
