//! Domain error types shared by every repository implementation.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed driver error carried as the source of a storage failure
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors surfaced by the account store
///
/// Lookups that match no row report [`DomainError::NotFound`]; anything else
/// the backing store reports (constraint violations, connectivity, decoding)
/// is a [`DomainError::Storage`] that keeps the driver error as its source.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Not-found error for the named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Storage error wrapping the underlying driver error
    pub fn storage<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        DomainError::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Storage error with no underlying driver error
    pub fn storage_message(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Whether a lookup matched zero rows
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    /// Whether the backing store reported the failure
    pub fn is_storage(&self) -> bool {
        matches!(self, DomainError::Storage { .. })
    }

    /// The driver error behind a storage failure, if it is of type `E`
    pub fn storage_source<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            DomainError::Storage {
                source: Some(source),
                ..
            } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
