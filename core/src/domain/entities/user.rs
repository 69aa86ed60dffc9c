//! User entity representing one account in the store.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Truncates `timestamp` to microseconds, the resolution of `TIMESTAMPTZ`.
///
/// Both repository implementations store timestamps at this resolution.
pub fn storage_precision(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(6)
}

/// Current time at storage precision.
///
/// Timestamps assigned through this function survive a round trip through
/// the database unchanged.
pub fn current_timestamp() -> DateTime<Utc> {
    storage_precision(Utc::now())
}

/// User entity representing a registered account
///
/// Serialized keys are the lowercase field names used by the external
/// payloads (`tokenhash`, `isverified`, `createdat`, `updatedat`).
///
/// The JSON form is not symmetric: `password` is read from input but never
/// written, so serializing and deserializing a user yields an empty
/// password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Unique identifier, assigned once when the user is created
    pub id: Uuid,

    /// Email address, the unique lookup key
    pub email: String,

    /// Stored password representation
    ///
    /// Accepted on input, never serialized on output. Callers are expected
    /// to store a hash produced by [`crate::credentials::hash_password`].
    #[serde(skip_serializing)]
    pub password: String,

    /// Display name, mutable
    pub username: String,

    /// Hash of the last issued reset/verification token
    #[serde(rename = "tokenhash")]
    pub token_hash: String,

    /// Whether the email address has been verified
    #[serde(rename = "isverified")]
    pub is_verified: bool,

    /// Timestamp when the user was created
    #[serde(rename = "createdat")]
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    #[serde(rename = "updatedat")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an unsaved user
    ///
    /// The id stays nil until a repository assigns one on create.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: Uuid::nil(),
            email: email.into(),
            password: password.into(),
            username: username.into(),
            token_hash: String::new(),
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assigns a fresh identifier and creation/update timestamps
    pub fn assign_identity(&mut self) {
        let now = current_timestamp();
        self.id = Uuid::new_v4();
        self.created_at = now;
        self.updated_at = now;
    }

    /// Advances the update timestamp, never moving it backwards
    pub fn touch(&mut self) {
        self.updated_at = current_timestamp().max(self.updated_at);
    }

    /// Whether a repository has assigned this user an identifier
    pub fn is_persisted(&self) -> bool {
        !self.id.is_nil()
    }
}
