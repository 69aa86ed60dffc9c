//! Email verification records.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::{current_timestamp, storage_precision};
use crate::errors::DomainError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a verification code (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Purpose of a verification record, stored as an integer discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum VerificationDataType {
    /// Confirms ownership of the email address after sign-up
    MailConfirmation = 1,
    /// Authorizes a password reset
    PasswordReset = 2,
}

impl VerificationDataType {
    /// Integer value stored in the `type` column
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<VerificationDataType> for i32 {
    fn from(value: VerificationDataType) -> Self {
        value.as_i32()
    }
}

impl TryFrom<i32> for VerificationDataType {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VerificationDataType::MailConfirmation),
            2 => Ok(VerificationDataType::PasswordReset),
            other => Err(DomainError::Validation {
                message: format!("Unknown verification data type: {}", other),
            }),
        }
    }
}

/// A pending verification challenge for an email address
///
/// At most one record per (email, type) is expected to be live; nothing in
/// this crate enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct VerificationData {
    /// Email address the code was sent to
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    /// The short-lived code
    pub code: String,

    /// Timestamp after which the code is no longer accepted
    ///
    /// Stored at microsecond precision; finer digits are dropped on store.
    #[serde(rename = "expiresat")]
    pub expires_at: DateTime<Utc>,

    /// Purpose of this record
    #[serde(rename = "type")]
    pub kind: VerificationDataType,
}

impl VerificationData {
    /// Creates a record with a random 6-digit code and the default expiry
    pub fn new(email: impl Into<String>, kind: VerificationDataType) -> Self {
        Self::with_expiration(email, kind, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a record with a random 6-digit code expiring after `minutes`
    pub fn with_expiration(
        email: impl Into<String>,
        kind: VerificationDataType,
        minutes: i64,
    ) -> Self {
        Self {
            email: email.into(),
            code: Self::generate_code(),
            expires_at: current_timestamp() + Duration::minutes(minutes),
            kind,
        }
    }

    fn generate_code() -> String {
        let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }

    /// Copy of this record as the store keeps it
    pub fn at_storage_precision(&self) -> Self {
        Self {
            expires_at: storage_precision(self.expires_at),
            ..self.clone()
        }
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks a submitted code against this record
    ///
    /// Expired records never match. The comparison runs in constant time.
    pub fn matches(&self, input_code: &str) -> bool {
        !self.is_expired()
            && constant_time_eq::constant_time_eq(self.code.as_bytes(), input_code.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_verification_data() {
        let data = VerificationData::new("ada@example.com", VerificationDataType::MailConfirmation);

        assert_eq!(data.email, "ada@example.com");
        assert_eq!(data.code.len(), CODE_LENGTH);
        assert!(data.code.chars().all(|c| c.is_ascii_digit()));
        assert!(!data.is_expired());
        assert!(data.expires_at > Utc::now() + Duration::minutes(DEFAULT_EXPIRATION_MINUTES - 1));
    }

    #[test]
    fn test_expired_code_never_matches() {
        let data = VerificationData::with_expiration(
            "ada@example.com",
            VerificationDataType::PasswordReset,
            -1,
        );
        let code = data.code.clone();

        assert!(data.is_expired());
        assert!(!data.matches(&code));
    }

    #[test]
    fn test_matches() {
        let data = VerificationData::new("ada@example.com", VerificationDataType::PasswordReset);
        let code = data.code.clone();

        assert!(data.matches(&code));
        assert!(!data.matches("not-a-code"));
        assert!(!data.matches(""));
    }

    #[test]
    fn test_at_storage_precision_drops_nanoseconds() {
        let mut data = VerificationData::new("ada@example.com", VerificationDataType::PasswordReset);
        data.expires_at = data.expires_at + Duration::nanoseconds(789);

        let stored = data.at_storage_precision();
        assert_eq!(stored.expires_at.timestamp_subsec_nanos() % 1_000, 0);
        assert_eq!(stored.expires_at, data.expires_at - Duration::nanoseconds(789));
        assert_eq!(stored.code, data.code);
    }
}
