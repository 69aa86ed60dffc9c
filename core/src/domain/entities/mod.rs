//! Domain entities representing persisted account records.

pub mod user;
pub mod verification;

#[cfg(test)]
mod tests;

pub use user::{current_timestamp, storage_precision, User};
pub use verification::{
    VerificationData, VerificationDataType, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
};
