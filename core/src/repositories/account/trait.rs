//! Account repository trait defining the interface for user and
//! verification record persistence.
//!
//! Every method maps to exactly one statement against the backing store.
//! Nothing here spans statements or holds state between calls.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::entities::verification::{VerificationData, VerificationDataType};
use crate::errors::DomainError;

/// Repository trait for account persistence operations
///
/// The caller's execution context is the returned future: dropping it
/// cancels the in-flight statement, and deadlines are applied by wrapping
/// the call in `tokio::time::timeout`.
///
/// # Errors
/// Lookups that match no row return [`DomainError::NotFound`]. Every other
/// failure of the backing store, constraint violations included, is a
/// [`DomainError::Storage`].
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new user
    ///
    /// Assigns a fresh identifier and sets both timestamps to now on the
    /// passed user before inserting it, so the caller sees the generated
    /// values even if the insert fails.
    ///
    /// # Returns
    /// * `Ok(())` - User inserted
    /// * `Err(DomainError::Storage)` - Duplicate email or store failure
    ///
    /// # Example
    /// ```no_run
    /// # use acct_core::repositories::AccountRepository;
    /// # use acct_core::domain::entities::User;
    /// # use acct_core::credentials::hash_password;
    /// # async fn example(repo: &impl AccountRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let mut user = User::new("ada@example.com", "ada", hash_password("hunter2")?);
    /// repo.create(&mut user).await?;
    /// println!("Created user with ID: {}", user.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn create(&self, user: &mut User) -> Result<(), DomainError>;

    /// Fetch the user with the given email
    async fn get_user_by_email(&self, email: &str) -> Result<User, DomainError>;

    /// Fetch the user with the given identifier
    ///
    /// # Example
    /// ```no_run
    /// # use uuid::Uuid;
    /// # use acct_core::repositories::AccountRepository;
    /// # async fn example(repo: &impl AccountRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let user_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000")?;
    ///
    /// match repo.get_user_by_id(user_id).await {
    ///     Ok(user) => println!("Found {}", user.email),
    ///     Err(e) if e.is_not_found() => println!("No such user"),
    ///     Err(e) => return Err(e.into()),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn get_user_by_id(&self, id: Uuid) -> Result<User, DomainError>;

    /// Set a new username on the row matching `user.id`
    ///
    /// Advances `user.updated_at` and writes both values; the passed user is
    /// updated to match what was stored.
    async fn update_username(&self, user: &mut User, username: &str) -> Result<(), DomainError>;

    /// Set the verification flag on the row matching `email`
    async fn update_user_verification_status(
        &self,
        email: &str,
        status: bool,
    ) -> Result<(), DomainError>;

    /// Insert a verification record
    async fn store_mail_verification_data(
        &self,
        data: &VerificationData,
    ) -> Result<(), DomainError>;

    /// Fetch the verification record for (`email`, `kind`)
    async fn get_mail_verification_code(
        &self,
        email: &str,
        kind: VerificationDataType,
    ) -> Result<VerificationData, DomainError>;

    /// Delete every verification record for (`email`, `kind`)
    ///
    /// # Returns
    /// * `Ok(n)` - Number of records removed, zero if none matched
    async fn delete_mail_verification_data(
        &self,
        email: &str,
        kind: VerificationDataType,
    ) -> Result<u64, DomainError>;

    /// Overwrite the stored password and token hash of the user `user_id`
    ///
    /// No other column is touched.
    async fn update_password(
        &self,
        user_id: Uuid,
        password: &str,
        token_hash: &str,
    ) -> Result<(), DomainError>;
}
