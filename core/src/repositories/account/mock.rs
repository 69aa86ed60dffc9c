//! In-memory implementation of AccountRepository for testing
//!
//! Mirrors the observable behavior of the SQL store: email is unique,
//! lookups on missing keys are not-found, updates on missing rows are
//! silent no-ops.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::entities::verification::{VerificationData, VerificationDataType};
use crate::errors::DomainError;

use super::trait_::AccountRepository;

/// Mock account repository for testing
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    verifications: Arc<RwLock<Vec<VerificationData>>>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Number of stored verification records
    pub async fn verification_count(&self) -> usize {
        self.verifications.read().await.len()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn create(&self, user: &mut User) -> Result<(), DomainError> {
        user.assign_identity();

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::storage_message(format!(
                "duplicate key value violates unique constraint on email {}",
                user.email
            )));
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, DomainError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DomainError::not_found("User"))
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        let users = self.users.read().await;
        users
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("User"))
    }

    async fn update_username(&self, user: &mut User, username: &str) -> Result<(), DomainError> {
        user.touch();
        user.username = username.to_string();

        let mut users = self.users.write().await;
        if let Some(stored) = users.get_mut(&user.id) {
            stored.username = user.username.clone();
            stored.updated_at = user.updated_at;
        }
        Ok(())
    }

    async fn update_user_verification_status(
        &self,
        email: &str,
        status: bool,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users
            .values_mut()
            .filter(|u| u.email == email)
            .for_each(|u| u.is_verified = status);
        Ok(())
    }

    async fn store_mail_verification_data(
        &self,
        data: &VerificationData,
    ) -> Result<(), DomainError> {
        self.verifications
            .write()
            .await
            .push(data.at_storage_precision());
        Ok(())
    }

    async fn get_mail_verification_code(
        &self,
        email: &str,
        kind: VerificationDataType,
    ) -> Result<VerificationData, DomainError> {
        let verifications = self.verifications.read().await;
        verifications
            .iter()
            .find(|v| v.email == email && v.kind == kind)
            .cloned()
            .ok_or_else(|| DomainError::not_found("VerificationData"))
    }

    async fn delete_mail_verification_data(
        &self,
        email: &str,
        kind: VerificationDataType,
    ) -> Result<u64, DomainError> {
        let mut verifications = self.verifications.write().await;
        let before = verifications.len();
        verifications.retain(|v| !(v.email == email && v.kind == kind));
        Ok((before - verifications.len()) as u64)
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        password: &str,
        token_hash: &str,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if let Some(stored) = users.get_mut(&user_id) {
            stored.password = password.to_string();
            stored.token_hash = token_hash.to_string();
        }
        Ok(())
    }
}
