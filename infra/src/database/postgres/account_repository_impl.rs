//! PostgreSQL implementation of the AccountRepository trait.
//!
//! Every method issues one parameterized statement against the `users` or
//! `verifications` table. Rows are mapped to entities column by column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, PgPool, PgRow, Postgres};
use sqlx::query::Query;
use sqlx::Row;
use tracing::Instrument;
use uuid::Uuid;

use acct_core::domain::entities::{
    storage_precision, User, VerificationData, VerificationDataType,
};
use acct_core::errors::DomainError;
use acct_core::repositories::AccountRepository;

const INSERT_USER: &str = "INSERT INTO users \
    (id, email, username, password, tokenhash, isverified, createdat, updatedat) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)";

const SELECT_USER_BY_EMAIL: &str = "SELECT \
    id, email, username, password, tokenhash, isverified, createdat, updatedat \
    FROM users WHERE email = $1";

const SELECT_USER_BY_ID: &str = "SELECT \
    id, email, username, password, tokenhash, isverified, createdat, updatedat \
    FROM users WHERE id = $1";

/// PostgreSQL implementation of AccountRepository
///
/// Holds the connection pool and the span every call is logged under. Both
/// are injected by the caller; the repository keeps no other state.
#[derive(Clone)]
pub struct PostgresAccountRepository {
    /// Database connection pool
    pool: PgPool,
    /// Span the repository's events are recorded in
    logger: tracing::Span,
}

impl PostgresAccountRepository {
    /// Create a new repository over `pool`, logging under `logger`
    pub fn new(pool: PgPool, logger: tracing::Span) -> Self {
        Self { pool, logger }
    }

    /// Create a new repository logging under an `account_repository` span
    pub fn with_default_logger(pool: PgPool) -> Self {
        Self::new(pool, tracing::info_span!("account_repository"))
    }

    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        Ok(User {
            id: column::<Uuid>(row, "id")?,
            email: column(row, "email")?,
            password: column(row, "password")?,
            username: column(row, "username")?,
            token_hash: column(row, "tokenhash")?,
            is_verified: column(row, "isverified")?,
            created_at: column::<DateTime<Utc>>(row, "createdat")?,
            updated_at: column::<DateTime<Utc>>(row, "updatedat")?,
        })
    }

    fn row_to_verification(row: &PgRow) -> Result<VerificationData, DomainError> {
        let raw_type: i32 = column(row, "type")?;
        let kind = VerificationDataType::try_from(raw_type)
            .map_err(|e| DomainError::storage("Failed to decode type", e))?;

        Ok(VerificationData {
            email: column(row, "email")?,
            code: column(row, "code")?,
            expires_at: column::<DateTime<Utc>>(row, "expiresat")?,
            kind,
        })
    }

    async fn fetch_user(
        &self,
        query: Query<'_, Postgres, PgArguments>,
    ) -> Result<User, DomainError> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Database query failed", e))?;

        match row {
            Some(row) => {
                let user = Self::row_to_user(&row)?;
                tracing::debug!(user_id = %user.id, "Read user");
                Ok(user)
            }
            None => Err(DomainError::not_found("User")),
        }
    }
}

/// Read one column, reporting decode failures as storage errors
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Failed to get {}", name), e))
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, user: &mut User) -> Result<(), DomainError> {
        user.assign_identity();

        async {
            tracing::info!(user_id = %user.id, email = %user.email, "Create user");

            sqlx::query(INSERT_USER)
                .bind(user.id)
                .bind(&user.email)
                .bind(&user.username)
                .bind(&user.password)
                .bind(&user.token_hash)
                .bind(user.is_verified)
                .bind(user.created_at)
                .bind(user.updated_at)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage("Failed to create user", e))?;

            Ok::<_, DomainError>(())
        }
        .instrument(self.logger.clone())
        .await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, DomainError> {
        tracing::debug!(parent: &self.logger, email, "Querying for user with email");
        self.fetch_user(sqlx::query(SELECT_USER_BY_EMAIL).bind(email))
            .instrument(self.logger.clone())
            .await
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        tracing::debug!(parent: &self.logger, user_id = %id, "Querying for user with id");
        self.fetch_user(sqlx::query(SELECT_USER_BY_ID).bind(id))
            .instrument(self.logger.clone())
            .await
    }

    async fn update_username(&self, user: &mut User, username: &str) -> Result<(), DomainError> {
        let mut updated = user.clone();
        updated.touch();
        updated.username = username.to_string();

        async {
            tracing::debug!(user_id = %updated.id, "Update username");

            sqlx::query("UPDATE users SET username = $1, updatedat = $2 WHERE id = $3")
                .bind(&updated.username)
                .bind(updated.updated_at)
                .bind(updated.id)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage("Failed to update username", e))?;

            Ok::<_, DomainError>(())
        }
        .instrument(self.logger.clone())
        .await?;

        *user = updated;
        Ok(())
    }

    async fn update_user_verification_status(
        &self,
        email: &str,
        status: bool,
    ) -> Result<(), DomainError> {
        async {
            tracing::debug!(email, status, "Update verification status");

            sqlx::query("UPDATE users SET isverified = $1 WHERE email = $2")
                .bind(status)
                .bind(email)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage("Failed to update verification status", e))?;

            Ok::<_, DomainError>(())
        }
        .instrument(self.logger.clone())
        .await
    }

    async fn store_mail_verification_data(
        &self,
        data: &VerificationData,
    ) -> Result<(), DomainError> {
        async {
            tracing::debug!(email = %data.email, kind = ?data.kind, "Store verification data");

            sqlx::query(
                "INSERT INTO verifications (email, code, expiresat, type) VALUES ($1, $2, $3, $4)",
            )
            .bind(&data.email)
            .bind(&data.code)
            .bind(storage_precision(data.expires_at))
            .bind(data.kind.as_i32())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to store verification data", e))?;

            Ok::<_, DomainError>(())
        }
        .instrument(self.logger.clone())
        .await
    }

    async fn get_mail_verification_code(
        &self,
        email: &str,
        kind: VerificationDataType,
    ) -> Result<VerificationData, DomainError> {
        async {
            tracing::debug!(email, kind = ?kind, "Querying for verification data");

            let row = sqlx::query(
                "SELECT email, code, expiresat, type FROM verifications \
                 WHERE email = $1 AND type = $2 LIMIT 1",
            )
            .bind(email)
            .bind(kind.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to get verification data", e))?;

            match row {
                Some(row) => Self::row_to_verification(&row),
                None => Err(DomainError::not_found("VerificationData")),
            }
        }
        .instrument(self.logger.clone())
        .await
    }

    async fn delete_mail_verification_data(
        &self,
        email: &str,
        kind: VerificationDataType,
    ) -> Result<u64, DomainError> {
        async {
            let result = sqlx::query("DELETE FROM verifications WHERE email = $1 AND type = $2")
                .bind(email)
                .bind(kind.as_i32())
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage("Failed to delete verification data", e))?;

            tracing::debug!(
                email,
                kind = ?kind,
                removed = result.rows_affected(),
                "Deleted verification data"
            );
            Ok::<_, DomainError>(result.rows_affected())
        }
        .instrument(self.logger.clone())
        .await
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        password: &str,
        token_hash: &str,
    ) -> Result<(), DomainError> {
        async {
            tracing::debug!(user_id = %user_id, "Update password");

            sqlx::query("UPDATE users SET password = $1, tokenhash = $2 WHERE id = $3")
                .bind(password)
                .bind(token_hash)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage("Failed to update password", e))?;

            Ok::<_, DomainError>(())
        }
        .instrument(self.logger.clone())
        .await
    }
}
