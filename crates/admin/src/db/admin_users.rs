//! Admin principal repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use tedxuc_core::{AdminId, Email};

use super::{AdminDirectory, RepositoryError};
use crate::models::AdminPrincipal;

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for AdminPrincipal {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: AdminId::from_uuid(row.id),
            email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

/// Postgres-backed admin accounts.
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new admin with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken.
    /// Returns `RepositoryError::Database` for any other query failure.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<AdminPrincipal, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO admins (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            ",
        )
        .bind(AdminId::new())
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(format!("admin {email} already exists"))
            }
            other => RepositoryError::Database(other),
        })?;

        row.try_into()
    }

    /// Replace the password hash of an existing admin.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no admin has this email.
    pub async fn update_password(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE admins SET password_hash = $2 WHERE email = $1")
            .bind(email.as_str())
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl AdminDirectory for AdminRepository {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<AdminPrincipal>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, email, password_hash, created_at
            FROM admins
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}
