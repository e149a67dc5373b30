//! Postgres-backed account store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use sweetshop_auth::User;
use sweetshop_core::UserId;

use super::UserStore;
use crate::sweet_store::StoreError;

const USER_COLUMNS: &str = "id, email, username, password_hash, is_admin, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: Arc<PgPool>,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[instrument(skip(self, user), fields(email = %user.email), err)]
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, username, password_hash, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &user))?;

        Ok(user)
    }

    #[instrument(skip(self, email), err)]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&*self.pool)
        .await?;

        row.map(|row| Ok(UserRow::from_row(&row)?.into_user()))
            .transpose()
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn get(&self, id: UserId) -> Result<User, StoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;

        match row {
            Some(row) => Ok(UserRow::from_row(&row)?.into_user()),
            None => Err(StoreError::NotFound),
        }
    }

    #[instrument(skip(self), fields(id = %id, is_admin), err)]
    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<User, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET is_admin = $2, updated_at = $3
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(id.as_uuid())
        .bind(is_admin)
        .bind(Utc::now())
        .fetch_optional(&*self.pool)
        .await?;

        match row {
            Some(row) => Ok(UserRow::from_row(&row)?.into_user()),
            None => Err(StoreError::NotFound),
        }
    }
}

/// Map a unique violation to `Duplicate`, naming the field from the index
/// that fired.
fn map_unique_violation(err: sqlx::Error, user: &User) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or_default();
            return if constraint.contains("username") {
                StoreError::Duplicate {
                    field: "username",
                    value: user.username.clone(),
                }
            } else {
                StoreError::Duplicate {
                    field: "email",
                    value: user.email.clone(),
                }
            };
        }
    }
    StoreError::Database(err)
}

#[derive(Debug)]
struct UserRow {
    id: uuid::Uuid,
    email: String,
    username: String,
    password_hash: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for UserRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserRow {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            is_admin: row.try_get("is_admin")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_uuid(self.id),
            email: self.email,
            username: self.username,
            password_hash: self.password_hash,
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
