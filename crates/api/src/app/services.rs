//! Service wiring: stores + token codec, in-memory or Postgres.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use sweetshop_auth::{TokenCodec, User, hash_password};
use sweetshop_infra::sweet_store::{InMemorySweetStore, PostgresSweetStore};
use sweetshop_infra::user_store::{InMemoryUserStore, PostgresUserStore};
use sweetshop_infra::{StoreError, SweetStore, UserStore};

/// Access tokens are short-lived; refresh tokens last a week.
const ACCESS_TOKEN_LIFETIME_SECS: i64 = 60 * 60;
const REFRESH_TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

/// Everything a handler needs, injected as one `Extension`.
pub struct AppServices {
    pub sweets: Arc<dyn SweetStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<TokenCodec>,
}

impl AppServices {
    /// Volatile storage; every restart starts empty.
    pub fn in_memory(jwt_secret: String) -> Self {
        Self {
            sweets: Arc::new(InMemorySweetStore::new()),
            users: Arc::new(InMemoryUserStore::new()),
            tokens: Arc::new(token_codec(jwt_secret)),
        }
    }

    /// Postgres storage; connects and applies embedded migrations.
    pub async fn postgres(database_url: &str, jwt_secret: String) -> Result<Self, anyhow::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sweetshop_infra::MIGRATOR.run(&pool).await?;

        Ok(Self {
            sweets: Arc::new(PostgresSweetStore::new(pool.clone())),
            users: Arc::new(PostgresUserStore::new(pool)),
            tokens: Arc::new(token_codec(jwt_secret)),
        })
    }
}

fn token_codec(jwt_secret: String) -> TokenCodec {
    TokenCodec::new(
        jwt_secret.into_bytes(),
        ACCESS_TOKEN_LIFETIME_SECS,
        REFRESH_TOKEN_LIFETIME_SECS,
    )
}

/// Seed or promote the admin account from `ADMIN_EMAIL` / `ADMIN_USERNAME` /
/// `ADMIN_PASSWORD`. A no-op when `ADMIN_EMAIL` is unset.
pub async fn seed_admin_from_env(services: &AppServices) -> Result<(), anyhow::Error> {
    let Ok(email) = std::env::var("ADMIN_EMAIL") else {
        return Ok(());
    };
    let email = email.trim().to_lowercase();

    if let Some(existing) = services.users.find_by_email(&email).await? {
        if !existing.is_admin {
            services.users.set_admin(existing.id, true).await?;
            tracing::info!(%email, "promoted existing account to admin");
        }
        return Ok(());
    }

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD")
        .map_err(|_| anyhow::anyhow!("ADMIN_PASSWORD required to create the admin account"))?;

    let mut admin = User::new(email.clone(), username, hash_password(&password)?);
    admin.is_admin = true;

    match services.users.insert(admin).await {
        Ok(_) => {
            tracing::info!(%email, "created admin account");
            Ok(())
        }
        // Lost a race with a concurrent seeder; the account exists.
        Err(StoreError::Duplicate { .. }) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
