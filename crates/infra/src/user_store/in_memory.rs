use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use sweetshop_auth::User;
use sweetshop_core::UserId;

use super::UserStore;
use crate::sweet_store::StoreError;

/// In-memory account store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut records = self.records.lock().await;
        if records.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate {
                field: "email",
                value: user.email,
            });
        }
        if records.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate {
                field: "username",
                value: user.username,
            });
        }
        records.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.values().find(|u| u.email == email).cloned())
    }

    async fn get(&self, id: UserId) -> Result<User, StoreError> {
        let records = self.records.lock().await;
        records.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<User, StoreError> {
        let mut records = self.records.lock().await;
        let user = records.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.is_admin = is_admin;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, username: &str) -> User {
        User::new(
            email.to_string(),
            username.to_string(),
            "$argon2id$fake".to_string(),
        )
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@example.com", "a")).await.unwrap();

        let err = store.insert(user("a@example.com", "b")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "email", .. }));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@example.com", "a")).await.unwrap();

        let err = store.insert(user("b@example.com", "a")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Duplicate {
                field: "username",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn set_admin_promotes_an_account() {
        let store = InMemoryUserStore::new();
        let inserted = store.insert(user("a@example.com", "a")).await.unwrap();
        assert!(!inserted.is_admin);

        let promoted = store.set_admin(inserted.id, true).await.unwrap();
        assert!(promoted.is_admin);
        assert!(store.get(inserted.id).await.unwrap().is_admin);
    }

    #[tokio::test]
    async fn find_by_email_misses_cleanly() {
        let store = InMemoryUserStore::new();
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }
}
