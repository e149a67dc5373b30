use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use sweetshop_catalog::{Sweet, SweetDraft, SweetFilter};
use sweetshop_core::SweetId;
use sweetshop_inventory::{plan_purchase, plan_restock};

use super::{StoreError, SweetStore};

/// In-memory catalog store.
///
/// Intended for tests/dev. One mutex guards the whole map, so every stock
/// adjustment observes and writes the quantity atomically.
#[derive(Debug, Default)]
pub struct InMemorySweetStore {
    records: Mutex<HashMap<SweetId, Sweet>>,
}

impl InMemorySweetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut sweets: Vec<Sweet>) -> Vec<Sweet> {
        sweets.sort_by_key(|s| s.name.to_lowercase());
        sweets
    }

    fn check_name_free(
        records: &HashMap<SweetId, Sweet>,
        name: &str,
        exclude: Option<SweetId>,
    ) -> Result<(), StoreError> {
        let taken = records
            .values()
            .any(|s| s.name == name && Some(s.id) != exclude);
        if taken {
            return Err(StoreError::Duplicate {
                field: "name",
                value: name.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SweetStore for InMemorySweetStore {
    async fn insert(&self, draft: SweetDraft) -> Result<Sweet, StoreError> {
        let mut records = self.records.lock().await;
        Self::check_name_free(&records, &draft.name, None)?;
        let sweet = Sweet::from_draft(draft);
        records.insert(sweet.id, sweet.clone());
        Ok(sweet)
    }

    async fn replace(&self, id: SweetId, draft: SweetDraft) -> Result<Sweet, StoreError> {
        let mut records = self.records.lock().await;
        Self::check_name_free(&records, &draft.name, Some(id))?;
        let sweet = records.get_mut(&id).ok_or(StoreError::NotFound)?;
        sweet.name = draft.name;
        sweet.category = draft.category;
        sweet.description = draft.description;
        sweet.price = draft.price;
        sweet.quantity = draft.quantity;
        sweet.updated_at = Utc::now();
        Ok(sweet.clone())
    }

    async fn delete(&self, id: SweetId) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records.remove(&id).ok_or(StoreError::NotFound)?;
        Ok(())
    }

    async fn get(&self, id: SweetId) -> Result<Sweet, StoreError> {
        let records = self.records.lock().await;
        records.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Sweet>, StoreError> {
        let records = self.records.lock().await;
        Ok(Self::sorted(records.values().cloned().collect()))
    }

    async fn search(&self, filter: &SweetFilter) -> Result<Vec<Sweet>, StoreError> {
        let records = self.records.lock().await;
        Ok(Self::sorted(
            records
                .values()
                .filter(|s| filter.matches(s))
                .cloned()
                .collect(),
        ))
    }

    async fn purchase(&self, id: SweetId, quantity: i64) -> Result<Sweet, StoreError> {
        let mut records = self.records.lock().await;
        let sweet = records.get_mut(&id).ok_or(StoreError::NotFound)?;
        let remaining = plan_purchase(&sweet.name, sweet.quantity, quantity)?;
        sweet.quantity = remaining;
        sweet.updated_at = Utc::now();
        Ok(sweet.clone())
    }

    async fn restock(&self, id: SweetId, quantity: i64) -> Result<Sweet, StoreError> {
        let mut records = self.records.lock().await;
        let sweet = records.get_mut(&id).ok_or(StoreError::NotFound)?;
        sweet.quantity = plan_restock(sweet.quantity, quantity);
        sweet.updated_at = Utc::now();
        Ok(sweet.clone())
    }
}
