//! In-memory store adapter.
//!
//! Backs the store contract with a mutex-guarded map. Used by tests as a
//! controllable remote and by the CLI as an offline backend.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::{RecipeStore, Result};
use crate::recipe::{OwnerId, Recipe, RecipeId};

/// A [`RecipeStore`] holding records in process memory.
///
/// Honors the same contract as the remote adapters: upsert by id and
/// idempotent delete. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<RecipeId, Recipe>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// True if no records are held.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// True if a record with `id` is present.
    pub async fn contains(&self, id: RecipeId) -> bool {
        self.records.lock().await.contains_key(&id)
    }
}

#[async_trait::async_trait]
impl RecipeStore for MemoryStore {
    async fn put(&self, record: &Recipe) -> Result<()> {
        let mut records = self.records.lock().await;
        records.insert(record.id, record.clone());
        debug!(id = %record.id, owner = %record.owner_id, "Stored record");
        Ok(())
    }

    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Recipe>> {
        let records = self.records.lock().await;
        Ok(records
            .values()
            .filter(|record| record.owner_id == *owner)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: RecipeId) -> Result<()> {
        let mut records = self.records.lock().await;
        if records.remove(&id).is_some() {
            debug!(id = %id, "Deleted record");
        }
        Ok(())
    }
}
