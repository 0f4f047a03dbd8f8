//! 内存存储

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{RecordStore, StoreError};
use crate::core::resource::{RecordId, Resource};

pub struct MemoryStore<R> {
    records: Arc<RwLock<HashMap<RecordId, R>>>,
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for MemoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

#[async_trait]
impl<R: Resource> RecordStore<R> for MemoryStore<R> {
    async fn find_all(&self) -> Result<Vec<R>, StoreError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn insert(&self, record: R) -> Result<R, StoreError> {
        let mut records = self.records.write().await;
        records.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<R>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn replace(&self, record: R) -> Result<Option<R>, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<Option<R>, StoreError> {
        let mut records = self.records.write().await;
        Ok(records.remove(&id))
    }
}
