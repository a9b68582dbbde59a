use std::collections::BTreeMap;

use tokio::sync::RwLock;

use super::RecordStore;
use crate::errors::AppError;

/// In-memory record store, ordered by id. Used to exercise services without SQLite.
pub struct MemoryRecordStore<T> {
    inner: RwLock<BTreeMap<String, T>>,
}

impl<T> Default for MemoryRecordStore<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Clone + Send + Sync> RecordStore<T> for MemoryRecordStore<T> {
    async fn get(&self, id: &str) -> Result<Option<T>, AppError> {
        let map = self.inner.read().await;
        Ok(map.get(id).cloned())
    }

    async fn insert(&self, id: &str, record: &T) -> Result<Option<T>, AppError> {
        let mut map = self.inner.write().await;
        Ok(map.insert(id.to_string(), record.clone()))
    }

    async fn values(&self) -> Result<Vec<T>, AppError> {
        let map = self.inner.read().await;
        Ok(map.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.inner.read().await.len())
    }
}
