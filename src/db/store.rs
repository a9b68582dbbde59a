//! Record stores: ordered maps from record id to record.
//!
//! Records are kept as JSON bodies keyed by `(collection, id)`, so one database
//! serves every collection without schema changes per record kind.

use std::future::Future;
use std::marker::PhantomData;

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::Record;

/// Longest record id a store accepts, in bytes.
pub const MAX_KEY_BYTES: usize = 44;

/// An ordered map from record id to record, owning one collection.
///
/// Every operation is a single read or a single atomic write.
pub trait RecordStore<T>: Send + Sync {
    /// Fetch a record. Absence is not an error.
    fn get(&self, id: &str) -> impl Future<Output = Result<Option<T>, AppError>> + Send;

    /// Insert or overwrite the record at `id`, returning the previous occupant.
    fn insert(
        &self,
        id: &str,
        record: &T,
    ) -> impl Future<Output = Result<Option<T>, AppError>> + Send;

    /// All records, ordered by id.
    fn values(&self) -> impl Future<Output = Result<Vec<T>, AppError>> + Send;

    fn count(&self) -> impl Future<Output = Result<usize, AppError>> + Send;
}

/// Durable record store backed by the shared SQLite `records` table.
pub struct SqliteRecordStore<T> {
    pool: SqlitePool,
    collection: &'static str,
    max_value_bytes: usize,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SqliteRecordStore<T> {
    pub fn new(pool: SqlitePool, collection: &'static str, max_value_bytes: usize) -> Self {
        Self {
            pool,
            collection,
            max_value_bytes,
            _record: PhantomData,
        }
    }

    fn decode(&self, body: &str) -> Result<T, AppError> {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(collection = self.collection, "Corrupt stored record: {}", e);
            AppError::Internal(format!(
                "Stored {} record could not be decoded: {}",
                self.collection, e
            ))
        })
    }

    fn encode(&self, id: &str, record: &T) -> Result<String, AppError> {
        if id.is_empty() || id.len() > MAX_KEY_BYTES {
            return Err(AppError::InvalidArgument(format!(
                "Record id must be between 1 and {} bytes",
                MAX_KEY_BYTES
            )));
        }

        let body = serde_json::to_string(record).map_err(|e| {
            AppError::Internal(format!("Failed to encode {} record: {}", self.collection, e))
        })?;

        if body.len() > self.max_value_bytes {
            return Err(AppError::Validation(format!(
                "{} record is {} bytes, exceeding the stored size limit of {} bytes",
                T::KIND,
                body.len(),
                self.max_value_bytes
            )));
        }

        Ok(body)
    }
}

impl<T: Record> RecordStore<T> for SqliteRecordStore<T> {
    async fn get(&self, id: &str) -> Result<Option<T>, AppError> {
        let row = sqlx::query("SELECT body FROM records WHERE collection = ? AND id = ?")
            .bind(self.collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.decode(row.try_get("body")?)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, id: &str, record: &T) -> Result<Option<T>, AppError> {
        let body = self.encode(id, record)?;

        let mut tx = self.pool.begin().await?;

        let previous = sqlx::query("SELECT body FROM records WHERE collection = ? AND id = ?")
            .bind(self.collection)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO records (collection, id, body) VALUES (?, ?, ?) \
             ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body",
        )
        .bind(self.collection)
        .bind(id)
        .bind(&body)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        match previous {
            Some(row) => Ok(Some(self.decode(row.try_get("body")?)?)),
            None => Ok(None),
        }
    }

    async fn values(&self) -> Result<Vec<T>, AppError> {
        let rows = sqlx::query("SELECT body FROM records WHERE collection = ? ORDER BY id")
            .bind(self.collection)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| self.decode(row.try_get("body")?))
            .collect()
    }

    async fn count(&self) -> Result<usize, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM records WHERE collection = ?")
            .bind(self.collection)
            .fetch_one(&self.pool)
            .await?;

        let total: i64 = row.try_get("total")?;
        Ok(total as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::models::{MenuItem, MenuItemPayload, TableReservation, TableReservationPayload};
    use chrono::Utc;
    use tempfile::TempDir;

    fn menu_item(id: &str, name: &str, price: i64) -> MenuItem {
        MenuItem::create(
            id.to_string(),
            MenuItemPayload {
                name: name.to_string(),
                description: "House special".to_string(),
                price,
            },
            Utc::now(),
        )
    }

    async fn open_store(temp_dir: &TempDir) -> SqliteRecordStore<MenuItem> {
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        SqliteRecordStore::new(pool, MenuItem::COLLECTION, 1024)
    }

    #[tokio::test]
    async fn test_insert_returns_previous() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir).await;

        let first = menu_item("a", "Pasta", 12);
        assert!(store.insert("a", &first).await.unwrap().is_none());

        let second = menu_item("a", "Pasta", 15);
        let previous = store.insert("a", &second).await.unwrap();
        assert_eq!(previous, Some(first));

        assert_eq!(store.get("a").await.unwrap(), Some(second));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir).await;

        assert!(store.get("missing").await.unwrap().is_none());
        assert!(store.values().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_values_ordered_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir).await;

        for id in ["c", "a", "b"] {
            store.insert(id, &menu_item(id, "Dish", 5)).await.unwrap();
        }

        let ids: Vec<String> = store
            .values()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();

        {
            let store = open_store(&temp_dir).await;
            store.insert("a", &menu_item("a", "Soup", 7)).await.unwrap();
            store.pool.close().await;
        }

        let store = open_store(&temp_dir).await;
        let item = store.get("a").await.unwrap().expect("record persisted");
        assert_eq!(item.name, "Soup");
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let menu = open_store(&temp_dir).await;
        let reservations: SqliteRecordStore<TableReservation> =
            SqliteRecordStore::new(menu.pool.clone(), TableReservation::COLLECTION, 1024);

        menu.insert("shared-id", &menu_item("shared-id", "Soup", 7))
            .await
            .unwrap();
        let reservation = TableReservation::create(
            "shared-id".to_string(),
            TableReservationPayload {
                name: "Rossi".to_string(),
                date: "2024-06-01".to_string(),
                time: "19:30".to_string(),
                number_of_guests: 2,
            },
            Utc::now(),
        );
        reservations.insert("shared-id", &reservation).await.unwrap();

        assert_eq!(menu.count().await.unwrap(), 1);
        assert_eq!(reservations.count().await.unwrap(), 1);
        assert_eq!(menu.get("shared-id").await.unwrap().unwrap().name, "Soup");
        assert_eq!(
            reservations.get("shared-id").await.unwrap().unwrap().name,
            "Rossi"
        );
    }

    #[tokio::test]
    async fn test_oversized_record_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir).await;

        let huge = menu_item("a", &"x".repeat(2048), 12);
        let err = store.insert("a", &huge).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_overlong_key_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir).await;

        let id = "k".repeat(MAX_KEY_BYTES + 1);
        let err = store.insert(&id, &menu_item(&id, "Soup", 7)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
