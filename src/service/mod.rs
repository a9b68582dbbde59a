//! Collection services: validation, identity and timestamping over a record store.

mod clock;
mod ids;

pub use clock::*;
pub use ids::*;

use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{RecordStore, SqliteRecordStore, MAX_KEY_BYTES};
use crate::errors::AppError;
use crate::models::{MenuItem, Record, TableReservation};

pub type MenuItemService = CollectionService<MenuItem, SqliteRecordStore<MenuItem>>;
pub type ReservationService =
    CollectionService<TableReservation, SqliteRecordStore<TableReservation>>;

/// Drives one record store through add, update and list.
///
/// Writes are serialised per collection: `add` and `update` hold the service's
/// write lock across their read-then-insert sequence, so concurrent updates to
/// the same id resolve as last-write-wins without losing an interleaved write.
pub struct CollectionService<T, S> {
    store: S,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T, S> CollectionService<T, S>
where
    T: Record,
    S: RecordStore<T>,
{
    pub fn new(store: S, clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            store,
            clock,
            random,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// Validate a payload, mint an id and store a new record.
    pub async fn add(&self, payload: T::Payload) -> Result<T, AppError> {
        T::validate(&payload).map_err(|reason| invalid_payload::<T>("adding", reason))?;

        let _guard = self.write_lock.lock().await;

        let id = mint_id(self.random.as_ref());
        if self.store.get(&id).await?.is_some() {
            tracing::error!(kind = T::KIND, %id, "Generated id collides with a stored record");
            return Err(AppError::Internal(format!(
                "Generated {} id {} is already in use",
                T::KIND.to_lowercase(),
                id
            )));
        }

        let record = T::create(id, payload, self.clock.now());
        if self.store.insert(record.id(), &record).await?.is_some() {
            tracing::error!(kind = T::KIND, id = record.id(), "Add overwrote a stored record");
            return Err(AppError::Internal(format!(
                "Generated {} id {} overwrote a stored record",
                T::KIND.to_lowercase(),
                record.id()
            )));
        }

        tracing::info!(kind = T::KIND, id = record.id(), "Record created");
        Ok(record)
    }

    /// Replace every editable field of an existing record.
    pub async fn update(&self, id: &str, payload: T::Payload) -> Result<T, AppError> {
        if id.trim().is_empty() || id.len() > MAX_KEY_BYTES {
            return Err(AppError::InvalidArgument(format!(
                "Invalid Id Parameter for updating a {}.",
                T::KIND.to_lowercase()
            )));
        }

        T::validate(&payload).map_err(|reason| invalid_payload::<T>("updating", reason))?;

        let _guard = self.write_lock.lock().await;

        let existing = self.store.get(id).await?.ok_or_else(|| {
            tracing::debug!(kind = T::KIND, %id, "Update of unknown record");
            AppError::NotFound(format!("{} with ID={} not found.", T::KIND, id))
        })?;

        // Never stamp an update earlier than the record's latest timestamp.
        let now = self.clock.now().max(existing.last_modified());
        let record = existing.replace(payload, now);
        if self.store.insert(id, &record).await?.is_none() {
            tracing::warn!(kind = T::KIND, %id, "Update found no previous occupant");
        }

        tracing::info!(kind = T::KIND, %id, "Record updated");
        Ok(record)
    }

    /// Every record currently stored.
    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        self.store.values().await
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.store.count().await
    }
}

fn invalid_payload<T: Record>(operation: &str, reason: String) -> AppError {
    tracing::debug!(kind = T::KIND, %reason, "Rejected {} payload", operation);
    AppError::Validation(format!(
        "Invalid payload for {} a {}: {}",
        operation,
        T::KIND.to_lowercase(),
        reason
    ))
}
