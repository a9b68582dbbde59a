//! The `Record` trait shared by every stored collection.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// A record kind that can be kept in a record store and driven by a collection service.
///
/// Each kind names the payload it is built from. Records own their server-assigned
/// fields (`id`, `createdAt`, `updatedAt`); everything else comes from the payload
/// and is replaced wholesale on update.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Caller-supplied fields used to create or replace a record.
    type Payload: Send;

    /// Human-readable name of the kind, capitalised ("Menu item").
    const KIND: &'static str;

    /// Collection name used as the storage partition.
    const COLLECTION: &'static str;

    /// Check every field of a payload, returning the first violation.
    fn validate(payload: &Self::Payload) -> Result<(), String>;

    /// Build a fresh record from a validated payload.
    fn create(id: String, payload: Self::Payload, created_at: DateTime<Utc>) -> Self;

    /// Replace all editable fields, keeping `id` and `createdAt`.
    fn replace(self, payload: Self::Payload, updated_at: DateTime<Utc>) -> Self;

    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Most recent timestamp carried by the record.
    fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at().unwrap_or_else(|| self.created_at())
    }
}

/// Fail if a text field is empty or whitespace only.
pub fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be blank", field));
    }
    Ok(())
}

/// Fail unless a numeric field is strictly positive.
pub fn require_positive<N>(field: &str, value: N) -> Result<(), String>
where
    N: PartialOrd + Default,
{
    if value > N::default() {
        Ok(())
    } else {
        Err(format!("{} must be greater than zero", field))
    }
}
