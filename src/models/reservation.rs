//! Table reservation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{require_positive, require_text, Record};

/// A booked table. `date` and `time` are kept exactly as the caller sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReservation {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub number_of_guests: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for adding or replacing a table reservation.
///
/// Missing fields decode as blank or zero and are rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableReservationPayload {
    pub name: String,
    pub date: String,
    pub time: String,
    pub number_of_guests: i64,
}

impl Record for TableReservation {
    type Payload = TableReservationPayload;

    const KIND: &'static str = "Table reservation";
    const COLLECTION: &'static str = "table_reservations";

    fn validate(payload: &TableReservationPayload) -> Result<(), String> {
        require_text("name", &payload.name)?;
        require_text("date", &payload.date)?;
        require_text("time", &payload.time)?;
        require_positive("numberOfGuests", payload.number_of_guests)
    }

    fn create(id: String, payload: TableReservationPayload, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: payload.name,
            date: payload.date,
            time: payload.time,
            number_of_guests: payload.number_of_guests,
            created_at,
            updated_at: None,
        }
    }

    fn replace(self, payload: TableReservationPayload, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: payload.name,
            date: payload.date,
            time: payload.time,
            number_of_guests: payload.number_of_guests,
            updated_at: Some(updated_at),
            ..self
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}
