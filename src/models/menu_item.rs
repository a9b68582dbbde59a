//! Menu item model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{require_positive, require_text, Record};

/// A dish or drink offered on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in the smallest currency unit
    pub price: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for adding or replacing a menu item.
///
/// Missing fields decode as blank or zero and are rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItemPayload {
    pub name: String,
    pub description: String,
    pub price: i64,
}

impl Record for MenuItem {
    type Payload = MenuItemPayload;

    const KIND: &'static str = "Menu item";
    const COLLECTION: &'static str = "menu_items";

    fn validate(payload: &MenuItemPayload) -> Result<(), String> {
        require_text("name", &payload.name)?;
        require_text("description", &payload.description)?;
        require_positive("price", payload.price)
    }

    fn create(id: String, payload: MenuItemPayload, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            created_at,
            updated_at: None,
        }
    }

    fn replace(self, payload: MenuItemPayload, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            price: payload.price,
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
