//! Data models for the Bistro backend.
//!
//! Field names serialize as camelCase to match the frontend contract.

mod menu_item;
mod record;
mod reservation;

pub use menu_item::*;
pub use record::*;
pub use reservation::*;
