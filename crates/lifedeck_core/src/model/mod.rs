//! Domain model for the journaling taxonomy and its entries.
//!
//! # Responsibility
//! - Define the persisted shapes: categories, subcategories, entries,
//!   settings and the aggregate `AppState`.
//! - Provide pure state transitions used by the service facade.
//!
//! # Invariants
//! - Identifiers are opaque strings and are preserved across round-trips.
//! - Categories own their subcategories; references back to parents are ids.
//! - Wire field names are camelCase to match the persisted JSON document.

pub mod category;
pub mod defaults;
pub mod entry;
pub mod settings;
pub mod state;

use uuid::Uuid;

/// Generates a fresh opaque identifier for a new record.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
