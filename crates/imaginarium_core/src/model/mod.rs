//! Catalog domain model.
//!
//! # Responsibility
//! - Define the canonical catalog entry shared by store, service and export.
//!
//! # Invariants
//! - Every item is identified by a non-empty, trimmed id.
//! - Items are immutable; updates replace the item stored under the same id.

pub mod item;
