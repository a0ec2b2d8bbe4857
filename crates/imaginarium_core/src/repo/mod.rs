//! Persistence layer for catalog items.
//!
//! # Responsibility
//! - Define the item repository contract used by services and exporters.
//! - Keep the catalog file format and file access inside this module.
//!
//! # Invariants
//! - Repository writes rewrite the whole catalog file; there are no delta
//!   writes.
//! - Repository APIs return semantic errors (`NotFound`) in addition to I/O
//!   failures.

pub mod csv_codec;
pub mod item_repo;
pub mod resource;
