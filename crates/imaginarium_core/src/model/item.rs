//! Item domain model.
//!
//! # Responsibility
//! - Define the catalog entry persisted one-per-line in the catalog file.
//! - Normalize field values at construction time.
//!
//! # Invariants
//! - `id` is trimmed and never empty.
//! - `name`, `category` and `description` are trimmed; absent values are `""`.
//! - Equality and hashing use `id` only.

use crate::error::ValidationError;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// Number of columns one item occupies in the catalog file.
pub const ITEM_COLUMN_COUNT: usize = 4;

/// One catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    id: String,
    name: String,
    category: String,
    description: String,
}

impl Item {
    /// Creates an item, trimming every field.
    ///
    /// # Errors
    /// - `ValidationError::MissingId` when `id` is blank.
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        category: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ValidationError::MissingId);
        }

        Ok(Self {
            id: id.to_string(),
            name: name.as_ref().trim().to_string(),
            category: category.as_ref().trim().to_string(),
            description: description.as_ref().trim().to_string(),
        })
    }

    /// Builds an item from decoded catalog columns.
    ///
    /// Missing trailing columns default to empty strings and columns past
    /// the fourth are ignored.
    pub fn from_columns(columns: &[String]) -> Result<Self, ValidationError> {
        let column = |index: usize| columns.get(index).map(String::as_str).unwrap_or("");
        Self::new(column(0), column(1), column(2), column(3))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Field values in catalog column order.
    pub fn columns(&self) -> [&str; ITEM_COLUMN_COUNT] {
        [&self.id, &self.name, &self.category, &self.description]
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
