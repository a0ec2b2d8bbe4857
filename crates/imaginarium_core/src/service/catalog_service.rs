//! Catalog use-case service.
//!
//! # Responsibility
//! - Sanitize user-provided fields before they reach the repository.
//! - Provide search and category grouping over the item snapshot.
//!
//! # Invariants
//! - Every user-provided string passes through `sanitize_line` with its
//!   field limit before use.
//! - Service APIs never bypass repository persistence contracts.

use crate::error::AppResult;
use crate::model::item::Item;
use crate::repo::item_repo::ItemRepository;
use crate::sanitize::{
    sanitize_line, CATEGORY_MAX_LEN, DESCRIPTION_MAX_LEN, ID_MAX_LEN, NAME_MAX_LEN,
    SEARCH_TOKEN_MAX_LEN,
};
use log::debug;

/// Group label used for items with an empty category.
pub const UNCATEGORIZED_LABEL: &str = "(uncategorized)";

/// Raw, unsanitized item fields as entered by a user.
///
/// `None` means the value was never provided (for example end of input).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl ItemDraft {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            category: Some(category.into()),
            description: Some(description.into()),
        }
    }
}

/// Items sharing one category, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub name: String,
    pub items: Vec<Item>,
}

/// Catalog service facade over repository implementations.
pub struct CatalogService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Sanitizes all draft fields and saves the resulting item.
    ///
    /// Fields are checked in id, name, category, description order; the
    /// first failure is returned.
    pub fn upsert_item(&self, draft: &ItemDraft) -> AppResult<Item> {
        let id = sanitize_line(draft.id.as_deref(), ID_MAX_LEN)?;
        let name = sanitize_line(draft.name.as_deref(), NAME_MAX_LEN)?;
        let category = sanitize_line(draft.category.as_deref(), CATEGORY_MAX_LEN)?;
        let description = sanitize_line(draft.description.as_deref(), DESCRIPTION_MAX_LEN)?;

        let item = Item::new(id, name, category, description)?;
        self.repo.save(item.clone())?;
        Ok(item)
    }

    /// Deletes an item by a sanitized id.
    pub fn delete_item(&self, id: &str) -> AppResult<()> {
        let id = sanitize_line(Some(id), ID_MAX_LEN)?;
        self.repo.delete_by_id(&id)
    }

    /// Returns items whose name or category contains `token`, ignoring case.
    pub fn search_by_token(&self, token: &str) -> AppResult<Vec<Item>> {
        let needle = sanitize_line(Some(token), SEARCH_TOKEN_MAX_LEN)?.to_lowercase();
        let hits: Vec<Item> = self
            .repo
            .find_all()
            .into_iter()
            .filter(|item| {
                item.name().to_lowercase().contains(&needle)
                    || item.category().to_lowercase().contains(&needle)
            })
            .collect();
        debug!(
            "event=catalog_search module=service status=ok hits={}",
            hits.len()
        );
        Ok(hits)
    }

    pub fn find_by_id(&self, id: &str) -> Option<Item> {
        self.repo.find_by_id(id)
    }

    /// Snapshot of all items in store order.
    pub fn find_all(&self) -> Vec<Item> {
        self.repo.find_all()
    }

    /// Groups all items by category in first-appearance order.
    pub fn category_tree(&self) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        for item in self.repo.find_all() {
            let label = if item.category().is_empty() {
                UNCATEGORIZED_LABEL
            } else {
                item.category()
            };
            match groups.iter_mut().find(|group| group.name == label) {
                Some(group) => group.items.push(item),
                None => groups.push(CategoryGroup {
                    name: label.to_string(),
                    items: vec![item],
                }),
            }
        }
        groups
    }
}
