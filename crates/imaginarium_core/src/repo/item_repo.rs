//! Item repository contract and CSV-file implementation.
//!
//! # Responsibility
//! - Keep all items in an ordered in-memory index keyed by id.
//! - Mirror the index into the backing resource after every mutation.
//!
//! # Invariants
//! - New ids are appended; an updated id keeps its position.
//! - Every public operation runs under one store-wide lock, reads included.
//! - Each successful mutation rewrites the whole resource: header line, then
//!   one encoded line per item in index order.
//!
//! # Load vs. write failure policy
//! Loading favors availability: a missing resource is an empty store, only
//! the first non-blank line is checked for the header, a malformed row is
//! skipped with a warning, and an unreadable resource
//! degrades to an empty store with the failure only logged. Writing is
//! strict: a failed persist returns `AppError::Io` after the in-memory
//! index was already changed, so callers must treat the store as possibly
//! out of sync with the file. This asymmetry is kept on purpose and is open
//! for review.

use crate::error::{error_chain, AppError, AppResult, IoFailure};
use crate::model::item::{Item, ITEM_COLUMN_COUNT};
use crate::repo::csv_codec::{decode_line, encode_item, is_header, CSV_HEADER};
use crate::repo::resource::{FileResource, TextResource};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Repository interface for catalog items.
pub trait ItemRepository {
    /// Inserts a new item or replaces the item stored under the same id.
    fn save(&self, item: Item) -> AppResult<()>;
    fn find_by_id(&self, id: &str) -> Option<Item>;
    /// Snapshot of all items in store order.
    fn find_all(&self) -> Vec<Item>;
    /// Removes an item; an unknown id is `AppError::NotFound`.
    fn delete_by_id(&self, id: &str) -> AppResult<()>;
}

impl<R: ItemRepository + ?Sized> ItemRepository for &R {
    fn save(&self, item: Item) -> AppResult<()> {
        (**self).save(item)
    }

    fn find_by_id(&self, id: &str) -> Option<Item> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Vec<Item> {
        (**self).find_all()
    }

    fn delete_by_id(&self, id: &str) -> AppResult<()> {
        (**self).delete_by_id(id)
    }
}

/// Insertion-ordered item index keyed by id.
#[derive(Debug, Default)]
struct ItemIndex {
    items: Vec<Item>,
    positions: HashMap<String, usize>,
}

impl ItemIndex {
    /// Returns `true` when the id was not present before.
    fn upsert(&mut self, item: Item) -> bool {
        match self.positions.get(item.id()) {
            Some(&position) => {
                self.items[position] = item;
                false
            }
            None => {
                self.positions.insert(item.id().to_string(), self.items.len());
                self.items.push(item);
                true
            }
        }
    }

    fn get(&self, id: &str) -> Option<&Item> {
        self.positions.get(id).map(|&position| &self.items[position])
    }

    fn remove(&mut self, id: &str) -> Option<Item> {
        let position = self.positions.remove(id)?;
        let removed = self.items.remove(position);
        for shifted in &self.items[position..] {
            if let Some(slot) = self.positions.get_mut(shifted.id()) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

/// Catalog store backed by a CSV-like text resource.
pub struct CsvItemRepository<S: TextResource = FileResource> {
    resource: S,
    index: Mutex<ItemIndex>,
}

impl CsvItemRepository<FileResource> {
    /// Opens the store over a catalog file, loading it when present.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_resource(FileResource::new(path))
    }
}

impl<S: TextResource> CsvItemRepository<S> {
    /// Builds the store over any text resource, loading it immediately.
    ///
    /// Never fails; see the module docs for the load policy.
    pub fn with_resource(resource: S) -> Self {
        let index = load_index(&resource);
        Self {
            resource,
            index: Mutex::new(index),
        }
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn resource(&self) -> &S {
        &self.resource
    }

    fn lock(&self) -> MutexGuard<'_, ItemIndex> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, index: &ItemIndex) -> Result<(), IoFailure> {
        let mut content = String::with_capacity(64 * (index.len() + 1));
        content.push_str(CSV_HEADER);
        content.push('\n');
        for item in index.iter() {
            content.push_str(&encode_item(item));
            content.push('\n');
        }

        self.resource.write_utf8(&content).map_err(|err| {
            error!(
                "event=catalog_persist module=repo status=error error_code=write_failed items={} location={} error={}",
                index.len(),
                err.location(),
                error_chain(&err)
            );
            err
        })?;

        debug!(
            "event=catalog_persist module=repo status=ok items={}",
            index.len()
        );
        Ok(())
    }
}

impl<S: TextResource> ItemRepository for CsvItemRepository<S> {
    fn save(&self, item: Item) -> AppResult<()> {
        let mut index = self.lock();
        let id = item.id().to_string();
        let inserted = index.upsert(item);
        self.persist(&index)?;
        debug!(
            "event=item_save module=repo status=ok id={} mode={}",
            id,
            if inserted { "insert" } else { "update" }
        );
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Option<Item> {
        self.lock().get(id).cloned()
    }

    fn find_all(&self) -> Vec<Item> {
        self.lock().iter().cloned().collect()
    }

    fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let mut index = self.lock();
        if index.remove(id).is_none() {
            return Err(AppError::NotFound(id.to_string()));
        }
        self.persist(&index)?;
        debug!("event=item_delete module=repo status=ok id={}", id);
        Ok(())
    }
}

fn load_index<S: TextResource>(resource: &S) -> ItemIndex {
    let mut index = ItemIndex::default();

    if !resource.exists() {
        info!("event=catalog_load module=repo status=skipped reason=missing_resource");
        return index;
    }

    let content = match resource.read_utf8() {
        Ok(content) => content,
        Err(err) => {
            warn!(
                "event=catalog_load module=repo status=error error_code=read_failed location={} error={}",
                err.location(),
                error_chain(&err)
            );
            return index;
        }
    };

    let mut skipped = 0usize;
    let mut seen_first_line = false;
    for (line_number, line) in content.lines().enumerate().map(|(i, line)| (i + 1, line)) {
        if line.trim().is_empty() {
            continue;
        }
        // Header detection applies to the first non-blank line only.
        let is_first_line = !seen_first_line;
        seen_first_line = true;
        if is_first_line && is_header(line) {
            continue;
        }

        let columns = decode_line(line);
        if columns.len() < ITEM_COLUMN_COUNT {
            warn!(
                "event=catalog_load module=repo status=skipped_row reason=malformed line={} columns={}",
                line_number,
                columns.len()
            );
            skipped += 1;
            continue;
        }

        match Item::from_columns(&columns) {
            Ok(item) => {
                index.upsert(item);
            }
            Err(err) => {
                warn!(
                    "event=catalog_load module=repo status=skipped_row reason=invalid_item line={} error={}",
                    line_number, err
                );
                skipped += 1;
            }
        }
    }

    info!(
        "event=catalog_load module=repo status=ok items={} skipped={}",
        index.len(),
        skipped
    );
    index
}

#[cfg(test)]
mod tests {
    use super::ItemIndex;
    use crate::model::item::Item;

    fn item(id: &str, name: &str) -> Item {
        Item::new(id, name, "cat", "desc").unwrap()
    }

    #[test]
    fn index_keeps_insertion_order_and_update_position() {
        let mut index = ItemIndex::default();
        assert!(index.upsert(item("a", "first")));
        assert!(index.upsert(item("b", "second")));
        assert!(index.upsert(item("c", "third")));
        assert!(!index.upsert(item("a", "first again")));

        let ids: Vec<_> = index.iter().map(|it| it.id().to_string()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(index.get("a").unwrap().name(), "first again");
    }

    #[test]
    fn index_remove_reindexes_following_entries() {
        let mut index = ItemIndex::default();
        index.upsert(item("a", "1"));
        index.upsert(item("b", "2"));
        index.upsert(item("c", "3"));

        assert_eq!(index.remove("a").unwrap().id(), "a");
        assert!(index.remove("a").is_none());
        assert_eq!(index.get("c").unwrap().name(), "3");

        index.upsert(item("c", "3b"));
        let names: Vec<_> = index.iter().map(|it| it.name().to_string()).collect();
        assert_eq!(names, ["2", "3b"]);
    }
}
