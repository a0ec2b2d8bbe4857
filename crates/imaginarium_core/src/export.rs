//! Read-only JSON export of the catalog.
//!
//! The export consumes only `ItemRepository::find_all` and renders
//! `{"data":[{"id":..,"name":..,"category":..,"description":..}, ...]}` in
//! store order.

use crate::model::item::Item;
use crate::repo::item_repo::ItemRepository;
use serde::Serialize;

#[derive(Serialize)]
struct CatalogExport<'a> {
    data: &'a [Item],
}

/// Renders all items of `repo` as a compact JSON document.
///
/// Serialization errors are not application errors; run this under
/// `ExceptionShield::guard` when the result reaches a user.
pub fn export_json<R: ItemRepository + ?Sized>(repo: &R) -> Result<String, serde_json::Error> {
    let items = repo.find_all();
    serde_json::to_string(&CatalogExport { data: &items })
}

#[cfg(test)]
mod tests {
    use super::export_json;
    use crate::error::AppResult;
    use crate::model::item::Item;
    use crate::repo::item_repo::ItemRepository;

    struct FixedRepo(Vec<Item>);

    impl ItemRepository for FixedRepo {
        fn save(&self, _item: Item) -> AppResult<()> {
            Ok(())
        }

        fn find_by_id(&self, id: &str) -> Option<Item> {
            self.0.iter().find(|item| item.id() == id).cloned()
        }

        fn find_all(&self) -> Vec<Item> {
            self.0.clone()
        }

        fn delete_by_id(&self, _id: &str) -> AppResult<()> {
            Ok(())
        }
    }

    #[test]
    fn empty_catalog_exports_empty_data_array() {
        assert_eq!(export_json(&FixedRepo(Vec::new())).unwrap(), r#"{"data":[]}"#);
    }

    #[test]
    fn export_escapes_and_keeps_field_order() {
        let repo = FixedRepo(vec![Item::new("a", "Say \"hi\"", "Tools", "back\\slash").unwrap()]);
        assert_eq!(
            export_json(&repo).unwrap(),
            r#"{"data":[{"id":"a","name":"Say \"hi\"","category":"Tools","description":"back\\slash"}]}"#
        );
    }
}
