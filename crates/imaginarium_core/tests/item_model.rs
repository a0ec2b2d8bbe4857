use imaginarium_core::{Item, ValidationError};
use std::collections::HashSet;

#[test]
fn new_trims_every_field() {
    let item = Item::new("  id-1 ", " Sky Spoon ", "\tTools", "Scoops clouds  ").unwrap();

    assert_eq!(item.id(), "id-1");
    assert_eq!(item.name(), "Sky Spoon");
    assert_eq!(item.category(), "Tools");
    assert_eq!(item.description(), "Scoops clouds");
}

#[test]
fn blank_id_is_rejected() {
    assert_eq!(
        Item::new("   ", "name", "cat", "desc").unwrap_err(),
        ValidationError::MissingId
    );
}

#[test]
fn equality_and_hash_use_id_only() {
    let first = Item::new("id-1", "Sky Spoon", "Tools", "Scoops clouds").unwrap();
    let renamed = Item::new("id-1", "Cloud Ladle", "Kitchen", "Other text").unwrap();
    let other = Item::new("id-2", "Sky Spoon", "Tools", "Scoops clouds").unwrap();

    assert_eq!(first, renamed);
    assert_ne!(first, other);

    let set: HashSet<Item> = [first, renamed, other].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn from_columns_defaults_missing_and_ignores_extra_columns() {
    let short = Item::from_columns(&["id-1".to_string(), "Name".to_string()]).unwrap();
    assert_eq!(short.category(), "");
    assert_eq!(short.description(), "");

    let long: Vec<String> = ["id-2", "N", "C", "D", "extra"]
        .iter()
        .map(|value| value.to_string())
        .collect();
    let item = Item::from_columns(&long).unwrap();
    assert_eq!(item.columns(), ["id-2", "N", "C", "D"]);

    assert_eq!(
        Item::from_columns(&[]).unwrap_err(),
        ValidationError::MissingId
    );
}
