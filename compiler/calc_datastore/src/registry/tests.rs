#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::codec::{StringCodec, VliCodec};
use crate::store::{DataStore, DataStoreWrapper, DataStoreWriter};

#[derive(Debug, PartialEq)]
enum Target {
    Single,
    Broadcast,
}

fn registry() -> TagRegistry<Target> {
    let table: [(&'static str, Factory<Target>); 2] = [
        ("single", || Target::Single),
        ("broadcast", || Target::Broadcast),
    ];
    TagRegistry::new(&table).unwrap()
}

fn table(entries: &[(&str, u32)]) -> DataStore<String, u32> {
    DataStore::from_entries(entries.iter().map(|(tag, id)| ((*tag).to_string(), *id)))
}

#[test]
fn ids_come_from_the_record() {
    let mut registry = registry();
    table(&[("single", 4), ("broadcast", 9)])
        .visit(&mut registry)
        .unwrap();

    assert_eq!(registry.id_of("single").unwrap(), 4);
    assert_eq!(registry.tag_of(9), Some("broadcast"));
    assert_eq!(registry.create(4).unwrap(), Target::Single);
    assert_eq!(registry.create(9).unwrap(), Target::Broadcast);
    assert!(matches!(registry.create(5), Err(DataStoreError::UnknownId(5))));
}

#[test]
fn unknown_tag_rejected_at_load() {
    let mut registry = registry();
    assert!(matches!(
        table(&[("single", 1), ("teleport", 2)]).visit(&mut registry),
        Err(DataStoreError::UnknownTag(tag)) if tag == "teleport"
    ));
}

#[test]
fn id_reuse_rejected() {
    let mut registry = registry();
    assert!(matches!(
        table(&[("single", 1), ("broadcast", 1)]).visit(&mut registry),
        Err(DataStoreError::DuplicateId { id: 1, .. })
    ));
}

#[test]
fn reload_replaces_assignments() {
    let mut registry = registry();
    table(&[("single", 1), ("broadcast", 2)])
        .visit(&mut registry)
        .unwrap();
    table(&[("broadcast", 1)]).visit(&mut registry).unwrap();

    assert_eq!(registry.assigned(), 1);
    assert_eq!(registry.create(1).unwrap(), Target::Broadcast);
    assert!(matches!(
        registry.id_of("single"),
        Err(DataStoreError::UnassignedTag(_))
    ));
}

#[test]
fn duplicate_factory_tags_rejected() {
    let table: [(&'static str, Factory<i32>); 2] = [("a", || 1), ("a", || 2)];
    let result = TagRegistry::new(&table);
    assert!(matches!(result, Err(DataStoreError::DuplicateTag { tag }) if tag == "a"));
}

#[test]
fn loaded_through_wrapper() {
    let registry = Rc::new(RefCell::new(registry()));
    let mut wrapper: DataStoreWrapper<String, u32> = DataStoreWrapper::new("targets");
    wrapper.add_visitor(registry.clone());

    let mut bytes = Vec::new();
    DataStoreWriter::<String, u32>::new(&StringCodec, &VliCodec)
        .write(&table(&[("broadcast", 300)]), &mut bytes)
        .unwrap();
    wrapper
        .reader(&StringCodec, &VliCodec)
        .read(&mut bytes.as_slice())
        .unwrap();

    assert_eq!(registry.borrow().create(300).unwrap(), Target::Broadcast);
}

#[test]
fn rejected_record_keeps_previous_assignments() {
    let registry = Rc::new(RefCell::new(registry()));
    let mut wrapper: DataStoreWrapper<String, u32> = DataStoreWrapper::new("targets");
    wrapper.add_visitor(registry.clone());

    wrapper
        .activate_data(table(&[("single", 1), ("broadcast", 2)]))
        .unwrap();
    assert!(matches!(
        wrapper.activate_data(table(&[("single", 7), ("bogus", 3)])),
        Err(DataStoreError::UnknownTag(tag)) if tag == "bogus"
    ));

    let active = wrapper.active().unwrap();
    assert_eq!(active.get(&"single".to_string()), Some(&1));
    let registry = registry.borrow();
    assert_eq!(registry.id_of("single").unwrap(), 1);
    assert_eq!(registry.id_of("broadcast").unwrap(), 2);
    assert_eq!(registry.tag_of(7), None);
    assert_eq!(registry.assigned(), 2);
}
