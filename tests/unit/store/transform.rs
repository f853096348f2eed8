use super::*;

fn key() -> PositionKey {
    PositionKey::new("design-1", "product-9", "user-3")
}

#[test]
fn missing_records_read_as_none() {
    let store = MemoryTransformStore::new();
    assert_eq!(store.read_position(&key()).unwrap(), None);
    assert_eq!(store.read_legacy(&key(), 0).unwrap(), None);
    assert_eq!(MemoryLocalCache::new().read(&key()).unwrap(), None);
}

#[test]
fn legacy_records_are_per_zone_index() {
    let store = MemoryTransformStore::new();
    let t = DesignTransform::new(1.0, 2.0, 0.5, 0.0);
    store.insert_legacy(key(), 1, t.clone()).unwrap();
    assert_eq!(store.read_legacy(&key(), 0).unwrap(), None);
    assert_eq!(store.read_legacy(&key(), 1).unwrap(), Some(t));
}

#[test]
fn authoritative_writes_are_counted() {
    let store = MemoryTransformStore::new();
    let t = DesignTransform::new(1.0, 2.0, 0.5, 0.0);
    store.write_position(&key(), t.clone()).unwrap();
    store.write_position(&key(), t.clone()).unwrap();
    assert_eq!(store.position_writes(), 2);
    assert_eq!(store.read_position(&key()).unwrap(), Some(t));
}

#[test]
fn key_serializes_camel_case() {
    let json = serde_json::to_value(key()).unwrap();
    assert_eq!(json["adminProductId"], "product-9");
}
