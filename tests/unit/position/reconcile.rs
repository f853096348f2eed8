use super::*;
use crate::{
    foundation::error::ZonecompError,
    position::resolve::TransformSource,
    store::transform::{MemoryLocalCache, MemoryTransformStore},
};

const WAIT: Duration = Duration::from_secs(5);

fn key() -> PositionKey {
    PositionKey::new("design-1", "product-1", "user-1")
}

struct RejectingStore;

impl DesignTransformStore for RejectingStore {
    fn read_position(&self, _key: &PositionKey) -> ZonecompResult<Option<DesignTransform>> {
        Ok(Some(DesignTransform::new(5.0, 5.0, 0.5, 0.0)))
    }

    fn read_legacy(
        &self,
        _key: &PositionKey,
        _zone_index: usize,
    ) -> ZonecompResult<Option<DesignTransform>> {
        Err(ZonecompError::store("legacy backend offline"))
    }

    fn write_position(&self, _key: &PositionKey, _t: DesignTransform) -> ZonecompResult<()> {
        Err(ZonecompError::store("read-only"))
    }
}

#[test]
fn repair_is_written_back_and_gap_does_not_recur() {
    let store = Arc::new(MemoryTransformStore::new());
    let cache = Arc::new(MemoryLocalCache::new());
    store
        .write_position(&key(), DesignTransform::new(10.0, 0.0, 0.6, 0.0))
        .unwrap();
    cache
        .write(
            &key(),
            DesignTransform::new(0.0, 0.0, 0.3, 0.0).with_design_size(400.0, 300.0),
        )
        .unwrap();

    let rec = Reconciler::new(store.clone(), cache, ReconcileOpts::default());
    let first = rec.resolve(&key(), 0, None);
    assert_eq!(first.resolved.source, TransformSource::DesignPositions);
    assert_eq!(first.resolved.transform.design_width, Some(400.0));
    let ticket = first.write_back.expect("repair dispatched");
    assert_eq!(ticket.wait_timeout(WAIT), Some(WriteBackOutcome::Written));

    let stored = store.read_position(&key()).unwrap().unwrap();
    assert_eq!(stored.design_height, Some(300.0));
    assert_eq!(stored.x, Some(10.0));

    let second = rec.resolve(&key(), 0, None);
    assert!(second.resolved.repair.is_none());
    assert!(second.write_back.is_none());
}

#[test]
fn write_back_failure_is_swallowed() {
    let cache = Arc::new(MemoryLocalCache::new());
    cache
        .write(
            &key(),
            DesignTransform::default().with_design_size(100.0, 100.0),
        )
        .unwrap();
    let rec = Reconciler::new(Arc::new(RejectingStore), cache, ReconcileOpts::default());
    let out = rec.resolve(&key(), 0, None);
    assert_eq!(out.resolved.transform.design_width, Some(100.0));
    let ticket = out.write_back.unwrap();
    assert_eq!(ticket.wait_timeout(WAIT), Some(WriteBackOutcome::Failed));
}

#[test]
fn read_failures_degrade_to_not_found() {
    let rec = Reconciler::new(
        Arc::new(RejectingStore),
        Arc::new(MemoryLocalCache::new()),
        ReconcileOpts::default(),
    );
    let c = rec.gather(&key(), 2);
    assert!(c.design_positions.is_some());
    assert!(c.design_transforms.is_none());
    assert!(c.local_cache.is_none());
}

#[test]
fn disabled_write_back_still_merges_in_memory() {
    let store = Arc::new(MemoryTransformStore::new());
    store
        .write_position(&key(), DesignTransform::new(1.0, 1.0, 0.5, 0.0))
        .unwrap();
    let cache = Arc::new(MemoryLocalCache::new());
    let rec = Reconciler::new(
        store.clone(),
        cache,
        ReconcileOpts { write_back: false },
    );
    rec.remember_locally(
        &key(),
        DesignTransform::default().with_design_size(20.0, 10.0),
    );
    let out = rec.resolve(&key(), 0, None);
    assert!(out.resolved.repair.is_some());
    assert!(out.write_back.is_none());
    assert_eq!(store.position_writes(), 1);
}

#[test]
fn empty_stores_resolve_to_default() {
    let rec = Reconciler::new(
        Arc::new(MemoryTransformStore::new()),
        Arc::new(MemoryLocalCache::new()),
        ReconcileOpts::default(),
    );
    let out = rec.resolve(&key(), 0, Some(0.9));
    assert_eq!(out.resolved.source, TransformSource::Default);
    assert_eq!(out.resolved.transform.scale, Some(0.9));
}

struct GatedStore {
    inner: MemoryTransformStore,
    gate: std::sync::Mutex<mpsc::Receiver<()>>,
}

impl DesignTransformStore for GatedStore {
    fn read_position(&self, key: &PositionKey) -> ZonecompResult<Option<DesignTransform>> {
        self.inner.read_position(key)
    }

    fn read_legacy(
        &self,
        key: &PositionKey,
        zone_index: usize,
    ) -> ZonecompResult<Option<DesignTransform>> {
        self.inner.read_legacy(key, zone_index)
    }

    fn write_position(&self, key: &PositionKey, t: DesignTransform) -> ZonecompResult<()> {
        let _ = self.gate.lock().unwrap().recv_timeout(WAIT);
        self.inner.write_position(key, t)
    }
}

#[test]
fn pending_write_back_is_not_dispatched_twice() {
    let (release, gate) = mpsc::channel();
    let store = Arc::new(GatedStore {
        inner: MemoryTransformStore::new(),
        gate: std::sync::Mutex::new(gate),
    });
    store
        .inner
        .write_position(&key(), DesignTransform::new(10.0, 0.0, 0.6, 0.0))
        .unwrap();
    let cache = Arc::new(MemoryLocalCache::new());
    cache
        .write(
            &key(),
            DesignTransform::default().with_design_size(400.0, 300.0),
        )
        .unwrap();
    let rec = Reconciler::new(store.clone(), cache, ReconcileOpts::default());

    let first = rec.resolve(&key(), 0, None);
    let ticket = first.write_back.expect("repair dispatched");

    let second = rec.clone().resolve(&key(), 0, None);
    assert!(second.resolved.repair.is_some());
    assert_eq!(second.resolved.transform.design_width, Some(400.0));
    assert!(second.write_back.is_none());

    release.send(()).unwrap();
    assert_eq!(ticket.wait_timeout(WAIT), Some(WriteBackOutcome::Written));
    assert_eq!(store.inner.position_writes(), 2);

    let third = rec.resolve(&key(), 0, None);
    assert!(third.resolved.repair.is_none());
}
