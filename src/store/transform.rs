use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::{
    foundation::error::{ZonecompError, ZonecompResult},
    placement::resolver::DesignTransform,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Key shared by the design-transform store and the local cache.
pub struct PositionKey {
    /// Design identifier.
    pub design_id: String,
    /// Admin (catalog) product identifier.
    pub admin_product_id: String,
    /// Owning user identifier.
    pub user_id: String,
}

impl PositionKey {
    /// Build a key.
    pub fn new(
        design_id: impl Into<String>,
        admin_product_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            design_id: design_id.into(),
            admin_product_id: admin_product_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Authoritative design-transform store.
///
/// `read_position` returns the authoritative `designPositions` record and
/// `read_legacy` the per-zone `designTransforms` record. `Ok(None)` means not found.
pub trait DesignTransformStore: Send + Sync {
    /// Authoritative record for `key`.
    fn read_position(&self, key: &PositionKey) -> ZonecompResult<Option<DesignTransform>>;
    /// Legacy per-zone record for `key` at `zone_index`.
    fn read_legacy(
        &self,
        key: &PositionKey,
        zone_index: usize,
    ) -> ZonecompResult<Option<DesignTransform>>;
    /// Replace the authoritative record for `key`.
    fn write_position(&self, key: &PositionKey, transform: DesignTransform) -> ZonecompResult<()>;
}

/// Process-local cache with the same key shape; never authoritative.
pub trait LocalCacheStore: Send + Sync {
    /// Cached record for `key`.
    fn read(&self, key: &PositionKey) -> ZonecompResult<Option<DesignTransform>>;
    /// Replace the cached record for `key`.
    fn write(&self, key: &PositionKey, transform: DesignTransform) -> ZonecompResult<()>;
}

fn poisoned() -> ZonecompError {
    ZonecompError::store("transform store lock poisoned")
}

/// In-memory design-transform store.
#[derive(Debug, Default)]
pub struct MemoryTransformStore {
    positions: Mutex<HashMap<PositionKey, DesignTransform>>,
    legacy: Mutex<HashMap<(PositionKey, usize), DesignTransform>>,
    position_writes: AtomicUsize,
}

impl MemoryTransformStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a legacy per-zone record.
    pub fn insert_legacy(
        &self,
        key: PositionKey,
        zone_index: usize,
        transform: DesignTransform,
    ) -> ZonecompResult<()> {
        self.legacy
            .lock()
            .map_err(|_| poisoned())?
            .insert((key, zone_index), transform);
        Ok(())
    }

    /// Number of authoritative writes accepted so far.
    pub fn position_writes(&self) -> usize {
        self.position_writes.load(Ordering::SeqCst)
    }
}

impl DesignTransformStore for MemoryTransformStore {
    fn read_position(&self, key: &PositionKey) -> ZonecompResult<Option<DesignTransform>> {
        Ok(self.positions.lock().map_err(|_| poisoned())?.get(key).cloned())
    }

    fn read_legacy(
        &self,
        key: &PositionKey,
        zone_index: usize,
    ) -> ZonecompResult<Option<DesignTransform>> {
        Ok(self
            .legacy
            .lock()
            .map_err(|_| poisoned())?
            .get(&(key.clone(), zone_index))
            .cloned())
    }

    fn write_position(&self, key: &PositionKey, transform: DesignTransform) -> ZonecompResult<()> {
        self.positions
            .lock()
            .map_err(|_| poisoned())?
            .insert(key.clone(), transform);
        self.position_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory local cache.
#[derive(Debug, Default)]
pub struct MemoryLocalCache {
    entries: Mutex<HashMap<PositionKey, DesignTransform>>,
}

impl MemoryLocalCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalCacheStore for MemoryLocalCache {
    fn read(&self, key: &PositionKey) -> ZonecompResult<Option<DesignTransform>> {
        Ok(self.entries.lock().map_err(|_| poisoned())?.get(key).cloned())
    }

    fn write(&self, key: &PositionKey, transform: DesignTransform) -> ZonecompResult<()> {
        self.entries
            .lock()
            .map_err(|_| poisoned())?
            .insert(key.clone(), transform);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/transform.rs"]
mod tests;
