use std::{collections::HashMap, sync::Mutex};

use crate::{
    catalog::model::{ColorVariation, Delimitation},
    foundation::error::{ZonecompError, ZonecompResult},
};

/// Persistence boundary for per-image zone lists.
///
/// Writes are full replacements; there is no partial patch.
pub trait ZoneStore: Send + Sync {
    /// Current zone list for `image_url` (empty when unknown).
    fn read_zones(&self, image_url: &str) -> ZonecompResult<Vec<Delimitation>>;
    /// Replace the zone list for `image_url`.
    fn write_zones(&self, image_url: &str, zones: Vec<Delimitation>) -> ZonecompResult<()>;
}

/// Write the zone list of every image of every variation.
///
/// Returns the number of images written; stops at the first failing write.
pub fn persist_variations(
    store: &dyn ZoneStore,
    variations: &[ColorVariation],
) -> ZonecompResult<usize> {
    let mut written = 0usize;
    for image in variations.iter().flat_map(|v| v.images.iter()) {
        store.write_zones(&image.url, image.delimitations.clone())?;
        written += 1;
    }
    Ok(written)
}

/// In-memory zone store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryZoneStore {
    zones: Mutex<HashMap<String, Vec<Delimitation>>>,
}

impl MemoryZoneStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ZoneStore for MemoryZoneStore {
    fn read_zones(&self, image_url: &str) -> ZonecompResult<Vec<Delimitation>> {
        let zones = self
            .zones
            .lock()
            .map_err(|_| ZonecompError::store("zone store lock poisoned"))?;
        Ok(zones.get(image_url).cloned().unwrap_or_default())
    }

    fn write_zones(&self, image_url: &str, zones: Vec<Delimitation>) -> ZonecompResult<()> {
        self.zones
            .lock()
            .map_err(|_| ZonecompError::store("zone store lock poisoned"))?
            .insert(image_url.to_string(), zones);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/zone.rs"]
mod tests;
