//! Product catalog data consumed by the engine: colour variations, photos and zones.

pub(crate) mod model;
