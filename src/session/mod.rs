//! Render-time driver tying image loads and box resizes to zone geometry.

pub(crate) mod opts;
pub(crate) mod surface;
