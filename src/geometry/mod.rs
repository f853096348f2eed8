//! Zone geometry: reference sizes, percentage normalization, contain fitting and
//! projection into display pixels.
//!
//! Everything here is synchronous and pure apart from [`ImageSizeRegistry`], which
//! callers own and feed from image-load notifications.
//!
//! [`ImageSizeRegistry`]: registry::ImageSizeRegistry

pub(crate) mod fit;
pub(crate) mod normalize;
pub(crate) mod project;
pub(crate) mod registry;
