//! Zone coordinate normalization into percentage space.

use crate::{
    catalog::model::{CoordinateType, Delimitation},
    foundation::core::{PercentRect, Size},
    foundation::math::is_positive_finite,
    geometry::registry::ImageSizeRegistry,
};

/// Raw values strictly above this are read as pixels even when labelled as percentages.
pub const IMPLICIT_PIXEL_THRESHOLD: f64 = 100.0;

/// Fallback reference sizes used before any image has loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallbackSize;

impl FallbackSize {
    /// General inputs (zone editors, product pages).
    pub const GENERAL: Size = Size::new(600.0, 400.0);
    /// Design-preview surfaces.
    pub const DESIGN_PREVIEW: Size = Size::new(1200.0, 1200.0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where a resolved reference size came from.
pub enum ReferenceSource {
    /// The zone's own authoring-time record.
    Debug,
    /// The image currently bound to the zone's container.
    Container,
    /// The first rendering of an image with the same URL.
    Url,
    /// Hard-coded fallback; nothing has loaded yet.
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Reference size plus its provenance.
pub struct ReferenceSize {
    /// Reference dimensions in pixels.
    pub size: Size,
    /// Which source supplied `size`.
    pub source: ReferenceSource,
}

#[derive(Clone, Copy, Debug, Default)]
/// Identifiers used to locate the image a zone is displayed on.
pub struct ReferenceLookup<'a> {
    /// Container identifier assigned by the rendering layer, if mounted.
    pub container_id: Option<&'a str>,
    /// Image URL.
    pub url: Option<&'a str>,
}

fn usable(size: Size) -> Option<Size> {
    (is_positive_finite(size.width) && is_positive_finite(size.height)).then_some(size)
}

/// Resolve the reference size a zone's raw numbers should be read against.
///
/// First available wins: the zone's debug record, the container's image, the first
/// rendering of the same URL, then `fallback`.
pub fn resolve_reference_size(
    zone: &Delimitation,
    lookup: ReferenceLookup<'_>,
    registry: &ImageSizeRegistry,
    fallback: Size,
) -> ReferenceSize {
    if let Some(size) = zone.debug.and_then(|d| usable(d.size())) {
        return ReferenceSize {
            size,
            source: ReferenceSource::Debug,
        };
    }
    if let Some(size) = lookup
        .container_id
        .and_then(|id| registry.for_container(id, lookup.url))
        .and_then(usable)
    {
        return ReferenceSize {
            size,
            source: ReferenceSource::Container,
        };
    }
    if let Some(size) = lookup.url.and_then(|u| registry.for_url(u)).and_then(usable) {
        return ReferenceSize {
            size,
            source: ReferenceSource::Url,
        };
    }
    tracing::debug!(zone = %zone.id, "no loaded image for zone; using fallback reference size");
    ReferenceSize {
        size: usable(fallback).unwrap_or(FallbackSize::GENERAL),
        source: ReferenceSource::Fallback,
    }
}

/// Whether a zone's raw numbers are in pixel space.
///
/// Either the zone says so, or one of its values exceeds
/// [`IMPLICIT_PIXEL_THRESHOLD`]. A value of exactly `100` stays a percentage.
pub fn is_pixel_space(zone: &Delimitation) -> bool {
    zone.coordinate_type == CoordinateType::Pixel
        || [zone.x, zone.y, zone.width, zone.height]
            .iter()
            .any(|&v| v > IMPLICIT_PIXEL_THRESHOLD)
}

/// Convert a zone into a percentage rectangle against `reference`.
///
/// The result is not clamped; overflowing zones are tolerated downstream.
pub fn normalize_zone(zone: &Delimitation, reference: Size) -> PercentRect {
    if !is_pixel_space(zone) {
        return PercentRect::new(zone.x, zone.y, zone.width, zone.height);
    }
    let reference = usable(reference).unwrap_or(FallbackSize::GENERAL);
    let sx = 100.0 / reference.width;
    let sy = 100.0 / reference.height;
    PercentRect::new(zone.x * sx, zone.y * sy, zone.width * sx, zone.height * sy)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/normalize.rs"]
mod tests;
