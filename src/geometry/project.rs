use crate::{
    catalog::model::Delimitation,
    foundation::core::{PercentRect, PixelRect, Size},
    geometry::{fit::ViewportMapping, normalize::normalize_zone},
};

/// Project a percentage rectangle through a viewport mapping into box pixels.
///
/// Returns `None` when the projected width or height is not positive; callers skip
/// drawing the zone (this is normal before the first layout).
pub fn project_percent(pct: PercentRect, mapping: &ViewportMapping) -> Option<PixelRect> {
    let rect = PixelRect::new(
        mapping.offset_x + (pct.left / 100.0) * mapping.display_width,
        mapping.offset_y + (pct.top / 100.0) * mapping.display_height,
        (pct.width / 100.0) * mapping.display_width,
        (pct.height / 100.0) * mapping.display_height,
    );
    rect.is_drawable().then_some(rect)
}

/// Normalize `zone` against `reference` and project it through `mapping`.
pub fn project_zone(
    zone: &Delimitation,
    reference: Size,
    mapping: &ViewportMapping,
) -> Option<PixelRect> {
    project_percent(normalize_zone(zone, reference), mapping)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/project.rs"]
mod tests;
