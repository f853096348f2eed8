//! Placement of a design image inside a projected zone.

use crate::foundation::{
    core::{Affine, PixelRect, Point, Rect, Size, Vec2},
    math::{clamp_symmetric, finite_or, is_positive_finite},
};

/// Share of the zone a design occupies when no scale has been recorded.
pub const DEFAULT_DESIGN_SCALE: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Allowed scale range for a design.
pub struct ScaleConstraints {
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
}

impl ScaleConstraints {
    fn apply(&self, scale: f64) -> f64 {
        if self.min_scale.is_finite()
            && self.max_scale.is_finite()
            && self.min_scale <= self.max_scale
        {
            scale.clamp(self.min_scale, self.max_scale)
        } else {
            scale
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// User-controlled placement of a design inside a zone.
///
/// Every field is optional on the wire; missing values resolve to
/// `{x: 0, y: 0, scale: 0.8, rotation: 0}` at placement time.
pub struct DesignTransform {
    /// Horizontal offset from the zone centre, in display pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Vertical offset from the zone centre, in display pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Fraction of the zone size the design occupies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Design rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Intrinsic design width; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_width: Option<f64>,
    /// Intrinsic design height; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_height: Option<f64>,
    /// Optional scale range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ScaleConstraints>,
}

impl DesignTransform {
    /// Build a fully specified placement.
    pub fn new(x: f64, y: f64, scale: f64, rotation: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            scale: Some(scale),
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    /// Attach intrinsic design dimensions.
    pub fn with_design_size(mut self, width: f64, height: f64) -> Self {
        self.design_width = Some(width);
        self.design_height = Some(height);
        self
    }

    /// Whether no placement field is set at all.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.scale.is_none() && self.rotation.is_none()
    }

    /// Whether both intrinsic dimensions are present.
    pub fn has_design_size(&self) -> bool {
        self.design_width.is_some() && self.design_height.is_some()
    }

    /// Intrinsic design size, when both dimensions are recorded.
    pub fn design_size(&self) -> Option<Size> {
        Some(Size::new(self.design_width?, self.design_height?))
    }

    /// Effective scale after defaults and constraints.
    pub fn effective_scale(&self, default_scale: f64) -> f64 {
        let scale = match self.scale {
            Some(s) if is_positive_finite(s) => s,
            _ => default_scale,
        };
        match &self.constraints {
            Some(c) => c.apply(scale),
            None => scale,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Final render descriptor for a design, relative to the zone rectangle's centre.
pub struct RenderDescriptor {
    /// Rendered design width.
    pub width: f64,
    /// Rendered design height.
    pub height: f64,
    /// Clamped horizontal offset from the zone centre.
    pub translate_x: f64,
    /// Clamped vertical offset from the zone centre.
    pub translate_y: f64,
    /// Design rotation in degrees, applied after translation.
    pub rotation: f64,
    /// Zone container rotation in degrees, independent of the design rotation.
    pub zone_rotation: f64,
}

impl RenderDescriptor {
    /// Design bounds in zone-centre space before rotation.
    pub fn local_bounds(&self) -> Rect {
        Rect::from_center_size(
            Point::new(self.translate_x, self.translate_y),
            Size::new(self.width, self.height),
        )
    }

    /// Map design-local points (origin at the design centre) into zone-centre space.
    ///
    /// Rotation happens around the design centre; the translation is in unrotated zone
    /// space.
    pub fn design_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.translate_x, self.translate_y))
            * Affine::rotate(self.rotation.to_radians())
    }

    /// Map zone-centre space into display-box space for the given zone rectangle.
    pub fn zone_affine(&self, zone_rect: &PixelRect) -> Affine {
        Affine::translate(zone_rect.center().to_vec2())
            * Affine::rotate(self.zone_rotation.to_radians())
    }

    /// Map design-local points straight into display-box space.
    pub fn to_display_affine(&self, zone_rect: &PixelRect) -> Affine {
        self.zone_affine(zone_rect) * self.design_affine()
    }
}

/// Place a design inside a projected zone using [`DEFAULT_DESIGN_SCALE`].
pub fn resolve_placement(
    zone_rect: &PixelRect,
    zone_rotation: f64,
    transform: &DesignTransform,
) -> RenderDescriptor {
    resolve_placement_with(zone_rect, zone_rotation, transform, DEFAULT_DESIGN_SCALE)
}

/// Place a design inside a projected zone.
///
/// The design is sized as a fraction of the zone (never from its intrinsic pixels) and
/// its offset is clamped so the unrotated bounds stay inside the zone. A scale of `1`
/// or more pins the design to the zone centre.
pub fn resolve_placement_with(
    zone_rect: &PixelRect,
    zone_rotation: f64,
    transform: &DesignTransform,
    default_scale: f64,
) -> RenderDescriptor {
    let default_scale = if is_positive_finite(default_scale) {
        default_scale
    } else {
        DEFAULT_DESIGN_SCALE
    };
    let scale = transform.effective_scale(default_scale);
    let width = zone_rect.width * scale;
    let height = zone_rect.height * scale;

    let max_x = (zone_rect.width - width) / 2.0;
    let max_y = (zone_rect.height - height) / 2.0;
    let translate_x = clamp_symmetric(finite_or(transform.x, 0.0), max_x);
    let translate_y = clamp_symmetric(finite_or(transform.y, 0.0), max_y);

    RenderDescriptor {
        width,
        height,
        translate_x,
        translate_y,
        rotation: finite_or(transform.rotation, 0.0),
        zone_rotation: if zone_rotation.is_finite() {
            zone_rotation
        } else {
            0.0
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/resolver.rs"]
mod tests;
