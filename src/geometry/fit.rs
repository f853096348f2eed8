//! "Contain" fitting of an image into a display box.

use crate::foundation::{
    core::{Point, Rect, Size},
    math::is_positive_finite,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Uniform scale and centering offset mapping image pixels into a display box.
///
/// Recomputed on every render; never persisted.
pub struct ViewportMapping {
    /// Image pixel to display pixel scale.
    pub scale: f64,
    /// Horizontal letterbox offset.
    pub offset_x: f64,
    /// Vertical letterbox offset.
    pub offset_y: f64,
    /// Width of the displayed image.
    pub display_width: f64,
    /// Height of the displayed image.
    pub display_height: f64,
}

impl ViewportMapping {
    /// Mapping for a box that has not been laid out yet.
    pub const ZERO: Self = Self {
        scale: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
        display_width: 0.0,
        display_height: 0.0,
    };

    /// Whether anything can be drawn through this mapping.
    pub fn is_renderable(&self) -> bool {
        self.display_width > 0.0 && self.display_height > 0.0
    }

    /// The displayed image rectangle in box coordinates.
    pub fn display_rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.display_width,
            self.offset_y + self.display_height,
        )
    }

    /// Map a point in image pixels to box coordinates.
    pub fn image_to_display(&self, p: Point) -> Point {
        Point::new(
            self.offset_x + p.x * self.scale,
            self.offset_y + p.y * self.scale,
        )
    }

    /// Map a point in box coordinates back to image pixels.
    ///
    /// Returns `None` for a non-renderable mapping.
    pub fn display_to_image(&self, p: Point) -> Option<Point> {
        if !self.is_renderable() || self.scale <= 0.0 {
            return None;
        }
        Some(Point::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        ))
    }
}

/// Fit `image` into `container` so the whole image is visible, centred and letterboxed.
///
/// A zero-sized container or image yields [`ViewportMapping::ZERO`].
pub fn fit_contain(image: Size, container: Size) -> ViewportMapping {
    if !is_positive_finite(container.width)
        || !is_positive_finite(container.height)
        || !is_positive_finite(image.width)
        || !is_positive_finite(image.height)
    {
        return ViewportMapping::ZERO;
    }

    let image_ratio = image.width / image.height;
    let box_ratio = container.width / container.height;

    let (display_width, display_height, offset_x, offset_y) = if image_ratio > box_ratio {
        let h = container.width / image_ratio;
        (container.width, h, 0.0, (container.height - h) / 2.0)
    } else {
        let w = container.height * image_ratio;
        (w, container.height, (container.width - w) / 2.0, 0.0)
    };

    ViewportMapping {
        scale: display_width / image.width,
        offset_x,
        offset_y,
        display_width,
        display_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
