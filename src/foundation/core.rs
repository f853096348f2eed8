pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Rectangle in percentage-of-image space (`0..=100` on both axes when well formed).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PercentRect {
    /// Left edge, percent of image width.
    pub left: f64,
    /// Top edge, percent of image height.
    pub top: f64,
    /// Width, percent of image width.
    pub width: f64,
    /// Height, percent of image height.
    pub height: f64,
}

impl PercentRect {
    /// The rectangle covering the whole image.
    pub const FULL: Self = Self {
        left: 0.0,
        top: 0.0,
        width: 100.0,
        height: 100.0,
    };

    /// Build a percentage rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether the rectangle lies inside `[0, 100]` on both axes.
    pub fn is_within_bounds(&self) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.left + self.width <= 100.0
            && self.top + self.height <= 100.0
    }
}

/// Rectangle in display-box pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge in pixels.
    pub left: f64,
    /// Top edge in pixels.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl PixelRect {
    /// Build a pixel rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Centre point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Size of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Convert to a kurbo [`Rect`] (`x0, y0, x1, y1`).
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// A rectangle is drawable only when both extents are strictly positive.
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

impl From<Rect> for PixelRect {
    fn from(r: Rect) -> Self {
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
