use crate::{
    foundation::core::Size,
    foundation::error::{ZonecompError, ZonecompResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Coordinate frame a zone's raw numbers were authored in.
pub enum CoordinateType {
    /// Percent of the reference image (`0..=100`).
    #[default]
    Percentage,
    /// Absolute pixels against the reference image size.
    Pixel,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Reference image size recorded by the authoring tool when the zone was drawn.
pub struct DelimitationDebug {
    /// Reference image width in pixels.
    pub reference_width: f64,
    /// Reference image height in pixels.
    pub reference_height: f64,
}

impl DelimitationDebug {
    /// Reference size as a kurbo [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.reference_width, self.reference_height)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A rectangular customization zone on a product photo.
pub struct Delimitation {
    /// Identifier, unique within one image.
    pub id: String,
    /// Left edge in the zone's coordinate frame.
    pub x: f64,
    /// Top edge in the zone's coordinate frame.
    pub y: f64,
    /// Width in the zone's coordinate frame.
    pub width: f64,
    /// Height in the zone's coordinate frame.
    pub height: f64,
    /// Declared coordinate frame.
    #[serde(default)]
    pub coordinate_type: CoordinateType,
    /// Zone container rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Human-readable zone name, used as the deduplication key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Exact reference size used at authoring time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DelimitationDebug>,
    /// Explicit creation sequence; preferred over id-derived ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
    /// Id of the canonical zone this copy was written from under per-image ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<String>,
}

impl Delimitation {
    /// Build a percentage-space zone with no optional metadata.
    pub fn percent(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
            coordinate_type: CoordinateType::Percentage,
            rotation: None,
            name: None,
            debug: None,
            seq: None,
            origin_id: None,
        }
    }

    /// Build a pixel-space zone with no optional metadata.
    pub fn pixel(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            coordinate_type: CoordinateType::Pixel,
            ..Self::percent(id, x, y, width, height)
        }
    }

    /// Set the zone name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the zone rotation in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Record the reference size the zone was authored against.
    pub fn with_reference(mut self, width: f64, height: f64) -> Self {
        self.debug = Some(DelimitationDebug {
            reference_width: width,
            reference_height: height,
        });
        self
    }

    /// Set the explicit creation sequence.
    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    /// Zone rotation in degrees, `0` when absent or non-finite.
    pub fn rotation_deg(&self) -> f64 {
        crate::foundation::math::finite_or(self.rotation, 0.0)
    }

    /// Id of the zone this one was copied from, or its own id.
    pub fn origin(&self) -> &str {
        self.origin_id.as_deref().unwrap_or(&self.id)
    }

    /// Non-blank zone name, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One product photo and the zones drawn on it.
pub struct ProductImage {
    /// Image URL; also the fallback lookup key for natural size.
    pub url: String,
    /// Natural pixel size, only known after the image has loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural_size: Option<Size>,
    /// Ordered zones on this image.
    #[serde(default)]
    pub delimitations: Vec<Delimitation>,
}

impl ProductImage {
    /// Build an image with no zones and unknown natural size.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            natural_size: None,
            delimitations: Vec::new(),
        }
    }

    /// Look up a zone by id.
    pub fn zone_by_id(&self, id: &str) -> Option<&Delimitation> {
        self.delimitations.iter().find(|d| d.id == id)
    }

    /// Number of zones on the image.
    pub fn zone_count(&self) -> usize {
        self.delimitations.len()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A colour variant of a product and its photos.
pub struct ColorVariation {
    /// Display name of the colour.
    pub name: String,
    /// Colour code, e.g. `#ffffff`.
    pub color_code: String,
    /// Ordered photos for this colour.
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl ColorVariation {
    /// Build a colour variation with no images.
    pub fn new(name: impl Into<String>, color_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_code: color_code.into(),
            images: Vec::new(),
        }
    }

    /// Parse a list of colour variations from JSON.
    pub fn list_from_json(json: &str) -> ZonecompResult<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| ZonecompError::serde(e.to_string()))
    }

    /// Serialize a list of colour variations to JSON.
    pub fn list_to_json(variations: &[Self]) -> ZonecompResult<String> {
        serde_json::to_string(variations).map_err(|e| ZonecompError::serde(e.to_string()))
    }
}

/// Iterate every image of every colour variation, in order.
pub fn all_images(variations: &[ColorVariation]) -> impl Iterator<Item = &ProductImage> {
    variations.iter().flat_map(|v| v.images.iter())
}

/// Find an image by URL across all colour variations.
pub fn find_image<'a>(variations: &'a [ColorVariation], url: &str) -> Option<&'a ProductImage> {
    all_images(variations).find(|img| img.url == url)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
