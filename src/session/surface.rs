use crate::{
    catalog::model::Delimitation,
    foundation::core::{PixelRect, Size},
    geometry::{
        fit::{ViewportMapping, fit_contain},
        normalize::{ReferenceLookup, ReferenceSize, resolve_reference_size},
        project::project_zone,
        registry::ImageSizeRegistry,
    },
    placement::resolver::{DesignTransform, RenderDescriptor, resolve_placement_with},
    session::opts::EngineOpts,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Kind of surface a product photo is displayed on; selects the fallback reference size.
pub enum SurfaceKind {
    /// Product pages and zone editors.
    #[default]
    General,
    /// Design-preview canvases.
    DesignPreview,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// A zone that can be drawn, with the design placed inside it.
pub struct ZonePlacement {
    /// Zone rectangle in display-box pixels.
    pub zone_rect: PixelRect,
    /// Design render descriptor relative to the zone centre.
    pub design: RenderDescriptor,
}

/// Display surface for one product photo.
///
/// Tracks the two asynchronous facts geometry depends on: the image's natural size
/// (one-shot load notification) and the display box size (resize notifications). The
/// viewport mapping is derived from both on every call and is never cached across them.
#[derive(Clone, Debug)]
pub struct ZoneSurface {
    url: String,
    container_id: Option<String>,
    natural: Option<Size>,
    box_size: Size,
    fallback: Size,
    default_scale: f64,
}

impl ZoneSurface {
    /// Create a surface for `url`, optionally bound to a rendering-layer container id.
    pub fn new(
        url: impl Into<String>,
        container_id: Option<String>,
        kind: SurfaceKind,
        opts: &EngineOpts,
    ) -> Self {
        Self {
            url: url.into(),
            container_id,
            natural: None,
            box_size: Size::ZERO,
            fallback: match kind {
                SurfaceKind::General => opts.fallback_size,
                SurfaceKind::DesignPreview => opts.preview_fallback_size,
            },
            default_scale: opts.default_design_scale,
        }
    }

    /// Image URL shown on this surface.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Handle the image-load notification. Only the first load takes effect.
    ///
    /// The size is also recorded in `registry` so other surfaces and zone normalization
    /// can find it.
    pub fn on_image_loaded(&mut self, natural: Size, registry: &mut ImageSizeRegistry) -> bool {
        if self.natural.is_some() {
            return false;
        }
        registry.record_load(self.container_id.as_deref(), &self.url, natural);
        let known = match self.container_id.as_deref() {
            Some(id) => registry.for_container(id, Some(&self.url)),
            None => registry.for_url(&self.url),
        };
        self.natural = known;
        tracing::debug!(url = %self.url, loaded = known.is_some(), "image load notification");
        known.is_some()
    }

    /// Handle a display-box resize notification.
    pub fn on_box_resized(&mut self, size: Size) {
        self.box_size = size;
    }

    /// Whether the image has loaded.
    pub fn is_loaded(&self) -> bool {
        self.natural.is_some()
    }

    /// Current viewport mapping, or `None` until the image has loaded and the box has a
    /// non-zero size.
    pub fn mapping(&self) -> Option<ViewportMapping> {
        let natural = self.natural?;
        Some(fit_contain(natural, self.box_size)).filter(ViewportMapping::is_renderable)
    }

    /// Reference size `zone` should be normalized against on this surface.
    pub fn reference_for(&self, zone: &Delimitation, registry: &ImageSizeRegistry) -> ReferenceSize {
        resolve_reference_size(
            zone,
            ReferenceLookup {
                container_id: self.container_id.as_deref(),
                url: Some(&self.url),
            },
            registry,
            self.fallback,
        )
    }

    /// Project `zone` into display-box pixels, or `None` when it cannot be drawn yet.
    pub fn project(&self, zone: &Delimitation, registry: &ImageSizeRegistry) -> Option<PixelRect> {
        let mapping = self.mapping()?;
        let reference = self.reference_for(zone, registry);
        project_zone(zone, reference.size, &mapping)
    }

    /// Project every drawable zone, preserving order and skipping suppressed ones.
    pub fn project_all<'a>(
        &self,
        zones: &'a [Delimitation],
        registry: &ImageSizeRegistry,
    ) -> Vec<(&'a Delimitation, PixelRect)> {
        zones
            .iter()
            .filter_map(|z| self.project(z, registry).map(|r| (z, r)))
            .collect()
    }

    /// Project `zone` and place a design inside it.
    pub fn place(
        &self,
        zone: &Delimitation,
        transform: &DesignTransform,
        registry: &ImageSizeRegistry,
    ) -> Option<ZonePlacement> {
        let zone_rect = self.project(zone, registry)?;
        let design =
            resolve_placement_with(&zone_rect, zone.rotation_deg(), transform, self.default_scale);
        Some(ZonePlacement { zone_rect, design })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/surface.rs"]
mod tests;
