use std::collections::HashMap;

use crate::foundation::{core::Size, math::is_positive_finite};

/// Explicit registry of natural image sizes reported by image-load notifications.
///
/// Load notifications are one-shot per `(url, container)` pair. A container entry is
/// bound to the URL it was loaded with and is replaced when the container starts showing
/// another image. The URL entry keeps the first size seen and stands in for "first
/// visible rendering" when a container is not mounted yet.
#[derive(Clone, Debug, Default)]
pub struct ImageSizeRegistry {
    by_container: HashMap<String, (String, Size)>,
    by_url: HashMap<String, Size>,
}

impl ImageSizeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful image load. Returns `true` if this was the first load of
    /// `url` in the container (or of the URL when no container is given).
    ///
    /// Degenerate sizes are ignored; a failed load never reaches the registry.
    pub fn record_load(&mut self, container_id: Option<&str>, url: &str, natural: Size) -> bool {
        if !is_positive_finite(natural.width) || !is_positive_finite(natural.height) {
            tracing::debug!(url, ?natural, "ignoring degenerate image load notification");
            return false;
        }
        let url_first = !self.by_url.contains_key(url);
        if url_first {
            self.by_url.insert(url.to_string(), natural);
        }
        let Some(id) = container_id else {
            return url_first;
        };
        if let Some((bound, _)) = self.by_container.get(id) {
            if bound == url {
                return false;
            }
            tracing::debug!(container = id, from = %bound, to = url, "container switched image");
        }
        self.by_container
            .insert(id.to_string(), (url.to_string(), natural));
        true
    }

    /// Natural size of the image bound to `container_id`.
    ///
    /// With `url` given, a container currently showing a different image yields `None`.
    pub fn for_container(&self, container_id: &str, url: Option<&str>) -> Option<Size> {
        let (bound, size) = self.by_container.get(container_id)?;
        match url {
            Some(url) if url != bound => None,
            _ => Some(*size),
        }
    }

    /// Natural size of the first rendering of `url`.
    pub fn for_url(&self, url: &str) -> Option<Size> {
        self.by_url.get(url).copied()
    }

    /// Forget the container binding, e.g. when it unmounts.
    pub fn unmount(&mut self, container_id: &str) {
        self.by_container.remove(container_id);
    }

    /// Whether any load notification has fired for `container_id`.
    pub fn has_loaded(&self, container_id: &str) -> bool {
        self.by_container.contains_key(container_id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/registry.rs"]
mod tests;
