use crate::{
    foundation::core::Size,
    foundation::error::{ZonecompError, ZonecompResult},
    foundation::math::is_positive_finite,
    geometry::normalize::FallbackSize,
    placement::resolver::DEFAULT_DESIGN_SCALE,
    position::reconcile::ReconcileOpts,
    sync::synchronizer::{IdScheme, SyncOpts, ZonePolicy},
};

/// Engine-wide configuration.
///
/// Every field has a default, so a partial JSON document (or `{}`) is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOpts {
    /// Reference size used for zones on general surfaces before any image loads.
    pub fallback_size: Size,
    /// Reference size used on design-preview surfaces before any image loads.
    pub preview_fallback_size: Size,
    /// Design scale used when a transform records none.
    pub default_design_scale: f64,
    /// Canonical zone count policy.
    pub zone_policy: ZonePolicy,
    /// Id rewriting when propagating canonical zones.
    pub id_scheme: IdScheme,
    /// Reconciliation side effects.
    pub reconcile: ReconcileOpts,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            fallback_size: FallbackSize::GENERAL,
            preview_fallback_size: FallbackSize::DESIGN_PREVIEW,
            default_design_scale: DEFAULT_DESIGN_SCALE,
            zone_policy: ZonePolicy::default(),
            id_scheme: IdScheme::default(),
            reconcile: ReconcileOpts::default(),
        }
    }
}

impl EngineOpts {
    /// Parse and validate options from JSON.
    pub fn from_json(json: &str) -> ZonecompResult<Self> {
        let opts: Self = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject fallback sizes that are not positive and default scales outside `(0, 1]`.
    pub fn validate(&self) -> ZonecompResult<()> {
        for (name, size) in [
            ("fallbackSize", self.fallback_size),
            ("previewFallbackSize", self.preview_fallback_size),
        ] {
            if !is_positive_finite(size.width) || !is_positive_finite(size.height) {
                return Err(ZonecompError::validation(format!(
                    "{name} must be positive, got {}x{}",
                    size.width, size.height
                )));
            }
        }
        if !is_positive_finite(self.default_design_scale) || self.default_design_scale > 1.0 {
            return Err(ZonecompError::validation(
                "defaultDesignScale must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Synchronizer options derived from this config.
    pub fn sync_opts(&self) -> SyncOpts {
        SyncOpts {
            policy: self.zone_policy,
            ids: self.id_scheme,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
