//! Single pure resolver choosing the active design transform and its provenance.

use crate::{
    foundation::math::is_positive_finite,
    placement::resolver::{DEFAULT_DESIGN_SCALE, DesignTransform},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Where a resolved design transform came from, in priority order.
pub enum TransformSource {
    /// Authoritative server-of-record position.
    DesignPositions,
    /// Legacy per-zone transform record.
    DesignTransforms,
    /// Client-local cache entry.
    LocalCache,
    /// Synthesized from the design application's scale.
    Default,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Candidate records gathered for one `(product, zone, design)` triple.
pub struct PositionCandidates {
    /// Authoritative record.
    pub design_positions: Option<DesignTransform>,
    /// Legacy record for the same zone index.
    pub design_transforms: Option<DesignTransform>,
    /// Local cache entry.
    pub local_cache: Option<DesignTransform>,
}

#[derive(Clone, Debug, PartialEq)]
/// Patched authoritative record to write back so a gap does not recur.
pub struct TransformRepair {
    /// Full record to store.
    pub transform: DesignTransform,
    /// Source the repaired record originally came from.
    pub repaired_from: TransformSource,
}

#[derive(Clone, Debug, PartialEq)]
/// Active transform for a render, with provenance and optional repair.
pub struct ResolvedPosition {
    /// Transform to feed into placement.
    pub transform: DesignTransform,
    /// Winning source.
    pub source: TransformSource,
    /// Present when cache-only design dimensions were merged in.
    pub repair: Option<TransformRepair>,
}

fn present(candidate: &Option<DesignTransform>) -> Option<&DesignTransform> {
    candidate.as_ref().filter(|t| !t.is_empty())
}

/// Pick the active transform: authoritative, legacy, local cache, then default.
///
/// When the authoritative or legacy winner lacks design dimensions and the cache holds
/// both, the missing ones are merged in and a [`TransformRepair`] is returned.
pub fn resolve_position(
    candidates: &PositionCandidates,
    design_application_scale: Option<f64>,
) -> ResolvedPosition {
    let winner = present(&candidates.design_positions)
        .map(|t| (t, TransformSource::DesignPositions))
        .or_else(|| {
            present(&candidates.design_transforms).map(|t| (t, TransformSource::DesignTransforms))
        });

    if let Some((record, source)) = winner {
        let mut transform = record.clone();
        let repair = merge_cached_size(&mut transform, candidates.local_cache.as_ref()).then(|| {
            TransformRepair {
                transform: transform.clone(),
                repaired_from: source,
            }
        });
        return ResolvedPosition {
            transform,
            source,
            repair,
        };
    }

    if let Some(cached) = present(&candidates.local_cache) {
        return ResolvedPosition {
            transform: cached.clone(),
            source: TransformSource::LocalCache,
            repair: None,
        };
    }

    let scale = design_application_scale
        .filter(|s| is_positive_finite(*s))
        .unwrap_or(DEFAULT_DESIGN_SCALE);
    ResolvedPosition {
        transform: DesignTransform::new(0.0, 0.0, scale, 0.0),
        source: TransformSource::Default,
        repair: None,
    }
}

/// Fill missing design dimensions from a cache entry that has both.
fn merge_cached_size(target: &mut DesignTransform, cache: Option<&DesignTransform>) -> bool {
    if target.has_design_size() {
        return false;
    }
    let Some(size) = cache.and_then(DesignTransform::design_size) else {
        return false;
    };
    if target.design_width.is_none() {
        target.design_width = Some(size.width);
    }
    if target.design_height.is_none() {
        target.design_height = Some(size.height);
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/position/resolve.rs"]
mod tests;
