//! zonecomp is a delimitation-based design compositing engine.
//!
//! It takes customization zones drawn on product photos and answers one question per
//! render: where, in display pixels, does a user's design go?
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: `Delimitation + reference size -> PercentRect` (percent or pixel input)
//! 2. **Fit**: `natural image size + display box -> ViewportMapping` ("contain" letterboxing)
//! 3. **Project**: `PercentRect + ViewportMapping -> PixelRect` (or nothing, before layout)
//! 4. **Place**: `PixelRect + DesignTransform -> RenderDescriptor` (clamped inside the zone)
//!
//! Upstream of rendering, [`duplicate_zones`] and [`apply_zone_edit`] rebuild the
//! product's [`CanonicalZoneSet`], and [`Reconciler`] picks the active
//! [`DesignTransform`] out of up to four sources with [`TransformSource`] provenance.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No fatal geometry errors**: every stage degrades to a documented default.
//! - **No IO**: persistence sits behind [`ZoneStore`], [`DesignTransformStore`] and
//!   [`LocalCacheStore`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod catalog;
mod foundation;
mod geometry;
mod placement;
mod position;
mod session;
mod store;
mod sync;

pub use catalog::model::{
    ColorVariation, CoordinateType, Delimitation, DelimitationDebug, ProductImage, all_images,
    find_image,
};
pub use foundation::core::{Affine, PercentRect, PixelRect, Point, Rect, Size, Vec2};
pub use foundation::error::{ZonecompError, ZonecompResult};
pub use geometry::fit::{ViewportMapping, fit_contain};
pub use geometry::normalize::{
    FallbackSize, IMPLICIT_PIXEL_THRESHOLD, ReferenceLookup, ReferenceSize, ReferenceSource,
    is_pixel_space, normalize_zone, resolve_reference_size,
};
pub use geometry::project::{project_percent, project_zone};
pub use geometry::registry::ImageSizeRegistry;
pub use placement::resolver::{
    DEFAULT_DESIGN_SCALE, DesignTransform, RenderDescriptor, ScaleConstraints, resolve_placement,
    resolve_placement_with,
};
pub use position::reconcile::{
    ReconcileOpts, Reconciled, Reconciler, WriteBackOutcome, WriteBackTicket,
};
pub use position::resolve::{
    PositionCandidates, ResolvedPosition, TransformRepair, TransformSource, resolve_position,
};
pub use session::opts::EngineOpts;
pub use session::surface::{SurfaceKind, ZonePlacement, ZoneSurface};
pub use store::transform::{
    DesignTransformStore, LocalCacheStore, MemoryLocalCache, MemoryTransformStore, PositionKey,
};
pub use store::zone::{MemoryZoneStore, ZoneStore, persist_variations};
pub use sync::synchronizer::{
    CanonicalZoneSet, IdScheme, SyncOpts, ZoneKey, ZonePolicy, ZoneSequence, apply_zone_edit,
    build_canonical_set, duplicate_zones, propagate, recency_ordinal,
};
