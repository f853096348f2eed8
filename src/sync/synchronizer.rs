//! Canonical zone set construction and propagation across colour variations.

use std::collections::HashMap;

use crate::{
    catalog::model::{ColorVariation, Delimitation, find_image},
    foundation::error::{ZonecompError, ZonecompResult},
    foundation::math::digits_ordinal,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Deduplication key for a zone.
pub enum ZoneKey {
    /// The zone's non-blank name.
    Name(String),
    /// Fallback key derived from the zone's origin id.
    Id(String),
}

impl ZoneKey {
    /// Key for `zone`: its name when present, else the id it was copied from.
    ///
    /// Per-image copies keep their canonical id in `origin_id`, so an unnamed zone keeps
    /// one key across every image it was written to.
    pub fn of(zone: &Delimitation) -> Self {
        match zone.display_name() {
            Some(name) => Self::Name(name.to_string()),
            None => Self::Id(zone.origin().to_string()),
        }
    }
}

impl std::fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(n) => write!(f, "name:{n}"),
            Self::Id(id) => write!(f, "id:{id}"),
        }
    }
}

/// Recency ordinal of a zone: explicit `seq`, else digits parsed from the id.
pub fn recency_ordinal(zone: &Delimitation) -> u64 {
    zone.seq.unwrap_or_else(|| digits_ordinal(&zone.id))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How many canonical zones a product may keep.
pub enum ZonePolicy {
    /// Only the most recently resolved zone survives a rebuild.
    #[default]
    SingleZone,
    /// Every deduplicated zone survives, in first-seen order.
    MultiZone,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Identity scheme applied when a canonical zone is written onto an image.
pub enum IdScheme {
    /// Keep the canonical zone's id on every image.
    #[default]
    Preserve,
    /// Derive an independent, deterministic id per image.
    PerImage,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Options for zone synchronization.
pub struct SyncOpts {
    /// Zone count policy.
    pub policy: ZonePolicy,
    /// Id rewriting scheme.
    pub ids: IdScheme,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Deduplicated zone list considered "the product's" zones.
///
/// Each rebuild supersedes the previous set wholesale.
pub struct CanonicalZoneSet {
    zones: Vec<Delimitation>,
}

impl CanonicalZoneSet {
    /// Zones in canonical order.
    pub fn zones(&self) -> &[Delimitation] {
        &self.zones
    }

    /// Number of canonical zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Dedup keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = ZoneKey> + '_ {
        self.zones.iter().map(ZoneKey::of)
    }

    /// Consume the set.
    pub fn into_zones(self) -> Vec<Delimitation> {
        self.zones
    }
}

/// Build the canonical zone set from the zones already known and the incoming ones.
///
/// Zones sharing a key collapse to the one with the larger recency ordinal; on a tie the
/// later one wins. Under [`ZonePolicy::SingleZone`] only the last zone inserted or
/// replaced during accumulation is kept.
pub fn build_canonical_set(
    existing: &[Delimitation],
    incoming: &[Delimitation],
    policy: ZonePolicy,
) -> CanonicalZoneSet {
    let mut slots: Vec<Delimitation> = Vec::new();
    let mut index: HashMap<ZoneKey, usize> = HashMap::new();
    let mut last_resolved: Option<usize> = None;

    for zone in existing.iter().chain(incoming) {
        let key = ZoneKey::of(zone);
        match index.get(&key) {
            Some(&i) => {
                if recency_ordinal(zone) >= recency_ordinal(&slots[i]) {
                    slots[i] = zone.clone();
                    last_resolved = Some(i);
                }
            }
            None => {
                index.insert(key, slots.len());
                slots.push(zone.clone());
                last_resolved = Some(slots.len() - 1);
            }
        }
    }

    if policy == ZonePolicy::SingleZone
        && slots.len() > 1
        && let Some(i) = last_resolved
    {
        tracing::debug!(
            dropped = slots.len() - 1,
            kept = %slots[i].id,
            "single-zone policy collapsed canonical set"
        );
        let kept = slots.swap_remove(i);
        slots = vec![kept];
    }

    CanonicalZoneSet { zones: slots }
}

fn per_image_id(url: &str, zone: &Delimitation) -> String {
    let material = format!("{url}\u{0}{}\u{0}{}", ZoneKey::of(zone), recency_ordinal(zone));
    format!(
        "zone-{:016x}",
        xxhash_rust::xxh3::xxh3_64(material.as_bytes())
    )
}

/// Overwrite every image of every variation with the canonical set.
///
/// Returns the number of images written.
pub fn propagate(
    variations: &mut [ColorVariation],
    set: &CanonicalZoneSet,
    ids: IdScheme,
) -> usize {
    let mut written = 0usize;
    for image in variations.iter_mut().flat_map(|v| v.images.iter_mut()) {
        image.delimitations = set
            .zones
            .iter()
            .map(|zone| match ids {
                IdScheme::Preserve => zone.clone(),
                IdScheme::PerImage => Delimitation {
                    id: per_image_id(&image.url, zone),
                    seq: Some(recency_ordinal(zone)),
                    origin_id: Some(zone.origin().to_string()),
                    ..zone.clone()
                },
            })
            .collect();
        written += 1;
    }
    written
}

fn known_zones(variations: &[ColorVariation]) -> Vec<Delimitation> {
    variations
        .iter()
        .flat_map(|v| v.images.iter())
        .flat_map(|img| img.delimitations.iter().cloned())
        .collect()
}

/// Duplicate the selected zones of `source_url` across the whole product.
///
/// All zones already on the product are accumulated first, then the selected ones; the
/// resulting canonical set replaces the zone list of every image. Persisting the result
/// is up to the caller.
#[tracing::instrument(skip(variations, opts), fields(selected = selected_ids.len()))]
pub fn duplicate_zones(
    variations: &mut [ColorVariation],
    source_url: &str,
    selected_ids: &[&str],
    opts: SyncOpts,
) -> ZonecompResult<CanonicalZoneSet> {
    let source = find_image(variations, source_url).ok_or_else(|| {
        ZonecompError::validation(format!("source image not found: {source_url}"))
    })?;

    let mut incoming = Vec::with_capacity(selected_ids.len());
    for id in selected_ids {
        match source.zone_by_id(id) {
            Some(zone) => incoming.push(zone.clone()),
            None => tracing::debug!(zone = %id, "selected zone not on source image; skipping"),
        }
    }

    let existing = known_zones(variations);
    let set = build_canonical_set(&existing, &incoming, opts.policy);
    propagate(variations, &set, opts.ids);
    Ok(set)
}

/// Apply a product-level edit of one zone and propagate the rebuilt set.
#[tracing::instrument(skip(variations, edited, opts), fields(zone = %edited.id))]
pub fn apply_zone_edit(
    variations: &mut [ColorVariation],
    edited: Delimitation,
    opts: SyncOpts,
) -> CanonicalZoneSet {
    let existing = known_zones(variations);
    let set = build_canonical_set(&existing, std::slice::from_ref(&edited), opts.policy);
    propagate(variations, &set, opts.ids);
    set
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Monotonic sequence for newly authored zones.
pub struct ZoneSequence {
    next: u64,
}

impl ZoneSequence {
    /// Seed past every ordinal already in use so new zones always sort last.
    pub fn seeded_from<'a>(zones: impl IntoIterator<Item = &'a Delimitation>) -> Self {
        let max = zones.into_iter().map(recency_ordinal).max();
        Self {
            next: max.map_or(1, |m| m.saturating_add(1)),
        }
    }

    /// Take the next sequence number.
    pub fn next_seq(&mut self) -> u64 {
        let seq = self.next;
        self.next = self.next.saturating_add(1);
        seq
    }

    /// Stamp `zone` with the next sequence number.
    pub fn stamp(&mut self, zone: Delimitation) -> Delimitation {
        let seq = self.next_seq();
        zone.with_seq(seq)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/synchronizer.rs"]
mod tests;
