use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError, mpsc},
    time::Duration,
};

use crate::{
    foundation::error::ZonecompResult,
    placement::resolver::DesignTransform,
    position::resolve::{PositionCandidates, ResolvedPosition, resolve_position},
    store::transform::{DesignTransformStore, LocalCacheStore, PositionKey},
};

/// Options controlling reconciliation side effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReconcileOpts {
    /// Write repaired records back to the authoritative store.
    pub write_back: bool,
}

impl Default for ReconcileOpts {
    fn default() -> Self {
        Self { write_back: true }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Result of a background write-back.
pub enum WriteBackOutcome {
    /// The authoritative store accepted the repaired record.
    Written,
    /// The store rejected it; the failure was logged.
    Failed,
}

/// Handle to an in-flight write-back.
///
/// Dropping it is fine; the write proceeds regardless and its outcome is discarded.
#[derive(Debug)]
pub struct WriteBackTicket {
    rx: mpsc::Receiver<WriteBackOutcome>,
}

impl WriteBackTicket {
    /// Block up to `timeout` for the outcome. Never call this from a render path.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<WriteBackOutcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Resolution result plus the optional background write-back.
#[derive(Debug)]
pub struct Reconciled {
    /// Active transform and provenance.
    pub resolved: ResolvedPosition,
    /// Present when a repair was dispatched.
    pub write_back: Option<WriteBackTicket>,
}

/// Reads candidates from the stores, resolves them, and repairs degraded records.
///
/// At most one write-back per key is in flight; clones share that bookkeeping.
#[derive(Clone)]
pub struct Reconciler {
    transforms: Arc<dyn DesignTransformStore>,
    cache: Arc<dyn LocalCacheStore>,
    opts: ReconcileOpts,
    in_flight: Arc<Mutex<HashSet<PositionKey>>>,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

fn found_or_none(
    read: ZonecompResult<Option<DesignTransform>>,
    what: &'static str,
) -> Option<DesignTransform> {
    read.unwrap_or_else(|err| {
        tracing::warn!(source = what, error = %err, "transform read failed; treating as not found");
        None
    })
}

impl Reconciler {
    /// Build a reconciler over the given stores.
    pub fn new(
        transforms: Arc<dyn DesignTransformStore>,
        cache: Arc<dyn LocalCacheStore>,
        opts: ReconcileOpts,
    ) -> Self {
        Self {
            transforms,
            cache,
            opts,
            in_flight: Arc::default(),
        }
    }

    /// Gather every candidate record for `key` and `zone_index`.
    ///
    /// Store failures degrade to "not found".
    pub fn gather(&self, key: &PositionKey, zone_index: usize) -> PositionCandidates {
        PositionCandidates {
            design_positions: found_or_none(self.transforms.read_position(key), "designPositions"),
            design_transforms: found_or_none(
                self.transforms.read_legacy(key, zone_index),
                "designTransforms",
            ),
            local_cache: found_or_none(self.cache.read(key), "localCache"),
        }
    }

    /// Resolve the active transform and dispatch a best-effort repair if one is needed.
    ///
    /// The write-back runs on the rayon pool and is never awaited here. While one is
    /// pending for `key`, later calls resolve the same repair in memory without
    /// dispatching another.
    #[tracing::instrument(
        skip(self, key),
        fields(design = %key.design_id, product = %key.admin_product_id)
    )]
    pub fn resolve(
        &self,
        key: &PositionKey,
        zone_index: usize,
        design_application_scale: Option<f64>,
    ) -> Reconciled {
        let candidates = self.gather(key, zone_index);
        let resolved = resolve_position(&candidates, design_application_scale);
        tracing::debug!(source = ?resolved.source, repair = resolved.repair.is_some(), "resolved design position");

        let write_back = match &resolved.repair {
            Some(repair) if self.opts.write_back => {
                self.dispatch_write_back(key.clone(), repair.transform.clone())
            }
            _ => None,
        };
        Reconciled {
            resolved,
            write_back,
        }
    }

    /// Store `transform` in the local cache; failures are logged and ignored.
    pub fn remember_locally(&self, key: &PositionKey, transform: DesignTransform) {
        if let Err(err) = self.cache.write(key, transform) {
            tracing::warn!(design = %key.design_id, error = %err, "local cache write failed");
        }
    }

    fn dispatch_write_back(
        &self,
        key: PositionKey,
        transform: DesignTransform,
    ) -> Option<WriteBackTicket> {
        let claimed = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone());
        if !claimed {
            tracing::debug!(design = %key.design_id, "write-back already pending; not dispatching");
            return None;
        }

        let (tx, rx) = mpsc::channel();
        let store = Arc::clone(&self.transforms);
        let in_flight = Arc::clone(&self.in_flight);
        rayon::spawn(move || {
            let outcome = match store.write_position(&key, transform) {
                Ok(()) => WriteBackOutcome::Written,
                Err(err) => {
                    tracing::warn!(
                        design = %key.design_id,
                        product = %key.admin_product_id,
                        error = %err,
                        "design position write-back failed"
                    );
                    WriteBackOutcome::Failed
                }
            };
            in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&key);
            let _ = tx.send(outcome);
        });
        Some(WriteBackTicket { rx })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/position/reconcile.rs"]
mod tests;
