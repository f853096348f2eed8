//! Zone deduplication and propagation across every photo of a product.

pub(crate) mod synchronizer;
