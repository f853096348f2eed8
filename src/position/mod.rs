//! Design transform resolution across the authoritative record, the legacy record, the
//! local cache and the default, plus opportunistic repair of the authoritative record.

pub(crate) mod reconcile;
pub(crate) mod resolve;
