/// Result alias for fallible zonecomp operations.
pub type ZonecompResult<T> = Result<T, ZonecompError>;

/// Errors surfaced by zonecomp.
///
/// Geometry never fails: undrawable zones come back as `None` and missing sizes fall back
/// to defaults. Only option loading, model (de)serialization, duplication inputs and the
/// external store boundaries produce errors.
#[derive(thiserror::Error, Debug)]
pub enum ZonecompError {
    /// Rejected engine options or zone-sync input, e.g. an unknown source image.
    #[error("validation error: {0}")]
    Validation(String),

    /// A zone, transform or cache store could not read or write a record.
    #[error("store error: {0}")]
    Store(String),

    /// Product or option JSON that does not match the model.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything a store implementation reports through `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ZonecompError {
    /// Validation failure with `msg`.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Store failure with `msg`.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Serialization failure with `msg`.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ZonecompError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
