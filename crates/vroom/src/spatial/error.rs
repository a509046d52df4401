use thiserror::Error;

/// Errors reported by the spatial index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpatialError {
    /// The key handle is not stored in this tree (never inserted, or already removed).
    #[error("key not found in tree")]
    KeyNotFound,
}
