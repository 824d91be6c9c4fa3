//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, kind
/// mismatches, stale confirmations). IO concerns belong to the loader.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A value failed validation (e.g. a zero-quantity product).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Two products of different concrete kinds were combined.
    #[error("product kinds do not match: {left} vs {right}")]
    KindMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// A pending change no longer matches the current state.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn kind_mismatch(left: &'static str, right: &'static str) -> Self {
        Self::KindMismatch { left, right }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
