//! Engine error types

use strata_sdk::ReprError;

/// Engine errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A representation refused an operation
    #[error(transparent)]
    Repr(#[from] ReprError),

    /// No representation registered under this name
    #[error("Unknown representation: {0}")]
    UnknownRepr(String),

    /// A representation with this name is already registered
    #[error("Representation already registered: {0}")]
    DuplicateRepr(String),

    /// Handle refers to a reclaimed or never-issued slot
    #[error("Stale handle: {0}")]
    StaleHandle(String),
}

/// Engine result
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repr_error_is_transparent() {
        let err: EngineError = ReprError::invalid_operation("nope").into();
        assert_eq!(err.to_string(), "nope");
        assert!(matches!(err, EngineError::Repr(_)));
    }

    #[test]
    fn test_unknown_repr_display() {
        let err = EngineError::UnknownRepr("P6opaque".to_string());
        assert_eq!(err.to_string(), "Unknown representation: P6opaque");
    }
}
