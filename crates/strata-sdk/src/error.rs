//! Error types for the representation contract

/// Result type for representation operations
pub type ReprResult<T> = Result<T, ReprError>;

/// Exception category a managed-language layer maps a `ReprError` onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionCategory {
    /// The operation is not supported by the value's representation
    InvalidOperation,
}

/// Representation operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReprError {
    /// The representation refuses the requested operation
    #[error("{0}")]
    InvalidOperation(String),
}

impl ReprError {
    /// Create an invalid-operation error with the given diagnostic
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        ReprError::InvalidOperation(msg.into())
    }

    /// Exception category for this error
    pub fn category(&self) -> ExceptionCategory {
        match self {
            ReprError::InvalidOperation(_) => ExceptionCategory::InvalidOperation,
        }
    }

    /// Diagnostic message carried by the error
    pub fn message(&self) -> &str {
        match self {
            ReprError::InvalidOperation(msg) => msg,
        }
    }
}
