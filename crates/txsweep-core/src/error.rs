//! Error types for txsweep-core
//!
//! Two families live here: `CoreError` for the deduplication engine and
//! `StoreError` for `TransactionStore` implementations. The storage port
//! is defined in this crate, so its error type is too.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A duplicate group with fewer than 2 members
    InvalidGroup,
    /// Storage IO failure
    StoreIo,
    /// Stored document could not be decoded
    StoreDecode,
    /// Storage backend rejected the operation
    StoreBackend,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidGroup => write!(f, "INVALID_GROUP"),
            ErrorCode::StoreIo => write!(f, "STORE_IO"),
            ErrorCode::StoreDecode => write!(f, "STORE_DECODE"),
            ErrorCode::StoreBackend => write!(f, "STORE_BACKEND"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Error type for `TransactionStore` implementations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to decode stored document: {message}")]
    Decode { message: String },

    #[error("Storage backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Io(_) => ErrorCode::StoreIo,
            StoreError::Decode { .. } => ErrorCode::StoreDecode,
            StoreError::Backend { .. } => ErrorCode::StoreBackend,
        }
    }
}

/// Main error type for txsweep-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Duplicate group must have at least 2 members, got {size}")]
    InvalidGroup { size: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidGroup { .. } => ErrorCode::InvalidGroup,
            CoreError::Store(e) => e.code(),
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Contract violation by the grouping step, not an operational failure
            CoreError::InvalidGroup { .. } => ErrorSeverity::Warning,
            CoreError::Store(_) => ErrorSeverity::Error,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidGroup.to_string(), "INVALID_GROUP");
        assert_eq!(ErrorCode::StoreBackend.to_string(), "STORE_BACKEND");
    }

    #[test]
    fn test_core_error_code() {
        let error = CoreError::InvalidGroup { size: 1 };
        assert_eq!(error.code(), ErrorCode::InvalidGroup);
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = CoreError::Store(StoreError::Backend {
            message: "quota exceeded".to_string(),
        });
        assert_eq!(error.code(), ErrorCode::StoreBackend);
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_store_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error: StoreError = io_err.into();
        assert_eq!(error.code(), ErrorCode::StoreIo);
    }

    #[test]
    fn test_invalid_group_message_carries_size() {
        let error = CoreError::InvalidGroup { size: 0 };
        assert!(error.to_string().contains("got 0"));
    }
}
