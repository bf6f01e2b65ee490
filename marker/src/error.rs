//! Marker Error Types
//!
//! This module defines the [`MarkerError`] enum. Only the reference and submission adapters can
//! fail: marking and renumbering themselves are total and never produce an error.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//!
//! fn require_assignment_column(headers: &[&str]) -> Result<(), MarkerError> {
//!     if !headers.contains(&"assignment") {
//!         return Err(MarkerError::MissingColumn("assignment".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

/// Represents all error types that can occur in the marker adapters.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MarkerError {
    /// A required sheet column is absent.
    #[error("Missing columns: {0}")]
    MissingColumn(String),
    /// JSON is malformed or does not match the expected shape.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// I/O error (file not found, unreadable, too large).
    #[error("I/O error: {0}")]
    IoError(String),
}
