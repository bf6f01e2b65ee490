//! Parser Trait
//!
//! This module defines the [`Parser`] trait, a generic interface for turning source documents
//! (answers-dictionary entries, sheet rows, stored drafts) into strongly-typed values.
//!
//! Student answer text is *not* parsed through this trait: that parse cannot fail and lives on
//! [`crate::parsers::student_parser::StudentParser`].
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//! use marker::traits::parser::Parser;
//! use serde_json::Value;
//!
//! struct TitleParser;
//!
//! impl<'a> Parser<&'a Value, String> for TitleParser {
//!     fn parse(&self, raw: &'a Value) -> Result<String, MarkerError> {
//!         raw.get("title")
//!             .and_then(Value::as_str)
//!             .map(str::to_string)
//!             .ok_or_else(|| MarkerError::InvalidJson("title missing".to_string()))
//!     }
//! }
//! ```

use crate::error::MarkerError;

/// A generic trait for parsing data into a strongly-typed Rust structure.
///
/// # Type Parameters
///
/// * `Input` - The input type to be parsed.
/// * `Output` - The output type produced by the parser.
pub trait Parser<Input, Output> {
    /// Parse an input value into the target type.
    ///
    /// # Errors
    ///
    /// Returns a [`MarkerError`] if the input does not have the expected shape.
    fn parse(&self, input: Input) -> Result<Output, MarkerError>;
}
