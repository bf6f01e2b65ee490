//!
//! Traits Module
//!
//! Core seams of the marker, one per pluggable concern:
//!
//! - [`comparator`]: decides whether a student token matches the expected one.
//! - [`feedback`]: turns a scorer tally into the feedback string.
//! - [`parser`]: fallible adapters from source documents into domain types.
//! - [`reference_source`]: where answer keys come from (sheet, answers dictionary).

pub mod comparator;
pub mod feedback;
pub mod parser;
pub mod reference_source;
