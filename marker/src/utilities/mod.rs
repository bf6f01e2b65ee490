//! # Utilities
//!
//! Helpers shared across the `marker` crate:
//! - [`canonical`]: the answer comparison form.
//! - [`natural_order`]: `teil2 < teil10` ordering for keys and assignment ids.
//! - [`word_count`]: the word measure used by the feedback bounds.
//! - [`file_loader`]: checked loading of JSON sources from disk.

pub mod canonical;
pub mod file_loader;
pub mod natural_order;
pub mod word_count;
