use crate::error::MarkerError;
use crate::types::ReferenceEntry;

/// Somewhere answer keys can be looked up by assignment id.
///
/// An unknown assignment is not an error: implementations return
/// [`ReferenceEntry::empty`] and the caller treats it as "nothing to mark".
/// Errors are reserved for sources that cannot be read at all.
pub trait ReferenceSource {
    /// Known assignment ids in natural order.
    fn assignments(&self) -> Result<Vec<String>, MarkerError>;

    fn reference(&self, assignment_id: &str) -> Result<ReferenceEntry, MarkerError>;
}
