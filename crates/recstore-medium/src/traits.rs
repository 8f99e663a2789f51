use crate::error::MediumResult;

/// A flat, text-valued storage medium.
///
/// Entries are addressed by `(location, name)`. A location is opaque to the
/// medium's callers: a directory path for [`FsMedium`](crate::FsMedium), a
/// plain key for [`InMemoryMedium`](crate::InMemoryMedium).
///
/// Implementations must satisfy:
/// - `list` on an unknown location returns an empty list, not an error.
/// - `read` and `delete` of a missing entry fail with
///   [`MediumError::NotFound`](crate::MediumError::NotFound).
/// - `write` creates or replaces the entry in one step; a concurrent reader
///   sees either the old or the new contents.
/// - Thread safety is the medium's concern (`Send + Sync`).
pub trait StorageMedium: Send + Sync {
    /// Names of all entries at `location`.
    fn list(&self, location: &str) -> MediumResult<Vec<String>>;

    /// Read the full text of an entry.
    fn read(&self, location: &str, name: &str) -> MediumResult<String>;

    /// Create or replace an entry.
    fn write(&self, location: &str, name: &str, contents: &str) -> MediumResult<()>;

    /// Remove an entry.
    fn delete(&self, location: &str, name: &str) -> MediumResult<()>;

    /// Whether an entry exists. Infallible by contract: backend errors
    /// count as "does not exist".
    fn exists(&self, location: &str, name: &str) -> bool;

    /// Remove an entry if it is present. Returns `true` if it existed.
    fn delete_if_exists(&self, location: &str, name: &str) -> MediumResult<bool> {
        if !self.exists(location, name) {
            return Ok(false);
        }
        self.delete(location, name)?;
        Ok(true)
    }
}
