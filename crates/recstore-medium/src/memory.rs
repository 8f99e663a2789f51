use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{MediumError, MediumResult};
use crate::names::validate_entry_name;
use crate::traits::StorageMedium;

type EntryMap = BTreeMap<(String, String), String>;

/// In-memory, `BTreeMap`-based storage medium.
///
/// Intended for tests and embedding. Entries are keyed by
/// `(location, name)` behind a `RwLock`; contents are cloned on read and
/// write. Data is lost when the medium is dropped.
pub struct InMemoryMedium {
    entries: RwLock<EntryMap>,
}

impl InMemoryMedium {
    /// Create a new empty medium.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Total number of entries across all locations.
    pub fn len(&self) -> MediumResult<usize> {
        Ok(self.read_lock()?.len())
    }

    /// Returns `true` if the medium holds no entries.
    pub fn is_empty(&self) -> MediumResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove every entry at every location.
    pub fn clear(&self) -> MediumResult<()> {
        self.write_lock()?.clear();
        Ok(())
    }

    /// Insert an entry without name validation.
    ///
    /// Lets tests seed a location with housekeeping entries such as `..`
    /// that a real directory listing may report.
    pub fn insert_raw(&self, location: &str, name: &str, contents: &str) -> MediumResult<()> {
        self.write_lock()?
            .insert((location.to_string(), name.to_string()), contents.to_string());
        Ok(())
    }

    fn read_lock(&self) -> MediumResult<RwLockReadGuard<'_, EntryMap>> {
        self.entries
            .read()
            .map_err(|e| MediumError::Poisoned(e.to_string()))
    }

    fn write_lock(&self) -> MediumResult<RwLockWriteGuard<'_, EntryMap>> {
        self.entries
            .write()
            .map_err(|e| MediumError::Poisoned(e.to_string()))
    }

    fn key(location: &str, name: &str) -> (String, String) {
        (location.to_string(), name.to_string())
    }

    fn not_found(location: &str, name: &str) -> MediumError {
        MediumError::NotFound {
            location: location.to_string(),
            name: name.to_string(),
        }
    }
}

impl Default for InMemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageMedium for InMemoryMedium {
    fn list(&self, location: &str) -> MediumResult<Vec<String>> {
        let map = self.read_lock()?;
        Ok(map
            .keys()
            .filter(|(loc, _)| loc == location)
            .map(|(_, name)| name.clone())
            .collect())
    }

    fn read(&self, location: &str, name: &str) -> MediumResult<String> {
        let map = self.read_lock()?;
        map.get(&Self::key(location, name))
            .cloned()
            .ok_or_else(|| Self::not_found(location, name))
    }

    fn write(&self, location: &str, name: &str, contents: &str) -> MediumResult<()> {
        validate_entry_name(name)?;
        self.write_lock()?
            .insert(Self::key(location, name), contents.to_string());
        Ok(())
    }

    fn delete(&self, location: &str, name: &str) -> MediumResult<()> {
        self.write_lock()?
            .remove(&Self::key(location, name))
            .map(|_| ())
            .ok_or_else(|| Self::not_found(location, name))
    }

    fn exists(&self, location: &str, name: &str) -> bool {
        self.read_lock()
            .map(|map| map.contains_key(&Self::key(location, name)))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for InMemoryMedium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryMedium")
            .field("entry_count", &self.len().ok())
            .finish()
    }
}
