//! Status and save reporting types.

use recstore_entity::RecordId;
use serde::{Deserialize, Serialize};

use crate::pending::PendingAction;

/// Identifiers grouped by their pending action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
    /// Records matching the medium.
    pub unchanged: Vec<RecordId>,
    /// Records staged for their first write.
    pub added: Vec<RecordId>,
    /// Records staged to overwrite their entry.
    pub updated: Vec<RecordId>,
    /// Records staged for removal.
    pub deleted: Vec<RecordId>,
}

impl StoreStatus {
    /// Create an empty status.
    pub fn new() -> Self {
        Self::default()
    }

    /// File `id` under `action`.
    pub fn push(&mut self, id: RecordId, action: PendingAction) {
        match action {
            PendingAction::Unchanged => self.unchanged.push(id),
            PendingAction::Added => self.added.push(id),
            PendingAction::Updated => self.updated.push(id),
            PendingAction::Deleted => self.deleted.push(id),
        }
    }

    /// Returns `true` if nothing is waiting for `save`.
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    /// Number of records `save` would touch.
    pub fn pending_count(&self) -> usize {
        self.added.len() + self.updated.len() + self.deleted.len()
    }
}

/// What a successful `save` did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReport {
    /// Entries written (added or updated records).
    pub written: usize,
    /// Entries removed from the medium.
    pub removed: usize,
    /// Deleted records dropped without touching the medium.
    pub discarded: usize,
}

impl SaveReport {
    /// Returns `true` if the save touched the medium.
    pub fn touched_medium(&self) -> bool {
        self.written > 0 || self.removed > 0
    }
}
