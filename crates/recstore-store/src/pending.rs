//! Per-record pending actions and their transitions.
//!
//! | current \ call | add   | update                         | delete  |
//! |----------------|-------|--------------------------------|---------|
//! | Unchanged      | Added | Updated                        | Deleted |
//! | Added          | Added | Added                          | Deleted |
//! | Updated        | Added | Updated                        | Deleted |
//! | Deleted        | Added | Updated if persisted, else Added | Deleted |
//!
//! `save` turns Added and Updated into Unchanged and drops Deleted records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unsaved intent recorded against one identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PendingAction {
    /// Matches what the medium holds.
    #[default]
    Unchanged,
    /// Staged for its first write (or a rewrite after a staged delete).
    Added,
    /// Staged to overwrite an existing entry.
    Updated,
    /// Staged for removal; already hidden from reads.
    Deleted,
}

impl PendingAction {
    /// State after an `add` call.
    pub fn on_add(self) -> Self {
        Self::Added
    }

    /// State after an `update` call on a record the store already tracks.
    pub fn on_update(self, persisted: bool) -> Self {
        match self {
            Self::Added => Self::Added,
            Self::Unchanged | Self::Updated => Self::Updated,
            Self::Deleted if persisted => Self::Updated,
            Self::Deleted => Self::Added,
        }
    }

    /// State after a `delete` call.
    pub fn on_delete(self) -> Self {
        Self::Deleted
    }

    /// Whether `save` has work to do for this record.
    pub fn is_dirty(self) -> bool {
        self != Self::Unchanged
    }

    /// Whether `save` writes this record.
    pub fn writes(self) -> bool {
        matches!(self, Self::Added | Self::Updated)
    }

    /// Whether reads include this record.
    pub fn is_visible(self) -> bool {
        self != Self::Deleted
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unchanged => "unchanged",
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::PendingAction::*;
    use super::*;

    const ALL: [PendingAction; 4] = [Unchanged, Added, Updated, Deleted];

    #[test]
    fn add_always_wins() {
        for state in ALL {
            assert_eq!(state.on_add(), Added);
        }
    }

    #[test]
    fn delete_always_wins() {
        for state in ALL {
            assert_eq!(state.on_delete(), Deleted);
        }
    }

    #[test]
    fn update_keeps_new_records_new() {
        assert_eq!(Added.on_update(false), Added);
        assert_eq!(Added.on_update(true), Added);
    }

    #[test]
    fn update_on_existing_records() {
        assert_eq!(Unchanged.on_update(true), Updated);
        assert_eq!(Updated.on_update(true), Updated);
    }

    #[test]
    fn update_after_delete_depends_on_persistence() {
        assert_eq!(Deleted.on_update(true), Updated);
        assert_eq!(Deleted.on_update(false), Added);
    }

    #[test]
    fn alternating_sequence_ends_deleted() {
        let mut state = Unchanged;
        let calls: [fn(PendingAction) -> PendingAction; 10] = [
            PendingAction::on_add,
            PendingAction::on_delete,
            PendingAction::on_add,
            PendingAction::on_delete,
            PendingAction::on_add,
            PendingAction::on_delete,
            PendingAction::on_add,
            PendingAction::on_add,
            PendingAction::on_delete,
            PendingAction::on_delete,
        ];
        for call in calls {
            state = call(state);
        }
        assert_eq!(state, Deleted);
    }

    #[test]
    fn predicates() {
        assert!(!Unchanged.is_dirty());
        assert!(Added.writes() && Updated.writes());
        assert!(!Deleted.writes() && !Unchanged.writes());
        assert!(!Deleted.is_visible());
        assert!(Unchanged.is_visible());
    }

    #[test]
    fn display_labels() {
        assert_eq!(Added.to_string(), "added");
        assert_eq!(PendingAction::default(), Unchanged);
    }
}
