//! The record store: staged CRUD over one location of a storage medium.

use std::collections::BTreeMap;
use std::sync::Arc;

use recstore_codec::{Codec, JsonCodec};
use recstore_entity::{Entity, RecordId};
use recstore_medium::{MediumError, StorageMedium};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::allocator::IdAllocator;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::naming::NamingConvention;
use crate::pending::PendingAction;
use crate::status::{SaveReport, StoreStatus};

/// One identifier's stored value and unsaved intent.
#[derive(Debug)]
struct Tracked<T, C> {
    entity: Entity<T, C>,
    action: PendingAction,
    /// Whether the medium holds an entry for this identifier.
    persisted: bool,
}

impl<T, C> Tracked<T, C> {
    fn loaded(entity: Entity<T, C>) -> Self {
        Self {
            entity,
            action: PendingAction::Unchanged,
            persisted: true,
        }
    }

    fn staged(entity: Entity<T, C>) -> Self {
        Self {
            entity,
            action: PendingAction::Added,
            persisted: false,
        }
    }
}

/// All records of one logical type at one location.
///
/// The store owns its records. Callers receive detached copies from
/// [`entities`](Self::entities) and [`get`](Self::get) and push changes back
/// with [`add`](Self::add), [`update`](Self::update) and
/// [`delete`](Self::delete). Nothing reaches the medium until
/// [`save`](Self::save); dropping the store discards unsaved changes.
///
/// A store is meant for one owner at a time. Two stores over the same
/// location do not coordinate; the last save wins.
pub struct RecordStore<T, C = JsonCodec> {
    location: String,
    medium: Arc<dyn StorageMedium>,
    naming: NamingConvention,
    codec: C,
    records: BTreeMap<RecordId, Tracked<T, C>>,
    allocator: IdAllocator,
}

impl<T> RecordStore<T, JsonCodec>
where
    T: Serialize + DeserializeOwned,
{
    /// Open a JSON store at `location`, naming entries after `T`.
    pub fn open(location: impl Into<String>, medium: Arc<dyn StorageMedium>) -> StoreResult<Self> {
        Self::open_with(location, medium, StoreConfig::default(), JsonCodec::default())
    }

    /// Open a JSON store at `location` with explicit configuration.
    pub fn open_with_config(
        location: impl Into<String>,
        medium: Arc<dyn StorageMedium>,
        config: StoreConfig,
    ) -> StoreResult<Self> {
        Self::open_with(location, medium, config, JsonCodec::default())
    }
}

impl<T, C> RecordStore<T, C>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Open a store at `location` and load every matching entry.
    ///
    /// Fails with [`StoreError::InvalidArgument`] for an empty location.
    /// Entries that do not match the naming convention are skipped; entries
    /// that match but do not decode, or are not text at all, are kept as
    /// empty records. Other medium failures while listing or reading
    /// propagate.
    pub fn open_with(
        location: impl Into<String>,
        medium: Arc<dyn StorageMedium>,
        config: StoreConfig,
        codec: C,
    ) -> StoreResult<Self> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "store location must not be empty".into(),
            ));
        }
        let naming = config.naming_for::<T>(codec.extension())?;

        let mut records = BTreeMap::new();
        let mut skipped = 0usize;
        for name in medium.list(&location)? {
            let Some(id) = naming.parse(&name) else {
                debug!(%location, entry = %name, "skipping foreign entry");
                skipped += 1;
                continue;
            };
            let entity = match medium.read(&location, &name) {
                Ok(text) => decode_stored(id, &codec, &text),
                Err(MediumError::NotText { .. }) => Entity::with_codec(id, codec.clone()),
                Err(err) => return Err(err.into()),
            };
            if !entity.has_value() {
                warn!(%location, entry = %name, "entry did not decode; keeping empty record");
            }
            records.insert(id, Tracked::loaded(entity));
        }

        let allocator = IdAllocator::seeded(records.keys().copied());
        info!(
            %location,
            type_name = naming.type_name(),
            loaded = records.len(),
            skipped,
            next_id = %allocator.peek(),
            "record store opened"
        );

        Ok(Self {
            location,
            medium,
            naming,
            codec,
            records,
            allocator,
        })
    }

    // ---------------------------------------------------------------
    // Staging
    // ---------------------------------------------------------------

    /// Allocate an identifier and return an empty entity carrying it.
    ///
    /// The entity is not part of the store until it is added or updated.
    /// Identifiers strictly increase across calls, saved or not.
    pub fn create(&mut self) -> StoreResult<Entity<T, C>> {
        if !self.naming.fits(self.allocator.peek()) {
            return Err(StoreError::IdsExhausted {
                max: self.naming.max_id().get(),
            });
        }
        let id = self.allocator.allocate();
        debug!(location = %self.location, %id, "identifier allocated");
        Ok(Entity::with_codec(id, self.codec.clone()))
    }

    /// Stage `entity` as a new record, replacing any staged value for its id.
    pub fn add(&mut self, entity: &Entity<T, C>) -> StoreResult<()> {
        let id = self.check(entity)?;
        let snapshot = entity.detached_copy();
        match self.records.get_mut(&id) {
            Some(tracked) => {
                tracked.action = tracked.action.on_add();
                tracked.entity = snapshot;
            }
            None => {
                self.records.insert(id, Tracked::staged(snapshot));
            }
        }
        debug!(location = %self.location, %id, "record staged for add");
        Ok(())
    }

    /// Stage new contents for `entity`'s record.
    ///
    /// An identifier the store does not track is treated as [`add`](Self::add).
    pub fn update(&mut self, entity: &Entity<T, C>) -> StoreResult<()> {
        let id = self.check(entity)?;
        let Some(tracked) = self.records.get_mut(&id) else {
            return self.add(entity);
        };
        tracked.action = tracked.action.on_update(tracked.persisted);
        tracked.entity = entity.detached_copy();
        debug!(
            location = %self.location,
            %id,
            action = %tracked.action,
            "record staged for update"
        );
        Ok(())
    }

    /// Stage removal of `entity`'s record and hide it from reads.
    ///
    /// Matching is by identifier. An identifier the store does not track is
    /// recorded as deleted too; `save` drops it without touching the medium.
    pub fn delete(&mut self, entity: &Entity<T, C>) -> StoreResult<()> {
        let id = self.check(entity)?;
        match self.records.get_mut(&id) {
            Some(tracked) => tracked.action = tracked.action.on_delete(),
            None => {
                let mut tracked = Tracked::staged(entity.detached_copy());
                tracked.action = tracked.action.on_delete();
                self.records.insert(id, tracked);
            }
        }
        debug!(location = %self.location, %id, "record staged for delete");
        Ok(())
    }

    /// Flush staged changes to the medium.
    ///
    /// Added and updated records are written and become unchanged. Deleted
    /// records are removed from the medium if an entry exists, then dropped
    /// from the store. Unchanged records are not touched.
    ///
    /// Not atomic: on a medium failure, records processed before the failing
    /// one stay saved and the rest stay pending.
    pub fn save(&mut self) -> StoreResult<SaveReport> {
        let dirty: Vec<(RecordId, PendingAction, bool)> = self
            .records
            .iter()
            .filter(|(_, tracked)| tracked.action.is_dirty())
            .map(|(id, tracked)| (*id, tracked.action, tracked.persisted))
            .collect();

        let mut report = SaveReport::default();
        for (id, action, persisted) in dirty {
            let name = self.naming.entry_name(id);
            if action.writes() {
                let Some(tracked) = self.records.get_mut(&id) else {
                    continue;
                };
                let text = tracked.entity.encoded().unwrap_or_default();
                self.medium.write(&self.location, &name, &text)?;
                tracked.action = PendingAction::Unchanged;
                tracked.persisted = true;
                report.written += 1;
                debug!(location = %self.location, %id, entry = %name, "record written");
            } else {
                if persisted && self.medium.delete_if_exists(&self.location, &name)? {
                    report.removed += 1;
                    debug!(location = %self.location, %id, entry = %name, "record removed");
                } else {
                    report.discarded += 1;
                }
                self.records.remove(&id);
            }
        }

        info!(
            location = %self.location,
            written = report.written,
            removed = report.removed,
            discarded = report.discarded,
            "record store saved"
        );
        Ok(report)
    }

    // ---------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------

    /// Fresh copies of every visible record, in identifier order.
    ///
    /// Each call builds new entities; editing one has no effect on the
    /// store until it is passed to [`update`](Self::update).
    pub fn entities(&self) -> Vec<Entity<T, C>> {
        self.records
            .values()
            .filter(|tracked| tracked.action.is_visible())
            .map(|tracked| tracked.entity.detached_copy())
            .collect()
    }

    /// A fresh copy of one visible record.
    pub fn get(&self, id: RecordId) -> Option<Entity<T, C>> {
        self.records
            .get(&id)
            .filter(|tracked| tracked.action.is_visible())
            .map(|tracked| tracked.entity.detached_copy())
    }

    fn check(&mut self, entity: &Entity<T, C>) -> StoreResult<RecordId> {
        let id = entity.id();
        if id.is_null() {
            return Err(StoreError::InvalidArgument(
                "entity carries the null record id".into(),
            ));
        }
        if !self.naming.fits(id) {
            return Err(StoreError::InvalidArgument(format!(
                "record id {id} exceeds the naming width (max {})",
                self.naming.max_id()
            )));
        }
        self.allocator.observe(id);
        Ok(id)
    }
}

impl<T, C> RecordStore<T, C> {
    /// The location this store reads and writes.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The naming convention for this store's entries.
    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    /// The codec records are encoded with.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Identifiers of visible records, ascending.
    pub fn ids(&self) -> Vec<RecordId> {
        self.visible().map(|(id, _)| *id).collect()
    }

    /// Whether `id` is a visible record.
    pub fn contains(&self, id: RecordId) -> bool {
        self.records
            .get(&id)
            .is_some_and(|tracked| tracked.action.is_visible())
    }

    /// Number of visible records.
    pub fn len(&self) -> usize {
        self.visible().count()
    }

    /// Returns `true` if there are no visible records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The identifier the next [`create`](RecordStore::create) returns.
    pub fn next_id(&self) -> RecordId {
        self.allocator.peek()
    }

    /// Pending action for `id`, if the store tracks it.
    pub fn pending_action(&self, id: RecordId) -> Option<PendingAction> {
        self.records.get(&id).map(|tracked| tracked.action)
    }

    /// Returns `true` if [`save`](RecordStore::save) has work to do.
    pub fn has_pending_changes(&self) -> bool {
        self.records.values().any(|tracked| tracked.action.is_dirty())
    }

    /// Every tracked identifier grouped by pending action.
    pub fn status(&self) -> StoreStatus {
        let mut status = StoreStatus::new();
        for (id, tracked) in &self.records {
            status.push(*id, tracked.action);
        }
        status
    }

    /// Release the store without saving, returning how many staged changes
    /// were discarded.
    pub fn close(mut self) -> usize {
        let discarded = self.status().pending_count();
        self.records.clear();
        if discarded > 0 {
            info!(location = %self.location, discarded, "record store closed without saving");
        }
        discarded
    }

    fn visible(&self) -> impl Iterator<Item = (&RecordId, &Tracked<T, C>)> {
        self.records
            .iter()
            .filter(|(_, tracked)| tracked.action.is_visible())
    }
}

impl<T, C> Drop for RecordStore<T, C> {
    fn drop(&mut self) {
        let pending = self
            .records
            .values()
            .filter(|tracked| tracked.action.is_dirty())
            .count();
        if pending > 0 {
            warn!(
                location = %self.location,
                pending,
                "record store dropped with unsaved changes"
            );
        }
    }
}

impl<T, C> std::fmt::Debug for RecordStore<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("location", &self.location)
            .field("type_name", &self.naming.type_name())
            .field("record_count", &self.records.len())
            .field("next_id", &self.allocator.peek())
            .finish()
    }
}

/// Decode an entry's text. Blank text is an empty record.
fn decode_stored<T, C>(id: RecordId, codec: &C, text: &str) -> Entity<T, C>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    let mut entity = Entity::with_codec(id, codec.clone());
    if !text.trim().is_empty() {
        entity.set_encoded(Some(text));
    }
    entity
}
