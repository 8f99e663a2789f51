//! A file-backed record store.
//!
//! [`RecordStore`] keeps every record of one logical type in memory and
//! mirrors each one to its own entry on a [`StorageMedium`]. Changes are
//! staged per record and only reach the medium on [`RecordStore::save`].
//!
//! # Lifecycle
//!
//! 1. [`RecordStore::open`] scans the location, keeps entries matching the
//!    [`NamingConvention`] and decodes each into an [`Entity`].
//! 2. [`create`](RecordStore::create) hands out a fresh identifier;
//!    [`add`](RecordStore::add), [`update`](RecordStore::update) and
//!    [`delete`](RecordStore::delete) stage a [`PendingAction`].
//! 3. [`save`](RecordStore::save) writes added and updated records, removes
//!    deleted ones, and leaves unchanged records alone.
//! 4. Dropping the store discards anything not saved.
//!
//! # Rules
//!
//! 1. Identifiers are never reused within a session, even after a deleted
//!    record is dropped by `save`.
//! 2. The last staged call for an identifier wins.
//! 3. Reads hand out detached copies; only `add`/`update`/`delete` change
//!    what the store holds.
//! 4. Conversion failures are absorbed by the entity; medium failures are
//!    propagated unmodified.
//!
//! [`StorageMedium`]: recstore_medium::StorageMedium
//! [`Entity`]: recstore_entity::Entity

pub mod allocator;
pub mod config;
pub mod error;
pub mod naming;
pub mod pending;
pub mod status;
pub mod store;

pub use allocator::{next_id, IdAllocator};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use naming::{short_type_name, validate_type_name, NamingConvention};
pub use pending::PendingAction;
pub use status::{SaveReport, StoreStatus};
pub use store::RecordStore;

// Re-export the collaborating crates' primary types.
pub use recstore_codec::{Codec, JsonCodec};
pub use recstore_entity::{Entity, RecordId};
pub use recstore_medium::{FsMedium, InMemoryMedium, StorageMedium};
