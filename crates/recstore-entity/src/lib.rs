//! Records as the store sees them.
//!
//! - [`RecordId`] -- the stable, store-assigned identifier of a record
//! - [`Entity`] -- one record's typed value paired with its encoded text
//!
//! An [`Entity`] never fails loudly. If its value cannot be encoded, or text
//! assigned to it cannot be decoded, it drops to the empty state and callers
//! observe that through [`Entity::has_value`].

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{EntityError, EntityResult};
pub use id::RecordId;
