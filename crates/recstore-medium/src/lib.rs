//! Storage media for recstore.
//!
//! A storage medium is the only thing a record store knows about persistence:
//! a flat namespace of text entries grouped by location. The store never
//! assumes a real filesystem; it is handed an implementation of
//! [`StorageMedium`] and talks to it through five calls.
//!
//! # Backends
//!
//! - [`InMemoryMedium`] -- `BTreeMap`-based medium for tests and embedding
//! - [`FsMedium`] -- one directory per location, one file per entry
//!
//! # Rules
//!
//! 1. Entry names are flat file names: no path separators, never `.` or `..`.
//! 2. Listing a location that does not exist yet yields no entries.
//! 3. Reading or deleting a missing entry is `NotFound`, not an empty result.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;

pub use error::{MediumError, MediumResult};
pub use fs::FsMedium;
pub use memory::InMemoryMedium;
pub use names::validate_entry_name;
pub use traits::StorageMedium;
