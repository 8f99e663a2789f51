use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::naming::{short_type_name, NamingConvention, DEFAULT_ID_WIDTH};

/// Configuration for a record store.
///
/// Typically read from a TOML file:
///
/// ```toml
/// type_name = "Note"
/// id_width = 10
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Logical type discriminator in entry names. Defaults to the record
    /// type's short Rust name.
    pub type_name: Option<String>,
    /// Number of zero-padded identifier digits in entry names.
    pub id_width: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            type_name: None,
            id_width: DEFAULT_ID_WIDTH,
        }
    }
}

impl StoreConfig {
    /// Configuration with an explicit type name.
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    /// Parse from TOML text.
    pub fn from_toml_str(text: &str) -> StoreResult<Self> {
        toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML text.
    pub fn to_toml_string(&self) -> StoreResult<String> {
        toml::to_string(self).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// The naming convention this configuration describes for records of `T`.
    pub fn naming_for<T: ?Sized>(&self, extension: &str) -> StoreResult<NamingConvention> {
        let type_name = self
            .type_name
            .as_deref()
            .unwrap_or_else(|| short_type_name::<T>());
        NamingConvention::new(type_name, self.id_width, extension)
    }
}
