//! Directory-backed storage medium.
//!
//! Each location is a directory; each entry is a regular file inside it.
//! Writes go through a temporary file in the same directory that is fsynced
//! and then renamed over the target, so readers never observe a torn entry.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MediumError, MediumResult};
use crate::names::validate_entry_name;
use crate::traits::StorageMedium;

/// Storage medium over the local filesystem.
///
/// Locations are interpreted as directory paths relative to `root`. An
/// absolute location ignores the root, mirroring [`Path::join`].
#[derive(Clone, Debug)]
pub struct FsMedium {
    root: PathBuf,
}

impl FsMedium {
    /// Medium whose relative locations resolve against the current directory.
    pub fn new() -> Self {
        Self {
            root: PathBuf::new(),
        }
    }

    /// Medium whose relative locations resolve against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory relative locations resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir(&self, location: &str) -> PathBuf {
        self.root.join(location)
    }

    fn entry_path(&self, location: &str, name: &str) -> MediumResult<PathBuf> {
        validate_entry_name(name)?;
        Ok(self.dir(location).join(name))
    }

    fn map_not_found(err: io::Error, location: &str, name: &str) -> MediumError {
        if err.kind() == io::ErrorKind::NotFound {
            MediumError::NotFound {
                location: location.to_string(),
                name: name.to_string(),
            }
        } else {
            MediumError::Io(err)
        }
    }
}

impl Default for FsMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageMedium for FsMedium {
    fn list(&self, location: &str) -> MediumResult<Vec<String>> {
        let dir = self.dir(location);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!(?raw, "skipping non-UTF-8 entry name"),
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, location: &str, name: &str) -> MediumResult<String> {
        let path = self.entry_path(location, name)?;
        let bytes = fs::read(&path).map_err(|e| Self::map_not_found(e, location, name))?;
        String::from_utf8(bytes).map_err(|_| MediumError::NotText {
            name: name.to_string(),
        })
    }

    fn write(&self, location: &str, name: &str, contents: &str) -> MediumResult<()> {
        let path = self.entry_path(location, name)?;
        let dir = self.dir(location);
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| MediumError::Io(e.error))?;

        debug!(path = %path.display(), bytes = contents.len(), "entry written");
        Ok(())
    }

    fn delete(&self, location: &str, name: &str) -> MediumResult<()> {
        let path = self.entry_path(location, name)?;
        fs::remove_file(&path).map_err(|e| Self::map_not_found(e, location, name))?;
        debug!(path = %path.display(), "entry removed");
        Ok(())
    }

    fn exists(&self, location: &str, name: &str) -> bool {
        self.entry_path(location, name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }
}
