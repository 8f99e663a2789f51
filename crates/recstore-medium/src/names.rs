//! Entry name validation.
//!
//! Entry names live inside a location and must never escape it. Valid names:
//! - Must be non-empty
//! - Must not be `.` or `..`
//! - Must not contain `/`, `\` or NUL

use crate::error::{MediumError, MediumResult};

const FORBIDDEN_CHARS: &[char] = &['/', '\\', '\0'];

/// Validate an entry name, returning `Ok(())` if it is a plain file name.
///
/// # Examples
///
/// ```
/// use recstore_medium::validate_entry_name;
///
/// assert!(validate_entry_name("0000000001_Note.json").is_ok());
/// assert!(validate_entry_name("..").is_err());
/// assert!(validate_entry_name("nested/name").is_err());
/// ```
pub fn validate_entry_name(name: &str) -> MediumResult<()> {
    if name.is_empty() {
        return Err(MediumError::InvalidName {
            name: name.to_string(),
            reason: "entry name must not be empty".into(),
        });
    }

    if name == "." || name == ".." {
        return Err(MediumError::InvalidName {
            name: name.to_string(),
            reason: "entry name must not be a directory reference".into(),
        });
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(MediumError::InvalidName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    Ok(())
}
