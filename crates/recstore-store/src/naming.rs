//! Entry naming: the mapping between `(identifier, type)` and entry names.
//!
//! An entry name is the identifier zero-padded to a fixed width, an `_`
//! separator, the logical type name, a `.` and the codec's extension:
//!
//! ```text
//! 0000000042_Note.json
//! ```
//!
//! Anything at a location that does not parse back under the store's own
//! convention is ignored: other types, stray files, housekeeping entries.

use recstore_entity::RecordId;

use crate::error::{StoreError, StoreResult};

/// Default number of digits in an entry name's identifier.
pub const DEFAULT_ID_WIDTH: usize = 10;

/// Largest supported width; `10^19 - 1` is the widest all-nines value in a `u64`.
pub const MAX_ID_WIDTH: usize = 19;

const SEPARATOR: char = '_';

/// Characters that may not appear in a logical type name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '.', '\0', ' ', '\t', '\n', '\r'];

/// Validate a logical type name for use inside entry names.
pub fn validate_type_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidTypeName {
            name: name.to_string(),
            reason: "type name must not be empty".into(),
        });
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(StoreError::InvalidTypeName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    Ok(())
}

/// The last path segment of a Rust type's name, without generic arguments.
///
/// `my_app::model::Note` becomes `Note`; `Vec<String>` becomes `Vec`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Bidirectional mapping between record identifiers and entry names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingConvention {
    type_name: String,
    id_width: usize,
    extension: String,
}

impl NamingConvention {
    /// Build a convention, validating every part.
    pub fn new(
        type_name: impl Into<String>,
        id_width: usize,
        extension: impl Into<String>,
    ) -> StoreResult<Self> {
        let type_name = type_name.into();
        let extension = extension.into();
        validate_type_name(&type_name)?;

        if id_width == 0 || id_width > MAX_ID_WIDTH {
            return Err(StoreError::InvalidArgument(format!(
                "id width must be between 1 and {MAX_ID_WIDTH}, got {id_width}"
            )));
        }
        if extension.is_empty() || extension.contains(FORBIDDEN_CHARS) {
            return Err(StoreError::InvalidArgument(format!(
                "invalid extension {extension:?}"
            )));
        }

        Ok(Self {
            type_name,
            id_width,
            extension,
        })
    }

    /// Convention for `T` with the default width, named after the type.
    pub fn for_type<T: ?Sized>(extension: impl Into<String>) -> StoreResult<Self> {
        Self::new(short_type_name::<T>(), DEFAULT_ID_WIDTH, extension)
    }

    /// The logical type discriminator.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Number of identifier digits.
    pub fn id_width(&self) -> usize {
        self.id_width
    }

    /// Content-type suffix, without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The largest identifier that fits the width.
    pub fn max_id(&self) -> RecordId {
        // id_width <= MAX_ID_WIDTH keeps this inside u64.
        RecordId::new(10u64.pow(self.id_width as u32) - 1)
    }

    /// Whether `id` can be named under this convention.
    pub fn fits(&self, id: RecordId) -> bool {
        !id.is_null() && id <= self.max_id()
    }

    /// Entry name for `id`.
    pub fn entry_name(&self, id: RecordId) -> String {
        format!(
            "{:0width$}{SEPARATOR}{}.{}",
            id.get(),
            self.type_name,
            self.extension,
            width = self.id_width
        )
    }

    /// The identifier encoded in `name`, if `name` belongs to this convention.
    pub fn parse(&self, name: &str) -> Option<RecordId> {
        let stem = name
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        let digits = stem.get(..self.id_width)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let type_name = stem.get(self.id_width..)?.strip_prefix(SEPARATOR)?;
        if type_name != self.type_name {
            return None;
        }
        let id = RecordId::new(digits.parse().ok()?);
        (!id.is_null()).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EntityTest;

    fn convention() -> NamingConvention {
        NamingConvention::new("EntityTest", DEFAULT_ID_WIDTH, "json").unwrap()
    }

    // -----------------------------------------------------------------------
    // Type names
    // -----------------------------------------------------------------------

    #[test]
    fn short_type_name_strips_path_and_generics() {
        assert_eq!(short_type_name::<EntityTest>(), "EntityTest");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
        assert_eq!(short_type_name::<u32>(), "u32");
    }

    #[test]
    fn validate_type_name_rules() {
        assert!(validate_type_name("Note").is_ok());
        assert!(validate_type_name("user_profile").is_ok());
        assert!(validate_type_name("").is_err());
        assert!(validate_type_name("a.b").is_err());
        assert!(validate_type_name("a/b").is_err());
        assert!(validate_type_name("has space").is_err());
    }

    #[test]
    fn for_type_uses_short_name() {
        let naming = NamingConvention::for_type::<EntityTest>("json").unwrap();
        assert_eq!(naming.type_name(), "EntityTest");
        assert_eq!(naming.id_width(), DEFAULT_ID_WIDTH);
    }

    #[test]
    fn new_rejects_bad_width_and_extension() {
        assert!(NamingConvention::new("T", 0, "json").is_err());
        assert!(NamingConvention::new("T", MAX_ID_WIDTH + 1, "json").is_err());
        assert!(NamingConvention::new("T", 4, "").is_err());
        assert!(NamingConvention::new("T", 4, "tar.gz").is_err());
    }

    // -----------------------------------------------------------------------
    // Formatting and parsing
    // -----------------------------------------------------------------------

    #[test]
    fn entry_name_is_zero_padded() {
        assert_eq!(
            convention().entry_name(RecordId::new(42)),
            "0000000042_EntityTest.json"
        );
    }

    #[test]
    fn parse_inverts_entry_name() {
        let naming = convention();
        for raw in [1, 5, 9_999_999_999] {
            let id = RecordId::new(raw);
            assert_eq!(naming.parse(&naming.entry_name(id)), Some(id));
        }
    }

    #[test]
    fn parse_ignores_foreign_entries() {
        let naming = convention();
        assert_eq!(naming.parse("blahblahEntityTest.json"), None);
        assert_eq!(naming.parse("monkey.txt"), None);
        assert_eq!(naming.parse(".."), None);
        assert_eq!(naming.parse("0000000001_Other.json"), None);
        assert_eq!(naming.parse("0000000001_EntityTest.txt"), None);
        assert_eq!(naming.parse("0000000001_EntityTestX.json"), None);
        assert_eq!(naming.parse("000000001_EntityTest.json"), None);
        assert_eq!(naming.parse("00000000001_EntityTest.json"), None);
        assert_eq!(naming.parse("00000000x1_EntityTest.json"), None);
        assert_eq!(naming.parse("0000000001EntityTest.json"), None);
    }

    #[test]
    fn parse_rejects_null_id() {
        assert_eq!(convention().parse("0000000000_EntityTest.json"), None);
    }

    #[test]
    fn parse_handles_multibyte_names() {
        assert_eq!(convention().parse("ééééééééé_EntityTest.json"), None);
    }

    #[test]
    fn fits_respects_width() {
        let naming = NamingConvention::new("T", 2, "json").unwrap();
        assert_eq!(naming.max_id(), RecordId::new(99));
        assert!(naming.fits(RecordId::new(99)));
        assert!(!naming.fits(RecordId::new(100)));
        assert!(!naming.fits(RecordId::NULL));
    }
}
