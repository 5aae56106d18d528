//! Contains the definition of [`TypeTag`].

use std::{
    borrow::{Borrow, Cow},
    fmt,
    ops::Deref,
};

/// type tag `{tag}` must be non-empty and must not contain whitespace
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    thiserror::Error,
    displaydoc::Display,
)]
pub struct InvalidTypeTag {
    /// The rejected tag.
    pub tag: String,
}

/// A case-sensitive string that identifies one concrete variant, both in the
/// registry and on the wire.
///
/// A tag is never empty and never contains whitespace, so it always reads
/// back as a single token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    /// Creates a [`TypeTag`] from a string literal.
    ///
    /// The tag must be non-empty and must not contain whitespace, the same
    /// rule [`TypeTag::new`] enforces. Violations are reported during
    /// constant evaluation when the tag is used in a `const` item and panic
    /// otherwise.
    #[must_use]
    pub const fn from_static(tag: &'static str) -> Self {
        assert!(!tag.is_empty(), "type tag must not be empty");
        assert!(
            !contains_whitespace(tag),
            "type tag must not contain whitespace"
        );

        Self(Cow::Borrowed(tag))
    }

    /// Creates a [`TypeTag`] from a runtime string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTypeTag`] if the tag is empty or contains whitespace.
    pub fn new(tag: impl Into<String>) -> Result<Self, InvalidTypeTag> {
        let tag = tag.into();

        if tag.is_empty() || contains_whitespace(&tag) {
            return Err(InvalidTypeTag { tag });
        }

        Ok(Self(Cow::Owned(tag)))
    }

    /// Gets the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Deref for TypeTag {
    type Target = str;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl AsRef<str> for TypeTag {
    fn as_ref(&self) -> &str { &self.0 }
}

impl Borrow<str> for TypeTag {
    fn borrow(&self) -> &str { &self.0 }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TypeTag {
    type Error = InvalidTypeTag;

    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl TryFrom<&str> for TypeTag {
    type Error = InvalidTypeTag;

    fn try_from(value: &str) -> Result<Self, Self::Error> { Self::new(value) }
}

/// Returns `true` if the code point has the Unicode `White_Space` property,
/// the set [`char::is_whitespace`] tests for.
const fn is_whitespace(code_point: u32) -> bool {
    matches!(
        code_point,
        0x09..=0x0D
            | 0x20
            | 0x85
            | 0xA0
            | 0x1680
            | 0x2000..=0x200A
            | 0x2028
            | 0x2029
            | 0x202F
            | 0x205F
            | 0x3000
    )
}

/// Returns `true` if any character of `tag` is whitespace.
///
/// Decodes the UTF-8 by hand so that it can run during constant evaluation.
pub(crate) const fn contains_whitespace(tag: &str) -> bool {
    let bytes = tag.as_bytes();

    let mut index = 0;
    while index < bytes.len() {
        let lead = bytes[index] as u32;

        let (code_point, width) = if lead < 0x80 {
            (lead, 1)
        } else if lead < 0xE0 {
            ((lead & 0x1F) << 6 | (bytes[index + 1] as u32 & 0x3F), 2)
        } else if lead < 0xF0 {
            (
                (lead & 0x0F) << 12
                    | (bytes[index + 1] as u32 & 0x3F) << 6
                    | (bytes[index + 2] as u32 & 0x3F),
                3,
            )
        } else {
            (
                (lead & 0x07) << 18
                    | (bytes[index + 1] as u32 & 0x3F) << 12
                    | (bytes[index + 2] as u32 & 0x3F) << 6
                    | (bytes[index + 3] as u32 & 0x3F),
                4,
            )
        };

        if is_whitespace(code_point) {
            return true;
        }

        index += width;
    }

    false
}
