//! Contains the errors reported by [`crate::create_from_stream`].

use enum_as_inner::EnumAsInner;
use thiserror::Error;

/// The type tag read from the stream has no registered prototype.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error("unknown variant `{tag}` at byte {position}")]
pub struct UnknownVariant {
    /// The unregistered tag.
    pub tag: String,

    /// The byte offset of the tag in the stream.
    pub position: usize,
}

/// Is an enumeration of all the ways reconstructing a variant from a stream
/// can fail.
///
/// None of them are recoverable locally; the stream is left at an unspecified
/// position and should not be read further.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, Error,
)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),

    #[error("malformed field: {0}")]
    MalformedField(#[from] polyser_stream::Error),
}
