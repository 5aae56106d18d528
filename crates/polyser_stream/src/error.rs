//! Contains all kinds of errors that can occur while reading tokens from a
//! [`crate::TokenSource`].

use derive_more::From;
use enum_as_inner::EnumAsInner;
use thiserror::Error;

/// The stream ran out of tokens while one more token was required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error("unexpected end of stream at byte {position}, expected {expected}")]
pub struct UnexpectedEndOfStream {
    /// The byte offset where the missing token should have started.
    pub position: usize,

    /// A short description of what was expected, e.g. `"a type tag"`.
    pub expected: &'static str,
}

/// A token was found but it could not be interpreted as the expected value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error("found `{found}` at byte {position}, expected {expected}")]
pub struct InvalidToken {
    /// The offending token.
    pub found: String,

    /// The byte offset of the first character of the token.
    pub position: usize,

    /// A short description of what was expected.
    pub expected: &'static str,
}

/// Is an enumeration containing all kinds of errors that can occur while
/// reading tokens.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From, Error,
)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    UnexpectedEndOfStream(UnexpectedEndOfStream),

    #[error(transparent)]
    InvalidToken(InvalidToken),
}

impl Error {
    /// Gets the byte offset where the error occurred.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedEndOfStream(err) => err.position,
            Self::InvalidToken(err) => err.position,
        }
    }
}
