//! Contains the definition of [`TokenSource`].

use std::str::FromStr;

use getset::CopyGetters;

use crate::error::{Error, InvalidToken, UnexpectedEndOfStream};

/// Reads whitespace-separated tokens from a string slice in FIFO order.
///
/// The source only ever moves forward. After an error is reported the
/// offset is left wherever the failing read stopped; the source should not
/// be reused.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, CopyGetters)]
pub struct TokenSource<'a> {
    content: &'a str,

    /// Gets the byte offset of the next unread character.
    #[get_copy = "pub"]
    offset: usize,
}

impl<'a> TokenSource<'a> {
    /// Creates a new [`TokenSource`] positioned at the start of `content`.
    #[must_use]
    pub const fn new(content: &'a str) -> Self { Self { content, offset: 0 } }

    /// Gets the part of the content that has not been read yet.
    #[must_use]
    pub fn remaining(&self) -> &'a str { &self.content[self.offset..] }

    /// Returns `true` if nothing but whitespace is left to read.
    #[must_use]
    pub fn is_exhausted(&self) -> bool { self.remaining().trim().is_empty() }

    fn skip_whitespace(&mut self) {
        let remaining = self.remaining();
        self.offset += remaining.len() - remaining.trim_start().len();
    }

    /// Reads the next token together with the byte offset it starts at.
    fn next_token_with_offset(&mut self) -> Option<(usize, &'a str)> {
        self.skip_whitespace();

        let remaining = self.remaining();
        if remaining.is_empty() {
            return None;
        }

        let length =
            remaining.find(char::is_whitespace).unwrap_or(remaining.len());
        let start = self.offset;

        self.offset += length;

        Some((start, &remaining[..length]))
    }

    /// Reads the next token, or returns `None` if the stream is exhausted.
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.next_token_with_offset().map(|(_, token)| token)
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek_token(&self) -> Option<&'a str> { self.clone().next_token() }

    /// Reads the next token, failing if the stream is exhausted.
    ///
    /// `expected` describes the token for the error message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEndOfStream`] if there are no tokens left.
    pub fn expect_token(
        &mut self,
        expected: &'static str,
    ) -> Result<&'a str, Error> {
        self.next_token_with_offset().map(|(_, token)| token).ok_or_else(
            || {
                UnexpectedEndOfStream { position: self.offset, expected }
                    .into()
            },
        )
    }

    /// Reads the next token and parses it with [`FromStr`].
    ///
    /// The token is consumed even if it fails to parse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEndOfStream`] if there are no tokens left
    /// and [`Error::InvalidToken`] if the token does not parse as `T`.
    pub fn parse<T: FromStr>(
        &mut self,
        expected: &'static str,
    ) -> Result<T, Error> {
        let Some((position, token)) = self.next_token_with_offset() else {
            return Err(UnexpectedEndOfStream {
                position: self.offset,
                expected,
            }
            .into());
        };

        token.parse().map_err(|_| {
            InvalidToken { found: token.to_owned(), position, expected }.into()
        })
    }
}

impl<'a> Iterator for TokenSource<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> { self.next_token() }
}
