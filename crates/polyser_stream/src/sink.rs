//! Contains the definition of [`TokenSink`].

use std::fmt::{self, Display, Write};

/// Writes whitespace-separated tokens into an underlying [`fmt::Write`].
///
/// Tokens written within one record are separated by a single space. Calling
/// [`TokenSink::end_record`] terminates the record with a trailing space, so
/// two records `Dog dog` and `Cat cat` produce `"Dog dog Cat cat "`.
pub struct TokenSink<'a> {
    writer: &'a mut dyn Write,
    needs_separator: bool,
}

impl fmt::Debug for TokenSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSink")
            .field("needs_separator", &self.needs_separator)
            .finish_non_exhaustive()
    }
}

impl<'a> TokenSink<'a> {
    /// Creates a new [`TokenSink`] writing into the given writer.
    pub fn new(writer: &'a mut dyn Write) -> Self {
        Self { writer, needs_separator: false }
    }

    /// Writes a single token, preceded by a separator if the current record
    /// already has a token.
    ///
    /// The token is written verbatim. A token that is empty or contains
    /// whitespace cannot be read back as the same token; a warning is logged
    /// when that happens.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if the underlying writer fails.
    pub fn write_token(&mut self, token: impl Display) -> fmt::Result {
        let token = token.to_string();

        if token.is_empty() || token.chars().any(char::is_whitespace) {
            log::warn!(
                "token `{token}` is empty or contains whitespace and will not \
                 survive a round trip"
            );
        }

        if self.needs_separator {
            self.writer.write_char(' ')?;
        }

        self.writer.write_str(&token)?;
        self.needs_separator = true;

        Ok(())
    }

    /// Terminates the current record with a trailing space.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if the underlying writer fails.
    pub fn end_record(&mut self) -> fmt::Result {
        self.writer.write_char(' ')?;
        self.needs_separator = false;

        Ok(())
    }
}
