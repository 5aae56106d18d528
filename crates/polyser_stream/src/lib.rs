//! Provides the textual wire format used to persist serializable objects.
//!
//! The format is a flat sequence of tokens separated by whitespace:
//!
//! ```text
//! <TypeTag> <field1> [<field2> ...] <TypeTag> <field1> ...
//! ```
//!
//! There are no length prefixes and no escaping. A token that contains
//! whitespace will be split into several tokens when read back.
//!
//! [`TokenSink`] writes tokens into any [`std::fmt::Write`], and
//! [`TokenSource`] reads them back in the same order.

pub mod error;
pub mod sink;
pub mod source;

pub use error::Error;
pub use sink::TokenSink;
pub use source::TokenSource;
