//! Parses the `TAG` / `TAG=FIELDS` records given on the command line.

use enum_as_inner::EnumAsInner;
use polyser_object::{Registry, Serializable, TokenSource};
use polyser_registry::TypeTagNotFound;
use thiserror::Error;

/// The fields of a record contain more tokens than its variant reads.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error("record `{record}` has unused trailing tokens `{remaining}`")]
pub struct TrailingTokens {
    /// The whole record as given.
    pub record: String,

    /// The tokens left after the variant read its fields.
    pub remaining: String,
}

/// Is an enumeration of all the ways a command-line record can be invalid.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, Error,
)]
#[allow(missing_docs)]
pub enum RecordError {
    #[error(transparent)]
    UnknownTag(#[from] TypeTagNotFound),

    #[error("invalid fields: {0}")]
    Fields(#[from] polyser_stream::Error),

    #[error(transparent)]
    TrailingTokens(#[from] TrailingTokens),
}

/// Creates a new instance from a record written as `TAG` or `TAG=FIELDS`.
///
/// A bare `TAG` yields the variant's default instance. Otherwise `FIELDS` is
/// read with the variant's own
/// [`construct_from_stream`](Serializable::construct_from_stream), so
/// `Dog=rex` creates a dog whose data is `rex`.
///
/// # Errors
///
/// See [`RecordError`].
pub fn instantiate_record(
    registry: &Registry<dyn Serializable>,
    record: &str,
) -> Result<Box<dyn Serializable>, RecordError> {
    let (tag, fields) = match record.split_once('=') {
        Some((tag, fields)) => (tag, Some(fields)),
        None => (record, None),
    };

    let mut instance = registry.lookup(tag)?.instantiate();

    if let Some(fields) = fields {
        let mut source = TokenSource::new(fields);
        instance.construct_from_stream(&mut source)?;

        if !source.is_exhausted() {
            return Err(TrailingTokens {
                record: record.to_owned(),
                remaining: source.remaining().trim().to_owned(),
            }
            .into());
        }
    }

    Ok(instance)
}
