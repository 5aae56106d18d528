//! Serializes a sequence of instances into one token stream and reconstructs
//! them in the same order.

use std::fmt;

use enum_as_inner::EnumAsInner;
use polyser_object::{
    create_from_stream, Registry, Serializable, TokenSink, TokenSource,
};
use thiserror::Error;

/// A reconstructed instance has a different concrete type than its
/// original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error(
    "record {index} was serialized as `{expected}` but reconstructed as \
     `{found}`"
)]
pub struct VariantMismatch {
    /// The position of the record in the sequence.
    pub index: usize,

    /// The type tag of the original instance.
    pub expected: &'static str,

    /// The type tag of the reconstructed instance.
    pub found: &'static str,
}

/// A reconstructed instance serializes to a different record than its
/// original.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error("record {index} was `{expected}` but reconstructed as `{found}`")]
pub struct RecordMismatch {
    /// The position of the record in the sequence.
    pub index: usize,

    /// The record of the original instance.
    pub expected: String,

    /// The record of the reconstructed instance.
    pub found: String,
}

/// Is an enumeration of all the ways a round trip can fail.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, Error,
)]
#[allow(missing_docs)]
pub enum RoundTripError {
    #[error("failed to serialize the instances")]
    Serialize(#[from] fmt::Error),

    #[error(transparent)]
    Deserialize(#[from] polyser_object::Error),

    #[error(transparent)]
    VariantMismatch(#[from] VariantMismatch),

    #[error(transparent)]
    RecordMismatch(#[from] RecordMismatch),
}

/// The outcome of a successful [`round_trip`].
#[derive(Debug)]
pub struct RoundTrip {
    /// The token stream all instances were serialized into.
    pub stream: String,

    /// The reconstructed instances, in the order of the originals.
    pub instances: Vec<Box<dyn Serializable>>,
}

/// Serializes every instance in order into one token stream.
///
/// Each record is followed by a single space, so `[Dog("dog"), Cat("cat")]`
/// becomes `"Dog dog Cat cat "`.
///
/// # Errors
///
/// Returns [`fmt::Error`] if an instance fails to format one of its fields.
pub fn serialize_all(
    instances: &[Box<dyn Serializable>],
) -> Result<String, fmt::Error> {
    let mut buffer = String::new();
    let mut sink = TokenSink::new(&mut buffer);

    for instance in instances {
        instance.serialize(&mut sink)?;
        sink.end_record()?;
    }

    Ok(buffer)
}

/// Reconstructs exactly `count` instances from the front of the stream.
///
/// # Errors
///
/// Returns the first [`polyser_object::Error`] encountered; the instances
/// read before it are discarded.
pub fn deserialize_all(
    registry: &Registry<dyn Serializable>,
    stream: &str,
    count: usize,
) -> Result<Vec<Box<dyn Serializable>>, polyser_object::Error> {
    let mut source = TokenSource::new(stream);

    (0..count).map(|_| create_from_stream(registry, &mut source)).collect()
}

/// Reconstructs instances until only whitespace is left in the stream.
///
/// # Errors
///
/// Returns the first [`polyser_object::Error`] encountered.
pub fn deserialize_to_end(
    registry: &Registry<dyn Serializable>,
    stream: &str,
) -> Result<Vec<Box<dyn Serializable>>, polyser_object::Error> {
    let mut source = TokenSource::new(stream);
    let mut instances = Vec::new();

    while !source.is_exhausted() {
        instances.push(create_from_stream(registry, &mut source)?);
    }

    Ok(instances)
}

/// Serializes the `instances`, reconstructs them from the resulting stream and
/// checks that every reconstructed instance matches its original.
///
/// Two instances match when they have the same concrete type and serialize
/// to the same record.
///
/// # Errors
///
/// See [`RoundTripError`].
pub fn round_trip(
    registry: &Registry<dyn Serializable>,
    instances: &[Box<dyn Serializable>],
) -> Result<RoundTrip, RoundTripError> {
    let stream = serialize_all(instances)?;

    log::info!("serialized {} instance(s) into `{stream}`", instances.len());

    let reconstructed = deserialize_all(registry, &stream, instances.len())?;

    for (index, (original, copy)) in
        instances.iter().zip(&reconstructed).enumerate()
    {
        if original.concrete_type_id() != copy.concrete_type_id() {
            return Err(VariantMismatch {
                index,
                expected: original.type_tag(),
                found: copy.type_tag(),
            }
            .into());
        }

        let expected = original.to_record()?;
        let found = copy.to_record()?;

        if expected != found {
            return Err(RecordMismatch { index, expected, found }.into());
        }
    }

    Ok(RoundTrip { stream, instances: reconstructed })
}
