//! Defines [`Serializable`], the polymorphic contract that every variant
//! written to or read from a token stream implements, and
//! [`create_from_stream`], the factory that reconstructs variants from their
//! serialized form.
//!
//! # Example
//!
//! ``` rust
//! use polyser_object::{
//!     create_from_stream, prototype, Registry, Serializable, TokenSink,
//!     TokenSource, Variant,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Counter {
//!     count: u32,
//! }
//!
//! impl Serializable for Counter {
//!     fn type_tag(&self) -> &'static str { Self::TYPE_TAG }
//!
//!     fn serialize_fields(
//!         &self,
//!         sink: &mut TokenSink<'_>,
//!     ) -> std::fmt::Result {
//!         sink.write_token(self.count)
//!     }
//!
//!     fn construct_from_stream(
//!         &mut self,
//!         source: &mut TokenSource<'_>,
//!     ) -> Result<(), polyser_stream::Error> {
//!         self.count = source.parse("a count")?;
//!         Ok(())
//!     }
//! }
//!
//! impl Variant for Counter {
//!     const TYPE_TAG: &'static str = "Counter";
//! }
//!
//! let registry = Registry::from_prototypes([prototype::<Counter>()]);
//!
//! let mut source = TokenSource::new("Counter 42");
//! let counter = create_from_stream(&registry, &mut source).unwrap();
//!
//! assert_eq!(counter.downcast_ref::<Counter>().unwrap().count, 42);
//! ```

use std::{
    any::{Any, TypeId},
    fmt::{self, Debug},
};

pub use polyser_registry::{Prototype, Registry, TypeTag};
pub use polyser_stream::{TokenSink, TokenSource};

pub mod error;

pub use error::{Error, UnknownVariant};

/// Gives access to the concrete type behind a trait object.
pub trait AsAny: Any {
    /// Upcasts to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// The capability every serializable variant implements.
///
/// A serialized record is the variant's type tag followed by its fields, all
/// separated by whitespace. [`Serializable::construct_from_stream`] must read
/// back exactly the tokens [`Serializable::serialize_fields`] wrote.
pub trait Serializable: AsAny + Debug {
    /// Gets the type tag the variant is registered under.
    fn type_tag(&self) -> &'static str;

    /// Writes the type tag followed by the fields of the variant.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if the sink fails to write.
    fn serialize(&self, sink: &mut TokenSink<'_>) -> fmt::Result {
        sink.write_token(self.type_tag())?;
        self.serialize_fields(sink)
    }

    /// Writes the fields of the variant in a deterministic order.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if the sink fails to write.
    fn serialize_fields(&self, sink: &mut TokenSink<'_>) -> fmt::Result;

    /// Populates the fields of the variant from the stream.
    ///
    /// The type tag has already been consumed by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`polyser_stream::Error`] if the stream ends early or a token
    /// does not parse as the expected field.
    fn construct_from_stream(
        &mut self,
        source: &mut TokenSource<'_>,
    ) -> Result<(), polyser_stream::Error>;
}

impl dyn Serializable {
    /// Returns `true` if the concrete type of the instance is `V`.
    #[must_use]
    pub fn is<V: Serializable>(&self) -> bool { self.as_any().is::<V>() }

    /// Returns the instance as `&V` if its concrete type is `V`.
    #[must_use]
    pub fn downcast_ref<V: Serializable>(&self) -> Option<&V> {
        self.as_any().downcast_ref()
    }

    /// Returns the instance as `&mut V` if its concrete type is `V`.
    #[must_use]
    pub fn downcast_mut<V: Serializable>(&mut self) -> Option<&mut V> {
        self.as_any_mut().downcast_mut()
    }

    /// Gets the [`TypeId`] of the concrete type of the instance.
    #[must_use]
    pub fn concrete_type_id(&self) -> TypeId { self.as_any().type_id() }

    /// Serializes the instance into a standalone record without a trailing
    /// separator, e.g. `"Dog rex"`.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if a field fails to format.
    pub fn to_record(&self) -> Result<String, fmt::Error> {
        let mut buffer = String::new();
        self.serialize(&mut TokenSink::new(&mut buffer))?;

        Ok(buffer)
    }
}

/// A [`Serializable`] type with a fixed tag and a default state to construct
/// from.
pub trait Variant: Serializable + Default {
    /// The type tag of the variant.
    ///
    /// Must be non-empty and free of whitespace; this is checked when
    /// [`prototype`] is evaluated in a `const` context. It must also be the
    /// tag [`Serializable::type_tag`] returns, or records written by the
    /// variant will not read back.
    const TYPE_TAG: &'static str;
}

/// Creates the registry prototype of the variant `V`.
///
/// The prototype allocates `V::default()` every time it is instantiated.
#[must_use]
pub const fn prototype<V: Variant>() -> Prototype<dyn Serializable> {
    fn create<V: Variant>() -> Box<dyn Serializable> { Box::<V>::default() }

    Prototype::new(TypeTag::from_static(V::TYPE_TAG), create::<V>)
}

/// Reads one record from the stream and reconstructs it as a new instance.
///
/// Reads the type tag, looks it up in the `registry`, allocates a fresh
/// instance from the prototype and lets it populate its fields from the
/// stream. The prototype itself is never handed out.
///
/// # Errors
///
/// - [`Error::MalformedField`] if the stream holds no tag or the fields of
///   the record are missing or malformed.
/// - [`Error::UnknownVariant`] if the tag is not registered. Only the tag is
///   consumed in that case.
pub fn create_from_stream(
    registry: &Registry<dyn Serializable>,
    source: &mut TokenSource<'_>,
) -> Result<Box<dyn Serializable>, Error> {
    let tag = source.expect_token("a type tag")?;

    let prototype = registry.lookup(tag).map_err(|error| UnknownVariant {
        tag: error.tag,
        position: source.offset() - tag.len(),
    })?;

    let mut instance = prototype.instantiate();
    instance.construct_from_stream(source)?;

    log::debug!("constructed a `{tag}` instance from the stream");

    Ok(instance)
}

#[cfg(test)]
mod test;
