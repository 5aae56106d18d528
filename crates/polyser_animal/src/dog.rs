//! Contains the definition of [`Dog`].

use std::fmt;

use derive_new::new;
use getset::{Getters, Setters};
use polyser_object::{Serializable, TokenSink, TokenSource, Variant};

/// A dog, serialized as `Dog <data>`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, Setters, new,
)]
pub struct Dog {
    /// The payload of the dog. Must not contain whitespace to survive a round
    /// trip.
    #[get = "pub"]
    #[set = "pub"]
    #[new(into)]
    data: String,
}

impl Default for Dog {
    fn default() -> Self { Self::new("dog") }
}

impl Serializable for Dog {
    fn type_tag(&self) -> &'static str { Self::TYPE_TAG }

    fn serialize_fields(&self, sink: &mut TokenSink<'_>) -> fmt::Result {
        sink.write_token(&self.data)
    }

    fn construct_from_stream(
        &mut self,
        source: &mut TokenSource<'_>,
    ) -> Result<(), polyser_stream::Error> {
        source.expect_token("the dog data")?.clone_into(&mut self.data);

        Ok(())
    }
}

impl Variant for Dog {
    const TYPE_TAG: &'static str = "Dog";
}
