//! Contains the definition of [`Cat`].

use std::fmt;

use derive_new::new;
use getset::{Getters, Setters};
use polyser_object::{Serializable, TokenSink, TokenSource, Variant};

/// A cat, serialized as `Cat <data>`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, Setters, new,
)]
pub struct Cat {
    /// The payload of the cat. Must not contain whitespace to survive a round
    /// trip.
    #[get = "pub"]
    #[set = "pub"]
    #[new(into)]
    data: String,
}

impl Default for Cat {
    fn default() -> Self { Self::new("cat") }
}

impl Serializable for Cat {
    fn type_tag(&self) -> &'static str { Self::TYPE_TAG }

    fn serialize_fields(&self, sink: &mut TokenSink<'_>) -> fmt::Result {
        sink.write_token(&self.data)
    }

    fn construct_from_stream(
        &mut self,
        source: &mut TokenSource<'_>,
    ) -> Result<(), polyser_stream::Error> {
        source.expect_token("the cat data")?.clone_into(&mut self.data);

        Ok(())
    }
}

impl Variant for Cat {
    const TYPE_TAG: &'static str = "Cat";
}
