//! The built-in serializable variants and the process-wide registry they are
//! registered in.
//!
//! New variants are added by implementing
//! [`Serializable`](polyser_object::Serializable) and
//! [`Variant`](polyser_object::Variant) and appending one entry to
//! [`PROTOTYPES`].

use lazy_static::lazy_static;
use polyser_object::{prototype, Prototype, Registry, Serializable};

pub mod cat;
pub mod dog;

pub use cat::Cat;
pub use dog::Dog;

/// The ordered table of built-in prototypes.
///
/// The table is the single place where built-in variants are registered. A
/// tag listed twice resolves to its last entry.
pub const PROTOTYPES: [Prototype<dyn Serializable>; 2] =
    [prototype::<Dog>(), prototype::<Cat>()];

lazy_static! {
    static ref REGISTRY: Registry<dyn Serializable> =
        Registry::from_prototypes(PROTOTYPES);
}

/// Gets the process-wide registry holding every prototype of [`PROTOTYPES`].
///
/// The registry is built on first access and never modified afterwards, so
/// it can be looked up before any variant is constructed and from any
/// thread.
#[must_use]
pub fn registry() -> &'static Registry<dyn Serializable> { &REGISTRY }
