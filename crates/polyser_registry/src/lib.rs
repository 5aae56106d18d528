//! A registry mapping a [`TypeTag`] to the [`Prototype`] of a concrete
//! variant.
//!
//! The registry is generic over the capability type `T` (usually a trait
//! object such as `dyn Serializable`), so new variants and new capabilities
//! never require a change here.
//!
//! # Example
//!
//! ``` rust
//! use polyser_registry::{Registry, TypeTag};
//!
//! trait Shape {
//!     fn sides(&self) -> usize;
//! }
//!
//! #[derive(Default)]
//! struct Triangle;
//!
//! impl Shape for Triangle {
//!     fn sides(&self) -> usize { 3 }
//! }
//!
//! let mut registry = Registry::<dyn Shape>::new();
//! registry.register(TypeTag::from_static("Triangle"), || Box::new(Triangle));
//!
//! let shape = registry.lookup("Triangle").unwrap().instantiate();
//! assert_eq!(shape.sides(), 3);
//!
//! assert!(registry.lookup("Square").is_err());
//! ```

use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
};

pub mod tag;

pub use tag::{InvalidTypeTag, TypeTag};

/// A function that allocates a fresh default instance of one concrete
/// variant.
pub type Factory<T> = fn() -> Box<T>;

/// The registry-owned template of one concrete variant.
///
/// A prototype carries no state of its own; it only knows how to create new
/// instances of its variant. Every call to [`Prototype::instantiate`] returns
/// a distinct allocation.
pub struct Prototype<T: ?Sized> {
    tag: TypeTag,
    factory: Factory<T>,
}

impl<T: ?Sized> Prototype<T> {
    /// Creates a new [`Prototype`].
    ///
    /// This is a `const fn` so that a fixed table of prototypes can be
    /// declared as a `const` item.
    #[must_use]
    pub const fn new(tag: TypeTag, factory: Factory<T>) -> Self {
        Self { tag, factory }
    }

    /// Gets the type tag of the variant.
    #[must_use]
    pub const fn tag(&self) -> &TypeTag { &self.tag }

    /// Allocates a new default instance of the variant.
    #[must_use]
    pub fn instantiate(&self) -> Box<T> { (self.factory)() }
}

impl<T: ?Sized> Clone for Prototype<T> {
    fn clone(&self) -> Self {
        Self { tag: self.tag.clone(), factory: self.factory }
    }
}

impl<T: ?Sized> fmt::Debug for Prototype<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("tag", &self.tag)
            .field("factory", &(self.factory as *const ()))
            .finish()
    }
}

/// no prototype is registered under type tag `{tag}`
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    thiserror::Error,
    displaydoc::Display,
)]
pub struct TypeTagNotFound {
    /// The tag that was looked up.
    pub tag: String,
}

/// type tag `{tag}` is already registered
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    thiserror::Error,
    displaydoc::Display,
)]
pub struct DuplicateTypeTag {
    /// The tag that was registered twice.
    pub tag: TypeTag,
}

/// Maps a [`TypeTag`] to the [`Prototype`] of its variant.
///
/// # Duplicate Tags
///
/// [`Registry::register`] follows a last-writer-wins policy: registering a
/// tag that already exists replaces the previous prototype and returns it.
/// Use [`Registry::try_register`] to reject duplicates instead.
pub struct Registry<T: ?Sized> {
    prototypes: HashMap<TypeTag, Prototype<T>>,
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self { Self { prototypes: HashMap::new() } }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.tags()).finish()
    }
}

impl<T: ?Sized> Registry<T> {
    /// Creates an empty [`Registry`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Creates a [`Registry`] from an ordered table of prototypes.
    ///
    /// The prototypes are inserted in iteration order, so a tag that appears
    /// more than once resolves to its last occurrence.
    #[must_use]
    pub fn from_prototypes(
        prototypes: impl IntoIterator<Item = Prototype<T>>,
    ) -> Self {
        let mut registry = Self::new();

        for prototype in prototypes {
            registry.insert(prototype);
        }

        registry
    }

    /// Registers a prototype, replacing any prototype previously registered
    /// under the same tag.
    ///
    /// Returns the replaced prototype, if any.
    pub fn insert(&mut self, prototype: Prototype<T>) -> Option<Prototype<T>> {
        let tag = prototype.tag.clone();
        let replaced = self.prototypes.insert(tag.clone(), prototype);

        if replaced.is_some() {
            log::warn!(
                "type tag `{tag}` is registered again; the previous prototype \
                 is replaced"
            );
        } else {
            log::debug!("registered type tag `{tag}`");
        }

        replaced
    }

    /// Registers the `factory` under `tag`, replacing any prototype
    /// previously registered under the same tag.
    ///
    /// Returns the replaced prototype, if any.
    pub fn register(
        &mut self,
        tag: TypeTag,
        factory: Factory<T>,
    ) -> Option<Prototype<T>> {
        self.insert(Prototype::new(tag, factory))
    }

    /// Registers the `factory` under `tag` only if the tag is not taken yet.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateTypeTag`] if the tag is already registered; the
    /// registry is left unchanged.
    pub fn try_register(
        &mut self,
        tag: TypeTag,
        factory: Factory<T>,
    ) -> Result<(), DuplicateTypeTag> {
        match self.prototypes.entry(tag) {
            Entry::Occupied(entry) => {
                Err(DuplicateTypeTag { tag: entry.key().clone() })
            }
            Entry::Vacant(entry) => {
                let tag = entry.key().clone();
                log::debug!("registered type tag `{tag}`");
                entry.insert(Prototype::new(tag, factory));

                Ok(())
            }
        }
    }

    /// Looks up the prototype registered under `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeTagNotFound`] if no prototype is registered under the
    /// tag.
    pub fn lookup(&self, tag: &str) -> Result<&Prototype<T>, TypeTagNotFound> {
        self.prototypes
            .get(tag)
            .ok_or_else(|| TypeTagNotFound { tag: tag.to_owned() })
    }

    /// Returns `true` if a prototype is registered under `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.prototypes.contains_key(tag)
    }

    /// Gets the number of registered prototypes.
    #[must_use]
    pub fn len(&self) -> usize { self.prototypes.len() }

    /// Returns `true` if no prototype is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.prototypes.is_empty() }

    /// Gets all registered tags in ascending order.
    #[must_use]
    pub fn tags(&self) -> Vec<&TypeTag> {
        let mut tags = self.prototypes.keys().collect::<Vec<_>>();
        tags.sort();

        tags
    }
}

#[cfg(test)]
mod test;
