//! Structural capabilities a type can declare.
//!
//! A capability is the runtime record of "this type can be traversed like
//! that". Each one carries the declared element types and a function that
//! walks a value of the owning type.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::XmlValue;
use crate::info::Type;

// -----------------------------------------------------------------------------
// Function types

/// Items yielded by an element traversal.
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn XmlValue> + 'a>;

/// Items yielded by a key/value traversal.
pub type Pairs<'a> = Box<dyn Iterator<Item = (&'a dyn XmlValue, &'a dyn XmlValue)> + 'a>;

/// Walks the elements of a value, `None` if the value has the wrong type.
pub type ElementsFn = fn(&dyn Any) -> Option<Elements<'_>>;

/// Walks the pairs of a value, `None` if the value has the wrong type.
pub type PairsFn = fn(&dyn Any) -> Option<Pairs<'_>>;

/// Converts a value into its base, `None` if the value has the wrong type.
pub type UpcastFn = fn(&dyn Any) -> Option<&dyn Any>;

// -----------------------------------------------------------------------------
// IterableCapability

/// Plain iteration over elements.
///
/// `element` is `None` for untyped collections.
#[derive(Clone, Copy)]
pub struct IterableCapability {
    element: Option<Type>,
    iter: ElementsFn,
}

impl IterableCapability {
    /// Creates an iteration capability.
    #[inline]
    pub const fn new(element: Option<Type>, iter: ElementsFn) -> Self {
        Self { element, iter }
    }

    /// The declared element type, if any.
    #[inline]
    pub const fn element(&self) -> Option<Type> {
        self.element
    }

    /// Walks the elements of `value`.
    #[inline]
    pub fn elements<'a>(&self, value: &'a dyn Any) -> Option<Elements<'a>> {
        (self.iter)(value)
    }
}

// -----------------------------------------------------------------------------
// ListCapability

/// Ordered, indexable list of one element type.
#[derive(Clone, Copy)]
pub struct ListCapability {
    element: Type,
    iter: ElementsFn,
}

impl ListCapability {
    /// Creates an ordered list capability.
    #[inline]
    pub const fn new(element: Type, iter: ElementsFn) -> Self {
        Self { element, iter }
    }

    /// The element type.
    #[inline]
    pub const fn element(&self) -> Type {
        self.element
    }

    /// Walks the elements of `value` in order.
    #[inline]
    pub fn elements<'a>(&self, value: &'a dyn Any) -> Option<Elements<'a>> {
        (self.iter)(value)
    }
}

// -----------------------------------------------------------------------------
// KeyedPairsCapability

/// Iteration over key/value pairs, the shape of a dictionary.
#[derive(Clone, Copy)]
pub struct KeyedPairsCapability {
    key: Type,
    value: Type,
    iter: PairsFn,
}

impl KeyedPairsCapability {
    /// Creates a keyed pairs capability.
    #[inline]
    pub const fn new(key: Type, value: Type, iter: PairsFn) -> Self {
        Self { key, value, iter }
    }

    /// The key type.
    #[inline]
    pub const fn key(&self) -> Type {
        self.key
    }

    /// The value type.
    #[inline]
    pub const fn value(&self) -> Type {
        self.value
    }

    /// Walks the pairs of `value`.
    #[inline]
    pub fn pairs<'a>(&self, value: &'a dyn Any) -> Option<Pairs<'a>> {
        (self.iter)(value)
    }
}

// -----------------------------------------------------------------------------
// Capability

/// One capability declared by a type.
#[derive(Clone, Copy)]
pub enum Capability {
    Iterable(IterableCapability),
    List(ListCapability),
    KeyedPairs(KeyedPairsCapability),
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iterable(cap) => f.debug_tuple("Iterable").field(&cap.element).finish(),
            Self::List(cap) => f.debug_tuple("List").field(&cap.element).finish(),
            Self::KeyedPairs(cap) => f
                .debug_tuple("KeyedPairs")
                .field(&cap.key)
                .field(&cap.value)
                .finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// CapabilityFamily

/// Selects one variant of [`Capability`], the family a probe searches for.
pub trait CapabilityFamily: Sized + 'static {
    /// Returns the capability if it belongs to this family.
    fn select(capability: &Capability) -> Option<&Self>;
}

impl CapabilityFamily for IterableCapability {
    #[inline]
    fn select(capability: &Capability) -> Option<&Self> {
        match capability {
            Capability::Iterable(cap) => Some(cap),
            _ => None,
        }
    }
}

impl CapabilityFamily for ListCapability {
    #[inline]
    fn select(capability: &Capability) -> Option<&Self> {
        match capability {
            Capability::List(cap) => Some(cap),
            _ => None,
        }
    }
}

impl CapabilityFamily for KeyedPairsCapability {
    #[inline]
    fn select(capability: &Capability) -> Option<&Self> {
        match capability {
            Capability::KeyedPairs(cap) => Some(cap),
            _ => None,
        }
    }
}
