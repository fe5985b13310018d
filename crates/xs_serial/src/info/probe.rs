use alloc::vec::Vec;
use core::any::Any;

use crate::info::{CapabilityFamily, Type, TypeInfo, UpcastFn};

// -----------------------------------------------------------------------------
// Probed

/// A capability found by [`probe`].
///
/// Holds the type that declares the capability and the upcasts leading
/// from the probed type to it.
pub struct Probed<C: CapabilityFamily> {
    capability: &'static C,
    owner: &'static TypeInfo,
    reach: Vec<UpcastFn>,
}

impl<C: CapabilityFamily> Probed<C> {
    /// The capability.
    #[inline]
    pub fn capability(&self) -> &'static C {
        self.capability
    }

    /// The type that declares the capability, either the probed type or one
    /// of its bases.
    #[inline]
    pub fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    /// Returns `true` if the capability was inherited from a base.
    #[inline]
    pub fn is_inherited(&self) -> bool {
        !self.reach.is_empty()
    }

    /// Converts a value of the probed type into the value the capability
    /// operates on.
    pub fn reach<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        self.reach
            .iter()
            .try_fold(value, |current, upcast| upcast(current))
    }
}

// -----------------------------------------------------------------------------
// probe

/// Searches `info` for a capability of family `C`.
///
/// The type's own capabilities are checked first, then every base in order.
///
/// ```
/// use xs_serial::info::{probe, KeyedPairsCapability, ListCapability, Typed};
/// use std::collections::HashMap;
///
/// let info = <HashMap<String, i32>>::type_info();
/// let pairs = probe::<KeyedPairsCapability>(info).unwrap();
/// assert!(pairs.capability().key().is::<String>());
/// assert!(probe::<ListCapability>(info).is_none());
/// ```
pub fn probe<C: CapabilityFamily>(info: &'static TypeInfo) -> Option<Probed<C>> {
    let mut reach = Vec::new();
    let mut current = info;
    loop {
        if let Some(capability) = current.capabilities().iter().find_map(C::select) {
            return Some(Probed {
                capability,
                owner: current,
                reach,
            });
        }
        let base = current.base()?;
        reach.push(base.upcast());
        current = base.info();
    }
}

/// Returns `true` if `info` or one of its bases declares a capability of
/// family `C`.
#[inline]
pub fn implements<C: CapabilityFamily>(info: &'static TypeInfo) -> bool {
    probe::<C>(info).is_some()
}

/// Returns the declared generic arguments of `info`, or of the first base
/// that declares any, together with that type.
///
/// Walks the same chain as [`probe`]. Returns `None` when no type on the
/// chain is generic.
pub fn declared_generics(info: &'static TypeInfo) -> Option<(&'static TypeInfo, &'static [Type])> {
    let mut current = info;
    loop {
        if !current.generics().is_empty() {
            return Some((current, current.generics()));
        }
        current = current.base()?.info();
    }
}
