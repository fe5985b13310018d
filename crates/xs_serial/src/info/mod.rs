//! Compile-time type metadata.
//!
//! - [`TypePath`]: stable names of a type.
//! - [`Type`]: the key of a type in every cache, a `TypeId` plus a [`TypePathTable`].
//! - [`Typed`]: static access to a type's [`TypeInfo`].
//! - [`TypeInfo`]: kind, generic arguments, capabilities, base and namespace.
//! - [`Capability`]: what a type can be traversed as, one of
//!   [`IterableCapability`], [`ListCapability`] and [`KeyedPairsCapability`].
//! - [`probe`] / [`implements`]: capability lookup through the base chain.
//! - [`declared_generics`]: generic arguments, through the base chain.
//! - [`normalize_type_name`] / [`display_name`]: element names derived from types.
//! - Cells for implementing [`Typed`] and [`TypePath`] by hand.

// -----------------------------------------------------------------------------
// Modules

mod capability;
mod cell;
mod display_name;
mod probe;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use capability::{
    Capability, CapabilityFamily, Elements, ElementsFn, IterableCapability, KeyedPairsCapability,
    ListCapability, Pairs, PairsFn, UpcastFn,
};
pub use cell::{
    GenericTypeCell, GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeCell,
    NonGenericTypeInfoCell, concat,
};
pub use display_name::{display_name, normalize_type_name};
pub use probe::{Probed, declared_generics, implements, probe};
pub use type_info::{BaseInfo, ObjectInfo, TypeInfo, TypeKind};
pub use type_path::{Type, TypePath, TypePathTable};
pub use typed::Typed;
