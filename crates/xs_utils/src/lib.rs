//! Shared containers for the `xs` crates.
//!
//! - [`hash`]: `hashbrown` containers with `foldhash` based, seed-stable hashers.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId), used as the
//!   table behind every process-wide type cache.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
