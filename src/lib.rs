//! Facade of the `xs_*` crates.
//!
//! - [`serial`]: serializer resolution, caching and XML writing.
//! - [`utils`]: hashing and `TypeId` keyed maps.
//!
//! Derive macros resolve `::xs_core::serial` when a crate depends on this
//! facade instead of `xs_serial` directly.

pub use xs_serial as serial;
pub use xs_utils as utils;
