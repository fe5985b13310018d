//! The process-wide type to serializer table.
//!
//! - [`SerializerRegistry`]: resolves and caches one serializer per type.
//! - [`BuiltinRegistration`]: a built-in serializer, seeded on first use.
//! - [`resolve_enumerable`]: the array / dictionary / list decision for
//!   iterable types.
//!
//! ## auto_register
//!
//! With the `auto_register` feature (on by default), [`register_scalar!`]
//! and [`register_serializer!`] add built-ins from any linked crate through
//! the [`inventory`] crate. Without it only the static list is seeded:
//!
//! - `bool` `char` `f32` `f64`
//! - `i8` `i16` `i32` `i64` `i128` `isize`
//! - `u8` `u16` `u32` `u64` `u128` `usize`
//! - `String` `&'static str`
//! - `Vec<u8>` (hex text)
//!
//! [`register_scalar!`]: crate::register_scalar
//! [`register_serializer!`]: crate::register_serializer
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod entry;
mod enumerable;
mod serializer_registry;

// -----------------------------------------------------------------------------
// Exports

pub use entry::BuiltinRegistration;
pub use enumerable::resolve_enumerable;
pub use serializer_registry::SerializerRegistry;
