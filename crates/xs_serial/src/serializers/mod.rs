//! The serializer strategies resolved by the
//! [`SerializerRegistry`](crate::registry::SerializerRegistry).
//!
//! - [`ScalarSerializer`]: one text element, registered for std scalars.
//! - [`BytesSerializer`]: `Vec<u8>` as hex text.
//! - [`ObjectSerializer`]: attributes and nested elements from member descriptors.
//! - [`ArraySerializer`] / [`ListSerializer`]: one nested element per item.
//! - [`DictionarySerializer`]: one entry element per key/value pair.

// -----------------------------------------------------------------------------
// Modules

mod bytes;
mod dictionary;
mod object;
mod scalar;
mod sequence;

// -----------------------------------------------------------------------------
// Exports

pub use bytes::BytesSerializer;
pub use dictionary::DictionarySerializer;
pub use object::ObjectSerializer;
pub use scalar::ScalarSerializer;
pub use sequence::{ArraySerializer, ListSerializer};

use alloc::borrow::Cow;
use alloc::string::String;

use crate::context::SerializationContext;
use crate::error::SerialError;
use crate::info::Type;
use crate::value::XmlValue;
use crate::write::WriteSequence;

// -----------------------------------------------------------------------------
// Strategy

/// The strategy a serializer implements, observable for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Scalar(Type),
    Object(Type),
    Array { element: Type },
    List { element: Type },
    Dictionary { key: Type, value: Type },
    /// A hand-written serializer, with a short description.
    Custom(&'static str),
}

// -----------------------------------------------------------------------------
// XmlSerializer

/// Turns values of one type into write actions.
///
/// Instances are cached for the whole process and shared between threads,
/// so they must not hold per-pass state: everything pass-specific lives in
/// the [`SerializationContext`].
pub trait XmlSerializer: Send + Sync + 'static {
    /// The strategy implemented.
    fn strategy(&self) -> Strategy;

    /// Produces the actions writing `value` as an element called `name`.
    ///
    /// The sequence is lazy: nested values are resolved when reached.
    fn write<'a>(
        &'a self,
        ctx: &'a SerializationContext,
        name: Cow<'static, str>,
        value: &'a dyn XmlValue,
    ) -> WriteSequence<'a>;

    /// The text form of `value`, `None` if this serializer does not write
    /// values as plain text.
    fn scalar_text(&self, value: &dyn XmlValue) -> Option<Result<String, SerialError>> {
        let _ = value;
        None
    }
}

/// The error of a value handed to a serializer of another type.
pub(crate) fn mismatch(expected: Type, value: &dyn XmlValue) -> SerialError {
    SerialError::ValueMismatch {
        expected: expected.path(),
        found: value.value_type_info().type_path(),
    }
}
