//! See [`XmlObject`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod object;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// Derives `TypePath` and `Typed` for a struct written as an XML object.
///
/// Every named field is a member written as a nested element named after
/// the field, in declaration order. `Option` fields are omitted when `None`.
///
/// ## Type attributes
///
/// - `#[xml(rename = "name")]`: element name of the type, instead of the
///   generics-erased type name.
/// - `#[xml(namespace = "uri")]`: namespace of the type's element. The
///   prefix is allocated by the serialization context.
/// - `#[xml(property(name = "n", getter = path))]`: a computed member, read
///   by calling `path(&self)`. Accepts `attribute` and `namespace = "uri"`
///   like fields. Properties follow the fields.
///
/// ## Field attributes
///
/// - `#[xml(skip)]`: not a member.
/// - `#[xml(rename = "name")]`: member name.
/// - `#[xml(attribute)]`: written as an attribute, the value must be a scalar.
/// - `#[xml(namespace = "uri")]`: namespace of an attribute.
/// - `#[xml(text)]`: written as the text of the element, at most one field.
/// - `#[xml(base)]`: the field holds the base part of the value. Members and
///   capabilities of the base type come before the type's own.
///
/// ```rust, ignore
/// #[derive(XmlObject)]
/// #[xml(rename = "part", namespace = "urn:parts")]
/// #[xml(property(name = "weight", getter = Part::weight))]
/// struct Part {
///     #[xml(base)]
///     item: Item,
///     #[xml(attribute)]
///     serial: u64,
///     #[xml(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// Type parameters must themselves be `XmlValue + TypePath`. Lifetime and
/// const parameters are rejected.
#[proc_macro_derive(XmlObject, attributes(xml))]
pub fn derive_xml_object(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match object::XmlObject::parse(&ast) {
        Ok(object) => object.expand().into(),
        Err(err) => err.into_compile_error().into(),
    }
}
