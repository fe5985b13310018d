//! Resolution and caching of XML serializers for runtime types.
//!
//! Every type that can be written is described by a [`TypeInfo`]: its kind,
//! its generic arguments, the capabilities it declares (plain iteration,
//! ordered list, keyed pairs) and an optional base type. The
//! [`SerializerRegistry`] turns a [`TypeInfo`] into exactly one serializer,
//! builds it on first use and shares it afterwards.
//!
//! A [`SerializationContext`] drives one document. It turns a value into a
//! lazy [`WriteSequence`] of [`WriteAction`]s and hands out namespace
//! prefixes, which are declared once on the root element.
//!
//! ```
//! use xs_serial::derive::XmlObject;
//! use xs_serial::write::to_xml_string;
//!
//! #[derive(XmlObject)]
//! #[xml(namespace = "urn:garage")]
//! struct Car {
//!     #[xml(attribute)]
//!     id: u32,
//!     model: String,
//!     owner: Option<String>,
//! }
//!
//! let car = Car { id: 7, model: String::from("Kei"), owner: None };
//! let xml = to_xml_string(&car).unwrap();
//! assert!(xml.ends_with(
//!     r#"<ns0:Car xmlns:ns0="urn:garage" id="7"><model>Kei</model></ns0:Car>"#
//! ));
//! ```
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`SerializerRegistry`]: crate::registry::SerializerRegistry
//! [`WriteSequence`]: crate::write::WriteSequence
//! [`WriteAction`]: crate::write::WriteAction
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `xs_serial`, also when derived inside it.
extern crate self as xs_serial;

// -----------------------------------------------------------------------------
// no_std support

// The document writer is built on `std::io` and the caches on `std::sync`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod context;
mod error;
mod namespace;
mod settings;
mod value;

pub mod impls;
pub mod info;
pub mod members;
pub mod registry;
pub mod serializers;
pub mod write;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}

pub use context::SerializationContext;
pub use error::SerialError;
pub use namespace::{DEFAULT_STEM, NamespaceBinding, NamespaceTable};
pub use settings::{Indent, XmlSettings};
pub use value::{XmlScalar, XmlValue};
pub use xs_serial_derive as derive;
