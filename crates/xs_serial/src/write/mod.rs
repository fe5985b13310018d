//! Write actions and the sinks they are applied to.
//!
//! Serializers never touch the output: they produce a [`WriteSequence`] of
//! [`WriteAction`]s which the caller drains into an [`XmlSink`].

// -----------------------------------------------------------------------------
// Modules

mod action;
mod document;
mod sequence;
mod sink;

// -----------------------------------------------------------------------------
// Exports

pub use action::{QualifiedName, WriteAction};
pub use document::{to_xml_string, to_xml_string_with, write_document};
pub use sequence::WriteSequence;
pub use sink::{XmlSink, XmlWriter};
