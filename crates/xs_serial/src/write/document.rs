use alloc::string::String;
use alloc::vec::Vec;
use std::io::{self, Write};

use crate::context::SerializationContext;
use crate::error::SerialError;
use crate::settings::XmlSettings;
use crate::value::XmlValue;
use crate::write::XmlWriter;

/// Writes `value` as a complete document.
///
/// The body is produced before anything is written, so every namespace
/// used anywhere in the document is declared on the root element.
/// An absent value writes nothing but the optional declaration.
pub fn write_document<W: Write>(
    ctx: &SerializationContext,
    value: Option<&dyn XmlValue>,
    writer: &mut XmlWriter<W>,
) -> Result<(), SerialError> {
    if ctx.settings().declaration {
        writer.write_declaration()?;
    }

    let actions = ctx.serialize(value)?.collect_actions()?;
    let mut actions = actions.iter();

    if let Some(root) = actions.next() {
        root.apply(writer)?;
        ctx.write_namespace_declarations(writer)?;
    }
    for action in actions {
        action.apply(writer)?;
    }
    Ok(())
}

/// Serializes `value` to a string with default settings.
///
/// ```
/// let xml = xs_serial::write::to_xml_string(&vec![1_u8, 2]).unwrap();
/// assert!(xml.ends_with("<Vec>0102</Vec>"));
/// ```
#[inline]
pub fn to_xml_string(value: &dyn XmlValue) -> Result<String, SerialError> {
    to_xml_string_with(XmlSettings::default(), value)
}

/// Serializes `value` to a string with the given settings.
pub fn to_xml_string_with(settings: XmlSettings, value: &dyn XmlValue) -> Result<String, SerialError> {
    let ctx = SerializationContext::with_settings(settings);
    let mut writer = match &ctx.settings().indent {
        Some(indent) => XmlWriter::new_with_indent(Vec::new(), indent),
        None => XmlWriter::new(Vec::new()),
    };
    write_document(&ctx, Some(value), &mut writer)?;
    String::from_utf8(writer.into_inner())
        .map_err(|error| SerialError::Io(io::Error::new(io::ErrorKind::InvalidData, error)))
}
