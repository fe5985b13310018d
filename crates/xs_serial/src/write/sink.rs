use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::SerialError;
use crate::settings::Indent;
use crate::write::QualifiedName;

// -----------------------------------------------------------------------------
// XmlSink

/// The structured output a [`WriteAction`](crate::write::WriteAction) is
/// applied to.
pub trait XmlSink {
    /// Opens an element. Attributes and namespace declarations may follow
    /// until the first child or text.
    fn start_element(&mut self, name: &QualifiedName) -> Result<(), SerialError>;

    /// Adds an attribute to the element just opened.
    fn attribute(&mut self, name: &QualifiedName, value: &str) -> Result<(), SerialError>;

    /// Declares `xmlns:{prefix}="{uri}"` on the element just opened.
    fn namespace_declaration(&mut self, prefix: &str, uri: &str) -> Result<(), SerialError>;

    /// Writes escaped text content.
    fn text(&mut self, text: &str) -> Result<(), SerialError>;

    /// Closes the innermost open element.
    fn end_element(&mut self) -> Result<(), SerialError>;
}

// -----------------------------------------------------------------------------
// XmlWriter

/// An [`XmlSink`] writing XML text through [`quick_xml::Writer`].
///
/// The start tag is held back until the first child, text or end, so that
/// attributes can still be added. Elements without content are written as
/// `<name/>`. A prefixed name whose prefix is not declared in scope gets a
/// local `xmlns` declaration.
///
/// ```
/// use xs_serial::write::{QualifiedName, XmlSink, XmlWriter};
///
/// let mut writer = XmlWriter::new(Vec::new());
/// writer.start_element(&QualifiedName::new("a")).unwrap();
/// writer.attribute(&QualifiedName::new("id"), "1").unwrap();
/// writer.start_element(&QualifiedName::new("b")).unwrap();
/// writer.end_element().unwrap();
/// writer.end_element().unwrap();
///
/// let text = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(text, r#"<a id="1"><b/></a>"#);
/// ```
pub struct XmlWriter<W: Write> {
    writer: Writer<W>,
    pending: Option<BytesStart<'static>>,
    open: Vec<String>,
    // (prefix, uri) in declaration order, `scopes` marks the length at each open element.
    bindings: Vec<(String, String)>,
    scopes: Vec<usize>,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a writer producing a single line.
    pub fn new(inner: W) -> Self {
        Self::from_writer(Writer::new(inner))
    }

    /// Creates a writer indenting nested elements.
    pub fn new_with_indent(inner: W, indent: &Indent) -> Self {
        let mut buf = [0_u8; 4];
        let encoded = indent.char.encode_utf8(&mut buf);
        // quick-xml indents with a single byte.
        let byte = if encoded.len() == 1 { encoded.as_bytes()[0] } else { b' ' };
        Self::from_writer(Writer::new_with_indent(inner, byte, indent.size))
    }

    fn from_writer(writer: Writer<W>) -> Self {
        Self {
            writer,
            pending: None,
            open: Vec::new(),
            bindings: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Writes `<?xml version="1.0" encoding="UTF-8"?>`.
    pub fn write_declaration(&mut self) -> Result<(), SerialError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Number of elements still open.
    #[inline]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Returns the underlying output.
    ///
    /// Elements still open are not closed.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn flush_pending(&mut self) -> Result<(), SerialError> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }

    fn is_bound(&self, prefix: &str, uri: &str) -> bool {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == prefix)
            .is_some_and(|(_, bound_uri)| bound_uri == uri)
    }

    fn declare(&mut self, prefix: &str, uri: &str) -> Result<(), SerialError> {
        if self.is_bound(prefix, uri) {
            return Ok(());
        }
        let start = self
            .pending
            .as_mut()
            .ok_or(SerialError::Misplaced { action: "namespace declaration" })?;
        start.push_attribute((format!("xmlns:{prefix}").as_str(), uri));
        self.bindings.push((String::from(prefix), String::from(uri)));
        Ok(())
    }

    fn declare_for(&mut self, name: &QualifiedName) -> Result<(), SerialError> {
        match (name.prefix(), name.namespace()) {
            (Some(prefix), Some(uri)) => self.declare(prefix, uri),
            _ => Ok(()),
        }
    }
}

impl<W: Write> XmlSink for XmlWriter<W> {
    fn start_element(&mut self, name: &QualifiedName) -> Result<(), SerialError> {
        self.flush_pending()?;
        let qualified = name.qualified().into_owned();
        self.pending = Some(BytesStart::new(Cow::Owned(qualified.clone())));
        self.open.push(qualified);
        self.scopes.push(self.bindings.len());
        self.declare_for(name)
    }

    fn attribute(&mut self, name: &QualifiedName, value: &str) -> Result<(), SerialError> {
        if self.pending.is_none() {
            return Err(SerialError::Misplaced { action: "attribute" });
        }
        self.declare_for(name)?;
        if let Some(start) = self.pending.as_mut() {
            start.push_attribute((name.qualified().as_ref(), value));
        }
        Ok(())
    }

    fn namespace_declaration(&mut self, prefix: &str, uri: &str) -> Result<(), SerialError> {
        self.declare(prefix, uri)
    }

    fn text(&mut self, text: &str) -> Result<(), SerialError> {
        if self.open.is_empty() {
            return Err(SerialError::Misplaced { action: "text" });
        }
        self.flush_pending()?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn end_element(&mut self) -> Result<(), SerialError> {
        let name = self
            .open
            .pop()
            .ok_or(SerialError::Misplaced { action: "end element" })?;
        if let Some(mark) = self.scopes.pop() {
            self.bindings.truncate(mark);
        }
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(name)))?,
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{XmlSink, XmlWriter};
    use crate::error::SerialError;
    use crate::settings::Indent;
    use crate::write::QualifiedName;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn finish(writer: XmlWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn text_is_escaped() {
        let mut writer = XmlWriter::new(Vec::new());
        writer.start_element(&QualifiedName::new("t")).unwrap();
        writer.text("a < b & c").unwrap();
        writer.end_element().unwrap();
        assert_eq!(finish(writer), "<t>a &lt; b &amp; c</t>");
    }

    #[test]
    fn undeclared_prefixes_are_declared_once_per_scope() {
        let mut writer = XmlWriter::new(Vec::new());
        let outer = QualifiedName::prefixed("ns0", "outer", "urn:a");
        let inner = QualifiedName::prefixed("ns0", "inner", "urn:a");

        writer.start_element(&outer).unwrap();
        writer.namespace_declaration("ns0", "urn:a").unwrap();
        writer.start_element(&inner).unwrap();
        writer.end_element().unwrap();
        writer.end_element().unwrap();
        // A sibling after the scope closed needs its own declaration.
        writer.start_element(&inner).unwrap();
        writer.end_element().unwrap();

        assert_eq!(
            finish(writer),
            r#"<ns0:outer xmlns:ns0="urn:a"><ns0:inner/></ns0:outer><ns0:inner xmlns:ns0="urn:a"/>"#
        );
    }

    #[test]
    fn misplaced_writes_fail() {
        let mut writer = XmlWriter::new(Vec::new());
        assert!(matches!(
            writer.attribute(&QualifiedName::new("a"), "1"),
            Err(SerialError::Misplaced { action: "attribute" })
        ));
        assert!(matches!(
            writer.end_element(),
            Err(SerialError::Misplaced { action: "end element" })
        ));
        assert!(writer.text("x").is_err());
    }

    #[test]
    fn indentation_follows_settings() {
        let mut writer = XmlWriter::new_with_indent(Vec::new(), &Indent { char: ' ', size: 2 });
        writer.start_element(&QualifiedName::new("a")).unwrap();
        writer.start_element(&QualifiedName::new("b")).unwrap();
        writer.end_element().unwrap();
        writer.end_element().unwrap();
        assert_eq!(finish(writer), "<a>\n  <b/>\n</a>");
    }
}
