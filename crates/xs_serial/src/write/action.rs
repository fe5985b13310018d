use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::error::SerialError;
use crate::write::XmlSink;

// -----------------------------------------------------------------------------
// QualifiedName

/// An element or attribute name with an optional namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    prefix: Option<String>,
    local: Cow<'static, str>,
    namespace: Option<Cow<'static, str>>,
}

impl QualifiedName {
    /// Creates an unqualified name.
    #[inline]
    pub fn new(local: impl Into<Cow<'static, str>>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
            namespace: None,
        }
    }

    /// Creates a name bound to `namespace` through `prefix`.
    #[inline]
    pub fn prefixed(
        prefix: impl Into<String>,
        local: impl Into<Cow<'static, str>>,
        namespace: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// The prefix, if any.
    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The local part of the name.
    #[inline]
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The namespace URI, if any.
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The name as written, `prefix:local` or `local`.
    pub fn qualified(&self) -> Cow<'_, str> {
        match &self.prefix {
            Some(prefix) => Cow::Owned(format!("{prefix}:{}", self.local)),
            None => Cow::Borrowed(&self.local),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}:")?;
        }
        f.write_str(&self.local)
    }
}

// -----------------------------------------------------------------------------
// WriteAction

/// One deferred write against an [`XmlSink`].
///
/// Serializers produce these in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteAction {
    StartElement(QualifiedName),
    Attribute { name: QualifiedName, value: String },
    Text(String),
    EndElement,
}

impl WriteAction {
    /// Performs the write.
    pub fn apply(&self, sink: &mut dyn XmlSink) -> Result<(), SerialError> {
        match self {
            Self::StartElement(name) => sink.start_element(name),
            Self::Attribute { name, value } => sink.attribute(name, value),
            Self::Text(text) => sink.text(text),
            Self::EndElement => sink.end_element(),
        }
    }

    /// Short label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::StartElement(_) => "start element",
            Self::Attribute { .. } => "attribute",
            Self::Text(_) => "text",
            Self::EndElement => "end element",
        }
    }
}
