use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::error::SerialError;
use crate::info::{TypeInfo, display_name};
use crate::namespace::{NamespaceBinding, NamespaceTable};
use crate::registry::SerializerRegistry;
use crate::settings::XmlSettings;
use crate::value::XmlValue;
use crate::write::{QualifiedName, WriteSequence, XmlSink};

// -----------------------------------------------------------------------------
// SerializationContext

/// State of one serialization pass.
///
/// Resolves serializers through a shared [`SerializerRegistry`] and owns the
/// [`NamespaceTable`] of the pass. Serializers call back into the context for
/// nested values and prefixes, so every method takes `&self`.
///
/// A context is meant for a single pass on a single thread; it is not `Sync`.
///
/// ```
/// use xs_serial::{SerializationContext, write::WriteAction};
///
/// let ctx = SerializationContext::new();
/// let actions = ctx.serialize(Some(&7_i32)).unwrap().collect_actions().unwrap();
/// assert_eq!(actions[1], WriteAction::Text("7".into()));
///
/// assert_eq!(ctx.serialize(None).unwrap().count(), 0);
/// ```
pub struct SerializationContext {
    registry: &'static SerializerRegistry,
    namespaces: RefCell<NamespaceTable>,
    settings: XmlSettings,
}

impl SerializationContext {
    /// Creates a context with default settings and the global registry.
    #[inline]
    pub fn new() -> Self {
        Self::with_settings(XmlSettings::default())
    }

    /// Creates a context with the given settings and the global registry.
    pub fn with_settings(settings: XmlSettings) -> Self {
        Self {
            registry: SerializerRegistry::global(),
            namespaces: RefCell::new(NamespaceTable::new(settings.prefix_stem.as_str())),
            settings,
        }
    }

    /// Uses `registry` instead of the global one.
    #[inline]
    pub fn with_registry(mut self, registry: &'static SerializerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The settings of this pass.
    #[inline]
    pub fn settings(&self) -> &XmlSettings {
        &self.settings
    }

    /// The registry serializers are resolved from.
    #[inline]
    pub fn registry(&self) -> &'static SerializerRegistry {
        self.registry
    }

    /// Produces the write actions of `value`, named after its runtime type.
    ///
    /// An absent value produces an empty sequence. Only resolution of the
    /// top-level type fails here, nested failures are items of the sequence.
    pub fn serialize<'a>(
        &'a self,
        value: Option<&'a dyn XmlValue>,
    ) -> Result<WriteSequence<'a>, SerialError> {
        let Some(value) = value else {
            return Ok(WriteSequence::empty());
        };
        let info = value.value_type_info();
        self.serialize_named(display_name(info), info, value)
    }

    /// Produces the write actions of `value` as an element named `local_name`,
    /// using the serializer of `info`.
    pub fn serialize_named<'a>(
        &'a self,
        local_name: impl Into<Cow<'static, str>>,
        info: &'static TypeInfo,
        value: &'a dyn XmlValue,
    ) -> Result<WriteSequence<'a>, SerialError> {
        let serializer = self.registry.resolve(info)?;
        Ok(serializer.write(self, local_name.into(), value))
    }

    /// Returns the text form of a scalar value, used for attributes and text
    /// content. `member` names the member for diagnostics.
    pub fn scalar_text(
        &self,
        member: &'static str,
        value: &dyn XmlValue,
    ) -> Result<String, SerialError> {
        let info = value.value_type_info();
        self.registry
            .resolve(info)?
            .scalar_text(value)
            .unwrap_or(Err(SerialError::NotScalar {
                member,
                type_path: info.type_path(),
            }))
    }

    /// Returns the prefix bound to `namespace` in this pass, allocating one
    /// on first request.
    pub fn get_prefix(&self, local_name: &str, namespace: &str) -> String {
        String::from(self.namespaces.borrow_mut().get_prefix(local_name, namespace))
    }

    /// Builds the name of an element or attribute, prefixed when a namespace
    /// is given.
    pub fn qualify(
        &self,
        local_name: Cow<'static, str>,
        namespace: Option<&'static str>,
    ) -> QualifiedName {
        match namespace.filter(|namespace| !namespace.is_empty()) {
            Some(namespace) => {
                let prefix = self.get_prefix(&local_name, namespace);
                QualifiedName::prefixed(prefix, local_name, namespace)
            }
            None => QualifiedName::new(local_name),
        }
    }

    /// Declares every namespace bound so far on the element just opened in
    /// `sink`, in allocation order.
    pub fn write_namespace_declarations(&self, sink: &mut dyn XmlSink) -> Result<(), SerialError> {
        let namespaces = self.namespaces.borrow();
        for binding in namespaces.bindings() {
            sink.namespace_declaration(binding.prefix(), binding.uri())?;
        }
        Ok(())
    }

    /// A snapshot of the bindings allocated so far.
    pub fn namespace_bindings(&self) -> Vec<NamespaceBinding> {
        self.namespaces.borrow().bindings().to_vec()
    }
}

impl Default for SerializationContext {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
