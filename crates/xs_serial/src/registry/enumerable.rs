use alloc::boxed::Box;

use crate::XmlValue;
use crate::error::SerialError;
use crate::info::{
    IterableCapability, KeyedPairsCapability, ListCapability, Type, TypeInfo, TypeKind,
    declared_generics, probe,
};
use crate::serializers::{ArraySerializer, DictionarySerializer, ListSerializer, XmlSerializer};

/// Chooses the serializer of a type that implements iteration.
///
/// First match wins:
///
/// 1. no generic arguments declared by the type or any of its bases: array of the best known element type;
/// 2. keyed pairs: dictionary of (key, value);
/// 3. ordered list, or iteration with a known element: list of that element;
/// 4. otherwise [`SerialError::UnsupportedShape`].
///
/// Dictionaries also iterate, so they are recognized before the list fallback.
pub fn resolve_enumerable(info: &'static TypeInfo) -> Result<Box<dyn XmlSerializer>, SerialError> {
    let unsupported = || SerialError::UnsupportedShape {
        type_path: info.type_path(),
    };
    let iterable = probe::<IterableCapability>(info);

    if declared_generics(info).is_none() {
        let iterable = iterable.ok_or_else(unsupported)?;
        let element = match info.kind() {
            TypeKind::Array { element } => element,
            _ => iterable
                .capability()
                .element()
                .unwrap_or(Type::of::<dyn XmlValue>()),
        };
        return Ok(Box::new(ArraySerializer::new(element, iterable)));
    }

    if let Some(pairs) = probe::<KeyedPairsCapability>(info) {
        return Ok(Box::new(DictionarySerializer::new(pairs)));
    }

    if let Some(list) = probe::<ListCapability>(info) {
        return Ok(Box::new(ListSerializer::from_list(list)));
    }

    if let Some(iterable) = iterable
        && let Some(element) = iterable.capability().element()
    {
        return Ok(Box::new(ListSerializer::from_iterable(element, iterable)));
    }

    Err(unsupported())
}
