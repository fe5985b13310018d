use alloc::borrow::Cow;
use core::iter;

use crate::context::SerializationContext;
use crate::error::SerialError;
use crate::info::{Elements, IterableCapability, ListCapability, Probed, Type};
use crate::serializers::{Strategy, XmlSerializer};
use crate::value::XmlValue;
use crate::write::{QualifiedName, WriteAction, WriteSequence};

// -----------------------------------------------------------------------------
// ElementSource

enum ElementSource {
    Iterable(Probed<IterableCapability>),
    List(Probed<ListCapability>),
}

impl ElementSource {
    fn owner_path(&self) -> &'static str {
        match self {
            Self::Iterable(probed) => probed.owner().type_path(),
            Self::List(probed) => probed.owner().type_path(),
        }
    }

    fn elements<'a>(&self, value: &'a dyn XmlValue) -> Result<Elements<'a>, SerialError> {
        let elements = match self {
            Self::Iterable(probed) => probed
                .reach(value.as_any())
                .and_then(|owner| probed.capability().elements(owner)),
            Self::List(probed) => probed
                .reach(value.as_any())
                .and_then(|owner| probed.capability().elements(owner)),
        };
        elements.ok_or_else(|| SerialError::ValueMismatch {
            expected: self.owner_path(),
            found: value.value_type_info().type_path(),
        })
    }
}

/// Start element, one element per item named after the item's runtime type,
/// end element.
fn write_items<'a>(
    source: &'a ElementSource,
    ctx: &'a SerializationContext,
    name: Cow<'static, str>,
    value: &'a dyn XmlValue,
) -> WriteSequence<'a> {
    let elements = match source.elements(value) {
        Ok(elements) => elements,
        Err(error) => return WriteSequence::failed(error),
    };

    let items = elements.flat_map(move |item| WriteSequence::from(ctx.serialize(Some(item))));

    WriteSequence::new(
        iter::once(Ok(WriteAction::StartElement(QualifiedName::new(name))))
            .chain(items)
            .chain(iter::once(Ok(WriteAction::EndElement))),
    )
}

// -----------------------------------------------------------------------------
// ArraySerializer

/// Writes arrays and untyped collections.
///
/// The element type is a best effort: the declared array element, the
/// iterated element, or `dyn XmlValue` when nothing is known.
pub struct ArraySerializer {
    element: Type,
    source: ElementSource,
}

impl ArraySerializer {
    /// Creates an array serializer iterating through `iterable`.
    #[inline]
    pub fn new(element: Type, iterable: Probed<IterableCapability>) -> Self {
        Self {
            element,
            source: ElementSource::Iterable(iterable),
        }
    }
}

impl XmlSerializer for ArraySerializer {
    fn strategy(&self) -> Strategy {
        Strategy::Array {
            element: self.element,
        }
    }

    fn write<'a>(
        &'a self,
        ctx: &'a SerializationContext,
        name: Cow<'static, str>,
        value: &'a dyn XmlValue,
    ) -> WriteSequence<'a> {
        write_items(&self.source, ctx, name, value)
    }
}

// -----------------------------------------------------------------------------
// ListSerializer

/// Writes generic single-element collections.
pub struct ListSerializer {
    element: Type,
    source: ElementSource,
}

impl ListSerializer {
    /// Creates a list serializer over an ordered list capability.
    #[inline]
    pub fn from_list(list: Probed<ListCapability>) -> Self {
        Self {
            element: list.capability().element(),
            source: ElementSource::List(list),
        }
    }

    /// Creates a list serializer over a plain iteration capability.
    #[inline]
    pub fn from_iterable(element: Type, iterable: Probed<IterableCapability>) -> Self {
        Self {
            element,
            source: ElementSource::Iterable(iterable),
        }
    }
}

impl XmlSerializer for ListSerializer {
    fn strategy(&self) -> Strategy {
        Strategy::List {
            element: self.element,
        }
    }

    fn write<'a>(
        &'a self,
        ctx: &'a SerializationContext,
        name: Cow<'static, str>,
        value: &'a dyn XmlValue,
    ) -> WriteSequence<'a> {
        write_items(&self.source, ctx, name, value)
    }
}
