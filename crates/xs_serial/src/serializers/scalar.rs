use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::context::SerializationContext;
use crate::error::SerialError;
use crate::info::Type;
use crate::serializers::{Strategy, XmlSerializer, mismatch};
use crate::value::{XmlScalar, XmlValue};
use crate::write::{QualifiedName, WriteAction, WriteSequence};

/// Writes a scalar as `<name>text</name>`.
pub struct ScalarSerializer<T: XmlScalar>(PhantomData<fn() -> T>);

impl<T: XmlScalar> ScalarSerializer<T> {
    /// Creates the serializer.
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    fn text_of(value: &dyn XmlValue) -> Result<String, SerialError> {
        let scalar = value
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch(Type::of::<T>(), value))?;
        let mut text = String::new();
        scalar.write_text(&mut text);
        Ok(text)
    }
}

impl<T: XmlScalar> Default for ScalarSerializer<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: XmlScalar> XmlSerializer for ScalarSerializer<T> {
    fn strategy(&self) -> Strategy {
        Strategy::Scalar(Type::of::<T>())
    }

    fn write<'a>(
        &'a self,
        _ctx: &'a SerializationContext,
        name: Cow<'static, str>,
        value: &'a dyn XmlValue,
    ) -> WriteSequence<'a> {
        match Self::text_of(value) {
            Ok(text) => WriteSequence::from_actions(text_element(name, text)),
            Err(error) => WriteSequence::failed(error),
        }
    }

    fn scalar_text(&self, value: &dyn XmlValue) -> Option<Result<String, SerialError>> {
        Some(Self::text_of(value))
    }
}

/// `<name>text</name>`, or `<name/>` for empty text.
pub(crate) fn text_element(name: Cow<'static, str>, text: String) -> Vec<WriteAction> {
    let mut actions = Vec::with_capacity(3);
    actions.push(WriteAction::StartElement(QualifiedName::new(name)));
    if !text.is_empty() {
        actions.push(WriteAction::Text(text));
    }
    actions.push(WriteAction::EndElement);
    actions
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ScalarSerializer;
    use crate::SerializationContext;
    use crate::error::SerialError;
    use crate::serializers::{Strategy, XmlSerializer};
    use crate::info::Type;
    use crate::write::{QualifiedName, WriteAction};
    use alloc::string::String;

    #[test]
    fn writes_one_text_element() {
        let ctx = SerializationContext::new();
        let serializer = ScalarSerializer::<f64>::new();
        let actions = serializer
            .write(&ctx, "ratio".into(), &0.5_f64)
            .collect_actions()
            .unwrap();

        assert_eq!(
            actions,
            [
                WriteAction::StartElement(QualifiedName::new("ratio")),
                WriteAction::Text("0.5".into()),
                WriteAction::EndElement,
            ]
        );
        assert_eq!(serializer.strategy(), Strategy::Scalar(Type::of::<f64>()));
    }

    #[test]
    fn empty_text_writes_no_text_node() {
        let ctx = SerializationContext::new();
        let actions = ScalarSerializer::<String>::new()
            .write(&ctx, "note".into(), &String::new())
            .collect_actions()
            .unwrap();
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn wrong_value_type_is_reported() {
        let ctx = SerializationContext::new();
        let result = ScalarSerializer::<u8>::new()
            .write(&ctx, "n".into(), &1_u16)
            .collect_actions();
        assert!(matches!(
            result,
            Err(SerialError::ValueMismatch { expected: "u8", found: "u16" })
        ));
    }
}
