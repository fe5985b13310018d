use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::context::SerializationContext;
use crate::error::SerialError;
use crate::info::Type;
use crate::serializers::scalar::text_element;
use crate::serializers::{Strategy, XmlSerializer, mismatch};
use crate::value::XmlValue;
use crate::write::WriteSequence;

/// Writes a `Vec<u8>` as lowercase hex text instead of one element per byte.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesSerializer;

impl BytesSerializer {
    fn hex_of(value: &dyn XmlValue) -> Result<String, SerialError> {
        let bytes = value
            .as_any()
            .downcast_ref::<Vec<u8>>()
            .ok_or_else(|| mismatch(Type::of::<Vec<u8>>(), value))?;
        let mut text = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            // Writing into a `String` cannot fail.
            let _ = write!(text, "{byte:02x}");
        }
        Ok(text)
    }
}

impl XmlSerializer for BytesSerializer {
    fn strategy(&self) -> Strategy {
        Strategy::Custom("hex bytes")
    }

    fn write<'a>(
        &'a self,
        _ctx: &'a SerializationContext,
        name: Cow<'static, str>,
        value: &'a dyn XmlValue,
    ) -> WriteSequence<'a> {
        match Self::hex_of(value) {
            Ok(text) => WriteSequence::from_actions(text_element(name, text)),
            Err(error) => WriteSequence::failed(error),
        }
    }

    fn scalar_text(&self, value: &dyn XmlValue) -> Option<Result<String, SerialError>> {
        Some(Self::hex_of(value))
    }
}
