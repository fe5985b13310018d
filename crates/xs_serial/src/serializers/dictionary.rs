use alloc::borrow::Cow;
use alloc::string::String;
use core::iter;

use crate::context::SerializationContext;
use crate::error::SerialError;
use crate::info::{KeyedPairsCapability, Probed};
use crate::serializers::{Strategy, XmlSerializer};
use crate::value::XmlValue;
use crate::write::{QualifiedName, WriteAction, WriteSequence};

/// Writes key/value collections:
///
/// ```xml
/// <HashMap>
///   <entry><key>a</key><value>1</value></entry>
/// </HashMap>
/// ```
///
/// The entry, key and value names come from the context settings.
pub struct DictionarySerializer {
    pairs: Probed<KeyedPairsCapability>,
}

impl DictionarySerializer {
    /// Creates a dictionary serializer over `pairs`.
    #[inline]
    pub fn new(pairs: Probed<KeyedPairsCapability>) -> Self {
        Self { pairs }
    }
}

impl XmlSerializer for DictionarySerializer {
    fn strategy(&self) -> Strategy {
        let capability = self.pairs.capability();
        Strategy::Dictionary {
            key: capability.key(),
            value: capability.value(),
        }
    }

    fn write<'a>(
        &'a self,
        ctx: &'a SerializationContext,
        name: Cow<'static, str>,
        value: &'a dyn XmlValue,
    ) -> WriteSequence<'a> {
        let pairs = self
            .pairs
            .reach(value.as_any())
            .and_then(|owner| self.pairs.capability().pairs(owner));
        let Some(pairs) = pairs else {
            return WriteSequence::failed(SerialError::ValueMismatch {
                expected: self.pairs.owner().type_path(),
                found: value.value_type_info().type_path(),
            });
        };

        let settings = ctx.settings();
        let entries = pairs.flat_map(move |(key, item)| {
            let entry_name = Cow::Owned(String::from(settings.entry_name.as_str()));
            let key_name = Cow::Owned(String::from(settings.key_name.as_str()));
            let value_name = Cow::Owned(String::from(settings.value_name.as_str()));

            iter::once(Ok(WriteAction::StartElement(QualifiedName::new(entry_name))))
                .chain(WriteSequence::from(ctx.serialize_named(
                    key_name,
                    key.value_type_info(),
                    key,
                )))
                .chain(WriteSequence::from(ctx.serialize_named(
                    value_name,
                    item.value_type_info(),
                    item,
                )))
                .chain(iter::once(Ok(WriteAction::EndElement)))
        });

        WriteSequence::new(
            iter::once(Ok(WriteAction::StartElement(QualifiedName::new(name))))
                .chain(entries)
                .chain(iter::once(Ok(WriteAction::EndElement))),
        )
    }
}
