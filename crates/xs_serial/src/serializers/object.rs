use alloc::borrow::Cow;
use core::iter;

use crate::context::SerializationContext;
use crate::error::SerialError;
use crate::info::TypeInfo;
use crate::members::{MemberDescriptor, MemberForm, MemberValue, MetadataCache};
use crate::serializers::{Strategy, XmlSerializer, mismatch};
use crate::value::XmlValue;
use crate::write::{WriteAction, WriteSequence};

/// Writes an object from its cached member descriptors.
///
/// Layout: the start element (qualified by the type's namespace), attribute
/// members, element and text members, then the end element. Fields come
/// before properties, base members before the type's own members. Absent
/// members write nothing.
pub struct ObjectSerializer {
    info: &'static TypeInfo,
    fields: &'static [MemberDescriptor],
    properties: &'static [MemberDescriptor],
}

impl ObjectSerializer {
    /// Creates the serializer of `info`, filling the member caches if needed.
    pub fn new(info: &'static TypeInfo) -> Self {
        let cache = MetadataCache::global();
        Self {
            info,
            fields: cache.fields_of(info),
            properties: cache.properties_of(info),
        }
    }

    fn members(&self) -> impl Iterator<Item = &'static MemberDescriptor> + Clone + use<> {
        let fields: &'static [MemberDescriptor] = self.fields;
        let properties: &'static [MemberDescriptor] = self.properties;
        fields.iter().chain(properties)
    }
}

impl XmlSerializer for ObjectSerializer {
    fn strategy(&self) -> Strategy {
        Strategy::Object(self.info.ty())
    }

    fn write<'a>(
        &'a self,
        ctx: &'a SerializationContext,
        name: Cow<'static, str>,
        value: &'a dyn XmlValue,
    ) -> WriteSequence<'a> {
        if value.as_any().type_id() != self.info.ty().id() {
            return WriteSequence::failed(mismatch(self.info.ty(), value));
        }

        let start = WriteAction::StartElement(ctx.qualify(name, self.info.namespace()));

        let attributes = self
            .members()
            .filter(|member| member.form() == MemberForm::Attribute)
            .filter_map(move |member| attribute_action(ctx, member, value).transpose());

        let body = self
            .members()
            .filter(|member| member.form() != MemberForm::Attribute)
            .flat_map(move |member| member_actions(ctx, member, value));

        WriteSequence::new(
            iter::once(Ok(start))
                .chain(attributes)
                .chain(body)
                .chain(iter::once(Ok(WriteAction::EndElement))),
        )
    }
}

fn attribute_action(
    ctx: &SerializationContext,
    member: &'static MemberDescriptor,
    owner: &dyn XmlValue,
) -> Result<Option<WriteAction>, SerialError> {
    let Some(value) = member.read(owner.as_any())? else {
        return Ok(None);
    };
    let text = ctx.scalar_text(member.name(), value.as_value())?;
    Ok(Some(WriteAction::Attribute {
        name: ctx.qualify(Cow::Borrowed(member.name()), member.namespace()),
        value: text,
    }))
}

fn member_actions<'a>(
    ctx: &'a SerializationContext,
    member: &'static MemberDescriptor,
    owner: &'a dyn XmlValue,
) -> WriteSequence<'a> {
    let value = match member.read(owner.as_any()) {
        Ok(Some(value)) => value,
        Ok(None) => return WriteSequence::empty(),
        Err(error) => return WriteSequence::failed(error),
    };

    if member.form() == MemberForm::Text {
        return match ctx.scalar_text(member.name(), value.as_value()) {
            Ok(text) if text.is_empty() => WriteSequence::empty(),
            Ok(text) => WriteSequence::from_actions(alloc::vec![WriteAction::Text(text)]),
            Err(error) => WriteSequence::failed(error),
        };
    }

    let name = Cow::Borrowed(member.name());
    match value {
        MemberValue::Borrowed(value) => ctx
            .serialize_named(name, value.value_type_info(), value)
            .into(),
        // A computed value lives only here, so its subtree is produced now.
        MemberValue::Owned(value) => ctx
            .serialize_named(name, value.value_type_info(), &*value)
            .and_then(WriteSequence::collect_actions)
            .map_or_else(WriteSequence::failed, WriteSequence::from_actions),
    }
}
