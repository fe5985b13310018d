use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::XmlValue;
use crate::error::SerialError;
use crate::info::{Type, TypePath, UpcastFn};

// -----------------------------------------------------------------------------
// MemberValue

/// The value of a member read off an instance.
///
/// Fields are borrowed from the instance, computed properties are owned.
pub enum MemberValue<'a> {
    Borrowed(&'a dyn XmlValue),
    Owned(Box<dyn XmlValue>),
}

impl MemberValue<'_> {
    /// Returns the value as a trait object.
    #[inline]
    pub fn as_value(&self) -> &dyn XmlValue {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }

    /// Returns `true` for computed values.
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

impl fmt::Debug for MemberValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed(value) => f.debug_tuple("Borrowed").field(value).finish(),
            Self::Owned(value) => f.debug_tuple("Owned").field(&&**value).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberRef / OwnedMember

/// A field type that can be read as a member.
///
/// `Option<T>` members are absent when `None`.
pub trait MemberRef {
    /// The declared type, the inner type for `Option<T>`.
    fn declared_type() -> Type;

    /// Borrows the member value, `None` when absent.
    fn member_ref(&self) -> Option<MemberValue<'_>>;
}

impl<T: XmlValue + TypePath> MemberRef for T {
    #[inline]
    fn declared_type() -> Type {
        Type::of::<T>()
    }

    #[inline]
    fn member_ref(&self) -> Option<MemberValue<'_>> {
        Some(MemberValue::Borrowed(self))
    }
}

impl<T: XmlValue + TypePath> MemberRef for Option<T> {
    #[inline]
    fn declared_type() -> Type {
        Type::of::<T>()
    }

    #[inline]
    fn member_ref(&self) -> Option<MemberValue<'_>> {
        self.as_ref().map(|value| MemberValue::Borrowed(value as &dyn XmlValue))
    }
}

/// A property return type that can be turned into a member value.
pub trait OwnedMember {
    /// The declared type, the inner type for `Option<T>`.
    fn declared_type() -> Type;

    /// Boxes the value, `None` when absent.
    fn into_member(self) -> Option<MemberValue<'static>>;
}

impl<T: XmlValue + TypePath> OwnedMember for T {
    #[inline]
    fn declared_type() -> Type {
        Type::of::<T>()
    }

    #[inline]
    fn into_member(self) -> Option<MemberValue<'static>> {
        Some(MemberValue::Owned(Box::new(self)))
    }
}

impl<T: XmlValue + TypePath> OwnedMember for Option<T> {
    #[inline]
    fn declared_type() -> Type {
        Type::of::<T>()
    }

    #[inline]
    fn into_member(self) -> Option<MemberValue<'static>> {
        self.map(|value| MemberValue::Owned(Box::new(value) as Box<dyn XmlValue>))
    }
}

/// Returns the declared type of a property from its getter.
///
/// Lets generated code name the return type without spelling it out.
#[inline]
pub fn property_type<S, R: OwnedMember>(_getter: fn(&S) -> R) -> Type {
    R::declared_type()
}

// -----------------------------------------------------------------------------
// MemberForm

/// How a member is written inside its owner's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberForm {
    /// A nested element.
    Element,
    /// An attribute of the owner's element, scalars only.
    Attribute,
    /// The text content of the owner's element, scalars only.
    Text,
}

// -----------------------------------------------------------------------------
// MemberDescriptor

/// Reads one member off a value of its owner type.
///
/// The value is the owner itself, `None` means absent.
pub type MemberGetter = fn(&dyn Any) -> Option<MemberValue<'_>>;

/// A field or property of an object type: name, declared type and accessor.
///
/// Descriptors are immutable once built. Members inherited from a base carry
/// the upcasts leading from the derived type to the base that declares them.
#[derive(Clone)]
pub struct MemberDescriptor {
    name: &'static str,
    owner: Type,
    declared: Type,
    getter: MemberGetter,
    form: MemberForm,
    namespace: Option<&'static str>,
    reach: Box<[UpcastFn]>,
}

impl MemberDescriptor {
    /// Creates a descriptor of a member declared on `owner`.
    #[inline]
    pub fn new(name: &'static str, owner: Type, declared: Type, getter: MemberGetter) -> Self {
        Self {
            name,
            owner,
            declared,
            getter,
            form: MemberForm::Element,
            namespace: None,
            reach: Box::new([]),
        }
    }

    /// Sets how the member is written.
    #[inline]
    pub fn with_form(mut self, form: MemberForm) -> Self {
        self.form = form;
        self
    }

    /// Sets the namespace of an attribute member.
    #[inline]
    pub fn with_namespace(mut self, namespace: &'static str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Re-roots an inherited descriptor: `upcast` leads from the derived type
    /// to the type this descriptor is currently reachable from.
    pub(crate) fn inherited_through(mut self, upcast: UpcastFn) -> Self {
        let mut reach = Vec::with_capacity(self.reach.len() + 1);
        reach.push(upcast);
        reach.extend_from_slice(&self.reach);
        self.reach = reach.into_boxed_slice();
        self
    }

    /// The member name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The type declaring the member.
    #[inline]
    pub const fn owner(&self) -> Type {
        self.owner
    }

    /// The declared member type.
    #[inline]
    pub const fn declared(&self) -> Type {
        self.declared
    }

    /// How the member is written.
    #[inline]
    pub const fn form(&self) -> MemberForm {
        self.form
    }

    /// The attribute namespace, if any.
    #[inline]
    pub const fn namespace(&self) -> Option<&'static str> {
        self.namespace
    }

    /// Returns `true` if the member comes from a base type.
    #[inline]
    pub fn is_inherited(&self) -> bool {
        !self.reach.is_empty()
    }

    /// Reads the member off `value`, a value of the type the descriptor was
    /// obtained for.
    ///
    /// Returns `Ok(None)` for absent members.
    pub fn read<'a>(&self, value: &'a dyn Any) -> Result<Option<MemberValue<'a>>, SerialError> {
        let owner = self
            .reach
            .iter()
            .try_fold(value, |current, upcast| upcast(current))
            .filter(|owner| (**owner).type_id() == self.owner.id())
            .ok_or(SerialError::ValueMismatch {
                expected: self.owner.path(),
                found: "<unrelated value>",
            })?;
        Ok((self.getter)(owner))
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("declared", &self.declared)
            .field("form", &self.form)
            .field("namespace", &self.namespace)
            .field("inherited", &self.is_inherited())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use super::{MemberRef, MemberValue, OwnedMember};
    use crate::info::Type;

    #[test]
    fn member_values_debug_their_type() {
        let number = 3_u32;
        let borrowed = number.member_ref().unwrap();
        assert_eq!(format!("{borrowed:?}"), "Borrowed(dyn XmlValue<u32>)");

        let owned = String::from("x").into_member().unwrap();
        assert!(owned.is_owned());
        assert_eq!(
            format!("{owned:?}"),
            "Owned(dyn XmlValue<alloc::string::String>)"
        );
    }

    #[test]
    fn optional_members() {
        let absent: Option<u8> = None;
        assert!(absent.member_ref().is_none());
        assert_eq!(<Option<u8> as MemberRef>::declared_type(), Type::of::<u8>());
        assert!(matches!(
            Some(1_u8).member_ref(),
            Some(MemberValue::Borrowed(_))
        ));
    }
}
