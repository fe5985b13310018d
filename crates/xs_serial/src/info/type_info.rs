use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{Capability, Type, TypePath, UpcastFn};
use crate::members::MemberDescriptor;

// -----------------------------------------------------------------------------
// TypeKind

/// The coarse shape of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Written as a single text node.
    Scalar,
    /// A record with fields and properties.
    Object,
    /// A fixed or boxed sequence whose element type is known from the type
    /// itself rather than from a generic argument.
    Array { element: Type },
    /// A collection described only by its capabilities.
    Collection,
    /// Nothing is known about the structure.
    Opaque,
}

// -----------------------------------------------------------------------------
// BaseInfo

/// The base of a type: the type it extends and how to reach it.
///
/// Members and capabilities of the base are visible on the derived type.
#[derive(Clone, Copy)]
pub struct BaseInfo {
    info: fn() -> &'static TypeInfo,
    upcast: UpcastFn,
}

impl BaseInfo {
    /// Creates a base description.
    #[inline]
    pub const fn new(info: fn() -> &'static TypeInfo, upcast: UpcastFn) -> Self {
        Self { info, upcast }
    }

    /// The [`TypeInfo`] of the base type.
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        (self.info)()
    }

    /// The function that converts a derived value into its base.
    #[inline]
    pub const fn upcast(&self) -> UpcastFn {
        self.upcast
    }
}

impl fmt::Debug for BaseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BaseInfo").field(&self.info().ty()).finish()
    }
}

// -----------------------------------------------------------------------------
// ObjectInfo

/// Member factories of an object type.
///
/// The factories are only called by the
/// [`MetadataCache`](crate::members::MetadataCache), once per type.
#[derive(Clone, Copy)]
pub struct ObjectInfo {
    fields: fn() -> Vec<MemberDescriptor>,
    properties: fn() -> Vec<MemberDescriptor>,
}

impl ObjectInfo {
    /// Creates an object description from its member factories.
    #[inline]
    pub const fn new(
        fields: fn() -> Vec<MemberDescriptor>,
        properties: fn() -> Vec<MemberDescriptor>,
    ) -> Self {
        Self { fields, properties }
    }

    /// Builds the declared field descriptors, base members excluded.
    #[inline]
    pub fn declared_fields(&self) -> Vec<MemberDescriptor> {
        (self.fields)()
    }

    /// Builds the declared property descriptors, base members excluded.
    #[inline]
    pub fn declared_properties(&self) -> Vec<MemberDescriptor> {
        (self.properties)()
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Process-wide metadata of one type.
///
/// Created once per type through [`Typed::type_info`](crate::info::Typed)
/// with the builder methods below, then never modified.
///
/// ```
/// use xs_serial::info::{Type, TypeInfo, TypeKind, Typed};
///
/// let info = <Vec<u32> as Typed>::type_info();
/// assert_eq!(info.kind(), TypeKind::Collection);
/// assert_eq!(info.generics(), &[Type::of::<u32>()]);
/// assert!(info.ty().is::<Vec<u32>>());
/// ```
pub struct TypeInfo {
    ty: Type,
    kind: TypeKind,
    generics: Box<[Type]>,
    capabilities: Vec<Capability>,
    base: Option<BaseInfo>,
    element_name: Option<&'static str>,
    namespace: Option<&'static str>,
    object: Option<ObjectInfo>,
}

impl TypeInfo {
    #[inline]
    fn with_kind<T: TypePath + ?Sized>(kind: TypeKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            generics: Box::new([]),
            capabilities: Vec::new(),
            base: None,
            element_name: None,
            namespace: None,
            object: None,
        }
    }

    /// Creates the info of a scalar type.
    #[inline]
    pub fn scalar<T: TypePath + ?Sized>() -> Self {
        Self::with_kind::<T>(TypeKind::Scalar)
    }

    /// Creates the info of an object type.
    #[inline]
    pub fn object<T: TypePath + ?Sized>(object: ObjectInfo) -> Self {
        let mut info = Self::with_kind::<T>(TypeKind::Object);
        info.object = Some(object);
        info
    }

    /// Creates the info of an array type with the given element type.
    #[inline]
    pub fn array<T: TypePath + ?Sized>(element: Type) -> Self {
        Self::with_kind::<T>(TypeKind::Array { element })
    }

    /// Creates the info of a collection type. Add its capabilities with
    /// [`with_capability`](Self::with_capability).
    #[inline]
    pub fn collection<T: TypePath + ?Sized>() -> Self {
        Self::with_kind::<T>(TypeKind::Collection)
    }

    /// Creates the info of a type without known structure.
    #[inline]
    pub fn opaque<T: TypePath + ?Sized>() -> Self {
        Self::with_kind::<T>(TypeKind::Opaque)
    }

    /// Sets the declared generic arguments.
    #[inline]
    pub fn with_generics(mut self, generics: &[Type]) -> Self {
        self.generics = generics.into();
        self
    }

    /// Adds a capability.
    #[inline]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Sets the base type.
    #[inline]
    pub fn with_base(mut self, base: BaseInfo) -> Self {
        self.base = Some(base);
        self
    }

    /// Overrides the element name used when a value of this type is written
    /// without an explicit name.
    #[inline]
    pub fn with_element_name(mut self, name: &'static str) -> Self {
        self.element_name = Some(name);
        self
    }

    /// Sets the XML namespace of the element written for this type.
    #[inline]
    pub fn with_namespace(mut self, namespace: &'static str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// The type key.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Shortcut for `self.ty().path()`.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// The coarse shape.
    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// The declared generic arguments, empty for non-generic types.
    #[inline]
    pub fn generics(&self) -> &[Type] {
        &self.generics
    }

    /// Capabilities declared by this type itself, base excluded.
    ///
    /// Use [`probe`](crate::info::probe) to include the base chain.
    #[inline]
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// The base type, if any.
    #[inline]
    pub const fn base(&self) -> Option<&BaseInfo> {
        self.base.as_ref()
    }

    /// The element name override, if any.
    #[inline]
    pub const fn element_name(&self) -> Option<&'static str> {
        self.element_name
    }

    /// The XML namespace, if any.
    #[inline]
    pub const fn namespace(&self) -> Option<&'static str> {
        self.namespace
    }

    /// Member factories for object types.
    #[inline]
    pub const fn object_info(&self) -> Option<&ObjectInfo> {
        self.object.as_ref()
    }

    /// Returns `true` for [`TypeKind::Scalar`].
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(self.kind, TypeKind::Scalar)
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("ty", &self.ty)
            .field("kind", &self.kind)
            .field("generics", &self.generics)
            .field("capabilities", &self.capabilities)
            .field("base", &self.base)
            .field("element_name", &self.element_name)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
