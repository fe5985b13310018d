use alloc::boxed::Box;

use crate::info::Type;
use crate::serializers::{ScalarSerializer, XmlSerializer};
use crate::value::XmlScalar;

/// A built-in serializer and the type it is responsible for.
///
/// Built from constant expressions only, so it can live in a static list
/// or be submitted with [`register_scalar!`](crate::register_scalar) and
/// [`register_serializer!`](crate::register_serializer).
pub struct BuiltinRegistration {
    ty: Type,
    construct: fn() -> Box<dyn XmlSerializer>,
}

impl BuiltinRegistration {
    /// Registers the serializer built by `construct` for `ty`.
    #[inline]
    pub const fn new(ty: Type, construct: fn() -> Box<dyn XmlSerializer>) -> Self {
        Self { ty, construct }
    }

    /// Registers a [`ScalarSerializer`] for `T`.
    #[inline]
    pub const fn scalar<T: XmlScalar>() -> Self {
        Self::new(Type::of::<T>(), construct_scalar::<T>)
    }

    /// The type served.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Builds the serializer.
    #[inline]
    pub fn construct(&self) -> Box<dyn XmlSerializer> {
        (self.construct)()
    }
}

fn construct_scalar<T: XmlScalar>() -> Box<dyn XmlSerializer> {
    Box::new(ScalarSerializer::<T>::new())
}

#[cfg(feature = "auto_register")]
inventory::collect!(BuiltinRegistration);

/// Registers a [`ScalarSerializer`](crate::serializers::ScalarSerializer)
/// for a type implementing [`XmlScalar`](crate::XmlScalar).
///
/// The registration is picked up the first time the
/// [`SerializerRegistry`](crate::registry::SerializerRegistry) is used.
///
/// ```
/// use xs_serial::{XmlScalar, register_scalar};
/// use xs_serial::info::{NonGenericTypeInfoCell, TypeInfo, TypePath, Typed};
///
/// struct Celsius(f32);
///
/// impl TypePath for Celsius {
///     fn type_path() -> &'static str { "demo::Celsius" }
///     fn type_name() -> &'static str { "Celsius" }
///     fn type_ident() -> &'static str { "Celsius" }
/// }
///
/// impl Typed for Celsius {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(TypeInfo::scalar::<Self>)
///     }
/// }
///
/// impl XmlScalar for Celsius {
///     fn write_text(&self, out: &mut String) {
///         self.0.write_text(out);
///     }
/// }
///
/// register_scalar!(Celsius);
///
/// let xml = xs_serial::write::to_xml_string(&Celsius(21.5)).unwrap();
/// assert!(xml.ends_with("<Celsius>21.5</Celsius>"));
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_scalar {
    ($ty:ty) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::BuiltinRegistration::scalar::<$ty>()
        }
    };
}

/// Registers a hand-written serializer for a type.
///
/// `$construct` must coerce to `fn() -> Box<dyn XmlSerializer>`.
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_serializer {
    ($ty:ty => $construct:expr) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::BuiltinRegistration::new(
                $crate::info::Type::of::<$ty>(),
                $construct,
            )
        }
    };
}
