use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use crate::info::{TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// XmlValue

/// A value whose concrete type is only known at runtime.
///
/// Implemented for every [`Typed`] type. A `Box<dyn XmlValue>` forwards to
/// the boxed value, so its runtime type is the type of the content.
///
/// ```
/// use xs_serial::{XmlValue, info::Typed};
///
/// let boxed: Box<dyn XmlValue> = Box::new(7_u16);
/// assert!(boxed.value_type_info().ty().is::<u16>());
/// assert_eq!(boxed.as_any().downcast_ref::<u16>(), Some(&7));
/// ```
pub trait XmlValue: Any + Send + Sync {
    /// Returns the value as [`Any`], for downcasting to its runtime type.
    fn as_any(&self) -> &dyn Any;

    /// Returns the [`TypeInfo`] of the runtime type.
    fn value_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed + Send + Sync> XmlValue for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn value_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}

impl XmlValue for Box<dyn XmlValue> {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    #[inline]
    fn value_type_info(&self) -> &'static TypeInfo {
        (**self).value_type_info()
    }
}

impl TypePath for dyn XmlValue {
    fn type_path() -> &'static str {
        "dyn xs_serial::XmlValue"
    }

    fn type_name() -> &'static str {
        "dyn XmlValue"
    }

    fn type_ident() -> &'static str {
        "XmlValue"
    }

    fn module_path() -> Option<&'static str> {
        Some("xs_serial")
    }
}

impl TypePath for Box<dyn XmlValue> {
    fn type_path() -> &'static str {
        "alloc::boxed::Box<dyn xs_serial::XmlValue>"
    }

    fn type_name() -> &'static str {
        "Box<dyn XmlValue>"
    }

    fn type_ident() -> &'static str {
        "Box"
    }

    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl fmt::Debug for dyn XmlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn XmlValue<{}>", self.value_type_info().type_path())
    }
}

// -----------------------------------------------------------------------------
// XmlScalar

/// A value written as a single text node.
pub trait XmlScalar: Typed + Send + Sync {
    /// Appends the text form of the value to `out`.
    fn write_text(&self, out: &mut String);
}
