use alloc::string::String;
use core::fmt::Write;

use crate::XmlScalar;
use crate::info::{NonGenericTypeInfoCell, TypeInfo, TypePath, Typed};

macro_rules! impl_scalar_meta {
    ($ty:ty, $path:expr, $name:expr, $ident:expr, $module:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $ident
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $module
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(TypeInfo::scalar::<Self>)
            }
        }
    };
}

macro_rules! impl_display_scalar {
    ($($ty:ident)*) => {$(
        impl_scalar_meta!($ty, stringify!($ty), stringify!($ty), stringify!($ty), None);

        impl XmlScalar for $ty {
            #[inline]
            fn write_text(&self, out: &mut String) {
                // Writing into a `String` cannot fail.
                let _ = write!(out, "{self}");
            }
        }
    )*};
}

macro_rules! impl_float_scalar {
    ($($ty:ident)*) => {$(
        impl_scalar_meta!($ty, stringify!($ty), stringify!($ty), stringify!($ty), None);

        impl XmlScalar for $ty {
            fn write_text(&self, out: &mut String) {
                if self.is_nan() {
                    out.push_str("NaN");
                } else if self.is_infinite() {
                    out.push_str(if self.is_sign_negative() { "-INF" } else { "INF" });
                } else {
                    let _ = write!(out, "{self}");
                }
            }
        }
    )*};
}

impl_display_scalar!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);
impl_float_scalar!(f32 f64);

impl_scalar_meta!(bool, "bool", "bool", "bool", None);

impl XmlScalar for bool {
    #[inline]
    fn write_text(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

impl_scalar_meta!(char, "char", "char", "char", None);

impl XmlScalar for char {
    #[inline]
    fn write_text(&self, out: &mut String) {
        out.push(*self);
    }
}

impl_scalar_meta!(
    String,
    "alloc::string::String",
    "String",
    "String",
    Some("alloc::string")
);

impl XmlScalar for String {
    #[inline]
    fn write_text(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl_scalar_meta!(&'static str, "&str", "&str", "str", None);

impl XmlScalar for &'static str {
    #[inline]
    fn write_text(&self, out: &mut String) {
        out.push_str(self);
    }
}
