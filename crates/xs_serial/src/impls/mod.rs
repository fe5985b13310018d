//! Metadata of standard types.
//!
//! ## Implemented Menu
//!
//! - scalars:
//!     - `bool`, `char`
//!     - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `String`, `&'static str`
//! - arrays (no generic arguments, element known from the type):
//!     - `[T; N]`, `Box<[T]>`
//! - collections:
//!     - `Vec<T>`, `VecDeque<T>` (list)
//!     - `HashSet<T>`, `BTreeSet<T>` (iterable)
//!     - `HashMap<K, V>`, `BTreeMap<K, V>` (keyed pairs)
//! - [`DynList`]: a list of values of any type.
//!
//! `Box<dyn XmlValue>` may be used as an element type; each item is then
//! written with the serializer of its runtime type.

// -----------------------------------------------------------------------------
// Modules

mod arrays;
mod collections;
mod dyn_list;
mod scalars;

// -----------------------------------------------------------------------------
// Exports

pub use dyn_list::DynList;

// -----------------------------------------------------------------------------
// Helpers

/// Implements [`TypePath`](crate::info::TypePath) for a generic type from
/// its module and identifier.
///
/// The names are built once per instantiation, e.g.
/// `alloc::vec::Vec<u8>` / `Vec<u8>` / `Vec`.
macro_rules! impl_generic_type_path {
    ($module:literal :: $ident:ident < $($param:ident),+ >) => {
        impl<$($param: $crate::info::TypePath),+> $crate::info::TypePath for $ident<$($param),+> {
            fn type_path() -> &'static str {
                static CELL: $crate::info::GenericTypePathCell =
                    $crate::info::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    $crate::impls::generic_name(
                        concat!($module, "::", stringify!($ident)),
                        &[$(<$param as $crate::info::TypePath>::type_path()),+],
                    )
                })
            }

            fn type_name() -> &'static str {
                static CELL: $crate::info::GenericTypePathCell =
                    $crate::info::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    $crate::impls::generic_name(
                        stringify!($ident),
                        &[$(<$param as $crate::info::TypePath>::type_name()),+],
                    )
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ident)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }
    };
}

pub(crate) use impl_generic_type_path;

/// `base<arg0, arg1, ...>`
pub(crate) fn generic_name(base: &str, args: &[&str]) -> alloc::string::String {
    let mut parts = alloc::vec::Vec::with_capacity(args.len() * 2 + 2);
    parts.push(base);
    parts.push("<");
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            parts.push(", ");
        }
        parts.push(*arg);
    }
    parts.push(">");
    crate::info::concat(&parts)
}

#[cfg(test)]
mod tests {
    use super::generic_name;

    #[test]
    fn generic_name_joins_arguments() {
        assert_eq!(generic_name("Vec", &["u8"]), "Vec<u8>");
        assert_eq!(generic_name("HashMap", &["String", "i32"]), "HashMap<String, i32>");
    }
}
