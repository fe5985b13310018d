use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use xs_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;

    pub trait StaticProperty: Send + Sync + 'static {}

    impl StaticProperty for String {}
    impl StaticProperty for TypeInfo {}
}

use sealed::StaticProperty;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// Static storage of the metadata of one non-generic type.
///
/// A thin wrapper over [`OnceLock`]. There is no path variant because a
/// non-generic type path is a string literal.
pub struct NonGenericTypeCell<T: StaticProperty>(OnceLock<T>);

/// Static storage of the [`TypeInfo`] of a non-generic type.
///
/// ```
/// use xs_serial::info::{NonGenericTypeInfoCell, TypeInfo, TypePath, Typed};
///
/// struct Celsius;
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
///         CELL.get_or_init(TypeInfo::opaque::<Self>)
///     }
/// }
///
/// assert!(core::ptr::eq(Celsius::type_info(), Celsius::type_info()));
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: StaticProperty> NonGenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, initializing it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

impl<T: StaticProperty> Default for NonGenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Static storage of the metadata of a generic type.
///
/// The `static CELL` inside a generic function is shared by every
/// instantiation, so values are stored per [`TypeId`] and leaked.
pub struct GenericTypeCell<T: StaticProperty>(RwLock<TypeIdMap<&'static T>>);

/// Static storage of the [`TypeInfo`] of a generic type.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Static storage of a type path string of a generic type.
///
/// See [`TypePath`](crate::info::TypePath) for an example.
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: StaticProperty> GenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, inserting the result of `f` first
    /// if there is none.
    ///
    /// `f` runs outside the lock, so it may recurse into other cells.
    /// When two threads race, the first insertion wins.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &'static T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &'static T {
        match self.get_by_type_id(type_id) {
            Some(value) => value,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &'static T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(type_id, || Box::leak(Box::new(value)))
    }
}

impl<T: StaticProperty> Default for GenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// concat

/// Joins string slices into one [`String`] with a single allocation.
///
/// ```
/// assert_eq!(xs_serial::info::concat(&["Vec", "<", "u8", ">"]), "Vec<u8>");
/// ```
pub fn concat(parts: &[&str]) -> String {
    let len = parts.iter().map(|part| part.len()).sum();
    let mut out = String::with_capacity(len);
    for part in parts {
        out.push_str(part);
    }
    out
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{GenericTypePathCell, concat};
    use alloc::string::ToString;

    #[test]
    fn generic_cell_separates_instantiations() {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();

        let a = CELL.get_or_insert::<u8>(|| "u8".to_string());
        let b = CELL.get_or_insert::<u16>(|| "u16".to_string());
        let c = CELL.get_or_insert::<u8>(|| unreachable!());

        assert_eq!(a, "u8");
        assert_eq!(b, "u16");
        assert!(core::ptr::eq(a, c));
    }

    #[test]
    fn concat_joins_in_order() {
        assert_eq!(concat(&[]), "");
        assert_eq!(concat(&["a", "::", "B"]), "a::B");
    }
}
