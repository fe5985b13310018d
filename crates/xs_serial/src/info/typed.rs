use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// Static access to the [`TypeInfo`] of a type.
///
/// Implemented by [`#[derive(XmlObject)]`](crate::derive::XmlObject) and by
/// this crate for the supported std types.
///
/// Manual implementations store the info in a [`NonGenericTypeInfoCell`] or,
/// for generic types, a [`GenericTypeInfoCell`]:
///
/// ```
/// use xs_serial::info::{GenericTypeInfoCell, GenericTypePathCell, TypeInfo, TypePath, Typed, concat};
///
/// struct Wrapper<T>(T);
///
/// impl<T: TypePath> TypePath for Wrapper<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["demo::Wrapper<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Wrapper<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Wrapper" }
/// }
///
/// impl<T: TypePath> Typed for Wrapper<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::opaque::<Self>().with_generics(&[
///             xs_serial::info::Type::of::<T>(),
///         ]))
///     }
/// }
///
/// assert_eq!(<Wrapper<u8>>::type_info().generics().len(), 1);
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::info::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::info::GenericTypeInfoCell
pub trait Typed: TypePath {
    /// Returns the process-wide metadata of this type.
    fn type_info() -> &'static TypeInfo;
}
