use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// TypePath

/// Static access to the names of a type.
///
/// Unlike [`core::any::type_name`], these names are chosen by the implementor
/// and stay stable across compiler versions.
///
/// - [`type_path`]: unique, module qualified, with generics.
/// - [`type_name`]: without module path, with generics, may be duplicated.
/// - [`type_ident`]: without module path and generics.
/// - [`module_path`]: optional module path.
///
/// None of the names start with `::`.
///
/// Usually implemented through [`#[derive(XmlObject)]`](crate::derive::XmlObject).
/// Manual implementations of generic types can memoize their strings with
/// [`GenericTypePathCell`](crate::info::GenericTypePathCell):
///
/// ```
/// use xs_serial::info::{TypePath, GenericTypePathCell, concat};
///
/// struct Pair<T>(T, T);
///
/// impl<T: TypePath> TypePath for Pair<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["demo::Pair<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Pair<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Pair" }
///     fn module_path() -> Option<&'static str> { Some("demo") }
/// }
///
/// assert_eq!(<Pair<u8>>::type_path(), "demo::Pair<u8>");
/// assert_eq!(<Pair<u8>>::type_name(), "Pair<u8>");
/// ```
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
/// [`type_ident`]: TypePath::type_ident
/// [`module_path`]: TypePath::module_path
pub trait TypePath: 'static {
    /// Fully qualified path with generics, e.g. `alloc::vec::Vec<u32>`.
    fn type_path() -> &'static str;

    /// Short name with generics, e.g. `Vec<u32>`.
    fn type_name() -> &'static str;

    /// Short name without generics, e.g. `Vec`.
    fn type_ident() -> &'static str;

    /// Module where the type is defined, `None` for primitives.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// TypePathTable

/// Function pointers to one type's [`TypePath`] implementation.
///
/// Keeps [`Type`] `Copy` and defers building generic names until asked.
#[derive(Clone, Copy)]
pub struct TypePathTable {
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    type_ident: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl TypePathTable {
    /// Creates the table of `T`.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path: T::type_path,
            type_name: T::type_name,
            type_ident: T::type_ident,
            module_path: T::module_path,
        }
    }

    /// See [`TypePath::type_path`].
    #[inline(always)]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    /// See [`TypePath::type_name`].
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    /// See [`TypePath::type_ident`].
    #[inline(always)]
    pub fn ident(&self) -> &'static str {
        (self.type_ident)()
    }

    /// See [`TypePath::module_path`].
    #[inline(always)]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }
}

impl fmt::Debug for TypePathTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePathTable")
            .field("type_path", &self.path())
            .field("type_name", &self.name())
            .field("type_ident", &self.ident())
            .field("module_path", &self.module_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Type

/// The key identifying a runtime type in every cache of this crate.
///
/// A [`TypeId`] plus the [`TypePathTable`] used for names and diagnostics.
/// Equality and hashing only look at the [`TypeId`].
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use xs_serial::info::Type;
///
/// let ty = Type::of::<Vec<u32>>();
/// assert!(ty.is::<Vec<u32>>());
/// assert_eq!(ty.id(), TypeId::of::<Vec<u32>>());
/// assert_eq!(ty.path(), "alloc::vec::Vec<u32>");
/// assert_eq!(ty.ident(), "Vec");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    table: TypePathTable,
    id: TypeId,
}

impl Type {
    /// Creates the key of `T`.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            table: TypePathTable::of::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns `true` if this is the key of `T`.
    #[inline(always)]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        TypeId::of::<T>() == self.id
    }

    /// Returns the [`TypePathTable`].
    #[inline(always)]
    pub const fn path_table(&self) -> TypePathTable {
        self.table
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        self.table.path()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.table.name()
    }

    /// See [`TypePath::type_ident`].
    #[inline]
    pub fn ident(&self) -> &'static str {
        self.table.ident()
    }

    /// See [`TypePath::module_path`].
    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.table.module_path()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Only prints the type path.
impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
