use alloc::boxed::Box;
use alloc::format;
use std::sync::{OnceLock, PoisonError, RwLock};

use xs_utils::TypeIdMap;

use crate::error::SerialError;
use crate::info::{IterableCapability, Type, TypeInfo, TypeKind, implements};
use crate::registry::{builtin, resolve_enumerable};
use crate::serializers::{ObjectSerializer, XmlSerializer};

type SerializerTable = RwLock<TypeIdMap<&'static dyn XmlSerializer>>;

// -----------------------------------------------------------------------------
// SerializerRegistry

/// Maps types to their serializers.
///
/// The table is seeded on first use with every built-in serializer (see
/// [`BuiltinRegistration`](crate::registry::BuiltinRegistration)); this runs
/// exactly once, even when first used from several threads. Other types get
/// a serializer constructed on first resolution, which is then cached.
///
/// Entries are never replaced or removed and live until the process exits.
/// Lookups of cached types only take a shared lock.
///
/// ```
/// use xs_serial::registry::SerializerRegistry;
/// use xs_serial::serializers::Strategy;
/// use xs_serial::info::{Type, Typed};
///
/// let registry = SerializerRegistry::global();
/// let serializer = registry.resolve(<Vec<i32>>::type_info()).unwrap();
/// assert_eq!(serializer.strategy(), Strategy::List { element: Type::of::<i32>() });
/// ```
pub struct SerializerRegistry {
    table: OnceLock<SerializerTable>,
}

impl SerializerRegistry {
    /// Creates a registry, usable in `static` items.
    ///
    /// Most code should use [`SerializerRegistry::global`]. Serializers
    /// constructed by any registry are leaked.
    #[inline]
    pub const fn new() -> Self {
        Self {
            table: OnceLock::new(),
        }
    }

    /// Returns the process-wide registry.
    #[inline]
    pub fn global() -> &'static Self {
        static GLOBAL: SerializerRegistry = SerializerRegistry::new();
        &GLOBAL
    }

    #[inline]
    fn table(&self) -> &SerializerTable {
        self.table.get_or_init(|| RwLock::new(builtin::discover()))
    }

    /// Returns the cached serializer of `ty`, without constructing one.
    pub fn get(&self, ty: Type) -> Option<&'static dyn XmlSerializer> {
        self.table()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ty.id())
            .copied()
    }

    /// Returns `true` if a serializer of `ty` is cached.
    #[inline]
    pub fn contains(&self, ty: Type) -> bool {
        self.get(ty).is_some()
    }

    /// Number of cached serializers, built-ins included.
    pub fn len(&self) -> usize {
        self.table()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns the serializer of the type described by `info`, constructing
    /// and caching it on first request.
    ///
    /// Construction runs outside the lock. When several threads construct a
    /// serializer for the same type at once, the first insertion wins and the
    /// others are dropped; all callers get the winner.
    ///
    /// # Errors
    ///
    /// - [`SerialError::UnsupportedShape`] for iterable types whose shape is
    ///   not an array, a dictionary or a list.
    /// - [`SerialError::Construction`] for types that are neither iterable nor
    ///   objects and have no built-in serializer.
    pub fn resolve(&self, info: &'static TypeInfo) -> Result<&'static dyn XmlSerializer, SerialError> {
        let ty = info.ty();
        if let Some(serializer) = self.get(ty) {
            return Ok(serializer);
        }

        let serializer = construct(info)?;
        log::debug!(
            "constructed {:?} serializer for `{}`",
            serializer.strategy(),
            ty.path()
        );
        Ok(self.insert(ty, serializer))
    }

    /// Registers a serializer for `ty`.
    ///
    /// Returns `false`, dropping `serializer`, if `ty` already has one.
    pub fn register(&self, ty: Type, serializer: Box<dyn XmlSerializer>) -> bool {
        let inserted = self
            .table()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .try_insert(ty.id(), || Box::leak(serializer));
        if !inserted {
            log::debug!("`{}` already has a serializer", ty.path());
        }
        inserted
    }

    fn insert(&self, ty: Type, serializer: Box<dyn XmlSerializer>) -> &'static dyn XmlSerializer {
        *self
            .table()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(ty.id(), || Box::leak(serializer))
    }
}

impl Default for SerializerRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

fn construct(info: &'static TypeInfo) -> Result<Box<dyn XmlSerializer>, SerialError> {
    if implements::<IterableCapability>(info) {
        return resolve_enumerable(info);
    }
    match info.kind() {
        TypeKind::Object => Ok(Box::new(ObjectSerializer::new(info))),
        kind => Err(SerialError::Construction {
            type_path: info.type_path(),
            reason: format!(
                "no built-in serializer for this {kind:?} type, and it is neither an object nor iterable"
            ),
        }),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::SerializerRegistry;
    use crate::derive::XmlObject;
    use crate::error::SerialError;
    use crate::impls::DynList;
    use crate::info::{
        self, Capability, GenericTypeInfoCell, GenericTypePathCell, IterableCapability,
        NonGenericTypeInfoCell, Type, TypeInfo, TypePath, Typed,
    };
    use crate::serializers::{Strategy, XmlSerializer};
    use crate::value::XmlValue;
    use crate::write::WriteSequence;
    use crate::SerializationContext;
    use alloc::borrow::Cow;
    use alloc::boxed::Box;
    use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::marker::PhantomData;
    use std::collections::{HashMap, HashSet};

    fn strategy_of<T: Typed>() -> Strategy {
        SerializerRegistry::global()
            .resolve(T::type_info())
            .unwrap()
            .strategy()
    }

    fn address(serializer: &'static dyn XmlSerializer) -> usize {
        serializer as *const dyn XmlSerializer as *const () as usize
    }

    /// Iterable, generic, but with no element type to work with.
    struct Shapeless<T>(PhantomData<T>);

    impl<T: TypePath> TypePath for Shapeless<T> {
        fn type_path() -> &'static str {
            static CELL: GenericTypePathCell = GenericTypePathCell::new();
            CELL.get_or_insert::<Self>(|| info::concat(&["tests::Shapeless<", T::type_path(), ">"]))
        }
        fn type_name() -> &'static str {
            static CELL: GenericTypePathCell = GenericTypePathCell::new();
            CELL.get_or_insert::<Self>(|| info::concat(&["Shapeless<", T::type_name(), ">"]))
        }
        fn type_ident() -> &'static str {
            "Shapeless"
        }
    }

    impl<T: TypePath> Typed for Shapeless<T> {
        fn type_info() -> &'static TypeInfo {
            static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| {
                TypeInfo::collection::<Self>()
                    .with_generics(&[Type::of::<T>()])
                    .with_capability(Capability::Iterable(IterableCapability::new(None, |_| None)))
            })
        }
    }

    macro_rules! opaque_type {
        ($name:ident) => {
            struct $name;

            impl TypePath for $name {
                fn type_path() -> &'static str {
                    concat!("tests::", stringify!($name))
                }
                fn type_name() -> &'static str {
                    stringify!($name)
                }
                fn type_ident() -> &'static str {
                    stringify!($name)
                }
            }

            impl Typed for $name {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(TypeInfo::opaque::<Self>)
                }
            }
        };
    }

    // Neither scalar, object nor iterable.
    opaque_type!(Blob);
    opaque_type!(Lump);
    opaque_type!(Chunk);

    struct BlobSerializer;

    impl XmlSerializer for BlobSerializer {
        fn strategy(&self) -> Strategy {
            Strategy::Custom("blob")
        }

        fn write<'a>(
            &'a self,
            _ctx: &'a SerializationContext,
            _name: Cow<'static, str>,
            _value: &'a dyn XmlValue,
        ) -> WriteSequence<'a> {
            WriteSequence::empty()
        }
    }

    #[derive(XmlObject)]
    struct Racer {
        lap: u32,
        name: String,
    }

    #[test]
    fn builtins_are_seeded() {
        let registry = SerializerRegistry::global();
        assert!(registry.contains(Type::of::<u32>()));
        assert!(registry.contains(Type::of::<&'static str>()));
        assert_eq!(strategy_of::<String>(), Strategy::Scalar(Type::of::<String>()));
        assert_eq!(strategy_of::<bool>(), Strategy::Scalar(Type::of::<bool>()));
    }

    #[test]
    fn seeded_enumerable_never_takes_the_enumerable_path() {
        // `Vec<u8>` iterates and is generic, but is a built-in.
        assert_eq!(strategy_of::<Vec<u8>>(), Strategy::Custom("hex bytes"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let registry = SerializerRegistry::global();
        let first = registry.resolve(<Vec<i64>>::type_info()).unwrap();
        let second = registry.resolve(<Vec<i64>>::type_info()).unwrap();
        assert_eq!(address(first), address(second));
        assert_eq!(first.strategy(), second.strategy());
    }

    #[test]
    fn arrays_and_untyped_collections_use_the_array_strategy() {
        assert_eq!(
            strategy_of::<[u8; 3]>(),
            Strategy::Array { element: Type::of::<u8>() }
        );
        assert_eq!(
            strategy_of::<Box<[u16]>>(),
            Strategy::Array { element: Type::of::<u16>() }
        );
        assert_eq!(
            strategy_of::<DynList>(),
            Strategy::Array { element: Type::of::<dyn XmlValue>() }
        );
    }

    #[test]
    fn keyed_pairs_use_the_dictionary_strategy() {
        let expected = Strategy::Dictionary {
            key: Type::of::<String>(),
            value: Type::of::<i32>(),
        };
        assert_eq!(strategy_of::<HashMap<String, i32>>(), expected);
        assert_eq!(strategy_of::<BTreeMap<String, i32>>(), expected);
    }

    #[test]
    fn single_element_collections_use_the_list_strategy() {
        let expected = Strategy::List { element: Type::of::<i32>() };
        assert_eq!(strategy_of::<Vec<i32>>(), expected);
        assert_eq!(strategy_of::<VecDeque<i32>>(), expected);
        assert_eq!(strategy_of::<HashSet<i32>>(), expected);
        assert_eq!(strategy_of::<BTreeSet<i32>>(), expected);
    }

    #[test]
    fn objects_use_the_object_strategy() {
        assert_eq!(strategy_of::<Racer>(), Strategy::Object(Type::of::<Racer>()));
    }

    #[test]
    fn unrecognized_shapes_fail() {
        let registry = SerializerRegistry::global();
        let error = registry.resolve(<Shapeless<u8>>::type_info()).err().unwrap();
        assert!(matches!(
            error,
            SerialError::UnsupportedShape { type_path: "tests::Shapeless<u8>" }
        ));
        assert!(!registry.contains(Type::of::<Shapeless<u8>>()));

        let error = registry.resolve(Lump::type_info()).err().unwrap();
        assert!(matches!(error, SerialError::Construction { type_path: "tests::Lump", .. }));
        assert!(error.is_resolution());
    }

    #[test]
    fn registered_serializers_are_kept() {
        static REGISTRY: SerializerRegistry = SerializerRegistry::new();

        assert!(REGISTRY.register(Type::of::<Chunk>(), Box::new(BlobSerializer)));
        assert!(!REGISTRY.register(Type::of::<Chunk>(), Box::new(BlobSerializer)));
        assert!(!REGISTRY.register(Type::of::<u8>(), Box::new(BlobSerializer)));

        let chunk = REGISTRY.resolve(Chunk::type_info()).unwrap();
        assert_eq!(chunk.strategy(), Strategy::Custom("blob"));
        assert_eq!(
            REGISTRY.get(Type::of::<u8>()).unwrap().strategy(),
            Strategy::Scalar(Type::of::<u8>())
        );
    }

    #[test]
    fn concurrent_first_resolutions_converge() {
        static REGISTRY: SerializerRegistry = SerializerRegistry::new();

        let addresses: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let racer = REGISTRY.resolve(Racer::type_info()).unwrap();
                        let map = REGISTRY
                            .resolve(<BTreeMap<u8, Racer>>::type_info())
                            .unwrap();
                        let cached = REGISTRY.get(Type::of::<BTreeMap<u8, Racer>>()).unwrap();
                        assert_eq!(address(map), address(cached));
                        address(racer)
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
        let cached = REGISTRY.get(Type::of::<Racer>()).unwrap();
        assert_eq!(address(cached), addresses[0]);
    }

    #[cfg(feature = "auto_register")]
    mod auto_register {
        use super::{Blob, BlobSerializer, SerializerRegistry};
        use alloc::boxed::Box;
        use crate::info::{Type, Typed};
        use crate::registry::BuiltinRegistration;
        use crate::serializers::Strategy;

        inventory::submit! {
            BuiltinRegistration::new(Type::of::<bool>(), || Box::new(BlobSerializer))
        }

        crate::register_serializer!(Blob => || Box::new(BlobSerializer));

        #[test]
        fn collected_registrations_are_discovered() {
            static REGISTRY: SerializerRegistry = SerializerRegistry::new();

            let blob = REGISTRY.resolve(Blob::type_info()).unwrap();
            assert_eq!(blob.strategy(), Strategy::Custom("blob"));

            // The static list wins over a later duplicate.
            let flag = REGISTRY.resolve(bool::type_info()).unwrap();
            assert_eq!(flag.strategy(), Strategy::Scalar(Type::of::<bool>()));
        }
    }
}
