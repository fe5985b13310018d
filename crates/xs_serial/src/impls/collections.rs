use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::any::Any;
use core::hash::Hash;
use std::collections::{HashMap, HashSet};

use crate::XmlValue;
use crate::info::{
    Capability, Elements, GenericTypeInfoCell, IterableCapability, KeyedPairsCapability,
    ListCapability, Pairs, Type, TypeInfo, TypePath, Typed,
};

// -----------------------------------------------------------------------------
// Type paths

crate::impls::impl_generic_type_path!("alloc::vec"::Vec<T>);
crate::impls::impl_generic_type_path!("alloc::collections"::VecDeque<T>);
crate::impls::impl_generic_type_path!("std::collections"::HashSet<T>);
crate::impls::impl_generic_type_path!("alloc::collections"::BTreeSet<T>);
crate::impls::impl_generic_type_path!("std::collections"::HashMap<K, V>);
crate::impls::impl_generic_type_path!("alloc::collections"::BTreeMap<K, V>);

// -----------------------------------------------------------------------------
// Traversal

/// Generates an [`ElementsFn`](crate::info::ElementsFn) for a collection
/// with an `iter` method over `&T`.
macro_rules! elements_fn {
    ($fn_name:ident, $collection:ident $(, $bound:path)*) => {
        fn $fn_name<T: XmlValue $(+ $bound)*>(value: &dyn Any) -> Option<Elements<'_>> {
            let collection = value.downcast_ref::<$collection<T>>()?;
            Some(Box::new(collection.iter().map(|item| item as &dyn XmlValue)))
        }
    };
}

elements_fn!(vec_elements, Vec);
elements_fn!(vec_deque_elements, VecDeque);
elements_fn!(hash_set_elements, HashSet, Eq, Hash);
elements_fn!(btree_set_elements, BTreeSet, Ord);

/// Generates the pair and value traversals of a map.
macro_rules! map_fns {
    ($pairs:ident, $values:ident, $map:ident $(, $bound:path)*) => {
        fn $pairs<K: XmlValue $(+ $bound)*, V: XmlValue>(value: &dyn Any) -> Option<Pairs<'_>> {
            let map = value.downcast_ref::<$map<K, V>>()?;
            Some(Box::new(
                map.iter()
                    .map(|(key, value)| (key as &dyn XmlValue, value as &dyn XmlValue)),
            ))
        }

        fn $values<K: XmlValue $(+ $bound)*, V: XmlValue>(value: &dyn Any) -> Option<Elements<'_>> {
            let map = value.downcast_ref::<$map<K, V>>()?;
            Some(Box::new(map.values().map(|value| value as &dyn XmlValue)))
        }
    };
}

map_fns!(hash_map_pairs, hash_map_values, HashMap, Eq, Hash);
map_fns!(btree_map_pairs, btree_map_values, BTreeMap, Ord);

// -----------------------------------------------------------------------------
// Typed

impl<T: XmlValue + TypePath> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let element = Type::of::<T>();
            TypeInfo::collection::<Self>()
                .with_generics(&[element])
                .with_capability(Capability::List(ListCapability::new(element, vec_elements::<T>)))
                .with_capability(Capability::Iterable(IterableCapability::new(
                    Some(element),
                    vec_elements::<T>,
                )))
        })
    }
}

impl<T: XmlValue + TypePath> Typed for VecDeque<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let element = Type::of::<T>();
            TypeInfo::collection::<Self>()
                .with_generics(&[element])
                .with_capability(Capability::List(ListCapability::new(
                    element,
                    vec_deque_elements::<T>,
                )))
                .with_capability(Capability::Iterable(IterableCapability::new(
                    Some(element),
                    vec_deque_elements::<T>,
                )))
        })
    }
}

impl<T: XmlValue + TypePath + Eq + Hash> Typed for HashSet<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let element = Type::of::<T>();
            TypeInfo::collection::<Self>()
                .with_generics(&[element])
                .with_capability(Capability::Iterable(IterableCapability::new(
                    Some(element),
                    hash_set_elements::<T>,
                )))
        })
    }
}

impl<T: XmlValue + TypePath + Ord> Typed for BTreeSet<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let element = Type::of::<T>();
            TypeInfo::collection::<Self>()
                .with_generics(&[element])
                .with_capability(Capability::Iterable(IterableCapability::new(
                    Some(element),
                    btree_set_elements::<T>,
                )))
        })
    }
}

impl<K, V> Typed for HashMap<K, V>
where
    K: XmlValue + TypePath + Eq + Hash,
    V: XmlValue + TypePath,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let (key, value) = (Type::of::<K>(), Type::of::<V>());
            TypeInfo::collection::<Self>()
                .with_generics(&[key, value])
                .with_capability(Capability::KeyedPairs(KeyedPairsCapability::new(
                    key,
                    value,
                    hash_map_pairs::<K, V>,
                )))
                .with_capability(Capability::Iterable(IterableCapability::new(
                    Some(value),
                    hash_map_values::<K, V>,
                )))
        })
    }
}

impl<K, V> Typed for BTreeMap<K, V>
where
    K: XmlValue + TypePath + Ord,
    V: XmlValue + TypePath,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let (key, value) = (Type::of::<K>(), Type::of::<V>());
            TypeInfo::collection::<Self>()
                .with_generics(&[key, value])
                .with_capability(Capability::KeyedPairs(KeyedPairsCapability::new(
                    key,
                    value,
                    btree_map_pairs::<K, V>,
                )))
                .with_capability(Capability::Iterable(IterableCapability::new(
                    Some(value),
                    btree_map_values::<K, V>,
                )))
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, VecDeque};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashSet;

    use crate::XmlValue;
    use crate::info::{
        IterableCapability, KeyedPairsCapability, ListCapability, Type, TypePath, Typed,
        display_name, implements, probe,
    };

    #[test]
    fn generic_type_paths() {
        assert_eq!(Vec::<u8>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(Vec::<u8>::type_name(), "Vec<u8>");
        assert_eq!(
            BTreeMap::<String, Vec<i32>>::type_name(),
            "BTreeMap<String, Vec<i32>>"
        );
        assert_eq!(VecDeque::<bool>::type_ident(), "VecDeque");
        assert_eq!(display_name(BTreeMap::<String, u8>::type_info()), "BTreeMap");
    }

    #[test]
    fn declared_capabilities() {
        let vec = Vec::<i32>::type_info();
        assert_eq!(vec.generics(), &[Type::of::<i32>()]);
        assert!(implements::<ListCapability>(vec));
        assert!(!implements::<KeyedPairsCapability>(vec));

        let set = HashSet::<i32>::type_info();
        assert!(implements::<IterableCapability>(set));
        assert!(!implements::<ListCapability>(set));

        let map = BTreeMap::<String, i32>::type_info();
        assert_eq!(map.generics().len(), 2);
        assert!(implements::<KeyedPairsCapability>(map));
        assert!(implements::<IterableCapability>(map));
    }

    #[test]
    fn traversal_follows_collection_order() {
        let list = vec![3_u8, 1, 2];
        let probed = probe::<ListCapability>(Vec::<u8>::type_info()).unwrap();
        let items: Vec<u8> = probed
            .capability()
            .elements(list.as_any())
            .unwrap()
            .map(|item| *item.as_any().downcast_ref::<u8>().unwrap())
            .collect();
        assert_eq!(items, [3, 1, 2]);

        let mut map = BTreeMap::new();
        map.insert(String::from("b"), 2_i32);
        map.insert(String::from("a"), 1_i32);
        let probed = probe::<KeyedPairsCapability>(BTreeMap::<String, i32>::type_info()).unwrap();
        let keys: Vec<&str> = probed
            .capability()
            .pairs(map.as_any())
            .unwrap()
            .map(|(key, _)| key.as_any().downcast_ref::<String>().unwrap().as_str())
            .collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn traversal_rejects_other_types() {
        let probed = probe::<ListCapability>(Vec::<u8>::type_info()).unwrap();
        let other = vec![1_u16];
        assert!(probed.capability().elements(other.as_any()).is_none());
    }
}
