use core::any::TypeId;
use core::fmt::Debug;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map with [`TypeId`] as the fixed key type.
///
/// The table never hashes the key again: [`TypeId`] writes a single `u64`
/// which is passed through by [`NoOpHashState`].
///
/// Only the operations needed by the type caches are exposed, so the
/// underlying table can be swapped without touching callers.
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty `TypeIdMap`, usable in `static` items.
    ///
    /// # Examples
    ///
    /// ```
    /// use xs_utils::TypeIdMap;
    /// static EMPTY: std::sync::RwLock<TypeIdMap<u8>> = std::sync::RwLock::new(TypeIdMap::new());
    /// assert!(EMPTY.read().unwrap().is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Creates an empty `TypeIdMap` with at least the given capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity_and_hasher(capacity, NoOpHashState))
    }

    /// Inserts the value produced by `f` if the key is vacant.
    ///
    /// Returns `false` and leaves the map unchanged when the key exists,
    /// `f` is not called in that case.
    #[inline]
    pub fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => {
                entry.insert(f());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns the value for the key, inserting the result of `f` first if vacant.
    ///
    /// An existing value always wins; `f` only runs for a vacant key.
    #[inline]
    pub fn get_or_insert_with(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Returns a reference to the value of the key.
    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Returns a reference to the value stored for type `T`.
    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Returns `true` if the map holds a value for the key.
    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Returns `true` if the map holds a value for type `T`.
    #[inline(always)]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&TypeId::of::<T>())
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Visits all entries in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TypeId, &V)> {
        self.0.iter()
    }

    /// Visits all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeIdMap;
    use core::any::TypeId;

    #[test]
    fn first_insert_wins() {
        let mut map = TypeIdMap::new();
        assert!(map.try_insert(TypeId::of::<u8>(), || "first"));
        assert!(!map.try_insert(TypeId::of::<u8>(), || "second"));
        assert_eq!(map.get_type::<u8>(), Some(&"first"));

        let value = map.get_or_insert_with(TypeId::of::<u8>(), || "third");
        assert_eq!(*value, "first");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_or_insert_fills_vacant_keys() {
        let mut map = TypeIdMap::with_capacity(2);
        *map.get_or_insert_with(TypeId::of::<u16>(), || 1) += 1;
        assert_eq!(map.get_type::<u16>(), Some(&2));
        assert!(map.contains_type::<u16>());
        assert!(!map.contains_type::<u32>());
    }
}
