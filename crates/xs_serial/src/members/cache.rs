use alloc::vec::Vec;
use std::sync::{PoisonError, RwLock};

use xs_utils::TypeIdMap;

use crate::info::TypeInfo;
use crate::members::MemberDescriptor;

type MemberTable = RwLock<TypeIdMap<&'static [MemberDescriptor]>>;

// -----------------------------------------------------------------------------
// MetadataCache

/// Process-wide cache of field and property descriptors.
///
/// Each table is filled once per type, on first request, and never changed
/// afterwards. Members of the base come first, then the type's own members
/// in declaration order.
///
/// ```
/// use xs_serial::members::MetadataCache;
/// use xs_serial::info::Typed;
///
/// // Non-object types have no members.
/// assert!(MetadataCache::global().fields_of(<u32>::type_info()).is_empty());
/// ```
pub struct MetadataCache {
    fields: MemberTable,
    properties: MemberTable,
}

#[derive(Clone, Copy)]
enum MemberKind {
    Field,
    Property,
}

impl MetadataCache {
    const fn new() -> Self {
        Self {
            fields: RwLock::new(TypeIdMap::new()),
            properties: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the process-wide cache.
    #[inline]
    pub fn global() -> &'static Self {
        static CACHE: MetadataCache = MetadataCache::new();
        &CACHE
    }

    /// Returns the readable instance fields of the type, in order.
    #[inline]
    pub fn fields_of(&'static self, info: &'static TypeInfo) -> &'static [MemberDescriptor] {
        self.members_of(info, MemberKind::Field)
    }

    /// Returns the readable instance properties of the type, in order.
    #[inline]
    pub fn properties_of(&'static self, info: &'static TypeInfo) -> &'static [MemberDescriptor] {
        self.members_of(info, MemberKind::Property)
    }

    fn table(&self, kind: MemberKind) -> &MemberTable {
        match kind {
            MemberKind::Field => &self.fields,
            MemberKind::Property => &self.properties,
        }
    }

    fn members_of(
        &'static self,
        info: &'static TypeInfo,
        kind: MemberKind,
    ) -> &'static [MemberDescriptor] {
        let type_id = info.ty().id();
        let table = self.table(kind);

        if let Some(members) = table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
        {
            return members;
        }

        // Built outside the lock: computing the base table takes it again.
        let members = self.build(info, kind);
        log::debug!(
            "cached {} {} of `{}`",
            members.len(),
            match kind {
                MemberKind::Field => "fields",
                MemberKind::Property => "properties",
            },
            info.type_path(),
        );

        *table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(type_id, || &*members.leak())
    }

    fn build(&'static self, info: &'static TypeInfo, kind: MemberKind) -> Vec<MemberDescriptor> {
        let mut members = Vec::new();

        if let Some(base) = info.base() {
            let upcast = base.upcast();
            members.extend(
                self.members_of(base.info(), kind)
                    .iter()
                    .cloned()
                    .map(|member| member.inherited_through(upcast)),
            );
        }

        if let Some(object) = info.object_info() {
            members.extend(match kind {
                MemberKind::Field => object.declared_fields(),
                MemberKind::Property => object.declared_properties(),
            });
        }

        members
    }
}
