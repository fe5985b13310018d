//! Field and property descriptors and their process-wide cache.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod descriptor;

// -----------------------------------------------------------------------------
// Exports

pub use cache::MetadataCache;
pub use descriptor::{
    MemberDescriptor, MemberForm, MemberGetter, MemberRef, MemberValue, OwnedMember,
    property_type,
};
