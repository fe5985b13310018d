use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use xs_utils::TypeIdMap;

use crate::info::Type;
use crate::registry::BuiltinRegistration;
use crate::serializers::{BytesSerializer, XmlSerializer};

/// Serializers always present, whatever the enabled features.
static BUILTINS: &[BuiltinRegistration] = &[
    BuiltinRegistration::scalar::<bool>(),
    BuiltinRegistration::scalar::<char>(),
    BuiltinRegistration::scalar::<u8>(),
    BuiltinRegistration::scalar::<u16>(),
    BuiltinRegistration::scalar::<u32>(),
    BuiltinRegistration::scalar::<u64>(),
    BuiltinRegistration::scalar::<u128>(),
    BuiltinRegistration::scalar::<usize>(),
    BuiltinRegistration::scalar::<i8>(),
    BuiltinRegistration::scalar::<i16>(),
    BuiltinRegistration::scalar::<i32>(),
    BuiltinRegistration::scalar::<i64>(),
    BuiltinRegistration::scalar::<i128>(),
    BuiltinRegistration::scalar::<isize>(),
    BuiltinRegistration::scalar::<f32>(),
    BuiltinRegistration::scalar::<f64>(),
    BuiltinRegistration::scalar::<String>(),
    BuiltinRegistration::scalar::<&'static str>(),
    BuiltinRegistration::new(Type::of::<Vec<u8>>(), construct_bytes),
];

fn construct_bytes() -> Box<dyn XmlSerializer> {
    Box::new(BytesSerializer)
}

/// Builds the table of built-in serializers.
///
/// The static list comes first, then registrations collected from all
/// linked crates. A second registration for a type is ignored.
pub(super) fn discover() -> TypeIdMap<&'static dyn XmlSerializer> {
    let mut table = TypeIdMap::with_capacity(BUILTINS.len());

    let registrations = BUILTINS.iter();
    #[cfg(feature = "auto_register")]
    let registrations = registrations.chain(inventory::iter::<BuiltinRegistration>);

    for registration in registrations {
        let ty = registration.ty();
        let inserted = table.try_insert(ty.id(), || {
            let serializer: &'static dyn XmlSerializer = Box::leak(registration.construct());
            serializer
        });
        if !inserted {
            log::warn!("ignored duplicate built-in serializer for `{}`", ty.path());
        }
    }

    log::debug!("discovered {} built-in serializers", table.len());
    table
}
