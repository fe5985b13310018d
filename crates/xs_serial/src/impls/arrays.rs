use alloc::boxed::Box;
use alloc::string::ToString;
use core::any::Any;

use crate::XmlValue;
use crate::info::{
    Capability, Elements, GenericTypeInfoCell, GenericTypePathCell, IterableCapability, Type,
    TypeInfo, TypePath, Typed, concat,
};

fn slice_elements<A, T>(value: &dyn Any) -> Option<Elements<'_>>
where
    A: AsRef<[T]> + 'static,
    T: XmlValue,
{
    let array = value.downcast_ref::<A>()?;
    Some(Box::new(array.as_ref().iter().map(|item| item as &dyn XmlValue)))
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_path(), "; ", &N.to_string(), "]"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_name(), "; ", &N.to_string(), "]"]))
    }

    fn type_ident() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_ident(), "; ", &N.to_string(), "]"]))
    }
}

impl<T: XmlValue + TypePath, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let element = Type::of::<T>();
            TypeInfo::array::<Self>(element).with_capability(Capability::Iterable(
                IterableCapability::new(Some(element), slice_elements::<Self, T>),
            ))
        })
    }
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: TypePath> TypePath for Box<[T]> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::boxed::Box<[", T::type_path(), "]>"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Box<[", T::type_name(), "]>"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Box"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl<T: XmlValue + TypePath> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let element = Type::of::<T>();
            TypeInfo::array::<Self>(element).with_capability(Capability::Iterable(
                IterableCapability::new(Some(element), slice_elements::<Self, T>),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::XmlValue;
    use crate::info::{IterableCapability, Type, TypeKind, TypePath, Typed, display_name, probe};

    #[test]
    fn array_metadata() {
        let info = <[u16; 3]>::type_info();
        assert_eq!(<[u16; 3]>::type_name(), "[u16; 3]");
        assert_eq!(info.kind(), TypeKind::Array { element: Type::of::<u16>() });
        assert!(info.generics().is_empty());
        assert_eq!(display_name(info), "Array");

        let boxed = <Box<[u8]>>::type_info();
        assert_eq!(<Box<[u8]>>::type_name(), "Box<[u8]>");
        assert_eq!(boxed.kind(), TypeKind::Array { element: Type::of::<u8>() });
        assert_eq!(display_name(boxed), "Box");
    }

    #[test]
    fn array_elements() {
        let value: Box<[i8]> = vec![-1, 0, 1].into_boxed_slice();
        let probed = probe::<IterableCapability>(<Box<[i8]>>::type_info()).unwrap();
        let items: Vec<i8> = probed
            .capability()
            .elements(value.as_any())
            .unwrap()
            .map(|item| *item.as_any().downcast_ref::<i8>().unwrap())
            .collect();
        assert_eq!(items, [-1, 0, 1]);
    }
}
