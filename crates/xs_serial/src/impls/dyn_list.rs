use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::XmlValue;
use crate::info::{
    Capability, Elements, IterableCapability, NonGenericTypeInfoCell, TypeInfo, TypePath, Typed,
};

/// An ordered list of values of any type.
///
/// The list declares no element type, so it is written as an array whose
/// items each use the serializer of their own runtime type.
///
/// ```
/// use xs_serial::impls::DynList;
/// use xs_serial::write::to_xml_string;
///
/// let list: DynList = [Box::new(1_u8) as Box<dyn xs_serial::XmlValue>, Box::new(true)]
///     .into_iter()
///     .collect();
/// let xml = to_xml_string(&list).unwrap();
/// assert!(xml.ends_with("<DynList><u8>1</u8><bool>true</bool></DynList>"));
/// ```
#[derive(Default)]
pub struct DynList(Vec<Box<dyn XmlValue>>);

impl DynList {
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a value.
    #[inline]
    pub fn push<T: XmlValue>(&mut self, value: T) {
        self.0.push(Box::new(value));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the values in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn XmlValue> {
        self.0.iter().map(|item| &**item)
    }
}

impl From<Vec<Box<dyn XmlValue>>> for DynList {
    #[inline]
    fn from(values: Vec<Box<dyn XmlValue>>) -> Self {
        Self(values)
    }
}

impl FromIterator<Box<dyn XmlValue>> for DynList {
    fn from_iter<I: IntoIterator<Item = Box<dyn XmlValue>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Debug for DynList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

fn dyn_list_elements(value: &dyn Any) -> Option<Elements<'_>> {
    let list = value.downcast_ref::<DynList>()?;
    Some(Box::new(list.iter()))
}

impl TypePath for DynList {
    #[inline]
    fn type_path() -> &'static str {
        "xs_serial::impls::DynList"
    }

    #[inline]
    fn type_name() -> &'static str {
        "DynList"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "DynList"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("xs_serial::impls")
    }
}

impl Typed for DynList {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::collection::<Self>().with_capability(Capability::Iterable(
                IterableCapability::new(None, dyn_list_elements),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::DynList;
    use crate::XmlValue;
    use crate::info::{IterableCapability, Typed, probe};

    #[test]
    fn elements_keep_runtime_types() {
        let mut list = DynList::new();
        list.push(7_u32);
        list.push(alloc::string::String::from("x"));
        assert_eq!(list.len(), 2);

        let probed = probe::<IterableCapability>(DynList::type_info()).unwrap();
        assert_eq!(probed.capability().element(), None);

        let paths: alloc::vec::Vec<&str> = probed
            .capability()
            .elements(list.as_any())
            .unwrap()
            .map(|item| item.value_type_info().type_path())
            .collect();
        assert_eq!(paths, ["u32", "alloc::string::String"]);
    }
}
