use alloc::boxed::Box;
use alloc::string::String;
use std::sync::{PoisonError, RwLock};

use xs_utils::TypeIdMap;

use crate::info::TypeInfo;

/// Element name used when nothing of a type name survives normalization.
const FALLBACK_NAME: &str = "Value";

// -----------------------------------------------------------------------------
// normalize_type_name

/// Derives a generics-erased, XML-safe element name from a type name.
///
/// - references, lifetimes and `dyn` are dropped,
/// - arrays and slices become `Array`, tuples become `Tuple`,
/// - generic argument lists and module paths are cut off,
/// - characters not allowed in an XML name become `_`.
///
/// ```
/// use xs_serial::info::normalize_type_name;
///
/// assert_eq!(normalize_type_name("alloc::vec::Vec<u32>"), "Vec");
/// assert_eq!(normalize_type_name("HashMap<String, i32>"), "HashMap");
/// assert_eq!(normalize_type_name("[u8; 4]"), "Array");
/// assert_eq!(normalize_type_name("&'static str"), "str");
/// ```
pub fn normalize_type_name(name: &str) -> String {
    let mut rest = name.trim();
    loop {
        let before = rest;
        rest = rest.trim_start_matches('&').trim_start();
        if let Some(after) = rest.strip_prefix('\'') {
            let end = after.find(char::is_whitespace).unwrap_or(after.len());
            rest = &after[end..];
        }
        for keyword in ["mut ", "dyn "] {
            if let Some(after) = rest.strip_prefix(keyword) {
                rest = after;
            }
        }
        rest = rest.trim_start();
        if rest.len() == before.len() {
            break;
        }
    }

    if rest.starts_with('[') {
        return String::from("Array");
    }
    if rest.starts_with('(') {
        return String::from("Tuple");
    }

    let erased = rest.split('<').next().unwrap_or_default();
    let local = erased.rsplit("::").next().unwrap_or_default().trim();

    let mut out = String::with_capacity(local.len() + 1);
    for ch in local.chars() {
        if is_name_char(ch) {
            out.push(ch);
        } else {
            out.push('_');
        }
    }

    match out.chars().next() {
        None => String::from(FALLBACK_NAME),
        Some(first) if !is_name_start(first) => {
            out.insert(0, '_');
            out
        }
        Some(_) => out,
    }
}

#[inline]
fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

#[inline]
fn is_name_char(ch: char) -> bool {
    is_name_start(ch) || ch.is_alphanumeric() || ch == '-' || ch == '.'
}

// -----------------------------------------------------------------------------
// display_name

/// Returns the element name used for values of this type.
///
/// The explicit [`element_name`](TypeInfo::element_name) wins, otherwise
/// [`normalize_type_name`] of the type name. Memoized per type.
pub fn display_name(info: &'static TypeInfo) -> &'static str {
    static NAMES: RwLock<TypeIdMap<&'static str>> = RwLock::new(TypeIdMap::new());

    if let Some(name) = info.element_name() {
        return name;
    }

    let type_id = info.ty().id();
    if let Some(name) = NAMES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&type_id)
        .copied()
    {
        return name;
    }

    let name = normalize_type_name(info.ty().name());
    *NAMES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(type_id, || Box::leak(name.into_boxed_str()))
}

// -----------------------------------------------------------------------------
// Tests
