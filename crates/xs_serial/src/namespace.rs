use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use xs_utils::hash::HashMap;

// -----------------------------------------------------------------------------
// NamespaceBinding

/// A namespace URI and the prefix allocated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceBinding {
    prefix: String,
    uri: String,
}

impl NamespaceBinding {
    /// The allocated prefix.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The namespace URI.
    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

// -----------------------------------------------------------------------------
// NamespaceTable

/// Stem used when the configured one is not a valid prefix start.
pub const DEFAULT_STEM: &str = "ns";

fn is_valid_stem(stem: &str) -> bool {
    let mut chars = stem.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !stem
            .get(..3)
            .is_some_and(|head| head.eq_ignore_ascii_case("xml"))
}

/// Prefix bookkeeping of one serialization pass.
///
/// The first request for a namespace allocates `{stem}{n}` with `n` counting
/// from zero, later requests return the same prefix. Identical request
/// sequences always produce identical prefixes.
///
/// ```
/// use xs_serial::NamespaceTable;
///
/// let mut table = NamespaceTable::new("ns");
/// assert_eq!(table.get_prefix("a", "urn:a"), "ns0");
/// assert_eq!(table.get_prefix("b", "urn:b"), "ns1");
/// assert_eq!(table.get_prefix("c", "urn:a"), "ns0");
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct NamespaceTable {
    stem: String,
    by_uri: HashMap<String, usize>,
    bindings: Vec<NamespaceBinding>,
}

impl NamespaceTable {
    /// Creates an empty table allocating prefixes `{stem}0`, `{stem}1`, ...
    ///
    /// A stem that cannot start an XML prefix is replaced by
    /// [`DEFAULT_STEM`]: empty, not starting with a letter or `_`, holding a
    /// character other than letters, digits, `-`, `_` and `.`, or starting
    /// with the reserved `xml`.
    pub fn new(stem: impl Into<String>) -> Self {
        let mut stem = stem.into();
        if !is_valid_stem(&stem) {
            log::warn!("invalid namespace prefix stem `{stem}`, using `{DEFAULT_STEM}`");
            stem = String::from(DEFAULT_STEM);
        }
        Self {
            stem,
            by_uri: HashMap::default(),
            bindings: Vec::new(),
        }
    }

    /// Returns the prefix of `namespace`, allocating one on first request.
    ///
    /// `local_name` is the name being qualified, only used for tracing.
    pub fn get_prefix(&mut self, local_name: &str, namespace: &str) -> &str {
        let index = match self.by_uri.get(namespace) {
            Some(&index) => index,
            None => {
                let index = self.bindings.len();
                let prefix = format!("{}{index}", self.stem);
                log::trace!("bound prefix `{prefix}` to `{namespace}` for `{local_name}`");
                self.bindings.push(NamespaceBinding {
                    prefix,
                    uri: String::from(namespace),
                });
                self.by_uri.insert(String::from(namespace), index);
                index
            }
        };
        &self.bindings[index].prefix
    }

    /// Returns the prefix of `namespace` if one was allocated.
    pub fn prefix_of(&self, namespace: &str) -> Option<&str> {
        self.by_uri
            .get(namespace)
            .map(|&index| self.bindings[index].prefix.as_str())
    }

    /// Visits every binding in allocation order.
    pub fn for_each_binding(&self, mut func: impl FnMut(&NamespaceBinding)) {
        self.bindings.iter().for_each(|binding| func(binding));
    }

    /// All bindings in allocation order.
    #[inline]
    pub fn bindings(&self) -> &[NamespaceBinding] {
        &self.bindings
    }

    /// Number of allocated prefixes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing was allocated yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{NamespaceTable, is_valid_stem};
    use alloc::borrow::ToOwned;
    use alloc::vec::Vec;

    #[test]
    fn same_namespace_same_prefix() {
        let mut table = NamespaceTable::new("ns");
        let first = table.get_prefix("a", "urn:a").to_owned();
        let second = table.get_prefix("b", "urn:a").to_owned();
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);

        let other = table.get_prefix("a", "urn:b");
        assert_ne!(other, first);
        assert_eq!(table.prefix_of("urn:b"), Some("ns1"));
        assert_eq!(table.prefix_of("urn:c"), None);
    }

    #[test]
    fn bindings_follow_first_request_order() {
        let mut table = NamespaceTable::new("p");
        for uri in ["urn:z", "urn:a", "urn:z", "urn:m", "urn:a"] {
            table.get_prefix("x", uri);
        }

        let mut seen = Vec::new();
        table.for_each_binding(|binding| seen.push((binding.prefix().to_owned(), binding.uri().to_owned())));
        assert_eq!(
            seen,
            [
                ("p0".to_owned(), "urn:z".to_owned()),
                ("p1".to_owned(), "urn:a".to_owned()),
                ("p2".to_owned(), "urn:m".to_owned()),
            ]
        );
    }

    #[test]
    fn tables_are_independent() {
        let mut a = NamespaceTable::new("ns");
        let mut b = NamespaceTable::new("ns");
        a.get_prefix("x", "urn:one");
        a.get_prefix("x", "urn:two");
        assert_eq!(b.get_prefix("x", "urn:two"), "ns0");
        assert!(NamespaceTable::new("ns").is_empty());
    }

    #[test]
    fn invalid_stems_fall_back() {
        for stem in ["", "0", "a:b", "x y", "xml", "XMLns"] {
            assert!(!is_valid_stem(stem), "{stem:?}");
            let mut table = NamespaceTable::new(stem);
            assert_eq!(table.get_prefix("a", "urn:a"), "ns0");
        }
        for stem in ["p", "_p", "ns-a.b", "xm", "x1"] {
            assert!(is_valid_stem(stem), "{stem:?}");
        }
    }
}
