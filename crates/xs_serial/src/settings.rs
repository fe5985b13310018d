use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::namespace::DEFAULT_STEM;

// -----------------------------------------------------------------------------
// Indent

/// Indentation of the written document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Indent {
    /// The character repeated for each level.
    pub char: char,
    /// Number of characters per level.
    pub size: usize,
}

impl Default for Indent {
    fn default() -> Self {
        Self {
            char: ' ',
            size: 2,
        }
    }
}

// -----------------------------------------------------------------------------
// XmlSettings

/// Options of one serialization pass.
///
/// Every field has a default, so partial documents deserialize:
///
/// ```
/// use xs_serial::XmlSettings;
///
/// let settings: XmlSettings = serde_json::from_str(r#"{ "prefix_stem": "p" }"#).unwrap();
/// assert_eq!(settings.prefix_stem, "p");
/// assert_eq!(settings.entry_name, "entry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlSettings {
    /// Allocated namespace prefixes are `{prefix_stem}{n}`.
    pub prefix_stem: String,
    /// Write the `<?xml ...?>` declaration.
    pub declaration: bool,
    /// Indent nested elements, `None` writes everything on one line.
    pub indent: Option<Indent>,
    /// Element wrapping one key/value pair of a dictionary.
    pub entry_name: String,
    /// Element holding the key of a dictionary entry.
    pub key_name: String,
    /// Element holding the value of a dictionary entry.
    pub value_name: String,
}

impl Default for XmlSettings {
    fn default() -> Self {
        Self {
            prefix_stem: String::from(DEFAULT_STEM),
            declaration: true,
            indent: None,
            entry_name: String::from("entry"),
            key_name: String::from("key"),
            value_name: String::from("value"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Indent, XmlSettings};

    #[test]
    fn loads_from_ron() {
        let settings: XmlSettings = ron::from_str(
            r#"(
                declaration: false,
                indent: Some((char: '\t', size: 1)),
                entry_name: "item",
            )"#,
        )
        .unwrap();

        assert!(!settings.declaration);
        assert_eq!(settings.indent, Some(Indent { char: '\t', size: 1 }));
        assert_eq!(settings.entry_name, "item");
        assert_eq!(settings.key_name, "key");
        assert_eq!(settings.prefix_stem, "ns");
    }

    #[test]
    fn json_round_trip_keeps_defaults() {
        let text = serde_json::to_string(&XmlSettings::default()).unwrap();
        let back: XmlSettings = serde_json::from_str(&text).unwrap();
        assert_eq!(back, XmlSettings::default());

        let empty: XmlSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, XmlSettings::default());
    }
}
