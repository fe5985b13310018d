use std::collections::BTreeMap;

use xs_serial::derive::XmlObject;
use xs_serial::impls::DynList;
use xs_serial::write::{WriteAction, to_xml_string, to_xml_string_with};
use xs_serial::{Indent, SerialError, SerializationContext, XmlSettings, XmlValue};

fn compact() -> XmlSettings {
    XmlSettings {
        declaration: false,
        ..XmlSettings::default()
    }
}

fn xml(value: &dyn XmlValue) -> String {
    to_xml_string_with(compact(), value).unwrap()
}

// -----------------------------------------------------------------------------
// Types

#[derive(XmlObject)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(XmlObject)]
struct Shape {
    #[xml(attribute)]
    id: u32,
    label: String,
}

#[derive(XmlObject)]
#[xml(rename = "circle")]
struct Circle {
    #[xml(base)]
    shape: Shape,
    radius: f64,
    center: Option<Point>,
}

#[derive(XmlObject)]
#[xml(property(name = "area", getter = Rect::area))]
#[xml(property(name = "square", getter = Rect::square, attribute))]
#[xml(property(name = "note", getter = Rect::note))]
struct Rect {
    w: u32,
    h: u32,
    #[xml(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
}

impl Rect {
    fn area(&self) -> u32 {
        self.w * self.h
    }

    fn square(&self) -> bool {
        self.w == self.h
    }

    fn note(&self) -> Option<String> {
        None
    }
}

#[derive(XmlObject)]
struct Note {
    #[xml(attribute)]
    lang: String,
    #[xml(text)]
    body: String,
}

#[derive(XmlObject)]
#[xml(namespace = "urn:inv")]
struct Invoice {
    #[xml(attribute, namespace = "urn:meta")]
    rev: u8,
    lines: Vec<Line>,
}

#[derive(XmlObject)]
#[xml(namespace = "urn:lines")]
struct Line {
    qty: u16,
}

#[derive(XmlObject)]
struct Scores {
    #[xml(rename = "table")]
    by_name: BTreeMap<String, u8>,
}

#[derive(XmlObject)]
struct Broken {
    #[xml(attribute)]
    origin: Point,
}

// -----------------------------------------------------------------------------
// Objects

#[test]
fn declaration_precedes_root() {
    let text = to_xml_string(&Point { x: 1, y: 2 }).unwrap();
    assert_eq!(
        text,
        r#"<?xml version="1.0" encoding="UTF-8"?><Point><x>1</x><y>2</y></Point>"#
    );
}

#[test]
fn members_follow_declaration_order() {
    assert_eq!(xml(&Point { x: 1, y: -2 }), "<Point><x>1</x><y>-2</y></Point>");
}

#[test]
fn base_members_come_first() {
    let circle = Circle {
        shape: Shape {
            id: 3,
            label: String::from("c"),
        },
        radius: 1.5,
        center: None,
    };
    assert_eq!(
        xml(&circle),
        r#"<circle id="3"><label>c</label><radius>1.5</radius></circle>"#
    );
}

#[test]
fn nested_objects_are_named_after_the_member() {
    let circle = Circle {
        shape: Shape {
            id: 1,
            label: String::new(),
        },
        radius: 0.5,
        center: Some(Point { x: 0, y: 4 }),
    };
    assert_eq!(
        xml(&circle),
        r#"<circle id="1"><label/><radius>0.5</radius><center><x>0</x><y>4</y></center></circle>"#
    );
}

#[test]
fn properties_follow_fields() {
    let rect = Rect {
        w: 2,
        h: 3,
        cache: vec![9],
    };
    assert_eq!(
        xml(&rect),
        r#"<Rect square="false"><w>2</w><h>3</h><area>6</area></Rect>"#
    );
}

#[test]
fn text_member_is_escaped() {
    let note = Note {
        lang: String::from("en"),
        body: String::from("a < b"),
    };
    assert_eq!(xml(&note), r#"<Note lang="en">a &lt; b</Note>"#);
}

// -----------------------------------------------------------------------------
// Namespaces

#[test]
fn namespaces_are_declared_on_the_root() {
    let invoice = Invoice {
        rev: 2,
        lines: vec![Line { qty: 1 }, Line { qty: 4 }],
    };
    assert_eq!(
        xml(&invoice),
        concat!(
            r#"<ns0:Invoice xmlns:ns0="urn:inv" xmlns:ns1="urn:meta" xmlns:ns2="urn:lines" ns1:rev="2">"#,
            "<lines><ns2:Line><qty>1</qty></ns2:Line><ns2:Line><qty>4</qty></ns2:Line></lines>",
            "</ns0:Invoice>",
        )
    );
}

#[test]
fn prefix_stem_comes_from_settings() {
    let settings = XmlSettings {
        declaration: false,
        prefix_stem: String::from("p"),
        ..XmlSettings::default()
    };
    let text = to_xml_string_with(settings, &Line { qty: 7 }).unwrap();
    assert_eq!(text, r#"<p0:Line xmlns:p0="urn:lines"><qty>7</qty></p0:Line>"#);
}

#[test]
fn reserved_or_empty_stems_use_the_default() {
    for stem in ["", "xmlfoo", "1a"] {
        let settings = XmlSettings {
            declaration: false,
            prefix_stem: String::from(stem),
            ..XmlSettings::default()
        };
        let text = to_xml_string_with(settings, &Line { qty: 7 }).unwrap();
        assert_eq!(text, r#"<ns0:Line xmlns:ns0="urn:lines"><qty>7</qty></ns0:Line>"#);
    }
}

#[test]
fn each_context_allocates_its_own_prefixes() {
    let first = SerializationContext::new();
    let second = SerializationContext::new();

    first.get_prefix("a", "urn:a");
    assert_eq!(first.get_prefix("b", "urn:b"), "ns1");
    assert_eq!(second.get_prefix("b", "urn:b"), "ns0");
    assert_eq!(first.namespace_bindings().len(), 2);
}

// -----------------------------------------------------------------------------
// Collections

#[test]
fn dictionaries_write_entries() {
    let mut by_name = BTreeMap::new();
    by_name.insert(String::from("b"), 2);
    by_name.insert(String::from("a"), 1);
    assert_eq!(
        xml(&Scores { by_name }),
        concat!(
            "<Scores><table>",
            "<entry><key>a</key><value>1</value></entry>",
            "<entry><key>b</key><value>2</value></entry>",
            "</table></Scores>",
        )
    );
}

#[test]
fn dictionary_names_come_from_settings() {
    let settings = XmlSettings {
        declaration: false,
        entry_name: String::from("kv"),
        key_name: String::from("k"),
        value_name: String::from("v"),
        ..XmlSettings::default()
    };
    let map = BTreeMap::from([(1_u8, true)]);
    assert_eq!(
        to_xml_string_with(settings, &map).unwrap(),
        "<BTreeMap><kv><k>1</k><v>true</v></kv></BTreeMap>"
    );
}

#[test]
fn untyped_lists_use_runtime_types() {
    let list: DynList = vec![
        Box::new(Point { x: 1, y: 1 }) as Box<dyn XmlValue>,
        Box::new(String::from("s")),
    ]
    .into();
    assert_eq!(
        xml(&list),
        "<DynList><Point><x>1</x><y>1</y></Point><String>s</String></DynList>"
    );
}

#[test]
fn boxed_elements_use_runtime_types() {
    let list: Vec<Box<dyn XmlValue>> = vec![Box::new(5_u8), Box::new('z')];
    assert_eq!(xml(&list), "<Vec><u8>5</u8><char>z</char></Vec>");
}

#[test]
fn arrays_and_bytes() {
    assert_eq!(xml(&[1_u16, 2]), "<Array><u16>1</u16><u16>2</u16></Array>");
    assert_eq!(xml(&vec![0xab_u8, 0x01]), "<Vec>ab01</Vec>");
    assert_eq!(xml(&Vec::<i32>::new()), "<Vec/>");
}

// -----------------------------------------------------------------------------
// Layout

#[test]
fn indented_output() {
    let settings = XmlSettings {
        declaration: false,
        indent: Some(Indent::default()),
        ..XmlSettings::default()
    };
    let text = to_xml_string_with(settings, &Point { x: 1, y: 2 }).unwrap();
    assert_eq!(text, "<Point>\n  <x>1</x>\n  <y>2</y>\n</Point>");
}

// -----------------------------------------------------------------------------
// Sequences

#[test]
fn absent_value_writes_nothing() {
    let ctx = SerializationContext::new();
    let actions = ctx.serialize(None).unwrap().collect_actions().unwrap();
    assert!(actions.is_empty());
}

#[test]
fn equal_values_produce_equal_sequences() {
    let build = || Invoice {
        rev: 1,
        lines: vec![Line { qty: 3 }],
    };
    let (first, second) = (build(), build());

    let ctx_a = SerializationContext::new();
    let ctx_b = SerializationContext::new();
    let a = ctx_a.serialize(Some(&first)).unwrap().collect_actions().unwrap();
    let b = ctx_b.serialize(Some(&second)).unwrap().collect_actions().unwrap();
    assert_eq!(a, b);
    assert!(matches!(a.first(), Some(WriteAction::StartElement(_))));
    assert!(matches!(a.last(), Some(WriteAction::EndElement)));
}

#[test]
fn non_scalar_attribute_fails() {
    let broken = Broken {
        origin: Point { x: 0, y: 0 },
    };
    let error = to_xml_string_with(compact(), &broken).unwrap_err();
    assert!(matches!(
        error,
        SerialError::NotScalar {
            member: "origin",
            ..
        }
    ));
}
