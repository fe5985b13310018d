use std::collections::BTreeMap;

use xs_serial::derive::XmlObject;
use xs_serial::info::{
    IterableCapability, KeyedPairsCapability, Type, TypeKind, TypePath, Typed, declared_generics,
    display_name, implements, probe,
};
use xs_serial::members::{MemberForm, MetadataCache};
use xs_serial::registry::SerializerRegistry;
use xs_serial::serializers::Strategy;
use xs_serial::write::to_xml_string_with;
use xs_serial::{XmlSettings, XmlValue};

#[derive(XmlObject)]
struct Plain {
    r#type: String,
}

#[derive(XmlObject)]
struct Pair<A, B> {
    first: A,
    second: B,
}

#[derive(XmlObject)]
#[xml(rename = "index", namespace = "urn:index")]
struct Index {
    #[xml(attribute, rename = "v")]
    version: u32,
    entries: BTreeMap<String, u32>,
}

#[derive(XmlObject)]
struct Catalog {
    #[xml(base)]
    index: Index,
    title: String,
}

#[test]
fn type_paths() {
    assert_eq!(Plain::type_path(), concat!(module_path!(), "::Plain"));
    assert_eq!(Plain::type_name(), "Plain");
    assert_eq!(Plain::module_path(), Some(module_path!()));

    assert_eq!(
        <Pair<u8, String>>::type_path(),
        concat!(module_path!(), "::Pair<u8, alloc::string::String>")
    );
    assert_eq!(<Pair<u8, String>>::type_name(), "Pair<u8, String>");
    assert_eq!(<Pair<u8, String>>::type_ident(), "Pair");
}

#[test]
fn object_metadata() {
    let info = Pair::<u8, bool>::type_info();
    assert_eq!(info.kind(), TypeKind::Object);
    assert_eq!(info.generics(), &[Type::of::<u8>(), Type::of::<bool>()]);
    assert_eq!(display_name(info), "Pair");

    let index = Index::type_info();
    assert_eq!(display_name(index), "index");
    assert_eq!(index.namespace(), Some("urn:index"));
    assert!(index.generics().is_empty());
    assert!(index.object_info().is_some());
    assert!(u32::type_info().object_info().is_none());
}

#[test]
fn raw_identifiers_are_unescaped() {
    let fields = MetadataCache::global().fields_of(Plain::type_info());
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name(), "type");
}

#[test]
fn member_descriptors() {
    let fields = MetadataCache::global().fields_of(Index::type_info());
    let names: Vec<&str> = fields.iter().map(|member| member.name()).collect();
    assert_eq!(names, ["v", "entries"]);
    assert_eq!(fields[0].form(), MemberForm::Attribute);
    assert_eq!(fields[1].declared(), Type::of::<BTreeMap<String, u32>>());
    assert!(fields.iter().all(|member| !member.is_inherited()));

    let again = MetadataCache::global().fields_of(Index::type_info());
    assert!(core::ptr::eq(fields, again));
}

#[test]
fn inherited_members_come_first() {
    let fields = MetadataCache::global().fields_of(Catalog::type_info());
    let names: Vec<&str> = fields.iter().map(|member| member.name()).collect();
    assert_eq!(names, ["v", "entries", "title"]);
    assert!(fields[0].is_inherited());
    assert!(!fields[2].is_inherited());

    let catalog = Catalog {
        index: Index {
            version: 2,
            entries: BTreeMap::new(),
        },
        title: String::from("t"),
    };
    let version = fields[0].read(catalog.as_any()).unwrap().unwrap();
    assert_eq!(version.as_value().as_any().downcast_ref::<u32>(), Some(&2));
}

#[test]
fn objects_do_not_iterate() {
    assert!(!implements::<IterableCapability>(Catalog::type_info()));
    assert!(probe::<KeyedPairsCapability>(Index::type_info()).is_none());
    assert_eq!(
        SerializerRegistry::global()
            .resolve(Catalog::type_info())
            .unwrap()
            .strategy(),
        Strategy::Object(Type::of::<Catalog>())
    );
}

#[test]
fn generic_objects_write_their_arguments() {
    let pair = Pair {
        first: 1_u8,
        second: vec![true],
    };
    let settings = XmlSettings {
        declaration: false,
        ..XmlSettings::default()
    };
    assert_eq!(
        to_xml_string_with(settings, &pair).unwrap(),
        "<Pair><first>1</first><second><bool>true</bool></second></Pair>"
    );
}

#[derive(XmlObject)]
struct Lines {
    #[xml(base)]
    items: Vec<u16>,
    label: String,
}

#[test]
fn list_base_makes_a_list() {
    let info = Lines::type_info();
    assert!(implements::<IterableCapability>(info));
    assert!(info.generics().is_empty());
    let (owner, generics) = declared_generics(info).unwrap();
    assert_eq!(owner.ty(), Type::of::<Vec<u16>>());
    assert_eq!(generics, &[Type::of::<u16>()]);
    assert_eq!(
        SerializerRegistry::global().resolve(info).unwrap().strategy(),
        Strategy::List {
            element: Type::of::<u16>()
        }
    );

    let lines = Lines {
        items: vec![1, 2],
        label: String::from("ignored"),
    };
    let settings = XmlSettings {
        declaration: false,
        ..XmlSettings::default()
    };
    assert_eq!(
        to_xml_string_with(settings, &lines).unwrap(),
        "<Lines><u16>1</u16><u16>2</u16></Lines>"
    );
}

#[derive(XmlObject)]
struct Lookup {
    #[xml(base)]
    entries: BTreeMap<String, i32>,
}

#[test]
fn map_base_makes_a_dictionary() {
    let info = Lookup::type_info();
    assert!(probe::<KeyedPairsCapability>(info).unwrap().is_inherited());
    assert_eq!(
        SerializerRegistry::global().resolve(info).unwrap().strategy(),
        Strategy::Dictionary {
            key: Type::of::<String>(),
            value: Type::of::<i32>()
        }
    );

    let lookup = Lookup {
        entries: BTreeMap::from([(String::from("a"), 1), (String::from("b"), 2)]),
    };
    let settings = XmlSettings {
        declaration: false,
        ..XmlSettings::default()
    };
    assert_eq!(
        to_xml_string_with(settings, &lookup).unwrap(),
        concat!(
            "<Lookup>",
            "<entry><key>a</key><value>1</value></entry>",
            "<entry><key>b</key><value>2</value></entry>",
            "</Lookup>",
        )
    );
}

#[test]
fn plain_objects_declare_no_generics() {
    assert!(declared_generics(Index::type_info()).is_none());
    assert!(declared_generics(Catalog::type_info()).is_none());
    let (owner, _) = declared_generics(Pair::<u8, u8>::type_info()).unwrap();
    assert_eq!(owner.ty(), Type::of::<Pair<u8, u8>>());
}
