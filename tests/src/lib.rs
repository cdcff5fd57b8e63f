#![cfg(test)]

use once_cell::sync::Lazy;
use proptest::prelude::*;
use prost::Message;
use protoschema_reader::{read_file_descriptor_set_bytes, DefaultValue, Definition, Label, Type};

static TEST_DESCRIPTOR_SET_BYTES: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/file_descriptor_set.bin"));

static DEFS: Lazy<Vec<Definition>> =
    Lazy::new(|| read_file_descriptor_set_bytes(TEST_DESCRIPTOR_SET_BYTES).unwrap());

fn find<'a>(defs: &'a [Definition], full_name: &str) -> &'a Definition {
    defs.iter()
        .find(|def| def.full_name() == full_name)
        .unwrap_or_else(|| panic!("no definition named {}", full_name))
}

fn as_message<'a>(def: &'a Definition) -> &'a protoschema_reader::MessageDef {
    match def {
        Definition::Message(msg) => msg,
        Definition::Enum(_) => panic!("expected a message, found an enum"),
    }
}

fn as_enum<'a>(def: &'a Definition) -> &'a protoschema_reader::EnumDef {
    match def {
        Definition::Enum(en) => en,
        Definition::Message(_) => panic!("expected an enum, found a message"),
    }
}

#[test]
fn empty_message_with_package_qualification() {
    let def = find(&DEFS, "test.Empty");
    let msg = as_message(def);
    assert_eq!(msg.name, "Empty");
    assert!(msg.fields.is_empty());
}

#[test]
fn scalar_defaults_are_parsed_per_type() {
    let msg = as_message(find(&DEFS, "test.Scalars"));

    let field = |name: &str| msg.fields.iter().find(|f| f.name == name).unwrap();

    assert_eq!(field("int32_field").default, Some(DefaultValue::I32(5)));
    assert_eq!(field("int64_field").default, Some(DefaultValue::I64(-7)));
    assert_eq!(field("uint32_field").default, Some(DefaultValue::U32(42)));
    assert_eq!(field("uint64_field").default, Some(DefaultValue::U64(42)));
    assert_eq!(field("float_field").default, Some(DefaultValue::F32(1.5)));
    assert_eq!(field("double_field").default, Some(DefaultValue::F64(-2.5)));
    assert_eq!(field("bool_field").default, Some(DefaultValue::Bool(true)));
    assert_eq!(
        field("string_field").default,
        Some(DefaultValue::String("hello".to_owned()))
    );
    assert_eq!(
        field("bytes_field").default,
        Some(DefaultValue::String(String::new()))
    );
    assert_eq!(field("required_field").label, Label::Required);
    assert_eq!(field("required_field").default, None);
    assert_eq!(field("repeated_field").label, Label::Repeated);
}

#[test]
fn int32_boundary_defaults() {
    let msg = as_message(find(&DEFS, "test.Boundaries"));
    let field = |name: &str| msg.fields.iter().find(|f| f.name == name).unwrap();

    assert_eq!(
        field("max_int32").default,
        Some(DefaultValue::I32(i32::MAX))
    );
    assert_eq!(
        field("min_int32").default,
        Some(DefaultValue::I32(i32::MIN))
    );
}

#[test]
fn enum_default_is_first_declared_value() {
    let en = as_enum(find(&DEFS, "test.Color"));
    assert_eq!(en.values.len(), 3);
    let default = en.default_value().unwrap();
    assert_eq!(default.name, "RED");
    assert_eq!(default.number, 0);
}

#[test]
fn nested_messages_and_enums_are_fully_qualified() {
    as_message(find(&DEFS, "test.Outer"));
    as_message(find(&DEFS, "test.Outer.Inner"));
    as_message(find(&DEFS, "test.Outer.Inner.Innermost"));
    as_enum(find(&DEFS, "test.Outer.NestedEnum"));
}

#[test]
fn field_referencing_nested_type_keeps_type_name_unresolved() {
    let msg = as_message(find(&DEFS, "test.Outer"));
    let inner_field = msg.fields.iter().find(|f| f.name == "inner").unwrap();
    assert_eq!(inner_field.kind, Type::Message);
    assert_eq!(inner_field.type_name.as_deref(), Some(".test.Outer.Inner"));
}

#[test]
fn enum_field_default_is_raw_symbol_text() {
    let msg = as_message(find(&DEFS, "test.Outer"));
    let color_field = msg.fields.iter().find(|f| f.name == "color").unwrap();
    assert_eq!(
        color_field.default,
        Some(DefaultValue::String("GREEN".to_owned()))
    );
}

#[test]
fn deferred_default_parsing_does_not_depend_on_wire_order() {
    use protoschema_reader::DescriptorReader;

    let mut reader = DescriptorReader::new();
    reader.start_file();
    reader.set_package("pkg".to_owned());
    reader.start_message();
    reader.set_message_name("M".to_owned()).unwrap();
    reader.start_field();
    reader.set_field_name("f".to_owned());
    reader.set_field_number(1);
    // default_value arrives before type, as the wire format permits.
    reader.set_field_default_value("5".to_owned());
    reader.set_field_type(Type::Int32);
    reader.end_field().unwrap();
    reader.end_message().unwrap();
    reader.end_file().unwrap();

    let defs = reader.into_defs();
    let msg = as_message(&defs[0]);
    assert_eq!(msg.fields[0].default, Some(DefaultValue::I32(5)));
}

#[test]
fn missing_type_is_an_error_even_without_a_default() {
    use protoschema_reader::DescriptorReader;

    let mut reader = DescriptorReader::new();
    reader.start_file();
    reader.set_package(String::new());
    reader.start_message();
    reader.set_message_name("M".to_owned()).unwrap();
    reader.start_field();
    reader.set_field_name("f".to_owned());
    reader.set_field_number(1);
    let err = reader.end_field().unwrap_err();
    assert_eq!(err.to_string(), "Field 'f' in message 'M' has no type.");
}

#[test]
fn message_default_is_rejected() {
    use protoschema_reader::DescriptorReader;

    let mut reader = DescriptorReader::new();
    reader.start_file();
    reader.set_package(String::new());
    reader.start_message();
    reader.set_message_name("M".to_owned()).unwrap();
    reader.start_field();
    reader.set_field_name("f".to_owned());
    reader.set_field_number(1);
    reader.set_field_type(Type::Message);
    reader.set_field_type_name(".test.M".to_owned());
    reader.set_field_default_value("anything".to_owned());
    let err = reader.end_field().unwrap_err();
    assert!(err.to_string().contains("Submessages cannot have defaults"));
}

#[test]
fn message_field_missing_type_name_is_rejected() {
    use protoschema_reader::DescriptorReader;

    let mut reader = DescriptorReader::new();
    reader.start_file();
    reader.set_package(String::new());
    reader.start_message();
    reader.set_message_name("M".to_owned()).unwrap();
    reader.start_field();
    reader.set_field_name("f".to_owned());
    reader.set_field_number(1);
    reader.set_field_type(Type::Message);
    let err = reader.end_field().unwrap_err();
    assert!(err.to_string().contains("has no type_name"));
}

#[test]
fn scalar_field_with_stray_type_name_is_rejected() {
    use protoschema_reader::DescriptorReader;

    let mut reader = DescriptorReader::new();
    reader.start_file();
    reader.set_package(String::new());
    reader.start_message();
    reader.set_message_name("M".to_owned()).unwrap();
    reader.start_field();
    reader.set_field_name("f".to_owned());
    reader.set_field_number(1);
    reader.set_field_type(Type::Int32);
    reader.set_field_type_name(".test.M".to_owned());
    let err = reader.end_field().unwrap_err();
    assert!(err
        .to_string()
        .contains("is not a message or enum type"));
}

#[test]
fn empty_enum_is_rejected() {
    use protoschema_reader::DescriptorReader;

    let mut reader = DescriptorReader::new();
    reader.start_file();
    reader.set_package(String::new());
    reader.start_enum();
    reader.set_enum_name("E".to_owned()).unwrap();
    let err = reader.end_enum().unwrap_err();
    assert_eq!(err.to_string(), "Enum 'E' had no values.");
}

proptest! {
    /// A message name that round-trips through decode always produces a qualified name ending
    /// in the original unqualified name, regardless of how deeply it was nested.
    #[test]
    fn full_name_always_ends_with_bare_name(def_index in 0..DEFS.len()) {
        let def = &DEFS[def_index];
        prop_assert!(def.full_name().ends_with(def.name()));
        prop_assert!(def.full_name().starts_with("test."));
    }
}
