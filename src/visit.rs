//! Replays an already-decoded [`FileDescriptorSet`] through a [`DescriptorReader`] as a sequence
//! of push-style callbacks, in the same field-number order the descriptor messages declare:
//! `message_type` then `enum_type` within a file, and `field` then `nested_type` then
//! `enum_type` within a message. This is the realization of the handler-registry/dispatch-table
//! role described for the generic decoder: since `prost_types` has already resolved every field
//! to a typed struct member, there is no runtime field-number lookup left to do, only a walk.

use prost_types::{
    field_descriptor_proto, DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto,
    FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet,
};

use crate::def::Definition;
use crate::error::SchemaError;
use crate::reader::DescriptorReader;

/// Builds a definition graph from an already-decoded [`FileDescriptorSet`].
///
/// This is the entry point for callers who already have a [`FileDescriptorSet`] in hand, for
/// example one produced by `prost-build` at compile time. Callers starting from raw bytes should
/// use [`crate::read_file_descriptor_set_bytes`] instead.
pub fn read_file_descriptor_set(
    file_descriptor_set: FileDescriptorSet,
) -> Result<Vec<Definition>, SchemaError> {
    let mut reader = DescriptorReader::new();
    for file in &file_descriptor_set.file {
        visit_file(&mut reader, file)?;
    }
    Ok(reader.into_defs())
}

fn visit_file(reader: &mut DescriptorReader, file: &FileDescriptorProto) -> Result<(), SchemaError> {
    reader.start_file();
    reader.set_package(file.package.clone().unwrap_or_default());

    for message in &file.message_type {
        visit_message(reader, message)?;
    }
    for en in &file.enum_type {
        visit_enum(reader, en)?;
    }

    reader.end_file()
}

fn visit_message(reader: &mut DescriptorReader, message: &DescriptorProto) -> Result<(), SchemaError> {
    reader.start_message();
    if let Some(name) = &message.name {
        reader.set_message_name(name.clone())?;
    }

    for field in &message.field {
        visit_field(reader, field)?;
    }
    for nested in &message.nested_type {
        visit_message(reader, nested)?;
    }
    for en in &message.enum_type {
        visit_enum(reader, en)?;
    }

    reader.end_message()
}

fn visit_field(reader: &mut DescriptorReader, field: &FieldDescriptorProto) -> Result<(), SchemaError> {
    reader.start_field();

    if let Some(name) = &field.name {
        reader.set_field_name(name.clone());
    }
    if let Some(number) = field.number {
        reader.set_field_number(number);
    }
    reader.set_field_label(field.label());
    if let Some(kind) = field
        .r#type
        .and_then(field_descriptor_proto::Type::from_i32)
    {
        reader.set_field_type(kind);
    }
    if let Some(type_name) = &field.type_name {
        reader.set_field_type_name(type_name.clone());
    }
    if let Some(default_value) = &field.default_value {
        reader.set_field_default_value(default_value.clone());
    }

    reader.end_field()
}

fn visit_enum(reader: &mut DescriptorReader, en: &EnumDescriptorProto) -> Result<(), SchemaError> {
    reader.start_enum();
    if let Some(name) = &en.name {
        reader.set_enum_name(name.clone())?;
    }

    for value in &en.value {
        visit_enum_value(reader, value)?;
    }

    reader.end_enum()
}

fn visit_enum_value(
    reader: &mut DescriptorReader,
    value: &EnumValueDescriptorProto,
) -> Result<(), SchemaError> {
    reader.start_enum_value();
    if let Some(name) = &value.name {
        reader.set_enum_value_name(name.clone());
    }
    if let Some(number) = value.number {
        reader.set_enum_value_number(number);
    }
    reader.end_enum_value()
}
