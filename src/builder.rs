use prost_types::field_descriptor_proto::{Label, Type};

use crate::def::{EnumValueDef, FieldDef};
use crate::default_value;
use crate::error::SchemaError;

/// Accumulates the pieces of a single field declaration as they arrive from the decoder, in
/// whatever order the wire format delivers them, and validates + assembles them into a
/// [`FieldDef`] once the field's enclosing submessage closes.
///
/// The central subtlety this builder exists to handle: a field's `default_value` is wire tag 7
/// and its `type` is wire tag 5, so a decoder is free to deliver `default_value` before `type`.
/// Parsing the default eagerly as it arrives would mean guessing at a type that might still
/// change; instead the raw text is held until [`finish`](Self::finish), once every setter for
/// this field has necessarily already fired.
#[derive(Debug, Default)]
pub(crate) struct FieldBuilder {
    name: Option<String>,
    number: Option<i32>,
    label: Option<Label>,
    kind: Option<Type>,
    type_name: Option<String>,
    default_value_raw: Option<String>,
}

impl FieldBuilder {
    pub(crate) fn new() -> Self {
        FieldBuilder::default()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn set_number(&mut self, number: i32) {
        self.number = Some(number);
    }

    pub(crate) fn set_label(&mut self, label: Label) {
        self.label = Some(label);
    }

    pub(crate) fn set_type(&mut self, kind: Type) {
        self.kind = Some(kind);
    }

    pub(crate) fn set_type_name(&mut self, type_name: String) {
        self.type_name = Some(type_name);
    }

    pub(crate) fn set_default_value(&mut self, raw: String) {
        self.default_value_raw = Some(raw);
    }

    /// Validates the accumulated field state and builds a [`FieldDef`]. `message_name` is used
    /// only to produce readable error messages.
    pub(crate) fn finish(self, message_name: &str) -> Result<FieldDef, SchemaError> {
        let name = self
            .name
            .ok_or_else(|| SchemaError::field_missing_name(message_name))?;
        let number = self
            .number
            .ok_or_else(|| SchemaError::field_missing_number(message_name, &name))?;
        let kind = self
            .kind
            .ok_or_else(|| SchemaError::field_missing_type(message_name, &name))?;
        let label = self.label.unwrap_or(Label::Optional);

        // `(kind == MESSAGE || kind == ENUM) <=> type_name is set`.
        let needs_type_name = matches!(kind, Type::Message | Type::Enum);
        match (&self.type_name, needs_type_name) {
            (None, true) => {
                return Err(SchemaError::field_missing_type_name(message_name, &name))
            }
            (Some(_), false) => {
                return Err(SchemaError::field_unexpected_type_name(message_name, &name))
            }
            _ => {}
        }

        let default = match self.default_value_raw {
            Some(raw) => {
                if matches!(kind, Type::Message | Type::Group) {
                    return Err(SchemaError::submessage_default(message_name, &name));
                }
                let value = default_value::parse(kind, &raw).map_err(|()| {
                    SchemaError::invalid_default_value(message_name, &name, &raw)
                })?;
                Some(value)
            }
            None => None,
        };

        Ok(FieldDef {
            name,
            number,
            label,
            kind,
            type_name: self.type_name,
            default,
        })
    }
}

/// Accumulates a single enum value declaration (`name`, `number`) until its enclosing enum
/// closes.
#[derive(Debug, Default)]
pub(crate) struct EnumValueBuilder {
    name: Option<String>,
    number: Option<i32>,
}

impl EnumValueBuilder {
    pub(crate) fn new() -> Self {
        EnumValueBuilder::default()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn set_number(&mut self, number: i32) {
        self.number = Some(number);
    }

    pub(crate) fn finish(self, enum_name: &str) -> Result<EnumValueDef, SchemaError> {
        match (self.name, self.number) {
            (Some(name), Some(number)) => Ok(EnumValueDef { name, number }),
            _ => Err(SchemaError::enum_value_incomplete(enum_name)),
        }
    }
}
