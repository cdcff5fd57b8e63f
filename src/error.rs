use std::fmt;

/// An error that occurs while reading a `FileDescriptorSet` into a definition graph.
///
/// Once a reader has returned an error, it must be discarded: the error is sticky, and no
/// further callback on the same reader will be attempted.
#[derive(Debug)]
pub struct SchemaError {
    kind: SchemaErrorKind,
}

#[derive(Debug)]
enum SchemaErrorKind {
    DecodeFileDescriptorSet {
        err: prost::DecodeError,
    },
    MessageMissingName,
    EnumMissingName,
    EnumEmpty {
        name: String,
    },
    EnumValueIncomplete {
        enum_name: String,
    },
    FieldMissingName {
        message: String,
    },
    FieldMissingNumber {
        message: String,
        field: String,
    },
    FieldMissingType {
        message: String,
        field: String,
    },
    FieldMissingTypeName {
        message: String,
        field: String,
    },
    FieldUnexpectedTypeName {
        message: String,
        field: String,
    },
    SubmessageDefault {
        message: String,
        field: String,
    },
    InvalidDefaultValue {
        message: String,
        field: String,
        value: String,
    },
}

impl SchemaError {
    pub(crate) fn decode_file_descriptor_set(err: prost::DecodeError) -> Self {
        SchemaError {
            kind: SchemaErrorKind::DecodeFileDescriptorSet { err },
        }
    }

    pub(crate) fn message_missing_name() -> Self {
        SchemaError {
            kind: SchemaErrorKind::MessageMissingName,
        }
    }

    pub(crate) fn enum_missing_name() -> Self {
        SchemaError {
            kind: SchemaErrorKind::EnumMissingName,
        }
    }

    pub(crate) fn enum_empty(name: &str) -> Self {
        SchemaError {
            kind: SchemaErrorKind::EnumEmpty {
                name: name.to_owned(),
            },
        }
    }

    pub(crate) fn enum_value_incomplete(enum_name: &str) -> Self {
        SchemaError {
            kind: SchemaErrorKind::EnumValueIncomplete {
                enum_name: enum_name.to_owned(),
            },
        }
    }

    pub(crate) fn field_missing_name(message: &str) -> Self {
        SchemaError {
            kind: SchemaErrorKind::FieldMissingName {
                message: message.to_owned(),
            },
        }
    }

    pub(crate) fn field_missing_number(message: &str, field: &str) -> Self {
        SchemaError {
            kind: SchemaErrorKind::FieldMissingNumber {
                message: message.to_owned(),
                field: field.to_owned(),
            },
        }
    }

    pub(crate) fn field_missing_type(message: &str, field: &str) -> Self {
        SchemaError {
            kind: SchemaErrorKind::FieldMissingType {
                message: message.to_owned(),
                field: field.to_owned(),
            },
        }
    }

    pub(crate) fn field_missing_type_name(message: &str, field: &str) -> Self {
        SchemaError {
            kind: SchemaErrorKind::FieldMissingTypeName {
                message: message.to_owned(),
                field: field.to_owned(),
            },
        }
    }

    pub(crate) fn field_unexpected_type_name(message: &str, field: &str) -> Self {
        SchemaError {
            kind: SchemaErrorKind::FieldUnexpectedTypeName {
                message: message.to_owned(),
                field: field.to_owned(),
            },
        }
    }

    pub(crate) fn submessage_default(message: &str, field: &str) -> Self {
        SchemaError {
            kind: SchemaErrorKind::SubmessageDefault {
                message: message.to_owned(),
                field: field.to_owned(),
            },
        }
    }

    pub(crate) fn invalid_default_value(message: &str, field: &str, value: &str) -> Self {
        SchemaError {
            kind: SchemaErrorKind::InvalidDefaultValue {
                message: message.to_owned(),
                field: field.to_owned(),
                value: value.to_owned(),
            },
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SchemaErrorKind::DecodeFileDescriptorSet { .. } => {
                write!(f, "failed to decode file descriptor set")
            }
            SchemaErrorKind::MessageMissingName => write!(f, "Encountered message with no name."),
            SchemaErrorKind::EnumMissingName => write!(f, "Enum had no name."),
            SchemaErrorKind::EnumEmpty { name } => write!(f, "Enum '{}' had no values.", name),
            SchemaErrorKind::EnumValueIncomplete { enum_name } => write!(
                f,
                "Enum value missing name or number in enum '{}'.",
                enum_name
            ),
            SchemaErrorKind::FieldMissingName { message } => {
                write!(f, "Field in message '{}' has no name.", message)
            }
            SchemaErrorKind::FieldMissingNumber { message, field } => write!(
                f,
                "Field '{}' in message '{}' has no number.",
                field, message
            ),
            SchemaErrorKind::FieldMissingType { message, field } => {
                write!(f, "Field '{}' in message '{}' has no type.", field, message)
            }
            SchemaErrorKind::FieldMissingTypeName { message, field } => write!(
                f,
                "Field '{}' in message '{}' is a message or enum type but has no type_name.",
                field, message
            ),
            SchemaErrorKind::FieldUnexpectedTypeName { message, field } => write!(
                f,
                "Field '{}' in message '{}' has a type_name but is not a message or enum type.",
                field, message
            ),
            SchemaErrorKind::SubmessageDefault { message, field } => write!(
                f,
                "Submessages cannot have defaults: field '{}' in message '{}'.",
                field, message
            ),
            SchemaErrorKind::InvalidDefaultValue {
                message,
                field,
                value,
            } => write!(
                f,
                "Error converting default value '{}' for field '{}' in message '{}'.",
                value, field, message
            ),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            SchemaErrorKind::DecodeFileDescriptorSet { err } => Some(err),
            _ => None,
        }
    }
}
