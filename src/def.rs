use prost_types::field_descriptor_proto::{Label, Type};

use crate::default_value::DefaultValue;

/// A single entry in the flattened definition graph produced by reading a
/// `FileDescriptorSet`: either a message or an enum.
///
/// Definitions are stored in the order their containing messages/enums were closed during the
/// parse, exactly mirroring `upb`'s `upb_deflist`: a message is pushed once its own record is
/// created, long before its nested types and fields are fully known, and is mutated in place as
/// those children complete.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// A `message` definition.
    Message(MessageDef),
    /// An `enum` definition.
    Enum(EnumDef),
}

impl Definition {
    /// The unqualified name of this definition, as it appeared in the source `.proto` file.
    pub fn name(&self) -> &str {
        match self {
            Definition::Message(msg) => &msg.name,
            Definition::Enum(en) => &en.name,
        }
    }

    /// The fully qualified, dot-separated name of this definition, assigned once its enclosing
    /// scope closes.
    pub fn full_name(&self) -> &str {
        match self {
            Definition::Message(msg) => &msg.full_name,
            Definition::Enum(en) => &en.full_name,
        }
    }

    pub(crate) fn as_message_mut(&mut self) -> Option<&mut MessageDef> {
        match self {
            Definition::Message(msg) => Some(msg),
            Definition::Enum(_) => None,
        }
    }

    /// Prepends `prefix` to this definition's already-assigned `full_name`.
    ///
    /// Relies on the invariant that nested definitions always close (and so have `full_name`
    /// set to at least their own bare name) before their enclosing scope does, so by the time an
    /// enclosing message or file applies its own prefix here, there is always something to
    /// prepend to.
    pub(crate) fn qualify(&mut self, prefix: &str) {
        if prefix.is_empty() {
            return;
        }
        let full_name = match self {
            Definition::Message(msg) => &mut msg.full_name,
            Definition::Enum(en) => &mut en.full_name,
        };
        *full_name = format!("{}.{}", prefix, full_name);
    }
}

/// A `message` definition: its own name plus the fields declared directly on it.
///
/// Nested messages and enums are not stored inside their parent; they appear as their own
/// [`Definition`] entries in the surrounding [`DefList`](crate::reader::DescriptorReader), in the
/// order they were closed, with their `full_name` reflecting the nesting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageDef {
    /// Unqualified message name.
    pub name: String,
    /// Fully qualified, dot-separated name. Empty until the enclosing scope closes.
    pub full_name: String,
    /// The fields declared directly in this message, in declaration order.
    pub fields: Vec<FieldDef>,
}

/// A single field of a [`MessageDef`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name, as declared.
    pub name: String,
    /// Field number (tag). Always non-zero; `0` is rejected during parsing.
    pub number: i32,
    /// Cardinality: `OPTIONAL`, `REQUIRED`, or `REPEATED`.
    pub label: Label,
    /// The wire type of this field's value.
    pub kind: Type,
    /// For `TYPE_MESSAGE`/`TYPE_GROUP`/`TYPE_ENUM` fields, the fully qualified name of the
    /// referenced type, copied verbatim from the descriptor. Name resolution against the rest
    /// of the graph is not performed here.
    pub type_name: Option<String>,
    /// The field's default value, if one was declared. `TYPE_MESSAGE`/`TYPE_GROUP` fields can
    /// never have one.
    pub default: Option<DefaultValue>,
}

/// An `enum` definition: its own name plus its declared values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumDef {
    /// Unqualified enum name.
    pub name: String,
    /// Fully qualified, dot-separated name. Empty until the enclosing scope closes.
    pub full_name: String,
    /// The values declared on this enum, in declaration order. Never empty: an enum with zero
    /// values is rejected during parsing.
    pub values: Vec<EnumValueDef>,
}

impl EnumDef {
    /// The value that would be used as this enum's implicit default, i.e. the first declared
    /// value. Only meaningful once the enum is fully read; an enum always has at least one
    /// value by the time it appears in a completed [`DefList`](crate::reader::DescriptorReader).
    pub fn default_value(&self) -> Option<&EnumValueDef> {
        self.values.first()
    }
}

/// A single named value of an [`EnumDef`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDef {
    /// Value name.
    pub name: String,
    /// Value number. May repeat across values of the same enum (aliasing) and may be negative.
    pub number: i32,
}

/// The append-only, index-stable list of [`Definition`]s assembled while reading a
/// `FileDescriptorSet`.
///
/// This plays the role of `upb`'s `upb_deflist`: messages and enums are pushed as soon as their
/// own record is created (before their fields/values are known), and `qualify` rewrites a
/// trailing run of entries' `full_name` in a single pass once their enclosing scope closes.
/// Unlike the C original, there is no `owned` flag to track: `into_defs` consumes `self`, so the
/// list can never be read from or extended after being handed to a caller.
#[derive(Debug, Default)]
pub struct DefList {
    defs: Vec<Definition>,
}

impl DefList {
    pub(crate) fn new() -> Self {
        DefList { defs: Vec::new() }
    }

    pub(crate) fn push(&mut self, def: Definition) {
        self.defs.push(def);
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Definition> {
        self.defs.get_mut(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.defs.len()
    }

    /// Rewrite the `full_name` of every definition from `start_index` to the end of the list,
    /// qualifying each with `prefix`. Called exactly once per scope, when that scope's closing
    /// callback fires.
    pub(crate) fn qualify(&mut self, start_index: usize, prefix: &str) {
        for def in &mut self.defs[start_index..] {
            def.qualify(prefix);
        }
    }

    /// Consume the list, handing ownership of every definition to the caller. This is the only
    /// way to get definitions back out of a [`DefList`]; there is no borrowing accessor, mirroring
    /// the "donate" contract of the original reader.
    pub(crate) fn into_defs(self) -> Vec<Definition> {
        self.defs
    }
}
