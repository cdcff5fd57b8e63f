use prost_types::field_descriptor_proto::{Label, Type};

use crate::builder::{EnumValueBuilder, FieldBuilder};
use crate::def::{Definition, DefList, EnumDef, MessageDef};
use crate::error::SchemaError;
use crate::scope::ScopeStack;

/// Drives the incremental construction of a definition graph from a sequence of push-style
/// callbacks, one call per field of the underlying `FileDescriptorProto`/`DescriptorProto`/
/// `EnumDescriptorProto`/`FieldDescriptorProto`/`EnumValueDescriptorProto` messages.
///
/// Callers do not normally drive this directly — [`crate::read_file_descriptor_set`] replays an
/// already-decoded [`prost_types::FileDescriptorSet`] through these methods in the right order —
/// but the type is exposed so that a decoder which discovers fields in a different valid order
/// (or one driving the callbacks directly off the wire, without building a `prost_types` tree
/// first) can reuse the same state machine.
///
/// Every method returns `Result<(), SchemaError>`. As soon as one returns an error, the reader
/// must be discarded: no further call is valid, and this type makes that the only option by
/// consuming `self` in [`into_defs`](Self::into_defs) — there is nothing to "reset" a reader back
/// into a usable state after a failure, mirroring the fatal, non-recoverable error policy the
/// graph-building rules require.
#[derive(Debug)]
pub struct DescriptorReader {
    defs: DefList,
    scope: ScopeStack,
    file_start_index: usize,
    current_field: Option<FieldBuilder>,
    current_enum_index: Option<usize>,
    current_enum_value: Option<EnumValueBuilder>,
}

impl DescriptorReader {
    /// Creates a fresh reader with an empty definition graph.
    pub fn new() -> Self {
        DescriptorReader {
            defs: DefList::new(),
            scope: ScopeStack::new(),
            file_start_index: 0,
            current_field: None,
            current_enum_index: None,
            current_enum_value: None,
        }
    }

    /// Begins a `FileDescriptorProto`. Must be paired with [`end_file`](Self::end_file); files do
    /// not nest.
    pub fn start_file(&mut self) {
        self.file_start_index = self.defs.len();
    }

    /// Records the file's `package`, establishing the name prefix for every top-level message
    /// and enum declared in it. An empty package (the default) contributes no prefix.
    pub fn set_package(&mut self, package: String) {
        self.scope.set_package(package);
    }

    /// Closes a `FileDescriptorProto`, qualifying every definition declared directly in this file
    /// (and, transitively, every definition nested inside them, already relatively qualified by
    /// their own closing calls) with the file's package.
    pub fn end_file(&mut self) -> Result<(), SchemaError> {
        let package = self.scope.package().to_owned();
        self.defs.qualify(self.file_start_index, &package);
        Ok(())
    }

    /// Begins a `DescriptorProto`. Pushes a new, as-yet-unnamed [`MessageDef`] and opens a scope
    /// for its nested messages/enums/fields.
    pub fn start_message(&mut self) {
        self.defs.push(Definition::Message(MessageDef::default()));
        self.scope.enter(self.defs.len());
    }

    /// Records the message's `name`.
    pub fn set_message_name(&mut self, name: String) -> Result<(), SchemaError> {
        let msg = self.current_message_mut();
        msg.name = name;
        Ok(())
    }

    /// Closes a `DescriptorProto`: validates that a name was set, then qualifies every
    /// definition nested directly or transitively inside this message with the message's own
    /// (still-unqualified) name.
    pub fn end_message(&mut self) -> Result<(), SchemaError> {
        let start_index = self.scope.leave();
        let container_index = start_index - 1;

        let name = {
            let msg = self.defs.get_mut(container_index).unwrap().as_message_mut().unwrap();
            if msg.name.is_empty() {
                return Err(SchemaError::message_missing_name());
            }
            msg.full_name = msg.name.clone();
            msg.name.clone()
        };

        self.defs.qualify(start_index, &name);
        Ok(())
    }

    fn current_message_mut(&mut self) -> &mut MessageDef {
        let index = self
            .scope
            .container_index()
            .expect("set_message_name called outside a message scope");
        self.defs
            .get_mut(index)
            .and_then(Definition::as_message_mut)
            .expect("scope container index always refers to a MessageDef")
    }

    /// Begins a `FieldDescriptorProto` belonging to the currently open message.
    pub fn start_field(&mut self) {
        self.current_field = Some(FieldBuilder::new());
    }

    /// Records the field's `name`.
    pub fn set_field_name(&mut self, name: String) {
        self.field_builder().set_name(name);
    }

    /// Records the field's `number`.
    pub fn set_field_number(&mut self, number: i32) {
        self.field_builder().set_number(number);
    }

    /// Records the field's `label` (cardinality).
    pub fn set_field_label(&mut self, label: Label) {
        self.field_builder().set_label(label);
    }

    /// Records the field's `type`.
    pub fn set_field_type(&mut self, kind: Type) {
        self.field_builder().set_type(kind);
    }

    /// Records the field's `type_name`, present for `TYPE_MESSAGE`/`TYPE_ENUM`/`TYPE_GROUP`
    /// fields.
    pub fn set_field_type_name(&mut self, type_name: String) {
        self.field_builder().set_type_name(type_name);
    }

    /// Records the field's raw `default_value` text. Parsing against the field's `type` is
    /// deferred to [`end_field`](Self::end_field), since `type` is not guaranteed to have
    /// arrived yet.
    pub fn set_field_default_value(&mut self, default_value: String) {
        self.field_builder().set_default_value(default_value);
    }

    fn field_builder(&mut self) -> &mut FieldBuilder {
        self.current_field
            .as_mut()
            .expect("field setter called outside start_field/end_field")
    }

    /// Closes a `FieldDescriptorProto`: validates the accumulated state, resolves the deferred
    /// default value against the field's type, and appends the finished [`FieldDef`] to the
    /// currently open message.
    pub fn end_field(&mut self) -> Result<(), SchemaError> {
        let builder = self
            .current_field
            .take()
            .expect("end_field called without start_field");
        let message_name = self.current_message_mut().name.clone();
        let field = builder.finish(&message_name)?;
        self.current_message_mut().fields.push(field);
        Ok(())
    }

    /// Begins an `EnumDescriptorProto`. Enums do not open a name-qualification scope of their
    /// own: they cannot contain further messages or enums, so their only effect on qualification
    /// is being qualified themselves by whatever scope (message or file) encloses them.
    pub fn start_enum(&mut self) {
        self.defs.push(Definition::Enum(EnumDef::default()));
        self.current_enum_index = Some(self.defs.len() - 1);
    }

    /// Records the enum's `name`.
    pub fn set_enum_name(&mut self, name: String) -> Result<(), SchemaError> {
        self.current_enum_mut().name = name;
        Ok(())
    }

    /// Closes an `EnumDescriptorProto`: validates that a name was set and that at least one
    /// value was declared.
    pub fn end_enum(&mut self) -> Result<(), SchemaError> {
        let index = self
            .current_enum_index
            .take()
            .expect("end_enum called without start_enum");
        let en = self.enum_at_mut(index);
        if en.name.is_empty() {
            return Err(SchemaError::enum_missing_name());
        }
        if en.values.is_empty() {
            return Err(SchemaError::enum_empty(&en.name));
        }
        en.full_name = en.name.clone();
        Ok(())
    }

    fn current_enum_mut(&mut self) -> &mut EnumDef {
        let index = self
            .current_enum_index
            .expect("enum setter called outside start_enum/end_enum");
        self.enum_at_mut(index)
    }

    fn enum_at_mut(&mut self, index: usize) -> &mut EnumDef {
        match self.defs.get_mut(index).unwrap() {
            Definition::Enum(en) => en,
            Definition::Message(_) => unreachable!("current_enum_index always refers to an EnumDef"),
        }
    }

    /// Begins an `EnumValueDescriptorProto` belonging to the currently open enum.
    pub fn start_enum_value(&mut self) {
        self.current_enum_value = Some(EnumValueBuilder::new());
    }

    /// Records the enum value's `name`.
    pub fn set_enum_value_name(&mut self, name: String) {
        self.enum_value_builder().set_name(name);
    }

    /// Records the enum value's `number`.
    pub fn set_enum_value_number(&mut self, number: i32) {
        self.enum_value_builder().set_number(number);
    }

    fn enum_value_builder(&mut self) -> &mut EnumValueBuilder {
        self.current_enum_value
            .as_mut()
            .expect("enum value setter called outside start_enum_value/end_enum_value")
    }

    /// Closes an `EnumValueDescriptorProto`, validating that both a name and a number were set
    /// and appending the finished value to the currently open enum.
    pub fn end_enum_value(&mut self) -> Result<(), SchemaError> {
        let builder = self
            .current_enum_value
            .take()
            .expect("end_enum_value called without start_enum_value");
        let enum_name = self.current_enum_mut().name.clone();
        let value = builder.finish(&enum_name)?;
        self.current_enum_mut().values.push(value);
        Ok(())
    }

    /// The nesting depth of the message currently being read, for callers that want to enforce
    /// their own recursion limits on top of whatever the decoder already applies.
    pub fn depth(&self) -> usize {
        self.scope.depth()
    }

    /// Consumes the reader, handing every definition collected so far to the caller. This is the
    /// only way to retrieve the built graph; there is no borrowing accessor.
    pub fn into_defs(self) -> Vec<Definition> {
        self.defs.into_defs()
    }
}

impl Default for DescriptorReader {
    fn default() -> Self {
        DescriptorReader::new()
    }
}
