//! Schema ingestion for a minimalist protocol-buffers runtime.
//!
//! This crate turns a serialized [`prost_types::FileDescriptorSet`] into an in-memory,
//! cross-linked graph of [`MessageDef`]/[`EnumDef`] definitions: messages with their fields,
//! enums with their values, and fully qualified, dot-separated names assigned according to the
//! nesting the original `.proto` source declared.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("descriptor_set.bin")?;
//! let defs = protoschema_reader::read_file_descriptor_set_bytes(&bytes)?;
//! for def in &defs {
//!     println!("{}", def.full_name());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Decoding the wire bytes themselves is handled by [`prost`]; this crate's own work starts once
//! a [`prost_types::FileDescriptorSet`] tree exists, walking it in a single pass to build the
//! definition graph and enforce the schema invariants described on [`MessageDef`], [`FieldDef`],
//! and [`EnumDef`].
//!
//! Out of scope: services, extensions, source-location info, field/message options, oneofs, and
//! map fields are all ignored wherever they appear in the input. Symbol resolution (turning a
//! field's `type_name` into a reference to the [`MessageDef`]/[`EnumDef`] it names) is left to
//! callers; this crate only builds the flat list of definitions with their qualified names.

#![deny(missing_debug_implementations, missing_docs)]

mod builder;
mod def;
mod default_value;
mod error;
mod reader;
mod scope;
mod visit;

pub use def::{Definition, EnumDef, EnumValueDef, FieldDef, MessageDef};
pub use default_value::DefaultValue;
pub use error::SchemaError;
pub use prost_types::field_descriptor_proto::{Label, Type};
pub use reader::DescriptorReader;
pub use visit::read_file_descriptor_set;

use prost::Message;
use prost_types::FileDescriptorSet;

/// Decodes a wire-format `FileDescriptorSet` and builds a definition graph from it in one step.
///
/// This is the usual entry point: most callers have raw bytes (read from a file, received over a
/// socket, embedded with `include_bytes!`) rather than an already-decoded
/// [`FileDescriptorSet`].
pub fn read_file_descriptor_set_bytes(bytes: &[u8]) -> Result<Vec<Definition>, SchemaError> {
    let file_descriptor_set =
        FileDescriptorSet::decode(bytes).map_err(SchemaError::decode_file_descriptor_set)?;
    read_file_descriptor_set(file_descriptor_set)
}
