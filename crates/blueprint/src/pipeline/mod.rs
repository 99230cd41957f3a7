//! Processing pipeline stages
//!
//! translate → infer relationships → resolve namespaces → build entities →
//! render → assemble. Each stage is a pure function of its input.

pub mod assembler;
pub mod declaration;
pub mod entity;
pub mod namespace;
mod parser;
pub mod relationships;
pub mod translator;

pub use assembler::OutputAssembler;
pub use declaration::{read_declarations, Declaration};
pub use entity::{DiagramEntityBuilder, Entity, EntityKind, StructureEntityBuilder};
pub use namespace::NamespaceResolver;
pub use parser::DeclarationParser;
pub use relationships::{is_builtin_type, RelationshipInferencer};
pub use translator::Translator;
