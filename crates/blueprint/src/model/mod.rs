//! Normalized declaration model
//!
//! Pure data: classes, modules, methods and the relationships inferred
//! between them, plus the [`Document`] container that holds one parsed input.

mod document;
mod method;
mod node;

pub use document::Document;
pub use method::{ordered_methods, Block, MethodNode, OverloadSignature, Parameter};
pub use node::{ClassNode, Composite, InnerClassKind, ModuleNode, Node, NodeKind, Relationship};
