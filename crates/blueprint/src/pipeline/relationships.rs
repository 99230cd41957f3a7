//! Relationship inference
//!
//! Derives inheritance, delegation, include and extend edges from node
//! attributes. Inference is a heuristic over type names and never fails.

use tracing::trace;

use crate::core::RelationshipKind;
use crate::model::{ClassNode, Composite, ModuleNode, Node, Relationship};

const BUILTIN_TYPES: &[&str] = &[
    "String", "Integer", "Float", "Array", "Hash", "Time", "IO", "bool", "void", "nil",
];

/// Whether a type name is excluded from delegation inference
///
/// Matches the literal builtin set, `Array[..]`/`Hash[..]` and any other
/// generic instantiation, and union types. Custom generics are
/// misclassified as builtin.
pub fn is_builtin_type(type_name: &str) -> bool {
    if type_name.is_empty() || BUILTIN_TYPES.contains(&type_name) {
        return true;
    }
    type_name.contains('|') || is_generic_instantiation(type_name)
}

/// An identifier immediately followed by `[`
fn is_generic_instantiation(type_name: &str) -> bool {
    let ident_len = type_name
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(type_name.len());
    ident_len > 0 && type_name[ident_len..].starts_with('[')
}

/// Infers relationship edges for declaration nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipInferencer;

impl RelationshipInferencer {
    pub fn new() -> Self {
        Self
    }

    /// Edges for a top-level node and, for classes, its inner classes
    pub fn infer(&self, node: &Node) -> Vec<Relationship> {
        match node {
            Node::Class(class) | Node::InnerClass(class) => class
                .walk()
                .into_iter()
                .flat_map(|class| self.infer_class(class))
                .collect(),
            Node::Module(module) => self.infer_module(module),
            _ => Vec::new(),
        }
    }

    /// Edges declared directly on one class
    pub fn infer_class(&self, class: &ClassNode) -> Vec<Relationship> {
        let mut edges = Vec::new();

        if let Some(superclass) = &class.superclass {
            edges.push(Relationship::new(
                RelationshipKind::Inheritance,
                superclass.clone(),
                class.name.clone(),
            ));
        }

        for method in class.methods() {
            if method.is_nullary() && !is_builtin_type(&method.return_type) {
                trace!(class = %class.name, method = %method.name, target = %method.return_type, "Inferred delegation");
                edges.push(Relationship::new(
                    RelationshipKind::Delegation,
                    class.name.clone(),
                    method.return_type.clone(),
                ));
            }
        }

        edges.extend(mixin_edges(&class.name, &class.includes, &class.extends));
        edges
    }

    /// Edges declared on a module; modules never inherit or delegate
    pub fn infer_module(&self, module: &ModuleNode) -> Vec<Relationship> {
        mixin_edges(&module.name, &module.includes, &module.extends)
    }
}

fn mixin_edges(name: &str, includes: &[String], extends: &[String]) -> Vec<Relationship> {
    let includes = includes
        .iter()
        .map(|target| Relationship::new(RelationshipKind::Include, target.clone(), name));
    let extends = extends
        .iter()
        .map(|target| Relationship::new(RelationshipKind::Extend, target.clone(), name));
    includes.chain(extends).collect()
}
