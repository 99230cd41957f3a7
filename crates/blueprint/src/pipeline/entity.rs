//! Entity building
//!
//! Entities are ephemeral render units borrowed from a [`Document`]. They
//! are rebuilt on every render call and never stored. Diagram backends use
//! [`DiagramEntityBuilder`], which buckets nodes into namespace, regular and
//! empty-namespace entities; the JSON backend uses
//! [`StructureEntityBuilder`], one entity per top-level node.

use tracing::{debug, trace};

use super::namespace::NamespaceResolver;
use crate::core::{flatten_name, short_name, Database, DiagramError, NAMESPACE_SEPARATOR};
use crate::model::{
    ordered_methods, ClassNode, Composite, Document, InnerClassKind, MethodNode, ModuleNode, Node,
};

/// Discriminant of an [`Entity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Class,
    Module,
    ModuleAsClass,
    Namespace,
    EmptyNamespace,
    Structure,
}

/// A renderable view over part of a document
#[derive(Debug, Clone, PartialEq)]
pub enum Entity<'a> {
    /// Class box; inside a namespace it is named by its last segment
    Class {
        class: &'a ClassNode,
        in_namespace: bool,
    },
    /// Module box, used while the document has no namespaces
    Module(&'a ModuleNode),
    /// Module drawn as a plain class box once namespaces exist
    ModuleAsClass(&'a ModuleNode),
    /// Namespace container with its directly assigned classes
    Namespace {
        original: &'a str,
        classes: Vec<&'a ClassNode>,
    },
    /// Stub for a namespace without members
    EmptyNamespace { original: &'a str },
    /// Whole top-level node, for the structure dump
    Structure(&'a Node),
}

impl<'a> Entity<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Class { .. } => EntityKind::Class,
            Entity::Module(_) => EntityKind::Module,
            Entity::ModuleAsClass(_) => EntityKind::ModuleAsClass,
            Entity::Namespace { .. } => EntityKind::Namespace,
            Entity::EmptyNamespace { .. } => EntityKind::EmptyNamespace,
            Entity::Structure(_) => EntityKind::Structure,
        }
    }

    /// Declared name this entity stands for
    pub fn original_name(&self) -> &'a str {
        match self {
            Entity::Class { class, .. } => &class.name,
            Entity::Module(module) | Entity::ModuleAsClass(module) => &module.name,
            Entity::Namespace { original, .. } | Entity::EmptyNamespace { original } => *original,
            Entity::Structure(node) => node.name().unwrap_or(""),
        }
    }

    /// Identifier used in diagram syntax
    pub fn name(&self) -> String {
        match self {
            Entity::Class {
                class,
                in_namespace: true,
            } => flatten_name(short_name(&class.name)),
            _ => flatten_name(self.original_name()),
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self, Entity::Namespace { .. } | Entity::EmptyNamespace { .. })
    }

    /// Methods in display order
    pub fn methods(&self) -> Vec<&'a MethodNode> {
        match self {
            Entity::Class { class, .. } => ordered_methods(class.methods()),
            Entity::Module(module) | Entity::ModuleAsClass(module) => {
                ordered_methods(module.methods())
            }
            Entity::Structure(node) => ordered_methods(node.methods()),
            Entity::Namespace { .. } | Entity::EmptyNamespace { .. } => Vec::new(),
        }
    }

    /// Pseudo-methods standing in for method-class inner classes
    ///
    /// A method class is drawn as one public method named after the inner
    /// class, returning what its class-level `execute` returns.
    pub fn method_class_signatures(&self) -> Vec<MethodNode> {
        let Entity::Class { class, .. } = self else {
            return Vec::new();
        };
        class
            .inner_classes
            .iter()
            .filter(|inner| inner.inner_class_kind() == InnerClassKind::Method)
            .filter_map(|inner| {
                inner.execute_return_type().map(|return_type| {
                    MethodNode::new(short_name(&inner.name)).with_return_type(return_type)
                })
            })
            .collect()
    }

    /// Whether class methods carry the backend's static marker
    pub fn shows_static(&self) -> bool {
        !matches!(self, Entity::ModuleAsClass(_))
    }
}

/// Builds the three diagram buckets
#[derive(Debug, Clone)]
pub struct DiagramEntityBuilder<'a> {
    document: &'a Document,
    resolver: NamespaceResolver<'a>,
}

impl<'a> DiagramEntityBuilder<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            resolver: NamespaceResolver::new(document),
        }
    }

    pub fn resolver(&self) -> &NamespaceResolver<'a> {
        &self.resolver
    }

    /// Namespace, regular, then empty-namespace entities
    pub fn build(&self) -> Result<Vec<Entity<'a>>, DiagramError> {
        let mut entities = self.namespace_entities();
        let namespace_count = entities.len();
        entities.extend(self.regular_entities()?);
        let regular_count = entities.len() - namespace_count;
        let empty = self.empty_namespace_entities();
        debug!(
            namespaces = namespace_count,
            regular = regular_count,
            empty_namespaces = empty.len(),
            "Built diagram entities"
        );
        entities.extend(empty);
        Ok(entities)
    }

    pub fn namespace_entities(&self) -> Vec<Entity<'a>> {
        self.resolver
            .assign_classes_to_namespaces()
            .into_iter()
            .map(|(original, classes)| Entity::Namespace { original, classes })
            .collect()
    }

    /// Top-level nodes drawn outside any namespace
    ///
    /// Qualified classes that no namespace encloses are kept here under
    /// their flattened name.
    pub fn regular_entities(&self) -> Result<Vec<Entity<'a>>, DiagramError> {
        let has_namespaces = self.resolver.has_namespaces();
        let mut entities = Vec::new();

        for node in self.document.nodes() {
            let entity = match node {
                Node::Class(class) => {
                    let qualified = class.name.contains(NAMESPACE_SEPARATOR);
                    if qualified && self.resolver.namespace_of(&class.name).is_some() {
                        continue;
                    }
                    Entity::Class {
                        class,
                        in_namespace: false,
                    }
                }
                Node::Module(module) if !self.resolver.is_regular(node) => {
                    trace!(module = %module.name, "Skipping namespace module");
                    continue;
                }
                Node::Module(module) if has_namespaces => Entity::ModuleAsClass(module),
                Node::Module(module) => Entity::Module(module),
                other => {
                    return Err(DiagramError::invariant_violation(format!(
                        "unexpected top-level {} node",
                        other.kind()
                    )))
                }
            };
            entities.push(entity);
        }

        Ok(entities)
    }

    pub fn empty_namespace_entities(&self) -> Vec<Entity<'a>> {
        self.resolver
            .empty_namespaces()
            .into_iter()
            .map(|original| Entity::EmptyNamespace { original })
            .collect()
    }
}

/// Builds one entity per top-level node
///
/// Every class comes before every module; each group keeps declaration order.
#[derive(Debug, Clone, Copy)]
pub struct StructureEntityBuilder<'a> {
    document: &'a Document,
}

impl<'a> StructureEntityBuilder<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn build(&self) -> Result<Vec<Entity<'a>>, DiagramError> {
        let mut classes = Vec::new();
        let mut modules = Vec::new();
        for node in self.document.nodes() {
            match node {
                Node::Class(_) => classes.push(Entity::Structure(node)),
                Node::Module(_) => modules.push(Entity::Structure(node)),
                other => {
                    return Err(DiagramError::invariant_violation(format!(
                        "unexpected top-level {} node",
                        other.kind()
                    )))
                }
            }
        }
        classes.append(&mut modules);
        Ok(classes)
    }
}
