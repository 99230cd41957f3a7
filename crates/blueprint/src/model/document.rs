//! Document: the node model container
//!
//! A [`Document`] holds the ordered top-level class and module declarations
//! of one invocation. It is built once by the parser and then only read.

use anyhow::Result;
use indexmap::IndexSet;
use tracing::trace;

use super::node::{ClassNode, ModuleNode, Node, Relationship};
use crate::core::{Database, DiagramError};

/// Ordered collection of top-level declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level classes in declaration order
    pub fn classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Class(class) => Some(class),
            _ => None,
        })
    }

    /// Top-level modules in declaration order
    pub fn modules(&self) -> impl Iterator<Item = &ModuleNode> {
        self.nodes.iter().filter_map(Node::as_module)
    }

    /// De-duplicated relationships in first-seen order
    pub fn relationships(&self) -> Vec<&Relationship> {
        let unique: IndexSet<&Relationship> = self
            .nodes
            .iter()
            .flat_map(|node| node.relationships())
            .collect();
        unique.into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every inferred relationship, keeping the declarations
    pub fn clear_relationships(&mut self) {
        for node in &mut self.nodes {
            match node {
                Node::Class(class) | Node::InnerClass(class) => class.clear_relationships(),
                Node::Module(module) => module.clear_relationships(),
                _ => {}
            }
        }
    }

    fn owner_children_mut(&mut self, name: &str) -> Option<&mut Vec<Node>> {
        for node in &mut self.nodes {
            match node {
                Node::Class(class) | Node::InnerClass(class) if class.owns(name) => {
                    return class.children_for_mut(name);
                }
                Node::Module(module) if module.name == name => {
                    return Some(module.children_mut());
                }
                _ => {}
            }
        }
        None
    }
}

impl Database for Document {
    type Node = Node;
    type Edge = Relationship;

    fn add_node(&mut self, node: Node) -> Result<()> {
        trace!(kind = %node.kind(), name = node.name().unwrap_or(""), "Adding node");
        self.nodes.push(node);
        Ok(())
    }

    /// Attach an edge to the node that owns it
    ///
    /// Delegation edges are owned by `from`, all other kinds by `to`.
    fn add_edge(&mut self, edge: Relationship) -> Result<()> {
        let owner = edge.owner().to_string();
        let children = self.owner_children_mut(&owner).ok_or_else(|| {
            DiagramError::database_error(format!(
                "No declaration named '{}' to own {} edge {} -> {}",
                owner, edge.kind, edge.from, edge.to
            ))
        })?;
        children.push(Node::Relationship(edge));
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.name() == Some(id))
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships().into_iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.relationships().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RelationshipKind;

    fn sample() -> Document {
        let mut document = Document::new();
        let mut outer = ClassNode::new("Outer");
        outer.inner_classes.push(ClassNode::new("Outer::Inner"));
        document.add_node(Node::Class(outer)).unwrap();
        document.add_node(Node::Module(ModuleNode::new("Helpers"))).unwrap();
        document
    }

    #[test]
    fn test_add_nodes() {
        let document = sample();
        assert_eq!(document.node_count(), 2);
        assert_eq!(document.classes().count(), 1);
        assert_eq!(document.modules().count(), 1);
        assert!(document.get_node("Helpers").is_some());
        assert!(document.get_node("Outer::Inner").is_none());
    }

    #[test]
    fn test_add_edge_to_inner_class() {
        let mut document = sample();
        document
            .add_edge(Relationship::new(
                RelationshipKind::Delegation,
                "Outer::Inner",
                "Logger",
            ))
            .unwrap();
        document
            .add_edge(Relationship::new(RelationshipKind::Include, "Comparable", "Helpers"))
            .unwrap();
        assert_eq!(document.edge_count(), 2);
    }

    #[test]
    fn test_add_edge_without_owner() {
        let mut document = sample();
        let err = document
            .add_edge(Relationship::new(RelationshipKind::Inheritance, "Base", "Missing"))
            .unwrap_err();
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_edges_are_deduplicated() {
        let mut document = sample();
        let edge = Relationship::new(RelationshipKind::Delegation, "Outer", "Logger");
        document.add_edge(edge.clone()).unwrap();
        document.add_edge(edge.clone()).unwrap();
        document
            .add_edge(Relationship::new(RelationshipKind::Delegation, "Outer", "Store"))
            .unwrap();

        let edges: Vec<&Relationship> = document.edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], &edge);
    }

    #[test]
    fn test_clear() {
        let mut document = sample();
        document
            .add_edge(Relationship::new(RelationshipKind::Delegation, "Outer", "Logger"))
            .unwrap();
        document.clear_relationships();
        assert_eq!(document.edge_count(), 0);
        assert_eq!(document.node_count(), 2);

        document.clear();
        assert!(document.is_empty());
    }
}
