//! Namespace resolution
//!
//! Decides which modules act as namespaces, assigns every qualified class to
//! its deepest enclosing namespace, and flags namespaces that would render
//! as empty containers.

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::core::{Database, NAMESPACE_SEPARATOR};
use crate::model::{ClassNode, Document, Node};

/// Classes grouped by the namespace they render in
pub type NamespaceAssignment<'a> = IndexMap<&'a str, Vec<&'a ClassNode>>;

/// Namespace policy over one document
#[derive(Debug, Clone)]
pub struct NamespaceResolver<'a> {
    document: &'a Document,
    candidates: Vec<&'a str>,
}

impl<'a> NamespaceResolver<'a> {
    /// Collect namespace candidates from the document
    ///
    /// A module is a candidate when it is flagged as a namespace or when
    /// some declared node is qualified under it. A module declared more
    /// than once contributes a single candidate.
    pub fn new(document: &'a Document) -> Self {
        let mut candidates: IndexSet<&'a str> = IndexSet::new();
        for module in document.modules() {
            if module.is_namespace || has_descendant(document, &module.name) {
                candidates.insert(module.name.as_str());
            }
        }
        trace!(count = candidates.len(), "Resolved namespace candidates");

        Self {
            document,
            candidates: candidates.into_iter().collect(),
        }
    }

    /// Namespace candidates in declaration order
    pub fn candidates(&self) -> &[&'a str] {
        &self.candidates
    }

    pub fn has_namespaces(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn is_candidate(&self, name: &str) -> bool {
        self.candidates.iter().any(|candidate| *candidate == name)
    }

    /// Deepest candidate strictly enclosing a qualified name
    pub fn namespace_of(&self, name: &str) -> Option<&'a str> {
        self.candidates
            .iter()
            .copied()
            .filter(|candidate| is_nested_under(name, candidate))
            .max_by_key(|candidate| candidate.len())
    }

    /// Assign every class to its deepest enclosing namespace
    ///
    /// Namespaces are ordered by their first assigned class, classes keep
    /// declaration order. Unnamespaced classes are left out.
    pub fn assign_classes_to_namespaces(&self) -> NamespaceAssignment<'a> {
        let mut assignment: NamespaceAssignment<'a> = IndexMap::new();
        for class in self.document.classes() {
            if let Some(namespace) = self.namespace_of(&class.name) {
                trace!(class = %class.name, namespace, "Assigned class to namespace");
                assignment.entry(namespace).or_default().push(class);
            }
        }
        assignment
    }

    /// Candidates with no assigned class and no nested candidate
    pub fn empty_namespaces(&self) -> Vec<&'a str> {
        let assignment = self.assign_classes_to_namespaces();
        self.candidates
            .iter()
            .copied()
            .filter(|candidate| !assignment.contains_key(candidate))
            .filter(|candidate| {
                !self
                    .candidates
                    .iter()
                    .any(|other| is_nested_under(other, candidate))
            })
            .collect()
    }

    /// Declared nodes that render outside namespace grouping
    ///
    /// Excludes namespace-flagged modules and qualified classes.
    pub fn regular_nodes(&self) -> Vec<&'a Node> {
        self.document
            .nodes()
            .filter(|node| self.is_regular(node))
            .collect()
    }

    pub fn is_regular(&self, node: &Node) -> bool {
        match node {
            Node::Module(module) => !module.is_namespace,
            Node::Class(class) => !class.name.contains(NAMESPACE_SEPARATOR),
            _ => true,
        }
    }

    /// Qualified classes that no candidate encloses
    pub fn unassigned_classes(&self) -> Vec<&'a ClassNode> {
        self.document
            .classes()
            .filter(|class| class.name.contains(NAMESPACE_SEPARATOR))
            .filter(|class| self.namespace_of(&class.name).is_none())
            .collect()
    }
}

/// `name` starts with `"<parent>::"`
fn is_nested_under(name: &str, parent: &str) -> bool {
    name.strip_prefix(parent)
        .is_some_and(|rest| rest.starts_with(NAMESPACE_SEPARATOR))
}

fn has_descendant(document: &Document, module: &str) -> bool {
    document
        .nodes()
        .filter_map(Node::name)
        .any(|name| is_nested_under(name, module))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MethodNode, ModuleNode};

    fn document(nodes: Vec<Node>) -> Document {
        let mut document = Document::new();
        for node in nodes {
            document.add_node(node).unwrap();
        }
        document
    }

    fn namespace(name: &str) -> Node {
        Node::Module(ModuleNode::new(name).with_namespace(true))
    }

    fn mixin(name: &str) -> Node {
        Node::Module(ModuleNode::new(name).with_method(MethodNode::new("helper")))
    }

    fn class(name: &str) -> Node {
        Node::Class(ClassNode::new(name))
    }

    #[test]
    fn test_deepest_namespace_wins() {
        let doc = document(vec![namespace("A"), namespace("A::B"), class("A::B::C")]);
        let resolver = NamespaceResolver::new(&doc);

        assert_eq!(resolver.namespace_of("A::B::C"), Some("A::B"));
        let assignment = resolver.assign_classes_to_namespaces();
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment["A::B"][0].name, "A::B::C");
    }

    #[test]
    fn test_prefix_must_end_at_separator() {
        let doc = document(vec![namespace("App"), class("Application::User")]);
        let resolver = NamespaceResolver::new(&doc);
        assert_eq!(resolver.namespace_of("Application::User"), None);
        assert_eq!(resolver.unassigned_classes().len(), 1);
    }

    #[test]
    fn test_candidate_by_descendant() {
        let doc = document(vec![mixin("Billing"), class("Billing::Invoice"), mixin("Util")]);
        let resolver = NamespaceResolver::new(&doc);

        assert_eq!(resolver.candidates(), &["Billing"]);
        assert!(resolver.has_namespaces());
        assert!(!resolver.is_candidate("Util"));
    }

    #[test]
    fn test_reopened_module_is_one_candidate() {
        let doc = document(vec![namespace("A"), class("A::X"), namespace("A")]);
        let resolver = NamespaceResolver::new(&doc);
        assert_eq!(resolver.candidates(), &["A"]);
    }

    #[test]
    fn test_empty_namespace_policy() {
        let doc = document(vec![
            namespace("Parent"),
            namespace("Parent::Child"),
            class("Parent::Child::Leaf"),
            namespace("Lonely"),
        ]);
        let resolver = NamespaceResolver::new(&doc);

        assert_eq!(resolver.empty_namespaces(), vec!["Lonely"]);
    }

    #[test]
    fn test_parent_of_empty_leaf_is_not_empty() {
        let doc = document(vec![namespace("Outer"), namespace("Outer::Inner")]);
        let resolver = NamespaceResolver::new(&doc);
        assert_eq!(resolver.empty_namespaces(), vec!["Outer::Inner"]);
    }

    #[test]
    fn test_assignment_order_follows_first_class() {
        let doc = document(vec![
            namespace("A"),
            namespace("B"),
            class("B::One"),
            class("A::Two"),
            class("B::Three"),
        ]);
        let resolver = NamespaceResolver::new(&doc);
        let assignment = resolver.assign_classes_to_namespaces();

        let order: Vec<&str> = assignment.keys().copied().collect();
        assert_eq!(order, vec!["B", "A"]);
        let b: Vec<&str> = assignment["B"].iter().map(|c| c.name.as_str()).collect();
        assert_eq!(b, vec!["B::One", "B::Three"]);
    }

    #[test]
    fn test_regular_nodes() {
        let doc = document(vec![
            namespace("App"),
            class("App::User"),
            class("Standalone"),
            mixin("Helpers"),
        ]);
        let resolver = NamespaceResolver::new(&doc);
        let names: Vec<&str> = resolver
            .regular_nodes()
            .into_iter()
            .filter_map(Node::name)
            .collect();
        assert_eq!(names, vec!["Standalone", "Helpers"]);
    }

    #[test]
    fn test_no_namespaces() {
        let doc = document(vec![class("User"), mixin("Helpers")]);
        let resolver = NamespaceResolver::new(&doc);
        assert!(!resolver.has_namespaces());
        assert!(resolver.empty_namespaces().is_empty());
        assert!(resolver.assign_classes_to_namespaces().is_empty());
    }
}
