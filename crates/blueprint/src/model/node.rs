//! Declaration nodes and the composite tree they form
//!
//! The node set is closed: [`Node`] is a tagged variant over every kind the
//! pipeline knows about. Class and module nodes own their children
//! (methods and inferred relationships) exclusively.

use std::fmt;

use serde::Serialize;

use super::method::{Block, MethodNode, Parameter};
use crate::core::RelationshipKind;

/// Discriminant of a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Class,
    Module,
    InnerClass,
    Method,
    Parameter,
    Block,
    Relationship,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NodeKind::Class => "class",
            NodeKind::Module => "module",
            NodeKind::InnerClass => "inner_class",
            NodeKind::Method => "method",
            NodeKind::Parameter => "parameter",
            NodeKind::Block => "block",
            NodeKind::Relationship => "relationship",
        };
        write!(f, "{}", text)
    }
}

/// Inferred edge between two named types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub from: String,
    pub to: String,
}

impl Relationship {
    pub fn new(kind: RelationshipKind, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            kind,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Name of the node this edge is attached to
    ///
    /// Delegation edges belong to their source, every other kind belongs to
    /// the node it was declared on, which is the target.
    pub fn owner(&self) -> &str {
        match self.kind {
            RelationshipKind::Delegation => &self.from,
            _ => &self.to,
        }
    }
}

/// How an inner class is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerClassKind {
    /// Callable object: `initialize` plus a single public class method
    Method,
    /// Any other nested class
    Normal,
}

impl InnerClassKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InnerClassKind::Method => "method",
            InnerClassKind::Normal => "normal",
        }
    }
}

/// Tree capability shared by nodes that own children
pub trait Composite {
    fn children(&self) -> &[Node];

    fn add_child(&mut self, child: Node);

    fn children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.children()
            .iter()
            .filter(move |child| child.kind() == kind)
    }

    /// Method children in declaration order
    fn methods(&self) -> impl Iterator<Item = &MethodNode> {
        self.children().iter().filter_map(Node::as_method)
    }

    /// Relationship children in inference order
    fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.children().iter().filter_map(Node::as_relationship)
    }
}

/// A class declaration, also used for inner classes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassNode {
    pub name: String,
    pub superclass: Option<String>,
    pub includes: Vec<String>,
    pub extends: Vec<String>,
    pub inner_classes: Vec<ClassNode>,
    children: Vec<Node>,
}

impl ClassNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_method(mut self, method: MethodNode) -> Self {
        self.add_child(Node::Method(method));
        self
    }

    /// Classify this class when it is nested in another class
    pub fn inner_class_kind(&self) -> InnerClassKind {
        let public: Vec<&MethodNode> = self.methods().filter(|m| m.is_public()).collect();
        let has_initialize = public.iter().any(|m| m.name == "initialize");
        let class_methods = public.iter().filter(|m| m.is_class_method()).count();

        if public.len() == 2 && has_initialize && class_methods == 1 {
            InnerClassKind::Method
        } else {
            InnerClassKind::Normal
        }
    }

    /// Return type of the public class method `execute`, if any
    pub fn execute_return_type(&self) -> Option<&str> {
        self.methods()
            .find(|m| m.name == "execute" && m.is_class_method() && m.is_public())
            .map(|m| m.return_type.as_str())
    }

    /// Whether this class or one of its inner classes is named `name`
    pub fn owns(&self, name: &str) -> bool {
        self.name == name || self.inner_classes.iter().any(|inner| inner.owns(name))
    }

    /// Children of the class named `name` in this subtree
    pub(crate) fn children_for_mut(&mut self, name: &str) -> Option<&mut Vec<Node>> {
        if self.name == name {
            return Some(&mut self.children);
        }
        self.inner_classes
            .iter_mut()
            .find(|inner| inner.owns(name))
            .and_then(|inner| inner.children_for_mut(name))
    }

    /// This class followed by its inner classes, depth first
    pub fn walk(&self) -> Vec<&ClassNode> {
        let mut out = vec![self];
        for inner in &self.inner_classes {
            out.extend(inner.walk());
        }
        out
    }

    pub(crate) fn clear_relationships(&mut self) {
        self.children.retain(|child| child.kind() != NodeKind::Relationship);
        for inner in &mut self.inner_classes {
            inner.clear_relationships();
        }
    }
}

impl Composite for ClassNode {
    fn children(&self) -> &[Node] {
        &self.children
    }

    fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }
}

/// A module declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleNode {
    pub name: String,
    pub includes: Vec<String>,
    pub extends: Vec<String>,
    /// Groups nested declarations rather than acting as a mixin
    pub is_namespace: bool,
    children: Vec<Node>,
}

impl ModuleNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, is_namespace: bool) -> Self {
        self.is_namespace = is_namespace;
        self
    }

    pub fn with_method(mut self, method: MethodNode) -> Self {
        self.add_child(Node::Method(method));
        self
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub(crate) fn clear_relationships(&mut self) {
        self.children.retain(|child| child.kind() != NodeKind::Relationship);
    }
}

impl Composite for ModuleNode {
    fn children(&self) -> &[Node] {
        &self.children
    }

    fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }
}

/// Closed set of node kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Class(ClassNode),
    Module(ModuleNode),
    InnerClass(ClassNode),
    Method(MethodNode),
    Parameter(Parameter),
    Block(Block),
    Relationship(Relationship),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Class(_) => NodeKind::Class,
            Node::Module(_) => NodeKind::Module,
            Node::InnerClass(_) => NodeKind::InnerClass,
            Node::Method(_) => NodeKind::Method,
            Node::Parameter(_) => NodeKind::Parameter,
            Node::Block(_) => NodeKind::Block,
            Node::Relationship(_) => NodeKind::Relationship,
        }
    }

    /// Declared name, for the kinds that carry one
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Class(c) | Node::InnerClass(c) => Some(&c.name),
            Node::Module(m) => Some(&m.name),
            Node::Method(m) => Some(&m.name),
            Node::Parameter(p) => Some(&p.name),
            Node::Block(_) | Node::Relationship(_) => None,
        }
    }

    /// Owned children, empty for leaf kinds
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Class(c) | Node::InnerClass(c) => c.children(),
            Node::Module(m) => m.children(),
            _ => &[],
        }
    }

    pub fn as_class(&self) -> Option<&ClassNode> {
        match self {
            Node::Class(c) | Node::InnerClass(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleNode> {
        match self {
            Node::Module(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodNode> {
        match self {
            Node::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Node::Relationship(r) => Some(r),
            _ => None,
        }
    }

    /// Methods owned by this node, in declaration order
    pub fn methods(&self) -> impl Iterator<Item = &MethodNode> {
        self.children().iter().filter_map(Node::as_method)
    }

    /// Relationships owned by this node and, for classes, its inner classes
    pub fn relationships(&self) -> Vec<&Relationship> {
        match self {
            Node::Class(c) | Node::InnerClass(c) => c
                .walk()
                .into_iter()
                .flat_map(|class| class.relationships())
                .collect(),
            Node::Module(m) => m.relationships().collect(),
            _ => Vec::new(),
        }
    }
}
