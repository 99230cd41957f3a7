//! Syntax renderer abstraction traits
//!
//! Every output backend turns entities into a syntax-specific fragment.
//! The diagram backends (Mermaid.js, PlantUML) additionally share a line
//! oriented contract consumed by the output assembler, and only differ in
//! punctuation.

use anyhow::Result;

use crate::model::{Block, MethodNode, Parameter, Relationship};
use crate::pipeline::Entity;

/// Qualified name separator used in declaration names
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Turn a declaration name into a diagram identifier
///
/// Qualified names are flattened by joining their segments with `_`, and
/// a trailing `?` is stripped so predicate-style names cannot corrupt the
/// surrounding container syntax.
pub fn flatten_name(name: &str) -> String {
    strip_predicate(name).replace(NAMESPACE_SEPARATOR, "_")
}

/// Strip a single trailing `?` from a rendered identifier
pub fn strip_predicate(name: &str) -> &str {
    name.strip_suffix('?').unwrap_or(name)
}

/// Last segment of a qualified name
pub fn short_name(name: &str) -> &str {
    name.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(name)
}

/// Parameter list text: `name: Type` pairs joined by `, `
///
/// Optional parameters get a `?` after the name, rest parameters a `*`
/// or `**` before it.
pub fn format_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{}{}{}: {}", p.kind.prefix(), p.name, p.kind.suffix(), p.type_name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Block suffix text: ` &block(<types>) -> <return>`
pub fn format_block(block: &Block) -> String {
    let types: Vec<&str> = block.parameters.iter().map(|p| p.type_name.as_str()).collect();
    format!(" &block({}) -> {}", types.join(", "), block.return_type)
}

/// Signature text shared by the diagram syntaxes
///
/// `static_marker` is written only for class methods and `return_prefix`
/// only when the return type is not empty.
pub fn format_signature(
    method: &MethodNode,
    static_marker: Option<&str>,
    return_prefix: &str,
) -> String {
    let mut text = String::new();
    text.push(method.visibility.to_char());
    if method.is_class_method() {
        if let Some(marker) = static_marker {
            text.push_str(marker);
        }
    }
    text.push_str(&method.name);
    text.push('(');
    text.push_str(&format_parameters(&method.parameters));
    text.push(')');
    if let Some(block) = &method.block {
        text.push_str(&format_block(block));
    }
    let return_type = strip_predicate(&method.return_type);
    if !return_type.is_empty() {
        text.push_str(return_prefix);
        text.push_str(return_type);
    }
    text
}

/// Trait for rendering a single entity into a backend fragment
pub trait SyntaxRenderer: Send + Sync {
    /// The rendered form of one entity
    type Fragment;

    /// Render one entity
    fn render_entity(&self, entity: &Entity<'_>) -> Result<Self::Fragment>;

    /// Get the name of this syntax
    fn name(&self) -> &'static str;
}

/// Line oriented contract shared by the diagram backends
pub trait DiagramSyntax: SyntaxRenderer<Fragment = Vec<String>> {
    /// Text of one method line, without indentation
    fn method_signature(&self, method: &MethodNode) -> String;

    /// Wrap already rendered entity lines in a namespace container
    fn namespace_block(&self, name: &str, lines: Vec<String>) -> Vec<String>;

    /// Stub block for a namespace with no members
    fn empty_namespace_block(&self, name: &str) -> Vec<String>;

    /// One relationship arrow line
    fn relationship_arrow(&self, edge: &Relationship) -> String;

    /// Note attached to a namespace, giving its original qualified path
    fn namespace_note(&self, name: &str, original: &str) -> String;

    /// Single comment line
    fn comment(&self, text: &str) -> String;

    /// Prefix of a line opening a namespace container
    fn namespace_opener(&self) -> &'static str;

    /// Lines emitted before any entity
    fn header(&self) -> Vec<String>;

    /// Lines emitted after the relationship block
    fn footer(&self) -> Vec<String>;

    /// Whether the assembled text ends with a newline
    fn trailing_newline(&self) -> bool;

    /// Whether a blank line follows the entity section
    fn blank_after_entities(&self) -> bool {
        false
    }
}
