//! Blueprint - Turn class/module signature declarations into diagrams
//!
//! A library for reading serialized class and module declarations and
//! rendering them as a JSON structure dump, a Mermaid.js class diagram, or
//! a PlantUML class diagram.
//!
//! # Quick Start
//!
//! ```rust
//! use blueprint::render;
//!
//! let input = r#"[
//!     {"kind": "class", "name": "BaseModel"},
//!     {"kind": "class", "name": "User", "superclass": "BaseModel"}
//! ]"#;
//! let diagram = render(input, "mermaid").unwrap();
//! assert!(diagram.contains("BaseModel <|-- User"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use blueprint::prelude::*;
//!
//! let input = r#"[{"kind": "module", "name": "App", "members": [
//!     {"kind": "class", "name": "User"}
//! ]}]"#;
//!
//! // Parse into a document
//! let parser = DeclarationParser::new();
//! let mut document = Document::new();
//! parser.parse(input, &mut document).unwrap();
//!
//! // Access the parsed data
//! assert_eq!(document.node_count(), 2);
//! assert_eq!(document.modules().next().map(|m| m.is_namespace), Some(true));
//!
//! // Render as PlantUML
//! let renderer = PlantUmlRenderer::new();
//! let diagram = renderer.render(&document).unwrap();
//! assert!(diagram.contains("package App {"));
//! ```

pub mod core;
pub mod model;
pub mod pipeline;
pub mod plugins;

pub use crate::core::*;

use crate::model::Document;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, DiagramError, JsonStyle, MethodType, OutputFormat, ParameterKind, Parser,
        RelationshipKind, RenderConfig, Renderer, Visibility,
    };
    pub use crate::model::{ClassNode, Composite, Document, MethodNode, ModuleNode, Node, Relationship};
    pub use crate::pipeline::DeclarationParser;
    pub use crate::plugins::json::JsonRenderer;
    pub use crate::plugins::mermaid::MermaidRenderer;
    pub use crate::plugins::plantuml::PlantUmlRenderer;
    pub use crate::plugins::Orchestrator;
}

/// Render a declaration stream in the named format
///
/// This is the simplest way to convert declarations to a diagram. Uses the
/// default [`RenderConfig`].
///
/// # Arguments
/// * `input` - JSON declaration array (or `{"declarations": [...]}`)
/// * `format` - `json`, `mermaid` or `plantuml` (aliases accepted)
///
/// # Returns
/// * `Ok(String)` - The rendered output
/// * `Err` - If the format is unsupported, or parsing or rendering fails
///
/// # Example
/// ```rust
/// use blueprint::render;
///
/// let uml = render(r#"[{"kind": "class", "name": "User"}]"#, "plantuml").unwrap();
/// assert!(uml.starts_with("@startuml"));
/// assert!(render("[]", "svg").is_err());
/// ```
pub fn render(input: &str, format: &str) -> anyhow::Result<String> {
    let format: OutputFormat = format.parse()?;
    render_with_config(&[input], format, RenderConfig::default())
}

/// Render several declaration streams with a specific configuration
///
/// Streams are concatenated in the given order before any namespace or
/// relationship processing.
///
/// # Example
/// ```rust
/// use blueprint::{render_with_config, JsonStyle, OutputFormat, RenderConfig};
///
/// let config = RenderConfig::default().with_json_style(JsonStyle::Compact);
/// let json = render_with_config(&["[]"], OutputFormat::Json, config).unwrap();
/// assert_eq!(json, "{\"structure\":[]}\n");
/// ```
pub fn render_with_config(
    inputs: &[&str],
    format: OutputFormat,
    config: RenderConfig,
) -> anyhow::Result<String> {
    use crate::plugins::Orchestrator;

    Orchestrator::new(config).process(inputs, format)
}

/// Parse a declaration stream into a document without rendering
///
/// Useful when you need to inspect the node model before rendering.
///
/// # Example
/// ```rust
/// use blueprint::parse;
/// use blueprint::prelude::Database;
///
/// let doc = parse(r#"[
///     {"kind": "class", "name": "BaseModel"},
///     {"kind": "class", "name": "User", "superclass": "BaseModel"}
/// ]"#).unwrap();
/// assert_eq!(doc.node_count(), 2);
/// assert_eq!(doc.edge_count(), 1);
/// ```
pub fn parse(input: &str) -> anyhow::Result<Document> {
    parse_all(&[input])
}

/// Parse several declaration streams, in order, into one document
pub fn parse_all(inputs: &[&str]) -> anyhow::Result<Document> {
    use crate::pipeline::DeclarationParser;

    let parser = DeclarationParser::new();
    let mut document = Document::new();
    parser.parse_all(inputs, &mut document)?;
    Ok(document)
}
