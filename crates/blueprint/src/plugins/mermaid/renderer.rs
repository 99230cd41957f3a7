//! Mermaid.js renderer

use anyhow::Result;
use tracing::{debug, span, Level};

use super::MermaidSyntax;
use crate::core::{RenderConfig, Renderer};
use crate::model::Document;
use crate::pipeline::OutputAssembler;

/// Renders a document as a Mermaid.js `classDiagram`
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer {
    syntax: MermaidSyntax,
    config: RenderConfig,
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            syntax: MermaidSyntax::new(config),
            config,
        }
    }
}

impl Renderer<Document> for MermaidRenderer {
    type Output = String;

    fn render(&self, database: &Document) -> Result<String> {
        let render_span = span!(Level::DEBUG, "render_mermaid");
        let _enter = render_span.enter();

        let output = OutputAssembler::new(&self.syntax, self.config).render_document(database)?;
        debug!(output_len = output.len(), "Rendered Mermaid diagram");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "mermaid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parser;
    use crate::pipeline::DeclarationParser;

    fn render(input: &str) -> String {
        let mut document = Document::new();
        DeclarationParser::new().parse(input, &mut document).unwrap();
        MermaidRenderer::new().render(&document).unwrap()
    }

    #[test]
    fn test_renderer_metadata() {
        let renderer = MermaidRenderer::new();
        assert_eq!(renderer.name(), "mermaid");
        assert_eq!(renderer.version(), "0.1.0");
        assert_eq!(renderer.format(), "mermaid");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render("[]"), "classDiagram");
    }

    #[test]
    fn test_classes_and_relationships() {
        let output = render(
            r#"[
                {"kind": "class", "name": "BaseModel"},
                {"kind": "class", "name": "User", "superclass": "BaseModel", "members": [
                    {"kind": "method", "name": "logger", "overloads": [{"return_type": "Logger"}]}
                ]}
            ]"#,
        );
        let expected = [
            "classDiagram",
            "    class BaseModel {",
            "    }",
            "",
            "    class User {",
            "        +logger() Logger",
            "    }",
            "",
            "    %% Relationships",
            "    BaseModel <|-- User : \"inherits\"",
            "    User --> Logger : \"delegates\"",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_namespaces_and_notes() {
        let output = render(
            r#"[
                {"kind": "module", "name": "App", "members": [
                    {"kind": "class", "name": "User"},
                    {"kind": "module", "name": "Empty"}
                ]},
                {"kind": "module", "name": "Billing", "members": [
                    {"kind": "class", "name": "Invoice"}
                ]}
            ]"#,
        );
        let expected = [
            "classDiagram",
            "namespace App {",
            "    class User {",
            "    }",
            "}",
            "namespace Billing {",
            "    class Invoice {",
            "    }",
            "}",
            "",
            "class App_Empty {",
            "    <<namespace>>",
            "}",
            "",
            "note for App \"Namespace: App\"",
            "note for Billing \"Namespace: Billing\"",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }
}
