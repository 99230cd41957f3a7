//! JSON renderer

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, span, Level};

use super::{JsonEntry, JsonSyntax};
use crate::core::{JsonStyle, RenderConfig, Renderer, SyntaxRenderer};
use crate::model::Document;
use crate::pipeline::StructureEntityBuilder;

#[derive(Serialize)]
struct Structure {
    structure: Vec<JsonEntry>,
}

/// Renders a document as a `{"structure": [...]}` dump
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    syntax: JsonSyntax,
    config: RenderConfig,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            syntax: JsonSyntax::new(),
            config,
        }
    }
}

impl Renderer<Document> for JsonRenderer {
    type Output = String;

    fn render(&self, database: &Document) -> Result<String> {
        let render_span = span!(Level::DEBUG, "render_json", style = ?self.config.json_style);
        let _enter = render_span.enter();

        let entities = StructureEntityBuilder::new(database).build()?;
        let structure = Structure {
            structure: entities
                .iter()
                .map(|entity| self.syntax.render_entity(entity))
                .collect::<Result<_>>()?,
        };

        let mut output = match self.config.json_style {
            JsonStyle::Pretty => serde_json::to_string_pretty(&structure)?,
            JsonStyle::Compact => serde_json::to_string(&structure)?,
        };
        output.push('\n');

        debug!(entries = structure.structure.len(), "Rendered JSON structure");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parser;
    use crate::pipeline::DeclarationParser;

    fn document(input: &str) -> Document {
        let mut document = Document::new();
        DeclarationParser::new().parse(input, &mut document).unwrap();
        document
    }

    #[test]
    fn test_empty_document() {
        let compact = RenderConfig::default().with_json_style(JsonStyle::Compact);
        let output = JsonRenderer::with_config(compact).render(&Document::new()).unwrap();
        assert_eq!(output, "{\"structure\":[]}\n");
    }

    #[test]
    fn test_pretty_is_indented() {
        let doc = document(r#"[{"kind": "class", "name": "A"}]"#);
        let output = JsonRenderer::new().render(&doc).unwrap();
        assert!(output.starts_with("{\n  \"structure\": [\n    {\n      \"type\": \"class\""));
        assert!(output.ends_with("}\n"));
    }

    #[test]
    fn test_classes_listed_before_modules() {
        let doc = document(
            r#"[
                {"kind": "module", "name": "Mixin", "members": [
                    {"kind": "method", "name": "helper"}
                ]},
                {"kind": "class", "name": "User"},
                {"kind": "module", "name": "Tools"},
                {"kind": "class", "name": "Admin"}
            ]"#,
        );
        let compact = RenderConfig::default().with_json_style(JsonStyle::Compact);
        let output = JsonRenderer::with_config(compact).render(&doc).unwrap();
        let positions: Vec<usize> = ["\"User\"", "\"Admin\"", "\"Mixin\"", "\"Tools\""]
            .iter()
            .map(|name| output.find(name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(output.contains(r#""name":"Mixin","superclass":null,"methods":[{"name":"helper","method_type":"instance","visibility":"public","parameters":[],"return_type":""}],"is_namespace":false}"#));
    }
}
