//! PlantUML renderer

use anyhow::Result;
use tracing::{debug, span, Level};

use super::PlantUmlSyntax;
use crate::core::{RenderConfig, Renderer};
use crate::model::Document;
use crate::pipeline::OutputAssembler;

/// Renders a document as a PlantUML class diagram
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlRenderer {
    syntax: PlantUmlSyntax,
    config: RenderConfig,
}

impl PlantUmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            syntax: PlantUmlSyntax::new(config),
            config,
        }
    }
}

impl Renderer<Document> for PlantUmlRenderer {
    type Output = String;

    fn render(&self, database: &Document) -> Result<String> {
        let render_span = span!(Level::DEBUG, "render_plantuml");
        let _enter = render_span.enter();

        let output = OutputAssembler::new(&self.syntax, self.config).render_document(database)?;
        debug!(output_len = output.len(), "Rendered PlantUML diagram");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "plantuml"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "plantuml"
    }
}
