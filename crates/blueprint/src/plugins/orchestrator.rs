//! Plugin orchestrator for coordinating the conversion pipeline
//!
//! The orchestrator manages the flow of data through all plugins:
//! Parser → Document → Renderer

use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info, span, warn, Level};

use crate::core::{Database, DiagramError, OutputFormat, RenderConfig, Renderer};
use crate::model::Document;
use crate::pipeline::DeclarationParser;
use crate::plugins::json::JsonRenderer;
use crate::plugins::mermaid::MermaidRenderer;
use crate::plugins::plantuml::PlantUmlRenderer;

type BoxedRenderer = Box<dyn Renderer<Document, Output = String>>;

/// Plugin orchestrator that coordinates the entire pipeline
///
/// Holds the declaration parser and one renderer per output format, all
/// sharing the same [`RenderConfig`].
pub struct Orchestrator {
    parser: DeclarationParser,
    renderers: HashMap<OutputFormat, BoxedRenderer>,
    config: RenderConfig,
}

impl Orchestrator {
    /// Create an orchestrator with every output format registered
    pub fn new(config: RenderConfig) -> Self {
        let mut orchestrator = Self {
            parser: DeclarationParser::new(),
            renderers: HashMap::new(),
            config,
        };
        orchestrator.register_renderer(OutputFormat::Json, Box::new(JsonRenderer::with_config(config)));
        orchestrator.register_renderer(
            OutputFormat::Mermaid,
            Box::new(MermaidRenderer::with_config(config)),
        );
        orchestrator.register_renderer(
            OutputFormat::PlantUml,
            Box::new(PlantUmlRenderer::with_config(config)),
        );
        orchestrator
    }

    /// Register (or replace) the renderer for a format
    pub fn register_renderer(&mut self, format: OutputFormat, renderer: BoxedRenderer) {
        self.renderers.insert(format, renderer);
    }

    /// Formats with a registered renderer, in display order
    pub fn formats(&self) -> Vec<OutputFormat> {
        OutputFormat::all()
            .iter()
            .copied()
            .filter(|format| self.renderers.contains_key(format))
            .collect()
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }

    /// Parse declaration streams, in order, into one document
    pub fn parse(&self, inputs: &[&str]) -> Result<Document> {
        let parse_span = span!(Level::DEBUG, "pipeline_parse", stream_count = inputs.len());
        let _enter = parse_span.enter();

        let mut document = Document::new();
        self.parser.parse_all(inputs, &mut document)?;
        debug!(
            node_count = document.node_count(),
            edge_count = document.edge_count(),
            "Parsing completed"
        );
        Ok(document)
    }

    /// Render an already parsed document
    pub fn render(&self, document: &Document, format: OutputFormat) -> Result<String> {
        let render_span = span!(Level::DEBUG, "pipeline_render", %format);
        let _enter = render_span.enter();

        let renderer = self.renderers.get(&format).ok_or_else(|| {
            warn!(%format, "No renderer registered");
            DiagramError::UnsupportedFormat {
                format: format.to_string(),
            }
        })?;

        let output = renderer.render(document)?;
        debug!(renderer = renderer.name(), output_len = output.len(), "Rendering completed");
        Ok(output)
    }

    /// Process input streams through the complete pipeline
    pub fn process(&self, inputs: &[&str], format: OutputFormat) -> Result<String> {
        let process_span = span!(Level::INFO, "process_declarations", %format);
        let _enter = process_span.enter();

        info!(stream_count = inputs.len(), "Starting conversion pipeline");
        let document = self.parse(inputs)?;
        let output = self.render(&document, format)?;
        info!("Pipeline completed successfully");

        Ok(output)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
