//! Core renderer trait for document output
//!
//! This trait defines the interface for rendering a parsed document
//! into one of the supported output formats.

use anyhow::Result;

use super::Database;

/// Core trait for document renderers
///
/// # Example
/// ```
/// use blueprint::core::Renderer;
/// use blueprint::model::Document;
/// use blueprint::plugins::mermaid::MermaidRenderer;
///
/// let document = Document::new();
/// let renderer = MermaidRenderer::new();
/// let output = renderer.render(&document).unwrap();
/// assert_eq!(output, "classDiagram");
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
