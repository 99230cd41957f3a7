//! Mermaid.js plugin
//!
//! Renders documents as Mermaid.js class diagrams.

mod renderer;
mod syntax;

pub use renderer::MermaidRenderer;
pub use syntax::MermaidSyntax;
