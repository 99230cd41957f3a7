//! PlantUML plugin
//!
//! Renders documents as PlantUML class diagrams.

mod renderer;
mod syntax;

pub use renderer::PlantUmlRenderer;
pub use syntax::PlantUmlSyntax;
