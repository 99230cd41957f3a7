//! JSON plugin
//!
//! Dumps the node model as a `{"structure": [...]}` document.

mod renderer;
mod syntax;

pub use renderer::JsonRenderer;
pub use syntax::{JsonEntry, JsonInnerClass, JsonInnerMethod, JsonMethod, JsonSyntax};
