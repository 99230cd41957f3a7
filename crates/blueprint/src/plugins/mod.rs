//! Output plugins
//!
//! One plugin per output format, plus the [`Orchestrator`] that wires the
//! declaration parser to them.

pub mod json;
pub mod mermaid;
pub mod orchestrator;
pub mod plantuml;

pub use orchestrator::Orchestrator;
