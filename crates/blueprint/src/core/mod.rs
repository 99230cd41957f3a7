//! Core abstractions for declaration processing
//!
//! This module defines the traits every stage of the pipeline is built on,
//! along with the shared error, configuration and logging infrastructure.

mod database;
mod error;
pub mod logging;
mod parser;
mod renderer;
mod syntax;
mod types;

pub use database::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
pub use syntax::*;
pub use types::*;
