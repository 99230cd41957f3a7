//! Core parser trait for declaration input
//!
//! This trait defines the interface for turning serialized declaration
//! records into structured data stored in a database.

use anyhow::Result;

use super::Database;

/// Core trait for declaration parsers
///
/// # Example
/// ```
/// use blueprint::core::{Database, Parser};
/// use blueprint::model::Document;
/// use blueprint::pipeline::DeclarationParser;
///
/// let parser = DeclarationParser::new();
/// let mut document = Document::new();
/// parser
///     .parse(r#"[{"kind": "class", "name": "User"}]"#, &mut document)
///     .unwrap();
/// assert_eq!(document.node_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse input into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input can be parsed by this parser
    fn can_parse(&self, input: &str) -> bool;
}
