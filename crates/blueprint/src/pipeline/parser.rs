//! Declaration parser
//!
//! Reads a serialized declaration stream, translates it into nodes, infers
//! their relationships, and stores both in a [`Document`].

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::declaration::read_declarations;
use super::relationships::RelationshipInferencer;
use super::translator::Translator;
use crate::core::{Database, Parser};
use crate::model::Document;

/// Parser for JSON declaration streams
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationParser {
    translator: Translator,
    inferencer: RelationshipInferencer,
}

impl DeclarationParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse several streams, in order, into one document
    ///
    /// Streams are concatenated before namespace resolution, so their
    /// order decides "first declaration wins" ties.
    pub fn parse_all(&self, inputs: &[&str], database: &mut Document) -> Result<()> {
        for input in inputs {
            self.parse(input, database)?;
        }
        Ok(())
    }
}

impl Parser<Document> for DeclarationParser {
    fn parse(&self, input: &str, database: &mut Document) -> Result<()> {
        let parse_span = span!(Level::DEBUG, "parse_declarations", input_len = input.len());
        let _enter = parse_span.enter();

        let declarations = read_declarations(input)?;
        trace!(count = declarations.len(), "Read declaration records");

        let nodes = self.translator.translate(&declarations);
        debug!(node_count = nodes.len(), "Translated declarations");

        let mut edge_count = 0;
        for node in nodes {
            let edges = self.inferencer.infer(&node);
            database.add_node(node)?;
            for edge in edges {
                trace!(kind = %edge.kind, from = %edge.from, to = %edge.to, "Adding relationship");
                database.add_edge(edge)?;
                edge_count += 1;
            }
        }
        debug!(edge_count, "Inferred relationships");

        Ok(())
    }

    fn name(&self) -> &'static str {
        "declarations"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        let trimmed = input.trim_start();
        trimmed.starts_with('[') || (trimmed.starts_with('{') && input.contains("\"declarations\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_metadata() {
        let parser = DeclarationParser::new();
        assert_eq!(parser.name(), "declarations");
        assert_eq!(parser.version(), "0.1.0");
    }

    #[test]
    fn test_parser_can_parse() {
        let parser = DeclarationParser::new();
        assert!(parser.can_parse("  [{\"kind\": \"class\", \"name\": \"A\"}]"));
        assert!(parser.can_parse("{\"declarations\": []}"));
        assert!(!parser.can_parse("classDiagram\n  A <|-- B"));
        assert!(!parser.can_parse("{\"structure\": []}"));
    }

    #[test]
    fn test_basic_parsing() {
        let parser = DeclarationParser::new();
        let mut document = Document::new();
        parser
            .parse(
                r#"[
                    {"kind": "class", "name": "BaseModel"},
                    {"kind": "class", "name": "User", "superclass": "BaseModel"}
                ]"#,
                &mut document,
            )
            .unwrap();

        assert_eq!(document.node_count(), 2);
        assert_eq!(document.edge_count(), 1);
    }

    #[test]
    fn test_parse_all_concatenates_in_order() {
        let parser = DeclarationParser::new();
        let mut document = Document::new();
        parser
            .parse_all(
                &[
                    r#"[{"kind": "module", "name": "App"}]"#,
                    r#"{"declarations": [{"kind": "class", "name": "App::User"}]}"#,
                ],
                &mut document,
            )
            .unwrap();

        let names: Vec<&str> = document.nodes().filter_map(|n| n.name()).collect();
        assert_eq!(names, vec!["App", "App::User"]);
    }

    #[test]
    fn test_malformed_input_is_a_parse_error() {
        let parser = DeclarationParser::new();
        let mut document = Document::new();
        let err = parser.parse("[{\"kind\": \"class\"", &mut document).unwrap_err();
        assert!(err.to_string().contains("Parse error"));
        assert_eq!(document.node_count(), 0);
    }
}
