//! Output assembly for the diagram backends
//!
//! Sequences header, entities, namespace notes, relationship arrows and
//! footer, then normalizes blank lines.

use anyhow::Result;
use tracing::trace;

use super::entity::{DiagramEntityBuilder, Entity};
use crate::core::{flatten_name, DiagramSyntax, RenderConfig};
use crate::model::{Document, Relationship};

const RELATIONSHIPS_COMMENT: &str = "Relationships";

/// Assembles diagram text from entities and relationships
pub struct OutputAssembler<'s, S: DiagramSyntax> {
    syntax: &'s S,
    config: RenderConfig,
}

impl<'s, S: DiagramSyntax> OutputAssembler<'s, S> {
    pub fn new(syntax: &'s S, config: RenderConfig) -> Self {
        Self { syntax, config }
    }

    /// Build entities for a document and assemble them
    pub fn render_document(&self, document: &Document) -> Result<String> {
        let entities = DiagramEntityBuilder::new(document).build()?;
        let relationships = document.relationships();
        self.assemble(&entities, &relationships)
    }

    /// Assemble the full diagram text
    pub fn assemble(&self, entities: &[Entity<'_>], relationships: &[&Relationship]) -> Result<String> {
        let mut output = self.syntax.header();
        output.extend(self.entity_section(entities)?);
        output.extend(self.notes_section(entities));
        output.extend(self.relationship_section(relationships));
        output.extend(self.syntax.footer());

        let lines = compact_blank_lines(&output, self.syntax.namespace_opener());
        trace!(line_count = lines.len(), "Assembled diagram");

        let mut text = lines.join("\n");
        if self.syntax.trailing_newline() {
            text.push('\n');
        }
        Ok(text)
    }

    /// Rendered entities separated by single blank lines
    fn entity_section(&self, entities: &[Entity<'_>]) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for (index, entity) in entities.iter().enumerate() {
            lines.extend(self.syntax.render_entity(entity)?);
            if index + 1 < entities.len() {
                lines.push(String::new());
            }
        }

        let leading = lines.iter().take_while(|line| line.is_empty()).count();
        lines.drain(..leading);

        if self.syntax.blank_after_entities() && !entities.is_empty() {
            lines.push(String::new());
        }
        Ok(lines)
    }

    fn notes_section(&self, entities: &[Entity<'_>]) -> Vec<String> {
        let notes: Vec<String> = entities
            .iter()
            .filter_map(|entity| match entity {
                Entity::Namespace { original, .. } => {
                    Some(self.syntax.namespace_note(&flatten_name(original), original))
                }
                _ => None,
            })
            .collect();

        if notes.is_empty() {
            return notes;
        }
        let mut lines = vec![String::new()];
        lines.extend(notes);
        lines
    }

    fn relationship_section(&self, relationships: &[&Relationship]) -> Vec<String> {
        let arrows: Vec<String> = relationships
            .iter()
            .filter(|edge| self.config.renders(edge.kind))
            .map(|edge| self.syntax.relationship_arrow(edge))
            .collect();

        if arrows.is_empty() {
            return arrows;
        }
        let mut lines = vec![String::new(), self.syntax.comment(RELATIONSHIPS_COMMENT)];
        lines.extend(arrows);
        lines
    }
}

/// Collapse runs of blank lines and drop the blank line between a closing
/// brace and a following namespace opener
///
/// Neighbors are looked up in the uncompacted input.
pub fn compact_blank_lines(lines: &[String], namespace_opener: &str) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        if !line.is_empty() {
            result.push(line.clone());
            continue;
        }

        let prev = index.checked_sub(1).and_then(|i| lines.get(i));
        let next = lines.get(index + 1);
        let joins_namespace = prev.is_some_and(|p| p.ends_with('}'))
            && next.is_some_and(|n| n.starts_with(namespace_opener));
        if joins_namespace {
            continue;
        }

        if result.last().is_some_and(|last| last.is_empty()) {
            continue;
        }
        result.push(String::new());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compact_collapses_blank_runs() {
        let input = lines(&["a", "", "", "", "b", ""]);
        assert_eq!(compact_blank_lines(&input, "namespace "), lines(&["a", "", "b", ""]));
    }

    #[test]
    fn test_compact_joins_brace_and_namespace() {
        let input = lines(&["}", "", "namespace B {", "}", "", "class C {"]);
        assert_eq!(
            compact_blank_lines(&input, "namespace "),
            lines(&["}", "namespace B {", "}", "", "class C {"])
        );
    }

    #[test]
    fn test_compact_keeps_leading_blank() {
        let input = lines(&["", "a"]);
        assert_eq!(compact_blank_lines(&input, "package "), lines(&["", "a"]));
    }
}
