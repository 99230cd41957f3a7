//! PlantUML class diagram syntax

use anyhow::Result;

use crate::core::{
    flatten_name, format_signature, strip_predicate, DiagramError, DiagramSyntax, RenderConfig,
    SyntaxRenderer,
};
use crate::model::{MethodNode, Relationship};
use crate::pipeline::Entity;

const INDENT: &str = "    ";
const STATIC_MARKER: &str = "{static} ";

/// PlantUML punctuation for the shared diagram contract
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlSyntax {
    config: RenderConfig,
}

impl PlantUmlSyntax {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn signature(&self, method: &MethodNode, show_static: bool) -> String {
        let marker = show_static.then_some(STATIC_MARKER);
        format_signature(method, marker, " : ")
    }

    fn class_box(&self, name: &str, marker: Option<&str>, entity: &Entity<'_>) -> Vec<String> {
        let show_static = entity.shows_static();
        let mut lines = vec![format!("class {} {{", strip_predicate(name))];
        if let Some(marker) = marker {
            lines.push(format!("{}{}", INDENT, marker));
        }
        for method in entity.methods() {
            lines.push(format!("{}{}", INDENT, self.signature(method, show_static)));
        }
        // Method classes read as a call: `+Name(): Type`
        for method in entity.method_class_signatures() {
            lines.push(format!("{}{}", INDENT, format_signature(&method, None, ": ")));
        }
        lines.push("}".to_string());
        lines
    }
}

impl SyntaxRenderer for PlantUmlSyntax {
    type Fragment = Vec<String>;

    fn render_entity(&self, entity: &Entity<'_>) -> Result<Vec<String>> {
        let lines = match entity {
            Entity::Class { .. } | Entity::ModuleAsClass(_) => {
                self.class_box(&entity.name(), None, entity)
            }
            Entity::Module(_) => self.class_box(&entity.name(), Some("<<module>>"), entity),
            Entity::Namespace { classes, .. } => {
                let mut content = Vec::new();
                for class in classes {
                    let nested = Entity::Class {
                        class: *class,
                        in_namespace: true,
                    };
                    content.extend(self.render_entity(&nested)?);
                }
                self.namespace_block(&entity.name(), content)
            }
            Entity::EmptyNamespace { .. } => self.empty_namespace_block(&entity.name()),
            Entity::Structure(_) => {
                return Err(DiagramError::render_error(format!(
                    "structure entity '{}' has no PlantUML form",
                    entity.original_name()
                ))
                .into())
            }
        };
        Ok(lines)
    }

    fn name(&self) -> &'static str {
        "plantuml"
    }
}

impl DiagramSyntax for PlantUmlSyntax {
    fn method_signature(&self, method: &MethodNode) -> String {
        self.signature(method, true)
    }

    fn namespace_block(&self, name: &str, lines: Vec<String>) -> Vec<String> {
        let mut block = vec![format!("package {} {{", strip_predicate(name))];
        block.extend(lines);
        block.push("}".to_string());
        block
    }

    /// Note aliases carry the namespace name so several stubs can coexist
    fn empty_namespace_block(&self, name: &str) -> Vec<String> {
        let name = strip_predicate(name);
        vec![
            format!("package {} {{", name),
            format!("{}note \"Empty namespace\" as N_{}", INDENT, name),
            "}".to_string(),
        ]
    }

    fn relationship_arrow(&self, edge: &Relationship) -> String {
        let label = if self.config.arrow_labels {
            format!(" : {}", edge.kind.label())
        } else {
            String::new()
        };
        format!(
            "{} {} {}{}",
            flatten_name(&edge.from),
            edge.kind.arrow(),
            flatten_name(&edge.to),
            label
        )
    }

    fn namespace_note(&self, name: &str, original: &str) -> String {
        format!("note top of {} : Namespace: {}", strip_predicate(name), original)
    }

    fn comment(&self, text: &str) -> String {
        format!("' {}", text)
    }

    fn namespace_opener(&self) -> &'static str {
        "package "
    }

    fn header(&self) -> Vec<String> {
        vec!["@startuml".to_string()]
    }

    fn footer(&self) -> Vec<String> {
        vec!["@enduml".to_string()]
    }

    fn trailing_newline(&self) -> bool {
        true
    }

    fn blank_after_entities(&self) -> bool {
        true
    }
}
