//! Mermaid.js class diagram syntax

use anyhow::Result;

use crate::core::{
    flatten_name, format_signature, strip_predicate, DiagramError, DiagramSyntax, RenderConfig,
    SyntaxRenderer,
};
use crate::model::{MethodNode, Relationship};
use crate::pipeline::Entity;

const INDENT: &str = "    ";
const STATIC_MARKER: &str = "<<static>> ";

/// Mermaid.js punctuation for the shared diagram contract
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidSyntax {
    config: RenderConfig,
}

impl MermaidSyntax {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn signature(&self, method: &MethodNode, show_static: bool) -> String {
        let marker = show_static.then_some(STATIC_MARKER);
        format_signature(method, marker, " ")
    }

    /// `class X { ... }` with the body one level deeper than the braces
    fn class_box(&self, name: &str, indent: &str, marker: Option<&str>, body: Vec<String>) -> Vec<String> {
        let mut lines = vec![format!("{}class {} {{", indent, strip_predicate(name))];
        if let Some(marker) = marker {
            lines.push(format!("{}{}{}", indent, INDENT, marker));
        }
        lines.extend(body.into_iter().map(|line| format!("{}{}{}", indent, INDENT, line)));
        lines.push(format!("{}}}", indent));
        lines
    }

    fn body(&self, entity: &Entity<'_>) -> Vec<String> {
        let show_static = entity.shows_static();
        let mut body: Vec<String> = entity
            .methods()
            .into_iter()
            .map(|method| self.signature(method, show_static))
            .collect();
        body.extend(
            entity
                .method_class_signatures()
                .iter()
                .map(|method| self.signature(method, false)),
        );
        body
    }
}

impl SyntaxRenderer for MermaidSyntax {
    type Fragment = Vec<String>;

    fn render_entity(&self, entity: &Entity<'_>) -> Result<Vec<String>> {
        let lines = match entity {
            Entity::Class {
                in_namespace: true, ..
            } => self.class_box(&entity.name(), "", None, self.body(entity)),
            Entity::Class { .. } | Entity::ModuleAsClass(_) => {
                self.class_box(&entity.name(), INDENT, None, self.body(entity))
            }
            Entity::Module(_) => {
                self.class_box(&entity.name(), "", Some("<<module>>"), self.body(entity))
            }
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
                    "structure entity '{}' has no Mermaid form",
                    entity.original_name()
                ))
                .into())
            }
        };
        Ok(lines)
    }

    fn name(&self) -> &'static str {
        "mermaid"
    }
}

impl DiagramSyntax for MermaidSyntax {
    fn method_signature(&self, method: &MethodNode) -> String {
        self.signature(method, true)
    }

    fn namespace_block(&self, name: &str, lines: Vec<String>) -> Vec<String> {
        let mut block = vec![format!("namespace {} {{", strip_predicate(name))];
        block.extend(lines.into_iter().map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{}{}", INDENT, line)
            }
        }));
        block.push("}".to_string());
        block
    }

    fn empty_namespace_block(&self, name: &str) -> Vec<String> {
        vec![
            format!("class {} {{", strip_predicate(name)),
            format!("{}<<namespace>>", INDENT),
            "}".to_string(),
        ]
    }

    fn relationship_arrow(&self, edge: &Relationship) -> String {
        let label = if self.config.arrow_labels {
            format!(" : \"{}\"", edge.kind.label())
        } else {
            String::new()
        };
        format!(
            "{}{} {} {}{}",
            INDENT,
            flatten_name(&edge.from),
            edge.kind.arrow(),
            flatten_name(&edge.to),
            label
        )
    }

    fn namespace_note(&self, name: &str, original: &str) -> String {
        format!("note for {} \"Namespace: {}\"", strip_predicate(name), original)
    }

    fn comment(&self, text: &str) -> String {
        format!("{}%% {}", INDENT, text)
    }

    fn namespace_opener(&self) -> &'static str {
        "namespace "
    }

    fn header(&self) -> Vec<String> {
        vec!["classDiagram".to_string()]
    }

    fn footer(&self) -> Vec<String> {
        Vec::new()
    }

    fn trailing_newline(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MethodType, ParameterKind, RelationshipKind, Visibility};
    use crate::model::{ClassNode, ModuleNode, Parameter};

    fn syntax() -> MermaidSyntax {
        MermaidSyntax::new(RenderConfig::default())
    }

    #[test]
    fn test_method_signature() {
        let method = MethodNode::new("find")
            .with_method_type(MethodType::Class)
            .with_parameter(Parameter::new("id", "Integer", ParameterKind::RequiredPositional))
            .with_return_type("User");
        assert_eq!(syntax().method_signature(&method), "+<<static>> find(id: Integer) User");

        let private = MethodNode::new("secret").with_visibility(Visibility::Private);
        assert_eq!(syntax().method_signature(&private), "-secret()");
    }

    #[test]
    fn test_top_level_class() {
        let class = ClassNode::new("User").with_method(MethodNode::new("name").with_return_type("String"));
        let entity = Entity::Class {
            class: &class,
            in_namespace: false,
        };
        assert_eq!(
            syntax().render_entity(&entity).unwrap(),
            vec!["    class User {", "        +name() String", "    }"]
        );
    }

    #[test]
    fn test_module_and_module_as_class() {
        let module = ModuleNode::new("Helpers").with_method(
            MethodNode::new("build")
                .with_method_type(MethodType::Class)
                .with_return_type("Helpers"),
        );
        assert_eq!(
            syntax().render_entity(&Entity::Module(&module)).unwrap(),
            vec!["class Helpers {", "    <<module>>", "    +<<static>> build() Helpers", "}"]
        );
        assert_eq!(
            syntax().render_entity(&Entity::ModuleAsClass(&module)).unwrap(),
            vec!["    class Helpers {", "        +build() Helpers", "    }"]
        );
    }

    #[test]
    fn test_namespace_block() {
        let user = ClassNode::new("App::Models::User");
        let account = ClassNode::new("App::Models::Account");
        let entity = Entity::Namespace {
            original: "App::Models",
            classes: vec![&user, &account],
        };
        assert_eq!(
            syntax().render_entity(&entity).unwrap(),
            vec![
                "namespace App_Models {",
                "    class User {",
                "    }",
                "    class Account {",
                "    }",
                "}",
            ]
        );
    }

    #[test]
    fn test_empty_namespace_and_note() {
        let entity = Entity::EmptyNamespace { original: "Util::Empty" };
        assert_eq!(
            syntax().render_entity(&entity).unwrap(),
            vec!["class Util_Empty {", "    <<namespace>>", "}"]
        );
        assert_eq!(
            syntax().namespace_note("App_Models", "App::Models"),
            "note for App_Models \"Namespace: App::Models\""
        );
    }

    #[test]
    fn test_relationship_arrows() {
        let edge = Relationship::new(RelationshipKind::Inheritance, "App::Base", "User");
        assert_eq!(syntax().relationship_arrow(&edge), "    App_Base <|-- User : \"inherits\"");

        let edge = Relationship::new(RelationshipKind::Delegation, "User", "Logger");
        let unlabeled = MermaidSyntax::new(RenderConfig::default().with_arrow_labels(false));
        assert_eq!(unlabeled.relationship_arrow(&edge), "    User --> Logger");

        let edge = Relationship::new(RelationshipKind::Include, "Comparable", "User");
        assert_eq!(
            syntax().relationship_arrow(&edge),
            "    Comparable <|.. User : \"includes\""
        );
    }
}
