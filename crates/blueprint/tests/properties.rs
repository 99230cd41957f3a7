//! Property tests over generated declaration streams

use blueprint::pipeline::is_builtin_type;
use blueprint::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Value};

// ===================
// Strategies
// ===================

const RETURN_TYPES: &[&str] = &[
    "String", "Integer", "Logger", "Account", "Array[Account]", "Hash[Symbol, String]", "bool",
    "Result | nil", "Box[Item]", "", "Token?",
];

fn type_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,6}"
}

fn method_strategy() -> impl Strategy<Value = Value> {
    (
        "[a-z][a-z_]{0,8}[?]?",
        prop::bool::ANY,
        prop::sample::select(RETURN_TYPES),
        0usize..3,
    )
        .prop_map(|(name, class_method, return_type, arity)| {
            let params: Vec<Value> = (0..arity).map(|_| json!({"type": "Integer"})).collect();
            json!({
                "kind": "method",
                "name": name,
                "method_type": if class_method { "class" } else { "instance" },
                "overloads": [{"required_positionals": params, "return_type": return_type}]
            })
        })
}

fn member_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => method_strategy(),
        1 => Just(json!({"kind": "private"})),
        1 => Just(json!({"kind": "public"})),
        1 => type_name_strategy().prop_map(|name| json!({"kind": "include", "name": name})),
        1 => type_name_strategy().prop_map(|name| json!({"kind": "attr_reader", "name": name.to_lowercase(), "type": name})),
    ]
}

fn declaration_strategy() -> impl Strategy<Value = Value> {
    let class = (
        type_name_strategy(),
        prop::option::of(type_name_strategy()),
        prop::collection::vec(member_strategy(), 0..5),
    )
        .prop_map(|(name, superclass, members)| {
            json!({"kind": "class", "name": name, "superclass": superclass, "members": members})
        });
    let module = (
        type_name_strategy(),
        prop::collection::vec(member_strategy(), 0..4),
        prop::option::of(type_name_strategy()),
    )
        .prop_map(|(name, mut members, nested)| {
            if let Some(nested) = nested {
                members.push(json!({"kind": "class", "name": nested}));
            }
            json!({"kind": "module", "name": name, "members": members})
        });
    prop_oneof![3 => class, 1 => module]
}

fn stream_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(declaration_strategy(), 0..6).prop_map(|decls| Value::Array(decls).to_string())
}

// ===================
// Property Test Functions
// ===================

fn check_render_is_idempotent(input: &str) -> Result<(), TestCaseError> {
    let orchestrator = Orchestrator::default();
    let document = orchestrator.parse(&[input]).map_err(|e| TestCaseError::fail(e.to_string()))?;
    for format in OutputFormat::all() {
        let first = orchestrator.render(&document, *format);
        let second = orchestrator.render(&document, *format);
        prop_assert!(first.is_ok(), "render {} failed: {:?}", format, first.as_ref().err());
        prop_assert_eq!(first.ok(), second.ok());
    }
    Ok(())
}

fn check_blank_lines_are_normalized(input: &str) -> Result<(), TestCaseError> {
    let mermaid = blueprint::render(input, "mermaid").map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert!(!mermaid.contains("\n\n\n"), "run of blank lines in:\n{mermaid}");
    prop_assert!(!mermaid.starts_with("classDiagram\n\n"));
    prop_assert!(!mermaid.ends_with('\n'));

    let uml = blueprint::render(input, "plantuml").map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert!(!uml.contains("\n\n\n"), "run of blank lines in:\n{uml}");
    prop_assert!(uml.starts_with("@startuml\n"));
    prop_assert!(uml.ends_with("@enduml\n"));
    Ok(())
}

fn check_json_mirrors_document(input: &str) -> Result<(), TestCaseError> {
    let document = blueprint::parse(input).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let output = blueprint::render(input, "json").map_err(|e| TestCaseError::fail(e.to_string()))?;
    let value: Value = serde_json::from_str(&output).map_err(|e| TestCaseError::fail(e.to_string()))?;

    let structure = value["structure"].as_array().cloned().unwrap_or_default();
    prop_assert_eq!(structure.len(), document.node_count());
    let expected = document
        .classes()
        .map(|class| (class.name.as_str(), "class"))
        .chain(document.modules().map(|module| (module.name.as_str(), "module")));
    for (entry, (name, kind)) in structure.iter().zip(expected) {
        prop_assert_eq!(entry["name"].as_str(), Some(name));
        prop_assert_eq!(entry["type"].as_str(), Some(kind));
        prop_assert_eq!(entry.get("is_namespace").is_some(), kind == "module");
        prop_assert!(entry.get("superclass").is_some());
        prop_assert!(entry["methods"].is_array());
    }
    Ok(())
}

fn check_edges_are_unique_and_sound(input: &str) -> Result<(), TestCaseError> {
    let document = blueprint::parse(input).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let edges: Vec<&Relationship> = document.edges().collect();
    for (index, edge) in edges.iter().enumerate() {
        prop_assert!(!edges[..index].contains(edge), "duplicate edge {:?}", edge);
        if edge.kind == RelationshipKind::Delegation {
            prop_assert!(!is_builtin_type(&edge.to), "builtin delegation target {}", edge.to);
        }
    }
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn render_is_idempotent(input in stream_strategy()) {
        check_render_is_idempotent(&input)?;
    }

    #[test]
    fn blank_lines_are_normalized(input in stream_strategy()) {
        check_blank_lines_are_normalized(&input)?;
    }

    #[test]
    fn json_mirrors_document(input in stream_strategy()) {
        check_json_mirrors_document(&input)?;
    }

    #[test]
    fn edges_are_unique_and_sound(input in stream_strategy()) {
        check_edges_are_unique_and_sound(&input)?;
    }
}
