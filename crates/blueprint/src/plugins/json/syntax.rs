//! JSON structure entries
//!
//! Each top-level node becomes one [`JsonEntry`]. Field order is the
//! serialized key order.

use anyhow::Result;
use serde::Serialize;

use crate::core::{short_name, DiagramError, MethodType, SyntaxRenderer, Visibility};
use crate::model::{ordered_methods, Block, ClassNode, Composite, MethodNode, Node, OverloadSignature, Parameter};
use crate::pipeline::Entity;

/// One element of the `structure` array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonEntry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub superclass: Option<String>,
    pub methods: Vec<JsonMethod>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inner_classes: Vec<JsonInnerClass>,
    /// Present on every module entry, absent on classes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_namespace: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonMethod {
    pub name: String,
    pub method_type: MethodType,
    pub visibility: Visibility,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overloads: Vec<OverloadSignature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<Block>,
}

/// Inner classes carry a reduced method form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonInnerClass {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub methods: Vec<JsonInnerMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonInnerMethod {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
}

impl From<&MethodNode> for JsonMethod {
    fn from(method: &MethodNode) -> Self {
        Self {
            name: method.name.clone(),
            method_type: method.method_type,
            visibility: method.visibility,
            parameters: method.parameters.clone(),
            return_type: method.return_type.clone(),
            overloads: method.overloads.clone(),
            block: method.block.clone(),
        }
    }
}

impl From<&ClassNode> for JsonInnerClass {
    fn from(class: &ClassNode) -> Self {
        Self {
            name: short_name(&class.name).to_string(),
            kind: class.inner_class_kind().as_str(),
            methods: class
                .methods()
                .map(|method| JsonInnerMethod {
                    name: method.name.clone(),
                    parameters: method.parameters.clone(),
                    return_type: method.return_type.clone(),
                })
                .collect(),
        }
    }
}

/// Maps structure entities to serializable entries
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSyntax;

impl JsonSyntax {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxRenderer for JsonSyntax {
    type Fragment = JsonEntry;

    fn render_entity(&self, entity: &Entity<'_>) -> Result<JsonEntry> {
        let Entity::Structure(node) = entity else {
            return Err(DiagramError::render_error(format!(
                "JSON output takes structure entities, got {:?} '{}'",
                entity.kind(),
                entity.original_name()
            ))
            .into());
        };

        let methods = ordered_methods(node.methods())
            .into_iter()
            .map(JsonMethod::from)
            .collect();

        let entry = match node {
            Node::Class(class) => JsonEntry {
                kind: "class",
                name: class.name.clone(),
                superclass: class.superclass.clone(),
                methods,
                includes: class.includes.clone(),
                extends: class.extends.clone(),
                inner_classes: class.inner_classes.iter().map(JsonInnerClass::from).collect(),
                is_namespace: None,
            },
            Node::Module(module) => JsonEntry {
                kind: "module",
                name: module.name.clone(),
                superclass: None,
                methods,
                includes: module.includes.clone(),
                extends: module.extends.clone(),
                inner_classes: Vec::new(),
                is_namespace: Some(module.is_namespace),
            },
            other => {
                return Err(DiagramError::invariant_violation(format!(
                    "unexpected top-level {} node",
                    other.kind()
                ))
                .into())
            }
        };
        Ok(entry)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
