//! Serialized declaration records
//!
//! These are the raw records produced by a signature front end. They carry
//! no behavior; the [`Translator`](super::Translator) turns them into the
//! node model. Unknown `kind` tags deserialize to `Unsupported` and are
//! skipped later.

use serde::Deserialize;

use crate::core::{DiagramError, MethodType};

/// Top-level (or nested) declaration record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Class(ClassDeclaration),
    Module(ModuleDeclaration),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassDeclaration {
    pub name: String,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModuleDeclaration {
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Member of a class or module body
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Class(ClassDeclaration),
    Module(ModuleDeclaration),
    Method(MethodDefinition),
    AttrReader(Attribute),
    AttrWriter(Attribute),
    AttrAccessor(Attribute),
    Include(Mixin),
    Extend(Mixin),
    Public,
    Private,
    Protected,
    #[serde(other)]
    Unsupported,
}

impl Member {
    pub fn is_nested_declaration(&self) -> bool {
        matches!(self, Member::Class(_) | Member::Module(_))
    }

    pub fn is_method_definition(&self) -> bool {
        matches!(self, Member::Method(_))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    #[serde(default)]
    pub method_type: MethodType,
    /// First entry is the primary signature
    #[serde(default)]
    pub overloads: Vec<Signature>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mixin {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub required_positionals: Vec<Param>,
    pub optional_positionals: Vec<Param>,
    pub rest_positionals: Option<Param>,
    pub required_keywords: Vec<Param>,
    pub optional_keywords: Vec<Param>,
    pub rest_keywords: Option<Param>,
    pub block: Option<BlockSignature>,
    pub return_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockSignature {
    pub required_positionals: Vec<Param>,
    pub return_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Deserialize)]
struct Wrapped {
    declarations: Vec<Declaration>,
}

/// Read one declaration stream
///
/// Accepts either a bare JSON array of declarations or an object with a
/// `declarations` array.
pub fn read_declarations(input: &str) -> Result<Vec<Declaration>, DiagramError> {
    if input.trim_start().starts_with('[') {
        Ok(serde_json::from_str(input)?)
    } else {
        let wrapped: Wrapped = serde_json::from_str(input)?;
        Ok(wrapped.declarations)
    }
}
