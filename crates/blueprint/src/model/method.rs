//! Method-level nodes: methods, parameters, blocks and overloads

use serde::Serialize;

use crate::core::{MethodType, ParameterKind, Visibility};

/// A single method parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub kind: ParameterKind,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            kind,
        }
    }
}

/// Block accepted by a method
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Block {
    /// Block parameters, all of kind `block_parameter`
    pub parameters: Vec<Parameter>,
    pub return_type: String,
}

/// Additional signature of an overloaded method
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OverloadSignature {
    pub parameters: Vec<Parameter>,
    pub return_type: String,
}

/// A method definition, possibly synthesized from an attribute accessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNode {
    pub name: String,
    pub method_type: MethodType,
    pub visibility: Visibility,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub overloads: Vec<OverloadSignature>,
    pub block: Option<Block>,
}

impl MethodNode {
    /// Public instance method with no parameters and an empty return type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method_type: MethodType::Instance,
            visibility: Visibility::Public,
            parameters: Vec::new(),
            return_type: String::new(),
            overloads: Vec::new(),
            block: None,
        }
    }

    pub fn with_method_type(mut self, method_type: MethodType) -> Self {
        self.method_type = method_type;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    pub fn is_class_method(&self) -> bool {
        self.method_type.is_class()
    }

    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }

    /// Takes no parameters in its primary signature
    pub fn is_nullary(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Rank used to order methods inside an entity
    ///
    /// Public class methods come first, then public instance methods,
    /// then non-public class methods, then non-public instance methods.
    pub fn display_rank(&self) -> u8 {
        match (self.is_public(), self.is_class_method()) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }
}

/// Order methods for display, stable inside each visibility/scope group
pub fn ordered_methods<'a>(methods: impl IntoIterator<Item = &'a MethodNode>) -> Vec<&'a MethodNode> {
    let mut ordered: Vec<&MethodNode> = methods.into_iter().collect();
    ordered.sort_by_key(|method| method.display_rank());
    ordered
}
