//! Declaration translator: raw records to node model
//!
//! Produces a flat, depth-first pre-order list of top-level class and module
//! nodes with fully qualified names. A class nested directly in a class
//! becomes an inner class of its parent instead of a top-level node.

use tracing::trace;

use super::declaration::{
    Attribute, BlockSignature, ClassDeclaration, Declaration, Member, MethodDefinition,
    ModuleDeclaration, Param, Signature,
};
use crate::core::{MethodType, ParameterKind, Visibility, NAMESPACE_SEPARATOR};
use crate::model::{
    Block, ClassNode, Composite, MethodNode, ModuleNode, Node, OverloadSignature, Parameter,
};

/// Nested declaration waiting to be emitted after its parent
enum Deferred<'a> {
    Class(&'a ClassDeclaration, String),
    Module(&'a ModuleDeclaration, String),
}

/// Translates declaration records into nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator;

impl Translator {
    pub fn new() -> Self {
        Self
    }

    /// Translate a declaration stream into top-level nodes
    pub fn translate(&self, declarations: &[Declaration]) -> Vec<Node> {
        let mut out = Vec::new();
        for declaration in declarations {
            match declaration {
                Declaration::Class(class) => self.emit_class(class, class.name.clone(), &mut out),
                Declaration::Module(module) => {
                    self.emit_module(module, module.name.clone(), &mut out)
                }
                Declaration::Unsupported => trace!("Skipping unsupported declaration"),
            }
        }
        out
    }

    fn emit_class(&self, declaration: &ClassDeclaration, name: String, out: &mut Vec<Node>) {
        let mut deferred = Vec::new();
        let class = self.class_node(declaration, name, &mut deferred);
        trace!(name = %class.name, inner = class.inner_classes.len(), "Translated class");
        out.push(Node::Class(class));
        self.emit_deferred(deferred, out);
    }

    fn emit_module(&self, declaration: &ModuleDeclaration, name: String, out: &mut Vec<Node>) {
        let mut deferred = Vec::new();
        let module = self.module_node(declaration, name, &mut deferred);
        trace!(name = %module.name, is_namespace = module.is_namespace, "Translated module");
        out.push(Node::Module(module));
        self.emit_deferred(deferred, out);
    }

    fn emit_deferred(&self, deferred: Vec<Deferred<'_>>, out: &mut Vec<Node>) {
        for nested in deferred {
            match nested {
                Deferred::Class(class, name) => self.emit_class(class, name, out),
                Deferred::Module(module, name) => self.emit_module(module, name, out),
            }
        }
    }

    fn class_node<'a>(
        &self,
        declaration: &'a ClassDeclaration,
        name: String,
        deferred: &mut Vec<Deferred<'a>>,
    ) -> ClassNode {
        let mut class = ClassNode::new(name);
        class.superclass = declaration.superclass.clone();

        let mut visibility = Visibility::Public;
        for member in &declaration.members {
            match member {
                Member::Class(inner) => {
                    let inner_name = qualify(&class.name, &inner.name);
                    let inner = self.class_node(inner, inner_name, deferred);
                    class.inner_classes.push(inner);
                }
                Member::Module(module) => {
                    deferred.push(Deferred::Module(module, qualify(&class.name, &module.name)));
                }
                other => self.apply_member(other, &mut visibility, &mut class),
            }
        }
        class
    }

    fn module_node<'a>(
        &self,
        declaration: &'a ModuleDeclaration,
        name: String,
        deferred: &mut Vec<Deferred<'a>>,
    ) -> ModuleNode {
        let mut module = ModuleNode::new(name);
        let has_nested = declaration.members.iter().any(Member::is_nested_declaration);
        let has_methods = declaration.members.iter().any(Member::is_method_definition);
        module.is_namespace = has_nested || !has_methods;

        let mut visibility = Visibility::Public;
        for member in &declaration.members {
            match member {
                Member::Class(class) => {
                    deferred.push(Deferred::Class(class, qualify(&module.name, &class.name)));
                }
                Member::Module(nested) => {
                    deferred.push(Deferred::Module(nested, qualify(&module.name, &nested.name)));
                }
                other => self.apply_member(other, &mut visibility, &mut module),
            }
        }
        module
    }

    /// Apply a non-declaration member to its owner
    fn apply_member<T: Mixable>(&self, member: &Member, visibility: &mut Visibility, owner: &mut T) {
        match member {
            Member::Method(definition) => {
                owner.add_child(Node::Method(self.method(definition, *visibility)));
            }
            Member::AttrReader(attr) => owner.add_child(Node::Method(reader(attr))),
            Member::AttrWriter(attr) => owner.add_child(Node::Method(writer(attr))),
            Member::AttrAccessor(attr) => {
                owner.add_child(Node::Method(reader(attr)));
                owner.add_child(Node::Method(writer(attr)));
            }
            Member::Include(mixin) => owner.includes_mut().push(mixin.name.clone()),
            Member::Extend(mixin) => owner.extends_mut().push(mixin.name.clone()),
            Member::Public => *visibility = Visibility::Public,
            Member::Private => *visibility = Visibility::Private,
            Member::Protected => *visibility = Visibility::Protected,
            Member::Class(_) | Member::Module(_) => {}
            Member::Unsupported => trace!("Skipping unsupported member"),
        }
    }

    fn method(&self, definition: &MethodDefinition, visibility: Visibility) -> MethodNode {
        let mut method = MethodNode::new(definition.name.clone())
            .with_method_type(definition.method_type)
            .with_visibility(visibility);

        let mut signatures = definition.overloads.iter();
        if let Some(primary) = signatures.next() {
            method.parameters = parameters(primary);
            method.return_type = primary.return_type.clone();
            method.block = primary.block.as_ref().map(block);
        }
        method.overloads = signatures
            .map(|signature| OverloadSignature {
                parameters: parameters(signature),
                return_type: signature.return_type.clone(),
            })
            .collect();
        method
    }
}

/// Owners that accept methods and mixin directives
trait Mixable: Composite {
    fn includes_mut(&mut self) -> &mut Vec<String>;
    fn extends_mut(&mut self) -> &mut Vec<String>;
}

impl Mixable for ClassNode {
    fn includes_mut(&mut self) -> &mut Vec<String> {
        &mut self.includes
    }

    fn extends_mut(&mut self) -> &mut Vec<String> {
        &mut self.extends
    }
}

impl Mixable for ModuleNode {
    fn includes_mut(&mut self) -> &mut Vec<String> {
        &mut self.includes
    }

    fn extends_mut(&mut self) -> &mut Vec<String> {
        &mut self.extends
    }
}

fn qualify(parent: &str, name: &str) -> String {
    format!("{}{}{}", parent, NAMESPACE_SEPARATOR, name)
}

fn reader(attr: &Attribute) -> MethodNode {
    MethodNode::new(attr.name.clone())
        .with_method_type(MethodType::Instance)
        .with_return_type(attr.type_name.clone())
}

fn writer(attr: &Attribute) -> MethodNode {
    MethodNode::new(format!("{}=", attr.name))
        .with_method_type(MethodType::Instance)
        .with_parameter(Parameter::new(
            "value",
            attr.type_name.clone(),
            ParameterKind::RequiredPositional,
        ))
        .with_return_type(attr.type_name.clone())
}

fn param(param: &Param, kind: ParameterKind, default_name: String) -> Parameter {
    let name = param.name.clone().unwrap_or(default_name);
    Parameter::new(name, param.type_name.clone(), kind)
}

/// Parameters of one signature in fixed extraction order
fn parameters(signature: &Signature) -> Vec<Parameter> {
    let mut out = Vec::new();
    out.extend(signature.required_positionals.iter().enumerate().map(|(i, p)| {
        param(p, ParameterKind::RequiredPositional, format!("arg{}", i))
    }));
    out.extend(signature.optional_positionals.iter().enumerate().map(|(i, p)| {
        param(p, ParameterKind::OptionalPositional, format!("opt_arg{}", i))
    }));
    out.extend(
        signature
            .rest_positionals
            .iter()
            .map(|p| param(p, ParameterKind::RestPositional, "rest_args".to_string())),
    );
    out.extend(
        signature
            .required_keywords
            .iter()
            .map(|p| param(p, ParameterKind::RequiredKeyword, String::new())),
    );
    out.extend(
        signature
            .optional_keywords
            .iter()
            .map(|p| param(p, ParameterKind::OptionalKeyword, String::new())),
    );
    out.extend(
        signature
            .rest_keywords
            .iter()
            .map(|p| param(p, ParameterKind::RestKeyword, "rest_keywords".to_string())),
    );
    out
}

fn block(signature: &BlockSignature) -> Block {
    Block {
        parameters: signature
            .required_positionals
            .iter()
            .enumerate()
            .map(|(i, p)| param(p, ParameterKind::BlockParameter, format!("block_arg{}", i)))
            .collect(),
        return_type: signature.return_type.clone(),
    }
}
