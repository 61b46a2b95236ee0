//! IR declaration documents
//!
//! The extractor's output: one document per declaration (annotation type,
//! field, constructor, method), ready for an external emitter.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::annotation::{AnnotationDecl, AnnotationUse};
use super::expr::ExprNode;
use super::stmt::Block;
use super::ty::TypeRef;

/// Ordered, opaque modifier list (`public`, `static`, `final`, ...).
/// Preserved for round-trip fidelity; the extractor never interprets it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Modifiers(pub Vec<String>);

impl Modifiers {
    pub fn from_source(modifiers: &[String]) -> Self {
        Modifiers(modifiers.to_vec())
    }

    pub fn contains(&self, modifier: &str) -> bool {
        self.0.iter().any(|m| m == modifier)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

/// Extracted field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIr {
    pub owner: String,
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUse>,
    pub initializer: Option<ExprNode>,
}

/// How a constructor delegates before running its own body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Delegation {
    /// No delegation call; the supertype's default constructor is implied.
    None,
    /// `super(args)` to the designated constructor of the supertype.
    Upward(Vec<ExprNode>),
    /// `this(args)` to a sibling constructor of the same type.
    Sideways(Vec<ExprNode>),
}

/// Extracted constructor. `body` excludes the delegation call itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorIr {
    pub owner: String,
    pub params: Vec<Param>,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUse>,
    pub delegation: Delegation,
    pub body: Block,
}

impl ConstructorIr {
    /// Signature rendering used in diagnostics: `Owner(int, String)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.ty.render()).collect();
        format!("{}({})", self.owner, params.join(", "))
    }
}

/// Extracted method. `body` is None for abstract methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodIr {
    pub owner: String,
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<Param>,
    pub return_ty: TypeRef,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUse>,
    pub body: Option<Block>,
}

/// One per-declaration IR document, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Document {
    AnnotationType {
        owner: String,
        decl: Arc<AnnotationDecl>,
    },
    Field(FieldIr),
    Constructor(ConstructorIr),
    Method(MethodIr),
}

impl Document {
    /// Declaration name for reporting. Constructors report their owner.
    pub fn name(&self) -> &str {
        match self {
            Document::AnnotationType { decl, .. } => &decl.name,
            Document::Field(field) => &field.name,
            Document::Constructor(ctor) => &ctor.owner,
            Document::Method(method) => &method.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Document::AnnotationType { .. } => "annotation",
            Document::Field(_) => "field",
            Document::Constructor(_) => "constructor",
            Document::Method(_) => "method",
        }
    }
}
