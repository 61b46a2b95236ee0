//! Declaration syntax nodes
//!
//! Compilation units, type declarations, and their members. Modifiers are
//! carried as an ordered list of source keywords; the extractor preserves
//! them without interpretation.

use serde::{Deserialize, Serialize};

use crate::span::Span;

use super::expression::Expression;
use super::statement::BlockStatement;
use super::types::TypeSyntax;

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Identifier for diagnostics, typically the file path.
    pub name: String,
    pub package: Option<String>,
    pub types: Vec<TypeDeclSyntax>,
}

/// A class, interface, or annotation type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclSyntax {
    pub kind: TypeDeclKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub annotations: Vec<AnnotationUseSyntax>,
    pub type_params: Vec<String>,
    pub extends: Option<TypeSyntax>,
    pub members: Vec<MemberSyntax>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDeclKind {
    Class,
    Interface,
    AnnotationType,
}

/// Member of a type declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemberSyntax {
    Field(FieldSyntax),
    Constructor(ConstructorSyntax),
    Method(MethodSyntax),
    /// Argument declaration inside an annotation type:
    /// `int someDefaultValue() default 12345;`
    AnnotationArg(AnnotationArgDeclSyntax),
    Nested(TypeDeclSyntax),
}

/// Field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSyntax {
    pub name: String,
    pub ty: TypeSyntax,
    pub modifiers: Vec<String>,
    pub annotations: Vec<AnnotationUseSyntax>,
    pub initializer: Option<Expression>,
    pub span: Span,
}

/// Constructor declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorSyntax {
    pub params: Vec<ParamSyntax>,
    pub modifiers: Vec<String>,
    pub annotations: Vec<AnnotationUseSyntax>,
    pub body: BlockStatement,
    pub span: Span,
}

/// Method declaration; `body` is None for abstract methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSyntax {
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<ParamSyntax>,
    /// None means `void`.
    pub return_ty: Option<TypeSyntax>,
    pub modifiers: Vec<String>,
    pub annotations: Vec<AnnotationUseSyntax>,
    pub body: Option<BlockStatement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSyntax {
    pub name: String,
    pub ty: TypeSyntax,
}

/// One argument declared by an annotation type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationArgDeclSyntax {
    pub name: String,
    pub ty: TypeSyntax,
    pub default: Option<Expression>,
    pub span: Span,
}

/// Annotation applied at a use site: `@Name`, `@Name(expr)`,
/// `@Name(a = x, b = y)`. An argument without a name was written
/// positionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationUseSyntax {
    pub name: String,
    pub args: Vec<AnnotationArgSyntax>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationArgSyntax {
    pub name: Option<String>,
    pub value: Expression,
}

// ============================================================================
// Construction helpers
// ============================================================================

impl ParamSyntax {
    pub fn new(name: impl Into<String>, ty: TypeSyntax) -> Self {
        ParamSyntax {
            name: name.into(),
            ty,
        }
    }
}

impl AnnotationUseSyntax {
    pub fn new(name: impl Into<String>, args: Vec<AnnotationArgSyntax>) -> Self {
        AnnotationUseSyntax {
            name: name.into(),
            args,
            span: Span::synthetic(),
        }
    }
}

impl AnnotationArgSyntax {
    /// Named argument: `someValue = expr`
    pub fn named(name: impl Into<String>, value: Expression) -> Self {
        AnnotationArgSyntax {
            name: Some(name.into()),
            value,
        }
    }

    /// Positional argument: `@Name(expr)`
    pub fn positional(value: Expression) -> Self {
        AnnotationArgSyntax { name: None, value }
    }
}

impl TypeDeclSyntax {
    /// Minimal class declaration; members and clauses added by the caller.
    pub fn class(name: impl Into<String>) -> Self {
        TypeDeclSyntax {
            kind: TypeDeclKind::Class,
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            type_params: Vec::new(),
            extends: None,
            members: Vec::new(),
            span: Span::synthetic(),
        }
    }

    /// Minimal annotation type declaration.
    pub fn annotation_type(name: impl Into<String>) -> Self {
        TypeDeclSyntax {
            kind: TypeDeclKind::AnnotationType,
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            type_params: Vec::new(),
            extends: None,
            members: Vec::new(),
            span: Span::synthetic(),
        }
    }
}

impl CompilationUnit {
    pub fn new(name: impl Into<String>, types: Vec<TypeDeclSyntax>) -> Self {
        CompilationUnit {
            name: name.into(),
            package: None,
            types,
        }
    }
}
