//! IR annotations
//!
//! Declarations and use sites are separate: a use references its declaration
//! by `Arc` and never mutates it. The elision rules (when an argument name
//! or a defaulted argument may be omitted at regeneration time) live in the
//! extractor; the flags recorded here are what the emitter consults.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::expr::ExprNode;
use super::ty::TypeRef;

/// The reserved single-argument name. An annotation declaring exactly one
/// argument with this name may be applied without spelling the name.
pub const RESERVED_ARG_NAME: &str = "value";

/// How long the annotation's metadata remains available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Retention {
    SourceOnly,
    CompileVisible,
    RuntimeVisible,
    Unspecified,
}

/// A declared annotation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDecl {
    pub name: String,
    pub retention: Retention,
    pub args: Vec<ArgumentDecl>,
}

/// One argument declared by an annotation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDecl {
    pub name: String,
    pub ty: TypeRef,
    pub default: Option<ExprNode>,
}

impl AnnotationDecl {
    /// True when use sites may omit the argument name: exactly one declared
    /// argument, and it carries the reserved name.
    pub fn has_single_reserved_arg(&self) -> bool {
        self.args.len() == 1 && self.args[0].name == RESERVED_ARG_NAME
    }

    pub fn arg(&self, name: &str) -> Option<&ArgumentDecl> {
        self.args.iter().find(|a| a.name == name)
    }
}

/// An annotation applied at a use site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationUse {
    pub decl: Arc<AnnotationDecl>,
    /// Explicitly written arguments, in source order.
    pub args: Vec<AnnotationArg>,
    /// Names of declared arguments the use site left to their defaults.
    pub defaulted: Vec<String>,
}

/// One explicitly written argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationArg {
    pub name: String,
    pub value: ExprNode,
    /// The source omitted the name (reserved single-argument form).
    pub name_elided: bool,
    /// The explicit value structurally equals the declared default, so an
    /// emitter may drop the argument entirely.
    pub redundant_with_default: bool,
}

impl AnnotationUse {
    pub fn arg(&self, name: &str) -> Option<&AnnotationArg> {
        self.args.iter().find(|a| a.name == name)
    }

    /// Semantic equality: same declaration, same argument names and values,
    /// same defaulted set. Formatting facts (`name_elided`,
    /// `redundant_with_default`) are ignored, since eliding is
    /// meaning-preserving.
    pub fn semantic_eq(&self, other: &AnnotationUse) -> bool {
        self.decl == other.decl
            && self.defaulted == other.defaulted
            && self.args.len() == other.args.len()
            && self
                .args
                .iter()
                .zip(&other.args)
                .all(|(a, b)| a.name == b.name && a.value == b.value)
    }
}
