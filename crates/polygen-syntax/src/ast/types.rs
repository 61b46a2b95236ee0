//! Type syntax nodes
//!
//! Types as written in source: a (possibly nested) name with optional type
//! arguments, or an array suffix. Spellings are kept verbatim; deciding
//! whether `int` is a primitive or `ForTest2.ForTest3` names a nested
//! declaration is the extractor's job.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// A type as it appears in a declaration or expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSyntax {
    pub node: TypeNode,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeNode {
    /// Dotted name with optional type arguments: `int`, `String`,
    /// `List<T>`, `Outer.Inner`.
    Name {
        path: Vec<String>,
        args: Vec<TypeSyntax>,
    },

    /// Array suffix: `T[]`, `int[][]`.
    Array(Box<TypeSyntax>),
}

impl TypeSyntax {
    /// Simple (single-segment) name without type arguments.
    pub fn named(name: impl Into<String>) -> Self {
        TypeSyntax {
            node: TypeNode::Name {
                path: vec![name.into()],
                args: Vec::new(),
            },
            span: Span::synthetic(),
        }
    }

    /// Dotted name without type arguments: `Outer.Inner`.
    pub fn nested(path: &[&str]) -> Self {
        TypeSyntax {
            node: TypeNode::Name {
                path: path.iter().map(|s| s.to_string()).collect(),
                args: Vec::new(),
            },
            span: Span::synthetic(),
        }
    }

    /// Name with type arguments: `List<String>`.
    pub fn generic(base: impl Into<String>, args: Vec<TypeSyntax>) -> Self {
        TypeSyntax {
            node: TypeNode::Name {
                path: vec![base.into()],
                args,
            },
            span: Span::synthetic(),
        }
    }

    /// Array of the given element type.
    pub fn array(element: TypeSyntax) -> Self {
        TypeSyntax {
            node: TypeNode::Array(Box::new(element)),
            span: Span::synthetic(),
        }
    }

    /// Source-order rendering of the type, used in diagnostics and
    /// constructor signatures.
    pub fn render(&self) -> String {
        match &self.node {
            TypeNode::Name { path, args } => {
                let mut out = path.join(".");
                if !args.is_empty() {
                    let rendered: Vec<String> = args.iter().map(|a| a.render()).collect();
                    out.push('<');
                    out.push_str(&rendered.join(", "));
                    out.push('>');
                }
                out
            }
            TypeNode::Array(element) => format!("{}[]", element.render()),
        }
    }
}
