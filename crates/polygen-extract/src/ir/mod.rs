//! Language-neutral IR
//!
//! The output vocabulary of the extractor: types, expressions, statements,
//! annotations, and per-declaration documents. Every node is immutable once
//! built and serializable; `AnnotationDecl` values are shared by `Arc` and
//! never mutated after construction.

mod annotation;
mod decl;
mod expr;
mod stmt;
mod ty;

pub use annotation::*;
pub use decl::*;
pub use expr::*;
pub use stmt::*;
pub use ty::*;
