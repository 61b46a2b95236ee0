//! Syntax tree nodes
//!
//! One module per node category, re-exported flat so consumers can
//! `use polygen_syntax::ast::*`.

mod decl;
mod expression;
mod statement;
mod types;

pub use decl::*;
pub use expression::*;
pub use statement::*;
pub use types::*;
