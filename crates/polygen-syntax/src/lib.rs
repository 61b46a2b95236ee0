//! Polygen Syntax Tree
//!
//! Data model for the syntax tree produced by the external source parser and
//! consumed by the Polygen extractor. The tree is purely structural: it
//! records what was written, not what it means. Semantic classification
//! (static vs instance access, delegation kinds, elision policies) happens in
//! `polygen-extract`.

pub mod ast;
pub mod span;

pub use span::Span;
