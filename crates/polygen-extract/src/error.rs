//! Extraction errors and diagnostics

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Everything that can go wrong while building IR from a syntax tree.
///
/// Errors attach to the smallest enclosing IR node as a diagnostic; apart
/// from `DelegationCycle` (which voids delegation info for the whole type)
/// none of them stops the extraction of sibling declarations.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum ExtractError {
    #[error("Unknown type: {name}")]
    UnknownType { name: String },

    #[error("Annotation @{annotation} requires explicit argument names: {detail}")]
    AmbiguousAnnotationArgument { annotation: String, detail: String },

    #[error("Constructor of {owner} must delegate to a constructor of {supertype}")]
    MissingSuperDelegation { owner: String, supertype: String },

    #[error("Constructor delegation cycle in {owner}: {}", cycle.join(" -> "))]
    DelegationCycle { owner: String, cycle: Vec<String> },

    #[error("Unresolved reference: {name}")]
    UnresolvedReference { name: String },
}

/// Structured diagnostic emitted on the side channel: which unit and which
/// declaration the error belongs to, plus the error itself. A driving CLI
/// reports all of these in one pass instead of stopping at the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub unit: String,
    pub declaration: String,
    pub error: ExtractError,
}

impl Diagnostic {
    pub fn new(unit: impl Into<String>, declaration: impl Into<String>, error: ExtractError) -> Self {
        Diagnostic {
            unit: unit.into(),
            declaration: declaration.into(),
            error,
        }
    }
}
