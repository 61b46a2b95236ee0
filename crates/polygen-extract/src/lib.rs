//! Source-to-IR extraction for the polygen code model.
//!
//! Input is the language-neutral syntax tree from `polygen-syntax`; output
//! is a flat list of [`Document`] values (annotation types, fields,
//! constructors, methods) plus diagnostics. Extraction never aborts on a
//! malformed construct: the offending node degrades to an `Unknown`
//! placeholder and the problem is reported as a [`Diagnostic`].
//!
//! Extraction runs in two phases. Phase one walks every compilation unit
//! and collects declared types and annotation declarations so that phase
//! two can resolve forward and cross-unit references; phase two then builds
//! the IR per unit.

pub mod error;
pub mod extract;
pub mod ir;

pub use error::{Diagnostic, ExtractError, ExtractResult};
pub use extract::{DefaultMatchPolicy, ExtractOptions, Extractor, TypeTable};
pub use ir::Document;

use polygen_syntax::ast::CompilationUnit;

/// Extract every compilation unit with default options.
pub fn extract_units(units: &[CompilationUnit]) -> (Vec<Document>, Vec<Diagnostic>) {
    extract_units_with(units, ExtractOptions::default())
}

/// Extract every compilation unit.
///
/// Documents are returned in unit order, then declaration order within a
/// unit. Diagnostics carry the unit and declaration they arose in.
pub fn extract_units_with(
    units: &[CompilationUnit],
    options: ExtractOptions,
) -> (Vec<Document>, Vec<Diagnostic>) {
    // Phase one: collect all declared types before building anything, so
    // that references between units resolve regardless of input order.
    let types = TypeTable::collect(units);

    let mut extractor = Extractor::with_options(&types, options);
    for unit in units {
        extractor.declare_annotations(unit);
    }

    // Phase two: build IR documents per unit.
    let mut documents = Vec::new();
    for unit in units {
        documents.extend(extractor.extract_unit(unit));
    }
    let diagnostics = extractor.take_diagnostics();
    (documents, diagnostics)
}
