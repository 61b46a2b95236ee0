//! Syntax tree to IR extraction
//!
//! Walks one compilation unit, classifies each declaration (annotation type,
//! field, constructor, method), and dispatches to the matching builder. The
//! builders are mutually recursive (statements contain expressions, and
//! annotations decorate any declaration), split across the submodules as
//! one `impl Extractor` per concern.
//!
//! Extraction is two-phase: `TypeTable::collect` must have seen every unit
//! before `Extractor::extract_unit` runs for any unit (expression building
//! needs the complete type universe). Within Phase 2 nothing blocks, and a
//! failed declaration degrades to a best-effort document plus a diagnostic
//! instead of cancelling its siblings.

mod annotation;
mod ctor;
mod expr;
mod stmt;
mod types;

pub use types::{DeclaredType, TypeTable};

use std::sync::Arc;

use rustc_hash::FxHashMap;

use polygen_syntax::ast::{
    CompilationUnit, FieldSyntax, MemberSyntax, MethodSyntax, TypeDeclKind, TypeDeclSyntax,
    TypeSyntax,
};

use crate::error::{Diagnostic, ExtractError};
use crate::ir::{
    AnnotationDecl, Document, FieldIr, MethodIr, Modifiers, Param, PrimitiveType, TypeRef,
};

/// How an explicit annotation argument is compared against its declared
/// default when deciding `redundant_with_default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultMatchPolicy {
    /// Structural (post-build) equality of the two expression trees. No
    /// folding: `9_000 * 545` never matches a literal default.
    #[default]
    Structural,
    /// Never mark an explicit argument redundant.
    Never,
}

/// Caller-configurable extraction knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub default_match: DefaultMatchPolicy,
}

/// Syntax to IR extractor for one or more compilation units.
///
/// Holds only a shared reference to the finalized `TypeTable`, so separate
/// instances can process units in parallel with no coordination.
pub struct Extractor<'a> {
    types: &'a TypeTable,
    options: ExtractOptions,
    /// Annotation declarations visible to use sites, keyed by both simple
    /// name and qualified path.
    annotations: FxHashMap<String, Arc<AnnotationDecl>>,
    diagnostics: Vec<Diagnostic>,
    /// Current unit and declaration, for diagnostic attribution.
    unit: String,
    declaration: String,
    /// Type-variable names in scope (enclosing type, then method).
    type_params: Vec<String>,
    /// Lexical value scopes: parameter/field names, then one frame per block.
    scopes: Vec<Vec<String>>,
}

impl<'a> Extractor<'a> {
    pub fn new(types: &'a TypeTable) -> Self {
        Self::with_options(types, ExtractOptions::default())
    }

    pub fn with_options(types: &'a TypeTable, options: ExtractOptions) -> Self {
        Extractor {
            types,
            options,
            annotations: FxHashMap::default(),
            diagnostics: Vec::new(),
            unit: String::new(),
            declaration: String::new(),
            type_params: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Register the annotation types a unit declares, so use sites in other
    /// units can reference them. Safe to call repeatedly; `extract_unit`
    /// runs it for its own unit.
    pub fn declare_annotations(&mut self, unit: &CompilationUnit) {
        self.unit = unit.name.clone();
        for decl in &unit.types {
            self.declare_annotations_in(decl, "");
        }
    }

    fn declare_annotations_in(&mut self, decl: &TypeDeclSyntax, prefix: &str) {
        let path = qualify(prefix, &decl.name);
        if decl.kind == TypeDeclKind::AnnotationType && !self.annotations.contains_key(&path) {
            let extracted = self.extract_annotation_decl(decl);
            // Simple names follow a first-wins rule when two declarations
            // collide; the qualified path is always registered.
            self.annotations
                .entry(decl.name.clone())
                .or_insert_with(|| extracted.clone());
            self.annotations.insert(path.clone(), extracted);
        }
        for member in &decl.members {
            if let MemberSyntax::Nested(nested) = member {
                self.declare_annotations_in(nested, &path);
            }
        }
    }

    /// Phase 2: build one IR document per declaration in the unit, in
    /// source order (nested declarations inline where they appear).
    pub fn extract_unit(&mut self, unit: &CompilationUnit) -> Vec<Document> {
        self.declare_annotations(unit);
        self.unit = unit.name.clone();

        let mut docs = Vec::new();
        for decl in &unit.types {
            self.extract_type("", decl, &mut docs);
        }
        docs
    }

    /// Drain the diagnostics accumulated so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // ========================================================================
    // Declaration dispatch
    // ========================================================================

    fn extract_type(&mut self, prefix: &str, decl: &TypeDeclSyntax, docs: &mut Vec<Document>) {
        let path = qualify(prefix, &decl.name);

        if decl.kind == TypeDeclKind::AnnotationType {
            // Registered during declare_annotations; emit the document here
            // so it lands in source order.
            let extracted = self
                .annotations
                .get(&path)
                .or_else(|| self.annotations.get(&decl.name))
                .cloned()
                .unwrap_or_else(|| Arc::new(AnnotationDecl {
                    name: decl.name.clone(),
                    retention: crate::ir::Retention::Unspecified,
                    args: Vec::new(),
                }));
            docs.push(Document::AnnotationType {
                owner: path,
                decl: extracted,
            });
            return;
        }

        let saved_params = self.type_params.len();
        self.type_params.extend(decl.type_params.iter().cloned());

        let field_names: Vec<String> = decl
            .members
            .iter()
            .filter_map(|m| match m {
                MemberSyntax::Field(f) => Some(f.name.clone()),
                _ => None,
            })
            .collect();

        // Constructors are resolved together so sideways-delegation chains
        // can be cycle-checked per type, then spliced back in source order.
        let ctors: Vec<_> = decl
            .members
            .iter()
            .filter_map(|m| match m {
                MemberSyntax::Constructor(c) => Some(c),
                _ => None,
            })
            .collect();
        let mut ctor_irs = self
            .extract_constructors(&path, decl, &ctors, &field_names)
            .into_iter();

        for member in &decl.members {
            match member {
                MemberSyntax::Field(field) => {
                    let ir = self.extract_field(&path, field, &field_names);
                    docs.push(Document::Field(ir));
                }
                MemberSyntax::Method(method) => {
                    let ir = self.extract_method(&path, method, &field_names);
                    docs.push(Document::Method(ir));
                }
                MemberSyntax::Constructor(_) => {
                    if let Some(ir) = ctor_irs.next() {
                        docs.push(Document::Constructor(ir));
                    }
                }
                MemberSyntax::Nested(nested) => {
                    self.extract_type(&path, nested, docs);
                }
                MemberSyntax::AnnotationArg(_) => {
                    // Only meaningful inside annotation types.
                }
            }
        }

        self.type_params.truncate(saved_params);
    }

    fn extract_field(&mut self, owner: &str, field: &FieldSyntax, field_names: &[String]) -> FieldIr {
        self.declaration = field.name.clone();
        let ty = self.resolve_type(&field.ty);
        let annotations = self.build_annotation_uses(&field.annotations);

        self.enter_declaration_scope(field_names, &[]);
        let initializer = field
            .initializer
            .as_ref()
            .map(|init| self.build_expr(init, Some(&ty)));
        self.leave_declaration_scope();

        FieldIr {
            owner: owner.to_string(),
            name: field.name.clone(),
            ty,
            modifiers: Modifiers::from_source(&field.modifiers),
            annotations,
            initializer,
        }
    }

    fn extract_method(
        &mut self,
        owner: &str,
        method: &MethodSyntax,
        field_names: &[String],
    ) -> MethodIr {
        self.declaration = method.name.clone();

        let saved_params = self.type_params.len();
        self.type_params.extend(method.type_params.iter().cloned());

        let params: Vec<Param> = method
            .params
            .iter()
            .map(|p| Param {
                name: p.name.clone(),
                ty: self.resolve_type(&p.ty),
            })
            .collect();
        let return_ty = match &method.return_ty {
            Some(ty) => self.resolve_type(ty),
            None => TypeRef::Primitive(PrimitiveType::Void),
        };
        let annotations = self.build_annotation_uses(&method.annotations);

        let param_names: Vec<String> = method.params.iter().map(|p| p.name.clone()).collect();
        self.enter_declaration_scope(field_names, &param_names);
        let body = method.body.as_ref().map(|body| self.build_block(body));
        self.leave_declaration_scope();

        self.type_params.truncate(saved_params);

        MethodIr {
            owner: owner.to_string(),
            name: method.name.clone(),
            type_params: method.type_params.clone(),
            params,
            return_ty,
            modifiers: Modifiers::from_source(&method.modifiers),
            annotations,
            body,
        }
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Resolve type syntax, degrading an unknown type to a placeholder plus
    /// a diagnostic so a partial IR can still be emitted.
    pub(crate) fn resolve_type(&mut self, ty: &TypeSyntax) -> TypeRef {
        match self.types.resolve(ty, &self.type_params) {
            Ok(resolved) => resolved,
            Err(error) => {
                self.diag(error);
                TypeRef::Unresolved(ty.render())
            }
        }
    }

    pub(crate) fn diag(&mut self, error: ExtractError) {
        self.diagnostics
            .push(Diagnostic::new(&self.unit, &self.declaration, error));
    }

    /// Seed the value scope for one declaration body: the owner's fields,
    /// the receiver names, and the parameters.
    pub(crate) fn enter_declaration_scope(&mut self, field_names: &[String], params: &[String]) {
        let mut frame: Vec<String> = vec!["this".to_string(), "super".to_string()];
        frame.extend(field_names.iter().cloned());
        frame.extend(params.iter().cloned());
        self.scopes.push(frame);
    }

    pub(crate) fn leave_declaration_scope(&mut self) {
        self.scopes.pop();
    }

    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub(crate) fn declare_local(&mut self, name: &str) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.push(name.to_string());
        }
    }

    pub(crate) fn in_scope(&self, name: &str) -> bool {
        self.scopes
            .iter()
            .rev()
            .any(|frame| frame.iter().any(|n| n == name))
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
