//! Annotation extraction and the argument elision policy
//!
//! Declarations: an annotation type's members become ordered `ArgumentDecl`s
//! with optional built default expressions; retention comes from the
//! declaration's own `@Retention(...)` meta-annotation.
//!
//! Use sites: the grammar has no positional multi-argument application, so a
//! nameless argument is legal only against a declaration with exactly one
//! argument named `value`. The extractor records whether the name was
//! elided (round-trip fidelity) while giving the elided and explicit forms
//! the same meaning, and marks explicit values that structurally equal their
//! declared default so an emitter may drop them.

use std::sync::Arc;

use polygen_syntax::ast::{
    AnnotationUseSyntax, Expression, MemberSyntax, TypeDeclSyntax,
};

use super::{DefaultMatchPolicy, Extractor};
use crate::error::ExtractError;
use crate::ir::{
    AnnotationArg, AnnotationDecl, AnnotationUse, ArgumentDecl, ExprNode, Retention,
    RESERVED_ARG_NAME,
};

impl Extractor<'_> {
    /// Extract an annotation type declaration.
    pub(crate) fn extract_annotation_decl(&mut self, decl: &TypeDeclSyntax) -> Arc<AnnotationDecl> {
        self.declaration = decl.name.clone();
        let retention = retention_of(&decl.annotations);

        let args = decl
            .members
            .iter()
            .filter_map(|member| match member {
                MemberSyntax::AnnotationArg(arg) => Some(arg),
                _ => None,
            })
            .map(|arg| {
                let ty = self.resolve_type(&arg.ty);
                let default = arg
                    .default
                    .as_ref()
                    .map(|expr| self.build_expr(expr, Some(&ty)));
                ArgumentDecl {
                    name: arg.name.clone(),
                    ty,
                    default,
                }
            })
            .collect();

        Arc::new(AnnotationDecl {
            name: decl.name.clone(),
            retention,
            args,
        })
    }

    pub(crate) fn build_annotation_uses(
        &mut self,
        uses: &[AnnotationUseSyntax],
    ) -> Vec<AnnotationUse> {
        uses.iter().map(|u| self.build_annotation_use(u)).collect()
    }

    /// Extract one annotation use against its declaration. Malformed uses
    /// degrade to a best-effort node with a diagnostic; extraction of the
    /// surrounding declaration continues.
    pub(crate) fn build_annotation_use(&mut self, syntax: &AnnotationUseSyntax) -> AnnotationUse {
        let decl = match self.annotations.get(&syntax.name) {
            Some(decl) => decl.clone(),
            None => {
                self.diag(ExtractError::UnknownType {
                    name: syntax.name.clone(),
                });
                // Synthesize an argument-less declaration so the use can
                // still round-trip.
                Arc::new(AnnotationDecl {
                    name: syntax.name.clone(),
                    retention: Retention::Unspecified,
                    args: Vec::new(),
                })
            }
        };

        let mut args: Vec<AnnotationArg> = Vec::new();
        for (index, arg) in syntax.args.iter().enumerate() {
            let (name, name_elided) = match &arg.name {
                Some(name) => {
                    if decl.arg(name).is_none() && !decl.args.is_empty() {
                        self.diag(ExtractError::UnresolvedReference {
                            name: format!("{}#{}", decl.name, name),
                        });
                    }
                    (name.clone(), false)
                }
                None => {
                    if !decl.has_single_reserved_arg() && !decl.args.is_empty() {
                        self.diag(ExtractError::AmbiguousAnnotationArgument {
                            annotation: decl.name.clone(),
                            detail: format!(
                                "positional argument {} cannot be matched; the declaration \
                                 does not have a single `{}` argument",
                                index, RESERVED_ARG_NAME
                            ),
                        });
                    }
                    // Best effort: bind by position.
                    let name = decl
                        .args
                        .get(index)
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| RESERVED_ARG_NAME.to_string());
                    (name, true)
                }
            };

            let expected = decl.arg(&name).map(|a| a.ty.clone());
            let value = self.build_expr(&arg.value, expected.as_ref());

            let redundant_with_default = decl
                .arg(&name)
                .and_then(|a| a.default.as_ref())
                .map(|default| self.value_matches_default(&value, default))
                .unwrap_or(false);

            args.push(AnnotationArg {
                name,
                value,
                name_elided,
                redundant_with_default,
            });
        }

        // Declared arguments with a default that the use site omitted.
        let defaulted = decl
            .args
            .iter()
            .filter(|a| a.default.is_some() && !args.iter().any(|e| e.name == a.name))
            .map(|a| a.name.clone())
            .collect();

        AnnotationUse {
            decl,
            args,
            defaulted,
        }
    }

    /// The single comparison point for `redundant_with_default`. The policy
    /// is deliberately swappable: structural post-build equality is the
    /// default, and no folding happens on either side.
    fn value_matches_default(&self, value: &ExprNode, default: &ExprNode) -> bool {
        match self.options.default_match {
            DefaultMatchPolicy::Structural => value == default,
            DefaultMatchPolicy::Never => false,
        }
    }
}

/// Read the retention class off a declaration's meta-annotations:
/// `@Retention(RetentionPolicy.SOURCE)` and friends. Absent or
/// unrecognizable retention is `Unspecified`.
fn retention_of(annotations: &[AnnotationUseSyntax]) -> Retention {
    let retention_use = annotations
        .iter()
        .find(|a| a.name == "Retention" || a.name.ends_with(".Retention"));
    let Some(retention_use) = retention_use else {
        return Retention::Unspecified;
    };
    let Some(arg) = retention_use.args.first() else {
        return Retention::Unspecified;
    };

    match trailing_name(&arg.value) {
        Some("SOURCE") => Retention::SourceOnly,
        Some("CLASS") => Retention::CompileVisible,
        Some("RUNTIME") => Retention::RuntimeVisible,
        _ => Retention::Unspecified,
    }
}

/// Last identifier of an expression like `RetentionPolicy.SOURCE`.
fn trailing_name(expr: &Expression) -> Option<&str> {
    match expr {
        Expression::Identifier(ident) => Some(&ident.name),
        Expression::Member(member) => Some(&member.name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polygen_syntax::ast::AnnotationArgSyntax;

    #[test]
    fn retention_reads_the_policy_member() {
        let source = AnnotationUseSyntax::new(
            "Retention",
            vec![AnnotationArgSyntax::positional(Expression::member(
                Expression::ident("RetentionPolicy"),
                "SOURCE",
            ))],
        );
        assert_eq!(retention_of(&[source]), Retention::SourceOnly);

        assert_eq!(retention_of(&[]), Retention::Unspecified);
    }
}
