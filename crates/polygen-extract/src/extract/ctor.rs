//! Constructor delegation resolution
//!
//! The first statement of a constructor body decides its delegation:
//! `super(...)` is upward (to the designated constructor of the supertype),
//! `this(...)` is sideways (to a sibling constructor), anything else is no
//! delegation. The delegation call is captured as built argument
//! expressions and stripped from the body.
//!
//! Sideways chains are resolved per type, not per constructor: constructors
//! form an arena with index-based delegation edges, and a traversal with
//! in-progress marking detects cycles that span any number of constructors.
//! A cycle is unrecoverable for the type: every constructor on it is
//! emitted with `Delegation::None` plus the diagnostic.

use polygen_syntax::ast::{
    ConstructorSyntax, Expression, LiteralKind, Statement, TypeDeclSyntax,
};

use super::Extractor;
use crate::error::ExtractError;
use crate::ir::{Block, ConstructorIr, Delegation, Modifiers, Param};

/// What the first statement of a constructor body spells.
enum DelegationSyntax<'s> {
    Upward(&'s [Expression]),
    Sideways(&'s [Expression]),
    None,
}

fn classify(ctor: &ConstructorSyntax) -> DelegationSyntax<'_> {
    if let Some(Statement::Expression(first)) = ctor.body.statements.first() {
        if let Expression::Call(call) = &first.expression {
            if call.target.is_none() {
                match call.name.as_str() {
                    "super" => return DelegationSyntax::Upward(&call.args),
                    "this" => return DelegationSyntax::Sideways(&call.args),
                    _ => {}
                }
            }
        }
    }
    DelegationSyntax::None
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl Extractor<'_> {
    /// Resolve every constructor of one type. Returned in source order.
    pub(crate) fn extract_constructors(
        &mut self,
        owner: &str,
        decl: &TypeDeclSyntax,
        ctors: &[&ConstructorSyntax],
        field_names: &[String],
    ) -> Vec<ConstructorIr> {
        if ctors.is_empty() {
            return Vec::new();
        }
        self.declaration = owner.to_string();

        // Index-based sideways edges: a `this(...)` call binds the sibling
        // matching its argument count; equal-arity overloads are told apart
        // by the derivable argument types.
        let edges: Vec<Option<usize>> = ctors
            .iter()
            .map(|ctor| match classify(ctor) {
                DelegationSyntax::Sideways(args) => sideways_target(ctors, ctor, args),
                _ => None,
            })
            .collect();

        let in_cycle = self.mark_delegation_cycles(owner, decl, ctors, &edges);

        ctors
            .iter()
            .zip(in_cycle)
            .map(|(ctor, cyclic)| self.extract_constructor(owner, decl, ctor, field_names, cyclic))
            .collect()
    }

    /// Walk the sideways-delegation graph; emit one `DelegationCycle`
    /// diagnostic per cycle and return which constructors sit on one.
    fn mark_delegation_cycles(
        &mut self,
        owner: &str,
        decl: &TypeDeclSyntax,
        ctors: &[&ConstructorSyntax],
        edges: &[Option<usize>],
    ) -> Vec<bool> {
        let mut marks = vec![Mark::Unvisited; ctors.len()];
        let mut in_cycle = vec![false; ctors.len()];

        for start in 0..ctors.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            let mut path: Vec<usize> = Vec::new();
            let mut current = start;
            loop {
                match marks[current] {
                    Mark::Done => break,
                    Mark::InProgress => {
                        let entry = path.iter().position(|&i| i == current).unwrap_or(0);
                        let cycle: Vec<String> = path[entry..]
                            .iter()
                            .map(|&i| signature(&decl.name, ctors[i]))
                            .collect();
                        for &i in &path[entry..] {
                            in_cycle[i] = true;
                        }
                        self.diag(ExtractError::DelegationCycle {
                            owner: owner.to_string(),
                            cycle,
                        });
                        break;
                    }
                    Mark::Unvisited => {
                        marks[current] = Mark::InProgress;
                        path.push(current);
                        match edges[current] {
                            Some(next) => current = next,
                            None => break,
                        }
                    }
                }
            }
            for &i in &path {
                marks[i] = Mark::Done;
            }
        }

        in_cycle
    }

    fn extract_constructor(
        &mut self,
        owner: &str,
        decl: &TypeDeclSyntax,
        ctor: &ConstructorSyntax,
        field_names: &[String],
        cyclic: bool,
    ) -> ConstructorIr {
        self.declaration = signature(&decl.name, ctor);

        let params: Vec<Param> = ctor
            .params
            .iter()
            .map(|p| Param {
                name: p.name.clone(),
                ty: self.resolve_type(&p.ty),
            })
            .collect();
        let annotations = self.build_annotation_uses(&ctor.annotations);

        let param_names: Vec<String> = ctor.params.iter().map(|p| p.name.clone()).collect();
        self.enter_declaration_scope(field_names, &param_names);

        let (delegation, skip_first) = match classify(ctor) {
            _ if cyclic => (Delegation::None, true),
            DelegationSyntax::Upward(args) => {
                let built = args.iter().map(|a| self.build_expr(a, None)).collect();
                (Delegation::Upward(built), true)
            }
            DelegationSyntax::Sideways(args) => {
                let built = args.iter().map(|a| self.build_expr(a, None)).collect();
                (Delegation::Sideways(built), true)
            }
            DelegationSyntax::None => (Delegation::None, false),
        };

        // Body excludes the delegation call itself.
        let statements = ctor
            .body
            .statements
            .iter()
            .skip(if skip_first { 1 } else { 0 })
            .map(|stmt| self.build_stmt(stmt))
            .collect();
        let body = Block::new(statements);

        self.leave_declaration_scope();

        // A supertype without a default constructor demands explicit
        // delegation; a sideways-delegating constructor defers the
        // obligation to its target. Absence is reported but recovered by
        // assuming the implicit default-constructor call.
        if matches!(delegation, Delegation::None) && !cyclic {
            if let Some(extends) = &decl.extends {
                let rendered = extends.render();
                let segments: Vec<&str> = rendered.split('.').collect();
                let needs_explicit = self
                    .types
                    .resolve_path(&segments)
                    .and_then(|qualified| self.types.lookup(&qualified))
                    .map(|supertype| !supertype.has_default_constructor())
                    .unwrap_or(false);
                if needs_explicit {
                    self.diag(ExtractError::MissingSuperDelegation {
                        owner: owner.to_string(),
                        supertype: rendered,
                    });
                }
            }
        }

        ConstructorIr {
            owner: owner.to_string(),
            params,
            modifiers: Modifiers::from_source(&ctor.modifiers),
            annotations,
            delegation,
            body,
        }
    }
}

/// Resolve a `this(...)` call to the sibling constructor it designates.
/// Arity narrows the candidates; when several siblings share the arity,
/// the static types derivable from the arguments without evaluation
/// (literal spellings, the caller's own parameter types, cast and creation
/// types) pick the sibling whose parameter list is consistent with every
/// derivable type. Falls back to the first arity match when the types
/// cannot decide.
fn sideways_target(
    ctors: &[&ConstructorSyntax],
    caller: &ConstructorSyntax,
    args: &[Expression],
) -> Option<usize> {
    let candidates: Vec<usize> = ctors
        .iter()
        .enumerate()
        .filter(|(_, sibling)| sibling.params.len() == args.len())
        .map(|(index, _)| index)
        .collect();
    if candidates.len() <= 1 {
        return candidates.first().copied();
    }

    let derived: Vec<Option<String>> =
        args.iter().map(|arg| static_spelling(arg, caller)).collect();
    candidates
        .iter()
        .copied()
        .find(|&index| {
            ctors[index]
                .params
                .iter()
                .zip(&derived)
                .all(|(param, ty)| match ty {
                    Some(ty) => *ty == param.ty.render(),
                    None => true,
                })
        })
        .or_else(|| candidates.first().copied())
}

/// Static type spelling of an argument expression, where one is derivable
/// without evaluation. None for expressions that do not pin a type.
fn static_spelling(expr: &Expression, caller: &ConstructorSyntax) -> Option<String> {
    match expr {
        Expression::Literal(lit) => {
            let suffixed = |c: char, u: char| lit.text.ends_with(c) || lit.text.ends_with(u);
            let spelling = match lit.kind {
                LiteralKind::Int if suffixed('l', 'L') => "long",
                LiteralKind::Int => "int",
                LiteralKind::Float if suffixed('f', 'F') => "float",
                LiteralKind::Float => "double",
                LiteralKind::Boolean => "boolean",
                LiteralKind::Char => "char",
                LiteralKind::String => "String",
                LiteralKind::Null => return None,
            };
            Some(spelling.to_string())
        }
        Expression::Identifier(ident) => caller
            .params
            .iter()
            .find(|p| p.name == ident.name)
            .map(|p| p.ty.render()),
        Expression::Cast(cast) => Some(cast.ty.render()),
        Expression::New(new) => Some(new.ty.render()),
        _ => None,
    }
}

/// Diagnostic rendering of a constructor: `Derived(int, String)`.
fn signature(type_name: &str, ctor: &ConstructorSyntax) -> String {
    let params: Vec<String> = ctor.params.iter().map(|p| p.ty.render()).collect();
    format!("{}({})", type_name, params.join(", "))
}
