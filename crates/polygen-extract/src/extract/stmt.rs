//! Statement building
//!
//! Structural conversion of statement syntax into `StmtNode`s, with three
//! normalizations the emitters rely on:
//!
//! - unbraced single-statement bodies become one-element blocks;
//! - switch label groups that fall into a shared body are merged into one
//!   case, and `falls_through` is derived from the case's own statements;
//! - consecutive catch clauses sharing a body and binding collapse into one
//!   clause with a multi-member exception-type set.

use polygen_syntax::ast::{
    BlockStatement, CaseSection, CatchSyntax, Statement, SwitchStatement, TryStatement,
};

use super::Extractor;
use crate::ir::{Block, CatchClause, ExprNode, StmtNode, SwitchCase, VarDeclarator};

impl Extractor<'_> {
    pub(crate) fn build_stmt(&mut self, stmt: &Statement) -> StmtNode {
        match stmt {
            Statement::Expression(expr_stmt) => {
                StmtNode::Expression(self.build_expr(&expr_stmt.expression, None))
            }

            Statement::VariableDecl(decl) => {
                let ty = self.resolve_type(&decl.ty);
                let declarators = decl
                    .declarators
                    .iter()
                    .map(|d| {
                        self.declare_local(&d.name);
                        VarDeclarator {
                            name: d.name.clone(),
                            ty: ty.clone(),
                            initializer: d
                                .initializer
                                .as_ref()
                                .map(|init| self.build_expr(init, Some(&ty))),
                        }
                    })
                    .collect();
                StmtNode::VarDecl { declarators }
            }

            Statement::Block(block) => StmtNode::Block(self.build_block(block)),

            Statement::If(if_stmt) => {
                let condition = self.build_expr(&if_stmt.condition, None);
                let then_branch = self.normalize_body(&if_stmt.then_branch);
                let else_branch = if_stmt
                    .else_branch
                    .as_ref()
                    .map(|branch| self.normalize_body(branch));
                StmtNode::If {
                    condition,
                    then_branch,
                    else_branch,
                }
            }

            Statement::For(for_stmt) => {
                // The init declaration is visible in the condition, update,
                // and body, so the whole loop gets one scope.
                self.push_scope();
                let init = for_stmt
                    .init
                    .as_ref()
                    .map(|init| Box::new(self.build_stmt(init)));
                let condition = for_stmt
                    .condition
                    .as_ref()
                    .map(|cond| self.build_expr(cond, None));
                let update = for_stmt
                    .update
                    .as_ref()
                    .map(|update| self.build_expr(update, None));
                let body = self.normalize_body(&for_stmt.body);
                self.pop_scope();
                StmtNode::For {
                    init,
                    condition,
                    update,
                    body,
                }
            }

            Statement::While(while_stmt) => StmtNode::While {
                condition: self.build_expr(&while_stmt.condition, None),
                body: self.normalize_body(&while_stmt.body),
            },

            Statement::DoWhile(do_while) => StmtNode::DoWhile {
                body: self.normalize_body(&do_while.body),
                condition: self.build_expr(&do_while.condition, None),
            },

            Statement::Switch(switch) => self.build_switch(switch),

            Statement::Return(ret) => StmtNode::Return {
                value: ret.value.as_ref().map(|v| self.build_expr(v, None)),
            },

            Statement::Break(_) => StmtNode::Break,

            Statement::Continue(_) => StmtNode::Continue,

            Statement::Throw(throw) => StmtNode::Throw(self.build_expr(&throw.value, None)),

            Statement::Try(try_stmt) => self.build_try(try_stmt),

            Statement::Empty(_) => StmtNode::Empty,
        }
    }

    /// Build a braced block, opening a lexical scope for its declarations.
    pub(crate) fn build_block(&mut self, block: &BlockStatement) -> Block {
        self.push_scope();
        let statements = block
            .statements
            .iter()
            .map(|stmt| self.build_stmt(stmt))
            .collect();
        self.pop_scope();
        Block::new(statements)
    }

    /// Normalize a control-flow body into a block: braced bodies build as
    /// blocks, an unbraced single statement is wrapped in a one-element
    /// block. Braced and unbraced spellings of the same body produce
    /// identical IR.
    fn normalize_body(&mut self, stmt: &Statement) -> Block {
        match stmt {
            Statement::Block(block) => self.build_block(block),
            other => {
                self.push_scope();
                let built = self.build_stmt(other);
                self.pop_scope();
                Block::new(vec![built])
            }
        }
    }

    // ========================================================================
    // Switch
    // ========================================================================

    fn build_switch(&mut self, switch: &SwitchStatement) -> StmtNode {
        let selector = self.build_expr(&switch.selector, None);

        // All cases share the switch's scope.
        self.push_scope();

        let mut cases: Vec<SwitchCase> = Vec::new();
        let mut default_case: Option<Block> = None;
        // Labels of empty sections waiting to merge into the next body.
        let mut pending: Vec<ExprNode> = Vec::new();

        for section in &switch.sections {
            let mut labels: Vec<ExprNode> = pending.drain(..).collect();
            labels.extend(
                section
                    .labels
                    .iter()
                    .map(|label| self.build_expr(label, None)),
            );

            if section.is_default {
                // Empty-bodied cases immediately before `default` fall into
                // its body.
                if !labels.is_empty() {
                    cases.push(SwitchCase {
                        labels,
                        body: Block::default(),
                        falls_through: true,
                    });
                }
                default_case = Some(self.build_case_body(section));
                continue;
            }

            if section.statements.is_empty() {
                pending = labels;
                continue;
            }

            let body = self.build_case_body(section);
            let falls_through = !ends_with_terminator(&body);
            cases.push(SwitchCase {
                labels,
                body,
                falls_through,
            });
        }

        // Trailing labels with no body and nothing to fall into.
        if !pending.is_empty() {
            cases.push(SwitchCase {
                labels: pending,
                body: Block::default(),
                falls_through: false,
            });
        }

        self.pop_scope();

        StmtNode::Switch {
            selector,
            cases,
            default_case,
        }
    }

    fn build_case_body(&mut self, section: &CaseSection) -> Block {
        Block::new(
            section
                .statements
                .iter()
                .map(|stmt| self.build_stmt(stmt))
                .collect(),
        )
    }

    // ========================================================================
    // Try / catch / finally
    // ========================================================================

    fn build_try(&mut self, try_stmt: &TryStatement) -> StmtNode {
        let try_block = self.build_block(&try_stmt.body);

        let mut catches: Vec<CatchClause> = Vec::new();
        for catch in &try_stmt.catches {
            let clause = self.build_catch(catch);
            // Consecutive clauses with one body and one binding collapse
            // into a single clause with several exception types.
            if let Some(last) = catches.last_mut() {
                if last.binding == clause.binding && last.body == clause.body {
                    last.exception_types.extend(clause.exception_types);
                    continue;
                }
            }
            catches.push(clause);
        }

        let finally_block = try_stmt
            .finally_block
            .as_ref()
            .map(|finally| self.build_block(finally));

        StmtNode::TryCatchFinally {
            try_block,
            catches,
            finally_block,
        }
    }

    fn build_catch(&mut self, catch: &CatchSyntax) -> CatchClause {
        let exception_types = catch
            .types
            .iter()
            .map(|ty| self.resolve_type(ty))
            .collect();

        self.push_scope();
        self.declare_local(&catch.binding);
        let body = self.build_block(&catch.body);
        self.pop_scope();

        CatchClause {
            exception_types,
            binding: catch.binding.clone(),
            body,
        }
    }
}

/// Whether control cannot run off the end of the block: its last statement
/// is an unconditional jump out. Used to derive switch-case fallthrough.
fn ends_with_terminator(block: &Block) -> bool {
    matches!(
        block.statements.last(),
        Some(StmtNode::Break)
            | Some(StmtNode::Continue)
            | Some(StmtNode::Return { .. })
            | Some(StmtNode::Throw(_))
    )
}
