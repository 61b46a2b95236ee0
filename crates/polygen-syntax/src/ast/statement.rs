//! Statement syntax nodes
//!
//! Control-flow bodies are `Box<Statement>` rather than blocks because the
//! source allows unbraced single-statement bodies; the extractor normalizes
//! both forms into blocks when building IR.

use serde::{Deserialize, Serialize};

use crate::span::Span;

use super::expression::Expression;
use super::types::TypeSyntax;

/// Block-level statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Expression statement: `foo();`
    Expression(ExpressionStatement),

    /// Variable declaration: `int x = 123;` or `int y, z;`
    VariableDecl(VariableDeclStatement),

    /// Braced block with its own lexical scope
    Block(BlockStatement),

    /// If statement, possibly with unbraced branches
    If(IfStatement),

    /// C-style for loop
    For(ForStatement),

    /// While loop
    While(WhileStatement),

    /// Do-while loop
    DoWhile(DoWhileStatement),

    /// Switch statement
    Switch(SwitchStatement),

    /// Return statement
    Return(ReturnStatement),

    /// Break statement
    Break(BreakStatement),

    /// Continue statement
    Continue(ContinueStatement),

    /// Throw statement
    Throw(ThrowStatement),

    /// Try-catch-finally
    Try(TryStatement),

    /// Empty statement (`;`)
    Empty(Span),
}

impl Statement {
    /// Get the span of this statement
    pub fn span(&self) -> &Span {
        match self {
            Statement::Expression(s) => &s.span,
            Statement::VariableDecl(s) => &s.span,
            Statement::Block(s) => &s.span,
            Statement::If(s) => &s.span,
            Statement::For(s) => &s.span,
            Statement::While(s) => &s.span,
            Statement::DoWhile(s) => &s.span,
            Statement::Switch(s) => &s.span,
            Statement::Return(s) => &s.span,
            Statement::Break(s) => &s.span,
            Statement::Continue(s) => &s.span,
            Statement::Throw(s) => &s.span,
            Statement::Try(s) => &s.span,
            Statement::Empty(span) => span,
        }
    }
}

// ============================================================================
// Declarations and Simple Statements
// ============================================================================

/// Expression statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

/// Variable declaration: one type, one or more declarators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclStatement {
    pub ty: TypeSyntax,
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: String,
    pub initializer: Option<Expression>,
}

/// Block statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// Return statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// Break statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakStatement {
    pub span: Span,
}

/// Continue statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinueStatement {
    pub span: Span,
}

/// Throw statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowStatement {
    pub value: Expression,
    pub span: Span,
}

// ============================================================================
// Control Flow
// ============================================================================

/// If statement; branches may be unbraced single statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

/// C-style for loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStatement {
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
    pub span: Span,
}

/// While loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

/// Do-while loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoWhileStatement {
    pub body: Box<Statement>,
    pub condition: Expression,
    pub span: Span,
}

/// Switch statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatement {
    pub selector: Expression,
    pub sections: Vec<CaseSection>,
    pub span: Span,
}

/// One `case ...:` (or `default:`) group as written. A section with an
/// empty statement list falls into the next section; comma-joined labels
/// arrive as several entries in `labels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSection {
    pub labels: Vec<Expression>,
    pub is_default: bool,
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// Try-catch-finally. A multi-catch clause (`catch (A | B e)`) arrives as
/// one `CatchSyntax` with several types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStatement {
    pub body: BlockStatement,
    pub catches: Vec<CatchSyntax>,
    pub finally_block: Option<BlockStatement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchSyntax {
    pub types: Vec<TypeSyntax>,
    pub binding: String,
    pub body: BlockStatement,
    pub span: Span,
}

// ============================================================================
// Construction helpers
// ============================================================================

impl Statement {
    pub fn expression(expression: Expression) -> Self {
        Statement::Expression(ExpressionStatement {
            expression,
            span: Span::synthetic(),
        })
    }

    pub fn block(statements: Vec<Statement>) -> Self {
        Statement::Block(BlockStatement {
            statements,
            span: Span::synthetic(),
        })
    }

    pub fn var_decl(ty: TypeSyntax, declarators: Vec<Declarator>) -> Self {
        Statement::VariableDecl(VariableDeclStatement {
            ty,
            declarators,
            span: Span::synthetic(),
        })
    }

    pub fn ret(value: Option<Expression>) -> Self {
        Statement::Return(ReturnStatement {
            value,
            span: Span::synthetic(),
        })
    }

    pub fn brk() -> Self {
        Statement::Break(BreakStatement {
            span: Span::synthetic(),
        })
    }

    pub fn cont() -> Self {
        Statement::Continue(ContinueStatement {
            span: Span::synthetic(),
        })
    }

    pub fn throw(value: Expression) -> Self {
        Statement::Throw(ThrowStatement {
            value,
            span: Span::synthetic(),
        })
    }
}

impl BlockStatement {
    pub fn of(statements: Vec<Statement>) -> Self {
        BlockStatement {
            statements,
            span: Span::synthetic(),
        }
    }
}

impl Declarator {
    pub fn new(name: impl Into<String>, initializer: Option<Expression>) -> Self {
        Declarator {
            name: name.into(),
            initializer,
        }
    }
}
