//! IR statements
//!
//! Control-flow bodies are always `Block`s in the IR: the builder wraps
//! unbraced single-statement bodies, so emitters never special-case the
//! braced/unbraced distinction.

use serde::{Deserialize, Serialize};

use super::expr::ExprNode;
use super::ty::TypeRef;

/// A sequence of statements with its own lexical scope. Declarations inside
/// a block are visible only within it and enclosed blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<StmtNode>,
}

impl Block {
    pub fn new(statements: Vec<StmtNode>) -> Self {
        Block { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtNode {
    Expression(ExprNode),

    /// Multi-declarator variable declaration; the declared type repeats per
    /// declarator.
    VarDecl { declarators: Vec<VarDeclarator> },

    Block(Block),

    If {
        condition: ExprNode,
        then_branch: Block,
        else_branch: Option<Block>,
    },

    For {
        init: Option<Box<StmtNode>>,
        condition: Option<ExprNode>,
        update: Option<ExprNode>,
        body: Block,
    },

    While {
        condition: ExprNode,
        body: Block,
    },

    DoWhile {
        body: Block,
        condition: ExprNode,
    },

    Switch {
        selector: ExprNode,
        cases: Vec<SwitchCase>,
        default_case: Option<Block>,
    },

    Return { value: Option<ExprNode> },

    Break,

    Continue,

    Throw(ExprNode),

    TryCatchFinally {
        try_block: Block,
        catches: Vec<CatchClause>,
        finally_block: Option<Block>,
    },

    /// Empty statement (`;`).
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDeclarator {
    pub name: String,
    pub ty: TypeRef,
    pub initializer: Option<ExprNode>,
}

/// One switch case. Labels are mutually exclusive across the whole switch;
/// `falls_through` is derived by the builder from whether the case's own
/// statements end in a terminator, not asserted by the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub labels: Vec<ExprNode>,
    pub body: Block,
    pub falls_through: bool,
}

/// One catch clause. `exception_types` has more than one member when
/// consecutive source clauses sharing a body and binding were grouped, or
/// when the source used multi-catch syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub exception_types: Vec<TypeRef>,
    pub binding: String,
    pub body: Block,
}
