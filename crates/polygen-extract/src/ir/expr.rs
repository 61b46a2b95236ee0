//! IR expressions
//!
//! A structural transform of source expressions: operator identity and
//! operand order are preserved exactly, compound assignments are not
//! desugared, and no constant folding ever happens. Literals keep their
//! source text so suffixes and digit separators survive regeneration.

use serde::{Deserialize, Serialize};

use super::ty::TypeRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprNode {
    /// Literal with its exact source text and static type.
    Literal { value: String, ty: TypeRef },

    /// Reference to a value in scope: a parameter, local, or field.
    Identifier { name: String },

    /// Reference to a type used as an expression target (static access).
    TypeRefExpr { ty: TypeRef },

    /// Field or property read: `target.member`; `target` is None for an
    /// implicit-receiver read.
    PropertyAccess {
        target: Option<Box<ExprNode>>,
        member: String,
    },

    /// Method call. A static call and an instance call have the same shape;
    /// they differ only in whether `target` is a `TypeRefExpr`.
    MethodCall {
        target: Option<Box<ExprNode>>,
        name: String,
        args: Vec<ExprNode>,
        kind: CallKind,
    },

    /// Object creation: `new Type(args)`.
    ObjectCreation { ty: TypeRef, args: Vec<ExprNode> },

    Binary {
        op: BinaryOperator,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },

    Unary {
        op: UnaryOperator,
        operand: Box<ExprNode>,
        prefix: bool,
    },

    /// Assignment; compound operators (`+=` and family) are preserved, not
    /// rewritten into `target = target op value`.
    Assignment {
        target: Box<ExprNode>,
        op: AssignmentOperator,
        value: Box<ExprNode>,
    },

    Ternary {
        condition: Box<ExprNode>,
        when_true: Box<ExprNode>,
        when_false: Box<ExprNode>,
    },

    /// Cast; numeric-narrowing casts wrap the operand structurally.
    Cast { ty: TypeRef, operand: Box<ExprNode> },

    /// Type test (`instanceof`).
    TypeTest { operand: Box<ExprNode>, ty: TypeRef },

    /// Fallback carrying raw source text; always paired with a diagnostic.
    Unknown { text: String },
}

/// How a call was spelled: an ordinary call, `this(...)`, or `super(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallKind {
    Default,
    This,
    Super,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equals,
    NotEquals,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    And,
    Or,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Plus,
    Minus,
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOperator {
    Assign,
    PlusAssign,
    MinusAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
}

impl ExprNode {
    /// Check if this node is the literal/identifier placeholder for a
    /// failed conversion.
    pub fn is_unknown(&self) -> bool {
        matches!(self, ExprNode::Unknown { .. })
    }
}
