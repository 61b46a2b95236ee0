//! Expression syntax nodes
//!
//! Precedence is already encoded by nesting; the extractor never
//! re-associates. Literals carry their exact source text so that numeric
//! suffixes and underscored digit groups survive the round trip.

use serde::{Deserialize, Serialize};

use crate::span::Span;

use super::types::TypeSyntax;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal: `42`, `1.0f`, `"text"`, `true`, `null`
    Literal(LiteralExpr),

    /// Bare identifier: `myVariable`
    Identifier(Identifier),

    /// Member reference without an argument list: `target.name`
    Member(MemberExpr),

    /// Call with an argument list: `foo()`, `obj.foo(a, b)`.
    /// Constructor delegation arrives as a target-less call named
    /// `this` or `super`.
    Call(CallExpr),

    /// Object creation: `new Type(args)`
    New(NewExpr),

    /// Binary operation: `a + b`
    Binary(BinaryExpr),

    /// Unary operation: `!flag`, `x++`
    Unary(UnaryExpr),

    /// Assignment, plain or compound: `x = v`, `x += v`
    Assignment(AssignmentExpr),

    /// Conditional: `cond ? a : b`
    Ternary(TernaryExpr),

    /// Cast: `(Type) expr`
    Cast(CastExpr),

    /// Type test: `expr instanceof Type`
    TypeTest(TypeTestExpr),
}

impl Expression {
    pub fn span(&self) -> &Span {
        match self {
            Expression::Literal(e) => &e.span,
            Expression::Identifier(e) => &e.span,
            Expression::Member(e) => &e.span,
            Expression::Call(e) => &e.span,
            Expression::New(e) => &e.span,
            Expression::Binary(e) => &e.span,
            Expression::Unary(e) => &e.span,
            Expression::Assignment(e) => &e.span,
            Expression::Ternary(e) => &e.span,
            Expression::Cast(e) => &e.span,
            Expression::TypeTest(e) => &e.span,
        }
    }

    /// Check if this expression is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Expression::Literal(_))
    }
}

// ============================================================================
// Leaf Expressions
// ============================================================================

/// Literal with its exact source text: `9_000`, `1.0f`, `"s1 s1"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpr {
    pub kind: LiteralKind,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralKind {
    Int,
    Float,
    Boolean,
    Char,
    String,
    Null,
}

/// Identifier reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

// ============================================================================
// Composite Expressions
// ============================================================================

/// Member reference: `target.name` (no argument list at the reference)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpr {
    pub target: Box<Expression>,
    pub name: String,
    pub span: Span,
}

/// Call: `name(args)` or `target.name(args)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    /// None for unqualified calls, including `this(...)` / `super(...)`
    pub target: Option<Box<Expression>>,
    pub name: String,
    pub args: Vec<Expression>,
    pub span: Span,
}

/// Object creation: `new Type(args)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpr {
    pub ty: TypeSyntax,
    pub args: Vec<Expression>,
    pub span: Span,
}

/// Binary operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

/// Unary operation; `prefix` distinguishes `++x` from `x++`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expression>,
    pub prefix: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
    Increment,
    Decrement,
}

/// Assignment; compound operators are not desugared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpr {
    pub target: Box<Expression>,
    pub op: AssignOp,
    pub value: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
}

/// Conditional expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TernaryExpr {
    pub condition: Box<Expression>,
    pub when_true: Box<Expression>,
    pub when_false: Box<Expression>,
    pub span: Span,
}

/// Cast expression; numeric-narrowing casts are preserved, never evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
    pub ty: TypeSyntax,
    pub operand: Box<Expression>,
    pub span: Span,
}

/// Type-test expression (`instanceof`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeTestExpr {
    pub operand: Box<Expression>,
    pub ty: TypeSyntax,
    pub span: Span,
}

// ============================================================================
// Construction helpers
// ============================================================================
//
// The external parser builds trees programmatically; these shorthands keep
// that (and the test suites) readable. All use synthetic spans.

impl Expression {
    pub fn int(text: impl Into<String>) -> Self {
        Expression::Literal(LiteralExpr {
            kind: LiteralKind::Int,
            text: text.into(),
            span: Span::synthetic(),
        })
    }

    pub fn float(text: impl Into<String>) -> Self {
        Expression::Literal(LiteralExpr {
            kind: LiteralKind::Float,
            text: text.into(),
            span: Span::synthetic(),
        })
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expression::Literal(LiteralExpr {
            kind: LiteralKind::String,
            text: text.into(),
            span: Span::synthetic(),
        })
    }

    pub fn boolean(value: bool) -> Self {
        Expression::Literal(LiteralExpr {
            kind: LiteralKind::Boolean,
            text: value.to_string(),
            span: Span::synthetic(),
        })
    }

    pub fn null() -> Self {
        Expression::Literal(LiteralExpr {
            kind: LiteralKind::Null,
            text: "null".to_string(),
            span: Span::synthetic(),
        })
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier {
            name: name.into(),
            span: Span::synthetic(),
        })
    }

    pub fn member(target: Expression, name: impl Into<String>) -> Self {
        Expression::Member(MemberExpr {
            target: Box::new(target),
            name: name.into(),
            span: Span::synthetic(),
        })
    }

    pub fn call(target: Option<Expression>, name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call(CallExpr {
            target: target.map(Box::new),
            name: name.into(),
            args,
            span: Span::synthetic(),
        })
    }

    pub fn new_object(ty: TypeSyntax, args: Vec<Expression>) -> Self {
        Expression::New(NewExpr {
            ty,
            args,
            span: Span::synthetic(),
        })
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span: Span::synthetic(),
        })
    }

    pub fn unary(op: UnaryOp, operand: Expression, prefix: bool) -> Self {
        Expression::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            prefix,
            span: Span::synthetic(),
        })
    }

    pub fn assign(op: AssignOp, target: Expression, value: Expression) -> Self {
        Expression::Assignment(AssignmentExpr {
            target: Box::new(target),
            op,
            value: Box::new(value),
            span: Span::synthetic(),
        })
    }

    pub fn ternary(condition: Expression, when_true: Expression, when_false: Expression) -> Self {
        Expression::Ternary(TernaryExpr {
            condition: Box::new(condition),
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
            span: Span::synthetic(),
        })
    }

    pub fn cast(ty: TypeSyntax, operand: Expression) -> Self {
        Expression::Cast(CastExpr {
            ty,
            operand: Box::new(operand),
            span: Span::synthetic(),
        })
    }

    pub fn type_test(operand: Expression, ty: TypeSyntax) -> Self {
        Expression::TypeTest(TypeTestExpr {
            operand: Box::new(operand),
            ty,
            span: Span::synthetic(),
        })
    }
}
