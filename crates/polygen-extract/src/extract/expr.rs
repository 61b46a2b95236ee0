//! Expression building
//!
//! Structural conversion of expression syntax into `ExprNode`s. The one
//! semantic decision made here is static vs instance access: a member or
//! call target whose identifier chain names a declared (or well-known) type
//! becomes a `TypeRefExpr`, everything else stays a value expression. That
//! resolution goes through the type model, not syntax shape alone.

use polygen_syntax::ast::{
    AssignOp, BinaryOp, Expression, LiteralExpr, LiteralKind, UnaryOp,
};

use super::Extractor;
use crate::error::ExtractError;
use crate::ir::{
    AssignmentOperator, BinaryOperator, CallKind, ExprNode, PrimitiveType, TypeRef, UnaryOperator,
};

impl Extractor<'_> {
    /// Build one expression. `expected` is the type demanded by the
    /// enclosing context (declared field/variable/argument type), used to
    /// type literals; it is advisory, never checked.
    pub(crate) fn build_expr(&mut self, expr: &Expression, expected: Option<&TypeRef>) -> ExprNode {
        match expr {
            Expression::Literal(lit) => ExprNode::Literal {
                value: lit.text.clone(),
                ty: literal_type(lit, expected),
            },

            Expression::Identifier(ident) => {
                if self.in_scope(&ident.name) {
                    return ExprNode::Identifier {
                        name: ident.name.clone(),
                    };
                }
                if let Some(ty) = self.try_type_path(expr) {
                    return ExprNode::TypeRefExpr { ty };
                }
                self.diag(ExtractError::UnresolvedReference {
                    name: ident.name.clone(),
                });
                ExprNode::Unknown {
                    text: ident.name.clone(),
                }
            }

            Expression::Member(member) => {
                // The whole chain may itself name a type; leave that to the
                // enclosing target position. Here only the target collapses
                // to a type reference.
                let target = self.build_target(&member.target);
                ExprNode::PropertyAccess {
                    target: Some(Box::new(target)),
                    member: member.name.clone(),
                }
            }

            Expression::Call(call) => {
                let kind = match (call.target.is_none(), call.name.as_str()) {
                    (true, "this") => CallKind::This,
                    (true, "super") => CallKind::Super,
                    _ => CallKind::Default,
                };
                let target = call.target.as_ref().map(|t| Box::new(self.build_target(t)));
                let args = call
                    .args
                    .iter()
                    .map(|arg| self.build_expr(arg, None))
                    .collect();
                ExprNode::MethodCall {
                    target,
                    name: call.name.clone(),
                    args,
                    kind,
                }
            }

            Expression::New(new) => {
                let ty = self.resolve_type(&new.ty);
                let args = new
                    .args
                    .iter()
                    .map(|arg| self.build_expr(arg, None))
                    .collect();
                ExprNode::ObjectCreation { ty, args }
            }

            Expression::Binary(binary) => ExprNode::Binary {
                op: convert_binary_op(binary.op),
                left: Box::new(self.build_expr(&binary.left, None)),
                right: Box::new(self.build_expr(&binary.right, None)),
            },

            Expression::Unary(unary) => ExprNode::Unary {
                op: convert_unary_op(unary.op),
                operand: Box::new(self.build_expr(&unary.operand, None)),
                prefix: unary.prefix,
            },

            Expression::Assignment(assignment) => ExprNode::Assignment {
                target: Box::new(self.build_expr(&assignment.target, None)),
                op: convert_assign_op(assignment.op),
                value: Box::new(self.build_expr(&assignment.value, None)),
            },

            Expression::Ternary(ternary) => ExprNode::Ternary {
                condition: Box::new(self.build_expr(&ternary.condition, None)),
                when_true: Box::new(self.build_expr(&ternary.when_true, expected)),
                when_false: Box::new(self.build_expr(&ternary.when_false, expected)),
            },

            Expression::Cast(cast) => ExprNode::Cast {
                ty: self.resolve_type(&cast.ty),
                operand: Box::new(self.build_expr(&cast.operand, None)),
            },

            Expression::TypeTest(test) => ExprNode::TypeTest {
                operand: Box::new(self.build_expr(&test.operand, None)),
                ty: self.resolve_type(&test.ty),
            },
        }
    }

    /// Build a member/call target: a chain naming a type becomes a static
    /// target, anything else is an ordinary value expression.
    fn build_target(&mut self, target: &Expression) -> ExprNode {
        if let Some(ty) = self.try_type_path(target) {
            return ExprNode::TypeRefExpr { ty };
        }
        self.build_expr(target, None)
    }

    /// If `expr` is a pure identifier chain naming a declared or well-known
    /// type (and not shadowed by a value in scope), resolve it.
    fn try_type_path(&self, expr: &Expression) -> Option<TypeRef> {
        let segments = identifier_chain(expr)?;
        if self.in_scope(segments[0]) {
            return None;
        }
        self.types
            .resolve_path(&segments)
            .map(TypeRef::reference)
    }
}

/// Flatten `a.b.c` into `["a", "b", "c"]`; None if the chain contains
/// anything but identifiers and member reads.
fn identifier_chain(expr: &Expression) -> Option<Vec<&str>> {
    match expr {
        Expression::Identifier(ident) => Some(vec![ident.name.as_str()]),
        Expression::Member(member) => {
            let mut chain = identifier_chain(&member.target)?;
            chain.push(member.name.as_str());
            Some(chain)
        }
        _ => None,
    }
}

/// Static type of a literal, from its spelling (suffixes decide numeric
/// width) or, for `null`, the expected type.
fn literal_type(lit: &LiteralExpr, expected: Option<&TypeRef>) -> TypeRef {
    match lit.kind {
        LiteralKind::Int => {
            if lit.text.ends_with('l') || lit.text.ends_with('L') {
                TypeRef::Primitive(PrimitiveType::Long)
            } else {
                TypeRef::Primitive(PrimitiveType::Int)
            }
        }
        LiteralKind::Float => {
            if lit.text.ends_with('f') || lit.text.ends_with('F') {
                TypeRef::Primitive(PrimitiveType::Float)
            } else {
                TypeRef::Primitive(PrimitiveType::Double)
            }
        }
        LiteralKind::Boolean => TypeRef::Primitive(PrimitiveType::Boolean),
        LiteralKind::Char => TypeRef::Primitive(PrimitiveType::Char),
        LiteralKind::String => TypeRef::reference("String"),
        LiteralKind::Null => expected
            .cloned()
            .unwrap_or_else(|| TypeRef::reference("Object")),
    }
}

fn convert_binary_op(op: BinaryOp) -> BinaryOperator {
    match op {
        BinaryOp::Add => BinaryOperator::Add,
        BinaryOp::Sub => BinaryOperator::Subtract,
        BinaryOp::Mul => BinaryOperator::Multiply,
        BinaryOp::Div => BinaryOperator::Divide,
        BinaryOp::Rem => BinaryOperator::Modulo,
        BinaryOp::Eq => BinaryOperator::Equals,
        BinaryOp::Ne => BinaryOperator::NotEquals,
        BinaryOp::Gt => BinaryOperator::Greater,
        BinaryOp::Ge => BinaryOperator::GreaterOrEqual,
        BinaryOp::Lt => BinaryOperator::Less,
        BinaryOp::Le => BinaryOperator::LessOrEqual,
        BinaryOp::And => BinaryOperator::And,
        BinaryOp::Or => BinaryOperator::Or,
        BinaryOp::BitAnd => BinaryOperator::BitwiseAnd,
        BinaryOp::BitOr => BinaryOperator::BitwiseOr,
        BinaryOp::BitXor => BinaryOperator::BitwiseXor,
        BinaryOp::Shl => BinaryOperator::ShiftLeft,
        BinaryOp::Shr => BinaryOperator::ShiftRight,
    }
}

fn convert_unary_op(op: UnaryOp) -> UnaryOperator {
    match op {
        UnaryOp::Not => UnaryOperator::Not,
        UnaryOp::Plus => UnaryOperator::Plus,
        UnaryOp::Minus => UnaryOperator::Minus,
        UnaryOp::Increment => UnaryOperator::Increment,
        UnaryOp::Decrement => UnaryOperator::Decrement,
    }
}

fn convert_assign_op(op: AssignOp) -> AssignmentOperator {
    match op {
        AssignOp::Assign => AssignmentOperator::Assign,
        AssignOp::AddAssign => AssignmentOperator::PlusAssign,
        AssignOp::SubAssign => AssignmentOperator::MinusAssign,
        AssignOp::MulAssign => AssignmentOperator::MultiplyAssign,
        AssignOp::DivAssign => AssignmentOperator::DivideAssign,
        AssignOp::RemAssign => AssignmentOperator::ModuloAssign,
    }
}
