//! The single source of truth for when an expression must be wrapped in
//! `( ... )` to print back to the same AST.
//!
//! The precedence table mirrors `parser::expressions`'s climbing ladder
//! directly, so a change to one should always be checked against the other.

use crate::ast::expressions::{BinaryOp, Expr, FunctionKind, IncDecOp, Literal};
use crate::ast::{Arena, Node, NodeId};

fn precedence(expr: &Expr) -> i32 {
    match expr {
        Expr::ConstantWrapper(_)
        | Expr::ConstantWrapperPP { .. }
        | Expr::Lookup { .. }
        | Expr::ArrayLiteral { .. }
        | Expr::ObjectLiteral { .. }
        | Expr::FunctionObject { .. }
        | Expr::Grouping { .. } => 21,
        Expr::Member { .. } => 20,
        Expr::CallExpression { .. } => 19,
        Expr::PostOrPrefixOperator { op, .. } => match op {
            IncDecOp::PostfixIncrement | IncDecOp::PostfixDecrement => 18,
            IncDecOp::PrefixIncrement | IncDecOp::PrefixDecrement => 17,
        },
        Expr::UnaryOperator { .. } => 17,
        Expr::BinaryOperator { op, .. } => binary_precedence(*op),
        Expr::Conditional { .. } => 4,
    }
}

fn binary_precedence(op: BinaryOp) -> i32 {
    match op {
        BinaryOp::Exponent => 16,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 15,
        BinaryOp::Add | BinaryOp::Subtract => 14,
        BinaryOp::LeftShift | BinaryOp::RightShift | BinaryOp::UnsignedRightShift => 13,
        BinaryOp::LessThan
        | BinaryOp::LessThanEquals
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterThanEquals
        | BinaryOp::InstanceOf
        | BinaryOp::In => 12,
        BinaryOp::Equals | BinaryOp::NotEquals | BinaryOp::StrictEquals | BinaryOp::StrictNotEquals => 11,
        BinaryOp::BitwiseAnd => 10,
        BinaryOp::BitwiseXor => 9,
        BinaryOp::BitwiseOr => 8,
        BinaryOp::LogicalAnd => 7,
        BinaryOp::LogicalOr | BinaryOp::NullishCoalesce => 6,
        BinaryOp::Comma => 1,
        op if op.is_assignment() => 3,
        _ => unreachable!("every BinaryOp variant is covered above"),
    }
}

fn expr_of(arena: &Arena, id: NodeId) -> Option<&Expr> {
    match arena.node(id) {
        Node::Expression(e) => Some(e),
        Node::Statement(_) => None,
    }
}

/// Whether `child`, printed as the `is_right` operand of a `parent_op`
/// binary expression, needs parens. Right-associative operators
/// (assignment, exponentiation) only need their *left* side parenthesized on
/// an exact precedence tie; every other operator is left-associative and
/// needs its *right* side parenthesized on a tie instead.
pub fn binary_operand_needs_parens(arena: &Arena, child: NodeId, parent_op: BinaryOp, is_right: bool) -> bool {
    let Some(expr) = expr_of(arena, child) else { return false };
    let child_prec = precedence(expr);
    let parent_prec = binary_precedence(parent_op);
    if child_prec != parent_prec {
        return child_prec < parent_prec;
    }
    let right_associative = parent_op == BinaryOp::Exponent || parent_op.is_assignment();
    if right_associative {
        !is_right
    } else {
        is_right
    }
}

/// Whether `child` needs parens as the operand of a prefix unary, `++`, or
/// `--` expression.
pub fn unary_operand_needs_parens(arena: &Arena, child: NodeId) -> bool {
    let Some(expr) = expr_of(arena, child) else { return false };
    precedence(expr) < 17
}

/// Whether `child` needs parens as the callee of a `new` expression — a call
/// there would otherwise be swallowed as `new`'s own argument list (`new
/// a()()` means `(new a())()`, not `new (a())()`).
pub fn new_callee_needs_parens(arena: &Arena, child: NodeId) -> bool {
    matches!(expr_of(arena, child), Some(Expr::CallExpression { .. }))
}

/// Whether `child` needs parens as the object of a `.`/`[]`/call expression.
pub fn member_object_needs_parens(arena: &Arena, child: NodeId) -> bool {
    let Some(expr) = expr_of(arena, child) else { return false };
    match expr {
        Expr::FunctionObject { kind: FunctionKind::Expression, .. } => true,
        // `0.toString()` reads as a malformed numeric literal; `(0).toString()` does not.
        Expr::ConstantWrapper(Literal::Number(_)) => true,
        _ => precedence(expr) < 19,
    }
}

/// Whether `child` needs parens as one arm of a `Conditional`.
pub fn conditional_operand_needs_parens(arena: &Arena, child: NodeId, is_test: bool) -> bool {
    let Some(expr) = expr_of(arena, child) else { return false };
    if is_test {
        precedence(expr) <= 4
    } else {
        matches!(expr, Expr::BinaryOperator { op, .. } if op.is_assignment() || *op == BinaryOp::Comma)
    }
}

/// Whether an expression statement's printed form must be wrapped in
/// `( ... )` because its leftmost token would otherwise be misread as the
/// start of a `function` declaration or a block.
pub fn statement_expression_needs_parens(arena: &Arena, expr: NodeId) -> bool {
    leftmost_token_is_ambiguous(arena, expr)
}

fn leftmost_token_is_ambiguous(arena: &Arena, id: NodeId) -> bool {
    match expr_of(arena, id) {
        Some(Expr::FunctionObject { kind: FunctionKind::Expression, .. }) => true,
        Some(Expr::ObjectLiteral { .. }) => true,
        Some(Expr::Member { object, .. }) => leftmost_token_is_ambiguous(arena, *object),
        Some(Expr::CallExpression { callee, is_new: false, .. }) => leftmost_token_is_ambiguous(arena, *callee),
        Some(Expr::BinaryOperator { left, .. }) => leftmost_token_is_ambiguous(arena, *left),
        Some(Expr::Conditional { test, .. }) => leftmost_token_is_ambiguous(arena, *test),
        Some(Expr::PostOrPrefixOperator { op, operand })
            if matches!(op, IncDecOp::PostfixIncrement | IncDecOp::PostfixDecrement) =>
        {
            leftmost_token_is_ambiguous(arena, *operand)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expressions::Literal;
    use crate::span::Span;

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }

    #[test]
    fn addition_inside_multiplication_needs_parens() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(1.0))), dummy_span());
        let b = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(2.0))), dummy_span());
        let add = arena.alloc(
            Node::Expression(Expr::BinaryOperator { op: BinaryOp::Add, left: a, right: b }),
            dummy_span(),
        );
        assert!(binary_operand_needs_parens(&arena, add, BinaryOp::Multiply, false));
    }

    #[test]
    fn multiplication_inside_addition_does_not_need_parens() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(1.0))), dummy_span());
        let b = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(2.0))), dummy_span());
        let mul = arena.alloc(
            Node::Expression(Expr::BinaryOperator { op: BinaryOp::Multiply, left: a, right: b }),
            dummy_span(),
        );
        assert!(!binary_operand_needs_parens(&arena, mul, BinaryOp::Add, false));
    }

    #[test]
    fn right_associative_assignment_only_parenthesizes_left_side_on_tie() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Expression(Expr::Lookup { name: "a".to_string(), binding: None }), dummy_span());
        let b = arena.alloc(Node::Expression(Expr::Lookup { name: "b".to_string(), binding: None }), dummy_span());
        let inner = arena.alloc(
            Node::Expression(Expr::BinaryOperator { op: BinaryOp::Assign, left: a, right: b }),
            dummy_span(),
        );
        assert!(binary_operand_needs_parens(&arena, inner, BinaryOp::Assign, false));
        assert!(!binary_operand_needs_parens(&arena, inner, BinaryOp::Assign, true));
    }

    #[test]
    fn function_expression_statement_needs_parens() {
        let mut arena = Arena::new();
        let body = arena.alloc(Node::Statement(crate::ast::Stmt::Block { body: vec![] }), dummy_span());
        let func = arena.alloc(
            Node::Expression(Expr::FunctionObject {
                kind: FunctionKind::Expression,
                name: None,
                params: vec![],
                body,
            }),
            dummy_span(),
        );
        assert!(statement_expression_needs_parens(&arena, func));
    }
}
