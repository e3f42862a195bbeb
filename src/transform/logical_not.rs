//! Pushing `!` through comparisons when it shortens output.
//!
//! Only the equality family is inverted (`!(a==b)` -> `a!=b` and friends):
//! those inversions hold regardless of operand type or `NaN`. Relational
//! operators (`<`, `<=`, `>`, `>=`) are deliberately left alone, since
//! `!(a<b)` is not equivalent to `a>=b` when either operand is `NaN`.

use crate::ast::expressions::BinaryOp;
use crate::ast::expressions::UnaryOp;
use crate::ast::{walk_post, Arena, Expr, Node, NodeId};

pub fn invert_logical_not(arena: &mut Arena, root: NodeId) {
    let mut order = Vec::new();
    walk_post(arena, root, &mut |id| order.push(id));
    for id in order {
        invert_one(arena, id);
    }
}

fn invert_one(arena: &mut Arena, id: NodeId) {
    let operand = match arena.node(id) {
        Node::Expression(Expr::UnaryOperator { op: UnaryOp::LogicalNot, operand }) => *operand,
        _ => return,
    };
    let (op, left, right) = match arena.node(operand) {
        Node::Expression(Expr::BinaryOperator { op, left, right }) => (*op, *left, *right),
        _ => return,
    };
    let Some(inverted) = negate(op) else { return };
    *arena.node_mut(id) = Node::Expression(Expr::BinaryOperator { op: inverted, left, right });
    arena.set_parent(left, id);
    arena.set_parent(right, id);
}

fn negate(op: BinaryOp) -> Option<BinaryOp> {
    Some(match op {
        BinaryOp::Equals => BinaryOp::NotEquals,
        BinaryOp::NotEquals => BinaryOp::Equals,
        BinaryOp::StrictEquals => BinaryOp::StrictNotEquals,
        BinaryOp::StrictNotEquals => BinaryOp::StrictEquals,
        _ => return None,
    })
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
    fn inverts_not_equals_comparison() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(1.0))), dummy_span());
        let b = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(2.0))), dummy_span());
        let eq = arena.alloc(
            Node::Expression(Expr::BinaryOperator { op: BinaryOp::Equals, left: a, right: b }),
            dummy_span(),
        );
        let not = arena.alloc(
            Node::Expression(Expr::UnaryOperator { op: UnaryOp::LogicalNot, operand: eq }),
            dummy_span(),
        );
        invert_logical_not(&mut arena, not);
        match arena.node(not) {
            Node::Expression(Expr::BinaryOperator { op, .. }) => assert_eq!(*op, BinaryOp::NotEquals),
            _ => panic!("expected inverted binary operator"),
        }
    }

    #[test]
    fn leaves_relational_comparison_alone() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(1.0))), dummy_span());
        let b = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(2.0))), dummy_span());
        let lt = arena.alloc(
            Node::Expression(Expr::BinaryOperator { op: BinaryOp::LessThan, left: a, right: b }),
            dummy_span(),
        );
        let not = arena.alloc(
            Node::Expression(Expr::UnaryOperator { op: UnaryOp::LogicalNot, operand: lt }),
            dummy_span(),
        );
        invert_logical_not(&mut arena, not);
        assert!(matches!(
            arena.node(not),
            Node::Expression(Expr::UnaryOperator { op: UnaryOp::LogicalNot, .. })
        ));
    }
}
