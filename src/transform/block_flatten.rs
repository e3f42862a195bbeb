//! Brace dropping and `if`/`else` -> conditional-expression rewriting
//!.

use crate::ast::{walk_pre, Arena, Expr, Node, NodeId, Stmt};

/// Inline a `Block` that is the sole statement of its parent `Block` directly
/// into the parent, dropping the redundant nesting the parser's
/// single-statement-body wrapping invariant introduces.
pub fn flatten_blocks(arena: &mut Arena, root: NodeId) {
    let mut blocks = Vec::new();
    walk_pre(arena, root, &mut |id| {
        if matches!(arena.node(id), Node::Statement(Stmt::Block { .. })) {
            blocks.push(id);
        }
    });
    for block in blocks {
        flatten_one(arena, block);
    }
}

fn flatten_one(arena: &mut Arena, block: NodeId) {
    let body = match arena.node(block) {
        Node::Statement(Stmt::Block { body }) => body.clone(),
        _ => return,
    };
    let mut flattened = Vec::with_capacity(body.len());
    for stmt in body {
        if let Node::Statement(Stmt::Block { body: inner }) = arena.node(stmt).clone() {
            for grandchild in &inner {
                arena.set_parent(*grandchild, block);
            }
            flattened.extend(inner);
        } else {
            flattened.push(stmt);
        }
    }
    if let Node::Statement(Stmt::Block { body }) = arena.node_mut(block) {
        *body = flattened;
    }
}

/// Rewrite `if (test) a(); else b();`-shaped statements, where both arms are
/// single expression statements, to `test ? a() : b();` / `test && a();`.
pub fn conditional_to_logical(arena: &mut Arena, root: NodeId) {
    let mut ifs = Vec::new();
    walk_pre(arena, root, &mut |id| {
        if matches!(arena.node(id), Node::Statement(Stmt::IfStatement { .. })) {
            ifs.push(id);
        }
    });
    for stmt in ifs {
        rewrite_one(arena, stmt);
    }
}

fn rewrite_one(arena: &mut Arena, stmt: NodeId) {
    let (test, consequent, alternate) = match arena.node(stmt) {
        Node::Statement(Stmt::IfStatement { test, consequent, alternate }) => (*test, *consequent, *alternate),
        _ => return,
    };
    let Some(consequent_expr) = single_expression(arena, consequent) else { return };
    match alternate {
        None => {
            let and = arena.alloc(
                Node::Expression(Expr::BinaryOperator {
                    op: crate::ast::expressions::BinaryOp::LogicalAnd,
                    left: test,
                    right: consequent_expr,
                }),
                arena.span(stmt),
            );
            arena.set_parent(test, and);
            arena.set_parent(consequent_expr, and);
            *arena.node_mut(stmt) = Node::Statement(Stmt::Expression { expression: and });
            arena.set_parent(and, stmt);
        }
        Some(alt) => {
            let Some(alternate_expr) = single_expression(arena, alt) else { return };
            let cond = arena.alloc(
                Node::Expression(Expr::Conditional { test, consequent: consequent_expr, alternate: alternate_expr }),
                arena.span(stmt),
            );
            arena.set_parent(test, cond);
            arena.set_parent(consequent_expr, cond);
            arena.set_parent(alternate_expr, cond);
            *arena.node_mut(stmt) = Node::Statement(Stmt::Expression { expression: cond });
            arena.set_parent(cond, stmt);
        }
    }
}

/// If `block` is a `Block` wrapping exactly one `Expression` statement,
/// return that expression's node id.
fn single_expression(arena: &Arena, block: NodeId) -> Option<NodeId> {
    match arena.node(block) {
        Node::Statement(Stmt::Block { body }) if body.len() == 1 => match arena.node(body[0]) {
            Node::Statement(Stmt::Expression { expression }) => Some(*expression),
            _ => None,
        },
        _ => None,
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
    fn flattens_nested_single_statement_block() {
        let mut arena = Arena::new();
        let inner_stmt = arena.alloc(Node::Statement(Stmt::Empty), dummy_span());
        let inner_block = arena.alloc(Node::Statement(Stmt::Block { body: vec![inner_stmt] }), dummy_span());
        arena.set_parent(inner_stmt, inner_block);
        let outer = arena.alloc(Node::Statement(Stmt::Block { body: vec![inner_block] }), dummy_span());
        arena.set_parent(inner_block, outer);
        arena.set_root(outer);

        flatten_blocks(&mut arena, outer);

        match arena.node(outer) {
            Node::Statement(Stmt::Block { body }) => assert_eq!(body, &vec![inner_stmt]),
            _ => panic!("expected block"),
        }
    }

    #[test]
    fn rewrites_if_else_of_expressions_to_conditional() {
        let mut arena = Arena::new();
        let test = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Boolean(true))), dummy_span());
        let a = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(1.0))), dummy_span());
        let a_stmt = arena.alloc(Node::Statement(Stmt::Expression { expression: a }), dummy_span());
        let consequent = arena.alloc(Node::Statement(Stmt::Block { body: vec![a_stmt] }), dummy_span());
        let b = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(2.0))), dummy_span());
        let b_stmt = arena.alloc(Node::Statement(Stmt::Expression { expression: b }), dummy_span());
        let alternate = arena.alloc(Node::Statement(Stmt::Block { body: vec![b_stmt] }), dummy_span());
        let if_stmt = arena.alloc(
            Node::Statement(Stmt::IfStatement { test, consequent, alternate: Some(alternate) }),
            dummy_span(),
        );

        conditional_to_logical(&mut arena, if_stmt);

        match arena.node(if_stmt) {
            Node::Statement(Stmt::Expression { expression }) => {
                assert!(matches!(arena.node(*expression), Node::Expression(Expr::Conditional { .. })));
            }
            _ => panic!("expected rewritten expression statement"),
        }
    }
}
