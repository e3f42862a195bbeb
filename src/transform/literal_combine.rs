//! Duplicate literal lifting.
//!
//! Every `ConstantWrapper::String` value used three or more times anywhere in
//! the program is hoisted to a single generated `var` declaration prepended
//! to the program body, and every occurrence becomes a `Lookup` of that
//! binding. This runs on the whole-program scope rather than per-function.
//! The generated binding bypasses the Environment Tree
//! entirely, so the Renamer leaves its name alone; that is an accepted
//! trade-off of running this pass after analysis rather than before it.

use crate::ast::expressions::Literal;
use crate::ast::statements::VarDeclarator;
use crate::ast::{walk_pre, Arena, Expr, Node, NodeId, Stmt};
use std::collections::HashMap;

/// Literals shorter than this save nothing once wrapped in a reference, even
/// before accounting for the new `var NAME=...;` declaration's own cost.
const MIN_LITERAL_LEN: usize = 3;

pub fn combine_duplicate_literals(arena: &mut Arena, root: NodeId) {
    let mut order: Vec<String> = Vec::new();
    let mut occurrences: HashMap<String, Vec<NodeId>> = HashMap::new();
    walk_pre(arena, root, &mut |id| {
        if let Node::Expression(Expr::ConstantWrapper(Literal::String { value, .. })) = arena.node(id) {
            if !occurrences.contains_key(value) {
                order.push(value.clone());
            }
            occurrences.entry(value.clone()).or_default().push(id);
        }
    });

    let mut declarations = Vec::new();
    let mut index = 0u32;
    for value in order {
        let ids = &occurrences[&value];
        if ids.len() < 3 || value.len() < MIN_LITERAL_LEN {
            continue;
        }
        let name = format!("$$L{index}");
        index += 1;
        let first_span = arena.span(ids[0]);
        let value_node = arena.alloc(
            Node::Expression(Expr::ConstantWrapper(Literal::String { value: value.clone(), original_quote: '"' })),
            first_span,
        );
        for &id in ids {
            if let Some(parent) = arena.parent(id) {
                let lookup = arena.alloc(
                    Node::Expression(Expr::Lookup { name: name.clone(), binding: None }),
                    arena.span(id),
                );
                arena.replace_child(parent, id, lookup);
            }
        }
        declarations.push(VarDeclarator { name, init: Some(value_node) });
    }

    if declarations.is_empty() {
        return;
    }
    let var_span = arena.span(root);
    let var_stmt = arena.alloc(Node::Statement(Stmt::VarStatement { declarations }), var_span);
    for child in arena.node(var_stmt).children() {
        arena.set_parent(child, var_stmt);
    }
    if let Node::Statement(Stmt::Block { body }) = arena.node_mut(root) {
        body.insert(0, var_stmt);
    }
    arena.set_parent(var_stmt, root);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }

    #[test]
    fn hoists_literal_repeated_three_times() {
        let mut arena = Arena::new();
        let lit = || Literal::String { value: "repeated".to_string(), original_quote: '"' };
        let mut body = Vec::new();
        for _ in 0..3 {
            let node = arena.alloc(Node::Expression(Expr::ConstantWrapper(lit())), dummy_span());
            let stmt = arena.alloc(Node::Statement(Stmt::Expression { expression: node }), dummy_span());
            arena.set_parent(node, stmt);
            body.push(stmt);
        }
        let root = arena.alloc(Node::Statement(Stmt::Block { body }), dummy_span());
        for child in arena.node(root).children() {
            arena.set_parent(child, root);
        }
        arena.set_root(root);

        combine_duplicate_literals(&mut arena, root);

        match arena.node(root) {
            Node::Statement(Stmt::Block { body }) => {
                assert_eq!(body.len(), 4);
                assert!(matches!(arena.node(body[0]), Node::Statement(Stmt::VarStatement { .. })));
            }
            _ => panic!("expected block"),
        }
    }
}
