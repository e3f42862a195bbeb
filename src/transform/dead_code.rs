//! Unreachable-statement removal.
//!
//! Only the narrow, always-safe shape is handled: statements textually
//! following an unconditional `return`/`throw`/`break`/`continue` in the same
//! block can never run, so they are dropped. Removing unreferenced bindings
//! is left to the Renamer/output stage, which already has the reference
//! counts the Environment Tree computed; duplicating that analysis here would
//! just be two passes disagreeing about the same fact.

use crate::ast::{Arena, Node, NodeId, Stmt};

/// Walk every `Block` under `root` and truncate its body right after the
/// first unconditional jump, dropping `Empty` statements everywhere else.
pub fn remove_dead_code(arena: &mut Arena, root: NodeId) {
    let mut blocks = Vec::new();
    collect_blocks(arena, root, &mut blocks);
    for block in blocks {
        truncate_after_jump(arena, block);
    }
}

fn collect_blocks(arena: &Arena, id: NodeId, out: &mut Vec<NodeId>) {
    if matches!(arena.node(id), Node::Statement(Stmt::Block { .. })) {
        out.push(id);
    }
    for child in arena.node(id).children() {
        collect_blocks(arena, child, out);
    }
}

fn truncate_after_jump(arena: &mut Arena, block: NodeId) {
    let body = match arena.node(block) {
        Node::Statement(Stmt::Block { body }) => body.clone(),
        _ => return,
    };
    let mut kept = Vec::with_capacity(body.len());
    let mut terminated = false;
    for stmt in body {
        if terminated {
            // A function declaration's name is still hoisted and visible
            // even in dead code, so drop everything except those.
            if is_function_declaration(arena, stmt) {
                kept.push(stmt);
            }
            continue;
        }
        if matches!(arena.node(stmt), Node::Statement(Stmt::Empty)) {
            continue;
        }
        terminated = is_unconditional_jump(arena, stmt);
        kept.push(stmt);
    }
    if let Node::Statement(Stmt::Block { body }) = arena.node_mut(block) {
        *body = kept;
    }
}

fn is_unconditional_jump(arena: &Arena, id: NodeId) -> bool {
    matches!(
        arena.node(id),
        Node::Statement(Stmt::Return { .. })
            | Node::Statement(Stmt::Throw { .. })
            | Node::Statement(Stmt::Break { .. })
            | Node::Statement(Stmt::Continue { .. })
    )
}

fn is_function_declaration(arena: &Arena, id: NodeId) -> bool {
    if let Node::Statement(Stmt::Expression { expression }) = arena.node(id) {
        return matches!(
            arena.node(*expression),
            Node::Expression(crate::ast::Expr::FunctionObject {
                kind: crate::ast::expressions::FunctionKind::Declaration,
                ..
            })
        );
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;
    use crate::span::Span;

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }

    #[test]
    fn drops_statements_after_return() {
        let mut arena = Arena::new();
        let ret = arena.alloc(Node::Statement(Stmt::Return { argument: None }), dummy_span());
        let unreachable = arena.alloc(Node::Statement(Stmt::Empty), dummy_span());
        let block = arena.alloc(
            Node::Statement(Stmt::Block { body: vec![ret, unreachable] }),
            dummy_span(),
        );
        arena.set_root(block);
        remove_dead_code(&mut arena, block);
        match arena.node(block) {
            Node::Statement(Stmt::Block { body }) => assert_eq!(body, &vec![ret]),
            _ => panic!("expected block"),
        }
    }
}
