//! Removing `debugger;` statements and configured debug-lookup calls,
//! gated by `KillSwitch::DEBUG_STRIP` and
//! `Settings::strip_debug_statements`/`Settings::debug_lookups`.
//!
//! Statements are turned into `Stmt::Empty` in place rather than spliced out
//! of their parent's body list; the Output Visitor skips `Empty` statements
//! when serializing a block, so the effect is the same without needing list
//! surgery at every possible parent shape (`Block`, `switch` case bodies,
//! CC-comment bodies, ...).

use crate::ast::expressions::Literal;
use crate::ast::{walk_pre, Arena, Expr, Node, NodeId, Stmt};
use crate::settings::Settings;

pub fn strip_debug(arena: &mut Arena, root: NodeId, settings: &Settings) {
    let mut targets = Vec::new();
    walk_pre(arena, root, &mut |id| {
        if settings.strip_debug_statements && matches!(arena.node(id), Node::Statement(Stmt::Debugger)) {
            targets.push(id);
            return;
        }
        if is_debug_call_statement(arena, id, &settings.debug_lookups) {
            targets.push(id);
        }
    });
    for id in targets {
        *arena.node_mut(id) = Node::Statement(Stmt::Empty);
    }
}

fn is_debug_call_statement(arena: &Arena, id: NodeId, debug_lookups: &[Vec<String>]) -> bool {
    if debug_lookups.is_empty() {
        return false;
    }
    let Node::Statement(Stmt::Expression { expression }) = arena.node(id) else {
        return false;
    };
    let Node::Expression(Expr::CallExpression { callee, .. }) = arena.node(*expression) else {
        return false;
    };
    let Some(chain) = member_chain(arena, *callee) else {
        return false;
    };
    debug_lookups.iter().any(|candidate| *candidate == chain)
}

/// Flatten a `a.b.c` member-access chain (no computed members) into
/// `["a", "b", "c"]`, innermost object first.
fn member_chain(arena: &Arena, id: NodeId) -> Option<Vec<String>> {
    match arena.node(id) {
        Node::Expression(Expr::Lookup { name, .. }) => Some(vec![name.clone()]),
        Node::Expression(Expr::Member { object, property, computed: false }) => {
            let mut chain = member_chain(arena, *object)?;
            let Node::Expression(Expr::ConstantWrapper(Literal::String { value, .. })) = arena.node(*property)
            else {
                return None;
            };
            chain.push(value.clone());
            Some(chain)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }

    #[test]
    fn strips_debugger_statement() {
        let mut arena = Arena::new();
        let stmt = arena.alloc(Node::Statement(Stmt::Debugger), dummy_span());
        let mut settings = Settings::default();
        settings.strip_debug_statements = true;
        strip_debug(&mut arena, stmt, &settings);
        assert!(matches!(arena.node(stmt), Node::Statement(Stmt::Empty)));
    }

    #[test]
    fn strips_configured_debug_lookup_call() {
        let mut arena = Arena::new();
        let console = arena.alloc(
            Node::Expression(Expr::Lookup { name: "console".to_string(), binding: None }),
            dummy_span(),
        );
        let log_name = arena.alloc(
            Node::Expression(Expr::ConstantWrapper(Literal::String { value: "log".to_string(), original_quote: '"' })),
            dummy_span(),
        );
        let member = arena.alloc(
            Node::Expression(Expr::Member { object: console, property: log_name, computed: false }),
            dummy_span(),
        );
        let call = arena.alloc(
            Node::Expression(Expr::CallExpression { callee: member, arguments: vec![], is_new: false }),
            dummy_span(),
        );
        let stmt = arena.alloc(Node::Statement(Stmt::Expression { expression: call }), dummy_span());

        let mut settings = Settings::default();
        settings.debug_lookups = vec![vec!["console".to_string(), "log".to_string()]];
        strip_debug(&mut arena, stmt, &settings);
        assert!(matches!(arena.node(stmt), Node::Statement(Stmt::Empty)));
    }
}
