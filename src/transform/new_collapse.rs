//! `new Array(...)`/`new Object()`/`new RegExp(...)` collapse.

use crate::ast::expressions::Literal;
use crate::ast::{walk_post, Arena, Expr, Node, NodeId};

pub fn collapse_new_expressions(arena: &mut Arena, root: NodeId) {
    let mut order = Vec::new();
    walk_post(arena, root, &mut |id| order.push(id));
    for id in order {
        collapse_one(arena, id);
    }
}

fn collapse_one(arena: &mut Arena, id: NodeId) {
    let (callee, arguments, is_new) = match arena.node(id) {
        Node::Expression(Expr::CallExpression { callee, arguments, is_new }) => {
            (*callee, arguments.clone(), *is_new)
        }
        _ => return,
    };
    if !is_new {
        return;
    }
    let name = match arena.node(callee) {
        Node::Expression(Expr::Lookup { name, .. }) => name.clone(),
        _ => return,
    };
    match name.as_str() {
        "Array" if arguments.len() != 1 => {
            let elements = arguments.into_iter().map(Some).collect();
            *arena.node_mut(id) = Node::Expression(Expr::ArrayLiteral { elements });
        }
        "Object" if arguments.is_empty() => {
            *arena.node_mut(id) = Node::Expression(Expr::ObjectLiteral { properties: vec![] });
        }
        "RegExp" if (1..=2).contains(&arguments.len()) => {
            if let Some(regex) = literal_regex(arena, &arguments) {
                *arena.node_mut(id) = Node::Expression(Expr::ConstantWrapper(Literal::Regexp(regex)));
            }
        }
        _ => {}
    }
}

fn literal_regex(arena: &Arena, arguments: &[NodeId]) -> Option<String> {
    let pattern = string_literal_value(arena, arguments[0])?;
    if pattern.contains('/') {
        // Would need escaping the parser doesn't round-trip for bare regex
        // literals; leave the `new RegExp(...)` call as-is rather than emit
        // something the scanner can't re-read.
        return None;
    }
    let flags = match arguments.get(1) {
        Some(id) => string_literal_value(arena, *id)?,
        None => String::new(),
    };
    Some(format!("/{pattern}/{flags}"))
}

fn string_literal_value(arena: &Arena, id: NodeId) -> Option<String> {
    match arena.node(id) {
        Node::Expression(Expr::ConstantWrapper(Literal::String { value, .. })) => Some(value.clone()),
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
    fn collapses_new_object_with_no_arguments() {
        let mut arena = Arena::new();
        let callee = arena.alloc(
            Node::Expression(Expr::Lookup { name: "Object".to_string(), binding: None }),
            dummy_span(),
        );
        let call = arena.alloc(
            Node::Expression(Expr::CallExpression { callee, arguments: vec![], is_new: true }),
            dummy_span(),
        );
        collapse_new_expressions(&mut arena, call);
        assert!(matches!(arena.node(call), Node::Expression(Expr::ObjectLiteral { properties }) if properties.is_empty()));
    }

    #[test]
    fn collapses_new_array_with_multiple_elements() {
        let mut arena = Arena::new();
        let callee = arena.alloc(
            Node::Expression(Expr::Lookup { name: "Array".to_string(), binding: None }),
            dummy_span(),
        );
        let a = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(1.0))), dummy_span());
        let b = arena.alloc(Node::Expression(Expr::ConstantWrapper(Literal::Number(2.0))), dummy_span());
        let call = arena.alloc(
            Node::Expression(Expr::CallExpression { callee, arguments: vec![a, b], is_new: true }),
            dummy_span(),
        );
        collapse_new_expressions(&mut arena, call);
        match arena.node(call) {
            Node::Expression(Expr::ArrayLiteral { elements }) => assert_eq!(elements.len(), 2),
            _ => panic!("expected array literal"),
        }
    }
}
