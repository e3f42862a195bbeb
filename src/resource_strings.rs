//! `Settings::resource_strings` header expansion.
//!
//! A mapping from a table name to a name->string table gets synthesized into
//! a `var NAME = { ... };` statement prepended to the program before the
//! Analyzer runs, so the injected binding participates in ordinary scope
//! analysis and renaming exactly like any other `var`. The shape mirrors
//! `transform::literal_combine`'s synthesized-`VarStatement`-prepended-to-
//! the-root-block idiom, just run earlier in the pipeline.

use crate::ast::expressions::{Expr, Literal, ObjectProperty, PropertyKey, PropertyKind};
use crate::ast::statements::{Stmt, VarDeclarator};
use crate::ast::{Arena, Node, NodeId};
use crate::settings::Settings;
use crate::span::Span;

/// Prepend one `var NAME = {...};` declaration per entry of
/// `settings.resource_strings` to `root`'s body, in the order a `BTreeMap`
/// view of the map would give — iteration is name-sorted rather than
/// hashmap-order so re-running this against the same `Settings` always
/// produces byte-identical output.
pub fn expand(arena: &mut Arena, root: NodeId, settings: &Settings, span: Span) {
    if settings.resource_strings.is_empty() {
        return;
    }
    let mut tables: Vec<_> = settings.resource_strings.iter().collect();
    tables.sort_by(|a, b| a.0.cmp(b.0));

    let mut prepended = Vec::with_capacity(tables.len());
    for (name, table) in tables {
        let mut entries: Vec<_> = table.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let properties = entries
            .into_iter()
            .map(|(key, value)| {
                let value_node = arena.alloc(
                    Node::Expression(Expr::ConstantWrapper(Literal::String {
                        value: value.clone(),
                        original_quote: '"',
                    })),
                    span,
                );
                ObjectProperty {
                    key: PropertyKey::Identifier(key.clone()),
                    value: value_node,
                    kind: PropertyKind::Data,
                }
            })
            .collect();

        let object = arena.alloc(Node::Expression(Expr::ObjectLiteral { properties }), span);
        let var_stmt = arena.alloc(
            Node::Statement(Stmt::VarStatement {
                declarations: vec![VarDeclarator { name: name.clone(), init: Some(object) }],
            }),
            span,
        );
        for child in arena.node(var_stmt).children() {
            arena.set_parent(child, var_stmt);
        }
        prepended.push(var_stmt);
    }

    let existing_body = match arena.node(root) {
        Node::Statement(Stmt::Block { body }) => body.clone(),
        _ => return,
    };
    prepended.extend(existing_body);
    if let Node::Statement(Stmt::Block { body }) = arena.node_mut(root) {
        *body = prepended;
    }
    for child in arena.node(root).children() {
        arena.set_parent(child, root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn expand_prepends_one_var_per_table() {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::Statement(Stmt::Block { body: vec![] }), dummy_span());
        arena.set_root(root);

        let mut settings = Settings::default();
        let mut table = HashMap::new();
        table.insert("greeting".to_string(), "hello".to_string());
        settings.resource_strings.insert("Strings".to_string(), table);

        expand(&mut arena, root, &settings, dummy_span());

        match arena.node(root) {
            Node::Statement(Stmt::Block { body }) => {
                assert_eq!(body.len(), 1);
                match arena.node(body[0]) {
                    Node::Statement(Stmt::VarStatement { declarations }) => {
                        assert_eq!(declarations.len(), 1);
                        assert_eq!(declarations[0].name, "Strings");
                    }
                    _ => panic!("expected VarStatement"),
                }
            }
            _ => panic!("expected Block"),
        }
    }

    #[test]
    fn expand_is_noop_without_resource_strings() {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::Statement(Stmt::Block { body: vec![] }), dummy_span());
        arena.set_root(root);
        let settings = Settings::default();
        expand(&mut arena, root, &settings, dummy_span());
        match arena.node(root) {
            Node::Statement(Stmt::Block { body }) => assert!(body.is_empty()),
            _ => panic!("expected Block"),
        }
    }

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }
}
