//! The AST: an arena of nodes keyed by index.
//!
//! A lossless concrete-syntax tree with intrusive parent/child pointers
//! would preserve every token, but a minifier discards that detail anyway:
//! nodes live in a flat [`Arena`], parent/child links are [`NodeId`] indices
//! rather than owning references, `replace_child` is an index swap, and
//! traversal is a pair of free functions (`walk_pre`/`walk_post`) instead of
//! a visitor trait. This sidesteps the deep-inheritance and
//! cyclic-intrusive-pointer problems an owning tree runs into, while keeping
//! a tag-driven dispatch style where `crate::parser` only needs to match on
//! a node's kind, not its storage.

pub mod expressions;
pub mod statements;

pub use expressions::Expr;
pub use statements::Stmt;

use crate::span::Span;

/// Index into an [`Arena`]. `Copy` and cheap to pass around in place of an
/// owning child reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel used only for the arena's conceptual root parent.
    pub const NONE: NodeId = NodeId(u32::MAX);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node's payload: a tagged sum type in place of an inheritance chain of
/// node subclasses. Statement and expression variants hold their own child
/// `NodeId`s; see `ast::statements`/`ast::expressions` for the per-variant
/// field sets.
#[derive(Debug, Clone)]
pub enum Node {
    /// A statement node; see [`Stmt`] for the specific variant.
    Statement(Stmt),
    /// An expression node; see [`Expr`] for the specific variant.
    Expression(Expr),
}

impl Node {
    /// Every direct child of this node, in source order. Snapshot this
    /// before mutating during a traversal.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Node::Statement(s) => s.children(),
            Node::Expression(e) => e.children(),
        }
    }
}

struct Entry {
    node: Node,
    span: Span,
    parent: NodeId,
}

/// Owns every node in a parse session. Nodes are never individually freed;
/// the whole arena is dropped with the session.
#[derive(Default)]
pub struct Arena {
    entries: Vec<Entry>,
    root: Option<NodeId>,
}

impl Arena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Arena::default()
    }

    /// Insert a new, parentless node and return its id. Callers attach it to
    /// a parent with [`Arena::set_parent`] (or designate it the root via
    /// [`Arena::set_root`]).
    pub fn alloc(&mut self, node: Node, span: Span) -> NodeId {
        self.entries.push(Entry {
            node,
            span,
            parent: NodeId::NONE,
        });
        NodeId(self.entries.len() as u32 - 1)
    }

    /// Designate `id` as the program root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// The program root, if one has been set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn entry(&self, id: NodeId) -> &Entry {
        &self.entries[id.index()]
    }

    fn entry_mut(&mut self, id: NodeId) -> &mut Entry {
        &mut self.entries[id.index()]
    }

    /// Borrow a node's payload.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.entry(id).node
    }

    /// Mutably borrow a node's payload.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.entry_mut(id).node
    }

    /// A node's span.
    pub fn span(&self, id: NodeId) -> Span {
        self.entry(id).span
    }

    /// Extend a node's span to also cover `other`.
    pub fn extend_span(&mut self, id: NodeId, other: Span) {
        self.entry_mut(id).span.update_with(other);
    }

    /// A node's parent, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.entry(id).parent;
        if parent == NodeId::NONE {
            None
        } else {
            Some(parent)
        }
    }

    /// Record `child`'s parent as `parent`. Every non-root node has exactly
    /// one parent; assigning a new parent implicitly detaches
    /// the child from whatever it pointed to before, since `parent` is a
    /// single field, not a registered back-reference.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if self.entry(child).parent == parent {
            // Preserve the identity short-circuit a pointer setter would
            // use, just applied to indices instead.
            return;
        }
        self.entry_mut(child).parent = parent;
    }

    /// Replace every occurrence of `old` as a child of `parent_of_old` with
    /// `new`, fixing up `new`'s parent pointer. `old` itself becomes
    /// parentless (detached, not freed).
    ///
    /// Because children are stored inline in each variant's fields rather
    /// than in a uniform child list, the actual slot rewrite happens via
    /// `Node::replace_child_id`; this method only fixes up the arena-level
    /// parent bookkeeping around that call.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if old == new {
            return;
        }
        match self.node_mut(parent) {
            Node::Statement(s) => s.replace_child_id(old, new),
            Node::Expression(e) => e.replace_child_id(old, new),
        }
        self.entry_mut(old).parent = NodeId::NONE;
        self.entry_mut(new).parent = parent;
    }
}

/// Pre-order walk: call `visit(node_id)` on `id`, then recurse into each
/// child, snapshotting the child list before recursing so mutation during
/// the walk cannot skip or duplicate a child.
pub fn walk_pre(arena: &Arena, id: NodeId, visit: &mut impl FnMut(NodeId)) {
    visit(id);
    for child in arena.node(id).children() {
        walk_pre(arena, child, visit);
    }
}

/// Post-order walk: recurse into each child first (snapshotting before
/// recursing), then call `visit(node_id)` on `id`.
pub fn walk_post(arena: &Arena, id: NodeId, visit: &mut impl FnMut(NodeId)) {
    for child in arena.node(id).children() {
        walk_post(arena, child, visit);
    }
    visit(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expressions::{Expr, Literal};
    use crate::ast::statements::Stmt;
    use crate::span::Span;

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }

    fn number(n: f64) -> Node {
        Node::Expression(Expr::ConstantWrapper(Literal::Number(n)))
    }

    #[test]
    fn replace_child_updates_parent_pointer() {
        let mut arena = Arena::new();
        let lit_a = arena.alloc(number(1.0), dummy_span());
        let lit_b = arena.alloc(number(2.0), dummy_span());
        let stmt = arena.alloc(
            Node::Statement(Stmt::Return { argument: Some(lit_a) }),
            dummy_span(),
        );
        arena.set_parent(lit_a, stmt);

        arena.replace_child(stmt, lit_a, lit_b);

        assert_eq!(arena.parent(lit_b), Some(stmt));
        assert_eq!(arena.parent(lit_a), None);
        match arena.node(stmt) {
            Node::Statement(Stmt::Return { argument }) => assert_eq!(*argument, Some(lit_b)),
            _ => panic!("expected Return statement"),
        }
    }

    #[test]
    fn walk_pre_visits_parent_before_children() {
        let mut arena = Arena::new();
        let lit = arena.alloc(number(1.0), dummy_span());
        let stmt = arena.alloc(
            Node::Statement(Stmt::Return { argument: Some(lit) }),
            dummy_span(),
        );
        let mut order = Vec::new();
        walk_pre(&arena, stmt, &mut |id| order.push(id));
        assert_eq!(order, vec![stmt, lit]);
    }

    #[test]
    fn replace_child_is_noop_for_same_id() {
        let mut arena = Arena::new();
        let lit = arena.alloc(number(1.0), dummy_span());
        let stmt = arena.alloc(
            Node::Statement(Stmt::Return { argument: Some(lit) }),
            dummy_span(),
        );
        arena.set_parent(lit, stmt);
        arena.replace_child(stmt, lit, lit);
        assert_eq!(arena.parent(lit), Some(stmt));
    }
}
