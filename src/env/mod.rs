//! The Environment Tree and Analyzer.
//!
//! Lexical scoping is modeled as a tree of environments built by a
//! post-order walk, with bindings keyed by name and references resolved by
//! walking the chain outward. It reuses the arena's `NodeId`/`walk_post`
//! plumbing and the crate's `diagnostics`/`ParseResult` accumulation style
//! throughout.

use crate::ast::{Arena, Expr, Node, NodeId, Stmt};
use crate::diagnostics::AnalyzerErrorKind;
use crate::settings::{EvalTreatment, Settings};
use crate::span::Span;
use std::collections::HashMap;

/// Index of a [`LexicalEnvironment`] inside an [`EnvironmentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvId(u32);

/// Index of a [`Binding`] inside an [`EnvironmentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u32);

/// What role a binding plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingCategory {
    /// An ordinary `var`/function-declared name.
    Normal,
    /// A function parameter.
    Argument,
    /// The implicit `arguments` object.
    Arguments,
    /// A named function expression's self-reference.
    NamedFunctionExpression,
    /// A standard global (`window`, `Math`, ...), never renamed.
    Predefined,
    /// A lazily-created binding for an otherwise-unresolved reference.
    Global,
    /// A reference resolved only at runtime inside a `with` block.
    WithField,
    /// A placeholder created ahead of its declaring statement (e.g. `arguments`).
    Placeholder,
}

/// Whether a binding may be reassigned after its first initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Mutable,
    Immutable,
}

/// A single name → meaning association inside an environment.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The original source name.
    pub name: String,
    /// The name assigned by the Renamer, once renaming has run.
    pub crunched_name: Option<String>,
    pub category: BindingCategory,
    pub mutability: Mutability,
    /// How many `Lookup` nodes resolved to this binding.
    pub reference_count: u32,
    /// The AST node that initializes this binding, if any.
    pub initializer: Option<NodeId>,
    pub is_generated: bool,
    pub can_rename: bool,
    pub initialization_only: bool,
    /// Set on both sides of an ambiguous named-function-expression collision.
    pub is_ambiguous: bool,
    pub is_referenced: bool,
    pub is_declared: bool,
    pub is_function: bool,
    /// Chains an ambiguous NFE binding (or a `WithField` binding) to what the
    /// reference would resolve to absent the `with`/collision.
    pub outer_field: Option<BindingId>,
    /// The environment this binding lives in.
    pub environment: EnvId,
}

impl Binding {
    fn new(name: String, category: BindingCategory, environment: EnvId) -> Self {
        Binding {
            name,
            crunched_name: None,
            category,
            mutability: Mutability::Mutable,
            reference_count: 0,
            initializer: None,
            is_generated: false,
            can_rename: !matches!(category, BindingCategory::Predefined | BindingCategory::WithField),
            initialization_only: false,
            is_ambiguous: false,
            is_referenced: false,
            is_declared: true,
            is_function: false,
            outer_field: None,
            environment,
        }
    }
}

/// A node in the Environment Tree: a name→binding map plus a parent link.
/// A function body is both lexical and variable environment;
/// block scopes (catch, with) are lexical-only children.
#[derive(Debug, Clone)]
pub struct LexicalEnvironment {
    parent: Option<EnvId>,
    /// The AST node (function body, catch block, `with` body, or program
    /// root) this environment was created for.
    pub owner: NodeId,
    /// Whether this environment may also hold `var`/function bindings
    /// (function bodies and the global scope) as opposed to lexical-only
    /// scopes (catch parameters, `with` bodies).
    pub is_variable_environment: bool,
    /// Set by the Analyzer when an `eval(...)` call is found directly inside
    /// this environment.
    pub known_at_compile_time: bool,
    names: HashMap<String, BindingId>,
}

/// The full tree of environments plus every binding created during analysis.
pub struct EnvironmentTree {
    envs: Vec<LexicalEnvironment>,
    bindings: Vec<Binding>,
    global: EnvId,
    /// Maps an environment's owner node back to the environment `push_env`
    /// created for it, so a later pass (e.g. `resolve`'s `TryStatement` arm,
    /// re-entering a catch handler hoisted ahead of it) can find the exact
    /// environment a previous pass already populated instead of pushing a
    /// second, empty one.
    owner_envs: HashMap<NodeId, EnvId>,
}

impl EnvironmentTree {
    fn new(program_root: NodeId) -> Self {
        let global_env = LexicalEnvironment {
            parent: None,
            owner: program_root,
            is_variable_environment: true,
            known_at_compile_time: true,
            names: HashMap::new(),
        };
        EnvironmentTree {
            envs: vec![global_env],
            bindings: Vec::new(),
            global: EnvId(0),
            owner_envs: HashMap::new(),
        }
    }

    /// The top-level global environment.
    pub fn global(&self) -> EnvId {
        self.global
    }

    fn push_env(&mut self, parent: EnvId, owner: NodeId, is_variable_environment: bool) -> EnvId {
        self.envs.push(LexicalEnvironment {
            parent: Some(parent),
            owner,
            is_variable_environment,
            known_at_compile_time: true,
            names: HashMap::new(),
        });
        let id = EnvId(self.envs.len() as u32 - 1);
        self.owner_envs.insert(owner, id);
        id
    }

    /// The environment previously `push_env`-ed for `owner`, if any. Used to
    /// re-enter an environment a prior pass already created and populated
    /// (the catch handler's scope, hoisted ahead of `resolve`'s walk).
    fn env_for_owner(&self, owner: NodeId) -> Option<EnvId> {
        self.owner_envs.get(&owner).copied()
    }

    fn env(&self, id: EnvId) -> &LexicalEnvironment {
        &self.envs[id.0 as usize]
    }

    fn env_mut(&mut self, id: EnvId) -> &mut LexicalEnvironment {
        &mut self.envs[id.0 as usize]
    }

    /// Every environment id, in allocation order (the global environment
    /// first, each `push_env` call's result after). Allocation order is a
    /// pre-order walk of the scope tree, since `resolve` pushes a function's
    /// environment before recursing into its body.
    pub fn env_ids(&self) -> impl Iterator<Item = EnvId> + '_ {
        (0..self.envs.len() as u32).map(EnvId)
    }

    /// `env`'s immediately enclosing environment, or `None` for the global
    /// environment.
    pub fn parent_of(&self, env: EnvId) -> Option<EnvId> {
        self.env(env).parent
    }

    /// Every binding declared directly in `env`, in no particular order.
    pub fn bindings_of(&self, env: EnvId) -> Vec<BindingId> {
        self.env(env).names.values().copied().collect()
    }

    /// Whether `env` was never observed to contain a direct `eval(...)` call.
    pub fn known_at_compile_time(&self, env: EnvId) -> bool {
        self.env(env).known_at_compile_time
    }

    /// The AST node (function body, catch handler, `with` body, or program
    /// root) `env` was pushed for. The Output Visitor uses this, inverted
    /// into a `NodeId -> EnvId` map, to know which environment it has
    /// entered while walking the same nodes a second time.
    pub fn owner_of(&self, env: EnvId) -> NodeId {
        self.env(env).owner
    }

    /// Resolve `name` starting at `env`, walking outward — the same chain
    /// `Lookup` references are resolved through. The Output Visitor uses this
    /// to find a declaration site's own binding (a `var` name, a parameter,
    /// a catch parameter, a function name) without needing a separate
    /// nearest-variable-environment special case: a declaration printed at
    /// its own scope position resolves to itself first.
    pub fn resolve_name(&self, env: EnvId, name: &str) -> Option<BindingId> {
        self.lookup(env, name)
    }

    /// Borrow a binding.
    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0 as usize]
    }

    /// Mutably borrow a binding.
    pub fn binding_mut(&mut self, id: BindingId) -> &mut Binding {
        &mut self.bindings[id.0 as usize]
    }

    /// Find the nearest variable environment at or above `env`, used to
    /// locate the home for hoisted `var`/function declarations.
    fn nearest_variable_env(&self, mut env: EnvId) -> EnvId {
        loop {
            if self.env(env).is_variable_environment {
                return env;
            }
            env = self.env(env).parent.expect("variable environment always exists above any block");
        }
    }

    /// Declare `name` in `env` with `category`, returning the existing
    /// binding if one is already present in that exact environment.
    fn declare(&mut self, env: EnvId, name: &str, category: BindingCategory) -> BindingId {
        if let Some(&existing) = self.env(env).names.get(name) {
            return existing;
        }
        let binding = Binding::new(name.to_string(), category, env);
        self.bindings.push(binding);
        let id = BindingId(self.bindings.len() as u32 - 1);
        self.env_mut(env).names.insert(name.to_string(), id);
        id
    }

    /// Resolve `name` starting at `env`, walking outward. Returns `None` if
    /// no environment up to and including the global defines it.
    fn lookup(&self, env: EnvId, name: &str) -> Option<BindingId> {
        let mut current = Some(env);
        while let Some(id) = current {
            if let Some(&binding) = self.env(id).names.get(name) {
                return Some(binding);
            }
            current = self.env(id).parent;
        }
        None
    }

    /// `name` declared directly in `env` itself, without walking to its
    /// parent.
    fn declared_in(&self, env: EnvId, name: &str) -> Option<BindingId> {
        self.env(env).names.get(name).copied()
    }

    /// Like [`Self::lookup`], but stops (returning `None`) on reaching
    /// `boundary` instead of continuing past it. Used to find a declaration
    /// closer than a `with` body's own environment — a nested function's
    /// parameter or local `var` still shadows the `with` object normally,
    /// and only a name that isn't found before reaching the boundary is a
    /// candidate for `with`'s dynamic field resolution.
    fn lookup_until(&self, env: EnvId, boundary: EnvId, name: &str) -> Option<BindingId> {
        let mut current = Some(env);
        while let Some(id) = current {
            if id == boundary {
                return None;
            }
            if let Some(&binding) = self.env(id).names.get(name) {
                return Some(binding);
            }
            current = self.env(id).parent;
        }
        None
    }
}

const PREDEFINED_GLOBALS: &[&str] = &[
    "window", "document", "Math", "JSON", "console", "Object", "Array", "Function", "String",
    "Number", "Boolean", "Date", "RegExp", "Error", "TypeError", "RangeError", "undefined", "NaN",
    "Infinity", "parseInt", "parseFloat", "isNaN", "isFinite", "encodeURIComponent",
    "decodeURIComponent", "setTimeout", "setInterval", "clearTimeout", "clearInterval",
];

/// Build the Environment Tree for `root` and resolve every reference.
/// Returns the tree plus any diagnostics raised along the
/// way (undefined references, ambiguous NFEs), each paired with the span of
/// the offending reference/declaration so callers can report them in
/// source order; these never abort analysis.
pub fn analyze(
    arena: &mut Arena,
    root: NodeId,
    settings: &Settings,
) -> (EnvironmentTree, Vec<(AnalyzerErrorKind, Span)>) {
    let mut tree = EnvironmentTree::new(root);
    let mut errors = Vec::new();

    for name in PREDEFINED_GLOBALS {
        tree.declare(tree.global, name, BindingCategory::Predefined);
    }
    for name in &settings.known_globals {
        tree.declare(tree.global, name, BindingCategory::Predefined);
    }

    hoist(arena, root, tree.global, &mut tree);
    resolve(arena, root, tree.global, &mut tree, &mut errors, None);
    (tree, errors)
}

/// First pass: walk statements (not descending into nested function bodies,
/// which get their own hoist pass when visited) collecting `var` and
/// function declarations into the nearest variable environment.
fn hoist(arena: &Arena, id: NodeId, env: EnvId, tree: &mut EnvironmentTree) {
    match arena.node(id).clone() {
        Node::Statement(Stmt::VarStatement { declarations }) => {
            let var_env = tree.nearest_variable_env(env);
            for decl in &declarations {
                tree.declare(var_env, &decl.name, BindingCategory::Normal);
            }
        }
        Node::Statement(Stmt::TryStatement { catch_param: Some(param), handler, .. }) => {
            if let Some(handler) = handler {
                let catch_env = tree.push_env(env, handler, false);
                tree.declare(catch_env, &param, BindingCategory::Normal);
                for child in arena.node(handler).children() {
                    hoist(arena, child, catch_env, tree);
                }
            }
        }
        _ => {}
    }
    for child in arena.node(id).children() {
        if is_function_boundary(arena, child) {
            // A declaration's name hoists into the enclosing variable
            // environment even though its body is not walked until `resolve`
            // pushes a fresh environment for it; expression/getter/setter
            // functions introduce no name here at all.
            if let Node::Expression(Expr::FunctionObject {
                kind: crate::ast::expressions::FunctionKind::Declaration,
                name: Some(name),
                ..
            }) = arena.node(child)
            {
                let var_env = tree.nearest_variable_env(env);
                let binding = tree.declare(var_env, name, BindingCategory::Normal);
                tree.binding_mut(binding).is_function = true;
            }
            continue;
        }
        hoist(arena, child, env, tree);
    }
}

fn is_function_boundary(arena: &Arena, id: NodeId) -> bool {
    matches!(arena.node(id), Node::Expression(Expr::FunctionObject { .. }))
}

/// Second pass: enter function bodies to push fresh environments, declare
/// parameters and the NFE self-binding, resolve every `Lookup`, and detect
/// `eval` calls.
///
/// `with_scope` is the nearest enclosing `with` body's environment, if any —
/// it stays `Some` across nested function boundaries too, since a function
/// defined lexically inside a `with` body still has its free-variable
/// references subject to the `with` object's dynamic shadowing for as long
/// as the function stays textually within the `with`.
fn resolve(
    arena: &mut Arena,
    id: NodeId,
    env: EnvId,
    tree: &mut EnvironmentTree,
    errors: &mut Vec<(AnalyzerErrorKind, Span)>,
    with_scope: Option<EnvId>,
) {
    let node = arena.node(id).clone();
    let span = arena.span(id);
    match node {
        Node::Expression(Expr::FunctionObject { kind, name, params, body }) => {
            let fn_env = tree.push_env(env, body, true);
            let var_env = tree.nearest_variable_env(env);

            tree.declare(fn_env, "arguments", BindingCategory::Arguments);
            for param in &params {
                tree.declare(fn_env, param, BindingCategory::Argument);
            }

            if matches!(kind, crate::ast::expressions::FunctionKind::Expression) {
                if let Some(name) = &name {
                    if let Some(existing) = tree.env(var_env).names.get(name).copied() {
                        let self_binding = tree.declare(fn_env, name, BindingCategory::NamedFunctionExpression);
                        tree.binding_mut(self_binding).is_ambiguous = true;
                        tree.binding_mut(self_binding).outer_field = Some(existing);
                        tree.binding_mut(existing).is_ambiguous = true;
                        errors.push((AnalyzerErrorKind::AmbiguousNamedFunctionExpression { name: name.clone() }, span));
                    } else {
                        tree.declare(fn_env, name, BindingCategory::NamedFunctionExpression);
                    }
                }
            }

            hoist(arena, body, fn_env, tree);
            resolve(arena, body, fn_env, tree, errors, with_scope);
        }
        Node::Statement(Stmt::TryStatement { block, catch_param, handler, finalizer }) => {
            resolve(arena, block, env, tree, errors, with_scope);
            if let Some(handler) = handler {
                if catch_param.is_some() {
                    // `hoist` already pushed and populated this environment
                    // (owner == handler) before `resolve` reached it; re-enter
                    // the same one instead of pushing a second, empty one, so
                    // references to the catch parameter inside the handler
                    // bind to it instead of falling through to `env`.
                    let catch_env = tree
                        .env_for_owner(handler)
                        .expect("hoist pushes a catch environment whenever catch_param is Some");
                    resolve(arena, handler, catch_env, tree, errors, with_scope);
                } else {
                    resolve(arena, handler, env, tree, errors, with_scope);
                }
            }
            if let Some(finalizer) = finalizer {
                resolve(arena, finalizer, env, tree, errors, with_scope);
            }
        }
        Node::Statement(Stmt::WithStatement { object, body }) => {
            resolve(arena, object, env, tree, errors, with_scope);
            let with_env = tree.push_env(env, body, false);
            tree.env_mut(with_env).known_at_compile_time = false;
            resolve(arena, body, with_env, tree, errors, Some(with_env));
        }
        Node::Expression(Expr::Lookup { name, .. }) => {
            let binding = resolve_lookup_binding(tree, env, &name, with_scope, errors, span);
            tree.binding_mut(binding).reference_count += 1;
            tree.binding_mut(binding).is_referenced = true;
            if let Node::Expression(Expr::Lookup { binding: slot, .. }) = arena.node_mut(id) {
                *slot = Some(binding);
            }
        }
        Node::Expression(Expr::CallExpression { callee, .. }) => {
            if is_eval_callee(arena, callee) {
                mark_not_compile_time_known(tree, env);
            }
            for child in node_children(arena, id) {
                resolve(arena, child, env, tree, errors, with_scope);
            }
        }
        _ => {
            for child in node_children(arena, id) {
                resolve(arena, child, env, tree, errors, with_scope);
            }
        }
    }
}

/// Resolves a `Lookup`'s target binding. Outside any `with`, this is a plain
/// outward walk that lazily creates a `Global` binding (and an
/// `UndefinedReference` diagnostic) the first time a name is never found.
///
/// Inside a `with` body (`with_scope` is `Some`), the first reference to a
/// given name creates a `WithField` binding directly in the `with`'s own
/// environment — chained via `outer_field` to whatever the name would have
/// resolved to absent the `with` — and marks both ends `is_ambiguous`, the
/// same flag and Renamer short-circuit (`decide_name`) already used to keep
/// an ambiguous named-function-expression pair textually untouched. Later
/// references to the same name inside the same `with` body reuse it.
fn resolve_lookup_binding(
    tree: &mut EnvironmentTree,
    env: EnvId,
    name: &str,
    with_scope: Option<EnvId>,
    errors: &mut Vec<(AnalyzerErrorKind, Span)>,
    span: Span,
) -> BindingId {
    let Some(with_scope) = with_scope else {
        return resolve_or_create_global(tree, env, name, errors, span);
    };
    // A declaration closer than the `with` body itself (a nested function's
    // parameter or local `var`) shadows the `with` object normally and is
    // never redirected through a `WithField`.
    if let Some(local) = tree.lookup_until(env, with_scope, name) {
        return local;
    }
    if let Some(existing) = tree.declared_in(with_scope, name) {
        return existing;
    }
    let outer_env = tree
        .parent_of(with_scope)
        .expect("a with scope's environment always has a parent");
    let outer = resolve_or_create_global(tree, outer_env, name, errors, span);
    let field = tree.declare(with_scope, name, BindingCategory::WithField);
    tree.binding_mut(field).outer_field = Some(outer);
    tree.binding_mut(field).is_ambiguous = true;
    tree.binding_mut(outer).is_ambiguous = true;
    field
}

fn resolve_or_create_global(
    tree: &mut EnvironmentTree,
    env: EnvId,
    name: &str,
    errors: &mut Vec<(AnalyzerErrorKind, Span)>,
    span: Span,
) -> BindingId {
    match tree.lookup(env, name) {
        Some(existing) => existing,
        None => {
            errors.push((AnalyzerErrorKind::UndefinedReference { name: name.to_string() }, span));
            tree.declare(tree.global, name, BindingCategory::Global)
        }
    }
}

fn node_children(arena: &Arena, id: NodeId) -> Vec<NodeId> {
    arena.node(id).children()
}

fn is_eval_callee(arena: &Arena, id: NodeId) -> bool {
    matches!(arena.node(id), Node::Expression(Expr::Lookup { name, .. }) if name == "eval")
}

/// Marks the nearest variable environment as "not known at compile time".
/// `eval_treatment` itself only narrows what the
/// Renamer is later allowed to do in the affected scope(s); the Renamer
/// reads `known_at_compile_time` (and, for `MakeAllSafe`, walks ancestors
/// via [`eval_affects_ancestors`]) rather than this function doing more work
/// up front.
fn mark_not_compile_time_known(tree: &mut EnvironmentTree, env: EnvId) {
    let fn_env = tree.nearest_variable_env(env);
    tree.env_mut(fn_env).known_at_compile_time = false;
}

/// Whether `treatment` should restrict renaming beyond the immediate scope.
pub fn eval_affects_ancestors(treatment: EvalTreatment) -> bool {
    matches!(treatment, EvalTreatment::MakeAllSafe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expressions::{Expr, FunctionKind};
    use crate::ast::statements::{Stmt, VarDeclarator};
    use crate::span::Span;

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }

    #[test]
    fn resolves_var_reference_to_its_binding() {
        let mut arena = Arena::new();
        let lookup = arena.alloc(
            Node::Expression(Expr::Lookup { name: "a".to_string(), binding: None }),
            dummy_span(),
        );
        let expr_stmt = arena.alloc(Node::Statement(Stmt::Expression { expression: lookup }), dummy_span());
        let var_stmt = arena.alloc(
            Node::Statement(Stmt::VarStatement {
                declarations: vec![VarDeclarator { name: "a".to_string(), init: None }],
            }),
            dummy_span(),
        );
        let root = arena.alloc(Node::Statement(Stmt::Block { body: vec![var_stmt, expr_stmt] }), dummy_span());
        arena.set_root(root);

        let settings = Settings::default();
        let (tree, errors) = analyze(&mut arena, root, &settings);
        assert!(errors.is_empty());
        if let Node::Expression(Expr::Lookup { binding: Some(id), .. }) = arena.node(lookup) {
            assert_eq!(tree.binding(*id).name, "a");
            assert_eq!(tree.binding(*id).reference_count, 1);
        } else {
            panic!("expected resolved lookup");
        }
    }

    #[test]
    fn undefined_reference_creates_global_binding_and_diagnostic() {
        let mut arena = Arena::new();
        let lookup = arena.alloc(
            Node::Expression(Expr::Lookup { name: "mystery".to_string(), binding: None }),
            dummy_span(),
        );
        let root = arena.alloc(Node::Statement(Stmt::Expression { expression: lookup }), dummy_span());
        arena.set_root(root);

        let settings = Settings::default();
        let (_tree, errors) = analyze(&mut arena, root, &settings);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].0, AnalyzerErrorKind::UndefinedReference { .. }));
    }

    #[test]
    fn ambiguous_named_function_expression_chains_both_bindings() {
        let mut arena = Arena::new();
        let body = arena.alloc(Node::Statement(Stmt::Block { body: vec![] }), dummy_span());
        let inner_fn = arena.alloc(
            Node::Expression(Expr::FunctionObject {
                kind: FunctionKind::Expression,
                name: Some("foo".to_string()),
                params: vec![],
                body,
            }),
            dummy_span(),
        );
        let call = arena.alloc(
            Node::Expression(Expr::CallExpression { callee: inner_fn, arguments: vec![], is_new: false }),
            dummy_span(),
        );
        let call_stmt = arena.alloc(Node::Statement(Stmt::Expression { expression: call }), dummy_span());
        let var_stmt = arena.alloc(
            Node::Statement(Stmt::VarStatement {
                declarations: vec![VarDeclarator { name: "foo".to_string(), init: None }],
            }),
            dummy_span(),
        );
        let root = arena.alloc(Node::Statement(Stmt::Block { body: vec![var_stmt, call_stmt] }), dummy_span());
        arena.set_root(root);

        let settings = Settings::default();
        let (tree, errors) = analyze(&mut arena, root, &settings);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].0, AnalyzerErrorKind::AmbiguousNamedFunctionExpression { .. }));

        let outer = tree.lookup(tree.global(), "foo").unwrap();
        assert!(tree.binding(outer).is_ambiguous);
    }
}
