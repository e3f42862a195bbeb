//! Allocating short, collision-free identifiers for renamable bindings.
//!
//! Builds on the Environment Tree's binding table ([`crate::env`]) the way
//! the Analyzer builds on the arena, and reuses the scanner's `phf` keyword
//! tables (`scanner::keywords::KEYWORDS`/`FUTURE_RESERVED_WORDS`) so a
//! generated name is never one the parser itself would refuse to treat as an
//! identifier.

use crate::ast::expressions::Literal;
use crate::ast::{walk_pre, Arena, Expr, Node, NodeId};
use crate::env::{BindingCategory, BindingId, EnvId, EnvironmentTree};
use crate::scanner::keywords::{FUTURE_RESERVED_WORDS, KEYWORDS};
use crate::settings::{EvalTreatment, Settings};
use std::collections::{HashMap, HashSet};

const HEAD_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$_";
const TAIL_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789$_";

/// Produces `a, b, ..., z, A, ..., $, _, aa, ab, ...` — a bijective base
/// conversion over a 54-symbol head alphabet then a 64-symbol tail alphabet,
/// skipping any candidate that collides with a keyword or reserved word.
struct NameAllocator {
    next: u64,
}

impl NameAllocator {
    fn new() -> Self {
        NameAllocator { next: 0 }
    }

    fn encode(index: u64) -> String {
        let head_len = HEAD_ALPHABET.len() as u64;
        let tail_len = TAIL_ALPHABET.len() as u64;
        let mut rest = index / head_len;
        let mut chars = vec![HEAD_ALPHABET[(index % head_len) as usize]];
        while rest > 0 {
            rest -= 1;
            chars.push(TAIL_ALPHABET[(rest % tail_len) as usize]);
            rest /= tail_len;
        }
        String::from_utf8(chars).expect("alphabets are ASCII")
    }

    fn next_candidate(&mut self) -> String {
        loop {
            let name = Self::encode(self.next);
            self.next += 1;
            if !is_reserved(&name) {
                return name;
            }
        }
    }

    /// The next name not already present in `reserved`.
    fn allocate(&mut self, reserved: &HashSet<String>) -> String {
        loop {
            let candidate = self.next_candidate();
            if !reserved.contains(&candidate) {
                return candidate;
            }
        }
    }
}

fn is_reserved(name: &str) -> bool {
    KEYWORDS.contains_key(name) || FUTURE_RESERVED_WORDS.contains(name) || name == "arguments" || name == "eval"
}

/// Run the Renamer: assign `crunched_name`s to every eligible binding, then
/// apply `rename_pairs` to matching non-computed property accesses if
/// `manual_renames_properties` is set.
pub fn run(tree: &mut EnvironmentTree, arena: &mut Arena, settings: &Settings) {
    rename_bindings(tree, settings);
    if settings.manual_renames_properties {
        rename_properties(arena, settings);
    }
}

/// Assigns `crunched_name`s across the whole Environment Tree.
///
/// Environments are visited in `env_ids()` order, which is guaranteed to be
/// a pre-order walk of the scope tree (a child environment is always pushed
/// after its parent already exists), so each environment's reserved-name set
/// can be built by inheriting its parent's before processing its own
/// bindings. A name assigned to an outer binding is never reused by an inner
/// one — a conservative rule that sacrifices some crunching opportunities for
/// the guarantee that no nested scope's generated name ever shadows a
/// visible outer binding, renamed or not.
fn rename_bindings(tree: &mut EnvironmentTree, settings: &Settings) {
    let restrict_ancestors = crate::env::eval_affects_ancestors(settings.eval_treatment);
    let mut reserved_by_env: HashMap<EnvId, HashSet<String>> = HashMap::new();
    let mut eligible_by_env: HashMap<EnvId, bool> = HashMap::new();

    for env in tree.env_ids() {
        let parent = tree.parent_of(env);
        let mut reserved = parent.and_then(|p| reserved_by_env.get(&p).cloned()).unwrap_or_default();

        let parent_eligible = parent.map(|p| eligible_by_env.get(&p).copied().unwrap_or(true)).unwrap_or(true);
        let own_known = match settings.eval_treatment {
            EvalTreatment::Ignore => true,
            _ => tree.known_at_compile_time(env),
        };
        let eligible = own_known && (!restrict_ancestors || parent_eligible);
        eligible_by_env.insert(env, eligible);

        let mut bindings = tree.bindings_of(env);
        bindings.sort_by(|a, b| tree.binding(*a).name.cmp(&tree.binding(*b).name));

        let mut allocator = NameAllocator::new();
        for binding_id in bindings {
            let name = decide_name(tree, binding_id, settings, eligible, &mut allocator, &reserved);
            reserved.insert(name.clone().unwrap_or_else(|| tree.binding(binding_id).name.clone()));
            if let Some(name) = name {
                tree.binding_mut(binding_id).crunched_name = Some(name);
            }
        }
        reserved_by_env.insert(env, reserved);
    }
}

fn decide_name(
    tree: &EnvironmentTree,
    binding_id: BindingId,
    settings: &Settings,
    scope_eligible: bool,
    allocator: &mut NameAllocator,
    reserved: &HashSet<String>,
) -> Option<String> {
    let binding = tree.binding(binding_id);

    if let Some(mapped) = settings.rename_pairs.get(&binding.name) {
        return binding.can_rename.then(|| mapped.clone());
    }
    if !binding.can_rename {
        return None;
    }
    // A lazily-created binding for an otherwise-undefined reference names a
    // real global; renaming it would just break the program.
    if matches!(binding.category, BindingCategory::Global) {
        return None;
    }
    if binding.is_ambiguous {
        return None;
    }
    if settings.preserve_function_names
        && (binding.is_function || matches!(binding.category, BindingCategory::NamedFunctionExpression))
    {
        return None;
    }
    if !scope_eligible {
        return None;
    }
    if settings.is_rename_exempt(&binding.name) {
        return None;
    }
    Some(allocator.allocate(reserved))
}

/// Apply `rename_pairs` to non-computed member property names (`a.from` ->
/// `a.to`), independent of binding renaming, when
/// `Settings::manual_renames_properties` is set.
fn rename_properties(arena: &mut Arena, settings: &Settings) {
    if settings.rename_pairs.is_empty() {
        return;
    }
    let Some(root) = arena.root() else { return };
    let mut properties = Vec::new();
    walk_pre(arena, root, &mut |id| {
        if let Node::Expression(Expr::Member { property, computed: false, .. }) = arena.node(id) {
            properties.push(*property);
        }
    });
    for property in properties {
        if let Node::Expression(Expr::ConstantWrapper(Literal::String { value, .. })) = arena.node_mut(property) {
            if let Some(renamed) = settings.rename_pairs.get(value) {
                *value = renamed.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::statements::{Stmt, VarDeclarator};
    use crate::span::Span;

    fn dummy_span() -> Span {
        Span::point(0, 0, 1, 0)
    }

    #[test]
    fn allocator_skips_keywords_and_reserved_words() {
        let mut allocator = NameAllocator::new();
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let name = allocator.next_candidate();
            assert!(!is_reserved(&name), "allocator produced reserved word {name}");
            assert!(seen.insert(name), "allocator repeated a name");
        }
    }

    #[test]
    fn renames_eligible_var_binding() {
        let mut arena = Arena::new();
        let var_stmt = arena.alloc(
            Node::Statement(Stmt::VarStatement {
                declarations: vec![VarDeclarator { name: "counter".to_string(), init: None }],
            }),
            dummy_span(),
        );
        let root = arena.alloc(Node::Statement(Stmt::Block { body: vec![var_stmt] }), dummy_span());
        arena.set_root(root);

        let settings = Settings::default();
        let (mut tree, _errors) = crate::env::analyze(&mut arena, root, &settings);
        rename_bindings(&mut tree, &settings);

        let binding = tree.bindings_of(tree.global()).into_iter().find(|b| tree.binding(*b).name == "counter");
        let binding = binding.expect("counter binding exists");
        assert_eq!(tree.binding(binding).crunched_name.as_deref(), Some("a"));
    }

    #[test]
    fn keep_all_policy_disables_automatic_renaming_but_not_manual_pairs() {
        let mut arena = Arena::new();
        let var_stmt = arena.alloc(
            Node::Statement(Stmt::VarStatement {
                declarations: vec![VarDeclarator { name: "counter".to_string(), init: None }],
            }),
            dummy_span(),
        );
        let root = arena.alloc(Node::Statement(Stmt::Block { body: vec![var_stmt] }), dummy_span());
        arena.set_root(root);

        let mut settings = Settings::default();
        settings.local_renaming = crate::settings::LocalRenaming::KeepAll;
        settings.rename_pairs.insert("counter".to_string(), "c".to_string());
        let (mut tree, _errors) = crate::env::analyze(&mut arena, root, &settings);
        rename_bindings(&mut tree, &settings);

        let binding = tree.bindings_of(tree.global()).into_iter().find(|b| tree.binding(*b).name == "counter");
        let binding = binding.expect("counter binding exists");
        assert_eq!(tree.binding(binding).crunched_name.as_deref(), Some("c"));
    }

    #[test]
    fn predefined_global_never_renamed() {
        let mut arena = Arena::new();
        let lookup =
            arena.alloc(Node::Expression(Expr::Lookup { name: "Math".to_string(), binding: None }), dummy_span());
        let root = arena.alloc(Node::Statement(Stmt::Expression { expression: lookup }), dummy_span());
        arena.set_root(root);

        let settings = Settings::default();
        let (mut tree, _errors) = crate::env::analyze(&mut arena, root, &settings);
        rename_bindings(&mut tree, &settings);

        let binding = tree.bindings_of(tree.global()).into_iter().find(|b| tree.binding(*b).name == "Math").unwrap();
        assert_eq!(tree.binding(binding).crunched_name, None);
    }
}
