//! The Transformer: a fixed sequence of tree-rewriting passes run after
//! analysis and before renaming.
//!
//! Each pass shares the arena-mutation idioms already established by `crate::env`
//! (`Arena::node_mut` overwrite-in-place for same-shape rewrites,
//! `Arena::replace_child` plus `Arena::set_parent` when a node's children
//! change).

mod block_flatten;
mod dead_code;
mod debug_strip;
mod literal_combine;
mod literal_fold;
mod logical_not;
mod new_collapse;

use crate::ast::{Arena, NodeId};
use crate::settings::{KillSwitch, Settings};

/// Run every enabled pass over `root`, in a fixed order: reachability first
/// (so later passes never work on dead code),
/// then literal combining, then folding/collapsing, then the two
/// syntax-shrinking rewrites (`!` inversion, block/conditional flattening).
/// Renaming is not part of this pipeline; it is the Renamer's own pass, run
/// by the caller after `run` returns.
pub fn run(arena: &mut Arena, root: NodeId, settings: &Settings) {
    if settings.strip_debug_statements || !settings.debug_lookups.is_empty() {
        debug_strip::strip_debug(arena, root, settings);
    }
    if settings.remove_unneeded_code && settings.kill_switch.is_enabled(KillSwitch::DEAD_CODE_REMOVAL) {
        dead_code::remove_dead_code(arena, root);
    }
    if settings.combine_duplicate_literals && settings.kill_switch.is_enabled(KillSwitch::LITERAL_COMBINING) {
        literal_combine::combine_duplicate_literals(arena, root);
    }
    if settings.eval_literal_expressions && settings.kill_switch.is_enabled(KillSwitch::LITERAL_FOLDING) {
        literal_fold::fold_literals(arena, root);
    }
    if settings.collapse_to_literal && settings.kill_switch.is_enabled(KillSwitch::NEW_COLLAPSE) {
        new_collapse::collapse_new_expressions(arena, root);
    }
    if settings.kill_switch.is_enabled(KillSwitch::LOGICAL_NOT_INVERSION) {
        logical_not::invert_logical_not(arena, root);
    }
    if settings.kill_switch.is_enabled(KillSwitch::BLOCK_FLATTENING) {
        block_flatten::flatten_blocks(arena, root);
    }
    if settings.kill_switch.is_enabled(KillSwitch::CONDITIONAL_TO_LOGICAL) {
        block_flatten::conditional_to_logical(arena, root);
    }
}
