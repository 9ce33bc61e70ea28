//! Reset pass run before re-typechecking an expression.
//!
//! Completion may type-check parts of an expression more than once: first
//! to derive context, later for more specific queries. A failed earlier
//! pass leaves error/unresolved markers stamped on the tree, and a later
//! pass would short-circuit on them. This pass erases exactly those
//! markers so checking can make progress again. It never fails and running
//! it twice is the same as running it once.

use aster_ast::{children, ExprData, NodeArena, NodeData, NodeIndex};
use aster_sema::TypeTable;

/// Clear stale error/unresolved type stamps from an expression subtree.
///
/// Covers expressions, patterns, and embedded type annotations. Statement
/// bodies are left untouched: only expression-level single-statement
/// bodies are reachable through an expression walk, and block bodies keep
/// whatever state they have.
pub fn prepare_for_retypecheck(arena: &mut NodeArena, types: &TypeTable, root: NodeIndex) {
    assert!(!root.is_none(), "retypecheck reset needs a target expression");
    reset(arena, types, root);
}

fn reset(arena: &mut NodeArena, types: &TypeTable, index: NodeIndex) {
    match &arena.node(index).data {
        // Auto-closure wrappers hold no meaningful type state; stand in
        // their single body expression and continue from there.
        NodeData::Expr(ExprData::AutoClosure { body }) => {
            let body = *body;
            clear_if_stale(arena, types, index);
            if !body.is_none() {
                reset(arena, types, body);
            }
            return;
        }
        NodeData::Expr(_) | NodeData::Pat(_) => clear_if_stale(arena, types, index),
        // Do not descend into nested statement bodies.
        NodeData::Stmt(_) | NodeData::Decl(_) => return,
    }

    for child in children(arena, index) {
        reset(arena, types, child);
    }
}

fn clear_if_stale(arena: &mut NodeArena, types: &TypeTable, index: NodeIndex) {
    if let Some(ty) = arena.node(index).ty
        && (types.contains_error(ty) || types.contains_unresolved(ty))
    {
        arena.set_type(index, None);
    }
}
