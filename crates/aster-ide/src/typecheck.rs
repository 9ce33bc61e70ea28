//! Partial type-checking of the scopes enclosing a source location.

use aster_ast::{for_each_bound_variable, DeclData, NodeData, NodeIndex};
use aster_common::DeclId;
use aster_sema::{ScopeId, ScopeKind, SourceUnit, TypecheckService};
use smallvec::SmallVec;

/// Type-check every scope enclosing `loc`, outermost first, far enough that
/// the declarations surrounding the location are available for inference.
///
/// Closure scopes own no checkable declarations and are skipped over; the
/// walk ascends past them to the first non-closure scope. If that scope is
/// a top-level code unit it is checked as a whole: the driving pipeline
/// does not check it automatically in that case.
pub fn typecheck_context_until(
    unit: &mut SourceUnit,
    typeck: &mut dyn TypecheckService,
    scope: ScopeId,
    loc: u32,
) {
    let mut dc = scope;
    while let ScopeKind::Closure { .. } = unit.scopes.kind(dc) {
        let Some(parent) = unit.scopes.parent(dc) else {
            return;
        };
        dc = parent;
    }

    // The ascent decides whether the top-level rule applies: a closure in a
    // top-level unit is checked through that unit, not skipped.
    if let ScopeKind::TopLevel { .. } = unit.scopes.kind(dc) {
        tracing::debug!(scope = dc.0, "checking top-level unit for completion");
        typeck.check_top_level_unit(unit, dc);
        return;
    }

    // Collect the enclosing chain, then process it outermost-to-innermost.
    // An explicit chain avoids unbounded recursion on deeply nested scopes.
    let mut chain: SmallVec<[ScopeId; 8]> = SmallVec::new();
    let mut cursor = Some(dc);
    while let Some(current) = cursor {
        if unit.scopes.is_module_scope(current) {
            break;
        }
        chain.push(current);
        cursor = unit.scopes.parent(current);
    }

    for &current in chain.iter().rev() {
        check_scope(unit, typeck, current, loc);
    }
}

fn check_scope(unit: &mut SourceUnit, typeck: &mut dyn TypecheckService, scope: ScopeId, loc: u32) {
    match unit.scopes.kind(scope) {
        // Purely syntactic scopes: nothing to check.
        ScopeKind::Module { .. }
        | ScopeKind::TopLevel { .. }
        | ScopeKind::Closure { .. }
        | ScopeKind::SerializedLocal
        | ScopeKind::EnumElement { .. } => {}

        ScopeKind::Initializer { binding, entry } => {
            check_initializer(unit, typeck, binding, entry as usize);
        }

        ScopeKind::Function { decl, .. } => {
            tracing::debug!(decl = decl.0, "checking function body for completion");
            typeck.check_function_body_until(unit, decl, loc);
        }

        ScopeKind::Accessor { decl, storage, .. } => {
            // The storage declaration must be checked before its accessor.
            typeck.check_decl_for_completion(unit, storage);
            typeck.check_function_body_until(unit, decl, loc);
        }

        ScopeKind::Extension { decl, .. }
        | ScopeKind::TypeDecl { decl, .. }
        | ScopeKind::SubscriptDecl { decl, .. } => {
            typeck.check_decl_for_completion(unit, decl);
        }
    }
}

fn check_initializer(
    unit: &mut SourceUnit,
    typeck: &mut dyn TypecheckService,
    binding: NodeIndex,
    entry: usize,
) {
    let (pattern, has_initializer, initializer_checked) = {
        let NodeData::Decl(DeclData::PatternBinding { entries }) = &unit.arena.node(binding).data
        else {
            return;
        };
        let Some(e) = entries.get(entry) else {
            return;
        };
        (e.pattern, !e.initializer.is_none(), e.initializer_checked)
    };
    if !has_initializer {
        return;
    }

    // Every bound variable needs a declared type before the initializer
    // expression itself can be checked.
    let mut bound: SmallVec<[DeclId; 4]> = SmallVec::new();
    for_each_bound_variable(&unit.arena, pattern, &mut |decl| bound.push(decl));
    for decl in bound {
        typeck.check_decl_for_completion(unit, decl);
    }

    if !initializer_checked {
        typeck.check_pattern_binding_entry(unit, binding, entry);
    }
}
