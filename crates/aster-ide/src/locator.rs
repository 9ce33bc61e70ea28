//! Exact-range expression lookup.

use aster_ast::{children, ExprData, NodeData, NodeIndex};
use aster_common::Span;
use aster_sema::{ScopeId, SourceUnit};

/// Find the expression whose source extent exactly equals `target`.
///
/// Compiler-synthesized wrappers (implicit conversions, auto-closures,
/// constructor references) are never meaningful completion targets and are
/// skipped in favor of their wrapped expression. Type-annotation subtrees
/// are never searched.
///
/// Returns `None` when no expression matches. Panics when more than one
/// does: that means a range invariant was broken upstream, not a
/// recoverable input condition.
pub fn find_parsed_expr(unit: &SourceUnit, scope: ScopeId, target: Span) -> Option<NodeIndex> {
    let root = unit.scopes.body_node(scope);
    if root.is_none() {
        return None;
    }
    let mut finder = ExprFinder {
        unit,
        target,
        found: None,
    };
    finder.walk(root);
    finder.found
}

struct ExprFinder<'a> {
    unit: &'a SourceUnit,
    target: Span,
    found: Option<NodeIndex>,
}

impl ExprFinder<'_> {
    fn walk(&mut self, index: NodeIndex) {
        let node = self.unit.arena.node(index);

        // Restrict the descent to subtrees that can contain the target.
        if !node.span.contains(self.target) {
            return;
        }

        if let NodeData::Expr(expr) = &node.data {
            // Never search inside types written in expression position.
            if matches!(expr, ExprData::TypeRef) {
                return;
            }
            if node.span == self.target && !is_synthesized_wrapper(expr) {
                assert!(
                    self.found.is_none(),
                    "more than one expression matches the target range exactly"
                );
                tracing::trace!(node = index.0, "located completion target");
                self.found = Some(index);
                return;
            }
        }

        for child in children(&self.unit.arena, index) {
            self.walk(child);
        }
    }
}

fn is_synthesized_wrapper(expr: &ExprData) -> bool {
    matches!(
        expr,
        ExprData::ImplicitConversion { .. }
            | ExprData::AutoClosure { .. }
            | ExprData::ConstructorRef { .. }
    )
}
