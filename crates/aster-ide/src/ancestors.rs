//! Ancestor chain collection for the context analyzer.

use aster_ast::{children, ExprData, NodeArena, NodeData, NodeIndex, StmtData};
use aster_sema::{ScopeId, ScopeKind, SourceUnit};
use smallvec::SmallVec;

/// Collect the chain of "interesting" ancestors enclosing `target`,
/// outermost first. Interesting nodes are the ones the analyzer has an
/// inference rule for; everything else is transparent.
///
/// The walk starts at the body of `scope`. For an initializer scope the
/// binding declaration itself must stay visible as an ancestor, so the walk
/// starts one scope up instead.
pub fn find_interesting_ancestors(
    unit: &SourceUnit,
    scope: ScopeId,
    target: NodeIndex,
) -> SmallVec<[NodeIndex; 5]> {
    let mut start = scope;
    if let ScopeKind::Initializer { .. } = unit.scopes.kind(start)
        && let Some(parent) = unit.scopes.parent(start)
    {
        start = parent;
    }
    let root = unit.scopes.body_node(start);

    let mut finder = AncestorFinder {
        unit,
        target,
        stack: SmallVec::new(),
    };
    if !root.is_none() {
        finder.walk(root, NodeIndex::NONE);
    }
    finder.stack
}

struct AncestorFinder<'a> {
    unit: &'a SourceUnit,
    target: NodeIndex,
    stack: SmallVec<[NodeIndex; 5]>,
}

impl AncestorFinder<'_> {
    /// Returns `false` once the target has been reached; the enclosing
    /// chain on the stack is then left as-is all the way up.
    fn walk(&mut self, index: NodeIndex, parent: NodeIndex) -> bool {
        let node = self.unit.arena.node(index);
        let target_node = self.unit.arena.node(self.target);

        if index == self.target {
            return false;
        }
        // A node covering exactly the hole's range stands for the hole: the
        // parser may re-wrap the hole while recovering, and the wrapper must
        // not count as its own ancestor.
        if matches!(node.data, NodeData::Expr(_)) && node.span == target_node.span {
            return false;
        }

        let pushed = is_interesting(&self.unit.arena, index, parent);
        if pushed {
            self.stack.push(index);
        }

        for child in children(&self.unit.arena, index) {
            if !self.walk(child, index) {
                return false;
            }
        }

        if pushed {
            self.stack.pop();
        }
        true
    }
}

fn is_interesting(arena: &NodeArena, index: NodeIndex, parent: NodeIndex) -> bool {
    match &arena.node(index).data {
        NodeData::Expr(expr) => match expr {
            ExprData::Call { .. }
            | ExprData::Subscript { .. }
            | ExprData::Binary { .. }
            | ExprData::Unary { .. }
            | ExprData::Assign { .. } => true,

            // A tuple is only interesting as a value; argument lists are
            // handled through their apply node.
            ExprData::Tuple { .. } => {
                if parent.is_none() {
                    return true;
                }
                !matches!(
                    arena.node(parent).data,
                    NodeData::Expr(
                        ExprData::Call { .. }
                            | ExprData::Subscript { .. }
                            | ExprData::Binary { .. }
                            | ExprData::Shuffle { .. }
                    )
                )
            }

            ExprData::Closure { body, .. } => is_single_expression_body(arena, *body),

            _ => false,
        },

        NodeData::Stmt(stmt) => matches!(
            stmt,
            StmtData::Return { .. }
                | StmtData::ForEach { .. }
                | StmtData::RepeatWhile { .. }
                | StmtData::If { .. }
                | StmtData::While { .. }
                | StmtData::Guard { .. }
        ),

        NodeData::Decl(decl) => matches!(decl, aster_ast::DeclData::PatternBinding { .. }),

        NodeData::Pat(pat) => matches!(pat, aster_ast::PatData::Expr { .. }),
    }
}

/// A closure body consisting of exactly one expression element.
pub(crate) fn is_single_expression_body(arena: &NodeArena, body: NodeIndex) -> bool {
    if body.is_none() {
        return false;
    }
    let elements = children(arena, body);
    elements.len() == 1 && matches!(arena.node(elements[0]).data, NodeData::Expr(_))
}
