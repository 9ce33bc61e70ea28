//! Child enumeration and small tree-walking helpers.
//!
//! `children` is the single place that knows the child layout of every node
//! kind; the locator, the retypecheck reset, and the ancestor walker all
//! traverse through it so their notions of "the tree" cannot drift apart.

use aster_common::DeclId;
use smallvec::SmallVec;

use crate::arena::NodeArena;
use crate::node::{ConditionElement, DeclData, ExprData, NodeData, NodeIndex, PatData, StmtData};

/// The children of a node, in source order. Absent children are omitted.
pub fn children(arena: &NodeArena, index: NodeIndex) -> SmallVec<[NodeIndex; 8]> {
    let mut out = SmallVec::new();
    let mut add = |child: NodeIndex| {
        if !child.is_none() {
            out.push(child);
        }
    };

    match &arena.node(index).data {
        NodeData::Expr(expr) => match expr {
            ExprData::Leaf
            | ExprData::NameRef { .. }
            | ExprData::OverloadSetRef { .. }
            | ExprData::TypeRef => {}
            ExprData::UnresolvedMember { base, .. } => add(*base),
            ExprData::Call { callee, args }
            | ExprData::Binary { callee, args }
            | ExprData::Unary { callee, args } => {
                add(*callee);
                add(*args);
            }
            ExprData::Subscript { base, args, .. } => {
                add(*base);
                add(*args);
            }
            ExprData::Assign { dest, source, .. } => {
                add(*dest);
                add(*source);
            }
            ExprData::Paren { sub }
            | ExprData::ImplicitConversion { sub }
            | ExprData::ConstructorRef { sub } => add(*sub),
            ExprData::AutoClosure { body } => add(*body),
            ExprData::Tuple { elements } => {
                for element in elements {
                    add(element.expr);
                }
            }
            ExprData::Shuffle { sub, .. } => add(*sub),
            ExprData::Closure {
                body,
                result_annotation,
            } => {
                add(*result_annotation);
                add(*body);
            }
        },
        NodeData::Stmt(stmt) => match stmt {
            StmtData::Block { elements } => {
                for &element in elements {
                    add(element);
                }
            }
            StmtData::Return { value } => add(*value),
            StmtData::ForEach {
                pattern,
                sequence,
                body,
            } => {
                add(*pattern);
                add(*sequence);
                add(*body);
            }
            StmtData::RepeatWhile { condition, body } => {
                // Written order is `repeat { body } while condition`.
                add(*body);
                add(*condition);
            }
            StmtData::If {
                conditions,
                then_body,
                else_body,
            } => {
                add_conditions(conditions, &mut add);
                add(*then_body);
                add(*else_body);
            }
            StmtData::While { conditions, body } | StmtData::Guard { conditions, body } => {
                add_conditions(conditions, &mut add);
                add(*body);
            }
        },
        NodeData::Decl(decl) => match decl {
            DeclData::PatternBinding { entries } => {
                for entry in entries {
                    add(entry.pattern);
                    add(entry.initializer);
                }
            }
            DeclData::Function { body, .. } => add(*body),
        },
        NodeData::Pat(pat) => match pat {
            PatData::Named { .. } => {}
            PatData::Tuple { elements } => {
                for &element in elements {
                    add(element);
                }
            }
            PatData::Typed { sub, annotation } => {
                add(*sub);
                add(*annotation);
            }
            PatData::Expr { sub, .. } => add(*sub),
        },
    }

    out
}

fn add_conditions(conditions: &[ConditionElement], add: &mut impl FnMut(NodeIndex)) {
    for condition in conditions {
        match condition {
            ConditionElement::Boolean(expr) => add(*expr),
            ConditionElement::PatternMatch {
                pattern,
                initializer,
            } => {
                add(*pattern);
                add(*initializer);
            }
        }
    }
}

/// Invoke `f` for every variable bound by a pattern, in source order.
pub fn for_each_bound_variable(
    arena: &NodeArena,
    pattern: NodeIndex,
    f: &mut impl FnMut(DeclId),
) {
    if pattern.is_none() {
        return;
    }
    match &arena.node(pattern).data {
        NodeData::Pat(PatData::Named { decl }) => f(*decl),
        NodeData::Pat(PatData::Tuple { elements }) => {
            for &element in elements {
                for_each_bound_variable(arena, element, f);
            }
        }
        NodeData::Pat(PatData::Typed { sub, .. }) => for_each_bound_variable(arena, *sub, f),
        NodeData::Pat(PatData::Expr { .. }) => {}
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aster_common::Span;

    #[test]
    fn closure_yields_annotation_before_body() {
        let mut arena = NodeArena::new();
        let annotation = arena.add_type_ref(Span::new(5, 8), None);
        let body = arena.add_block(Span::new(9, 12), vec![]);
        let closure = arena.add_closure(Span::new(0, 13), body, annotation);
        assert_eq!(children(&arena, closure).as_slice(), &[annotation, body]);
    }

    #[test]
    fn bound_variables_walk_through_typed_and_tuple_patterns() {
        let mut arena = NodeArena::new();
        let a = arena.add_named_pattern(Span::new(0, 1), DeclId(7));
        let b = arena.add_named_pattern(Span::new(3, 4), DeclId(9));
        let tuple = arena.add_tuple_pattern(Span::new(0, 5), vec![a, b]);
        let annotation = arena.add_type_ref(Span::new(7, 10), None);
        let typed = arena.add_typed_pattern(Span::new(0, 10), tuple, annotation);

        let mut vars = Vec::new();
        for_each_bound_variable(&arena, typed, &mut |decl| vars.push(decl));
        assert_eq!(vars, vec![DeclId(7), DeclId(9)]);
    }
}
