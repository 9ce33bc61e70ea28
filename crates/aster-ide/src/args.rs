//! Argument position mapping between written and declared order.

use aster_ast::{ExprData, NodeArena, NodeData, NodeIndex, ShuffleSlot};

/// Where the hole sits in a written argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentPosition {
    pub index: usize,
    /// Whether the argument at this position carries a written label.
    pub has_label: bool,
}

/// Find the written argument position containing `target`.
///
/// `args` is the argument node of an apply expression: a paren, a tuple, or
/// a shuffle wrapping either. The position returned is in written order; an
/// argument strictly before the target does not count, so a hole between
/// two arguments maps to the following one.
pub fn position_in_args(
    arena: &NodeArena,
    args: NodeIndex,
    target: NodeIndex,
) -> Option<ArgumentPosition> {
    let mut args = args;
    if let NodeData::Expr(ExprData::Shuffle { sub, .. }) = &arena.node(args).data {
        args = *sub;
    }

    match &arena.node(args).data {
        NodeData::Expr(ExprData::Paren { .. }) => Some(ArgumentPosition {
            index: 0,
            has_label: false,
        }),
        NodeData::Expr(ExprData::Tuple { elements }) => {
            let target_start = arena.node(target).span.start;
            for (index, element) in elements.iter().enumerate() {
                if arena.node(element.expr).span.ends_before(target_start) {
                    continue;
                }
                return Some(ArgumentPosition {
                    index,
                    has_label: element.label_span.is_some(),
                });
            }
            None
        }
        _ => None,
    }
}

/// Translate a written-order argument position into declared parameter
/// order through an argument shuffle.
///
/// Returns `false` when the written argument has no parameter counterpart
/// (it was dropped during matching). When the argument falls into a
/// variadic run, the position collapses to the run's parameter and the
/// label comes from the run's first written element, since that is the
/// only place the run's label can be written.
pub fn translate_arg_index_to_param_index(
    arena: &NodeArena,
    args: NodeIndex,
    position: &mut ArgumentPosition,
) -> bool {
    let NodeData::Expr(ExprData::Shuffle {
        sub,
        mapping,
        variadic_args,
    }) = &arena.node(args).data
    else {
        return true;
    };

    for (param_index, slot) in mapping.iter().enumerate() {
        match *slot {
            ShuffleSlot::Written(written) => {
                if written as usize == position.index {
                    position.index = param_index;
                    return true;
                }
            }
            ShuffleSlot::VariadicRun => {
                if variadic_args
                    .iter()
                    .any(|&written| written as usize == position.index)
                {
                    position.index = param_index;
                    position.has_label = variadic_first_is_labeled(arena, *sub, variadic_args);
                    return true;
                }
            }
            ShuffleSlot::Defaulted => {}
        }
    }
    false
}

fn variadic_first_is_labeled(arena: &NodeArena, sub: NodeIndex, variadic_args: &[u32]) -> bool {
    let Some(&first) = variadic_args.first() else {
        return false;
    };
    if let NodeData::Expr(ExprData::Tuple { elements }) = &arena.node(sub).data
        && let Some(element) = elements.get(first as usize)
    {
        return element.label_span.is_some();
    }
    false
}
