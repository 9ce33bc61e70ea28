use aster_ast::{NodeArena, ShuffleSlot, TupleElement};
use aster_common::Span;
use aster_sema::SourceUnit;
use aster_ide::{position_in_args, translate_arg_index_to_param_index, ArgumentPosition};

fn labeled(arena: &mut NodeArena, unit_names: &mut aster_common::Interner, label: &str, span: Span) -> TupleElement {
    let expr = arena.add_leaf(span);
    TupleElement {
        expr,
        label: Some(unit_names.intern(label)),
        label_span: Some(Span::new(span.start.saturating_sub(2), span.start)),
    }
}

fn unlabeled(arena: &mut NodeArena, span: Span) -> TupleElement {
    let expr = arena.add_leaf(span);
    TupleElement {
        expr,
        label: None,
        label_span: None,
    }
}

#[test]
fn paren_argument_is_position_zero_without_label() {
    let mut unit = SourceUnit::new();
    let hole = unit.arena.add_leaf(Span::new(4, 4));
    let args = unit.arena.add_paren(Span::new(3, 5), hole);

    assert_eq!(
        position_in_args(&unit.arena, args, hole),
        Some(ArgumentPosition {
            index: 0,
            has_label: false
        })
    );
}

#[test]
fn tuple_position_reports_the_written_label() {
    let mut unit = SourceUnit::new();
    let first = unlabeled(&mut unit.arena, Span::new(2, 4));
    let second = labeled(&mut unit.arena, &mut unit.names, "with", Span::new(10, 13));
    let target = second.expr;
    let args = unit.arena.add_tuple(Span::new(1, 14), vec![first, second]);

    assert_eq!(
        position_in_args(&unit.arena, args, target),
        Some(ArgumentPosition {
            index: 1,
            has_label: true
        })
    );
}

#[test]
fn hole_between_arguments_maps_to_the_following_one() {
    let mut unit = SourceUnit::new();
    let first = unlabeled(&mut unit.arena, Span::new(2, 4));
    let second = unlabeled(&mut unit.arena, Span::new(10, 13));
    // The hole sits after the first argument but before the second.
    let hole = unit.arena.add_leaf(Span::new(7, 7));
    let args = unit.arena.add_tuple(Span::new(1, 14), vec![first, second]);

    assert_eq!(
        position_in_args(&unit.arena, args, hole),
        Some(ArgumentPosition {
            index: 1,
            has_label: false
        })
    );
}

#[test]
fn hole_past_the_last_argument_has_no_position() {
    let mut unit = SourceUnit::new();
    let only = unlabeled(&mut unit.arena, Span::new(2, 4));
    let hole = unit.arena.add_leaf(Span::new(9, 9));
    let args = unit.arena.add_tuple(Span::new(1, 10), vec![only]);

    assert_eq!(position_in_args(&unit.arena, args, hole), None);
}

#[test]
fn shuffle_is_transparent_for_positioning() {
    let mut unit = SourceUnit::new();
    let first = unlabeled(&mut unit.arena, Span::new(2, 4));
    let target = first.expr;
    let tuple = unit.arena.add_tuple(Span::new(1, 5), vec![first]);
    let shuffle = unit
        .arena
        .add_shuffle(Span::new(1, 5), tuple, vec![ShuffleSlot::Written(0)], vec![]);

    assert_eq!(
        position_in_args(&unit.arena, shuffle, target),
        Some(ArgumentPosition {
            index: 0,
            has_label: false
        })
    );
}

#[test]
fn non_shuffle_translation_is_the_identity() {
    let mut unit = SourceUnit::new();
    let first = unlabeled(&mut unit.arena, Span::new(2, 4));
    let args = unit.arena.add_tuple(Span::new(1, 5), vec![first]);

    let mut position = ArgumentPosition {
        index: 0,
        has_label: true,
    };
    assert!(translate_arg_index_to_param_index(&unit.arena, args, &mut position));
    assert_eq!(
        position,
        ArgumentPosition {
            index: 0,
            has_label: true
        }
    );
}

#[test]
fn shuffle_translates_written_order_to_parameter_order() {
    let mut unit = SourceUnit::new();
    let a = unlabeled(&mut unit.arena, Span::new(2, 4));
    let b = unlabeled(&mut unit.arena, Span::new(6, 8));
    let tuple = unit.arena.add_tuple(Span::new(1, 9), vec![a, b]);
    // Arguments were written swapped relative to the parameters.
    let shuffle = unit.arena.add_shuffle(
        Span::new(1, 9),
        tuple,
        vec![ShuffleSlot::Written(1), ShuffleSlot::Written(0)],
        vec![],
    );

    let mut position = ArgumentPosition {
        index: 0,
        has_label: false,
    };
    assert!(translate_arg_index_to_param_index(&unit.arena, shuffle, &mut position));
    assert_eq!(position.index, 1);
}

#[test]
fn variadic_run_collapses_to_one_parameter() {
    let mut unit = SourceUnit::new();
    let head = unlabeled(&mut unit.arena, Span::new(2, 4));
    let v1 = unlabeled(&mut unit.arena, Span::new(6, 8));
    let v2 = unlabeled(&mut unit.arena, Span::new(10, 12));
    let tuple = unit.arena.add_tuple(Span::new(1, 13), vec![head, v1, v2]);
    let shuffle = unit.arena.add_shuffle(
        Span::new(1, 13),
        tuple,
        vec![ShuffleSlot::Written(0), ShuffleSlot::VariadicRun],
        vec![1, 2],
    );

    for written in [1usize, 2] {
        let mut position = ArgumentPosition {
            index: written,
            has_label: written == 1,
        };
        assert!(translate_arg_index_to_param_index(&unit.arena, shuffle, &mut position));
        assert_eq!(position.index, 1);
        assert!(!position.has_label);
    }
}

#[test]
fn variadic_run_takes_the_label_of_its_first_element() {
    let mut unit = SourceUnit::new();
    let v1 = labeled(&mut unit.arena, &mut unit.names, "items", Span::new(8, 10));
    let v2 = unlabeled(&mut unit.arena, Span::new(12, 14));
    let tuple = unit.arena.add_tuple(Span::new(1, 15), vec![v1, v2]);
    let shuffle = unit.arena.add_shuffle(
        Span::new(1, 15),
        tuple,
        vec![ShuffleSlot::VariadicRun],
        vec![0, 1],
    );

    let mut position = ArgumentPosition {
        index: 1,
        has_label: false,
    };
    assert!(translate_arg_index_to_param_index(&unit.arena, shuffle, &mut position));
    assert_eq!(position.index, 0);
    assert!(position.has_label);
}

#[test]
fn argument_without_a_parameter_fails_translation() {
    let mut unit = SourceUnit::new();
    let a = unlabeled(&mut unit.arena, Span::new(2, 4));
    let b = unlabeled(&mut unit.arena, Span::new(6, 8));
    let tuple = unit.arena.add_tuple(Span::new(1, 9), vec![a, b]);
    // Only the second written argument landed in a parameter slot.
    let shuffle = unit.arena.add_shuffle(
        Span::new(1, 9),
        tuple,
        vec![ShuffleSlot::Defaulted, ShuffleSlot::Written(1)],
        vec![],
    );

    let mut position = ArgumentPosition {
        index: 0,
        has_label: false,
    };
    assert!(!translate_arg_index_to_param_index(&unit.arena, shuffle, &mut position));
}
