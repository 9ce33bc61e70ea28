mod fixture;

use aster_ast::{NodeIndex, PatternBindingEntry};
use aster_common::Span;
use aster_sema::{Decl, DeclKind, ScopeKind, SourceUnit};
use aster_ide::typecheck_context_until;
use fixture::{well_known, CheckEvent, HostTypechecker};

#[test]
fn top_level_scope_is_checked_as_a_whole() {
    let mut unit = SourceUnit::new();
    let wk = well_known(&mut unit);
    let body = unit.arena.add_block(Span::new(0, 10), vec![]);
    let module = unit.scopes.add_module(NodeIndex::NONE);
    let top = unit.scopes.add_child(module, ScopeKind::TopLevel { body });
    let mut typeck = HostTypechecker::new(wk);

    typecheck_context_until(&mut unit, &mut typeck, top, 5);

    assert_eq!(typeck.events, vec![CheckEvent::TopLevelUnit { scope: top }]);
}

#[test]
fn function_scope_checks_its_body_up_to_the_location() {
    let mut unit = SourceUnit::new();
    let wk = well_known(&mut unit);
    let f = unit.decls.add(Decl::new(unit.names.intern("f"), DeclKind::Func));
    let body = unit.arena.add_block(Span::new(0, 20), vec![]);
    let module = unit.scopes.add_module(NodeIndex::NONE);
    let scope = unit.scopes.add_child(module, ScopeKind::Function { decl: f, body });
    let mut typeck = HostTypechecker::new(wk);

    typecheck_context_until(&mut unit, &mut typeck, scope, 14);

    assert_eq!(typeck.events, vec![CheckEvent::FunctionBody { decl: f, loc: 14 }]);
}

#[test]
fn enclosing_scopes_are_checked_outermost_first() {
    let mut unit = SourceUnit::new();
    let wk = well_known(&mut unit);
    let ty = unit.decls.add(Decl::new(unit.names.intern("S"), DeclKind::Type));
    let m = unit.decls.add(Decl::new(unit.names.intern("m"), DeclKind::Func));
    let type_body = unit.arena.add_block(Span::new(0, 40), vec![]);
    let fn_body = unit.arena.add_block(Span::new(10, 30), vec![]);
    let module = unit.scopes.add_module(NodeIndex::NONE);
    let type_scope = unit
        .scopes
        .add_child(module, ScopeKind::TypeDecl { decl: ty, body: type_body });
    let fn_scope = unit
        .scopes
        .add_child(type_scope, ScopeKind::Function { decl: m, body: fn_body });
    let mut typeck = HostTypechecker::new(wk);

    typecheck_context_until(&mut unit, &mut typeck, fn_scope, 22);

    assert_eq!(
        typeck.events,
        vec![
            CheckEvent::Decl { decl: ty },
            CheckEvent::FunctionBody { decl: m, loc: 22 },
        ]
    );
}

#[test]
fn closure_scopes_defer_to_the_enclosing_function() {
    let mut unit = SourceUnit::new();
    let wk = well_known(&mut unit);
    let f = unit.decls.add(Decl::new(unit.names.intern("f"), DeclKind::Func));
    let fn_body = unit.arena.add_block(Span::new(0, 30), vec![]);
    let closure_body = unit.arena.add_block(Span::new(10, 20), vec![]);
    let closure = unit.arena.add_closure(Span::new(8, 21), closure_body, NodeIndex::NONE);
    let module = unit.scopes.add_module(NodeIndex::NONE);
    let fn_scope = unit
        .scopes
        .add_child(module, ScopeKind::Function { decl: f, body: fn_body });
    let closure_scope = unit
        .scopes
        .add_child(fn_scope, ScopeKind::Closure { expr: closure });
    let mut typeck = HostTypechecker::new(wk);

    typecheck_context_until(&mut unit, &mut typeck, closure_scope, 15);

    assert_eq!(typeck.events, vec![CheckEvent::FunctionBody { decl: f, loc: 15 }]);
}

#[test]
fn closure_inside_a_top_level_unit_checks_the_whole_unit() {
    let mut unit = SourceUnit::new();
    let wk = well_known(&mut unit);
    let top_body = unit.arena.add_block(Span::new(0, 30), vec![]);
    let closure_body = unit.arena.add_block(Span::new(10, 20), vec![]);
    let closure = unit.arena.add_closure(Span::new(8, 21), closure_body, NodeIndex::NONE);
    let module = unit.scopes.add_module(NodeIndex::NONE);
    let top = unit.scopes.add_child(module, ScopeKind::TopLevel { body: top_body });
    let closure_scope = unit
        .scopes
        .add_child(top, ScopeKind::Closure { expr: closure });
    let mut typeck = HostTypechecker::new(wk);

    typecheck_context_until(&mut unit, &mut typeck, closure_scope, 15);

    assert_eq!(typeck.events, vec![CheckEvent::TopLevelUnit { scope: top }]);
}

#[test]
fn accessor_scope_checks_its_storage_first() {
    let mut unit = SourceUnit::new();
    let wk = well_known(&mut unit);
    let storage = unit.decls.add(Decl::new(unit.names.intern("x"), DeclKind::Var));
    let getter = unit.decls.add(Decl::new(unit.names.intern("get"), DeclKind::Func));
    let body = unit.arena.add_block(Span::new(0, 10), vec![]);
    let module = unit.scopes.add_module(NodeIndex::NONE);
    let scope = unit.scopes.add_child(
        module,
        ScopeKind::Accessor {
            decl: getter,
            storage,
            body,
        },
    );
    let mut typeck = HostTypechecker::new(wk);

    typecheck_context_until(&mut unit, &mut typeck, scope, 4);

    assert_eq!(
        typeck.events,
        vec![
            CheckEvent::Decl { decl: storage },
            CheckEvent::FunctionBody { decl: getter, loc: 4 },
        ]
    );
}

#[test]
fn initializer_scope_checks_bound_variables_then_the_entry() {
    let mut unit = SourceUnit::new();
    let wk = well_known(&mut unit);
    let a = unit.decls.add(Decl::new(unit.names.intern("a"), DeclKind::Var));
    let b = unit.decls.add(Decl::new(unit.names.intern("b"), DeclKind::Var));
    let pa = unit.arena.add_named_pattern(Span::new(4, 5), a);
    let pb = unit.arena.add_named_pattern(Span::new(7, 8), b);
    let pattern = unit.arena.add_tuple_pattern(Span::new(3, 9), vec![pa, pb]);
    let init = unit.arena.add_leaf(Span::new(12, 18));
    let binding = unit.arena.add_pattern_binding(
        Span::new(0, 18),
        vec![PatternBindingEntry {
            pattern,
            initializer: init,
            initializer_checked: false,
        }],
    );
    let module = unit.scopes.add_module(NodeIndex::NONE);
    let scope = unit
        .scopes
        .add_child(module, ScopeKind::Initializer { binding, entry: 0 });
    let mut typeck = HostTypechecker::new(wk);

    typecheck_context_until(&mut unit, &mut typeck, scope, 15);

    assert_eq!(
        typeck.events,
        vec![
            CheckEvent::Decl { decl: a },
            CheckEvent::Decl { decl: b },
            CheckEvent::PatternBindingEntry { binding, entry: 0 },
        ]
    );

    // An already-checked entry is not checked again.
    typeck.events.clear();
    typecheck_context_until(&mut unit, &mut typeck, scope, 15);
    assert_eq!(
        typeck.events,
        vec![CheckEvent::Decl { decl: a }, CheckEvent::Decl { decl: b }]
    );
}

#[test]
fn initializer_without_an_expression_does_nothing() {
    let mut unit = SourceUnit::new();
    let wk = well_known(&mut unit);
    let a = unit.decls.add(Decl::new(unit.names.intern("a"), DeclKind::Var));
    let pattern = unit.arena.add_named_pattern(Span::new(4, 5), a);
    let binding = unit.arena.add_pattern_binding(
        Span::new(0, 5),
        vec![PatternBindingEntry {
            pattern,
            initializer: NodeIndex::NONE,
            initializer_checked: false,
        }],
    );
    let module = unit.scopes.add_module(NodeIndex::NONE);
    let scope = unit
        .scopes
        .add_child(module, ScopeKind::Initializer { binding, entry: 0 });
    let mut typeck = HostTypechecker::new(wk);

    typecheck_context_until(&mut unit, &mut typeck, scope, 3);

    assert!(typeck.events.is_empty());
}
