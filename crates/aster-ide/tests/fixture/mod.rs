//! Shared test host: a scriptable type checker and member lookup driving
//! the analysis over hand-built source units.
#![allow(dead_code)]

use aster_ast::NodeIndex;
use aster_common::{DeclId, TypeId};
use aster_sema::{
    LookupService, MemberName, ResolvedExpr, ScopeId, SourceUnit, TypecheckService, WellKnownTypes,
};
use rustc_hash::FxHashMap;

/// One request the analysis made of the type checker, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckEvent {
    FunctionBody { decl: DeclId, loc: u32 },
    TopLevelUnit { scope: ScopeId },
    Decl { decl: DeclId },
    PatternBindingEntry { binding: NodeIndex, entry: usize },
}

/// Scriptable `TypecheckService`: answers `type_of_expr` from a prepared
/// table and records every checking request it receives.
pub struct HostTypechecker {
    pub events: Vec<CheckEvent>,
    pub expr_types: FxHashMap<NodeIndex, ResolvedExpr>,
    pub well_known: WellKnownTypes,
}

impl HostTypechecker {
    pub fn new(well_known: WellKnownTypes) -> HostTypechecker {
        HostTypechecker {
            events: Vec::new(),
            expr_types: FxHashMap::default(),
            well_known,
        }
    }

    pub fn with_expr_type(
        mut self,
        expr: NodeIndex,
        ty: TypeId,
        referenced_decl: Option<DeclId>,
    ) -> HostTypechecker {
        self.expr_types.insert(
            expr,
            ResolvedExpr {
                ty,
                referenced_decl,
            },
        );
        self
    }
}

impl TypecheckService for HostTypechecker {
    fn check_function_body_until(&mut self, _unit: &mut SourceUnit, decl: DeclId, loc: u32) {
        self.events.push(CheckEvent::FunctionBody { decl, loc });
    }

    fn check_top_level_unit(&mut self, _unit: &mut SourceUnit, scope: ScopeId) {
        self.events.push(CheckEvent::TopLevelUnit { scope });
    }

    fn check_decl_for_completion(&mut self, _unit: &mut SourceUnit, decl: DeclId) {
        self.events.push(CheckEvent::Decl { decl });
    }

    fn check_pattern_binding_entry(&mut self, unit: &mut SourceUnit, binding: NodeIndex, entry: usize) {
        self.events.push(CheckEvent::PatternBindingEntry { binding, entry });
        unit.arena.set_initializer_checked(binding, entry);
    }

    fn type_of_expr(
        &mut self,
        _unit: &mut SourceUnit,
        _scope: ScopeId,
        expr: NodeIndex,
    ) -> Option<ResolvedExpr> {
        self.expr_types.get(&expr).copied()
    }

    fn well_known_types(&self) -> WellKnownTypes {
        self.well_known
    }
}

/// Table-driven qualified lookup.
#[derive(Default)]
pub struct HostLookup {
    members: FxHashMap<(TypeId, MemberName), Vec<DeclId>>,
}

impl HostLookup {
    pub fn new() -> HostLookup {
        HostLookup::default()
    }

    pub fn add_member(&mut self, base: TypeId, name: MemberName, decl: DeclId) {
        self.members.entry((base, name)).or_default().push(decl);
    }
}

impl LookupService for HostLookup {
    fn lookup_qualified(
        &self,
        _unit: &SourceUnit,
        _scope: ScopeId,
        base: TypeId,
        name: MemberName,
    ) -> Vec<DeclId> {
        self.members.get(&(base, name)).cloned().unwrap_or_default()
    }
}

/// Well-known types interned into a unit's type table.
pub fn well_known(unit: &mut SourceUnit) -> WellKnownTypes {
    let bool_name = unit.names.intern("Bool");
    let sequence_name = unit.names.intern("Sequence");
    WellKnownTypes {
        bool_ty: unit.types.nominal(bool_name),
        sequence_ty: unit.types.nominal(sequence_name),
    }
}
