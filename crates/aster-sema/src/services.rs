//! Collaborator interfaces: the type checker and qualified name lookup.
//!
//! The context analysis drives these services but never implements them;
//! the host compiler session supplies both. Every method is best-effort:
//! a service that cannot answer returns `None` (or does nothing) and the
//! analysis degrades instead of failing.

use aster_ast::NodeIndex;
use aster_common::{Atom, DeclId, TypeId};

use crate::scope::ScopeId;
use crate::unit::SourceUnit;

/// A member name used for qualified lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberName {
    Named(Atom),
    /// The constructor entry point of a type.
    Constructor,
    /// The subscript operation of a type.
    Subscript,
}

/// Standard-library types the analysis needs by role, injected by the host
/// so the core stays decoupled from any particular library layout.
#[derive(Debug, Clone, Copy)]
pub struct WellKnownTypes {
    /// The boolean type expected by control-flow conditions.
    pub bool_ty: TypeId,
    /// The sequence-like protocol expected by for-each iteration.
    pub sequence_ty: TypeId,
}

/// Result of best-effort expression typing.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedExpr {
    pub ty: TypeId,
    /// The declaration the expression refers to, when typing resolved one.
    pub referenced_decl: Option<DeclId>,
}

/// Type-checking operations the analysis depends on.
///
/// The default implementations of the substitution hooks are identity
/// functions, which is correct for hosts without generics.
pub trait TypecheckService {
    /// Type-check a function body far enough to cover the given location.
    fn check_function_body_until(&mut self, unit: &mut SourceUnit, decl: DeclId, loc: u32);

    /// Type-check a whole top-level code unit.
    fn check_top_level_unit(&mut self, unit: &mut SourceUnit, scope: ScopeId);

    /// Type-check a declaration just enough for completion purposes.
    fn check_decl_for_completion(&mut self, unit: &mut SourceUnit, decl: DeclId);

    /// Type-check one entry of a pattern-binding declaration.
    fn check_pattern_binding_entry(&mut self, unit: &mut SourceUnit, binding: NodeIndex, entry: usize);

    /// Best-effort type of an arbitrary expression in a scope. May stamp
    /// types onto the tree as a side effect. `None` when no type can be
    /// derived; never an error.
    fn type_of_expr(
        &mut self,
        unit: &mut SourceUnit,
        scope: ScopeId,
        expr: NodeIndex,
    ) -> Option<ResolvedExpr>;

    /// Resolve a declaration's signature if it has not been resolved yet.
    fn resolve_decl_signature(&mut self, _unit: &mut SourceUnit, _decl: DeclId) {}

    /// Whether a member declaration is applicable to the given base type
    /// (availability, constraints, access control).
    fn is_member_applicable(&self, _unit: &SourceUnit, _base: TypeId, _decl: DeclId) -> bool {
        true
    }

    /// Instantiate a member's declared type as a member of `base`
    /// (substituting the base's generic arguments). `None` drops the
    /// candidate silently.
    fn type_of_member(
        &self,
        _unit: &mut SourceUnit,
        _base: TypeId,
        _decl: DeclId,
        declared: TypeId,
    ) -> Option<TypeId> {
        Some(declared)
    }

    /// Map an interface type into the generic context of a declaration.
    fn map_into_decl_context(&self, _unit: &mut SourceUnit, _decl: DeclId, ty: TypeId) -> TypeId {
        ty
    }

    /// Map an interface type into the generic context of a scope.
    fn map_into_scope_context(&self, _unit: &mut SourceUnit, _scope: ScopeId, ty: TypeId) -> TypeId {
        ty
    }

    fn well_known_types(&self) -> WellKnownTypes;
}

/// Qualified name lookup on a base type.
pub trait LookupService {
    /// All declarations named `name` visible as members of `base` from
    /// `scope`, excluding nothing but what name lookup itself hides;
    /// callable filtering is the caller's concern.
    fn lookup_qualified(
        &self,
        unit: &SourceUnit,
        scope: ScopeId,
        base: TypeId,
        name: MemberName,
    ) -> Vec<DeclId>;
}
