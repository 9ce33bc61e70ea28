//! Candidate callee collection for apply and subscript expressions.
//!
//! Resolution prefers already-computed information and degrades gracefully:
//! a stamped function type wins, then an unambiguous declaration reference,
//! then the overload set, then qualified member lookup, and finally a
//! best-effort typing of the callee expression. Candidates whose types
//! cannot be derived are dropped silently; an empty result just means the
//! analyzer has no signatures to offer.

use aster_ast::{ExprData, NodeData, NodeIndex};
use aster_common::{DeclId, TypeId};
use aster_sema::{DeclKind, MemberName};
use serde::Serialize;
use smallvec::SmallVec;

use crate::env::AnalysisEnv;

/// One possible callable signature for an apply, with the declaration it
/// came from when one is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateCallee {
    pub ty: TypeId,
    pub decl: Option<DeclId>,
}

/// Collect possible callee signatures for a call, binary, or unary apply.
/// Returns `false` when no candidate could be found.
pub fn collect_callees_for_call(
    env: &mut AnalysisEnv,
    apply: NodeIndex,
    out: &mut SmallVec<[CandidateCallee; 2]>,
) -> bool {
    let fn_expr = match &env.unit.arena.node(apply).data {
        NodeData::Expr(
            ExprData::Call { callee, .. }
            | ExprData::Binary { callee, .. }
            | ExprData::Unary { callee, .. },
        ) => *callee,
        _ => return false,
    };

    if let Some(ty) = env.unit.arena.type_of(fn_expr) {
        if env.unit.types.as_function(ty).is_some() {
            out.push(CandidateCallee {
                ty,
                decl: referenced_decl(env, fn_expr),
            });
        }
    } else {
        match &env.unit.arena.node(fn_expr).data {
            NodeData::Expr(ExprData::NameRef { decl }) => {
                push_decl_candidate(env, *decl, out);
            }
            NodeData::Expr(ExprData::OverloadSetRef { decls }) => {
                let decls = decls.clone();
                for decl in decls {
                    push_decl_candidate(env, decl, out);
                }
            }
            NodeData::Expr(ExprData::UnresolvedMember { base, name }) => {
                let (base, name) = (*base, *name);
                collect_callees_by_lookup_on_expr(env, base, MemberName::Named(name), out);
            }
            _ => {}
        }
    }

    if out.is_empty()
        && let Some(resolved) = env.typeck.type_of_expr(env.unit, env.scope, fn_expr)
    {
        if env.unit.types.as_function(resolved.ty).is_some() {
            out.push(CandidateCallee {
                ty: resolved.ty,
                decl: resolved.referenced_decl,
            });
        } else if env.unit.types.is_metatype(resolved.ty) {
            // Calling a type applies one of its constructors.
            let instance = env.unit.types.metatype_instance(resolved.ty);
            if env.unit.types.may_have_members(instance) {
                collect_callees_by_lookup_on_type(
                    env,
                    resolved.ty,
                    MemberName::Constructor,
                    out,
                );
            }
        }
    }

    tracing::trace!(apply = apply.0, candidates = out.len(), "collected callees");
    !out.is_empty()
}

/// Collect possible callee signatures for a subscript expression.
pub fn collect_callees_for_subscript(
    env: &mut AnalysisEnv,
    subscript: NodeIndex,
    out: &mut SmallVec<[CandidateCallee; 2]>,
) -> bool {
    let NodeData::Expr(ExprData::Subscript { base, decl, .. }) =
        &env.unit.arena.node(subscript).data
    else {
        return false;
    };
    let (base, decl) = (*base, *decl);

    if let Some(decl) = decl {
        if env.unit.decls.get(decl).kind == DeclKind::Subscript
            && let Some(ty) = env.unit.decls.applied_interface_type(&env.unit.types, decl)
            && env.unit.types.as_function(ty).is_some()
        {
            out.push(CandidateCallee {
                ty,
                decl: Some(decl),
            });
        }
    } else {
        collect_callees_by_lookup_on_expr(env, base, MemberName::Subscript, out);
    }
    !out.is_empty()
}

/// Qualified lookup of callable members named `name` on the type of
/// `base_expr`.
fn collect_callees_by_lookup_on_expr(
    env: &mut AnalysisEnv,
    base_expr: NodeIndex,
    name: MemberName,
    out: &mut SmallVec<[CandidateCallee; 2]>,
) {
    let Some(resolved) = env.typeck.type_of_expr(env.unit, env.scope, base_expr) else {
        return;
    };
    let base = env.unit.types.rvalue(resolved.ty);
    let instance = env.unit.types.metatype_instance(base);
    if !env.unit.types.may_have_members(instance) {
        return;
    }
    collect_callees_by_lookup_on_type(env, base, name, out);
}

/// Qualified lookup of callable members named `name` on `base`. A metatype
/// base looks up on its instance type; whether the base was a metatype
/// still decides how member signatures are uncurried.
fn collect_callees_by_lookup_on_type(
    env: &mut AnalysisEnv,
    base: TypeId,
    name: MemberName,
    out: &mut SmallVec<[CandidateCallee; 2]>,
) {
    let instance = env.unit.types.metatype_instance(base);
    let decls = env.lookup.lookup_qualified(env.unit, env.scope, instance, name);

    for decl in decls {
        let (kind, hidden) = {
            let d = env.unit.decls.get(decl);
            (d.kind, d.hidden_from_editor)
        };
        if !kind.is_callable() || hidden {
            continue;
        }
        if !env.typeck.is_member_applicable(env.unit, instance, decl) {
            continue;
        }
        env.typeck.resolve_decl_signature(env.unit, decl);

        let d = env.unit.decls.get(decl);
        let Some(mut declared) = d.interface_ty else {
            continue;
        };
        if d.in_type_context {
            match kind {
                // An instance member applied to a value has its self level
                // already consumed.
                DeclKind::Func | DeclKind::Subscript if !env.unit.types.is_metatype(base) => {
                    let Some((_, inner)) = env.unit.types.as_function(declared) else {
                        continue;
                    };
                    declared = inner;
                }
                // Constructors only apply through a metatype base.
                DeclKind::Constructor => {
                    if !env.unit.types.is_metatype(base) {
                        continue;
                    }
                    let Some((_, inner)) = env.unit.types.as_function(declared) else {
                        continue;
                    };
                    declared = inner;
                }
                _ => {}
            }
        }

        let Some(fn_ty) = env.typeck.type_of_member(env.unit, instance, decl, declared) else {
            continue;
        };
        if env.unit.types.as_function(fn_ty).is_some() {
            out.push(CandidateCallee {
                ty: fn_ty,
                decl: Some(decl),
            });
        }
    }
}

fn push_decl_candidate(
    env: &AnalysisEnv,
    decl: DeclId,
    out: &mut SmallVec<[CandidateCallee; 2]>,
) {
    if let Some(ty) = env.unit.decls.get(decl).interface_ty
        && env.unit.types.as_function(ty).is_some()
    {
        out.push(CandidateCallee {
            ty,
            decl: Some(decl),
        });
    }
}

fn referenced_decl(env: &AnalysisEnv, expr: NodeIndex) -> Option<DeclId> {
    match &env.unit.arena.node(expr).data {
        NodeData::Expr(ExprData::NameRef { decl }) => Some(*decl),
        _ => None,
    }
}
