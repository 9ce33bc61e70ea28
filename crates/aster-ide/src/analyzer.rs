//! Expected-context inference from the hole's closest interesting ancestor.

use aster_ast::{ConditionElement, DeclData, ExprData, NodeData, NodeIndex, PatData, StmtData};
use aster_common::{Atom, DeclId, TypeId};
use aster_sema::{LookupService, ScopeId, ScopeKind, SourceUnit, TypecheckService};
use rustc_hash::FxHashSet;
use serde::Serialize;
use smallvec::SmallVec;

use crate::ancestors::find_interesting_ancestors;
use crate::callee::{collect_callees_for_call, collect_callees_for_subscript, CandidateCallee};
use crate::env::AnalysisEnv;
use crate::{position_in_args, translate_arg_index_to_param_index};

/// What the program around the hole expects of it.
///
/// All fields are best-effort and possibly empty. `possible_types` and
/// `possible_labels` are mutually exclusive per candidate parameter: a
/// position that still needs its argument label contributes the label, not
/// the type.
#[derive(Debug, Default, Serialize)]
pub struct ExpectedContext {
    pub possible_types: Vec<TypeId>,
    pub possible_labels: Vec<Atom>,
    pub possible_callees: Vec<CandidateCallee>,
    /// The hole is the whole body of a single-expression closure.
    pub single_expression_body: bool,
}

impl ExpectedContext {
    /// Analyze the context of `target` within `scope`.
    ///
    /// `None` as a target, or a hole with no interesting ancestor, yields
    /// an empty context; completion then falls back to unranked results.
    pub fn analyze(
        unit: &mut SourceUnit,
        typeck: &mut dyn TypecheckService,
        lookup: &dyn LookupService,
        scope: ScopeId,
        target: Option<NodeIndex>,
    ) -> ExpectedContext {
        let mut info = ExpectedContext::default();
        let Some(target) = target else {
            return info;
        };

        let ancestors = find_interesting_ancestors(unit, scope, target);
        let Some(&parent) = ancestors.last() else {
            return info;
        };
        tracing::debug!(
            target = target.0,
            parent = parent.0,
            depth = ancestors.len(),
            "analyzing completion context"
        );

        let mut env = AnalysisEnv {
            unit,
            typeck,
            lookup,
            scope,
        };
        let mut analyzer = ContextAnalyzer {
            env: &mut env,
            target,
            info: &mut info,
        };
        analyzer.analyze_ancestor(parent);
        info
    }
}

/// How the closest interesting ancestor constrains the hole.
enum ParentRule {
    Apply { subscript: bool },
    Assign { dest: NodeIndex, equal_pos: u32 },
    TupleElement,
    ClosureBody,
    Return,
    ForEach { sequence: NodeIndex },
    Condition,
    PatternBinding,
    MatchPattern { match_var: Option<DeclId> },
}

struct ContextAnalyzer<'a, 'e> {
    env: &'a mut AnalysisEnv<'e>,
    target: NodeIndex,
    info: &'a mut ExpectedContext,
}

impl ContextAnalyzer<'_, '_> {
    fn analyze_ancestor(&mut self, parent: NodeIndex) {
        match self.classify(parent) {
            ParentRule::Apply { subscript } => self.analyze_apply(parent, subscript),
            ParentRule::Assign { dest, equal_pos } => self.analyze_assign(dest, equal_pos),
            ParentRule::TupleElement => self.analyze_tuple(parent),
            ParentRule::ClosureBody => {
                self.info.single_expression_body = true;
                let ty = closure_result_type(self.env, parent);
                self.record_possible_type(ty);
            }
            ParentRule::Return => {
                let ty = scope_return_type(self.env);
                self.record_possible_type(ty);
            }
            ParentRule::ForEach { sequence } => {
                if !sequence.is_none() && self.contains_target(sequence) {
                    let ty = self.env.typeck.well_known_types().sequence_ty;
                    self.record_possible_type(Some(ty));
                }
            }
            ParentRule::Condition => {
                // Only the condition position expects a boolean; a hole in
                // one of the bodies has no expectation from this statement.
                if self.is_bool_condition_of(parent) {
                    let ty = self.env.typeck.well_known_types().bool_ty;
                    self.record_possible_type(Some(ty));
                }
            }
            ParentRule::PatternBinding => self.analyze_pattern_binding(parent),
            ParentRule::MatchPattern { match_var } => {
                if let Some(var) = match_var
                    && let Some(ty) = self.env.unit.decls.get(var).interface_ty
                {
                    let ty = self.env.typeck.map_into_decl_context(self.env.unit, var, ty);
                    self.record_possible_type(Some(ty));
                }
            }
        }
    }

    /// Every node kind the ancestor walk pushes must be handled here; a
    /// kind with no rule means the two walks have drifted apart.
    fn classify(&self, parent: NodeIndex) -> ParentRule {
        match &self.env.unit.arena.node(parent).data {
            NodeData::Expr(expr) => match expr {
                ExprData::Call { .. } | ExprData::Binary { .. } | ExprData::Unary { .. } => {
                    ParentRule::Apply { subscript: false }
                }
                ExprData::Subscript { .. } => ParentRule::Apply { subscript: true },
                ExprData::Assign {
                    dest, equal_pos, ..
                } => ParentRule::Assign {
                    dest: *dest,
                    equal_pos: *equal_pos,
                },
                ExprData::Tuple { .. } => ParentRule::TupleElement,
                ExprData::Closure { .. } => ParentRule::ClosureBody,
                _ => unreachable!("unhandled expression kind"),
            },
            NodeData::Stmt(stmt) => match stmt {
                StmtData::Return { .. } => ParentRule::Return,
                StmtData::ForEach { sequence, .. } => ParentRule::ForEach {
                    sequence: *sequence,
                },
                StmtData::RepeatWhile { .. }
                | StmtData::If { .. }
                | StmtData::While { .. }
                | StmtData::Guard { .. } => ParentRule::Condition,
                _ => unreachable!("unhandled statement kind"),
            },
            NodeData::Decl(decl) => match decl {
                DeclData::PatternBinding { .. } => ParentRule::PatternBinding,
                _ => unreachable!("unhandled declaration kind"),
            },
            NodeData::Pat(pat) => match pat {
                PatData::Expr { match_var, .. } => ParentRule::MatchPattern {
                    match_var: *match_var,
                },
                _ => unreachable!("unhandled pattern kind"),
            },
        }
    }

    fn analyze_apply(&mut self, apply: NodeIndex, subscript: bool) {
        let (args, implicit) = {
            let node = self.env.unit.arena.node(apply);
            let args = match &node.data {
                NodeData::Expr(
                    ExprData::Call { args, .. }
                    | ExprData::Binary { args, .. }
                    | ExprData::Unary { args, .. }
                    | ExprData::Subscript { args, .. },
                ) => *args,
                _ => return,
            };
            (args, node.implicit)
        };

        let mut candidates: SmallVec<[CandidateCallee; 2]> = SmallVec::new();
        let found = if subscript {
            collect_callees_for_subscript(self.env, apply, &mut candidates)
        } else {
            collect_callees_for_call(self.env, apply, &mut candidates)
        };
        if !found {
            return;
        }
        self.info.possible_callees = candidates.to_vec();

        let Some(mut position) = position_in_args(&self.env.unit.arena, args, self.target) else {
            return;
        };
        if !translate_arg_index_to_param_index(&self.env.unit.arena, args, &mut position) {
            return;
        }

        // A label the user has not written yet is itself a completion
        // result; only when the label is already written (or can never be)
        // does the parameter contribute its type. Binary and unary applies
        // never take labels.
        let labeled_apply = subscript
            || matches!(
                self.env.unit.arena.node(apply).data,
                NodeData::Expr(ExprData::Call { .. })
            );
        let may_need_label = !position.has_label && !implicit && labeled_apply;

        let mut seen_types: FxHashSet<TypeId> = FxHashSet::default();
        let mut seen_labels: FxHashSet<Atom> = FxHashSet::default();
        for candidate in candidates {
            let param = {
                let Some((params, _)) = self.env.unit.types.as_function(candidate.ty) else {
                    continue;
                };
                let Some(param) = params.get(position.index) else {
                    continue;
                };
                param.clone()
            };

            if let Some(label) = param.label
                && may_need_label
            {
                if seen_labels.insert(label) {
                    self.info.possible_labels.push(label);
                }
            } else {
                let mut ty = param.ty;
                if let Some(decl) = candidate.decl
                    && self.env.unit.types.has_type_parameter(ty)
                {
                    ty = self.env.typeck.map_into_decl_context(self.env.unit, decl, ty);
                }
                if seen_types.insert(ty) {
                    self.record_possible_type(Some(ty));
                }
            }
        }
    }

    fn analyze_assign(&mut self, dest: NodeIndex, equal_pos: u32) {
        // Only the right-hand side takes the destination's type.
        let target_start = self.env.unit.arena.node(self.target).span.start;
        if equal_pos >= target_start {
            return;
        }

        if let Some(ty) = self.env.unit.arena.type_of(dest) {
            self.record_possible_type(Some(ty));
        } else if let NodeData::Expr(ExprData::NameRef { decl }) =
            &self.env.unit.arena.node(dest).data
        {
            let decl = *decl;
            if let Some(ty) = self.env.unit.decls.get(decl).interface_ty {
                let ty = self.env.typeck.map_into_decl_context(self.env.unit, decl, ty);
                self.record_possible_type(Some(ty));
            }
        }
    }

    fn analyze_tuple(&mut self, tuple: NodeIndex) {
        let Some(ty) = self.env.unit.arena.type_of(tuple) else {
            return;
        };
        let Some(position) = position_in_args(&self.env.unit.arena, tuple, self.target) else {
            return;
        };
        let element = self
            .env
            .unit
            .types
            .tuple_elements(ty)
            .and_then(|elements| elements.get(position.index).copied());
        self.record_possible_type(element);
    }

    fn analyze_pattern_binding(&mut self, binding: NodeIndex) {
        let entries: SmallVec<[(NodeIndex, NodeIndex); 2]> = {
            let NodeData::Decl(DeclData::PatternBinding { entries }) =
                &self.env.unit.arena.node(binding).data
            else {
                return;
            };
            entries.iter().map(|e| (e.pattern, e.initializer)).collect()
        };

        for (pattern, initializer) in entries {
            if initializer.is_none() || !self.contains_target(initializer) {
                continue;
            }
            if let Some(ty) = self.env.unit.arena.type_of(pattern) {
                self.record_possible_type(Some(ty));
                break;
            }
        }
    }

    fn is_bool_condition_of(&self, stmt: NodeIndex) -> bool {
        match &self.env.unit.arena.node(stmt).data {
            NodeData::Stmt(StmtData::RepeatWhile { condition, .. }) => {
                !condition.is_none() && self.contains_target(*condition)
            }
            NodeData::Stmt(
                StmtData::If { conditions, .. }
                | StmtData::While { conditions, .. }
                | StmtData::Guard { conditions, .. },
            ) => conditions.iter().any(|cond| match cond {
                ConditionElement::Boolean(expr) => self.contains_target(*expr),
                ConditionElement::PatternMatch { .. } => false,
            }),
            _ => false,
        }
    }

    fn contains_target(&self, node: NodeIndex) -> bool {
        let target_span = self.env.unit.arena.node(self.target).span;
        self.env.unit.arena.node(node).span.contains(target_span)
    }

    /// Error types are useless as expectations and are skipped; location
    /// wrappers are stripped so expectations are always value types.
    fn record_possible_type(&mut self, ty: Option<TypeId>) {
        let Some(ty) = ty else {
            return;
        };
        if self.env.unit.types.is_error(ty) {
            return;
        }
        self.info
            .possible_types
            .push(self.env.unit.types.rvalue(ty));
    }
}

/// The type a single-expression closure body is expected to produce.
///
/// An explicit result annotation wins over a previously inferred closure
/// type: the written annotation is what the user is committing to, and the
/// inferred type may reflect a stale body.
fn closure_result_type(env: &mut AnalysisEnv, closure: NodeIndex) -> Option<TypeId> {
    let NodeData::Expr(ExprData::Closure {
        result_annotation, ..
    }) = &env.unit.arena.node(closure).data
    else {
        return None;
    };
    let result_annotation = *result_annotation;

    if !result_annotation.is_none()
        && let Some(ty) = env.unit.arena.type_of(result_annotation)
    {
        return Some(ty);
    }

    let ty = env.unit.arena.type_of(closure)?;
    if env.unit.types.contains_error(ty) {
        return None;
    }
    let (_, result) = env.unit.types.as_function(ty)?;
    Some(result)
}

/// The return type expected by a `return` statement in the analysis scope.
fn scope_return_type(env: &mut AnalysisEnv) -> Option<TypeId> {
    match env.unit.scopes.kind(env.scope) {
        ScopeKind::Function { decl, .. } | ScopeKind::Accessor { decl, .. } => {
            let ty = env.unit.decls.applied_interface_type(&env.unit.types, decl)?;
            let (_, result) = env.unit.types.as_function(ty)?;
            Some(env.typeck.map_into_scope_context(env.unit, env.scope, result))
        }
        ScopeKind::Closure { expr } => closure_result_type(env, expr),
        _ => None,
    }
}
