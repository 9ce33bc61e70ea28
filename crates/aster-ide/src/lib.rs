//! Completion context analysis.
//!
//! Given a "hole" (the node at which completion was requested), this crate
//! infers what the surrounding program expects there: possible expected
//! types, a possible expected argument label, and candidate callable
//! signatures. The result feeds an upstream ranking layer; it is
//! best-effort by design and never reports errors to the user.
//!
//! Pipeline, in the order a completion request drives it:
//!
//! 1. [`prepare_for_retypecheck`] clears stale error/unresolved type stamps
//!    so re-analysis is not short-circuited by earlier failures.
//! 2. [`typecheck_context_until`] checks the enclosing scopes outward-to-
//!    inward, far enough to make surrounding declarations available.
//! 3. [`find_parsed_expr`] locates the hole node by exact source range.
//! 4. [`ExpectedContext::analyze`] walks to the nearest interesting
//!    ancestor and runs the per-kind inference rule.
//!
//! Analysis may read and incrementally annotate the shared tree but never
//! deletes or restructures it. One analysis runs to completion per request;
//! callers serialize concurrent requests over the same tree.

pub mod analyzer;
pub mod ancestors;
pub mod args;
pub mod callee;
pub mod env;
pub mod locator;
pub mod retypecheck;
pub mod typecheck;

pub use analyzer::ExpectedContext;
pub use args::{position_in_args, translate_arg_index_to_param_index, ArgumentPosition};
pub use callee::CandidateCallee;
pub use env::AnalysisEnv;
pub use locator::find_parsed_expr;
pub use retypecheck::prepare_for_retypecheck;
pub use typecheck::typecheck_context_until;
