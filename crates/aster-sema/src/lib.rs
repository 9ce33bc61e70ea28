//! Semantic model and collaborator interfaces for the Aster frontend.
//!
//! This crate owns the data the IDE-facing analysis reads but does not
//! compute itself:
//!
//! - `TypeTable`: interned structural types with O(1) identity comparison
//!   and recursive property flags (contains-error, contains-unresolved,
//!   has-type-parameter)
//! - `DeclTable`: declarations with interface types and editor visibility
//! - `ScopeTree`: the parent-linked lexical scope chain
//! - `SourceUnit`: one syntax tree bundled with its semantic tables
//! - `TypecheckService` / `LookupService`: the interfaces behind which the
//!   full type checker and name lookup live; the analysis never assumes
//!   more than these contracts

pub mod decl;
pub mod scope;
pub mod services;
pub mod types;
pub mod unit;

pub use decl::{Decl, DeclKind, DeclTable};
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};
pub use services::{
    LookupService, MemberName, ResolvedExpr, TypecheckService, WellKnownTypes,
};
pub use types::{Param, TypeData, TypeTable};
pub use unit::SourceUnit;
