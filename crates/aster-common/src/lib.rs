//! Common types and utilities for the Aster compiler frontend.
//!
//! This crate provides foundational types used across all aster crates:
//! - Source spans (`Span`) with byte-offset containment/ordering queries
//! - String interning (`Atom`, `Interner`)
//! - Shared identifier newtypes (`TypeId`, `DeclId`) that break circular
//!   dependencies between the syntax and semantic layers

pub mod ids;
pub mod interner;
pub mod span;

pub use ids::{DeclId, TypeId};
pub use interner::{Atom, Interner};
pub use span::Span;
