//! Shared identifier newtypes.
//!
//! `TypeId` and `DeclId` are used by both the syntax layer (type stamps and
//! declaration references on tree nodes) and the semantic layer (the tables
//! that own the referenced data). Keeping them here breaks what would
//! otherwise be a circular dependency between those crates.

use serde::{Deserialize, Serialize};

/// Handle to an interned type in the semantic layer's type table.
///
/// Interning makes type identity comparison O(1): two equal `TypeId`s always
/// denote the same structural type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u32);

/// Handle to a declaration in the semantic layer's declaration table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclId(pub u32);
