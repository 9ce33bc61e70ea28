//! One syntax tree bundled with its semantic tables.

use aster_ast::NodeArena;
use aster_common::Interner;

use crate::decl::DeclTable;
use crate::scope::ScopeTree;
use crate::types::TypeTable;

/// Everything an analysis pass needs about one source unit.
///
/// The arena is shared with the rest of the session: analysis may read it
/// and incrementally stamp types onto it, but never deletes or restructures
/// nodes. All entities here are owned by the host and outlive any single
/// completion request.
#[derive(Debug, Default)]
pub struct SourceUnit {
    pub arena: NodeArena,
    pub scopes: ScopeTree,
    pub decls: DeclTable,
    pub types: TypeTable,
    pub names: Interner,
}

impl SourceUnit {
    pub fn new() -> SourceUnit {
        SourceUnit::default()
    }
}
