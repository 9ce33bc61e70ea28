//! Lexical scope chain.
//!
//! Scopes form a parent-linked tree rooted at the module scope. Each scope
//! kind carries the payload the context typechecker's per-kind dispatch
//! needs: the owning declaration, the body node to walk, or the pattern
//! binding entry an initializer belongs to.

use aster_ast::NodeIndex;
use aster_common::DeclId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Module root. `body` is the block of top-level items, if materialized.
    Module { body: NodeIndex },
    /// A top-level code unit executed in source order.
    TopLevel { body: NodeIndex },
    Function { decl: DeclId, body: NodeIndex },
    /// A property accessor; checking it requires its storage declaration to
    /// be checked first.
    Accessor {
        decl: DeclId,
        storage: DeclId,
        body: NodeIndex,
    },
    /// Closure expressions act as scopes for name lookup but own no
    /// checkable declarations of their own.
    Closure { expr: NodeIndex },
    /// The initializer expression of one pattern-binding entry.
    Initializer { binding: NodeIndex, entry: u32 },
    Extension { decl: DeclId, body: NodeIndex },
    TypeDecl { decl: DeclId, body: NodeIndex },
    SubscriptDecl { decl: DeclId, body: NodeIndex },
    /// Deserialized local scope marker; purely syntactic.
    SerializedLocal,
    /// Enum element marker; purely syntactic.
    EnumElement { decl: DeclId },
}

#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
}

#[derive(Debug, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn new() -> ScopeTree {
        ScopeTree::default()
    }

    pub fn add_module(&mut self, body: NodeIndex) -> ScopeId {
        self.push(None, ScopeKind::Module { body })
    }

    pub fn add_child(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        self.push(Some(parent), kind)
    }

    fn push(&mut self, parent: Option<ScopeId>, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope { parent, kind });
        id
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).parent
    }

    pub fn kind(&self, id: ScopeId) -> ScopeKind {
        self.get(id).kind
    }

    pub fn is_module_scope(&self, id: ScopeId) -> bool {
        matches!(self.get(id).kind, ScopeKind::Module { .. })
    }

    /// The tree node a structural walk of this scope starts from.
    ///
    /// Initializer scopes return their binding declaration node; callers
    /// that need the surrounding context (the ancestor walk) must ascend to
    /// the parent scope themselves.
    pub fn body_node(&self, id: ScopeId) -> NodeIndex {
        match self.get(id).kind {
            ScopeKind::Module { body }
            | ScopeKind::TopLevel { body }
            | ScopeKind::Function { body, .. }
            | ScopeKind::Accessor { body, .. }
            | ScopeKind::Extension { body, .. }
            | ScopeKind::TypeDecl { body, .. }
            | ScopeKind::SubscriptDecl { body, .. } => body,
            ScopeKind::Closure { expr } => expr,
            ScopeKind::Initializer { binding, .. } => binding,
            ScopeKind::SerializedLocal | ScopeKind::EnumElement { .. } => NodeIndex::NONE,
        }
    }
}
