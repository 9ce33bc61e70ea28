//! Declaration table.

use aster_common::{Atom, DeclId, TypeId};

use crate::types::TypeTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Func,
    Constructor,
    Subscript,
    Var,
    Type,
}

impl DeclKind {
    /// Whether a declaration of this kind can be applied with arguments.
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            DeclKind::Func | DeclKind::Constructor | DeclKind::Subscript
        )
    }
}

/// One declaration visible to name lookup.
#[derive(Debug)]
pub struct Decl {
    pub name: Atom,
    pub kind: DeclKind,
    /// Declared interface type. Members of a nominal type carry the curried
    /// form: the outer level applies the base, the inner level the written
    /// arguments.
    pub interface_ty: Option<TypeId>,
    /// Whether this declaration is a member of a nominal type.
    pub in_type_context: bool,
    /// Internal helpers the editor should never surface.
    pub hidden_from_editor: bool,
}

impl Decl {
    pub fn new(name: Atom, kind: DeclKind) -> Decl {
        Decl {
            name,
            kind,
            interface_ty: None,
            in_type_context: false,
            hidden_from_editor: false,
        }
    }

    pub fn with_type(mut self, ty: TypeId) -> Decl {
        self.interface_ty = Some(ty);
        self
    }

    pub fn in_type_context(mut self) -> Decl {
        self.in_type_context = true;
        self
    }

    pub fn hidden(mut self) -> Decl {
        self.hidden_from_editor = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct DeclTable {
    decls: Vec<Decl>,
}

impl DeclTable {
    pub fn new() -> DeclTable {
        DeclTable::default()
    }

    pub fn add(&mut self, decl: Decl) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    pub fn get(&self, id: DeclId) -> &Decl {
        &self.decls[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.0 as usize]
    }

    /// The interface type of a member with its self-application level
    /// stripped, i.e. the signature that applies to written arguments.
    ///
    /// For non-members this is just the interface type.
    pub fn applied_interface_type(&self, types: &TypeTable, id: DeclId) -> Option<TypeId> {
        let decl = self.get(id);
        let ty = decl.interface_ty?;
        if decl.in_type_context {
            let (_, inner) = types.as_function(ty)?;
            Some(inner)
        } else {
            Some(ty)
        }
    }
}
