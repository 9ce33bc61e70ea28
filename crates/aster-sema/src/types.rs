//! Interned structural types.
//!
//! Types are interned in a `TypeTable`: structurally equal types always get
//! the same `TypeId`, so identity-based deduplication is a `TypeId`
//! comparison. Recursive properties (does this type contain an error
//! anywhere, an unresolved placeholder, a type parameter) are computed once
//! at intern time and answered in O(1) afterwards.

use aster_common::{Atom, TypeId};
use rustc_hash::FxHashMap;

/// Recursive property flags, unioned over a type's components.
pub mod type_flags {
    pub const CONTAINS_ERROR: u8 = 1 << 0;
    pub const CONTAINS_UNRESOLVED: u8 = 1 << 1;
    pub const HAS_TYPE_PARAMETER: u8 = 1 << 2;
}

/// One parameter of a callable signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub label: Option<Atom>,
    pub ty: TypeId,
    pub variadic: bool,
    pub defaulted: bool,
}

impl Param {
    pub fn new(label: Option<Atom>, ty: TypeId) -> Param {
        Param {
            label,
            ty,
            variadic: false,
            defaulted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// A type that failed to resolve; poisoned for inference purposes.
    Error,
    /// A not-yet-resolved placeholder left by a partial check.
    Unresolved,
    /// A named nominal type, possibly generic.
    Nominal { name: Atom, args: Vec<TypeId> },
    /// A generic parameter awaiting substitution.
    TypeParam { name: Atom },
    Tuple { elements: Vec<TypeId> },
    Function { params: Vec<Param>, result: TypeId },
    /// The type of a type: `T.Type`.
    Metatype { instance: TypeId },
    /// Mutable-location wrapper; `rvalue` strips it.
    LValue { object: TypeId },
}

/// Append-only interning table for types.
#[derive(Debug, Default)]
pub struct TypeTable {
    map: FxHashMap<TypeData, TypeId>,
    data: Vec<TypeData>,
    flags: Vec<u8>,
}

impl TypeTable {
    pub fn new() -> TypeTable {
        TypeTable::default()
    }

    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.map.get(&data) {
            return id;
        }
        let flags = self.compute_flags(&data);
        let id = TypeId(self.data.len() as u32);
        self.map.insert(data.clone(), id);
        self.data.push(data);
        self.flags.push(flags);
        id
    }

    fn compute_flags(&self, data: &TypeData) -> u8 {
        match data {
            TypeData::Error => type_flags::CONTAINS_ERROR,
            TypeData::Unresolved => type_flags::CONTAINS_UNRESOLVED,
            TypeData::TypeParam { .. } => type_flags::HAS_TYPE_PARAMETER,
            TypeData::Nominal { args, .. } => args
                .iter()
                .fold(0, |acc, &arg| acc | self.flags_of(arg)),
            TypeData::Tuple { elements } => elements
                .iter()
                .fold(0, |acc, &element| acc | self.flags_of(element)),
            TypeData::Function { params, result } => params
                .iter()
                .fold(self.flags_of(*result), |acc, param| {
                    acc | self.flags_of(param.ty)
                }),
            TypeData::Metatype { instance } => self.flags_of(*instance),
            TypeData::LValue { object } => self.flags_of(*object),
        }
    }

    fn flags_of(&self, id: TypeId) -> u8 {
        self.flags[id.0 as usize]
    }

    pub fn data(&self, id: TypeId) -> &TypeData {
        &self.data[id.0 as usize]
    }

    // ========================================================================
    // Property queries
    // ========================================================================

    pub fn contains_error(&self, id: TypeId) -> bool {
        self.flags_of(id) & type_flags::CONTAINS_ERROR != 0
    }

    pub fn contains_unresolved(&self, id: TypeId) -> bool {
        self.flags_of(id) & type_flags::CONTAINS_UNRESOLVED != 0
    }

    pub fn has_type_parameter(&self, id: TypeId) -> bool {
        self.flags_of(id) & type_flags::HAS_TYPE_PARAMETER != 0
    }

    pub fn is_error(&self, id: TypeId) -> bool {
        matches!(self.data(id), TypeData::Error)
    }

    pub fn is_metatype(&self, id: TypeId) -> bool {
        matches!(self.data(id), TypeData::Metatype { .. })
    }

    /// Strip a mutable-location wrapper, if any.
    pub fn rvalue(&self, id: TypeId) -> TypeId {
        match self.data(id) {
            TypeData::LValue { object } => *object,
            _ => id,
        }
    }

    /// The instance type of a metatype, or the type itself.
    pub fn metatype_instance(&self, id: TypeId) -> TypeId {
        match self.data(id) {
            TypeData::Metatype { instance } => *instance,
            _ => id,
        }
    }

    pub fn as_function(&self, id: TypeId) -> Option<(&[Param], TypeId)> {
        match self.data(id) {
            TypeData::Function { params, result } => Some((params.as_slice(), *result)),
            _ => None,
        }
    }

    pub fn tuple_elements(&self, id: TypeId) -> Option<&[TypeId]> {
        match self.data(id) {
            TypeData::Tuple { elements } => Some(elements.as_slice()),
            _ => None,
        }
    }

    /// Whether member lookup on this type can ever succeed.
    pub fn may_have_members(&self, id: TypeId) -> bool {
        matches!(
            self.data(id),
            TypeData::Nominal { .. } | TypeData::TypeParam { .. }
        )
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    pub fn error(&mut self) -> TypeId {
        self.intern(TypeData::Error)
    }

    pub fn unresolved(&mut self) -> TypeId {
        self.intern(TypeData::Unresolved)
    }

    pub fn nominal(&mut self, name: Atom) -> TypeId {
        self.intern(TypeData::Nominal {
            name,
            args: Vec::new(),
        })
    }

    pub fn type_param(&mut self, name: Atom) -> TypeId {
        self.intern(TypeData::TypeParam { name })
    }

    pub fn tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.intern(TypeData::Tuple { elements })
    }

    pub fn function(&mut self, params: Vec<Param>, result: TypeId) -> TypeId {
        self.intern(TypeData::Function { params, result })
    }

    pub fn metatype(&mut self, instance: TypeId) -> TypeId {
        self.intern(TypeData::Metatype { instance })
    }

    pub fn lvalue(&mut self, object: TypeId) -> TypeId {
        self.intern(TypeData::LValue { object })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aster_common::Interner;

    #[test]
    fn interning_is_identity_preserving() {
        let mut names = Interner::new();
        let mut types = TypeTable::new();
        let int_name = names.intern("Int");
        let a = types.nominal(int_name);
        let b = types.nominal(int_name);
        assert_eq!(a, b);
    }

    #[test]
    fn recursive_flags_propagate_through_composites() {
        let mut names = Interner::new();
        let mut types = TypeTable::new();
        let error = types.error();
        let int = types.nominal(names.intern("Int"));
        let t = types.type_param(names.intern("T"));

        let tuple = types.tuple(vec![int, error]);
        assert!(types.contains_error(tuple));
        assert!(!types.contains_error(int));

        let f = types.function(vec![Param::new(None, t)], int);
        assert!(types.has_type_parameter(f));
        assert!(!types.contains_error(f));

        let meta = types.metatype(tuple);
        assert!(types.contains_error(meta));
    }

    #[test]
    fn rvalue_strips_one_lvalue_level() {
        let mut names = Interner::new();
        let mut types = TypeTable::new();
        let int = types.nominal(names.intern("Int"));
        let lv = types.lvalue(int);
        assert_eq!(types.rvalue(lv), int);
        assert_eq!(types.rvalue(int), int);
    }
}
