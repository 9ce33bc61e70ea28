//! String interning for identifier and argument-label deduplication.
//!
//! Interned strings are referenced by `Atom`, a compact copyable handle.
//! Equality of atoms is equality of the underlying strings.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Handle to an interned string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom(pub u32);

/// Append-only string interner.
#[derive(Debug, Default)]
pub struct Interner {
    map: FxHashMap<String, Atom>,
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Interner {
        Interner::default()
    }

    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&atom) = self.map.get(text) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        self.strings.push(text.to_owned());
        self.map.insert(text.to_owned(), atom);
        atom
    }

    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
