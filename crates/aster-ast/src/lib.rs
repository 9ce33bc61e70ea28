//! Arena-backed syntax tree for the Aster compiler frontend.
//!
//! Nodes live in a `NodeArena` and are addressed by stable `NodeIndex`
//! handles. Each node records a source span, an optional resolved type
//! stamped by the type checker, and a tagged payload drawn from one of four
//! closed node families:
//!
//! - expressions (`ExprData`)
//! - statements (`StmtData`)
//! - declarations (`DeclData`)
//! - patterns (`PatData`)
//!
//! The families are deliberately closed enums so that every consumer
//! dispatches with an exhaustive `match`; an unhandled kind is a compile
//! error rather than a silent fallthrough.

pub mod arena;
pub mod node;
pub mod walk;

pub use arena::NodeArena;
pub use node::{
    ConditionElement, DeclData, ExprData, Node, NodeData, NodeIndex, PatData,
    PatternBindingEntry, ShuffleSlot, StmtData, TupleElement,
};
pub use walk::{children, for_each_bound_variable};
