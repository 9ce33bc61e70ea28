//! Node records and the four node families.

use aster_common::{Atom, DeclId, Span, TypeId};

/// Handle to a node in a `NodeArena`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Sentinel for an absent child (bare `return`, missing else body, ...).
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    pub fn is_none(self) -> bool {
        self == NodeIndex::NONE
    }
}

/// One tree node: source extent, optional resolved type, tagged payload.
///
/// The `ty` slot is written by the external type checker as a side effect of
/// checking, and cleared again by the retypecheck reset when it holds a
/// stale error/unresolved marker. The tree structure itself is immutable
/// once built.
#[derive(Debug)]
pub struct Node {
    pub span: Span,
    pub ty: Option<TypeId>,
    /// Compiler-synthesized nodes are implicit; they never carry written
    /// argument labels.
    pub implicit: bool,
    pub data: NodeData,
}

/// The four disjoint node families.
#[derive(Debug)]
pub enum NodeData {
    Expr(ExprData),
    Stmt(StmtData),
    Decl(DeclData),
    Pat(PatData),
}

impl Node {
    pub fn is_expr(&self) -> bool {
        matches!(self.data, NodeData::Expr(_))
    }
}

/// One element of a tuple expression.
///
/// A label may exist without a source location when the tuple was
/// synthesized by the compiler; only a located label counts as "written".
#[derive(Debug, Clone)]
pub struct TupleElement {
    pub expr: NodeIndex,
    pub label: Option<Atom>,
    pub label_span: Option<Span>,
}

/// Where one logical parameter slot of a shuffled argument list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleSlot {
    /// Filled from the written argument at this index.
    Written(u32),
    /// Filled by collecting the shuffle's variadic argument run.
    VariadicRun,
    /// Filled from the parameter's default value; no written argument.
    Defaulted,
}

#[derive(Debug)]
pub enum ExprData {
    /// Opaque leaf: literals, completion placeholders, anything whose
    /// internal structure does not matter to context analysis.
    Leaf,
    /// Reference to a single resolved declaration.
    NameRef { decl: DeclId },
    /// Reference to a name with several visible overloads, prior to
    /// overload resolution.
    OverloadSetRef { decls: Vec<DeclId> },
    /// `base.name` where `name` has not been resolved to a declaration.
    UnresolvedMember { base: NodeIndex, name: Atom },
    Call {
        callee: NodeIndex,
        /// Paren, tuple, or shuffle node holding the written arguments.
        args: NodeIndex,
    },
    Subscript {
        base: NodeIndex,
        args: NodeIndex,
        /// Present once the subscript has been resolved to a declaration.
        decl: Option<DeclId>,
    },
    Binary { callee: NodeIndex, args: NodeIndex },
    Unary { callee: NodeIndex, args: NodeIndex },
    Assign {
        dest: NodeIndex,
        /// Byte offset of the assignment operator.
        equal_pos: u32,
        source: NodeIndex,
    },
    Paren { sub: NodeIndex },
    Tuple { elements: Vec<TupleElement> },
    /// A call's arguments after reordering/defaulting/variadic collapsing
    /// to match the callee's declared parameter order. `mapping` is indexed
    /// by logical parameter position; `variadic_args` lists the written
    /// indices collected into the variadic run.
    Shuffle {
        sub: NodeIndex,
        mapping: Vec<ShuffleSlot>,
        variadic_args: Vec<u32>,
    },
    Closure {
        /// Block statement body.
        body: NodeIndex,
        /// Type-annotation node for an explicit result type, or NONE.
        result_annotation: NodeIndex,
    },
    /// Compiler-synthesized conversion wrapper; never a completion target.
    ImplicitConversion { sub: NodeIndex },
    /// Compiler-synthesized closure wrapper around a single expression;
    /// holds no meaningful type state of its own.
    AutoClosure { body: NodeIndex },
    /// Compiler-synthesized constructor-reference wrapper.
    ConstructorRef { sub: NodeIndex },
    /// A type written in expression/annotation position. Its `ty` slot
    /// holds the resolved annotation type. Never searched into.
    TypeRef,
}

/// One boolean-or-binding element of a conditional statement's condition.
#[derive(Debug)]
pub enum ConditionElement {
    Boolean(NodeIndex),
    PatternMatch {
        pattern: NodeIndex,
        initializer: NodeIndex,
    },
}

#[derive(Debug)]
pub enum StmtData {
    Block { elements: Vec<NodeIndex> },
    Return { value: NodeIndex },
    ForEach {
        pattern: NodeIndex,
        sequence: NodeIndex,
        body: NodeIndex,
    },
    RepeatWhile { condition: NodeIndex, body: NodeIndex },
    If {
        conditions: Vec<ConditionElement>,
        then_body: NodeIndex,
        else_body: NodeIndex,
    },
    While {
        conditions: Vec<ConditionElement>,
        body: NodeIndex,
    },
    Guard {
        conditions: Vec<ConditionElement>,
        body: NodeIndex,
    },
}

/// One `pattern = initializer` entry of a pattern-binding declaration.
#[derive(Debug)]
pub struct PatternBindingEntry {
    pub pattern: NodeIndex,
    pub initializer: NodeIndex,
    /// Whether the initializer expression has already been type-checked.
    pub initializer_checked: bool,
}

#[derive(Debug)]
pub enum DeclData {
    PatternBinding { entries: Vec<PatternBindingEntry> },
    Function { decl: DeclId, body: NodeIndex },
}

#[derive(Debug)]
pub enum PatData {
    /// Binds a single variable.
    Named { decl: DeclId },
    Tuple { elements: Vec<NodeIndex> },
    /// `pattern: Type`.
    Typed { sub: NodeIndex, annotation: NodeIndex },
    /// Matches against the value of an expression; may carry a synthesized
    /// match variable.
    Expr {
        sub: NodeIndex,
        match_var: Option<DeclId>,
    },
}
