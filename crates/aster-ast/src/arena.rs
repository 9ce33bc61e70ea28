//! NodeArena storage and creation methods (add_* methods).

use aster_common::{Atom, DeclId, Span, TypeId};

use crate::node::*;

/// Arena owning every node of one syntax tree.
///
/// Indices are stable for the lifetime of the arena; analysis passes hold
/// `NodeIndex` handles across mutations of the type stamps.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            return None;
        }
        self.nodes.get(index.0 as usize)
    }

    /// Like `get`, but for indices known to be valid.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0 as usize]
    }

    pub fn type_of(&self, index: NodeIndex) -> Option<TypeId> {
        self.get(index).and_then(|node| node.ty)
    }

    /// Stamp a resolved type onto a node (type-checker side effect).
    pub fn set_type(&mut self, index: NodeIndex, ty: Option<TypeId>) {
        self.nodes[index.0 as usize].ty = ty;
    }

    pub fn set_implicit(&mut self, index: NodeIndex, implicit: bool) {
        self.nodes[index.0 as usize].implicit = implicit;
    }

    /// Mark a pattern-binding entry's initializer as already checked.
    pub fn set_initializer_checked(&mut self, binding: NodeIndex, entry: usize) {
        match &mut self.nodes[binding.0 as usize].data {
            NodeData::Decl(DeclData::PatternBinding { entries }) => {
                entries[entry].initializer_checked = true;
            }
            _ => panic!("set_initializer_checked on a non-binding node"),
        }
    }

    fn push(&mut self, span: Span, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            span,
            ty: None,
            implicit: false,
            data,
        });
        index
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn add_leaf(&mut self, span: Span) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::Leaf))
    }

    pub fn add_name_ref(&mut self, span: Span, decl: DeclId) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::NameRef { decl }))
    }

    pub fn add_overload_set_ref(&mut self, span: Span, decls: Vec<DeclId>) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::OverloadSetRef { decls }))
    }

    pub fn add_unresolved_member(&mut self, span: Span, base: NodeIndex, name: Atom) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::UnresolvedMember { base, name }))
    }

    pub fn add_call(&mut self, span: Span, callee: NodeIndex, args: NodeIndex) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::Call { callee, args }))
    }

    pub fn add_subscript(
        &mut self,
        span: Span,
        base: NodeIndex,
        args: NodeIndex,
        decl: Option<DeclId>,
    ) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::Subscript { base, args, decl }))
    }

    pub fn add_binary(&mut self, span: Span, callee: NodeIndex, args: NodeIndex) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::Binary { callee, args }))
    }

    pub fn add_unary(&mut self, span: Span, callee: NodeIndex, args: NodeIndex) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::Unary { callee, args }))
    }

    pub fn add_assign(
        &mut self,
        span: Span,
        dest: NodeIndex,
        equal_pos: u32,
        source: NodeIndex,
    ) -> NodeIndex {
        self.push(
            span,
            NodeData::Expr(ExprData::Assign {
                dest,
                equal_pos,
                source,
            }),
        )
    }

    pub fn add_paren(&mut self, span: Span, sub: NodeIndex) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::Paren { sub }))
    }

    pub fn add_tuple(&mut self, span: Span, elements: Vec<TupleElement>) -> NodeIndex {
        self.push(span, NodeData::Expr(ExprData::Tuple { elements }))
    }

    pub fn add_shuffle(
        &mut self,
        span: Span,
        sub: NodeIndex,
        mapping: Vec<ShuffleSlot>,
        variadic_args: Vec<u32>,
    ) -> NodeIndex {
        let index = self.push(
            span,
            NodeData::Expr(ExprData::Shuffle {
                sub,
                mapping,
                variadic_args,
            }),
        );
        // Shuffles are always compiler-synthesized.
        self.set_implicit(index, true);
        index
    }

    pub fn add_closure(
        &mut self,
        span: Span,
        body: NodeIndex,
        result_annotation: NodeIndex,
    ) -> NodeIndex {
        self.push(
            span,
            NodeData::Expr(ExprData::Closure {
                body,
                result_annotation,
            }),
        )
    }

    pub fn add_implicit_conversion(&mut self, span: Span, sub: NodeIndex) -> NodeIndex {
        let index = self.push(span, NodeData::Expr(ExprData::ImplicitConversion { sub }));
        self.set_implicit(index, true);
        index
    }

    pub fn add_auto_closure(&mut self, span: Span, body: NodeIndex) -> NodeIndex {
        let index = self.push(span, NodeData::Expr(ExprData::AutoClosure { body }));
        self.set_implicit(index, true);
        index
    }

    pub fn add_constructor_ref(&mut self, span: Span, sub: NodeIndex) -> NodeIndex {
        let index = self.push(span, NodeData::Expr(ExprData::ConstructorRef { sub }));
        self.set_implicit(index, true);
        index
    }

    pub fn add_type_ref(&mut self, span: Span, resolved: Option<TypeId>) -> NodeIndex {
        let index = self.push(span, NodeData::Expr(ExprData::TypeRef));
        self.set_type(index, resolved);
        index
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn add_block(&mut self, span: Span, elements: Vec<NodeIndex>) -> NodeIndex {
        self.push(span, NodeData::Stmt(StmtData::Block { elements }))
    }

    pub fn add_return(&mut self, span: Span, value: NodeIndex) -> NodeIndex {
        self.push(span, NodeData::Stmt(StmtData::Return { value }))
    }

    pub fn add_for_each(
        &mut self,
        span: Span,
        pattern: NodeIndex,
        sequence: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.push(
            span,
            NodeData::Stmt(StmtData::ForEach {
                pattern,
                sequence,
                body,
            }),
        )
    }

    pub fn add_repeat_while(&mut self, span: Span, condition: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.push(span, NodeData::Stmt(StmtData::RepeatWhile { condition, body }))
    }

    pub fn add_if(
        &mut self,
        span: Span,
        conditions: Vec<ConditionElement>,
        then_body: NodeIndex,
        else_body: NodeIndex,
    ) -> NodeIndex {
        self.push(
            span,
            NodeData::Stmt(StmtData::If {
                conditions,
                then_body,
                else_body,
            }),
        )
    }

    pub fn add_while(
        &mut self,
        span: Span,
        conditions: Vec<ConditionElement>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.push(span, NodeData::Stmt(StmtData::While { conditions, body }))
    }

    pub fn add_guard(
        &mut self,
        span: Span,
        conditions: Vec<ConditionElement>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.push(span, NodeData::Stmt(StmtData::Guard { conditions, body }))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn add_pattern_binding(&mut self, span: Span, entries: Vec<PatternBindingEntry>) -> NodeIndex {
        self.push(span, NodeData::Decl(DeclData::PatternBinding { entries }))
    }

    pub fn add_function_decl(&mut self, span: Span, decl: DeclId, body: NodeIndex) -> NodeIndex {
        self.push(span, NodeData::Decl(DeclData::Function { decl, body }))
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    pub fn add_named_pattern(&mut self, span: Span, decl: DeclId) -> NodeIndex {
        self.push(span, NodeData::Pat(PatData::Named { decl }))
    }

    pub fn add_tuple_pattern(&mut self, span: Span, elements: Vec<NodeIndex>) -> NodeIndex {
        self.push(span, NodeData::Pat(PatData::Tuple { elements }))
    }

    pub fn add_typed_pattern(&mut self, span: Span, sub: NodeIndex, annotation: NodeIndex) -> NodeIndex {
        self.push(span, NodeData::Pat(PatData::Typed { sub, annotation }))
    }

    pub fn add_expr_pattern(
        &mut self,
        span: Span,
        sub: NodeIndex,
        match_var: Option<DeclId>,
    ) -> NodeIndex {
        self.push(span, NodeData::Pat(PatData::Expr { sub, match_var }))
    }
}
