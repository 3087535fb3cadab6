//! Expression trees.
//!
//! Two representations are used side by side:
//!
//! - [`ExprBoxed`] is an owned, recursive tree. The grammar and the calculator
//!   build formulas in this form.
//! - [`Expression`] is the same tree flattened into an arena of [`Expr`] nodes
//!   addressed by [`Idx`], together with a parent table. Nodes never own their
//!   parent; the parent table is a separate association consulted only for
//!   rendering.

use std::cell::{Cell, OnceCell};
use std::collections::{BTreeSet, VecDeque};
use std::convert::Infallible;
use std::rc::Rc;

use crate::types::Var;

/// Binary boolean connectives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum BinOp {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Imply,
    Eq,
}

/// Binding strength of negation.
pub const NOT_PRECEDENCE: u8 = 4;
/// Binding strength of constants and variables.
pub const ATOM_PRECEDENCE: u8 = 5;
/// Symbol of negation.
pub const NOT_SYMBOL: &str = "-";

impl BinOp {
    pub const ALL: [BinOp; 7] = [
        BinOp::And,
        BinOp::Or,
        BinOp::Xor,
        BinOp::Nand,
        BinOp::Nor,
        BinOp::Imply,
        BinOp::Eq,
    ];

    /// All accepted spellings; the first one is used for display.
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            BinOp::And => &["&", "*"],
            BinOp::Or => &["V", "+"],
            BinOp::Xor => &["^"],
            BinOp::Nand => &["/"],
            BinOp::Nor => &["!"],
            BinOp::Imply => &["->"],
            BinOp::Eq => &["<->"],
        }
    }

    pub fn symbol(self) -> &'static str {
        self.symbols()[0]
    }

    /// Name used by the fully parenthesized debug form.
    pub fn name(self) -> &'static str {
        match self {
            BinOp::And => "AND",
            BinOp::Or => "OR",
            BinOp::Xor => "XOR",
            BinOp::Nand => "NAND",
            BinOp::Nor => "NOR",
            BinOp::Imply => "IMPLY",
            BinOp::Eq => "EQ",
        }
    }

    /// Binding strength: higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::And | BinOp::Nand => 3,
            BinOp::Or | BinOp::Nor => 2,
            BinOp::Xor | BinOp::Imply | BinOp::Eq => 1,
        }
    }
}

/// Owned expression tree.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ExprBoxed {
    Constant(bool),
    Variable(Var),
    Not(Box<ExprBoxed>),
    Binary(BinOp, Box<ExprBoxed>, Box<ExprBoxed>),
}

impl ExprBoxed {
    pub fn constant(value: bool) -> Self {
        ExprBoxed::Constant(value)
    }

    pub fn variable(var: Var) -> Self {
        ExprBoxed::Variable(var)
    }

    /// Literal: `var` if `positive`, `-var` otherwise.
    pub fn literal(var: Var, positive: bool) -> Self {
        if positive {
            ExprBoxed::variable(var)
        } else {
            ExprBoxed::not(ExprBoxed::variable(var))
        }
    }

    pub fn not(value: Self) -> Self {
        ExprBoxed::Not(Box::new(value))
    }

    pub fn binary(op: BinOp, lhs: Self, rhs: Self) -> Self {
        ExprBoxed::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        ExprBoxed::binary(BinOp::And, lhs, rhs)
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        ExprBoxed::binary(BinOp::Or, lhs, rhs)
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        ExprBoxed::binary(BinOp::Xor, lhs, rhs)
    }

    /// Left-associative chain `((a op b) op c) op ...`.
    ///
    /// Returns `None` for an empty sequence.
    pub fn chain<I>(op: BinOp, operands: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        operands.into_iter().reduce(|acc, next| ExprBoxed::binary(op, acc, next))
    }
}

/// Index of a node inside an [`Expression`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Idx(usize);

impl Idx {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single arena node whose children are referenced by `I`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expr<I = Idx> {
    Constant(bool),
    Variable(Var),
    Not(I),
    Binary(BinOp, I, I),
}

impl<A> Expr<A> {
    #[inline(always)]
    pub fn fmap<B, F>(self, mut f: F) -> Expr<B>
    where
        F: FnMut(A) -> B,
    {
        match self {
            Expr::Constant(value) => Expr::Constant(value),
            Expr::Variable(var) => Expr::Variable(var),
            Expr::Not(a) => Expr::Not(f(a)),
            Expr::Binary(op, a, b) => Expr::Binary(op, f(a), f(b)),
        }
    }

    #[inline(always)]
    pub fn fmap_ref<B, F>(&self, mut f: F) -> Expr<B>
    where
        F: FnMut(&A) -> B,
    {
        match self {
            Expr::Constant(value) => Expr::Constant(*value),
            Expr::Variable(var) => Expr::Variable(*var),
            Expr::Not(a) => Expr::Not(f(a)),
            Expr::Binary(op, a, b) => Expr::Binary(*op, f(a), f(b)),
        }
    }

    /// Binding strength of this node kind.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Constant(_) | Expr::Variable(_) => ATOM_PRECEDENCE,
            Expr::Not(_) => NOT_PRECEDENCE,
            Expr::Binary(op, _, _) => op.precedence(),
        }
    }
}

/// An immutable expression tree stored as an arena.
///
/// Nodes are topologically sorted by construction: the root is at index 0 and
/// every child has a larger index than its parent.
pub struct Expression {
    nodes: Vec<Expr>,
    parents: Vec<Option<Idx>>,
    /// Lazily computed variable set of every subtree, one slot per node.
    variables: Vec<OnceCell<Rc<BTreeSet<Var>>>>,
    memo_hits: Cell<usize>,
}

impl Expression {
    fn from_parts(nodes: Vec<Expr>, parents: Vec<Option<Idx>>) -> Self {
        debug_assert_eq!(nodes.len(), parents.len());
        debug_assert!(!nodes.is_empty());
        let variables = std::iter::repeat_with(OnceCell::new).take(nodes.len()).collect();
        Self {
            nodes,
            parents,
            variables,
            memo_hits: Cell::new(0),
        }
    }

    pub fn constant(value: bool) -> Self {
        Self::from_parts(vec![Expr::Constant(value)], vec![None])
    }

    pub fn variable(var: Var) -> Self {
        Self::from_parts(vec![Expr::Variable(var)], vec![None])
    }

    /// Index of the root node.
    pub fn root(&self) -> Idx {
        Idx(0)
    }

    /// Number of nodes in the tree; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, idx: Idx) -> &Expr {
        &self.nodes[idx.0]
    }

    /// Syntactic parent of a node, or `None` for the root.
    pub fn parent(&self, idx: Idx) -> Option<Idx> {
        self.parents[idx.0]
    }

    /// All nodes with their indices, root first.
    pub fn iter(&self) -> impl Iterator<Item = (Idx, &Expr)> {
        self.nodes.iter().enumerate().map(|(i, expr)| (Idx(i), expr))
    }

    /// Binding strength of the node at `idx`.
    pub fn precedence(&self, idx: Idx) -> u8 {
        self.get(idx).precedence()
    }

    pub(crate) fn variables_slot(&self, idx: Idx) -> &OnceCell<Rc<BTreeSet<Var>>> {
        &self.variables[idx.0]
    }

    pub(crate) fn record_memo_hit(&self) {
        self.memo_hits.set(self.memo_hits.get() + 1);
    }

    /// Number of variable-set queries answered without recomputation.
    pub(crate) fn memo_hits(&self) -> usize {
        self.memo_hits.get()
    }
}

impl Expression {
    fn expand<R, F>(seed: R, expand: F) -> Self
    where
        F: Fn(R) -> Expr<R>,
    {
        let mut frontier: VecDeque<(R, Option<Idx>)> = VecDeque::from([(seed, None)]);
        let mut nodes: Vec<Expr> = vec![];
        let mut parents: Vec<Option<Idx>> = vec![];

        while let Some((seed, parent)) = frontier.pop_front() {
            let this = Idx(nodes.len());
            let expr = expand(seed).fmap(|child| {
                frontier.push_back((child, Some(this)));
                Idx(this.0 + frontier.len())
            });
            nodes.push(expr);
            parents.push(parent);
        }

        Self::from_parts(nodes, parents)
    }

    pub fn from_boxed(ast: &ExprBoxed) -> Self {
        Self::expand(ast, |seed| match seed {
            ExprBoxed::Constant(value) => Expr::Constant(*value),
            ExprBoxed::Variable(var) => Expr::Variable(*var),
            ExprBoxed::Not(a) => Expr::Not(&**a),
            ExprBoxed::Binary(op, a, b) => Expr::Binary(*op, &**a, &**b),
        })
    }

    /// Fold the tree bottom-up, stopping at the first error.
    pub fn try_collapse<R, E, F>(&self, mut collapse: F) -> Result<R, E>
    where
        F: FnMut(Expr<R>) -> Result<R, E>,
    {
        let mut results: Vec<Option<R>> = std::iter::repeat_with(|| None).take(self.nodes.len()).collect();

        for (i, expr) in self.nodes.iter().enumerate().rev() {
            let expr = expr.fmap_ref(|idx| results[idx.0].take().expect("children are collapsed before parents"));
            results[i] = Some(collapse(expr)?);
        }

        Ok(results
            .into_iter()
            .next()
            .flatten()
            .expect("expression has a root"))
    }

    /// Fold the tree bottom-up.
    pub fn collapse<R, F>(&self, mut collapse: F) -> R
    where
        F: FnMut(Expr<R>) -> R,
    {
        match self.try_collapse::<R, Infallible, _>(|expr| Ok(collapse(expr))) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    pub fn to_boxed(&self) -> ExprBoxed {
        self.collapse(|expr| match expr {
            Expr::Constant(value) => ExprBoxed::constant(value),
            Expr::Variable(var) => ExprBoxed::variable(var),
            Expr::Not(a) => ExprBoxed::not(a),
            Expr::Binary(op, a, b) => ExprBoxed::binary(op, a, b),
        })
    }
}

impl From<&ExprBoxed> for Expression {
    fn from(ast: &ExprBoxed) -> Self {
        Expression::from_boxed(ast)
    }
}

impl From<ExprBoxed> for Expression {
    fn from(ast: ExprBoxed) -> Self {
        Expression::from_boxed(&ast)
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        Self::from_parts(self.nodes.clone(), self.parents.clone())
    }
}

/// Structural equality; memoized data is ignored.
impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for Expression {}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: char) -> ExprBoxed {
        ExprBoxed::variable(Var::new(name))
    }

    #[test]
    fn test_from_boxed_layout() {
        // (a & b) V -c
        let boxed = ExprBoxed::or(ExprBoxed::and(var('a'), var('b')), ExprBoxed::not(var('c')));
        let expr = Expression::from_boxed(&boxed);
        for (idx, node) in expr.iter() {
            println!("- {:?} {:?} parent={:?}", idx, node, expr.parent(idx));
        }

        assert_eq!(expr.len(), 6);
        assert_eq!(expr.get(expr.root()), &Expr::Binary(BinOp::Or, Idx(1), Idx(2)));
        assert_eq!(expr.get(Idx(1)), &Expr::Binary(BinOp::And, Idx(3), Idx(4)));
        assert_eq!(expr.get(Idx(2)), &Expr::Not(Idx(5)));
        assert_eq!(expr.get(Idx(5)), &Expr::Variable(Var::new('c')));

        assert_eq!(expr.parent(expr.root()), None);
        assert_eq!(expr.parent(Idx(1)), Some(Idx(0)));
        assert_eq!(expr.parent(Idx(2)), Some(Idx(0)));
        assert_eq!(expr.parent(Idx(3)), Some(Idx(1)));
        assert_eq!(expr.parent(Idx(4)), Some(Idx(1)));
        assert_eq!(expr.parent(Idx(5)), Some(Idx(2)));
    }

    #[test]
    fn test_children_after_parents() {
        let boxed = ExprBoxed::chain(BinOp::Xor, "abcdef".chars().map(|c| ExprBoxed::not(var(c)))).unwrap();
        let expr = Expression::from(&boxed);
        for (idx, node) in expr.iter() {
            node.fmap_ref(|child| assert!(child.index() > idx.index()));
            if let Some(parent) = expr.parent(idx) {
                assert!(parent < idx);
            }
        }
    }

    #[test]
    fn test_boxed_roundtrip() {
        let boxed = ExprBoxed::binary(
            BinOp::Imply,
            ExprBoxed::not(ExprBoxed::binary(BinOp::Nand, var('x'), ExprBoxed::constant(true))),
            ExprBoxed::binary(BinOp::Eq, var('y'), ExprBoxed::xor(var('z'), var('x'))),
        );
        let expr = Expression::from_boxed(&boxed);
        assert_eq!(expr.to_boxed(), boxed);
        assert_eq!(expr.clone(), expr);
    }

    #[test]
    fn test_collapse_counts_nodes() {
        let boxed = ExprBoxed::and(var('a'), ExprBoxed::not(var('b')));
        let expr = Expression::from_boxed(&boxed);
        let count = expr.collapse(|node| match node {
            Expr::Constant(_) | Expr::Variable(_) => 1,
            Expr::Not(a) => a + 1,
            Expr::Binary(_, a, b) => a + b + 1,
        });
        assert_eq!(count, expr.len());
    }

    #[test]
    fn test_try_collapse_stops_on_error() {
        let boxed = ExprBoxed::and(var('a'), ExprBoxed::constant(false));
        let expr = Expression::from_boxed(&boxed);
        let result: Result<(), &str> = expr.try_collapse(|node| match node {
            Expr::Constant(_) => Err("constant"),
            _ => Ok(()),
        });
        assert_eq!(result, Err("constant"));
    }

    #[test]
    fn test_chain() {
        assert_eq!(ExprBoxed::chain(BinOp::And, vec![]), None);
        assert_eq!(ExprBoxed::chain(BinOp::And, vec![var('a')]), Some(var('a')));
        assert_eq!(
            ExprBoxed::chain(BinOp::Or, vec![var('a'), var('b'), var('c')]),
            Some(ExprBoxed::or(ExprBoxed::or(var('a'), var('b')), var('c')))
        );
    }

    #[test]
    fn test_precedence_levels() {
        assert_eq!(BinOp::And.precedence(), BinOp::Nand.precedence());
        assert!(BinOp::And.precedence() > BinOp::Or.precedence());
        assert!(BinOp::Nor.precedence() > BinOp::Imply.precedence());
        assert_eq!(BinOp::Xor.precedence(), BinOp::Eq.precedence());
        assert!(NOT_PRECEDENCE > BinOp::And.precedence());
        assert!(ATOM_PRECEDENCE > NOT_PRECEDENCE);

        let expr = Expression::from_boxed(&ExprBoxed::not(var('a')));
        assert_eq!(expr.precedence(expr.root()), NOT_PRECEDENCE);
        assert_eq!(expr.precedence(Idx(1)), ATOM_PRECEDENCE);
    }

    #[test]
    fn test_literal() {
        assert_eq!(ExprBoxed::literal(Var::new('a'), true), var('a'));
        assert_eq!(ExprBoxed::literal(Var::new('a'), false), ExprBoxed::not(var('a')));
    }
}
