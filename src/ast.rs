//! Expression tree for propositional formulas.
//!
//! A formula is a tree of [`Node`]s: constants and named inputs at the leaves,
//! n-ary conjunctions and disjunctions, and negations.
//!
//! The [`NodeKind`] ordering `Or < And < Not < Input < Const` doubles as the
//! binding precedence: `or` binds loosest, `not` tightest, and leaves never need
//! parentheses.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Node kind, ordered by binding precedence.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum NodeKind {
    Or,
    And,
    Not,
    Input,
    Const,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Or => "or",
            NodeKind::And => "and",
            NodeKind::Not => "not",
            NodeKind::Input => "input",
            NodeKind::Const => "const",
        };
        write!(f, "{}", name)
    }
}

/// Associative binary connective.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum BinaryOp {
    Or,
    And,
}

impl BinaryOp {
    pub fn kind(self) -> NodeKind {
        match self {
            BinaryOp::Or => NodeKind::Or,
            BinaryOp::And => NodeKind::And,
        }
    }
}

/// Formula tree node.
///
/// # Invariants
///
/// - `Binary` nodes have at least two children.
/// - `Input` names match `[A-Za-z_][A-Za-z0-9_-]*`.
///
/// Cloning performs a full deep copy.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Node {
    Const(bool),
    Input(String),
    Binary(BinaryOp, Vec<Node>),
    Not(Box<Node>),
}

impl Node {
    pub fn input(name: impl Into<String>) -> Self {
        Node::Input(name.into())
    }

    pub fn not(child: Node) -> Self {
        Node::Not(Box::new(child))
    }

    pub fn and(children: Vec<Node>) -> Self {
        Node::Binary(BinaryOp::And, children)
    }

    pub fn or(children: Vec<Node>) -> Self {
        Node::Binary(BinaryOp::Or, children)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Const(_) => NodeKind::Const,
            Node::Input(_) => NodeKind::Input,
            Node::Binary(op, _) => op.kind(),
            Node::Not(_) => NodeKind::Not,
        }
    }

    /// Direct children, left to right.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Const(_) | Node::Input(_) => &[],
            Node::Binary(_, children) => children,
            Node::Not(child) => std::slice::from_ref(&**child),
        }
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Node::Const(_) | Node::Input(_) => &mut [],
            Node::Binary(_, children) => children,
            Node::Not(child) => std::slice::from_mut(&mut **child),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Node::size).sum::<usize>()
    }

    /// Depth of the tree (0 for leaves).
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|c| 1 + c.depth())
            .max()
            .unwrap_or(0)
    }

    /// Input names in pre-order, left to right, first occurrence only.
    pub fn inputs(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Input(name) => {
                    if !seen.contains(name) {
                        seen.push(name.clone());
                    }
                }
                _ => stack.extend(node.children().iter().rev()),
            }
        }
        seen
    }

    /// Evaluates the tree under the given valuation.
    ///
    /// Conjunctions and disjunctions short-circuit, so an input that is missing
    /// from the valuation is only reported if it is actually reached.
    pub fn evaluate<V: Valuation + ?Sized>(&self, valuation: &V) -> Result<bool, EvalError> {
        match self {
            Node::Const(value) => Ok(*value),
            Node::Input(name) => valuation
                .value(name)
                .ok_or_else(|| EvalError::MissingInput { name: name.clone() }),
            Node::Binary(op, children) => {
                if children.len() < 2 {
                    return Err(EvalError::InvalidArity {
                        kind: op.kind(),
                        found: children.len(),
                    });
                }
                // `and` stops at the first false child, `or` at the first true one.
                let stop = matches!(op, BinaryOp::Or);
                for child in children {
                    if child.evaluate(valuation)? == stop {
                        return Ok(stop);
                    }
                }
                Ok(!stop)
            }
            Node::Not(child) => Ok(!child.evaluate(valuation)?),
        }
    }
}

/// Source of input values for evaluation.
pub trait Valuation {
    fn value(&self, name: &str) -> Option<bool>;
}

impl Valuation for HashMap<String, bool> {
    fn value(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Valuation for HashMap<&str, bool> {
    fn value(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Valuation for BTreeMap<String, bool> {
    fn value(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl Valuation for [(&str, bool)] {
    fn value(&self, name: &str) -> Option<bool> {
        self.iter().find(|(n, _)| *n == name).map(|&(_, v)| v)
    }
}

impl<const N: usize> Valuation for [(&str, bool); N] {
    fn value(&self, name: &str) -> Option<bool> {
        self.as_slice().value(name)
    }
}

/// Error type for evaluation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EvalError {
    /// The valuation has no value for this input.
    MissingInput { name: String },
    /// A connective has an impossible number of children.
    InvalidArity { kind: NodeKind, found: usize },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::MissingInput { name } => write!(f, "missing value for input {}", name),
            EvalError::InvalidArity { kind, found } => {
                write!(f, "'{}' node has {} children", kind, found)
            }
        }
    }
}

impl std::error::Error for EvalError {}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn a() -> Node {
        Node::input("A")
    }
    fn b() -> Node {
        Node::input("B")
    }

    #[test]
    fn test_kind_order_is_precedence() {
        assert!(NodeKind::Or < NodeKind::And);
        assert!(NodeKind::And < NodeKind::Not);
        assert!(NodeKind::Not < NodeKind::Input);
        assert!(NodeKind::Input < NodeKind::Const);
        assert!(BinaryOp::Or < BinaryOp::And);
    }

    #[test]
    fn test_evaluate_and() {
        let f = Node::and(vec![a(), b()]);
        assert_eq!(f.evaluate(&[("A", true), ("B", false)]), Ok(false));
        assert_eq!(f.evaluate(&[("A", true), ("B", true)]), Ok(true));
    }

    #[test]
    fn test_evaluate_or_not() {
        let f = Node::not(Node::or(vec![a(), b()]));
        assert_eq!(f.evaluate(&[("A", false), ("B", false)]), Ok(true));
        assert_eq!(f.evaluate(&[("A", false), ("B", true)]), Ok(false));
    }

    #[test]
    fn test_evaluate_with_maps() {
        let f = Node::or(vec![a(), Node::Const(false)]);
        let mut values: HashMap<String, bool> = HashMap::new();
        values.insert("A".to_string(), true);
        assert_eq!(f.evaluate(&values), Ok(true));

        let values: BTreeMap<String, bool> = [("A".to_string(), false)].into_iter().collect();
        assert_eq!(f.evaluate(&values), Ok(false));
    }

    #[test]
    fn test_missing_input() {
        let f = Node::and(vec![a(), b()]);
        assert_eq!(
            f.evaluate(&[("A", true)]),
            Err(EvalError::MissingInput {
                name: "B".to_string()
            })
        );
    }

    #[test]
    fn test_short_circuit_skips_missing_input() {
        let f = Node::and(vec![a(), b()]);
        assert_eq!(f.evaluate(&[("A", false)]), Ok(false));
        let f = Node::or(vec![a(), b()]);
        assert_eq!(f.evaluate(&[("A", true)]), Ok(true));
    }

    #[test]
    fn test_invalid_arity() {
        let f = Node::or(vec![a()]);
        assert_eq!(
            f.evaluate(&[("A", true)]),
            Err(EvalError::InvalidArity {
                kind: NodeKind::Or,
                found: 1
            })
        );
    }

    #[test]
    fn test_inputs_order() {
        // (C and A) or not (B and C) or A
        let f = Node::or(vec![
            Node::and(vec![Node::input("C"), a()]),
            Node::not(Node::and(vec![b(), Node::input("C")])),
            Node::Const(true),
            a(),
        ]);
        assert_eq!(f.inputs(), ["C", "A", "B"]);
        assert!(Node::Const(true).inputs().is_empty());
    }

    #[test]
    fn test_size_and_depth() {
        let f = Node::not(Node::and(vec![a(), Node::not(b())]));
        assert_eq!(f.size(), 5);
        assert_eq!(f.depth(), 3);
        assert_eq!(a().depth(), 0);
        assert_eq!(f.children().len(), 1);
        assert!(a().children().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Node::and(vec![a(), b()]);
        let mut copy = original.clone();
        if let Node::Binary(_, children) = &mut copy {
            children[0] = Node::not(a());
        }
        assert_eq!(original, Node::and(vec![a(), b()]));
        assert_ne!(original, copy);
    }
}
