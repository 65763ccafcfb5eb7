//! Text and LaTeX rendering of formula trees.
//!
//! Rendering is driven by a [`Notation`], which names the symbols used for each
//! connective. A child is parenthesized iff its [`NodeKind`] is lower than its
//! parent's, so `and` nested in `or` never needs parentheses while `or` nested
//! in `and` (or anything nested in `not`) does.
//!
//! # Examples
//!
//! ```
//! use logic_tutor::ast::Node;
//! use logic_tutor::render::Notation;
//!
//! let f = Node::not(Node::or(vec![Node::input("A"), Node::input("B")]));
//! assert_eq!(f.to_string(), "not (A or B)");
//! assert_eq!(f.to_latex(), "\\overline{A + B}");
//! assert_eq!(f.render(&Notation::SYMBOLIC), "¬(A ∨ B)");
//! ```

use std::fmt::{self, Write};

use crate::ast::{BinaryOp, Node, NodeKind};

/// Symbols used when rendering a formula.
///
/// Use one of the presets ([`Notation::TEXT`], [`Notation::LATEX`],
/// [`Notation::SYMBOLIC`]) or build a custom one:
///
/// ```
/// use logic_tutor::ast::Node;
/// use logic_tutor::render::Notation;
///
/// let notation = Notation {
///     and: " & ",
///     or: " | ",
///     not_open: "!",
///     ..Notation::TEXT
/// };
/// let f = Node::and(vec![Node::input("A"), Node::not(Node::input("B"))]);
/// assert_eq!(f.render(&notation), "A & !B");
/// ```
#[derive(Debug, Clone)]
pub struct Notation {
    /// Infix conjunction, including surrounding spaces (default: " and ")
    pub and: &'static str,
    /// Infix disjunction, including surrounding spaces (default: " or ")
    pub or: &'static str,
    /// Emitted before a negated operand (default: "not ")
    pub not_open: &'static str,
    /// Emitted after a negated operand (default: "")
    pub not_close: &'static str,
    /// Whether a negated compound operand gets parentheses (default: true)
    pub parenthesize_negated: bool,
    /// Constant true (default: "true")
    pub true_literal: &'static str,
    /// Constant false (default: "false")
    pub false_literal: &'static str,
}

impl Notation {
    /// Keyword notation, accepted back by the parser.
    pub const TEXT: Notation = Notation {
        and: " and ",
        or: " or ",
        not_open: "not ",
        not_close: "",
        parenthesize_negated: true,
        true_literal: "true",
        false_literal: "false",
    };

    /// Typeset notation. The overline spans its operand, so it never needs parentheses.
    pub const LATEX: Notation = Notation {
        and: " \\bullet ",
        or: " + ",
        not_open: "\\overline{",
        not_close: "}",
        parenthesize_negated: false,
        true_literal: "true",
        false_literal: "false",
    };

    /// Unicode logic symbols.
    pub const SYMBOLIC: Notation = Notation {
        and: " ∧ ",
        or: " ∨ ",
        not_open: "¬",
        not_close: "",
        parenthesize_negated: true,
        true_literal: "⊤",
        false_literal: "⊥",
    };

    fn infix(&self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::And => self.and,
            BinaryOp::Or => self.or,
        }
    }
}

impl Default for Notation {
    fn default() -> Self {
        Notation::TEXT
    }
}

impl Node {
    /// Renders the tree using the given notation.
    pub fn render(&self, notation: &Notation) -> String {
        let mut out = String::new();
        // Writing into a `String` never fails.
        let _ = self.write_with(&mut out, notation);
        out
    }

    pub fn to_latex(&self) -> String {
        self.render(&Notation::LATEX)
    }

    /// Writes the tree into any formatter sink.
    pub fn write_with<W: Write>(&self, out: &mut W, notation: &Notation) -> fmt::Result {
        match self {
            Node::Const(value) => {
                let literal = if *value {
                    notation.true_literal
                } else {
                    notation.false_literal
                };
                out.write_str(literal)
            }
            Node::Input(name) => out.write_str(name),
            Node::Binary(op, children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.write_str(notation.infix(*op))?;
                    }
                    write_operand(out, child, op.kind(), true, notation)?;
                }
                Ok(())
            }
            Node::Not(child) => {
                out.write_str(notation.not_open)?;
                write_operand(
                    out,
                    child,
                    NodeKind::Not,
                    notation.parenthesize_negated,
                    notation,
                )?;
                out.write_str(notation.not_close)
            }
        }
    }
}

fn write_operand<W: Write>(
    out: &mut W,
    child: &Node,
    parent: NodeKind,
    parenthesize: bool,
    notation: &Notation,
) -> fmt::Result {
    if parenthesize && child.kind() < parent {
        out.write_char('(')?;
        child.write_with(out, notation)?;
        out.write_char(')')
    } else {
        child.write_with(out, notation)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, &Notation::TEXT)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn var(name: &str) -> Node {
        Node::input(name)
    }

    #[test]
    fn test_and_inside_or_needs_no_parens() {
        let f = Node::or(vec![Node::and(vec![var("A"), var("B")]), var("C")]);
        assert_eq!(f.to_string(), "A and B or C");
        assert_eq!(f.to_latex(), "A \\bullet B + C");
    }

    #[test]
    fn test_or_inside_and_is_parenthesized() {
        let f = Node::and(vec![Node::or(vec![var("A"), var("B")]), var("C")]);
        assert_eq!(f.to_string(), "(A or B) and C");
        assert_eq!(f.to_latex(), "(A + B) \\bullet C");
    }

    #[test]
    fn test_not_rendering() {
        let f = Node::not(Node::or(vec![var("A"), var("B")]));
        assert_eq!(f.to_string(), "not (A or B)");
        assert_eq!(f.to_latex(), "\\overline{A + B}");

        let f = Node::not(Node::not(var("A")));
        assert_eq!(f.to_string(), "not not A");
        assert_eq!(f.to_latex(), "\\overline{\\overline{A}}");

        let f = Node::and(vec![Node::not(var("A")), var("B")]);
        assert_eq!(f.to_string(), "not A and B");
        assert_eq!(f.to_latex(), "\\overline{A} \\bullet B");
    }

    #[test]
    fn test_constants() {
        let f = Node::or(vec![Node::Const(true), Node::not(Node::Const(false))]);
        assert_eq!(f.to_string(), "true or not false");
        assert_eq!(f.render(&Notation::SYMBOLIC), "⊤ ∨ ¬⊥");
    }

    #[test]
    fn test_nary_children() {
        let f = Node::and(vec![var("A"), var("B"), var("C")]);
        assert_eq!(f.to_string(), "A and B and C");
        assert_eq!(f.render(&Notation::default()), "A and B and C");
    }

    #[test]
    fn test_same_kind_child_is_not_parenthesized() {
        let f = Node::or(vec![Node::or(vec![var("A"), var("B")]), var("C")]);
        assert_eq!(f.to_string(), "A or B or C");
    }
}
