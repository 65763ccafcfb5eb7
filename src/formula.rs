//! Formula: an expression tree together with its free inputs.

use std::fmt;
use std::str::FromStr;

use crate::ast::{EvalError, Node, Valuation};
use crate::parser::{parse_formula, FormulaError};
use crate::render::Notation;

/// A formula tree and its input names.
///
/// The inputs are collected once, at construction, by a pre-order left-to-right
/// walk that keeps the first occurrence of each name. This order is the column
/// order of truth tables built from the formula.
///
/// # Examples
///
/// ```
/// use logic_tutor::formula::Formula;
///
/// let f: Formula = "B and not (A or B)".parse().unwrap();
/// assert_eq!(f.inputs(), ["B", "A"]);
/// assert_eq!(f.evaluate(&[("A", false), ("B", true)]), Ok(false));
/// assert_eq!(f.to_latex(), "$B \\bullet \\overline{A + B}$");
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Formula {
    root: Node,
    inputs: Vec<String>,
}

impl Formula {
    pub fn new(root: Node) -> Self {
        let inputs = root.inputs();
        Self { root, inputs }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn evaluate<V: Valuation + ?Sized>(&self, valuation: &V) -> Result<bool, EvalError> {
        self.root.evaluate(valuation)
    }

    pub fn render(&self, notation: &Notation) -> String {
        self.root.render(notation)
    }

    /// LaTeX rendering wrapped in inline math delimiters.
    pub fn to_latex(&self) -> String {
        format!("${}$", self.root.to_latex())
    }
}

impl From<Node> for Formula {
    fn from(root: Node) -> Self {
        Formula::new(root)
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_formula(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
