//! # logic-tutor: a boolean formula kernel for teaching
//!
//! **`logic-tutor`** parses propositional formulas written with `and`, `or` and `not`,
//! evaluates them, renders them as text or LaTeX, enumerates truth tables,
//! synthesizes a canonical formula from a truth table, and mutates formulas into
//! plausible-but-wrong variants for multiple-choice quizzes.
//!
//! ## Key Features
//!
//! - **Precedence parser**: `and` binds tighter than `or`, `not` tighter than both; keywords are case-insensitive.
//! - **Closed expression tree**: [`Node`][crate::ast::Node] is a plain enum, so evaluation and rendering are exhaustive matches.
//! - **Truth tables**: enumeration in binary-counting order, verification that never fails, and two-level synthesis.
//! - **Distractors**: single negation toggles with an injected random source, plus a bounded search for non-equivalent ones.
//!
//! ## Basic Usage
//!
//! ```rust
//! use logic_tutor::parser::parse_formula;
//! use logic_tutor::table::TruthTable;
//!
//! // 1. Parse a formula
//! let f = parse_formula("not (A or B)").unwrap();
//! assert_eq!(f.to_latex(), "$\\overline{A + B}$");
//!
//! // 2. Evaluate it
//! assert_eq!(f.evaluate(&[("A", false), ("B", false)]), Ok(true));
//!
//! // 3. Build its truth table
//! let table = TruthTable::from_formula(&f).unwrap();
//! assert_eq!(table.len(), 4);
//!
//! // 4. Synthesize a canonical formula back and check it
//! let g = table.synthesize();
//! assert_eq!(g.to_string(), "not A and not B");
//! assert!(table.verify(&g));
//! ```
//!
//! ## Core Components
//!
//! - **[`lexer`]** and **[`parser`]**: text to tree.
//! - **[`ast`]**, **[`render`]** and **[`formula`]**: the tree, its evaluation and its notation.
//! - **[`table`]**: truth tables.
//! - **[`tweak`]** and **[`quiz`]**: distractors and question material.
//!
//! The library does not install a logger; it reports through the [`log`] facade.

pub mod ast;
pub mod formula;
pub mod lexer;
pub mod parser;
pub mod quiz;
pub mod render;
pub mod table;
pub mod tweak;

pub use ast::{EvalError, Node, NodeKind, Valuation};
pub use formula::Formula;
pub use parser::{parse_formula, FormulaError, ParseError, ParseErrorKind};
pub use table::TruthTable;
pub use tweak::tweak_formula;
