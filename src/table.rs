//! Truth tables: enumeration, verification and canonical synthesis.
//!
//! A [`TruthTable`] lists one output per assignment of a fixed, ordered set of
//! inputs. Rows follow binary counting with the **first** input as the most
//! significant bit:
//!
//! ```text
//!  A B | out
//!  0 0 |  .
//!  0 1 |  .
//!  1 0 |  .
//!  1 1 |  .
//! ```
//!
//! [`TruthTable::synthesize`] goes the other way and builds a two-level formula
//! from the table: an OR of minterms over the true rows, or, when true rows are
//! the majority, the negation of an OR of minterms over the false rows.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use log::debug;
use rand::Rng;

use crate::ast::{EvalError, Node, Valuation};
use crate::formula::Formula;
use crate::lexer::is_identifier;

/// Error type for building truth tables.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TableError {
    /// An input name is not a writable identifier (or is a keyword).
    InvalidInput { name: String },
    /// An input name appears twice in the header.
    DuplicateInput { name: String },
    /// A row has the wrong number of input values.
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The table does not have `2^k` rows.
    RowCount { expected: usize, found: usize },
    /// Two rows have the same assignment.
    DuplicateRow { row: usize },
    /// `2^k` rows cannot be addressed.
    TooManyInputs { count: usize },
    /// The formula could not be evaluated on some row.
    Eval(EvalError),
}

impl From<EvalError> for TableError {
    fn from(e: EvalError) -> Self {
        TableError::Eval(e)
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidInput { name } => write!(f, "invalid input name {:?}", name),
            TableError::DuplicateInput { name } => write!(f, "duplicate input {}", name),
            TableError::RowWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} values, expected {}",
                row, found, expected
            ),
            TableError::RowCount { expected, found } => {
                write!(f, "table has {} rows, expected {}", found, expected)
            }
            TableError::DuplicateRow { row } => write!(f, "row {} repeats an assignment", row),
            TableError::TooManyInputs { count } => write!(f, "too many inputs: {}", count),
            TableError::Eval(e) => write!(f, "evaluation failed: {}", e),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Eval(e) => Some(e),
            _ => None,
        }
    }
}

/// One row: input values (aligned with the table inputs) and the output.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TruthTableRow {
    pub values: Vec<bool>,
    pub output: bool,
}

impl TruthTableRow {
    pub fn new(values: Vec<bool>, output: bool) -> Self {
        Self { values, output }
    }
}

/// A row seen as a name-to-value mapping.
#[derive(Debug, Copy, Clone)]
pub struct RowValuation<'a> {
    inputs: &'a [String],
    values: &'a [bool],
}

impl RowValuation<'_> {
    pub fn to_map(&self) -> HashMap<String, bool> {
        self.inputs
            .iter()
            .cloned()
            .zip(self.values.iter().copied())
            .collect()
    }
}

impl Valuation for RowValuation<'_> {
    fn value(&self, name: &str) -> Option<bool> {
        self.inputs
            .iter()
            .position(|input| input == name)
            .and_then(|i| self.values.get(i).copied())
    }
}

/// Complete truth table over an ordered set of inputs.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TruthTable {
    inputs: Vec<String>,
    rows: Vec<TruthTableRow>,
}

/// Number of rows for `k` inputs.
fn row_count(k: usize) -> Result<usize, TableError> {
    if k >= usize::BITS as usize {
        return Err(TableError::TooManyInputs { count: k });
    }
    Ok(1usize << k)
}

/// Values of the `index`-th assignment of `k` inputs; the first input is the MSB.
fn assignment(index: usize, k: usize) -> Vec<bool> {
    (0..k).map(|j| (index >> (k - 1 - j)) & 1 == 1).collect()
}

/// Validates header names and returns the row count.
fn check_inputs(inputs: &[String]) -> Result<usize, TableError> {
    for (i, name) in inputs.iter().enumerate() {
        if !is_identifier(name) {
            return Err(TableError::InvalidInput { name: name.clone() });
        }
        if inputs[..i].contains(name) {
            return Err(TableError::DuplicateInput { name: name.clone() });
        }
    }
    row_count(inputs.len())
}

impl TruthTable {
    /// Builds a table from explicit rows, in any order.
    ///
    /// The rows must cover every assignment of the inputs exactly once.
    pub fn new(inputs: Vec<String>, rows: Vec<TruthTableRow>) -> Result<Self, TableError> {
        let expected = check_inputs(&inputs)?;
        for (i, row) in rows.iter().enumerate() {
            if row.values.len() != inputs.len() {
                return Err(TableError::RowWidth {
                    row: i,
                    expected: inputs.len(),
                    found: row.values.len(),
                });
            }
        }
        if rows.len() != expected {
            return Err(TableError::RowCount {
                expected,
                found: rows.len(),
            });
        }
        for (i, row) in rows.iter().enumerate() {
            if rows[..i].iter().any(|r| r.values == row.values) {
                return Err(TableError::DuplicateRow { row: i });
            }
        }
        Ok(Self { inputs, rows })
    }

    /// Builds a table from outputs listed in binary-counting order.
    pub fn from_outputs(inputs: Vec<String>, outputs: Vec<bool>) -> Result<Self, TableError> {
        let expected = check_inputs(&inputs)?;
        if outputs.len() != expected {
            return Err(TableError::RowCount {
                expected,
                found: outputs.len(),
            });
        }
        let k = inputs.len();
        let rows = outputs
            .into_iter()
            .enumerate()
            .map(|(i, output)| TruthTableRow::new(assignment(i, k), output))
            .collect();
        Ok(Self { inputs, rows })
    }

    /// Builds a table with uniformly random outputs.
    pub fn random<R: Rng + ?Sized>(inputs: Vec<String>, rng: &mut R) -> Result<Self, TableError> {
        let count = check_inputs(&inputs)?;
        let outputs = (0..count).map(|_| rng.random_bool(0.5)).collect();
        Self::from_outputs(inputs, outputs)
    }

    /// Enumerates every assignment of the formula's inputs and evaluates it.
    ///
    /// ```
    /// use logic_tutor::formula::Formula;
    /// use logic_tutor::table::TruthTable;
    ///
    /// let f: Formula = "A and not B".parse().unwrap();
    /// let table = TruthTable::from_formula(&f).unwrap();
    /// let outputs: Vec<bool> = table.rows().iter().map(|r| r.output).collect();
    /// assert_eq!(outputs, [false, false, true, false]);
    /// ```
    pub fn from_formula(formula: &Formula) -> Result<Self, TableError> {
        let inputs = formula.inputs().to_vec();
        let k = inputs.len();
        let count = row_count(k)?;
        let mut rows = Vec::with_capacity(count);
        for i in 0..count {
            let values = assignment(i, k);
            let valuation = RowValuation {
                inputs: &inputs,
                values: &values,
            };
            let output = formula.evaluate(&valuation)?;
            rows.push(TruthTableRow::new(values, output));
        }
        debug!("from_formula({}) -> {} rows", formula, rows.len());
        Ok(Self { inputs, rows })
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The input values of row `index`, as a valuation.
    pub fn valuation(&self, index: usize) -> RowValuation<'_> {
        RowValuation {
            inputs: &self.inputs,
            values: &self.rows[index].values,
        }
    }

    /// Iterates over `(valuation, output)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (RowValuation<'_>, bool)> + '_ {
        self.rows.iter().map(move |row| {
            let valuation = RowValuation {
                inputs: &self.inputs,
                values: &row.values,
            };
            (valuation, row.output)
        })
    }

    pub fn true_count(&self) -> usize {
        self.rows.iter().filter(|row| row.output).count()
    }

    pub fn false_count(&self) -> usize {
        self.rows.len() - self.true_count()
    }

    /// Number of minterms in the synthesized formula.
    pub fn term_count(&self) -> usize {
        self.true_count().min(self.false_count())
    }

    /// Checks that the formula reproduces every row.
    ///
    /// Evaluation failures (for example, an input the table does not have)
    /// count as a mismatch.
    pub fn verify(&self, formula: &Formula) -> bool {
        for (i, (valuation, output)) in self.iter().enumerate() {
            match formula.evaluate(&valuation) {
                Ok(value) if value == output => {}
                Ok(_) => {
                    debug!("verify({}): mismatch on row {}", formula, i);
                    return false;
                }
                Err(e) => {
                    debug!("verify({}): row {}: {}", formula, i, e);
                    return false;
                }
            }
        }
        true
    }

    /// Builds a canonical two-level formula for the table.
    ///
    /// With at most as many true rows as false rows, the result is the OR of the
    /// minterms of the true rows. Otherwise it is the negated OR of the minterms
    /// of the false rows. Either way it has [`term_count`](Self::term_count)
    /// minterms.
    ///
    /// ```
    /// use logic_tutor::table::TruthTable;
    ///
    /// let inputs = vec!["A".to_string(), "B".to_string()];
    /// let xor = TruthTable::from_outputs(inputs, vec![false, true, true, false]).unwrap();
    /// let f = xor.synthesize();
    /// assert_eq!(f.to_string(), "not A and B or A and not B");
    /// assert!(xor.verify(&f));
    /// ```
    pub fn synthesize(&self) -> Formula {
        let true_rows = self.true_count();
        let false_rows = self.false_count();
        let flipped = true_rows > false_rows;
        debug!(
            "synthesize: {} true rows, {} false rows, flipped = {}",
            true_rows, false_rows, flipped
        );

        let mut terms: Vec<Node> = self
            .rows
            .iter()
            .filter(|row| row.output != flipped)
            .map(|row| self.minterm(&row.values))
            .collect();

        let root = match (terms.len(), flipped) {
            // All rows are true.
            (0, true) => Node::Const(true),
            (0, false) => Node::Const(false),
            (1, _) => {
                let term = terms.remove(0);
                if flipped {
                    Node::not(term)
                } else {
                    term
                }
            }
            (_, false) => Node::or(terms),
            (_, true) => Node::not(Node::or(terms)),
        };
        Formula::new(root)
    }

    fn minterm(&self, values: &[bool]) -> Node {
        let mut literals: Vec<Node> = self
            .inputs
            .iter()
            .zip(values)
            .map(|(name, &value)| {
                let input = Node::input(name.as_str());
                if value {
                    input
                } else {
                    Node::not(input)
                }
            })
            .collect();
        match literals.len() {
            0 => Node::Const(true),
            1 => literals.remove(0),
            _ => Node::and(literals),
        }
    }
}

impl Index<usize> for TruthTable {
    type Output = TruthTableRow;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self.inputs.iter().map(|name| name.len()).collect();
        for name in &self.inputs {
            write!(f, "{} ", name)?;
        }
        writeln!(f, "| out")?;
        for row in &self.rows {
            for (value, width) in row.values.iter().zip(&widths) {
                write!(f, "{:>width$} ", *value as u8, width = width)?;
            }
            writeln!(f, "| {}", row.output as u8)?;
        }
        Ok(())
    }
}
