//! Question material: random tables, distractors and answer checking.
//!
//! Two kinds of questions are supported:
//!
//! - [`WriteFormula`]: given a truth table, the learner types a formula;
//! - [`PickFormula`]: given a truth table, the learner picks the matching
//!   formula among distractors.
//!
//! Deciding which kind to ask and reporting results to a UI is left to the caller.
//!
//! ```
//! use logic_tutor::quiz::{PickFormula, QuizConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let question = PickFormula::generate(&QuizConfig::default(), &mut rng).unwrap();
//! assert_eq!(question.choices().len(), 5);
//! assert!(question.check(question.correct_index()));
//! ```

use log::{debug, warn};
use rand::Rng;

use crate::ast::Node;
use crate::formula::Formula;
use crate::parser::{parse_formula, FormulaError};
use crate::table::{TableError, TruthTable};
use crate::tweak::tweak_formula;

/// Configuration for question generation.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Input names of generated tables (default: A, B, C)
    pub inputs: Vec<String>,
    /// Number of wrong choices in a [`PickFormula`] question (default: 4)
    pub distractors: usize,
    /// Tweaks tried per distractor before falling back (default: 64)
    pub max_attempts: usize,
}

impl QuizConfig {
    /// Create a new configuration over the given inputs.
    pub fn new<S: Into<String>>(inputs: impl IntoIterator<Item = S>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            distractors: 4,
            max_attempts: 64,
        }
    }

    /// Set the number of distractors.
    pub fn with_distractors(mut self, distractors: usize) -> Self {
        self.distractors = distractors;
        self
    }

    /// Set the retry cap of the distractor search.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new(["A", "B", "C"])
    }
}

/// Tweaks `correct` until the result no longer matches `table`, skipping `taken` formulas.
fn search<R: Rng + ?Sized>(
    table: &TruthTable,
    correct: &Formula,
    taken: &[Formula],
    max_attempts: usize,
    rng: &mut R,
) -> Option<Formula> {
    for attempt in 1..=max_attempts {
        let candidate = tweak_formula(correct, rng);
        if !table.verify(&candidate) && !taken.contains(&candidate) {
            debug!("distractor {} found after {} attempt(s)", candidate, attempt);
            return Some(candidate);
        }
    }
    None
}

/// The negation of `formula`, cancelling an outer `not` instead of stacking one.
fn negated(formula: &Formula) -> Formula {
    match formula.root() {
        Node::Not(child) => Formula::new((**child).clone()),
        root => Formula::new(Node::not(root.clone())),
    }
}

/// Finds a formula close to `correct` that does not match `table`.
///
/// At most `max_attempts` tweaks are tried. When all of them are equivalent
/// to `correct`, the negation of `correct` is returned, which disagrees with
/// the table on every row as long as `correct` matches it.
pub fn find_distractor<R: Rng + ?Sized>(
    table: &TruthTable,
    correct: &Formula,
    max_attempts: usize,
    rng: &mut R,
) -> Formula {
    search(table, correct, &[], max_attempts, rng).unwrap_or_else(|| {
        warn!(
            "no distractor for {} in {} attempts, negating it",
            correct, max_attempts
        );
        negated(correct)
    })
}

/// "Write the formula for this truth table."
#[derive(Debug, Clone)]
pub struct WriteFormula {
    table: TruthTable,
}

impl WriteFormula {
    pub fn new(table: TruthTable) -> Self {
        Self { table }
    }

    /// A question over a random table.
    pub fn generate<R: Rng + ?Sized>(config: &QuizConfig, rng: &mut R) -> Result<Self, TableError> {
        let table = TruthTable::random(config.inputs.clone(), rng)?;
        Ok(Self::new(table))
    }

    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    /// A model answer.
    pub fn answer(&self) -> Formula {
        self.table.synthesize()
    }

    /// Checks a typed answer.
    ///
    /// Text that does not parse is an `Err`; a formula that does not match the
    /// table (including one using unknown inputs) is `Ok(false)`.
    pub fn check(&self, text: &str) -> Result<bool, FormulaError> {
        let formula = parse_formula(text)?;
        Ok(self.table.verify(&formula))
    }
}

/// "Which formula matches this truth table?"
#[derive(Debug, Clone)]
pub struct PickFormula {
    table: TruthTable,
    choices: Vec<Formula>,
    correct: usize,
}

impl PickFormula {
    /// Builds the choices for `table`: its synthesized formula and
    /// `config.distractors` non-matching variants, in random order.
    pub fn from_table<R: Rng + ?Sized>(table: TruthTable, config: &QuizConfig, rng: &mut R) -> Self {
        let answer = table.synthesize();
        let mut choices: Vec<Formula> = Vec::with_capacity(config.distractors + 1);
        while choices.len() < config.distractors {
            let distractor = match search(&table, &answer, &choices, config.max_attempts, rng) {
                Some(distractor) => distractor,
                None => {
                    warn!(
                        "no new distractor for {} in {} attempts",
                        answer, config.max_attempts
                    );
                    find_distractor(&table, &answer, config.max_attempts, rng)
                }
            };
            choices.push(distractor);
        }
        let correct = rng.random_range(0..=choices.len());
        choices.insert(correct, answer);
        Self {
            table,
            choices,
            correct,
        }
    }

    /// A question over a random table.
    pub fn generate<R: Rng + ?Sized>(config: &QuizConfig, rng: &mut R) -> Result<Self, TableError> {
        let table = TruthTable::random(config.inputs.clone(), rng)?;
        Ok(Self::from_table(table, config, rng))
    }

    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    pub fn choices(&self) -> &[Formula] {
        &self.choices
    }

    pub fn correct_index(&self) -> usize {
        self.correct
    }

    pub fn answer(&self) -> &Formula {
        &self.choices[self.correct]
    }

    /// Whether the choice at `index` is the right one.
    pub fn check(&self, index: usize) -> bool {
        index == self.correct
    }
}
