//! Operator-precedence parser for formulas.
//!
//! The parser keeps an explicit stack of frames, one per open parenthesis (the
//! root frame is depth 0). Each frame collects a flat list of operands and the
//! binary operators between them. When a frame closes, it is *reduced*: the
//! operator with the highest precedence (`and` over `or`) is applied first,
//! leftmost on ties, until a single node remains.
//!
//! ```text
//! A and B or C and D     operands [A, B, C, D], operators [and, or, and]
//!   -> (A and B) or C and D
//!   -> (A and B) or (C and D)
//!   -> ((A and B) or (C and D))
//! ```
//!
//! A `not` does not create an operand by itself. Each frame counts pending
//! negations, and the next operand that arrives is wrapped in that many `Not`
//! nodes, so `not not A` is `Not(Not(A))`.

use std::fmt;

use log::{debug, trace};

use crate::ast::{BinaryOp, Node};
use crate::formula::Formula;
use crate::lexer::{tokenize, LexError, Token};

/// What went wrong while parsing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// The input has no tokens.
    EmptyInput,
    /// An operand (or `not`, or `(`) where an operator was expected.
    UnexpectedOperand,
    /// An operator where an operand was expected.
    UnexpectedOperator,
    /// The operand and operator counts of a group do not match.
    Unbalanced,
    /// A group ends with an operator or a `not`.
    TrailingOperator,
    /// A `)` without a matching `(`.
    UnbalancedParens,
    /// A `(` still open at the end of the input.
    ParenthesisMismatch,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ParseErrorKind::EmptyInput => "empty input",
            ParseErrorKind::UnexpectedOperand => "expected an operator, but got an operand",
            ParseErrorKind::UnexpectedOperator => "expected an operand, but got an operator",
            ParseErrorKind::Unbalanced => "unbalanced operators and operands",
            ParseErrorKind::TrailingOperator => "operand missing after operator",
            ParseErrorKind::UnbalancedParens => "unexpected closing parenthesis",
            ParseErrorKind::ParenthesisMismatch => "unclosed parenthesis",
        };
        f.write_str(message)
    }
}

/// Parse error, located at the offending token.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)
    }
}

impl std::error::Error for ParseError {}

/// Error type for turning text into a formula.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormulaError {
    Lex(LexError),
    Parse(ParseError),
}

impl FormulaError {
    pub fn position(&self) -> usize {
        match self {
            FormulaError::Lex(e) => e.position,
            FormulaError::Parse(e) => e.position,
        }
    }
}

impl From<LexError> for FormulaError {
    fn from(e: LexError) -> Self {
        FormulaError::Lex(e)
    }
}

impl From<ParseError> for FormulaError {
    fn from(e: ParseError) -> Self {
        FormulaError::Parse(e)
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::Lex(e) => write!(f, "Lexer error: {}", e),
            FormulaError::Parse(e) => write!(f, "Parser error: {}", e),
        }
    }
}

impl std::error::Error for FormulaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormulaError::Lex(e) => Some(e),
            FormulaError::Parse(e) => Some(e),
        }
    }
}

/// Parses text into a [`Formula`].
///
/// The words `and`, `or`, `not`, `true` and `false` are keywords in any
/// letter case, so no input can be named after them; `true` and `false`
/// parse to constants.
///
/// ```
/// use logic_tutor::parser::parse_formula;
///
/// let f = parse_formula("A and B or C").unwrap();
/// assert_eq!(f.to_string(), "A and B or C");
/// assert_eq!(f.inputs(), ["A", "B", "C"]);
///
/// let t = parse_formula("TRUE").unwrap();
/// assert!(t.inputs().is_empty());
/// ```
pub fn parse_formula(text: &str) -> Result<Formula, FormulaError> {
    let tokens = tokenize(text)?;
    let root = parse_tokens(&tokens)?;
    Ok(Formula::new(root))
}

/// Parses a token sequence into a tree.
pub fn parse_tokens(tokens: &[Token<'_>]) -> Result<Node, ParseError> {
    let last = match tokens.last() {
        Some(token) => token.position,
        None => return Err(ParseError::new(0, ParseErrorKind::EmptyInput)),
    };

    let mut parser = Parser::new();
    for token in tokens {
        parser.feed(token)?;
    }
    parser.finish(last)
}

#[derive(Debug, Default)]
struct Frame {
    operands: Vec<Node>,
    operators: Vec<BinaryOp>,
    expect_operator: bool,
    pending_nots: usize,
}

impl Frame {
    fn is_empty(&self) -> bool {
        self.operands.is_empty() && self.operators.is_empty() && self.pending_nots == 0
    }

    fn reduce(mut self, position: usize) -> Result<Node, ParseError> {
        if !self.expect_operator {
            let kind = if self.is_empty() {
                ParseErrorKind::Unbalanced
            } else {
                ParseErrorKind::TrailingOperator
            };
            return Err(ParseError::new(position, kind));
        }
        if self.operands.len() != self.operators.len() + 1 {
            return Err(ParseError::new(position, ParseErrorKind::Unbalanced));
        }

        loop {
            let op = match self.operators.iter().max() {
                Some(&op) => op,
                None => break,
            };
            // `position` finds the leftmost of the equally strong operators.
            let idx = self
                .operators
                .iter()
                .position(|&o| o == op)
                .unwrap_or_default();
            trace!("reduce: '{}' at index {}", op.kind(), idx);
            self.operators.remove(idx);
            let rhs = self.operands.remove(idx + 1);
            let lhs = self.operands.remove(idx);
            self.operands.insert(idx, Node::Binary(op, vec![lhs, rhs]));
        }

        match self.operands.pop() {
            Some(node) => Ok(node),
            None => Err(ParseError::new(position, ParseErrorKind::Unbalanced)),
        }
    }
}

struct Parser {
    root: Frame,
    /// One frame per open parenthesis, innermost last.
    groups: Vec<Frame>,
}

impl Parser {
    fn new() -> Self {
        Self {
            root: Frame::default(),
            groups: Vec::new(),
        }
    }

    fn frame(&mut self) -> &mut Frame {
        match self.groups.last_mut() {
            Some(frame) => frame,
            None => &mut self.root,
        }
    }

    fn feed(&mut self, token: &Token<'_>) -> Result<(), ParseError> {
        let position = token.position;
        if token.is_open() {
            return self.open(position);
        }
        if token.is_close() {
            return self.close(position);
        }

        let word = token.text;
        if word.eq_ignore_ascii_case("and") {
            self.push_operator(position, BinaryOp::And)
        } else if word.eq_ignore_ascii_case("or") {
            self.push_operator(position, BinaryOp::Or)
        } else if word.eq_ignore_ascii_case("not") {
            self.push_not(position)
        } else if word.eq_ignore_ascii_case("true") {
            self.push_operand(position, Node::Const(true))
        } else if word.eq_ignore_ascii_case("false") {
            self.push_operand(position, Node::Const(false))
        } else {
            self.push_operand(position, Node::input(word))
        }
    }

    fn push_operand(&mut self, position: usize, operand: Node) -> Result<(), ParseError> {
        let frame = self.frame();
        if frame.expect_operator {
            return Err(ParseError::new(position, ParseErrorKind::UnexpectedOperand));
        }
        let mut node = operand;
        for _ in 0..frame.pending_nots {
            node = Node::not(node);
        }
        frame.pending_nots = 0;
        frame.operands.push(node);
        frame.expect_operator = true;
        Ok(())
    }

    fn push_operator(&mut self, position: usize, op: BinaryOp) -> Result<(), ParseError> {
        let frame = self.frame();
        if !frame.expect_operator {
            return Err(ParseError::new(position, ParseErrorKind::UnexpectedOperator));
        }
        frame.operators.push(op);
        frame.expect_operator = false;
        Ok(())
    }

    fn push_not(&mut self, position: usize) -> Result<(), ParseError> {
        let frame = self.frame();
        if frame.expect_operator {
            return Err(ParseError::new(position, ParseErrorKind::UnexpectedOperand));
        }
        frame.pending_nots += 1;
        Ok(())
    }

    fn open(&mut self, position: usize) -> Result<(), ParseError> {
        if self.frame().expect_operator {
            return Err(ParseError::new(position, ParseErrorKind::UnexpectedOperand));
        }
        self.groups.push(Frame::default());
        debug!("open group at {} (depth {})", position, self.groups.len());
        Ok(())
    }

    fn close(&mut self, position: usize) -> Result<(), ParseError> {
        let frame = self
            .groups
            .pop()
            .ok_or(ParseError::new(position, ParseErrorKind::UnbalancedParens))?;
        let node = frame.reduce(position)?;
        debug!("close group at {}: {}", position, node);
        self.push_operand(position, node)
    }

    fn finish(self, position: usize) -> Result<Node, ParseError> {
        if !self.groups.is_empty() {
            return Err(ParseError::new(
                position,
                ParseErrorKind::ParenthesisMismatch,
            ));
        }
        self.root.reduce(position)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn parse(text: &str) -> Node {
        parse_formula(text).unwrap().root().clone()
    }

    fn parse_err(text: &str) -> ParseError {
        match parse_formula(text) {
            Err(FormulaError::Parse(e)) => e,
            other => panic!("expected a parse error for {:?}, got {:?}", text, other),
        }
    }

    fn var(name: &str) -> Node {
        Node::input(name)
    }

    #[test]
    fn test_parse_and() {
        assert_eq!(parse("A and B"), Node::and(vec![var("A"), var("B")]));
    }

    #[test]
    fn test_parse_not_group() {
        assert_eq!(
            parse("not (A or B)"),
            Node::not(Node::or(vec![var("A"), var("B")]))
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(
            parse("A and B or C"),
            Node::or(vec![Node::and(vec![var("A"), var("B")]), var("C")])
        );
        assert_eq!(
            parse("A or B and C"),
            Node::or(vec![var("A"), Node::and(vec![var("B"), var("C")])])
        );
    }

    #[test]
    fn test_reduction_order() {
        // and-chains first, leftmost first, then or-chains left to right.
        assert_eq!(
            parse("A or B and C and D or E"),
            Node::or(vec![
                Node::or(vec![
                    var("A"),
                    Node::and(vec![Node::and(vec![var("B"), var("C")]), var("D")]),
                ]),
                var("E"),
            ])
        );
    }

    #[test]
    fn test_left_associative_chain() {
        assert_eq!(
            parse("A or B or C"),
            Node::or(vec![Node::or(vec![var("A"), var("B")]), var("C")])
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            parse("NOT A And b OR True"),
            Node::or(vec![
                Node::and(vec![Node::not(var("A")), var("b")]),
                Node::Const(true),
            ])
        );
    }

    #[test]
    fn test_double_negation() {
        assert_eq!(parse("not not A"), Node::not(Node::not(var("A"))));
        assert_eq!(
            parse("not not (A and B)"),
            Node::not(Node::not(Node::and(vec![var("A"), var("B")])))
        );
    }

    #[test]
    fn test_not_binds_to_one_operand() {
        assert_eq!(
            parse("not A and B"),
            Node::and(vec![Node::not(var("A")), var("B")])
        );
        assert_eq!(
            parse("A or not B"),
            Node::or(vec![var("A"), Node::not(var("B"))])
        );
    }

    #[test]
    fn test_nested_parens() {
        assert_eq!(
            parse("((A)) and ((B or (C)))"),
            Node::and(vec![var("A"), Node::or(vec![var("B"), var("C")])])
        );
    }

    #[test]
    fn test_constants() {
        assert_eq!(parse("false"), Node::Const(false));
        assert_eq!(parse("not true"), Node::not(Node::Const(true)));
    }

    #[test]
    fn test_operand_after_operand() {
        assert_eq!(
            parse_err("A (B)"),
            ParseError::new(2, ParseErrorKind::UnexpectedOperand)
        );
        assert_eq!(parse_err("A B").kind, ParseErrorKind::UnexpectedOperand);
        assert_eq!(parse_err("A not B").kind, ParseErrorKind::UnexpectedOperand);
    }

    #[test]
    fn test_unexpected_operator() {
        assert_eq!(
            parse_err("A and or B"),
            ParseError::new(6, ParseErrorKind::UnexpectedOperator)
        );
        assert_eq!(parse_err("and A").kind, ParseErrorKind::UnexpectedOperator);
        assert_eq!(parse_err("not and A").kind, ParseErrorKind::UnexpectedOperator);
    }

    #[test]
    fn test_trailing_operator() {
        assert_eq!(
            parse_err("A and"),
            ParseError::new(2, ParseErrorKind::TrailingOperator)
        );
        assert_eq!(parse_err("A or not").kind, ParseErrorKind::TrailingOperator);
        assert_eq!(parse_err("(A or) and B").kind, ParseErrorKind::TrailingOperator);
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(parse_err("()").kind, ParseErrorKind::Unbalanced);
    }

    #[test]
    fn test_unbalanced_parens() {
        assert_eq!(
            parse_err("A)"),
            ParseError::new(1, ParseErrorKind::UnbalancedParens)
        );
        assert_eq!(parse_err("(A)) or B").kind, ParseErrorKind::UnbalancedParens);
    }

    #[test]
    fn test_parenthesis_mismatch() {
        assert_eq!(
            parse_err("(A and (B)"),
            ParseError::new(9, ParseErrorKind::ParenthesisMismatch)
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_err(""), ParseError::new(0, ParseErrorKind::EmptyInput));
        assert_eq!(parse_err("   ").kind, ParseErrorKind::EmptyInput);
    }

    #[test]
    fn test_lex_error_is_surfaced() {
        let err = parse_formula("A and $").unwrap_err();
        assert_eq!(
            err,
            FormulaError::Lex(LexError {
                position: 6,
                character: '$'
            })
        );
        assert_eq!(err.position(), 6);
        assert!(err.to_string().starts_with("Lexer error"));
    }
}
