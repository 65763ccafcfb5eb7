//! Tokenizer for textual formulas.
//!
//! The lexer is a single left-to-right pass over the input:
//!
//! - whitespace separates tokens and produces nothing,
//! - `(` and `)` are complete one-character tokens,
//! - runs of `[A-Za-z_][A-Za-z0-9_-]*` form one word token.
//!
//! Keywords (`and`, `or`, `not`, `true`, `false`) are plain words at this stage;
//! the parser recognizes them case-insensitively.
//!
//! ```
//! use logic_tutor::lexer::tokenize;
//!
//! let tokens = tokenize("A and (B)").unwrap();
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(texts, ["A", "and", "(", "B", ")"]);
//! ```

use std::fmt;

/// A token together with the character index where it starts.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub position: usize,
}

impl Token<'_> {
    pub fn is_open(&self) -> bool {
        self.text == "("
    }

    pub fn is_close(&self) -> bool {
        self.text == ")"
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'@{}", self.text, self.position)
    }
}

/// Unrecognized character in the input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LexError {
    pub position: usize,
    pub character: char,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected character {:?} at position {}",
            self.character, self.position
        )
    }
}

impl std::error::Error for LexError {}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_word_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Words with a fixed meaning; matched case-insensitively.
pub const KEYWORDS: [&str; 5] = ["and", "or", "not", "true", "false"];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k))
}

/// Whether `name` lexes as a single word that is not a keyword, i.e. can be
/// written as an input in a formula.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_word_start(c) => chars.all(is_word_continue) && !is_keyword(name),
        _ => false,
    }
}

/// Splits `text` into tokens.
///
/// Fails on the first character that can neither start nor continue a token.
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut tokens = Vec::new();
    // Current word: (byte offset, char position).
    let mut word: Option<(usize, usize)> = None;

    for (position, (offset, c)) in text.char_indices().enumerate() {
        if let Some((start, start_position)) = word {
            if is_word_continue(c) {
                continue;
            }
            tokens.push(Token {
                text: &text[start..offset],
                position: start_position,
            });
            word = None;
        }

        if c.is_whitespace() {
            continue;
        }
        if c == '(' || c == ')' {
            tokens.push(Token {
                text: &text[offset..offset + 1],
                position,
            });
        } else if is_word_start(c) {
            word = Some((offset, position));
        } else {
            return Err(LexError {
                position,
                character: c,
            });
        }
    }

    if let Some((start, start_position)) = word {
        tokens.push(Token {
            text: &text[start..],
            position: start_position,
        });
    }

    log::trace!("tokenize({:?}) -> {} tokens", text, tokens.len());
    Ok(tokens)
}
