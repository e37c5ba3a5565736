//! Error types for the DBN parser.

use std::fmt;

/// What the parser saw where it expected something else.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    Token(String),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(text) => write!(f, "`{text}`"),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("expected a number, but found {0}")]
    ExpectedNumber(Found),
    #[error("expected an identifier, but found {0}")]
    ExpectedIdentifier(Found),
    #[error("unterminated block, expected `}}` to close this `{{`")]
    UnterminatedBlock,
}

/// A parse failure. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} on line {line}, column {col}")]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub line: usize,
    pub col: usize,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, line: usize, col: usize) -> Self {
        Self { kind, line, col }
    }
}
