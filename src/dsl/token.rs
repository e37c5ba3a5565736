//! Token types for the DBN lexer.

use serde::Serialize;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. Comments hold their trimmed body.
    pub text: String,
    /// 1-based line.
    pub line: usize,
    /// 0-based column.
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }

    /// Whether this is the operator token for `op`.
    pub fn is_operator(&self, op: char) -> bool {
        self.kind == TokenKind::Operator && self.text.chars().eq([op])
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Command,
    Identifier,
    Number,
    Operator,
    Comment,
    /// Never emitted by the lexer; whitespace is skipped silently.
    Whitespace,
}

/// The reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Pen,
    Paper,
    Color,
    Line,
    Rect,
    Circle,
    Repeat,
    Set,
}

impl Keyword {
    /// Case-insensitive lookup of a reserved word.
    pub fn from_word(word: &str) -> Option<Self> {
        let kw = match word.to_ascii_lowercase().as_str() {
            "pen" => Keyword::Pen,
            "paper" => Keyword::Paper,
            "color" => Keyword::Color,
            "line" => Keyword::Line,
            "rect" => Keyword::Rect,
            "circle" => Keyword::Circle,
            "repeat" => Keyword::Repeat,
            "set" => Keyword::Set,
            _ => return None,
        };
        Some(kw)
    }
}
