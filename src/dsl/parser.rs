//! Parser for the DBN drawing language.
//!
//! Recursive descent over the token stream. Whitespace and comment tokens are
//! dropped up front; anything that is not a command where a command is
//! expected is skipped one token at a time.

use tracing::debug;

use super::ast::{Command, Program};
use super::error::{ErrorKind, Found, SyntaxError};
use super::token::{Keyword, Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Comment))
            .collect();
        Self { tokens, pos: 0 }
    }

    pub fn parse(&mut self) -> Result<Program, SyntaxError> {
        let mut commands = Vec::new();

        while !self.is_at_end() {
            if let Some(command) = self.parse_command()? {
                commands.push(command);
            }
        }

        Ok(Program::new(commands))
    }

    /// Parse one command, or skip one stray token and return `None`.
    fn parse_command(&mut self) -> Result<Option<Command>, SyntaxError> {
        let Some(t) = self.tokens.get(self.pos) else {
            return Ok(None);
        };

        if t.kind != TokenKind::Command {
            debug!(
                "skipping stray {:?} `{}` at {}:{}",
                t.kind, t.text, t.line, t.col
            );
            self.advance();
            return Ok(None);
        }

        let Some(keyword) = Keyword::from_word(&t.text) else {
            return Err(SyntaxError::new(
                ErrorKind::UnknownCommand(t.text.clone()),
                t.line,
                t.col,
            ));
        };
        self.advance();

        let command = match keyword {
            Keyword::Pen => Command::Pen {
                size: self.expect_number()?,
            },
            Keyword::Paper => Command::Paper {
                value: self.expect_number()?,
            },
            Keyword::Color => Command::Color {
                value: self.expect_number()?,
            },
            Keyword::Line => {
                let [x1, y1, x2, y2] = self.expect_numbers::<4>()?;
                Command::Line { x1, y1, x2, y2 }
            }
            Keyword::Rect => {
                let [x1, y1, x2, y2] = self.expect_numbers::<4>()?;
                Command::Rect { x1, y1, x2, y2 }
            }
            Keyword::Circle => {
                let [x, y, r] = self.expect_numbers::<3>()?;
                Command::Circle { x, y, r }
            }
            Keyword::Set => {
                let name = self.expect_ident()?;
                let value = self.expect_number()?;
                Command::SetVariable { name, value }
            }
            Keyword::Repeat => {
                let count = self.expect_number()?;
                let body = self.parse_repeat_body()?;
                Command::Repeat { count, body }
            }
        };

        Ok(Some(command))
    }

    /// Either `{ command* }` or a single command.
    fn parse_repeat_body(&mut self) -> Result<Vec<Command>, SyntaxError> {
        let mut body = Vec::new();

        if !self.check_operator('{') {
            if let Some(command) = self.parse_command()? {
                body.push(command);
            }
            return Ok(body);
        }
        let (line, col) = self.position();
        self.advance();

        while !self.is_at_end() && !self.check_operator('}') {
            if let Some(command) = self.parse_command()? {
                body.push(command);
            }
        }

        if !self.check_operator('}') {
            return Err(SyntaxError::new(ErrorKind::UnterminatedBlock, line, col));
        }
        self.advance();

        Ok(body)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check_operator(&self, op: char) -> bool {
        self.peek().is_some_and(|t| t.is_operator(op))
    }

    /// Line and column of the current token, or of the last token when the
    /// stream is exhausted.
    fn position(&self) -> (usize, usize) {
        self.peek()
            .or(self.tokens.last())
            .map_or((1, 0), |t| (t.line, t.col))
    }

    fn error_here(&self, kind: impl FnOnce(Found) -> ErrorKind) -> SyntaxError {
        let found = match self.peek() {
            Some(t) => Found::Token(t.text.clone()),
            None => Found::EndOfInput,
        };
        let (line, col) = self.position();
        SyntaxError::new(kind(found), line, col)
    }

    fn expect_number(&mut self) -> Result<f64, SyntaxError> {
        let value = self
            .peek()
            .filter(|t| t.kind == TokenKind::Number)
            .and_then(|t| parse_number_prefix(&t.text));
        match value {
            Some(v) => {
                self.advance();
                Ok(v)
            }
            None => Err(self.error_here(ErrorKind::ExpectedNumber)),
        }
    }

    fn expect_numbers<const N: usize>(&mut self) -> Result<[f64; N], SyntaxError> {
        let mut values = [0.0; N];
        for v in &mut values {
            *v = self.expect_number()?;
        }
        Ok(values)
    }

    fn expect_ident(&mut self) -> Result<String, SyntaxError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Identifier => {
                let name = t.text.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_here(ErrorKind::ExpectedIdentifier)),
        }
    }
}

/// Convert the longest `digits[.digits]` prefix of `text`, so `1.2.3` reads
/// as 1.2 and `5.` as 5. Returns `None` if there is no leading digit.
pub fn parse_number_prefix(text: &str) -> Option<f64> {
    let int_len = text.bytes().take_while(u8::is_ascii_digit).count();
    if int_len == 0 {
        return None;
    }

    let rest = &text.as_bytes()[int_len..];
    let frac_len = match rest.first() {
        Some(b'.') => rest[1..].iter().take_while(|b| b.is_ascii_digit()).count(),
        _ => 0,
    };

    let end = if frac_len > 0 { int_len + 1 + frac_len } else { int_len };
    text[..end].parse().ok()
}
