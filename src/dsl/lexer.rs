//! Lexer for the DBN drawing language.
//!
//! Converts source text into a flat sequence of [`Token`]s. Lexing is total:
//! unrecognized characters are skipped one at a time and no input fails.

use super::token::{Keyword, Token, TokenKind};

const OPERATORS: [char; 9] = ['+', '-', '*', '/', '=', '(', ')', '{', '}'];

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 0,
        }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            let ch = self.peek();

            if ch == '/' && self.peek_next() == Some('/') {
                tokens.push(self.lex_comment());
                continue;
            }

            if ch.is_whitespace() {
                self.skip_whitespace();
                continue;
            }

            let token = match ch {
                '0'..='9' => self.lex_number(),
                'a'..='z' | 'A'..='Z' | '_' => self.lex_word(),
                c if OPERATORS.contains(&c) => self.single_char(TokenKind::Operator),
                _ => {
                    self.advance();
                    continue;
                }
            };

            tokens.push(token);
        }

        tokens
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        self.col += 1;
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            if self.advance() == '\n' {
                self.line += 1;
                self.col = 0;
            }
        }
    }

    /// Lex `// ...` up to (not including) the newline.
    fn lex_comment(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        self.advance();
        self.advance();

        let mut body = String::new();
        while !self.is_at_end() && self.peek() != '\n' {
            body.push(self.advance());
        }

        Token::new(TokenKind::Comment, body.trim(), line, col)
    }

    /// Digits and dots, no validation. `1.2.3` is a single token.
    fn lex_number(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let mut s = String::new();

        while !self.is_at_end() && (self.peek().is_ascii_digit() || self.peek() == '.') {
            s.push(self.advance());
        }

        Token::new(TokenKind::Number, s, line, col)
    }

    fn lex_word(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let mut s = String::new();

        while !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == '_') {
            s.push(self.advance());
        }

        let kind = if Keyword::from_word(&s).is_some() {
            TokenKind::Command
        } else {
            TokenKind::Identifier
        };

        Token::new(kind, s, line, col)
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let line = self.line;
        let col = self.col;
        let ch = self.advance();
        Token::new(kind, ch.to_string(), line, col)
    }
}
