//! DBN language front end: source text to tokens to command tree.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Command, Program};
pub use error::{ErrorKind, Found, SyntaxError};
pub use token::{Keyword, Token, TokenKind};

use lexer::Lexer;
use parser::Parser;

use crate::exec::Executor;
use crate::surface::DrawingSurface;

/// The interpreter pipeline.
///
/// Lexing never fails; parsing stops at the first [`SyntaxError`], in which
/// case nothing is executed.
pub struct Interpreter;

impl Interpreter {
    /// Split source text into tokens, comments included.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize()
    }

    /// Parse source text into a Program.
    pub fn parse(source: &str) -> Result<Program, SyntaxError> {
        let tokens = Self::tokenize(source);
        Parser::new(tokens).parse()
    }

    /// Parse `source` and execute it on `surface`.
    pub fn run<S>(source: &str, surface: &mut S) -> Result<Executor, SyntaxError>
    where
        S: DrawingSurface + ?Sized,
    {
        let program = Self::parse(source)?;
        Ok(crate::exec::execute(&program, surface))
    }
}
