//! Source parser shared by every surface syntax
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split into statement and expression passes
//! - [`ast`]: AST node definitions
//!
//! # Surface syntaxes
//!
//! Both syntaxes share one token set and one grammar engine. They differ in
//! how statements end and in what may follow `while`/`if` conditions:
//! - [`Syntax::Myrmidon`]: statements end at a line break; a body is any single
//!   statement, braces optional
//! - [`Syntax::Sml`]: statements end with `;` and line breaks are whitespace; a
//!   body is a braced block and `else` takes a block or another `if`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use ast::{DebugInfo, Node, Operand, Payload, Span};
pub use lexer::{Lexer, Token, TokenKind, TokenSource};
pub use parse::{ParseOutcome, Parser, MAX_DIAGNOSTICS, MAX_NESTING};

use crate::errors::CompileError;
use std::fmt;

/// Surface syntax accepted by the grammar engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    Myrmidon,
    Sml,
}

impl Syntax {
    pub const ALL: [Syntax; 2] = [Syntax::Myrmidon, Syntax::Sml];

    pub fn name(self) -> &'static str {
        match self {
            Syntax::Myrmidon => "myrmidon",
            Syntax::Sml => "sml",
        }
    }

    pub fn from_name(name: &str) -> Option<Syntax> {
        Syntax::ALL
            .into_iter()
            .find(|syntax| syntax.name().eq_ignore_ascii_case(name))
    }

    /// Whether `while`/`if` bodies must be braced blocks
    pub(crate) fn braced_bodies(self) -> bool {
        matches!(self, Syntax::Sml)
    }

    /// Token closing a simple statement; on its own it is an empty statement
    pub(crate) fn terminator(self) -> TokenKind {
        match self {
            Syntax::Myrmidon => TokenKind::Eol,
            Syntax::Sml => TokenKind::Semicolon,
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a whole source text, returning the tree or the first diagnostic
pub fn parse(source: &str, syntax: Syntax) -> Result<Node, CompileError> {
    let mut parser = Parser::new(Lexer::new(source), syntax)?;
    parser.parse_program().into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_names() {
        assert_eq!(Syntax::from_name("myrmidon"), Some(Syntax::Myrmidon));
        assert_eq!(Syntax::from_name("SML"), Some(Syntax::Sml));
        assert_eq!(Syntax::from_name("go"), None);
        assert_eq!(Syntax::Sml.to_string(), "sml");
    }

    #[test]
    fn test_parse_convenience() {
        let tree = parse("x = 1+2", Syntax::Myrmidon).unwrap();
        assert_eq!(
            tree.to_string(),
            "Program(Assign(Identifier(x), Add(Integer(1), Integer(2))))"
        );
        assert!(parse("x = ", Syntax::Myrmidon).is_err());
    }

    #[test]
    fn test_terminators() {
        assert_eq!(
            parse("x = 1;\ny = 2;\n", Syntax::Sml).unwrap().to_string(),
            "Program(Eos(Assign(Identifier(x), Integer(1)), Assign(Identifier(y), Integer(2))))"
        );
        let err = parse("x = 1;\n", Syntax::Myrmidon).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1,6-7: syntax error: unexpected ';', expecting end of line"
        );
    }
}
