//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! token helpers, the statement-list loop with error recovery, and the
//! [`Parser::parse_program`] entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, recovery and coordination
//! - `statements`: assignments, `while`, `if`, blocks, expression statements
//! - `expressions`: arithmetic with precedence climbing, and conditions
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! # Error Recovery
//!
//! A syntax error inside a statement is recorded, then tokens are discarded up
//! to and including the next statement terminator and parsing resumes with the
//! next statement. Only syntax errors are recoverable; a lexical error ends the
//! parse. Callers normally report just the first diagnostic.
//!
//! Resynchronization is bounded. One attempt never discards past the `}` or
//! end of file that closes the enclosing statement list, and nesting depth is
//! capped at [`MAX_NESTING`], so an error can only unwind through that many
//! enclosing lists. Across the whole parse, at most [`MAX_DIAGNOSTICS`]
//! attempts are made; the next error aborts with "too many syntax errors".

use super::ast::{DebugInfo, Node, Operand, Span};
use super::lexer::{Token, TokenKind, TokenSource};
use super::Syntax;
use crate::errors::{CompileError, LexError, SyntaxError};
use tracing::{debug, trace};

/// Deepest nesting of parentheses, unary minus, blocks and bodies
pub const MAX_NESTING: usize = 256;

/// Diagnostics collected before the parse gives up
pub const MAX_DIAGNOSTICS: usize = 25;

pub(crate) type ParseResult<T> = Result<T, CompileError>;

/// Result of one full parse
#[derive(Debug)]
pub struct ParseOutcome {
    /// The `Program` tree, present only when there were no diagnostics
    pub tree: Option<Node>,
    /// Every error in the order it was found
    pub diagnostics: Vec<CompileError>,
}

impl ParseOutcome {
    pub fn first_error(&self) -> Option<&CompileError> {
        self.diagnostics.first()
    }

    /// The tree, or the first diagnostic
    pub fn into_result(mut self) -> Result<Node, CompileError> {
        match self.tree.take() {
            Some(tree) if self.diagnostics.is_empty() => Ok(tree),
            _ => Err(self.diagnostics.into_iter().next().unwrap_or_else(|| {
                CompileError::Syntax(SyntaxError::new(
                    Span::new(1, 1, 1),
                    "syntax error: no program produced",
                ))
            })),
        }
    }
}

/// Recursive descent parser over any [`TokenSource`]
pub struct Parser<S: TokenSource> {
    pub(crate) source: S,
    pub(crate) current: Token,
    pub(crate) syntax: Syntax,
    pub(crate) depth: usize,
    diagnostics: Vec<CompileError>,
}

impl<S: TokenSource> Parser<S> {
    /// Prime the parser with the first token of `source`
    pub fn new(mut source: S, syntax: Syntax) -> Result<Self, CompileError> {
        let current = Self::pull(&mut source, syntax)?;
        Ok(Self {
            source,
            current,
            syntax,
            depth: 0,
            diagnostics: Vec::new(),
        })
    }

    /// Parse the whole input into a `Program` node
    pub fn parse_program(&mut self) -> ParseOutcome {
        let result = self
            .parse_statement_list(&TokenKind::Eof)
            .and_then(|body| {
                self.expect_token(&TokenKind::Eof, "end of file")?;
                Ok(body)
            });

        let tree = match result {
            Ok(body) if self.diagnostics.is_empty() => {
                let debug = self.source.debug_info(Span::new(1, 1, 1));
                Some(Node::program(debug, body))
            }
            Ok(_) => None,
            Err(err) => {
                debug!(%err, "parse aborted");
                self.diagnostics.push(err);
                None
            }
        };

        ParseOutcome {
            tree,
            diagnostics: std::mem::take(&mut self.diagnostics),
        }
    }

    /// Give the token source back, e.g. to keep its source lines
    pub fn into_source(self) -> S {
        self.source
    }

    /// Parse statements until `closer` (or end of file), folding them left
    /// into an Eos chain. A bare terminator is an empty statement and an
    /// empty list is a single Eos sentinel.
    pub(crate) fn parse_statement_list(&mut self, closer: &TokenKind) -> ParseResult<Node> {
        let depth = self.depth;
        let terminator = self.syntax.terminator();
        let mut list: Option<Node> = None;

        while !self.check(closer) && !self.check(&TokenKind::Eof) {
            let statement = if self.check(&terminator) {
                self.advance().map(|_| Node::eos())
            } else {
                self.parse_statement()
            };
            match statement {
                Ok(statement) => {
                    list = Some(match list {
                        Some(previous) => Node::sequence(previous, statement),
                        None => statement,
                    });
                }
                Err(CompileError::Syntax(err)) => {
                    self.depth = depth;
                    self.recover(err, closer)?;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(list.unwrap_or_else(Node::eos))
    }

    /// Record `err` and skip to the start of the next statement
    fn recover(&mut self, err: SyntaxError, closer: &TokenKind) -> ParseResult<()> {
        if self.diagnostics.len() >= MAX_DIAGNOSTICS {
            // already giving up, keep unwinding
            return Err(err.into());
        }
        debug!(%err, "syntax error, resynchronizing");
        self.diagnostics.push(err.into());
        if self.diagnostics.len() >= MAX_DIAGNOSTICS {
            return Err(self.error_here("too many syntax errors, giving up"));
        }

        let terminator = self.syntax.terminator();
        loop {
            if self.check(&terminator) {
                self.advance()?;
                return Ok(());
            }
            if self.check(&TokenKind::Eof) || self.check(closer) {
                return Ok(());
            }
            let discarded = self.advance()?;
            trace!(token = %discarded.kind, "discarding");
        }
    }

    // ===== Helper methods =====

    /// Next token the grammar sees; line breaks are whitespace unless they
    /// terminate statements
    fn pull(source: &mut S, syntax: Syntax) -> Result<Token, LexError> {
        let terminator = syntax.terminator();
        loop {
            let token = source.next_token()?;
            if token.kind != TokenKind::Eol || terminator == TokenKind::Eol {
                return Ok(token);
            }
        }
    }

    /// Consume the current token and pull the next one from the source
    pub(crate) fn advance(&mut self) -> ParseResult<Token> {
        let next = Self::pull(&mut self.source, self.syntax)?;
        trace!(token = %next.kind, line = next.span.line, "token");
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> ParseResult<Option<Token>> {
        if self.check(kind) {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    pub(crate) fn expect_token(&mut self, kind: &TokenKind, expecting: &str) -> ParseResult<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(expecting))
        }
    }

    /// Syntax error at the current token
    pub(crate) fn unexpected(&self, expecting: &str) -> CompileError {
        self.error_here(&format!(
            "syntax error: unexpected {}, expecting {}",
            self.current.kind, expecting
        ))
    }

    pub(crate) fn error_here(&self, message: &str) -> CompileError {
        SyntaxError::new(self.current.span, message).into()
    }

    pub(crate) fn debug(&self, span: Span) -> DebugInfo {
        self.source.debug_info(span)
    }

    /// Interior node tagged with the debug info of its triggering token
    pub(crate) fn node(&self, kind: Operand, span: Span, children: Vec<Node>) -> ParseResult<Node> {
        Ok(Node::operand(kind, Some(self.debug(span)), children)?)
    }

    /// Leaf node for a literal or identifier token
    pub(crate) fn leaf(&self, token: Token) -> ParseResult<Node> {
        let debug = self.debug(token.span);
        match token.kind {
            TokenKind::Integer(value) => Ok(Node::integer(debug, value)),
            TokenKind::Number(value) => Ok(Node::number(debug, value)),
            TokenKind::Identifier(name) => Ok(Node::identifier(debug, name)),
            other => Err(SyntaxError::new(
                token.span,
                format!("syntax error: unexpected {}, expecting expression", other),
            )
            .into()),
        }
    }

    /// Track one more level of nesting
    pub(crate) fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error_here("syntax error: nesting too deep"));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
