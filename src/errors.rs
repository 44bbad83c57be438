//! Error types for the front end
//!
//! Lexical and syntax errors render in the diagnostic format
//! `line <L>,<colStart>-<colEnd>: <message>`, which tooling matches on.
//! [`MalformedNode`] is the odd one out: it signals a defect in the grammar
//! engine rather than bad input, so it never carries a source span.

use crate::parser::ast::{Operand, Span};
use thiserror::Error;

/// Malformed literal or unexpected character
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{span}: {reason}")]
pub struct LexError {
    pub span: Span,
    pub reason: String,
}

impl LexError {
    pub fn new(span: Span, reason: impl Into<String>) -> Self {
        Self {
            span,
            reason: reason.into(),
        }
    }
}

/// Unexpected token for the current parse state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{span}: {message}")]
pub struct SyntaxError {
    pub span: Span,
    pub message: String,
}

impl SyntaxError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// A node was built with the wrong shape for its operand
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {operand} node: {reason}")]
pub struct MalformedNode {
    pub operand: Operand,
    pub reason: String,
}

impl MalformedNode {
    pub fn new(operand: Operand, reason: impl Into<String>) -> Self {
        Self {
            operand,
            reason: reason.into(),
        }
    }
}

/// Everything a single compile call can fail with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("internal error: {0}")]
    Malformed(#[from] MalformedNode),
}

impl CompileError {
    /// Source span of the failure, if it came from the input
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex(err) => Some(err.span),
            CompileError::Syntax(err) => Some(err.span),
            CompileError::Malformed(_) => None,
        }
    }
}

/// Errors from reading results back out of a driver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("no successful compile has produced a result yet")]
    NoResult,

    #[error("line {line} is out of range, source has {count} lines")]
    LineOutOfRange { line: usize, count: usize },
}
