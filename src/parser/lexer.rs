//! Lexer for the shared token set
//!
//! Converts source text into [`Token`]s on demand: the grammar engine pulls
//! one token per terminal through [`TokenSource::next_token`], and nothing is
//! buffered beyond the current character and the partial token being built.
//!
//! Line breaks are tokens (`Eol`) because myrmidon statements are newline
//! terminated; sml ends statements with `;` and the parser skips `Eol` there.
//! Numeric literals come in two flavours: plain digit runs become machine
//! integers, anything with a fraction or exponent becomes an exact
//! [`Rational`]. A literal that fails to parse is a [`LexError`].

use super::ast::{DebugInfo, Span};
use crate::errors::LexError;
use crate::rational::Rational;
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::Chars;
use std::sync::{Arc, OnceLock};

/// Lexical category of a token, with its value where it has one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Integer(i64),
    Number(Rational),

    // Identifiers
    Identifier(String),

    // Keywords
    Var,
    Const,
    While,
    If,
    Else,

    // Statement structure
    Eol,
    Semicolon,
    Assign, // =

    // Relational
    Lt,   // <
    Gt,   // >
    Le,   // <=
    Ge,   // >=
    EqEq, // ==
    Ne,   // !=

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,

    // Grouping
    LParen,
    RParen,
    LBrace,
    RBrace,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer(n) => write!(f, "integer {}", n),
            TokenKind::Number(r) => write!(f, "number {}", r),
            TokenKind::Identifier(s) => write!(f, "identifier '{}'", s),
            TokenKind::Var => write!(f, "'var'"),
            TokenKind::Const => write!(f, "'const'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::Eol => write!(f, "end of line"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::Ne => write!(f, "'!='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A token and the source columns it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Input contract of the grammar engine.
///
/// A surface language reuses the grammar unchanged by producing this token
/// set and resolving spans back to source lines.
pub trait TokenSource {
    /// Read the next token; keeps returning `Eof` once input is exhausted
    fn next_token(&mut self) -> Result<Token, LexError>;

    /// Debug info for a span, including the text of its source line
    fn debug_info(&self, span: Span) -> DebugInfo;
}

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        let mut table = FxHashMap::default();
        table.insert("var", TokenKind::Var);
        table.insert("const", TokenKind::Const);
        table.insert("while", TokenKind::While);
        table.insert("if", TokenKind::If);
        table.insert("else", TokenKind::Else);
        table
    })
}

/// Split source text into lines for debug info; a trailing `\r` is dropped
pub fn split_lines(source: &str) -> Vec<Arc<str>> {
    source
        .split('\n')
        .map(|line| Arc::from(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

/// Lexer over one source buffer
pub struct Lexer<'a> {
    chars: Chars<'a>,
    current: Option<char>,
    line: usize,
    column: usize,
    buffer: String,
    lines: Vec<Arc<str>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'a str) -> Self {
        let mut chars = source.chars();
        let current = chars.next();
        Self {
            chars,
            current,
            line: 1,
            column: 1,
            buffer: String::new(),
            lines: split_lines(source),
        }
    }

    /// Source lines, 0-indexed
    pub fn lines(&self) -> &[Arc<str>] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Arc<str>> {
        self.lines
    }

    /// Produce the next token
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_blanks();

        let line = self.line;
        let start = self.column;
        let Some(ch) = self.current else {
            return Ok(Token::new(TokenKind::Eof, Span::new(line, start, start)));
        };

        let kind = match ch {
            '0'..='9' | '.' => return self.number_literal(),
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier_or_keyword()),
            '\n' => {
                self.bump();
                return Ok(Token::new(TokenKind::Eol, Span::new(line, start, start + 1)));
            }
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ';' => self.single(TokenKind::Semicolon),
            '=' => self.with_equals(TokenKind::Assign, TokenKind::EqEq),
            '<' => self.with_equals(TokenKind::Lt, TokenKind::Le),
            '>' => self.with_equals(TokenKind::Gt, TokenKind::Ge),
            '!' => {
                self.bump();
                if self.current != Some('=') {
                    return Err(LexError::new(
                        Span::new(line, start, self.column),
                        "unexpected character '!', expecting '!='",
                    ));
                }
                self.bump();
                TokenKind::Ne
            }
            other => {
                self.bump();
                return Err(LexError::new(
                    Span::new(line, start, self.column),
                    format!("unexpected character '{}'", other.escape_debug()),
                ));
            }
        };

        Ok(Token::new(kind, Span::new(line, start, self.column)))
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    /// `<`, `>`, `=` and their two-character forms ending in `=`
    fn with_equals(&mut self, bare: TokenKind, paired: TokenKind) -> TokenKind {
        self.bump();
        if self.current == Some('=') {
            self.bump();
            paired
        } else {
            bare
        }
    }

    /// Scan a numeric literal.
    ///
    /// Digits and `.` accumulate greedily so `1.2.3` is reported as one bad
    /// literal. An exponent is only taken when a digit (optionally signed)
    /// follows the `e`.
    fn number_literal(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let start = self.column;
        let mut rational = false;
        self.buffer.clear();

        while let Some(ch) = self.current {
            match ch {
                '0'..='9' => {}
                '.' => rational = true,
                'e' | 'E' if self.exponent_follows() => {
                    rational = true;
                    self.buffer.push(ch);
                    self.bump();
                    if let Some(sign @ ('+' | '-')) = self.current {
                        self.buffer.push(sign);
                        self.bump();
                    }
                    continue;
                }
                _ => break,
            }
            self.buffer.push(ch);
            self.bump();
        }

        let span = Span::new(line, start, self.column);
        let kind = if rational {
            Rational::parse_decimal(&self.buffer)
                .map(TokenKind::Number)
                .ok_or_else(|| {
                    LexError::new(span, format!("invalid number literal '{}'", self.buffer))
                })?
        } else {
            self.buffer.parse::<i64>().map(TokenKind::Integer).map_err(|_| {
                LexError::new(span, format!("invalid integer literal '{}'", self.buffer))
            })?
        };

        Ok(Token::new(kind, span))
    }

    /// Whether the character after the current `e` starts an exponent
    fn exponent_follows(&self) -> bool {
        let mut rest = self.chars.clone();
        match rest.next() {
            Some(d) if d.is_ascii_digit() => true,
            Some('+' | '-') => rest.next().is_some_and(|d| d.is_ascii_digit()),
            _ => false,
        }
    }

    /// Scan an identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let line = self.line;
        let start = self.column;
        self.buffer.clear();

        while let Some(ch) = self.current {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.buffer.push(ch);
                self.bump();
            } else {
                break;
            }
        }

        let span = Span::new(line, start, self.column);
        let kind = keywords()
            .get(self.buffer.as_str())
            .cloned()
            .unwrap_or_else(|| TokenKind::Identifier(self.buffer.clone()));
        Token::new(kind, span)
    }

    /// Skip spaces, tabs and carriage returns (newlines are tokens)
    fn skip_blanks(&mut self) {
        while matches!(self.current, Some(' ' | '\t' | '\r')) {
            self.bump();
        }
    }

    /// Advance to the next character
    fn bump(&mut self) -> Option<char> {
        let ch = self.current?;
        self.current = self.chars.next();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Result<Token, LexError> {
        Lexer::next_token(self)
    }

    fn debug_info(&self, span: Span) -> DebugInfo {
        let line = span
            .line
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .cloned()
            .unwrap_or_else(|| Arc::from(""));
        DebugInfo::new(span, line)
    }
}
