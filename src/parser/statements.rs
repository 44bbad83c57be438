//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Assignments: `x = 1 + 2`
//! - Control flow: `while`, `if` / `else`
//! - Blocks: `{ ... }`
//! - Expression statements: `x + 1`
//!
//! # Grammar
//!
//! ```text
//! statement  ::= assignment | while_stmt | if_stmt | block | expr_stmt
//! assignment ::= IDENTIFIER '=' expr terminator
//! expr_stmt  ::= expr terminator
//! while_stmt ::= 'while' condition body
//! if_stmt    ::= 'if' condition body [ 'else' body ]
//! block      ::= '{' statement* '}'
//! ```
//!
//! In myrmidon a terminator is an end of line, or the end of file, `else` or
//! `}` left in place for the enclosing rule. In sml it is always `;`. A bare
//! terminator is an empty statement, but only in a statement list: a `body`
//! must hold a real statement. What counts as a `body` depends on the
//! [`Syntax`](super::Syntax).
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{Node, Operand};
use crate::parser::lexer::{TokenKind, TokenSource};
use crate::parser::parse::{ParseResult, Parser};
use crate::parser::Syntax;

impl<S: TokenSource> Parser<S> {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Node> {
        match self.current.kind {
            TokenKind::While => self.parse_while_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Identifier(_) => self.parse_assignment_or_expression(),
            _ => {
                let expr = self.parse_expression()?;
                self.expect_terminator()?;
                Ok(expr)
            }
        }
    }

    /// An identifier starts either an assignment or an expression statement
    fn parse_assignment_or_expression(&mut self) -> ParseResult<Node> {
        let name = self.advance()?;
        let target = self.leaf(name)?;

        if let Some(assign) = self.match_token(&TokenKind::Assign)? {
            let value = self.parse_expression()?;
            self.expect_terminator()?;
            return self.node(Operand::Assign, assign.span, vec![target, value]);
        }

        let expr = self.continue_expression(target, 0)?;
        self.expect_terminator()?;
        Ok(expr)
    }

    /// Consume the terminator closing a simple statement
    fn expect_terminator(&mut self) -> ParseResult<()> {
        let terminator = self.syntax.terminator();
        if self.match_token(&terminator)?.is_some() {
            return Ok(());
        }
        match (self.syntax, &self.current.kind) {
            (Syntax::Myrmidon, TokenKind::Eof | TokenKind::Else | TokenKind::RBrace) => Ok(()),
            (Syntax::Myrmidon, _) => Err(self.unexpected("end of line")),
            (Syntax::Sml, _) => Err(self.unexpected("';'")),
        }
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> ParseResult<Node> {
        let keyword = self.expect_token(&TokenKind::While, "'while'")?;
        let condition = self.parse_condition()?;
        let body = self.parse_body()?;
        self.node(Operand::While, keyword.span, vec![condition, body])
    }

    /// Parse if statement; a missing else branch is an Eos sentinel
    fn parse_if_statement(&mut self) -> ParseResult<Node> {
        let keyword = self.expect_token(&TokenKind::If, "'if'")?;
        let condition = self.parse_condition()?;
        let then_branch = self.parse_body()?;

        let else_branch = if self.match_token(&TokenKind::Else)?.is_some() {
            if self.syntax.braced_bodies() && self.check(&TokenKind::If) {
                self.enter()?;
                let chained = self.parse_if_statement();
                self.leave();
                chained?
            } else {
                self.parse_body()?
            }
        } else {
            Node::eos()
        };

        self.node(
            Operand::If,
            keyword.span,
            vec![condition, then_branch, else_branch],
        )
    }

    /// Body of a `while` or `if` branch; never empty
    fn parse_body(&mut self) -> ParseResult<Node> {
        self.enter()?;
        let body = if self.syntax.braced_bodies() {
            if self.check(&TokenKind::LBrace) {
                self.parse_block()
            } else {
                Err(self.unexpected("'{'"))
            }
        } else if self.check(&self.syntax.terminator()) {
            Err(self.unexpected("statement"))
        } else {
            self.parse_statement()
        };
        self.leave();
        body
    }

    /// Parse `{ statement* }`; the braces leave no node of their own
    pub(crate) fn parse_block(&mut self) -> ParseResult<Node> {
        self.expect_token(&TokenKind::LBrace, "'{'")?;
        self.enter()?;
        let body = self.parse_statement_list(&TokenKind::RBrace);
        self.leave();
        let body = body?;
        self.expect_token(&TokenKind::RBrace, "'}'")?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, Syntax};

    fn myrmidon(source: &str) -> String {
        parse(source, Syntax::Myrmidon).unwrap().to_string()
    }

    fn sml(source: &str) -> String {
        parse(source, Syntax::Sml).unwrap().to_string()
    }

    #[test]
    fn test_assignment() {
        assert_eq!(
            myrmidon("x = 1+2"),
            "Program(Assign(Identifier(x), Add(Integer(1), Integer(2))))"
        );
    }

    #[test]
    fn test_while_with_single_statement_body() {
        assert_eq!(
            myrmidon("while a<10 x=x+1"),
            "Program(While(Lt(Identifier(a), Integer(10)), \
             Assign(Identifier(x), Add(Identifier(x), Integer(1)))))"
        );
    }

    #[test]
    fn test_if_else_on_one_line() {
        assert_eq!(
            myrmidon("if a==1 x=1 else x=2"),
            "Program(If(Eq(Identifier(a), Integer(1)), \
             Assign(Identifier(x), Integer(1)), Assign(Identifier(x), Integer(2))))"
        );
    }

    #[test]
    fn test_if_without_else_has_eos_branch() {
        assert_eq!(
            myrmidon("if a>0 b=1\n"),
            "Program(If(Gt(Identifier(a), Integer(0)), Assign(Identifier(b), Integer(1)), Eos))"
        );
    }

    #[test]
    fn test_else_on_next_line() {
        assert_eq!(
            myrmidon("if a>0 b=1\nelse b=2\n"),
            "Program(If(Gt(Identifier(a), Integer(0)), \
             Assign(Identifier(b), Integer(1)), Assign(Identifier(b), Integer(2))))"
        );
    }

    #[test]
    fn test_blocks_fold_their_statements() {
        assert_eq!(
            myrmidon("while i<3 { i = i+1\n j = i }"),
            "Program(While(Lt(Identifier(i), Integer(3)), \
             Eos(Assign(Identifier(i), Add(Identifier(i), Integer(1))), \
             Assign(Identifier(j), Identifier(i)))))"
        );
        assert_eq!(myrmidon("{}"), "Program(Eos)");
    }

    #[test]
    fn test_expression_statement() {
        assert_eq!(myrmidon("x*2\n"), "Program(Mul(Identifier(x), Integer(2)))");
        assert_eq!(myrmidon("-1\n"), "Program(Uminus(Integer(1)))");
    }

    #[test]
    fn test_sml_requires_braced_bodies() {
        assert_eq!(
            sml("while a<3 { a = a+1; }"),
            "Program(While(Lt(Identifier(a), Integer(3)), \
             Assign(Identifier(a), Add(Identifier(a), Integer(1)))))"
        );
        let err = parse("while a<3 a = a+1;", Syntax::Sml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1,11-12: syntax error: unexpected identifier 'a', expecting '{'"
        );
    }

    #[test]
    fn test_sml_else_if_chain() {
        assert_eq!(
            sml("if a<0 { s=-1; } else if a>0 { s=1; } else { s=0; }"),
            "Program(If(Lt(Identifier(a), Integer(0)), \
             Assign(Identifier(s), Uminus(Integer(1))), \
             If(Gt(Identifier(a), Integer(0)), Assign(Identifier(s), Integer(1)), \
             Assign(Identifier(s), Integer(0)))))"
        );
    }

    #[test]
    fn test_missing_terminator() {
        let err = parse("x = 1 2", Syntax::Myrmidon).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1,7-8: syntax error: unexpected integer 2, expecting end of line"
        );
    }

    #[test]
    fn test_body_on_next_line_is_an_error() {
        let err = parse("while x > 0\n  x = x - 1\n", Syntax::Myrmidon).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1,12-13: syntax error: unexpected end of line, expecting statement"
        );
        let err = parse("if x > 0 y = 1 else\ny = 2\n", Syntax::Myrmidon).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1,20-21: syntax error: unexpected end of line, expecting statement"
        );
    }

    #[test]
    fn test_braced_body_may_start_on_next_line_in_sml() {
        assert_eq!(
            sml("while x > 0\n{\n  x = x - 1;\n}\n"),
            "Program(While(Gt(Identifier(x), Integer(0)), \
             Assign(Identifier(x), Sub(Identifier(x), Integer(1)))))"
        );
    }

    #[test]
    fn test_sml_statements_need_semicolons() {
        assert_eq!(sml(";"), "Program(Eos)");
        assert_eq!(sml("{ ; }"), "Program(Eos)");
        let err = parse("x = 1\ny = 2;", Syntax::Sml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2,1-2: syntax error: unexpected identifier 'y', expecting ';'"
        );
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("{ x = 1\n", Syntax::Myrmidon).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2,1-1: syntax error: unexpected end of file, expecting '}'"
        );
    }
}
