//! Expression parsing implementation
//!
//! This module handles parsing of arithmetic expressions using precedence
//! climbing for binary operators and recursive descent for everything else,
//! plus the relational conditions of `while` and `if`.
//!
//! # Supported Expressions
//!
//! - Literals: integers, exact decimal numbers
//! - Identifiers
//! - Binary operators: `+ - * /`, left associative
//! - Unary minus, right associative and binding tightest
//! - Parenthesized sub-expressions
//!
//! # Conditions
//!
//! A condition is one relational comparison between two expressions. A
//! leading `(` may open either a parenthesized condition or a parenthesized
//! expression that the comparison continues from, so `(a < b)` and
//! `(a + 1) * 2 < b` are both conditions.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{Node, Operand};
use crate::parser::lexer::{TokenKind, TokenSource};
use crate::parser::parse::{ParseResult, Parser};

/// What a parenthesized prefix of a condition turned out to be
enum Clause {
    Condition(Node),
    Expression(Node),
}

/// Binary arithmetic operator and its precedence (higher binds tighter)
fn binary_operator(kind: &TokenKind) -> Option<(Operand, u8)> {
    match kind {
        TokenKind::Plus => Some((Operand::Add, 1)),
        TokenKind::Minus => Some((Operand::Sub, 1)),
        TokenKind::Star => Some((Operand::Mul, 2)),
        TokenKind::Slash => Some((Operand::Div, 2)),
        _ => None,
    }
}

fn relational_operator(kind: &TokenKind) -> Option<Operand> {
    match kind {
        TokenKind::Lt => Some(Operand::Lt),
        TokenKind::Gt => Some(Operand::Gt),
        TokenKind::Le => Some(Operand::Le),
        TokenKind::Ge => Some(Operand::Ge),
        TokenKind::Ne => Some(Operand::Ne),
        TokenKind::EqEq => Some(Operand::Eq),
        _ => None,
    }
}

impl<S: TokenSource> Parser<S> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Node> {
        let lhs = self.parse_unary()?;
        self.continue_expression(lhs, 0)
    }

    /// Precedence climbing from an already parsed left operand.
    ///
    /// Consumes binary operators of precedence `min_prec` or higher; the
    /// right operand only takes operators that bind strictly tighter, which
    /// makes every level left associative.
    pub(crate) fn continue_expression(&mut self, mut lhs: Node, min_prec: u8) -> ParseResult<Node> {
        while let Some((operand, prec)) = binary_operator(&self.current.kind) {
            if prec < min_prec {
                break;
            }
            let operator = self.advance()?;
            let rhs = self.parse_unary()?;
            let rhs = self.continue_expression(rhs, prec + 1)?;
            lhs = self.node(operand, operator.span, vec![lhs, rhs])?;
        }
        Ok(lhs)
    }

    /// Parse unary minus or a primary expression
    fn parse_unary(&mut self) -> ParseResult<Node> {
        if !self.check(&TokenKind::Minus) {
            return self.parse_primary();
        }

        let minus = self.advance()?;
        self.enter()?;
        let operand = self.parse_unary();
        self.leave();
        self.node(Operand::Uminus, minus.span, vec![operand?])
    }

    /// Parse primary expression (literals, identifiers, parenthesized)
    fn parse_primary(&mut self) -> ParseResult<Node> {
        match self.current.kind {
            TokenKind::Integer(_) | TokenKind::Number(_) | TokenKind::Identifier(_) => {
                let token = self.advance()?;
                self.leaf(token)
            }
            TokenKind::LParen => {
                self.advance()?;
                self.enter()?;
                let inner = self.parse_expression();
                self.leave();
                let inner = inner?;
                self.expect_token(&TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parse the condition of a `while` or `if`
    pub(crate) fn parse_condition(&mut self) -> ParseResult<Node> {
        match self.parse_clause()? {
            Clause::Condition(condition) => Ok(condition),
            Clause::Expression(_) => Err(self.unexpected("relational operator")),
        }
    }

    fn parse_clause(&mut self) -> ParseResult<Clause> {
        if !self.check(&TokenKind::LParen) {
            let lhs = self.parse_expression()?;
            return self.finish_clause(lhs);
        }

        self.advance()?;
        self.enter()?;
        let inner = self.parse_clause();
        self.leave();
        let inner = inner?;
        self.expect_token(&TokenKind::RParen, "')'")?;

        match inner {
            Clause::Condition(condition) => Ok(Clause::Condition(condition)),
            Clause::Expression(expr) => {
                let lhs = self.continue_expression(expr, 0)?;
                self.finish_clause(lhs)
            }
        }
    }

    /// Turn `lhs` into a comparison if a relational operator follows
    fn finish_clause(&mut self, lhs: Node) -> ParseResult<Clause> {
        let Some(operand) = relational_operator(&self.current.kind) else {
            return Ok(Clause::Expression(lhs));
        };
        let operator = self.advance()?;
        let rhs = self.parse_expression()?;
        Ok(Clause::Condition(self.node(
            operand,
            operator.span,
            vec![lhs, rhs],
        )?))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, Syntax};

    /// Parse `x = <source>` and return the right-hand side
    fn expr(source: &str) -> String {
        let tree = parse(&format!("x = {}", source), Syntax::Myrmidon).unwrap();
        let assign = tree.statements()[0];
        assign.child(1).unwrap().to_string()
    }

    /// Parse `while <source> x = 1` and return the condition
    fn cond(source: &str) -> String {
        let tree = parse(&format!("while {} x = 1", source), Syntax::Myrmidon).unwrap();
        let stmt = tree.statements()[0];
        stmt.child(0).unwrap().to_string()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(expr("2+3*4"), "Add(Integer(2), Mul(Integer(3), Integer(4)))");
        assert_eq!(expr("2*3+4"), "Add(Mul(Integer(2), Integer(3)), Integer(4))");
        assert_eq!(expr("(2+3)*4"), "Mul(Add(Integer(2), Integer(3)), Integer(4))");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(
            expr("8-4-2"),
            "Sub(Sub(Integer(8), Integer(4)), Integer(2))"
        );
        assert_eq!(
            expr("8/4*2"),
            "Mul(Div(Integer(8), Integer(4)), Integer(2))"
        );
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(expr("-a-b"), "Sub(Uminus(Identifier(a)), Identifier(b))");
        assert_eq!(expr("-a*b"), "Mul(Uminus(Identifier(a)), Identifier(b))");
        assert_eq!(expr("--a"), "Uminus(Uminus(Identifier(a)))");
        assert_eq!(expr("2*-3"), "Mul(Integer(2), Uminus(Integer(3)))");
    }

    #[test]
    fn test_number_literals_are_exact() {
        assert_eq!(expr("3.5"), "Number(7/2)");
        assert_eq!(expr("3"), "Integer(3)");
    }

    #[test]
    fn test_conditions() {
        assert_eq!(cond("a<10"), "Lt(Identifier(a), Integer(10))");
        assert_eq!(cond("a+1 >= b*2"), "Ge(Add(Identifier(a), Integer(1)), Mul(Identifier(b), Integer(2)))");
        assert_eq!(cond("(a != b)"), "Ne(Identifier(a), Identifier(b))");
        assert_eq!(cond("((a == b))"), "Eq(Identifier(a), Identifier(b))");
        assert_eq!(
            cond("(a+1)*2 <= 3"),
            "Le(Mul(Add(Identifier(a), Integer(1)), Integer(2)), Integer(3))"
        );
    }

    #[test]
    fn test_condition_needs_relational_operator() {
        let err = parse("while a x = 1", Syntax::Myrmidon).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1,9-10: syntax error: unexpected identifier 'x', expecting relational operator"
        );
    }

    #[test]
    fn test_unbalanced_parens() {
        let err = parse("x = (1+2", Syntax::Myrmidon).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1,9-9: syntax error: unexpected end of file, expecting ')'"
        );
    }
}
