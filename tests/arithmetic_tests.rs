// Arithmetic precedence and literal tests

use gck::parser::{parse, Node, Operand, Syntax};
use gck::rational::Rational;

/// Right-hand side of `x = <expr>`
fn rhs(expr: &str) -> Node {
    let tree = parse(&format!("x = {}\n", expr), Syntax::Myrmidon).expect("Parsing failed");
    let assign = tree.statements()[0].clone();
    assert_eq!(assign.kind(), Operand::Assign);
    assign.children()[1].clone()
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(
        rhs("2+3*4").to_string(),
        "Add(Integer(2), Mul(Integer(3), Integer(4)))"
    );
    assert_eq!(
        rhs("2-3/4").to_string(),
        "Sub(Integer(2), Div(Integer(3), Integer(4)))"
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        rhs("(2+3)*4").to_string(),
        "Mul(Add(Integer(2), Integer(3)), Integer(4))"
    );
    assert_eq!(
        rhs("2*(3-(4/5))").to_string(),
        "Mul(Integer(2), Sub(Integer(3), Div(Integer(4), Integer(5))))"
    );
}

#[test]
fn test_unary_minus_binds_tightest() {
    assert_eq!(
        rhs("-a-b").to_string(),
        "Sub(Uminus(Identifier(a)), Identifier(b))"
    );
    assert_eq!(
        rhs("-a*b").to_string(),
        "Mul(Uminus(Identifier(a)), Identifier(b))"
    );
    assert_eq!(
        rhs("-(a+b)").to_string(),
        "Uminus(Add(Identifier(a), Identifier(b)))"
    );
}

#[test]
fn test_long_chains_are_left_associative() {
    assert_eq!(
        rhs("1-2+3-4").to_string(),
        "Sub(Add(Sub(Integer(1), Integer(2)), Integer(3)), Integer(4))"
    );
    assert_eq!(
        rhs("1+2*3-4/2").to_string(),
        "Sub(Add(Integer(1), Mul(Integer(2), Integer(3))), Div(Integer(4), Integer(2)))"
    );
}

#[test]
fn test_decimal_literals_are_exact_rationals() {
    let node = rhs("3.5");
    assert_eq!(node.kind(), Operand::Number);
    assert_eq!(node.as_number(), Rational::from_fraction(7, 2).as_ref());

    let node = rhs("0.1");
    assert_eq!(node.as_number(), Rational::from_fraction(1, 10).as_ref());

    let node = rhs("3");
    assert_eq!(node.kind(), Operand::Integer);
    assert_eq!(node.as_integer(), Some(3));

    let node = rhs("1.5e2");
    assert_eq!(node.as_number(), Some(&Rational::from_integer(150)));
}

#[test]
fn test_literal_arithmetic_with_rationals() {
    // A consumer folding `0.1 + 0.2` gets exactly 3/10
    let sum = rhs("0.1 + 0.2");
    let (a, b) = (&sum.children()[0], &sum.children()[1]);
    let total = a.as_number().unwrap() + b.as_number().unwrap();
    assert_eq!(total, Rational::from_fraction(3, 10).unwrap());
}
