// Integration tests for whole programs in both surface syntaxes

use gck::errors::CompileError;
use gck::parser::{parse, Lexer, Node, Operand, Parser, Span, Syntax};

/// Text a node's span covers on its source line
fn span_text(node: &Node) -> String {
    let debug = node.debug().expect("node without debug info");
    debug
        .line
        .chars()
        .skip(debug.col_start - 1)
        .take(debug.col_end - debug.col_start)
        .collect()
}

fn operator_text(kind: Operand) -> Option<&'static str> {
    Some(match kind {
        Operand::Assign => "=",
        Operand::While => "while",
        Operand::If => "if",
        Operand::Lt => "<",
        Operand::Gt => ">",
        Operand::Le => "<=",
        Operand::Ge => ">=",
        Operand::Ne => "!=",
        Operand::Eq => "==",
        Operand::Add => "+",
        Operand::Sub | Operand::Uminus => "-",
        Operand::Mul => "*",
        Operand::Div => "/",
        _ => return None,
    })
}

#[test]
fn test_assignment_program() {
    let tree = parse("x = 1+2", Syntax::Myrmidon).expect("Parsing failed");
    assert_eq!(tree.kind(), Operand::Program);
    assert_eq!(
        tree.children()[0].to_string(),
        "Assign(Identifier(x), Add(Integer(1), Integer(2)))"
    );
}

#[test]
fn test_while_and_if_one_liners() {
    let tree = parse("while a<10 x=x+1", Syntax::Myrmidon).expect("Parsing failed");
    assert_eq!(
        tree.children()[0].to_string(),
        "While(Lt(Identifier(a), Integer(10)), Assign(Identifier(x), Add(Identifier(x), Integer(1))))"
    );

    let tree = parse("if a==1 x=1 else x=2", Syntax::Myrmidon).expect("Parsing failed");
    assert_eq!(
        tree.children()[0].to_string(),
        "If(Eq(Identifier(a), Integer(1)), Assign(Identifier(x), Integer(1)), Assign(Identifier(x), Integer(2)))"
    );
}

#[test]
fn test_blank_lines_are_eos_sentinels() {
    let tree = parse("\n\n\n", Syntax::Myrmidon).expect("Parsing failed");
    assert_eq!(tree.to_string(), "Program(Eos(Eos(Eos, Eos), Eos))");
    for (_, node) in tree.walk().into_iter().skip(1) {
        assert!(node.is_eos());
        assert!(node.debug().is_none());
        assert!(node.payload().is_none());
    }
    assert!(tree.statements().is_empty());

    let tree = parse("a = 1\n\nb = 2\n", Syntax::Myrmidon).expect("Parsing failed");
    let names: Vec<_> = tree
        .statements()
        .iter()
        .map(|s| s.children()[0].as_identifier().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_statements_keep_source_order() {
    let sources = [
        (Syntax::Myrmidon, "a = 1\nb = 2\nc = 3\nd = 4\n"),
        (Syntax::Sml, "a = 1;\nb = 2;\nc = 3;\nd = 4;\n"),
    ];
    for (syntax, source) in sources {
        let tree = parse(source, syntax).expect("Parsing failed");
        let lines: Vec<usize> = tree
            .statements()
            .iter()
            .map(|s| s.debug().map_or(0, |d| d.line_no))
            .collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
    }
}

#[test]
fn test_debug_info_points_at_leading_token() {
    let source = "\
total = 0
i = 1
while i <= 10 {
  if (i - 2*(i/2)) == 0 total = total + i else total = total - -i
  i = i + 1
}
";
    let tree = parse(source, Syntax::Myrmidon).expect("Parsing failed");
    let source_lines: Vec<&str> = source.lines().collect();

    for (_, node) in tree.walk() {
        let Some(debug) = node.debug() else {
            assert!(node.is_eos(), "{} without debug info", node.kind());
            continue;
        };
        assert_eq!(&*debug.line, source_lines[debug.line_no - 1]);
        if let Some(name) = node.as_identifier() {
            assert_eq!(span_text(node), name);
        } else if let Some(value) = node.as_integer() {
            assert_eq!(span_text(node), value.to_string());
        } else if let Some(text) = operator_text(node.kind()) {
            assert_eq!(span_text(node), text, "{} at {}", node.kind(), debug.span());
        }
    }
}

#[test]
fn test_sml_program() {
    let source = "\
n = 10;
while n > 1 {
  if n - 2*(n/2) == 0 {
    n = n / 2;
  } else if n == 3 {
    n = 1;
  } else {
    n = 3*n + 1;
  };
}
";
    let tree = parse(source, Syntax::Sml).expect("Parsing failed");
    let statements = tree.statements();
    assert_eq!(statements.len(), 2);
    let body = statements[1];
    assert_eq!(body.kind(), Operand::While);

    // The `;` after the `if` is an empty statement next to it
    assert_eq!(body.children()[1].kind(), Operand::Eos);
    let inner = body.children()[1].statements();
    assert_eq!(inner.len(), 1);
    let chained = &inner[0].children()[2];
    assert_eq!(chained.kind(), Operand::If);
    assert_eq!(chained.children()[0].to_string(), "Eq(Identifier(n), Integer(3))");
}

#[test]
fn test_sml_statements_span_lines() {
    let source = "total =\n  1 +\n  2; i = 0; while i < 2 { i = i + 1; }";
    let tree = parse(source, Syntax::Sml).expect("Parsing failed");
    let kinds: Vec<_> = tree.statements().iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec![Operand::Assign, Operand::Assign, Operand::While]);
    assert_eq!(
        tree.statements()[0].to_string(),
        "Assign(Identifier(total), Add(Integer(1), Integer(2)))"
    );

    let err = parse("x = 1\n", Syntax::Sml).unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 2,1-1: syntax error: unexpected end of file, expecting ';'"
    );
}

#[test]
fn test_myrmidon_body_must_share_the_condition_line() {
    let err = parse("while x > 0\n  x = x - 1\n", Syntax::Myrmidon).unwrap_err();
    assert_eq!(err.span(), Some(Span::new(1, 12, 13)));
    assert!(err.to_string().ends_with("unexpected end of line, expecting statement"));

    // A braced body may open on the condition line and continue below
    let tree = parse("while x > 0 {\n  x = x - 1\n}\n", Syntax::Myrmidon).expect("Parsing failed");
    let body = &tree.statements()[0].children()[1];
    assert_eq!(body.statements().len(), 1);
    assert_eq!(body.statements()[0].kind(), Operand::Assign);
}

#[test]
fn test_long_program_parses_walks_and_drops() {
    let source = "x = x + 1\n".repeat(200_000);
    let tree = parse(&source, Syntax::Myrmidon).expect("Parsing failed");
    assert_eq!(tree.statements().len(), 200_000);
    // Program, 199_999 joiners, and five nodes per assignment
    assert_eq!(tree.walk().len(), 1 + 199_999 + 5 * 200_000);
    let last = tree.statements()[199_999];
    assert_eq!(last.debug().map(|d| d.line_no), Some(200_000));
    drop(tree);

    let source = "i = i + 1;\n".repeat(200_000);
    let tree = parse(&source, Syntax::Sml).expect("Parsing failed");
    assert_eq!(tree.clone(), tree);
}

#[test]
fn test_sml_rejects_unbraced_body_that_myrmidon_accepts() {
    let source = "if a < 1 b = 2\n";
    assert!(parse(source, Syntax::Myrmidon).is_ok());
    let err = parse(source, Syntax::Sml).unwrap_err();
    assert_eq!(err.span(), Some(Span::new(1, 10, 11)));
}

#[test]
fn test_single_unexpected_token_gives_one_error() {
    let mut parser =
        Parser::new(Lexer::new("x = 1\ny = 2 +\nz = 3\n"), Syntax::Myrmidon).expect("lexer failed");
    let outcome = parser.parse_program();
    assert!(outcome.tree.is_none());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "line 2,8-9: syntax error: unexpected end of line, expecting expression"
    );
}

#[test]
fn test_malformed_literal_is_a_typed_error() {
    let err = parse("x = 1.2.3\n", Syntax::Myrmidon).unwrap_err();
    match err {
        CompileError::Lex(lex) => {
            assert_eq!(lex.span, Span::new(1, 5, 10));
            assert_eq!(lex.reason, "invalid number literal '1.2.3'");
        }
        other => panic!("expected a lexical error, got {other:?}"),
    }
}

#[test]
fn test_unknown_character() {
    let err = parse("x = 1 # comment\n", Syntax::Myrmidon).unwrap_err();
    assert_eq!(err.to_string(), "line 1,7-8: unexpected character '#'");
}
