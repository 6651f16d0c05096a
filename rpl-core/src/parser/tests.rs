use crate::{
    lexer::prelude::{LexicalErrorType, Token},
    parser::prelude::{parse_module, Expression, ParseError, ParseErrorType, Primitive, Statement}
};

#[test]
fn test_statements() -> Result<(), ParseError> {
    let input = r#"
        # every statement form
        x = 1;
        if (x == 1) { println("one"); } else { print("other"); }
        while (x < 10) { x = x + 1; }
        for (i = 0; i < 3; i = i + 1) { println(i); }
        fn greet(name, times) { println("hi " + name); }
        greet("bob", 2);
        items = [1, "two", [3]];
        items.append(4);
    "#;

    let parsed = parse_module(input)?;
    let statements = &parsed.program.statements;

    assert_eq!(statements.len(), 8);
    assert!(matches!(statements[0], Statement::Assignment(_)));
    assert!(matches!(statements[1], Statement::If(ref if_) if if_.alternative.is_some()));
    assert!(matches!(statements[2], Statement::While(_)));
    assert!(matches!(statements[3], Statement::For(_)));
    assert!(matches!(statements[4], Statement::FunctionDef(ref function) if function.parameters.len() == 2));
    assert!(matches!(statements[5], Statement::FunctionCall(ref call) if call.arguments.len() == 2));
    assert!(matches!(statements[6], Statement::Assignment(_)));
    assert!(matches!(statements[7], Statement::MethodCall(ref call) if call.method.value == "append"));

    assert_eq!(parsed.comments.len(), 1);
    assert!(parsed.skipped.is_empty());

    Ok(())
}

#[test]
fn test_no_precedence() -> Result<(), ParseError> {
    let cases = [
        ("x = 1 + 2 * 3;", "x = ((1 + 2) * 3);"),
        ("x = 2 + 3 * 4 - 5 / 6;", "x = ((((2 + 3) * 4) - 5) / 6);"),
        ("x = 1 * 2 + 3;", "x = ((1 * 2) + 3);"),
        ("x = 1 + (2 * 3);", "x = (1 + (2 * 3));"),
        ("x = a < b == c;", "x = ((a < b) == c);"),
    ];

    for (input, expected) in cases {
        let parsed = parse_module(input)?;

        assert_eq!(parsed.program.to_string(), expected);
    }

    Ok(())
}

#[test]
fn test_prefix() -> Result<(), ParseError> {
    let parsed = parse_module("x = - -1 + !y;")?;

    assert_eq!(parsed.program.to_string(), "x = (--1 + !y);");

    let Statement::Assignment(assignment) = &parsed.program.statements[0] else {
        panic!("expected assignment");
    };

    let Expression::Infix(infix) = &assignment.value else {
        panic!("expected infix");
    };

    assert_eq!(infix.operator, Token::Plus);
    assert!(matches!(*infix.left, Expression::Prefix(ref prefix) if prefix.operator == Token::Minus));

    Ok(())
}

#[test]
fn test_for_step_is_an_expression() -> Result<(), ParseError> {
    let parsed = parse_module("for (i = 0; i < 3; i = i + 1) { println(i); }")?;

    let Statement::For(loop_) = &parsed.program.statements[0] else {
        panic!("expected for loop");
    };

    assert_eq!(loop_.identifier.value, "i");
    assert!(matches!(loop_.start, Expression::Primitive(Primitive::Int { value: 0, .. })));
    assert_eq!(loop_.step.to_string(), "((i = i) + 1)");
    assert_eq!(loop_.block.statements.len(), 1);

    Ok(())
}

#[test]
fn test_calls_in_expressions() -> Result<(), ParseError> {
    let parsed = parse_module("n = a.count() + size(a, 1); m = [];")?;

    assert_eq!(parsed.program.to_string(), "n = (a.count() + size(a, 1));\nm = [];");

    let Statement::Assignment(assignment) = &parsed.program.statements[0] else {
        panic!("expected assignment");
    };

    let Expression::Infix(infix) = &assignment.value else {
        panic!("expected infix");
    };

    assert!(matches!(*infix.left, Expression::MethodCall(_)));
    assert!(matches!(*infix.right, Expression::FunctionCall(_)));

    Ok(())
}

#[test]
fn test_spans() -> Result<(), ParseError> {
    let parsed = parse_module("abc = 12;\nprint(abc);")?;
    let statements = &parsed.program.statements;

    assert_eq!(statements[0].location().start, 0);
    assert_eq!(statements[0].location().end, 9);
    assert_eq!(statements[1].location().start, 10);
    assert_eq!(statements[1].location().end, 21);

    Ok(())
}

#[test]
fn test_top_level_skips_stray_tokens() -> Result<(), ParseError> {
    let parsed = parse_module("; 42 x = 1; ) \"s\" println(x);")?;

    assert_eq!(parsed.program.statements.len(), 2);

    let skipped = parsed.skipped.iter()
        .map(|(token, _)| token.clone())
        .collect::<Vec<Token>>();

    assert_eq!(skipped, vec![
        Token::Semicolon,
        Token::Int(42),
        Token::RParen,
        Token::Str(String::from("s")),
    ]);

    Ok(())
}

#[test]
fn test_blocks_reject_stray_tokens() {
    let err = parse_module("if (1) { 42; }").unwrap_err();

    assert!(matches!(err.error, ParseErrorType::ExpectedStatement { token: Token::Int(42) }));
}

#[test]
fn test_blocks_skip_semicolons() -> Result<(), ParseError> {
    let parsed = parse_module("while (x) { ; x = 0;; }")?;

    let Statement::While(loop_) = &parsed.program.statements[0] else {
        panic!("expected while loop");
    };

    assert_eq!(loop_.block.statements.len(), 1);

    Ok(())
}

#[test]
fn test_missing_tokens() {
    let cases = [
        ("print(1)", "SEMICOLON"),
        ("print 1;", "LPAREN"),
        ("if (1 { }", "RPAREN"),
        ("if (1) println(1);", "LBRACE"),
        ("for (i 0; i; i) { }", "OPERATOR `=`"),
        ("for (0 = 1; i; i) { }", "IDENTIFIER"),
        ("fn f(a b) { }", "RPAREN"),
        ("x = [1, 2;", "RBRACKET"),
        ("x.count;", "LPAREN"),
        ("x 1;", "OPERATOR `=`"),
    ];

    for (input, expected) in cases {
        let err = match parse_module(input) {
            Err(err) => err,
            Ok(parsed) => panic!("Expected error for {input:?}, got {}", parsed.program)
        };

        match err.error {
            ParseErrorType::UnexpectedToken { expected: ref found, .. }
            | ParseErrorType::UnexpectedEof { expected: ref found } => {
                assert_eq!(found, expected, "wrong expectation for {input:?}")
            },
            other => panic!("Unexpected error {other:?} for {input:?}")
        }
    }
}

#[test]
fn test_unclosed_block_is_eof() {
    let err = parse_module("while (1) { x = 1;").unwrap_err();

    assert_eq!(err.error, ParseErrorType::UnexpectedEof { expected: "RBRACE".to_string() });
    assert_eq!(err.span.start, 18);
}

#[test]
fn test_expression_expected() {
    let err = parse_module("x = ;").unwrap_err();

    assert!(matches!(err.error, ParseErrorType::ExpectedExpression { token: Token::Semicolon }));
    assert_eq!(err.to_string(), "expected an expression, found SEMICOLON");
}

#[test]
fn test_lex_error_takes_priority() {
    let err = parse_module("x = 1; y = \"open").unwrap_err();

    match err.error {
        ParseErrorType::LexError { error } => {
            assert_eq!(error.error, LexicalErrorType::UnterminatedString);
            assert_eq!(error.location.start, 11);
        },
        other => panic!("Expected lexical error, got {other:?}")
    }
}

#[test]
fn test_empty_program() -> Result<(), ParseError> {
    assert!(parse_module("")?.program.statements.is_empty());
    assert!(parse_module("# nothing\n")?.program.statements.is_empty());

    Ok(())
}
