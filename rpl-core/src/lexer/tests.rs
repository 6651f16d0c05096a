use super::prelude::{lex, tokenize, Lexer, LexicalError, LexicalErrorType, Token, TokenKind};

#[test]
fn test_input() -> std::result::Result<(), LexicalError> {
    let input = r#"
        # squares of the first numbers
        fn square(x) {
            println(x * x);
        }

        for (i = 0; i <= 10; i = i + 1) {
            if (i != 3) { square(i); } else { print("skip"); }
        }

        a = [1, 2];
        a.append(-3);
        while (a.count() >= 1) { a.pop(); }
        ok = !(a == 0) > 1 / 2;
    "#;

    let tokens = vec![
        Token::Fn,
        Token::Ident(String::from("square")),
        Token::LParen,
        Token::Ident(String::from("x")),
        Token::RParen,
        Token::LBrace,
        Token::Println,
        Token::LParen,
        Token::Ident(String::from("x")),
        Token::Asterisk,
        Token::Ident(String::from("x")),
        Token::RParen,
        Token::Semicolon,
        Token::RBrace,

        Token::For,
        Token::LParen,
        Token::Ident(String::from("i")),
        Token::Assign,
        Token::Int(0),
        Token::Semicolon,
        Token::Ident(String::from("i")),
        Token::LessThanOrEqual,
        Token::Int(10),
        Token::Semicolon,
        Token::Ident(String::from("i")),
        Token::Assign,
        Token::Ident(String::from("i")),
        Token::Plus,
        Token::Int(1),
        Token::RParen,
        Token::LBrace,
        Token::If,
        Token::LParen,
        Token::Ident(String::from("i")),
        Token::NotEqual,
        Token::Int(3),
        Token::RParen,
        Token::LBrace,
        Token::Ident(String::from("square")),
        Token::LParen,
        Token::Ident(String::from("i")),
        Token::RParen,
        Token::Semicolon,
        Token::RBrace,
        Token::Else,
        Token::LBrace,
        Token::Print,
        Token::LParen,
        Token::Str(String::from("skip")),
        Token::RParen,
        Token::Semicolon,
        Token::RBrace,
        Token::RBrace,

        Token::Ident(String::from("a")),
        Token::Assign,
        Token::LBracket,
        Token::Int(1),
        Token::Comma,
        Token::Int(2),
        Token::RBracket,
        Token::Semicolon,

        Token::Ident(String::from("a")),
        Token::Dot,
        Token::Ident(String::from("append")),
        Token::LParen,
        Token::Minus,
        Token::Int(3),
        Token::RParen,
        Token::Semicolon,

        Token::While,
        Token::LParen,
        Token::Ident(String::from("a")),
        Token::Dot,
        Token::Ident(String::from("count")),
        Token::LParen,
        Token::RParen,
        Token::GreaterThanOrEqual,
        Token::Int(1),
        Token::RParen,
        Token::LBrace,
        Token::Ident(String::from("a")),
        Token::Dot,
        Token::Ident(String::from("pop")),
        Token::LParen,
        Token::RParen,
        Token::Semicolon,
        Token::RBrace,

        Token::Ident(String::from("ok")),
        Token::Assign,
        Token::Bang,
        Token::LParen,
        Token::Ident(String::from("a")),
        Token::Equal,
        Token::Int(0),
        Token::RParen,
        Token::GreaterThan,
        Token::Int(1),
        Token::Slash,
        Token::Int(2),
        Token::Semicolon,
    ];

    let lexed = tokenize(input)?
        .into_iter()
        .map(|(_, token, _)| token)
        .collect::<Vec<Token>>();

    assert_eq!(tokens, lexed);

    Ok(())
}

#[test]
fn test_comments_are_lexed_but_not_tokenized() -> std::result::Result<(), LexicalError> {
    let input = "a = 1; # a = 2;\n# only a comment\nb = a;";

    let raw = lex(input)
        .filter_map(|token| token.ok())
        .filter(|(_, token, _)| *token == Token::Comment)
        .count();

    assert_eq!(raw, 2);

    let tokens = tokenize(input)?;

    assert_eq!(tokens.len(), 8);
    assert!(tokens.iter().all(|(_, token, _)| *token != Token::Comment));

    Ok(())
}

#[test]
fn test_spans() -> std::result::Result<(), LexicalError> {
    let tokens = tokenize("x >= \"hi\"")?;

    assert_eq!(tokens, vec![
        (0, Token::Ident(String::from("x")), 1),
        (2, Token::GreaterThanOrEqual, 4),
        (5, Token::Str(String::from("hi")), 9),
    ]);

    Ok(())
}

#[test]
fn test_strings_are_raw() -> std::result::Result<(), LexicalError> {
    let tokens = tokenize(r#""a \n # b" "" "x=1;""#)?;

    let strings = tokens.into_iter()
        .map(|(_, token, _)| token)
        .collect::<Vec<Token>>();

    assert_eq!(strings, vec![
        Token::Str(String::from("a \\n # b")),
        Token::Str(String::from("")),
        Token::Str(String::from("x=1;")),
    ]);

    Ok(())
}

#[test]
fn test_keywords_and_kinds() {
    let tokens = tokenize("if else while for print println fn iff printer")
        .expect("keywords lex");

    let kinds = tokens.iter()
        .map(|(_, token, _)| token.kind())
        .collect::<Vec<TokenKind>>();

    assert_eq!(kinds, vec![
        TokenKind::Keyword,
        TokenKind::Keyword,
        TokenKind::Keyword,
        TokenKind::Keyword,
        TokenKind::Keyword,
        TokenKind::Keyword,
        TokenKind::Keyword,
        TokenKind::Identifier,
        TokenKind::Identifier,
    ]);
}

#[test]
fn test_identifiers_stop_at_digits() {
    let tokens = tokenize("abc123").expect("identifier lexes");

    assert_eq!(tokens, vec![
        (0, Token::Ident(String::from("abc")), 3),
        (3, Token::Int(123), 6),
    ]);
}

#[test]
fn test_invalid_input() {
    let fails = vec![
        ("a = 1 @ 2;", LexicalErrorType::UnrecognizedToken { tok: '@' }, 6),
        ("x = 'single';", LexicalErrorType::UnrecognizedToken { tok: '\'' }, 4),
        ("print(\"never closed);", LexicalErrorType::UnterminatedString, 6),
        ("n = 99999999999999999999;", LexicalErrorType::IntegerOverflow, 4),
    ];

    for (input, fail, position) in fails {
        let err = match tokenize(input) {
            Err(err) => err,
            Ok(value) => panic!("Expected {fail:?} for {input:?} but got Ok({value:?})")
        };

        assert_eq!(fail, err.error);
        assert_eq!(position, err.location.start, "wrong position for {input:?}");
    }
}

#[test]
fn test_error_message_names_position() {
    let err = tokenize("a = $").unwrap_err();

    assert_eq!(err.to_string(), "invalid character `$` at position 4");
}

#[test]
fn test_iterator_stops_after_eof() {
    let mut lexer = Lexer::new("x".char_indices().map(|(i, c)| (i as u32, c)));

    assert!(matches!(lexer.next(), Some(Ok((0, Token::Ident(_), 1)))));
    assert!(matches!(lexer.next(), Some(Ok((_, Token::Eof, _)))));
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
}

#[test]
fn test_iterator_stops_after_error() {
    let results = lex("a ~ b").collect::<Vec<_>>();

    assert_eq!(results.len(), 2);
    assert!(results[1].is_err());
}

#[test]
fn test_empty_input() -> std::result::Result<(), LexicalError> {
    assert!(tokenize("")?.is_empty());
    assert!(tokenize("   \n\t  # nothing here")?.is_empty());

    Ok(())
}

#[test]
fn test_eof_position() {
    let eof = |src: &str| lex(src).last().and_then(|res| res.ok());

    assert_eq!(eof(""), Some((0, Token::Eof, 0)));
    assert_eq!(eof("x = 1;  "), Some((8, Token::Eof, 8)));
    assert_eq!(eof("\"é\""), Some((4, Token::Eof, 4)));
}
