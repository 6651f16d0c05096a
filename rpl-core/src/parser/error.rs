use thiserror::Error;

use crate::{lexer::prelude::{LexicalError, Token, TokenKind}, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("expected {expected}, found {}", .token.kind())]
    UnexpectedToken {
        token: Token,
        expected: String,
    },
    #[error("expected a statement, found {}", .token.kind())]
    ExpectedStatement { token: Token },
    #[error("expected an expression, found {}", .token.kind())]
    ExpectedExpression { token: Token },
    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: String },
    #[error("{error}")]
    LexError { error: LexicalError },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = describe(token);

                ("Not expected this", vec![format!("Found {found}, expected {expected}")])
            },
            ParseErrorType::ExpectedStatement { token } => {
                let found = describe(token);

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(["`if`", "`while`", "`for`", "`print`", "`println`", "`fn`", "an Identifier"]
                        .iter()
                        .map(|s| format!("- {s}")))
                    .collect();

                ("Not a statement", messages)
            },
            ParseErrorType::ExpectedExpression { token } => {
                let found = describe(token);

                ("Expected expression", vec![format!("Found {found}, expected an Integer, String, Identifier, `(` or `[`")])
            },
            ParseErrorType::UnexpectedEof { expected } => {
                ("Unexpected end of file", vec![format!("Expected {expected}")])
            },
            ParseErrorType::LexError { error } => error.details()
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Int(_) => "an Integer".to_string(),
        Token::Str(_) => "a String".to_string(),
        Token::Ident(_) => "an Identifier".to_string(),
        _ if token.is_reserved_word() => format!("the keyword `{}`", token.as_literal()),
        _ => format!("`{}`", token.as_literal())
    }
}

pub fn expected_name(token: &Token) -> String {
    match token.kind() {
        TokenKind::Operator | TokenKind::Keyword => format!("{} `{}`", token.kind(), token.as_literal()),
        kind => format!("{kind}")
    }
}
