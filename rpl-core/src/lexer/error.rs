use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    #[error("invalid character `{tok}`")]
    UnrecognizedToken { tok: char },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("integer literal does not fit in 64 bits")]
    IntegerOverflow,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{error} at position {}", .location.start)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("Invalid character", vec![format!("`{tok}` does not start any token")])
            },
            LexicalErrorType::UnterminatedString => {
                ("Missing closing `\"` of the string literal", vec![])
            },
            LexicalErrorType::IntegerOverflow => {
                ("Integer literal is too large", vec![format!("The largest integer is {}", i64::MAX)])
            }
        }
    }
}
