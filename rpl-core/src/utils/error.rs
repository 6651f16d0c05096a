use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::error::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan
};
use super::diagnostic::{Diagnostic, Label, Level, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to tokenize source code")]
    Lex {
        path: PathBuf,
        src: String,
        error: LexicalError
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("program failed at runtime")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    /// Lexical failures surface through the parser; unwrap them so they
    /// are reported as such.
    pub fn from_parse(path: PathBuf, src: String, error: ParseError) -> Self {
        match error.error {
            ParseErrorType::LexError { error } => Error::Lex { path, src, error },
            _ => Error::Parse { path, src, error }
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex { path, src, error } => {
                let (label, extra) = error.details();

                vec![located(
                    "Lexical error",
                    extra.join("\n"),
                    src,
                    path,
                    Label { text: Some(label.to_string()), span: error.location }
                )]
            },
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();

                // past the last character there is nothing to underline
                let span = if matches!(error.error, ParseErrorType::UnexpectedEof { .. }) {
                    let end = src.trim_end().len() as u32;

                    SrcSpan { start: end, end }
                } else {
                    error.span
                };

                vec![located(
                    "Syntax error",
                    extra.join("\n"),
                    src,
                    path,
                    Label { text: Some(label.to_string()), span }
                )]
            },
            Error::Runtime { path, src, error } => {
                let (label, extra) = error.details();

                vec![located(
                    "Runtime error",
                    extra.join("\n"),
                    src,
                    path,
                    Label { text: Some(label.to_string()), span: error.location }
                )]
            },
            Error::StdIo { err, } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    level: Level::Error,
                    location: None,
                }]
            }
        }
    }
}

fn located<'a>(title: &str, text: String, src: &'a str, path: &PathBuf, label: Label) -> Diagnostic<'a> {
    Diagnostic {
        title: title.into(),
        text,
        level: Level::Error,
        location: Some(Location {
            src,
            path: path.clone(),
            label,
            extra_labels: vec![]
        }),
    }
}
