use crate::{lexer::prelude::{LexResult, LexicalError, Lexer, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{expected_name, ParseError, ParseErrorType};
use super::ast::{Expression, Parsed, Program};

pub trait Parse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>, left: Expression) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub comments: Vec<SrcSpan>,
    pub skipped: Vec<(Token, SrcSpan)>,
    pub lex_errors: Vec<LexicalError>,

    eof: u32,
    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            comments: vec![],
            skipped: vec![],
            lex_errors: vec![],

            eof: 0,
            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        loop {
            match self.tokens.next() {
                Some(Ok((start, Token::Comment, end))) => {
                    self.comments.push(SrcSpan { start, end })
                },
                Some(Ok((start, Token::Eof, _))) => {
                    self.eof = start;

                    break;
                },
                Some(Err(err)) => {
                    self.eof = err.location.start;
                    self.lex_errors.push(err);

                    break;
                },
                Some(Ok(tok)) => {
                    next = Some(tok);

                    break;
                },
                None => {
                    break;
                }
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next;

        t
    }

    pub fn current_is(&self, token: &Token) -> bool {
        matches!(&self.current_token, Some((_, tok, _)) if tok == token)
    }

    pub fn next_is(&self, token: &Token) -> bool {
        matches!(&self.next_token, Some((_, tok, _)) if tok == token)
    }

    pub fn skip(&mut self) {
        if let Some((start, token, end)) = self.next_token() {
            self.skipped.push((token, SrcSpan { start, end }));
        }
    }

    pub fn parse(&mut self) -> Result<Parsed, ParseError> {
        let program = Program::parse(self);

        if let Some(error) = self.lex_errors.first() {
            return parse_error(
                ParseErrorType::LexError { error: *error },
                error.location
            );
        }

        Ok(Parsed {
            program: program?,
            comments: std::mem::take(&mut self.comments),
            skipped: std::mem::take(&mut self.skipped),
        })
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: expected_name(&token),
                    },
                    SrcSpan { start, end }
                )
            },
            None => self.unexpected_eof(expected_name(&token))
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: "IDENTIFIER".to_string(),
                    },
                    SrcSpan { start, end }
                )
            },
            None => self.unexpected_eof("IDENTIFIER".to_string())
        }
    }

    pub fn unexpected_eof<R>(&self, expected: String) -> Result<R, ParseError> {
        parse_error(
            ParseErrorType::UnexpectedEof { expected },
            SrcSpan { start: self.eof, end: self.eof }
        )
    }
}

pub fn parse_module(src: &str) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);
    let parsed = parser.parse()?;

    Ok(parsed)
}

pub fn parse_module_from_stream(stream: impl Iterator<Item = char>) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);
    let parsed = parser.parse()?;

    Ok(parsed)
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
