use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use std::fmt::Display;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"if" => Token::If,
		"else" => Token::Else,
		"while" => Token::While,
		"for" => Token::For,
		"print" => Token::Print,
		"println" => Token::Println,
		"fn" => Token::Fn,

		_ => return None
	})
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,

	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			input,

			finished: false,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn next_token(&mut self) -> LexResult {
		loop {
			match self.ch {
				Some(ch) if ch.is_whitespace() => {
					let _ = self.next_char();
				},
				_ => break
			}
		}

		let span = match self.ch {
			Some(ch) => match ch {
				'#' => return Ok(self.lex_comment()),
				'"' => return self.lex_string(),
				'0'..='9' => return self.lex_number(),
				'a'..='z' | 'A'..='Z' => return Ok(self.lex_ident()),
				'=' => self.eat_with_equal(Token::Assign, Token::Equal),
				'!' => self.eat_with_equal(Token::Bang, Token::NotEqual),
				'>' => self.eat_with_equal(Token::GreaterThan, Token::GreaterThanOrEqual),
				'<' => self.eat_with_equal(Token::LessThan, Token::LessThanOrEqual),
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'*' => self.eat_one_char(Token::Asterisk),
				'/' => self.eat_one_char(Token::Slash),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'{' => self.eat_one_char(Token::LBrace),
				'}' => self.eat_one_char(Token::RBrace),
				'[' => self.eat_one_char(Token::LBracket),
				']' => self.eat_one_char(Token::RBracket),
				';' => self.eat_one_char(Token::Semicolon),
				',' => self.eat_one_char(Token::Comma),
				'.' => self.eat_one_char(Token::Dot),
				c => {
					let location = self.position;
					return Err(LexicalError {
						error: LexicalErrorType::UnrecognizedToken { tok: c },
						location: SrcSpan {
							start: location,
							end: location + c.len_utf8() as u32,
						},
					});
				}
			},
			None => (self.position, Token::Eof, self.position)
		};

		Ok(span)
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, |ch| ch.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_with_equal(&mut self, single: Token, double: Token) -> Spanned {
		if self.next_ch == Some('=') {
			let start_pos = self.position;
			self.next_char();
			self.next_char();
			let end_pos = self.position;

			(start_pos, double, end_pos)
		} else {
			self.eat_one_char(single)
		}
	}

	fn lex_ident(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch.filter(|ch| ch.is_ascii_alphabetic()) {
			ident.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		match str_to_keyword(&ident) {
			Some(tok) => (start_pos, tok, end_pos),
			None => (start_pos, Token::Ident(ident), end_pos)
		}
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut value = String::new();

		while let Some(ch) = self.ch.filter(|ch| ch.is_ascii_digit()) {
			value.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		match value.parse::<i64>() {
			Ok(value) => Ok((start_pos, Token::Int(value), end_pos)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::IntegerOverflow,
				location: SrcSpan::new(start_pos, end_pos)
			})
		}
	}

	fn lex_string(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut value = String::new();

		self.next_char(); // skip opening quote

		loop {
			match self.ch {
				Some('"') => break,
				Some(ch) => {
					value.push(ch);
					self.next_char();
				},
				None => return Err(LexicalError {
					error: LexicalErrorType::UnterminatedString,
					location: SrcSpan::new(start_pos, self.position)
				})
			}
		}

		self.next_char(); // skip closing quote

		let end_pos = self.position;

		Ok((start_pos, Token::Str(value), end_pos))
	}

	fn lex_comment(&mut self) -> Spanned {
		let start_pos = self.position;

		while self.ch.is_some_and(|ch| ch != '\n') {
			self.next_char();
		}

		let end_pos = self.position;

		(start_pos, Token::Comment, end_pos)
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if matches!(token, Ok((_, Token::Eof, _)) | Err(_)) {
			self.finished = true;
		}

		Some(token)
	}
}

pub fn lex(src: &str) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)))
}

pub fn tokenize(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	let mut tokens = vec![];

	for token in lex(src) {
		match token? {
			(_, Token::Eof, _) => break,
			(_, Token::Comment, _) => continue,
			spanned => tokens.push(spanned)
		}
	}

	Ok(tokens)
}
