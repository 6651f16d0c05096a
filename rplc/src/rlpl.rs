use std::io::Write;

use rpl_core::lexer::prelude::{lex, Token};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		// end of input
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		let input = input.trim_end_matches(['\n', '\r']);

		match input {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				for res in lex(input) {
					match res {
						Ok((start, token, end)) => {
							if token != Token::Eof {
								println!("{token} [{start}..{end}]");
							}
						},
						Err(err) => {
							let (title, extra) = err.details();
							println!("[at {}] Lexical Error: {}", err.location.start, title);
							if !extra.is_empty() {
								println!("{}", extra.join("\n"));
							}
						}
					}
				}
			}
		}
	}
}
