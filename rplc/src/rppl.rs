use std::io::Write;

use rpl_core::parser::prelude::parse_module;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		let input = input.trim_end_matches(['\n', '\r']);

		match input {
			"" => {},
			".exit" => return Ok(()),
			_ => match parse_module(input) {
				Ok(parsed) => {
					println!("{}", parsed.program);

					for (token, location) in parsed.skipped {
						println!("skipped {token} at {location}");
					}
				},
				Err(err) => {
					let (message, messages) = err.details();

					println!("Parse error: {} [at {}].\n\t{}", message, err.span, messages.join(";\n\t"))
				}
			}
		}
	}
}
