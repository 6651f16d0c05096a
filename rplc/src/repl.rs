use std::{io::Write, path::PathBuf, rc::Rc};

use rpl_core::{environment::prelude::Environment, script::parse_source};

use crate::{cli::print_error, ConsoleWarningEmitter};

const PROMPT: &str = ">> ";
const CONTINUATION: &str = ".. ";

/// Every entry runs against the same environment, so variables and
/// functions survive between lines.
pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();
	let warnings = Rc::new(ConsoleWarningEmitter::default());
	let mut env = Environment::new();
	let mut input = String::new();

	loop {
		print!("{}", if input.is_empty() { PROMPT } else { CONTINUATION });
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		match input.trim() {
			"" => {
				input.clear();
				continue;
			},
			".exit" => return Ok(()),
			_ => {}
		}

		// keep reading until every block is closed
		if open_braces(&input) > 0 {
			continue;
		}

		let src = std::mem::take(&mut input);

		let result = parse_source(PathBuf::from("<repl>"), src, warnings.clone())
			.and_then(|script| {
				let mut out = std::io::stdout().lock();
				script.run(&mut env, &mut out)
			});

		if let Err(err) = result {
			print_error(&err);
		}
	}
}

// braces inside string literals and comments do not count
fn open_braces(src: &str) -> i64 {
	let mut depth = 0;
	let mut in_string = false;
	let mut in_comment = false;

	for c in src.chars() {
		match c {
			'\n' => in_comment = false,
			_ if in_comment => {},
			'"' => in_string = !in_string,
			_ if in_string => {},
			'#' => in_comment = true,
			'{' => depth += 1,
			'}' => depth -= 1,
			_ => {}
		}
	}

	depth
}
