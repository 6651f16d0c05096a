mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{cell::Cell, io::Write, path::{Path, PathBuf}, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser;
use cli::{
    print_error, print_failed, print_finished, print_interrupted, print_parsing, print_running, print_warnings
};
use rpl_core::{
    environment::prelude::Environment,
    lexer::prelude::lex,
    script::load,
    utils::prelude::{Error, Warning, WarningEmitterIO}
};

#[derive(Parser)]
#[command(version, about = "Interpreter for rpl scripts")]
enum Command {
    /// Runs a script
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print every token before running
        #[arg(long, default_value_t = false)]
        trace_tokens: bool,
    },
    /// Parses a script and prints it back
    Parse {
        /// Path of source file
        path: PathBuf,
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
    /// Runs Read Eval Print Loop
    Repl,
}

fn main() -> ExitCode {
    if let Err(err) = ctrlc::set_handler(|| {
        print_interrupted();
        std::process::exit(130);
    }) {
        eprintln!("Could not install interrupt handler: {err}");
    }

    match Command::parse() {
        Command::Run { path, trace_tokens } => run(&path, trace_tokens),
        Command::Parse { path, print_ast } => parse(&path, print_ast),
        Command::Rlpl => interactive(rlpl::start()),
        Command::Rppl => interactive(rppl::start()),
        Command::Repl => interactive(repl::start()),
    }
}

fn run(path: &Path, trace_tokens: bool) -> ExitCode {
    let warning_emitter = Rc::new(ConsoleWarningEmitter::default());

    print_running(&path.to_string_lossy());
    let start = Instant::now();

    let result = load(path, warning_emitter.clone()).and_then(|script| {
        if trace_tokens {
            lex(&script.src)
                .flatten()
                .for_each(|(_, token, _)| eprintln!("Lexer: {token}"));
        }

        let mut env = Environment::new();
        let mut out = std::io::stdout().lock();

        let result = script.run(&mut env, &mut out);

        out.flush().map_err(|err| Error::StdIo { err: err.kind() })?;

        result
    });

    print_warnings(warning_emitter.count.get());

    match result {
        Ok(()) => {
            print_finished(start.elapsed());
            ExitCode::SUCCESS
        },
        Err(err) => {
            print_error(&err);
            print_failed(start.elapsed());
            ExitCode::FAILURE
        }
    }
}

fn parse(path: &Path, print_ast: bool) -> ExitCode {
    let warning_emitter = Rc::new(ConsoleWarningEmitter::default());

    print_parsing(&path.to_string_lossy());
    let start = Instant::now();

    match load(path, warning_emitter.clone()) {
        Ok(script) => {
            if print_ast {
                println!("{:#?}", script.program);
            } else {
                println!("{}", script.program);
            }

            print_warnings(warning_emitter.count.get());
            print_finished(start.elapsed());
            ExitCode::SUCCESS
        },
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn interactive(result: std::io::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&Error::StdIo { err: err.kind() });
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Default)]
pub struct ConsoleWarningEmitter {
    count: Cell<usize>
}

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        self.count.set(self.count.get() + 1);

        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
