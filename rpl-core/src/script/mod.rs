
use std::{io::{Read, Write}, path::{Path, PathBuf}, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::Environment,
    eval::eval,
    parser::prelude::{parse_module, parse_module_from_stream, Parsed, Program},
    utils::prelude::{Error, ScriptWarningEmitter, WarningEmitter, WarningEmitterIO}
};

/// A parsed script together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub path: PathBuf,
    pub src: String,
    pub program: Program,
}

impl Script {
    pub fn run<W: Write>(&self, env: &mut Environment, out: &mut W) -> Result<(), Error> {
        eval(&self.program, env, out).map_err(|error| Error::Runtime {
            path: self.path.clone(),
            src: self.src.clone(),
            error
        })
    }
}

pub fn parse_source(
    path: PathBuf,
    src: String,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Script, Error> {
    let parsed = match parse_module(&src) {
        Ok(parsed) => parsed,
        Err(err) => return Err(Error::from_parse(path, src, err))
    };

    Ok(finish(path, src, parsed, warnings))
}

/// Reads the file a character at a time and parses while reading.
pub fn load(
    path: &Path,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Script, Error> {
    let file = std::fs::File::open(path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut read_error = None;
    let mut reader = std::io::BufReader::new(file);

    let stream = reader.chars()
        .map_while(|c| match c {
            Ok(c) => {
                src.push(c);
                Some(c)
            },
            Err(err) => {
                read_error = Some(err.kind());
                None
            }
        });

    let parsed = parse_module_from_stream(stream);

    if let Some(err) = read_error {
        return Err(Error::StdIo { err });
    }

    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(err) => {
            // the parser may stop early, diagnostics need the whole file
            reader.read_to_string(&mut src)
                .map_err(|err| Error::StdIo { err: err.kind() })?;

            return Err(Error::from_parse(path.to_path_buf(), src, err));
        }
    };

    Ok(finish(path.to_path_buf(), src, parsed, warnings))
}

pub fn run_file<W: Write>(
    path: &Path,
    env: &mut Environment,
    out: &mut W,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<(), Error> {
    load(path, warnings)?.run(env, out)
}

fn finish(path: PathBuf, src: String, parsed: Parsed, warnings: Rc<dyn WarningEmitterIO>) -> Script {
    let warnings = ScriptWarningEmitter::new(path.clone(), src.clone(), WarningEmitter::new(warnings));

    for (token, location) in parsed.skipped {
        warnings.skipped_token(token, location);
    }

    Script { path, src, program: parsed.program }
}
