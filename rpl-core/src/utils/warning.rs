use std::{path::PathBuf, rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use termcolor::Buffer;

use crate::lexer::prelude::Token;
use super::{diagnostic::{Diagnostic, Label, Level, Location}, src_span::SrcSpan};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        let mut warnings = self.write_lock();
        std::mem::take(&mut *warnings)
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullWarningEmitterIO))
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

/// Binds warnings to the script they were found in.
pub struct ScriptWarningEmitter {
    path: PathBuf,
    src: String,
    emitter: WarningEmitter,
}

impl ScriptWarningEmitter {
    pub fn new(path: PathBuf, src: String, emitter: WarningEmitter) -> Self {
        Self { path, src, emitter }
    }

    pub fn skipped_token(&self, token: Token, location: SrcSpan) {
        self.emitter.emit(Warning::SkippedToken {
            path: self.path.clone(),
            src: self.src.clone(),
            token,
            location,
        });
    }

    pub fn count(&self) -> usize {
        self.emitter.count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    SkippedToken {
        path: PathBuf,
        src: String,
        token: Token,
        location: SrcSpan
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("error pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::SkippedToken { path, src, token, location } => Diagnostic {
                title: "Token ignored".into(),
                text: format!("`{}` cannot start a statement and was skipped", token.as_literal()),
                level: Level::Warning,
                location: Some(Location {
                    src,
                    path: path.to_path_buf(),
                    label: Label {
                        text: Some("This is not part of any statement".into()),
                        span: *location,
                    },
                    extra_labels: vec![]
                }),
            }
        }
    }
}
