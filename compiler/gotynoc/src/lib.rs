//! gotyno compiler front end.
//!
//! Takes an ordered batch of `.gotyno` sources and produces the resolved
//! [`ModuleMap`], or a [`Failure`] that renders as a terminal diagnostic.
//! Files are parsed in the order given; a module can only import modules
//! that come before it.

use std::sync::Once;

use gotyno_diagnostic::{ColorMode, DiagnosticEmitter, SourceInfo, TerminalEmitter};
use gotyno_parse::{parse_modules, ModulesError, SourceBuffer};
use thiserror::Error;
use tracing::{debug, info};

pub use gotyno_ir::{Module, ModuleMap};

/// One input file.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SourceFile {
    pub filename: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

/// The first error in a batch.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error(transparent)]
pub struct Failure(#[from] pub ModulesError);

impl Failure {
    pub fn filename(&self) -> &str {
        self.0.filename()
    }

    /// Render as a diagnostic, with a snippet when the failing file is among
    /// `sources`.
    pub fn render(&self, sources: &[SourceFile], mode: ColorMode) -> String {
        let source = sources
            .iter()
            .find(|source| source.filename == self.filename())
            .map(|source| SourceInfo::new(&source.filename, &source.text));

        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), mode, false);
        emitter.set_source(source);
        emitter.emit(&self.0.into_diagnostic());
        emitter.emit_summary(1, 0);
        emitter.flush();
        String::from_utf8_lossy(&emitter.into_inner()).into_owned()
    }
}

/// Parse `sources` in order.
pub fn compile(sources: &[SourceFile]) -> Result<ModuleMap, Failure> {
    let buffers: Vec<SourceBuffer<'_>> = sources
        .iter()
        .map(|source| SourceBuffer::new(&source.filename, &source.text))
        .collect();

    let modules = parse_modules(&buffers)?;
    info!(
        modules = modules.len(),
        definitions = modules.iter().map(Module::len).sum::<usize>(),
        "compiled"
    );
    for module in &modules {
        debug!(module = %module.name, filename = %module.filename, "module ready");
    }
    Ok(modules)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing.
///
/// Safe to call more than once. Reads the filter from `GOTYNO_LOG`, then
/// `RUST_LOG`; with neither set nothing is installed.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = std::env::var("GOTYNO_LOG").or_else(|_| std::env::var("RUST_LOG"));
        if let Ok(directives) = directives {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::new(directives))
                .init();
        }
    });
}
