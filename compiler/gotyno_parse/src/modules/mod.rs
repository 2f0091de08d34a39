//! Parsing an ordered batch of buffers into a `ModuleMap`.

use gotyno_diagnostic::{Diagnostic, ErrorCode};
use gotyno_ir::ModuleMap;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{parse_with_modules, ParsingError};

/// One named source buffer.
#[derive(Copy, Clone, Debug)]
pub struct SourceBuffer<'a> {
    pub filename: &'a str,
    pub buffer: &'a str,
}

impl<'a> SourceBuffer<'a> {
    pub fn new(filename: &'a str, buffer: &'a str) -> Self {
        SourceBuffer { filename, buffer }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ModulesError {
    #[error("{filename}: {error}")]
    Parsing {
        filename: String,
        #[source]
        error: ParsingError,
    },

    /// Two buffers map to the same module name.
    #[error("duplicate module `{name}` from {filename}")]
    DuplicateModule {
        name: String,
        filename: String,
        /// File the module was first read from.
        previous: String,
    },
}

impl ModulesError {
    /// The file the error belongs to.
    pub fn filename(&self) -> &str {
        match self {
            ModulesError::Parsing { filename, .. }
            | ModulesError::DuplicateModule { filename, .. } => filename,
        }
    }

    pub fn into_diagnostic(&self) -> Diagnostic {
        match self {
            ModulesError::Parsing { error, .. } => error.into_diagnostic(),
            ModulesError::DuplicateModule {
                name,
                filename,
                previous,
            } => Diagnostic::error(ErrorCode::E3001)
                .with_message(format!("duplicate module `{name}`"))
                .with_note(format!("`{filename}` and `{previous}` both define module `{name}`"))
                .with_suggestion("rename one of the files"),
        }
    }
}

/// The module name for a file: no directories, no `.gotyno`.
///
/// Files with another extension lose that extension instead.
pub fn module_name_from_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    if let Some(stem) = base.strip_suffix(".gotyno") {
        return stem.to_string();
    }
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}

/// Parse `buffers` in order.
///
/// Each buffer sees the modules before it and none after, so buffers must
/// come in dependency order. Stops at the first error.
#[instrument(level = "debug", skip_all, fields(buffers = buffers.len()))]
pub fn parse_modules(buffers: &[SourceBuffer<'_>]) -> Result<ModuleMap, ModulesError> {
    let mut modules = ModuleMap::new();

    for source in buffers {
        let name = module_name_from_filename(source.filename);
        if let Some(previous) = modules.get(&name) {
            return Err(ModulesError::DuplicateModule {
                name,
                filename: source.filename.to_string(),
                previous: previous.filename.clone(),
            });
        }

        let module = parse_with_modules(source.filename, source.buffer, &modules).map_err(
            |error| ModulesError::Parsing {
                filename: source.filename.to_string(),
                error,
            },
        )?;
        debug!(
            module = %module.name,
            definitions = module.len(),
            "parsed module"
        );

        if let Err(rejected) = modules.insert(module) {
            let previous = modules
                .get(&rejected.name)
                .map(|previous| previous.filename.clone())
                .unwrap_or_default();
            return Err(ModulesError::DuplicateModule {
                name: rejected.name,
                filename: rejected.filename,
                previous,
            });
        }
    }

    Ok(modules)
}

#[cfg(test)]
mod tests;
