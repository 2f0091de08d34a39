//! Definition resolver and module aggregator for gotyno.
//!
//! Turns source buffers into finished [`Module`]s. Parsing and name
//! resolution happen in one pass: each definition is resolved against
//! everything accepted before it, so the result needs no further fixing up.
//!
//! # Entry points
//!
//! - [`parse`]: one buffer on its own
//! - [`parse_with_modules`]: one buffer that may import earlier modules
//! - [`parse_modules`]: an ordered batch, leaves first
//! - [`DefinitionResolver`]: one definition at a time

mod error;
mod modules;
mod resolver;
mod stack;

pub use error::ParsingError;
pub use modules::{module_name_from_filename, parse_modules, ModulesError, SourceBuffer};
pub use resolver::DefinitionResolver;

use gotyno_ir::{Module, ModuleMap};

/// Parse a single buffer that imports nothing.
pub fn parse(filename: &str, buffer: &str) -> Result<Module, ParsingError> {
    parse_with_modules(filename, buffer, &ModuleMap::new())
}

/// Parse a single buffer that may refer to `modules`.
pub fn parse_with_modules(
    filename: &str,
    buffer: &str,
    modules: &ModuleMap,
) -> Result<Module, ParsingError> {
    let mut resolver = DefinitionResolver::new(buffer, modules);
    while resolver.next()?.is_some() {}
    Ok(resolver.finish(filename))
}
