//! Single-pass definition resolver.
//!
//! `DefinitionResolver` reads one top-level definition per `next()` call
//! and resolves every type name in it on the spot, against:
//! - the builtins
//! - definitions accepted earlier in the same buffer
//! - the definition being parsed (as a loose placeholder)
//! - the enclosing definition's open names
//! - modules parsed before this one, for `module.Name`
//!
//! There is no separate resolution pass. A name that is not known when it
//! is read is an error, which is what makes forward references illegal.

mod enumeration;
mod import;
mod structure;
mod ty;
mod union;
mod untagged;

use std::sync::Arc;

use std::collections::hash_map::Entry;

use gotyno_ir::{
    Builtin, Definition, LooseReference, Location, Module, ModuleMap, Token, TokenKind,
    TypeReference,
};
use gotyno_lexer::{Cursor, ExpectError};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{module_name_from_filename, ParsingError};

/// Number of `Space` tokens that indent a field, constructor or enum value.
const INDENTATION: usize = 4;

/// The definition whose body is being parsed.
///
/// Type names are resolved against it: its own name yields a loose
/// self-reference and its open names yield open references.
#[derive(Clone, Copy)]
struct Scope<'a> {
    name: &'a str,
    open_names: &'a [String],
}

/// Stateful producer of one module's definitions.
///
/// Not restartable: after an error the resolver keeps whatever it had
/// accepted before, and callers are expected to discard the whole parse.
pub struct DefinitionResolver<'src, 'm> {
    cursor: Cursor<'src>,
    /// Modules parsed before this one.
    modules: &'m ModuleMap,
    /// Definitions accepted so far, keyed by name (import alias for imports).
    module: Module,
    /// Import alias to module name.
    imports: FxHashMap<String, String>,
}

impl<'src, 'm> DefinitionResolver<'src, 'm> {
    /// Create a resolver over `source` that can see `modules`.
    pub fn new(source: &'src str, modules: &'m ModuleMap) -> Self {
        DefinitionResolver {
            cursor: Cursor::from_source(source),
            modules,
            module: Module::default(),
            imports: FxHashMap::default(),
        }
    }

    /// Parse the next top-level definition.
    ///
    /// Returns `Ok(None)` once only blank lines remain.
    pub fn next(&mut self) -> Result<Option<Arc<Definition>>, ParsingError> {
        self.skip_blank_lines();
        if self.cursor.is_at_end() {
            return Ok(None);
        }

        let keyword = self.cursor.expect(TokenKind::Symbol)?;
        let (key, definition) = match keyword.text {
            "struct" => self.parse_structure(keyword.location)?,
            "union" => self.parse_union(keyword.location)?,
            "enum" => self.parse_enumeration(keyword.location)?,
            "untagged" => self.parse_untagged_union(keyword.location)?,
            "import" => self.parse_import(keyword.location)?,
            other => {
                return Err(ParsingError::UnknownKeyword {
                    keyword: other.to_string(),
                    location: keyword.location,
                })
            }
        };

        let definition = Arc::new(definition);
        if let Err(rejected) = self.module.insert(key, Arc::clone(&definition)) {
            let name = rejected.name();
            let previous = self
                .module
                .get(&name.value)
                .map_or(name.location, |previous| previous.name().location);
            return Err(ParsingError::DuplicateDefinition {
                name: name.value.clone(),
                location: name.location,
                previous,
            });
        }

        debug!(
            kind = definition.kind_name(),
            name = %definition.name().value,
            location = %definition.name().location,
            "accepted definition"
        );
        Ok(Some(definition))
    }

    /// Drain the resolver, returning every definition in source order.
    pub fn resolve_all(&mut self) -> Result<Vec<Arc<Definition>>, ParsingError> {
        while self.next()?.is_some() {}
        Ok(self.module.definitions().to_vec())
    }

    /// Definitions accepted so far, in source order.
    pub fn definitions(&self) -> &[Arc<Definition>] {
        self.module.definitions()
    }

    /// Hand the accepted definitions over as a finished module.
    pub fn finish(self, filename: &str) -> Module {
        let mut module = self.module;
        module.name = module_name_from_filename(filename);
        module.filename = filename.to_string();
        module
    }

    // ─────────────────────────────────────────────────────────────────────
    // Name resolution
    // ─────────────────────────────────────────────────────────────────────

    /// Fail if `name` is a builtin or already taken in this module.
    ///
    /// Duplicates are reported at the definition's `keyword`.
    fn check_duplicate(&self, name: Token<'_>, keyword: Location) -> Result<(), ParsingError> {
        if Builtin::is_builtin_name(name.text) {
            return Err(ParsingError::ReservedName {
                name: name.text.to_string(),
                location: name.location,
            });
        }
        match self.module.get(name.text) {
            Some(previous) => Err(ParsingError::DuplicateDefinition {
                name: name.text.to_string(),
                location: keyword,
                previous: previous.name().location,
            }),
            None => Ok(()),
        }
    }

    /// Resolve a bare type name.
    ///
    /// Priority: builtin, then an accepted definition, then the definition
    /// being parsed, then an open name of that definition.
    fn get_type_reference(
        &self,
        name: &str,
        location: Location,
        scope: Scope<'_>,
    ) -> Result<TypeReference, ParsingError> {
        let reference = if let Some(builtin) = Builtin::from_name(name) {
            TypeReference::Builtin(builtin)
        } else if let Some(definition) = self.module.get(name) {
            TypeReference::Definition(Arc::clone(definition))
        } else if name == scope.name {
            TypeReference::Loose(LooseReference {
                name: name.to_string(),
                open_names: scope.open_names.to_vec(),
            })
        } else if scope.open_names.iter().any(|open| open == name) {
            TypeReference::Open(name.to_string())
        } else {
            return Err(ParsingError::UnknownReference {
                name: name.to_string(),
                location,
            });
        };
        trace!(name, %location, reference = ?ReferenceKind(&reference), "resolved reference");
        Ok(reference)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Layout helpers
    // ─────────────────────────────────────────────────────────────────────

    /// Skip lines that hold nothing but spaces, including trailing spaces
    /// before the end of input.
    fn skip_blank_lines(&mut self) {
        loop {
            let mut spaces = 0;
            while self.cursor.peek_nth(spaces).kind == TokenKind::Space {
                spaces += 1;
            }
            let after = self.cursor.peek_nth(spaces).kind;
            if !after.is_line_break() && after != TokenKind::Eof {
                return;
            }
            for _ in 0..spaces {
                self.cursor.next_token();
            }
            if after == TokenKind::Eof {
                return;
            }
            self.cursor.next_token();
        }
    }

    fn skip_spaces(&mut self) {
        self.cursor.skip_while(TokenKind::Space);
    }

    /// At least one space.
    fn expect_separator(&mut self) -> Result<(), ExpectError> {
        self.cursor.expect(TokenKind::Space)?;
        self.skip_spaces();
        Ok(())
    }

    fn expect_indentation(&mut self) -> Result<(), ExpectError> {
        self.cursor.skip_many(TokenKind::Space, INDENTATION)
    }

    /// Optional trailing spaces, then a line break.
    fn expect_line_end(&mut self) -> Result<(), ExpectError> {
        self.skip_spaces();
        self.cursor.expect_one_of(&[TokenKind::Newline, TokenKind::Crlf])?;
        Ok(())
    }

    /// `SP? "{" SP? NL`
    fn expect_body_start(&mut self) -> Result<(), ExpectError> {
        self.skip_spaces();
        self.cursor.expect(TokenKind::LeftBrace)?;
        self.expect_line_end()
    }

    /// Skip blank lines, then consume a `}` that starts the next line if
    /// there is one. Returns whether the body ended.
    fn at_body_end(&mut self) -> bool {
        self.skip_blank_lines();
        if self.cursor.check(TokenKind::RightBrace) {
            self.cursor.next_token();
            true
        } else {
            false
        }
    }

    /// After a closing `}` or an import: the rest of the line must be empty.
    fn expect_definition_end(&mut self) -> Result<(), ExpectError> {
        self.skip_spaces();
        self.cursor.expect_one_of(&[TokenKind::Newline, TokenKind::Crlf, TokenKind::Eof])?;
        Ok(())
    }

    /// Text of a string literal token without its quotes.
    fn string_content(text: &str) -> &str {
        text.strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .unwrap_or(text)
    }
}

/// Member names declared so far in one definition body: struct fields,
/// union constructor tags or enum tags.
struct Members<'src> {
    definition: &'src str,
    seen: FxHashMap<&'src str, Location>,
}

impl<'src> Members<'src> {
    fn new(definition: &'src str) -> Self {
        Members {
            definition,
            seen: FxHashMap::default(),
        }
    }

    fn declare(&mut self, member: Token<'src>) -> Result<(), ParsingError> {
        match self.seen.entry(member.text) {
            Entry::Occupied(previous) => Err(ParsingError::DuplicateMember {
                name: member.text.to_string(),
                definition: self.definition.to_string(),
                location: member.location,
                previous: *previous.get(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(member.location);
                Ok(())
            }
        }
    }
}

/// Short variant name for trace output.
struct ReferenceKind<'a>(&'a TypeReference);

impl std::fmt::Debug for ReferenceKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self.0 {
            TypeReference::Builtin(_) => "builtin",
            TypeReference::Definition(_) => "definition",
            TypeReference::ImportedDefinition(_) => "imported",
            TypeReference::Loose(_) => "loose",
            TypeReference::Open(_) => "open",
            TypeReference::AppliedName(_) => "applied",
        })
    }
}
