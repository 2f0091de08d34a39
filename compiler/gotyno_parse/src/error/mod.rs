//! Parse error types.
//!
//! Every failure aborts the current definition: there is no recovery and no
//! partial result. Each variant carries the location it is reported at and
//! converts into a [`Diagnostic`] for rendering.

use gotyno_diagnostic::{Diagnostic, ErrorCode};
use gotyno_ir::{Location, TokenKind};
use gotyno_lexer::ExpectError;
use thiserror::Error;

const INDENTATION_NOTE: &str =
    "fields, constructors and enum values are indented by exactly four spaces";
const KEYWORD_NOTE: &str =
    "definitions start with `struct`, `union`, `enum`, `untagged union` or `import`";
const PAYLOAD_NOTE: &str = "the tag field of an embedded union is merged into the payload's fields";
const REFERENCE_NOTE: &str =
    "definitions can only refer to definitions above them and to themselves";

/// A failure while resolving one source buffer.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ParsingError {
    /// A required token was not found.
    #[error(transparent)]
    Expect(#[from] ExpectError),

    /// A top-level line starts with something other than a definition keyword.
    #[error("unknown definition keyword `{keyword}`")]
    UnknownKeyword { keyword: String, location: Location },

    /// `union(...)` with an option other than `tag = ...` or `embedded`.
    #[error("invalid union option `{option}`")]
    InvalidUnionOption { option: String, location: Location },

    /// A generic parameter list names the same parameter twice.
    #[error("type parameter `{name}` is declared twice")]
    DuplicateOpenName { name: String, location: Location },

    /// An embedded union payload names something other than a struct.
    #[error("embedded union payload `{name}` must be a struct, found {found}")]
    InvalidPayload {
        name: String,
        /// What the name resolved to, e.g. `union` or `builtin`.
        found: &'static str,
        location: Location,
    },

    /// A name that resolves to nothing in scope.
    #[error("unknown reference `{name}`")]
    UnknownReference { name: String, location: Location },

    /// An import or qualified reference names a module that has not been
    /// parsed.
    #[error("unknown module `{name}`")]
    UnknownModule { name: String, location: Location },

    /// A top-level name defined twice in one module.
    #[error("duplicate definition `{name}`")]
    DuplicateDefinition {
        name: String,
        /// The second definition's leading keyword.
        location: Location,
        /// The first definition's leading keyword.
        previous: Location,
    },

    /// A struct field, union constructor or enum tag repeated in one body.
    #[error("`{name}` is declared twice in `{definition}`")]
    DuplicateMember {
        name: String,
        definition: String,
        location: Location,
        previous: Location,
    },

    /// A definition named after a builtin type.
    #[error("`{name}` is a builtin type and cannot be redefined")]
    ReservedName { name: String, location: Location },
}

impl ParsingError {
    /// Where the error is reported.
    pub fn location(&self) -> Location {
        match self {
            ParsingError::Expect(error) => error.location,
            ParsingError::UnknownKeyword { location, .. }
            | ParsingError::InvalidUnionOption { location, .. }
            | ParsingError::DuplicateOpenName { location, .. }
            | ParsingError::InvalidPayload { location, .. }
            | ParsingError::UnknownReference { location, .. }
            | ParsingError::UnknownModule { location, .. }
            | ParsingError::DuplicateDefinition { location, .. }
            | ParsingError::DuplicateMember { location, .. }
            | ParsingError::ReservedName { location, .. } => *location,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParsingError::Expect(_) => ErrorCode::E1001,
            ParsingError::UnknownKeyword { .. } => ErrorCode::E1002,
            ParsingError::InvalidUnionOption { .. } => ErrorCode::E1003,
            ParsingError::DuplicateOpenName { .. } => ErrorCode::E1004,
            ParsingError::UnknownReference { .. } => ErrorCode::E2001,
            ParsingError::UnknownModule { .. } => ErrorCode::E2002,
            ParsingError::DuplicateDefinition { .. } => ErrorCode::E2003,
            ParsingError::InvalidPayload { .. } => ErrorCode::E2004,
            ParsingError::DuplicateMember { .. } => ErrorCode::E2005,
            ParsingError::ReservedName { .. } => ErrorCode::E2006,
        }
    }

    /// Convert into a diagnostic with labels, notes and suggestions.
    pub fn into_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            ParsingError::Expect(error) => {
                let expected = match error.expected.as_slice() {
                    [kind] => format!("expected {kind}"),
                    _ => "unexpected token".to_string(),
                };
                let diagnostic = diagnostic.with_label(error.location, error.width(), expected);
                if error.expected.contains(&TokenKind::Space) {
                    diagnostic.with_note(INDENTATION_NOTE)
                } else {
                    diagnostic
                }
            }
            ParsingError::UnknownKeyword { keyword, location } => diagnostic
                .with_label(*location, width(keyword), "not a definition keyword")
                .with_note(KEYWORD_NOTE),
            ParsingError::InvalidUnionOption { option, location } => diagnostic
                .with_label(*location, width(option), "unknown option")
                .with_suggestion("union options are `tag = <name>` and `embedded`"),
            ParsingError::DuplicateOpenName { name, location } => {
                diagnostic.with_label(*location, width(name), "declared again here")
            }
            ParsingError::InvalidPayload {
                name,
                found,
                location,
            } => diagnostic
                .with_label(*location, width(name), format!("this is a {found}"))
                .with_note(PAYLOAD_NOTE),
            ParsingError::UnknownReference { name, location } => diagnostic
                .with_label(*location, width(name), "not defined at this point")
                .with_note(REFERENCE_NOTE),
            ParsingError::UnknownModule { name, location } => diagnostic
                .with_label(*location, width(name), "no module with this name")
                .with_note("modules must be parsed before the modules that import them"),
            ParsingError::DuplicateDefinition {
                location, previous, ..
            } => diagnostic
                .with_label(*location, 1, "redefined here")
                .with_secondary_label(*previous, 1, "first defined here"),
            ParsingError::DuplicateMember {
                name,
                location,
                previous,
                ..
            } => diagnostic
                .with_label(*location, width(name), "declared again here")
                .with_secondary_label(*previous, width(name), "first declared here"),
            ParsingError::ReservedName { name, location } => diagnostic
                .with_label(*location, width(name), "builtin type name")
                .with_suggestion("choose a name that is not a builtin type"),
        }
    }
}

fn width(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
