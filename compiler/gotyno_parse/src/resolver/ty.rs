//! Field and constructor types.
//!
//! ```text
//! type      := string | reference | "[" "]" type | "[" uint "]" type | "*" type | "?" type
//! reference := (symbol ".")? Name ("<" arg ("," arg)* ">")?
//! ```

use std::sync::Arc;

use gotyno_ir::{
    AppliedName, AppliedOpenName, ImportedDefinition, Token, TokenKind, Type, TypeReference,
};
use gotyno_lexer::ExpectError;
use tracing::trace;

use super::{DefinitionResolver, Scope};
use crate::stack::ensure_sufficient_stack;
use crate::ParsingError;

/// Tokens that can start a type.
const TYPE_START: [TokenKind; 6] = [
    TokenKind::String,
    TokenKind::Name,
    TokenKind::Symbol,
    TokenKind::LeftBracket,
    TokenKind::Asterisk,
    TokenKind::QuestionMark,
];

impl DefinitionResolver<'_, '_> {
    /// Parse the type of a field or constructor. The line break after it is
    /// left to the caller.
    pub(super) fn parse_field_type(&mut self, scope: Scope<'_>) -> Result<Type, ParsingError> {
        ensure_sufficient_stack(|| self.parse_field_type_inner(scope))
    }

    fn parse_field_type_inner(&mut self, scope: Scope<'_>) -> Result<Type, ParsingError> {
        let token = self.cursor.peek();
        match token.kind {
            TokenKind::String => {
                self.cursor.next_token();
                Ok(Type::String(Self::string_content(token.text).to_string()))
            }
            TokenKind::Name | TokenKind::Symbol => {
                Ok(Type::Reference(self.parse_reference(scope)?))
            }
            TokenKind::LeftBracket => {
                self.cursor.next_token();
                if self.cursor.check(TokenKind::RightBracket) {
                    self.cursor.next_token();
                    return Ok(Type::slice(self.parse_field_type(scope)?));
                }
                let size = self.cursor.expect(TokenKind::UnsignedInteger)?;
                let Ok(size_value) = size.text.parse::<u64>() else {
                    return Err(ParsingError::Expect(ExpectError {
                        expected: vec![TokenKind::UnsignedInteger],
                        actual: size.kind,
                        text: size.text.to_string(),
                        location: size.location,
                    }));
                };
                self.cursor.expect(TokenKind::RightBracket)?;
                Ok(Type::array(size_value, self.parse_field_type(scope)?))
            }
            TokenKind::Asterisk => {
                self.cursor.next_token();
                Ok(Type::pointer(self.parse_field_type(scope)?))
            }
            TokenKind::QuestionMark => {
                self.cursor.next_token();
                Ok(Type::optional(self.parse_field_type(scope)?))
            }
            _ => Err(self.cursor.make_expect_error(&TYPE_START).into()),
        }
    }

    /// A bare or qualified name, with applied arguments if `<` follows.
    pub(super) fn parse_reference(
        &mut self,
        scope: Scope<'_>,
    ) -> Result<TypeReference, ParsingError> {
        ensure_sufficient_stack(|| self.parse_reference_inner(scope))
    }

    fn parse_reference_inner(&mut self, scope: Scope<'_>) -> Result<TypeReference, ParsingError> {
        let first = self
            .cursor
            .expect_one_of(&[TokenKind::Name, TokenKind::Symbol])?;
        let reference = if first.kind == TokenKind::Symbol {
            self.cursor.expect(TokenKind::Period)?;
            let name = self.cursor.expect(TokenKind::Name)?;
            self.resolve_imported(first, name)?
        } else {
            self.get_type_reference(first.text, first.location, scope)?
        };

        if !self.cursor.check(TokenKind::LeftAngle) {
            return Ok(reference);
        }
        let open_names = self.parse_applied_open_names(scope)?;
        Ok(TypeReference::AppliedName(AppliedName {
            reference: Box::new(reference),
            open_names,
        }))
    }

    /// `<A, Maybe<B>, m.C>`: each argument is an open name of the enclosing
    /// definition or a reference.
    fn parse_applied_open_names(
        &mut self,
        scope: Scope<'_>,
    ) -> Result<Vec<AppliedOpenName>, ParsingError> {
        self.cursor.expect(TokenKind::LeftAngle)?;
        let mut arguments = Vec::new();
        loop {
            let argument = match self.parse_reference(scope)? {
                TypeReference::Open(name) => AppliedOpenName::Open(name),
                other => AppliedOpenName::Reference(other),
            };
            arguments.push(argument);

            let separator = self
                .cursor
                .expect_one_of(&[TokenKind::Comma, TokenKind::RightAngle])?;
            if separator.kind == TokenKind::RightAngle {
                return Ok(arguments);
            }
            self.skip_spaces();
        }
    }

    /// Resolve `prefix.Name` against the modules parsed before this one.
    ///
    /// A prefix bound by `import module = prefix` names that module;
    /// otherwise the prefix is the module name itself.
    fn resolve_imported(
        &self,
        prefix: Token<'_>,
        name: Token<'_>,
    ) -> Result<TypeReference, ParsingError> {
        let module_name = self
            .imports
            .get(prefix.text)
            .map_or(prefix.text, String::as_str);
        let module = self
            .modules
            .get(module_name)
            .ok_or_else(|| ParsingError::UnknownModule {
                name: module_name.to_string(),
                location: prefix.location,
            })?;
        let definition = module
            .get(name.text)
            .ok_or_else(|| ParsingError::UnknownReference {
                name: format!("{}.{}", prefix.text, name.text),
                location: prefix.location,
            })?;

        trace!(module = module_name, name = name.text, "resolved imported reference");
        Ok(TypeReference::ImportedDefinition(ImportedDefinition {
            import_name: prefix.text.to_string(),
            definition: Arc::clone(definition),
        }))
    }
}
