//! `struct Name<T, ...> { field: Type ... }`

use gotyno_ir::{Definition, Field, GenericStructure, Location, PlainStructure, Structure};
use gotyno_ir::{DefinitionName, TokenKind};

use super::{DefinitionResolver, Members, Scope};
use crate::ParsingError;

impl DefinitionResolver<'_, '_> {
    pub(super) fn parse_structure(
        &mut self,
        keyword: Location,
    ) -> Result<(String, Definition), ParsingError> {
        self.expect_separator()?;
        let name = self.cursor.expect(TokenKind::Name)?;
        self.check_duplicate(name, keyword)?;

        let open_names = self.parse_open_names()?;
        self.expect_body_start()?;

        let scope = Scope {
            name: name.text,
            open_names: &open_names,
        };
        let mut fields = Vec::new();
        let mut members = Members::new(name.text);
        while !self.at_body_end() {
            self.expect_indentation()?;
            let field_name = self.cursor.expect(TokenKind::Symbol)?;
            members.declare(field_name)?;
            self.cursor.expect(TokenKind::Colon)?;
            self.skip_spaces();
            let ty = self.parse_field_type(scope)?;
            self.expect_line_end()?;
            fields.push(Field::new(field_name.text, ty));
        }
        self.expect_definition_end()?;

        let name = DefinitionName::new(name.text, keyword);
        let structure = if open_names.is_empty() {
            Structure::Plain(PlainStructure { name, fields })
        } else {
            Structure::Generic(GenericStructure {
                name,
                fields,
                open_names,
            })
        };
        Ok((structure.name().value.clone(), Definition::Structure(structure)))
    }

    /// `<A, B, ...>` after a struct or union name; empty when absent.
    pub(super) fn parse_open_names(&mut self) -> Result<Vec<String>, ParsingError> {
        let mut open_names: Vec<String> = Vec::new();
        if !self.cursor.check(TokenKind::LeftAngle) {
            return Ok(open_names);
        }
        self.cursor.next_token();

        loop {
            let name = self.cursor.expect(TokenKind::Name)?;
            if open_names.iter().any(|open| open == name.text) {
                return Err(ParsingError::DuplicateOpenName {
                    name: name.text.to_string(),
                    location: name.location,
                });
            }
            open_names.push(name.text.to_string());

            let separator = self
                .cursor
                .expect_one_of(&[TokenKind::Comma, TokenKind::RightAngle])?;
            if separator.kind == TokenKind::RightAngle {
                return Ok(open_names);
            }
            self.skip_spaces();
        }
    }
}
