//! `enum Name { tag = "value" ... }`

use gotyno_ir::{
    Definition, DefinitionName, Enumeration, EnumerationField, EnumerationValue, Location,
    TokenKind,
};
use gotyno_lexer::ExpectError;

use super::{DefinitionResolver, Members};
use crate::ParsingError;

impl DefinitionResolver<'_, '_> {
    pub(super) fn parse_enumeration(
        &mut self,
        keyword: Location,
    ) -> Result<(String, Definition), ParsingError> {
        self.expect_separator()?;
        let name = self.cursor.expect(TokenKind::Name)?;
        self.check_duplicate(name, keyword)?;
        self.expect_body_start()?;

        let mut fields = Vec::new();
        let mut members = Members::new(name.text);
        while !self.at_body_end() {
            self.expect_indentation()?;
            let tag = self
                .cursor
                .expect_one_of(&[TokenKind::Symbol, TokenKind::Name])?;
            members.declare(tag)?;
            self.skip_spaces();
            self.cursor.expect(TokenKind::Equals)?;
            self.skip_spaces();
            let value = self.parse_enumeration_value()?;
            self.expect_line_end()?;
            fields.push(EnumerationField {
                tag: tag.text.to_string(),
                value,
            });
        }
        self.expect_definition_end()?;

        Ok((
            name.text.to_string(),
            Definition::Enumeration(Enumeration {
                name: DefinitionName::new(name.text, keyword),
                fields,
            }),
        ))
    }

    fn parse_enumeration_value(&mut self) -> Result<EnumerationValue, ExpectError> {
        let kinds = [TokenKind::String, TokenKind::UnsignedInteger];
        let token = self.cursor.peek();
        let value = match token.kind {
            TokenKind::String => {
                EnumerationValue::String(Self::string_content(token.text).to_string())
            }
            // The lexer only emits integers that fit in a u64.
            TokenKind::UnsignedInteger => match token.text.parse() {
                Ok(value) => EnumerationValue::UnsignedInteger(value),
                Err(_) => return Err(self.cursor.make_expect_error(&kinds)),
            },
            _ => return Err(self.cursor.make_expect_error(&kinds)),
        };
        self.cursor.next_token();
        Ok(value)
    }
}
