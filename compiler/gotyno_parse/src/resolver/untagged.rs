//! `untagged union Name { Reference ... }`

use gotyno_ir::{Definition, DefinitionName, Location, TokenKind, UntaggedUnion};

use super::{DefinitionResolver, Scope};
use crate::ParsingError;

impl DefinitionResolver<'_, '_> {
    pub(super) fn parse_untagged_union(
        &mut self,
        keyword: Location,
    ) -> Result<(String, Definition), ParsingError> {
        self.expect_separator()?;
        let union_keyword = self.cursor.expect(TokenKind::Symbol)?;
        if union_keyword.text != "union" {
            return Err(ParsingError::UnknownKeyword {
                keyword: format!("untagged {}", union_keyword.text),
                location: keyword,
            });
        }
        self.expect_separator()?;
        let name = self.cursor.expect(TokenKind::Name)?;
        self.check_duplicate(name, keyword)?;
        self.expect_body_start()?;

        let scope = Scope {
            name: name.text,
            open_names: &[],
        };
        let mut values = Vec::new();
        while !self.at_body_end() {
            self.expect_indentation()?;
            values.push(self.parse_reference(scope)?);
            self.expect_line_end()?;
        }
        self.expect_definition_end()?;

        Ok((
            name.text.to_string(),
            Definition::UntaggedUnion(UntaggedUnion {
                name: DefinitionName::new(name.text, keyword),
                values,
            }),
        ))
    }
}
