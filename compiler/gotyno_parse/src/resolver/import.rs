//! `import module` and `import module = alias`

use gotyno_ir::{Definition, DefinitionName, Import, Location, TokenKind};

use super::DefinitionResolver;
use crate::ParsingError;

impl DefinitionResolver<'_, '_> {
    /// The alias becomes a top-level name of this module, so it cannot
    /// repeat another import's alias.
    pub(super) fn parse_import(
        &mut self,
        keyword: Location,
    ) -> Result<(String, Definition), ParsingError> {
        self.expect_separator()?;
        let module = self.cursor.expect(TokenKind::Symbol)?;

        self.skip_spaces();
        let alias = if self.cursor.check(TokenKind::Equals) {
            self.cursor.next_token();
            self.skip_spaces();
            self.cursor.expect(TokenKind::Symbol)?
        } else {
            module
        };
        self.check_duplicate(alias, keyword)?;

        if !self.modules.contains(module.text) {
            return Err(ParsingError::UnknownModule {
                name: module.text.to_string(),
                location: module.location,
            });
        }
        self.expect_definition_end()?;

        self.imports
            .insert(alias.text.to_string(), module.text.to_string());
        Ok((
            alias.text.to_string(),
            Definition::Import(Import {
                name: DefinitionName::new(module.text, keyword),
                alias: alias.text.to_string(),
            }),
        ))
    }
}
