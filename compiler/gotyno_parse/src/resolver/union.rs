//! `union`, `union(tag = kind)`, `union(embedded)` and combinations.

use gotyno_ir::{
    Builtin, Constructor, Definition, DefinitionName, EmbeddedConstructor, EmbeddedUnion,
    GenericUnion, Location, PlainUnion, Structure, TokenKind, Type, Union, DEFAULT_TAG_FIELD,
};

use super::{DefinitionResolver, Members, Scope};
use crate::ParsingError;

/// What the parenthesized options after `union` asked for.
struct UnionOptions {
    tag_field: String,
    embedded: bool,
}

impl Default for UnionOptions {
    fn default() -> Self {
        UnionOptions {
            tag_field: DEFAULT_TAG_FIELD.to_string(),
            embedded: false,
        }
    }
}

impl DefinitionResolver<'_, '_> {
    pub(super) fn parse_union(
        &mut self,
        keyword: Location,
    ) -> Result<(String, Definition), ParsingError> {
        let options = self.parse_union_options()?;
        self.expect_separator()?;
        let name = self.cursor.expect(TokenKind::Name)?;
        self.check_duplicate(name, keyword)?;

        let open_names = self.parse_open_names()?;
        self.expect_body_start()?;

        let scope = Scope {
            name: name.text,
            open_names: &open_names,
        };
        let union_name = DefinitionName::new(name.text, keyword);
        let union = if options.embedded {
            let constructors = self.parse_embedded_constructors(name.text, &options.tag_field)?;
            Union::Embedded(EmbeddedUnion {
                name: union_name,
                constructors,
                open_names,
                tag_field: options.tag_field,
            })
        } else {
            let constructors = self.parse_constructors(scope)?;
            if open_names.is_empty() {
                Union::Plain(PlainUnion {
                    name: union_name,
                    constructors,
                    tag_field: options.tag_field,
                })
            } else {
                Union::Generic(GenericUnion {
                    name: union_name,
                    constructors,
                    open_names,
                    tag_field: options.tag_field,
                })
            }
        };
        self.expect_definition_end()?;

        Ok((union.name().value.clone(), Definition::Union(union)))
    }

    /// `(tag = name, embedded)`, in any order, directly after `union`.
    fn parse_union_options(&mut self) -> Result<UnionOptions, ParsingError> {
        let mut options = UnionOptions::default();
        if !self.cursor.check(TokenKind::LeftParen) {
            return Ok(options);
        }
        self.cursor.next_token();
        self.skip_spaces();

        loop {
            let option = self.cursor.expect(TokenKind::Symbol)?;
            match option.text {
                "tag" => {
                    self.skip_spaces();
                    self.cursor.expect(TokenKind::Equals)?;
                    self.skip_spaces();
                    options.tag_field = self.cursor.expect(TokenKind::Symbol)?.text.to_string();
                }
                "embedded" => options.embedded = true,
                other => {
                    return Err(ParsingError::InvalidUnionOption {
                        option: other.to_string(),
                        location: option.location,
                    })
                }
            }

            self.skip_spaces();
            let separator = self
                .cursor
                .expect_one_of(&[TokenKind::Comma, TokenKind::RightParen])?;
            if separator.kind == TokenKind::RightParen {
                return Ok(options);
            }
            self.skip_spaces();
        }
    }

    /// `Tag` or `Tag: Type`, one per line.
    fn parse_constructors(&mut self, scope: Scope<'_>) -> Result<Vec<Constructor>, ParsingError> {
        let mut constructors = Vec::new();
        let mut members = Members::new(scope.name);
        while !self.at_body_end() {
            self.expect_indentation()?;
            let tag = self.cursor.expect(TokenKind::Name)?;
            members.declare(tag)?;
            let parameter = if self.cursor.check(TokenKind::Colon) {
                self.cursor.next_token();
                self.skip_spaces();
                self.parse_field_type(scope)?
            } else {
                Type::Empty
            };
            self.expect_line_end()?;
            constructors.push(Constructor::new(tag.text, parameter));
        }
        Ok(constructors)
    }

    /// `Tag` or `Tag: StructName`, one per line.
    ///
    /// The payload must already be an accepted struct of this module, since
    /// the tag field is spliced into its fields right away.
    fn parse_embedded_constructors(
        &mut self,
        union_name: &str,
        tag_field: &str,
    ) -> Result<Vec<EmbeddedConstructor>, ParsingError> {
        let mut constructors = Vec::new();
        let mut members = Members::new(union_name);
        while !self.at_body_end() {
            self.expect_indentation()?;
            let tag = self.cursor.expect(TokenKind::Name)?;
            members.declare(tag)?;
            let parameter = if self.cursor.check(TokenKind::Colon) {
                self.cursor.next_token();
                self.skip_spaces();
                let payload = self.cursor.expect(TokenKind::Name)?;
                let structure = self.embedded_payload(payload.text, payload.location)?;
                Some(structure.with_tag_field(tag_field, tag.text))
            } else {
                None
            };
            self.expect_line_end()?;
            constructors.push(EmbeddedConstructor {
                tag: tag.text.to_string(),
                parameter,
            });
        }
        Ok(constructors)
    }

    fn embedded_payload(&self, name: &str, location: Location) -> Result<&Structure, ParsingError> {
        if Builtin::is_builtin_name(name) {
            return Err(ParsingError::InvalidPayload {
                name: name.to_string(),
                found: "builtin",
                location,
            });
        }
        let definition = self
            .module
            .get(name)
            .ok_or_else(|| ParsingError::UnknownReference {
                name: name.to_string(),
                location,
            })?;
        definition
            .as_structure()
            .ok_or_else(|| ParsingError::InvalidPayload {
                name: name.to_string(),
                found: definition.kind_name(),
                location,
            })
    }
}
