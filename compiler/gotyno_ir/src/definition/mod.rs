//! Top-level definitions.
//!
//! Every top-level name in a module maps to exactly one `Definition`. Once
//! the resolver has accepted a definition it never changes: later
//! definitions and later modules refer to it through an `Arc`.
//!
//! `Display` renders a definition back into canonical gotyno source
//! (four-space indentation, one field per line).

use std::fmt;

use crate::{Location, Type, TypeReference};

/// Tag field name used by unions that do not set `tag = ...`.
pub const DEFAULT_TAG_FIELD: &str = "type";

/// The name of a top-level definition and where the definition starts.
///
/// `location` points at the definition's leading keyword.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DefinitionName {
    pub value: String,
    pub location: Location,
}

impl DefinitionName {
    pub fn new(value: impl Into<String>, location: Location) -> Self {
        DefinitionName {
            value: value.into(),
            location,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Definition {
    Structure(Structure),
    Union(Union),
    Enumeration(Enumeration),
    UntaggedUnion(UntaggedUnion),
    Import(Import),
}

impl Definition {
    pub fn name(&self) -> &DefinitionName {
        match self {
            Definition::Structure(structure) => structure.name(),
            Definition::Union(union) => union.name(),
            Definition::Enumeration(enumeration) => &enumeration.name,
            Definition::UntaggedUnion(untagged) => &untagged.name,
            Definition::Import(import) => &import.name,
        }
    }

    /// The generic parameters of this definition; empty when not generic.
    pub fn open_names(&self) -> &[String] {
        match self {
            Definition::Structure(structure) => structure.open_names(),
            Definition::Union(union) => union.open_names(),
            Definition::Enumeration(_) | Definition::UntaggedUnion(_) | Definition::Import(_) => {
                &[]
            }
        }
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.open_names().is_empty()
    }

    /// The keyword that introduces this kind of definition.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Definition::Structure(_) => "struct",
            Definition::Union(_) => "union",
            Definition::Enumeration(_) => "enum",
            Definition::UntaggedUnion(_) => "untagged union",
            Definition::Import(_) => "import",
        }
    }

    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Definition::Structure(structure) => Some(structure),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&Union> {
        match self {
            Definition::Union(union) => Some(union),
            _ => None,
        }
    }
}

/// `name: Type` inside a struct.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Structure {
    Plain(PlainStructure),
    Generic(GenericStructure),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PlainStructure {
    pub name: DefinitionName,
    pub fields: Vec<Field>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenericStructure {
    pub name: DefinitionName,
    pub fields: Vec<Field>,
    pub open_names: Vec<String>,
}

impl Structure {
    pub fn name(&self) -> &DefinitionName {
        match self {
            Structure::Plain(plain) => &plain.name,
            Structure::Generic(generic) => &generic.name,
        }
    }

    pub fn fields(&self) -> &[Field] {
        match self {
            Structure::Plain(plain) => &plain.fields,
            Structure::Generic(generic) => &generic.fields,
        }
    }

    pub fn open_names(&self) -> &[String] {
        match self {
            Structure::Plain(_) => &[],
            Structure::Generic(generic) => &generic.open_names,
        }
    }

    /// A copy of this structure with the embedded-union tag field
    /// `tag_field: "tag"` placed before its own fields.
    #[must_use]
    pub fn with_tag_field(&self, tag_field: &str, tag: &str) -> Structure {
        let mut embedded = self.clone();
        let fields = match &mut embedded {
            Structure::Plain(plain) => &mut plain.fields,
            Structure::Generic(generic) => &mut generic.fields,
        };
        fields.insert(0, Field::new(tag_field, Type::String(tag.to_string())));
        embedded
    }
}

/// `Tag: Type` or a bare `Tag` inside a union.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Constructor {
    pub tag: String,
    /// `Type::Empty` for tag-only constructors.
    pub parameter: Type,
}

impl Constructor {
    pub fn new(tag: impl Into<String>, parameter: Type) -> Self {
        Constructor {
            tag: tag.into(),
            parameter,
        }
    }
}

/// A constructor of an embedded union.
///
/// The payload structure already contains the tag field, spliced in at
/// parse time by [`Structure::with_tag_field`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EmbeddedConstructor {
    pub tag: String,
    pub parameter: Option<Structure>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Union {
    Plain(PlainUnion),
    Generic(GenericUnion),
    Embedded(EmbeddedUnion),
}

/// Tagged union whose payload sits in a separate `data` field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PlainUnion {
    pub name: DefinitionName,
    pub constructors: Vec<Constructor>,
    pub tag_field: String,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenericUnion {
    pub name: DefinitionName,
    pub constructors: Vec<Constructor>,
    pub open_names: Vec<String>,
    pub tag_field: String,
}

/// Tagged union whose tag field is merged into each payload struct.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EmbeddedUnion {
    pub name: DefinitionName,
    pub constructors: Vec<EmbeddedConstructor>,
    pub open_names: Vec<String>,
    pub tag_field: String,
}

impl Union {
    pub fn name(&self) -> &DefinitionName {
        match self {
            Union::Plain(plain) => &plain.name,
            Union::Generic(generic) => &generic.name,
            Union::Embedded(embedded) => &embedded.name,
        }
    }

    pub fn open_names(&self) -> &[String] {
        match self {
            Union::Plain(_) => &[],
            Union::Generic(generic) => &generic.open_names,
            Union::Embedded(embedded) => &embedded.open_names,
        }
    }

    pub fn tag_field(&self) -> &str {
        match self {
            Union::Plain(plain) => &plain.tag_field,
            Union::Generic(generic) => &generic.tag_field,
            Union::Embedded(embedded) => &embedded.tag_field,
        }
    }

    /// The tags of every constructor, in declaration order.
    pub fn tags(&self) -> Vec<&str> {
        match self {
            Union::Plain(PlainUnion { constructors, .. })
            | Union::Generic(GenericUnion { constructors, .. }) => {
                constructors.iter().map(|c| c.tag.as_str()).collect()
            }
            Union::Embedded(embedded) => embedded
                .constructors
                .iter()
                .map(|c| c.tag.as_str())
                .collect(),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Enumeration {
    pub name: DefinitionName,
    pub fields: Vec<EnumerationField>,
}

/// `tag = value` inside an enum.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EnumerationField {
    pub tag: String,
    pub value: EnumerationValue,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum EnumerationValue {
    String(String),
    UnsignedInteger(u64),
}

/// A union without a tag; values are told apart structurally.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct UntaggedUnion {
    pub name: DefinitionName,
    pub values: Vec<TypeReference>,
}

/// `import module` or `import module = alias`.
///
/// `name` holds the imported module's name; `alias` is the prefix the
/// importing module uses for it, equal to the module name when no alias is
/// given.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Import {
    pub name: DefinitionName,
    pub alias: String,
}

const INDENT: &str = "    ";

fn write_open_names(f: &mut fmt::Formatter<'_>, open_names: &[String]) -> fmt::Result {
    if open_names.is_empty() {
        return Ok(());
    }
    write!(f, "<{}>", open_names.join(", "))
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[Field]) -> fmt::Result {
    for field in fields {
        writeln!(f, "{INDENT}{}: {}", field.name, field.ty)?;
    }
    Ok(())
}

fn write_constructors(f: &mut fmt::Formatter<'_>, constructors: &[Constructor]) -> fmt::Result {
    for constructor in constructors {
        if constructor.parameter.is_empty() {
            writeln!(f, "{INDENT}{}", constructor.tag)?;
        } else {
            writeln!(f, "{INDENT}{}: {}", constructor.tag, constructor.parameter)?;
        }
    }
    Ok(())
}

fn write_union_header(
    f: &mut fmt::Formatter<'_>,
    tag_field: &str,
    embedded: bool,
    name: &DefinitionName,
    open_names: &[String],
) -> fmt::Result {
    f.write_str("union")?;
    match (tag_field == DEFAULT_TAG_FIELD, embedded) {
        (true, false) => {}
        (true, true) => f.write_str("(embedded)")?,
        (false, false) => write!(f, "(tag = {tag_field})")?,
        (false, true) => write!(f, "(tag = {tag_field}, embedded)")?,
    }
    write!(f, " {}", name.value)?;
    write_open_names(f, open_names)?;
    writeln!(f, " {{")
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct {}", self.name().value)?;
        write_open_names(f, self.open_names())?;
        writeln!(f, " {{")?;
        write_fields(f, self.fields())?;
        f.write_str("}")
    }
}

impl fmt::Display for Union {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let embedded = matches!(self, Union::Embedded(_));
        write_union_header(f, self.tag_field(), embedded, self.name(), self.open_names())?;
        match self {
            Union::Plain(PlainUnion { constructors, .. })
            | Union::Generic(GenericUnion { constructors, .. }) => {
                write_constructors(f, constructors)?;
            }
            Union::Embedded(union) => {
                for constructor in &union.constructors {
                    match &constructor.parameter {
                        Some(structure) => writeln!(
                            f,
                            "{INDENT}{}: {}",
                            constructor.tag,
                            structure.name().value
                        )?,
                        None => writeln!(f, "{INDENT}{}", constructor.tag)?,
                    }
                }
            }
        }
        f.write_str("}")
    }
}

impl fmt::Display for EnumerationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumerationValue::String(value) => write!(f, "\"{value}\""),
            EnumerationValue::UnsignedInteger(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Definition::Structure(structure) => write!(f, "{structure}"),
            Definition::Union(union) => write!(f, "{union}"),
            Definition::Enumeration(enumeration) => {
                writeln!(f, "enum {} {{", enumeration.name.value)?;
                for field in &enumeration.fields {
                    writeln!(f, "{INDENT}{} = {}", field.tag, field.value)?;
                }
                f.write_str("}")
            }
            Definition::UntaggedUnion(untagged) => {
                writeln!(f, "untagged union {} {{", untagged.name.value)?;
                for value in &untagged.values {
                    writeln!(f, "{INDENT}{value}")?;
                }
                f.write_str("}")
            }
            Definition::Import(import) => {
                if import.alias == import.name.value {
                    write!(f, "import {}", import.name.value)
                } else {
                    write!(f, "import {} = {}", import.name.value, import.alias)
                }
            }
        }
    }
}
