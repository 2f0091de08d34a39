//! Field types and type references.
//!
//! `Type` is the shape written in a field or constructor position;
//! `TypeReference` is what a name in that position resolved to.
//!
//! # Ownership
//!
//! The wrapper types (`Array`, `Slice`, `Pointer`, `Optional`) own their
//! inner `Type` through a `Box`. Nothing in a type tree is shared: two fields
//! that mention the same struct each hold their own `TypeReference`, and any
//! sharing of the definition itself goes through the symbol table's `Arc`.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::{Builtin, Definition};

/// The type of a field or constructor payload.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    /// No payload. Only produced for tag-only union constructors.
    Empty,
    /// A string literal type, e.g. `"movie"`. Holds the content without quotes.
    String(String),
    /// A resolved name.
    Reference(TypeReference),
    /// `[N]T`
    Array { size: u64, ty: Box<Type> },
    /// `[]T`
    Slice(Box<Type>),
    /// `*T`
    Pointer(Box<Type>),
    /// `?T`
    Optional(Box<Type>),
}

impl Type {
    pub fn array(size: u64, ty: Type) -> Self {
        Type::Array {
            size,
            ty: Box::new(ty),
        }
    }

    pub fn slice(ty: Type) -> Self {
        Type::Slice(Box::new(ty))
    }

    pub fn pointer(ty: Type) -> Self {
        Type::Pointer(Box::new(ty))
    }

    pub fn optional(ty: Type) -> Self {
        Type::Optional(Box::new(ty))
    }

    /// True for the tag-only constructor sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Type::Empty)
    }

    /// The reference at the bottom of any wrappers, if there is one.
    ///
    /// `?[]Person` yields the reference to `Person`; literals and `Empty`
    /// yield `None`.
    pub fn reference(&self) -> Option<&TypeReference> {
        match self {
            Type::Reference(reference) => Some(reference),
            Type::Array { ty, .. } | Type::Slice(ty) | Type::Pointer(ty) | Type::Optional(ty) => {
                ty.reference()
            }
            Type::Empty | Type::String(_) => None,
        }
    }

    /// Every open name this type mentions, in first-seen order, with
    /// duplicates removed.
    pub fn open_names_in_use(&self) -> Vec<&str> {
        let mut names = Vec::new();
        if let Some(reference) = self.reference() {
            reference.collect_open_names(&mut names);
        }
        names
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Empty => Ok(()),
            Type::String(value) => write!(f, "\"{value}\""),
            Type::Reference(reference) => write!(f, "{reference}"),
            Type::Array { size, ty } => write!(f, "[{size}]{ty}"),
            Type::Slice(ty) => write!(f, "[]{ty}"),
            Type::Pointer(ty) => write!(f, "*{ty}"),
            Type::Optional(ty) => write!(f, "?{ty}"),
        }
    }
}

/// What a type name resolved to.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeReference {
    Builtin(Builtin),
    /// A finished definition of the current module.
    Definition(Arc<Definition>),
    /// A finished definition of an earlier module, reached through `module.Name`.
    ImportedDefinition(ImportedDefinition),
    /// The definition currently being parsed.
    Loose(LooseReference),
    /// One of the enclosing definition's generic parameters.
    Open(String),
    /// A generic reference with arguments, e.g. `Maybe<T>`.
    AppliedName(AppliedName),
}

/// A reference into another module.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImportedDefinition {
    /// The module prefix as written at the reference site.
    pub import_name: String,
    pub definition: Arc<Definition>,
}

/// Placeholder for a self-reference.
///
/// The definition does not exist yet when its own body mentions it, so the
/// reference keeps only the name and a snapshot of the enclosing open names.
/// Consumers look the definition up by name once the module is finished.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LooseReference {
    pub name: String,
    pub open_names: Vec<String>,
}

/// A generic reference instantiated with arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AppliedName {
    pub reference: Box<TypeReference>,
    pub open_names: Vec<AppliedOpenName>,
}

/// One argument of an `AppliedName`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum AppliedOpenName {
    /// An open name of the enclosing definition, passed through.
    Open(String),
    /// Anything else: builtins, definitions, nested applications.
    Reference(TypeReference),
}

impl TypeReference {
    /// The bare name this reference was written with.
    ///
    /// Qualified references return the definition name without the module
    /// prefix; applied names return the name of the applied reference.
    pub fn name(&self) -> &str {
        match self {
            TypeReference::Builtin(builtin) => builtin.name(),
            TypeReference::Definition(definition) => &definition.name().value,
            TypeReference::ImportedDefinition(imported) => &imported.definition.name().value,
            TypeReference::Loose(loose) => &loose.name,
            TypeReference::Open(name) => name,
            TypeReference::AppliedName(applied) => applied.reference.name(),
        }
    }

    /// The definition this reference points at, if it is a finished one.
    pub fn definition(&self) -> Option<&Arc<Definition>> {
        match self {
            TypeReference::Definition(definition) => Some(definition),
            TypeReference::ImportedDefinition(imported) => Some(&imported.definition),
            TypeReference::AppliedName(applied) => applied.reference.definition(),
            TypeReference::Builtin(_) | TypeReference::Loose(_) | TypeReference::Open(_) => None,
        }
    }

    /// Every open name this reference mentions, in first-seen order, with
    /// duplicates removed.
    ///
    /// For an applied name only the arguments count. A bare loose reference
    /// counts its whole snapshot, since it stands for the definition applied
    /// to its own parameters.
    pub fn open_names_in_use(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_open_names(&mut names);
        names
    }

    fn collect_open_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            TypeReference::Open(name) => push_unique(names, name),
            TypeReference::Loose(loose) => {
                for name in &loose.open_names {
                    push_unique(names, name);
                }
            }
            TypeReference::AppliedName(applied) => {
                for argument in &applied.open_names {
                    match argument {
                        AppliedOpenName::Open(name) => push_unique(names, name),
                        AppliedOpenName::Reference(reference) => {
                            reference.collect_open_names(names);
                        }
                    }
                }
            }
            TypeReference::Builtin(_)
            | TypeReference::Definition(_)
            | TypeReference::ImportedDefinition(_) => {}
        }
    }
}

fn push_unique<'a>(names: &mut Vec<&'a str>, name: &'a str) {
    if !names.contains(&name) {
        names.push(name);
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeReference::ImportedDefinition(imported) => write!(
                f,
                "{}.{}",
                imported.import_name,
                imported.definition.name().value
            ),
            TypeReference::AppliedName(applied) => {
                write!(f, "{}<", applied.reference)?;
                for (i, argument) in applied.open_names.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(">")
            }
            other => f.write_str(other.name()),
        }
    }
}

impl fmt::Display for AppliedOpenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliedOpenName::Open(name) => f.write_str(name),
            AppliedOpenName::Reference(reference) => write!(f, "{reference}"),
        }
    }
}

/// The open names of an enclosing definition that `ty` actually uses.
///
/// This is the set of type parameters a generated field type has to be
/// threaded through. The result follows the order of `enclosing`, not the
/// order in which `ty` mentions the names, and never contains builtin names.
pub fn common_open_names(enclosing: &[String], ty: &Type) -> Vec<String> {
    let used: FxHashSet<&str> = ty.open_names_in_use().into_iter().collect();
    enclosing
        .iter()
        .filter(|name| used.contains(name.as_str()) && !Builtin::is_builtin_name(name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests;
