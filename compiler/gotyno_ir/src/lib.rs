//! Gotyno IR - definition model types.
//!
//! This crate contains the data structures shared by every stage of the
//! gotyno front end and by the emitters that consume it:
//! - `Location` for 1-based line/column positions
//! - `Token`, `TokenKind` and `TokenList` for lexer output
//! - `Type`, `TypeReference` and `Builtin` for field types
//! - `Definition` and its variants for top-level constructs
//! - `Module` and `ModuleMap` for finished, queryable parse results
//!
//! # Design Philosophy
//!
//! - **Closed variants**: every tagged construct is a plain Rust enum.
//! - **Single-owner type trees**: wrapper types own their inner `Type` by `Box`.
//! - **No cycles**: a definition that refers to itself does so through a
//!   `TypeReference::Loose` placeholder, resolved by name by consumers.
//!   Finished definitions are immutable and shared through `Arc`.

mod builtin;
mod definition;
mod location;
mod module;
mod token;
mod ty;

pub use builtin::Builtin;
pub use definition::{
    Constructor, Definition, DefinitionName, EmbeddedConstructor, EmbeddedUnion, Enumeration,
    EnumerationField, EnumerationValue, Field, GenericStructure, GenericUnion, Import,
    PlainStructure, PlainUnion, Structure, Union, UntaggedUnion, DEFAULT_TAG_FIELD,
};
pub use location::Location;
pub use module::{Module, ModuleMap};
pub use token::{Token, TokenKind, TokenList};
pub use ty::{
    common_open_names, AppliedName, AppliedOpenName, ImportedDefinition, LooseReference, Type,
    TypeReference,
};
