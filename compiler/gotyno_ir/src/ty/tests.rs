use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{Definition, DefinitionName, GenericUnion, Location, Union};

fn open(name: &str) -> TypeReference {
    TypeReference::Open(name.to_string())
}

fn maybe() -> Arc<Definition> {
    Arc::new(Definition::Union(Union::Generic(GenericUnion {
        name: DefinitionName::new("Maybe", Location::START),
        constructors: vec![],
        open_names: vec!["T".to_string()],
        tag_field: "type".to_string(),
    })))
}

fn applied(reference: TypeReference, arguments: Vec<AppliedOpenName>) -> TypeReference {
    TypeReference::AppliedName(AppliedName {
        reference: Box::new(reference),
        open_names: arguments,
    })
}

#[test]
fn test_reference_under_wrappers() {
    let ty = Type::optional(Type::slice(Type::Reference(open("T"))));
    assert_eq!(ty.reference(), Some(&open("T")));
    assert_eq!(Type::String("movie".into()).reference(), None);
    assert_eq!(Type::Empty.reference(), None);
}

#[test]
fn test_display_round_trips_source_syntax() {
    let maybe_t = applied(
        TypeReference::Definition(maybe()),
        vec![AppliedOpenName::Open("T".into())],
    );
    assert_eq!(maybe_t.to_string(), "Maybe<T>");

    let imported = applied(
        TypeReference::ImportedDefinition(ImportedDefinition {
            import_name: "m1".to_string(),
            definition: maybe(),
        }),
        vec![AppliedOpenName::Reference(TypeReference::Builtin(Builtin::String))],
    );
    assert_eq!(imported.to_string(), "m1.Maybe<String>");

    let ty = Type::array(3, Type::pointer(Type::Reference(maybe_t)));
    assert_eq!(ty.to_string(), "[3]*Maybe<T>");
    assert_eq!(Type::String("movie".into()).to_string(), "\"movie\"");
}

#[test]
fn test_name_and_definition() {
    let imported = TypeReference::ImportedDefinition(ImportedDefinition {
        import_name: "m1".to_string(),
        definition: maybe(),
    });
    assert_eq!(imported.name(), "Maybe");
    assert!(imported.definition().is_some());

    let loose = TypeReference::Loose(LooseReference {
        name: "List".to_string(),
        open_names: vec!["T".to_string()],
    });
    assert_eq!(loose.name(), "List");
    assert!(loose.definition().is_none());
    assert_eq!(TypeReference::Builtin(Builtin::F64).name(), "F64");
}

#[test]
fn test_open_names_in_use_nested_applications() {
    // Either<Maybe<B>, A> with B repeated in a second argument.
    let nested = applied(
        TypeReference::Definition(maybe()),
        vec![AppliedOpenName::Open("B".into())],
    );
    let reference = applied(
        TypeReference::Definition(maybe()),
        vec![
            AppliedOpenName::Reference(nested),
            AppliedOpenName::Open("A".into()),
            AppliedOpenName::Open("B".into()),
        ],
    );
    assert_eq!(reference.open_names_in_use(), vec!["B", "A"]);
}

#[test]
fn test_loose_counts_snapshot_only_when_bare() {
    let loose = TypeReference::Loose(LooseReference {
        name: "Tree".to_string(),
        open_names: vec!["K".to_string(), "V".to_string()],
    });
    assert_eq!(loose.open_names_in_use(), vec!["K", "V"]);

    let applied_loose = applied(loose, vec![AppliedOpenName::Open("V".into())]);
    assert_eq!(applied_loose.open_names_in_use(), vec!["V"]);
}

#[test]
fn test_common_open_names_follow_enclosing_order() {
    let enclosing = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let ty = Type::slice(Type::Reference(applied(
        TypeReference::Definition(maybe()),
        vec![
            AppliedOpenName::Open("C".into()),
            AppliedOpenName::Open("A".into()),
        ],
    )));
    assert_eq!(common_open_names(&enclosing, &ty), vec!["A", "C"]);
}

#[test]
fn test_common_open_names_without_generics() {
    let enclosing = vec!["T".to_string()];
    let ty = Type::Reference(TypeReference::Builtin(Builtin::String));
    assert!(common_open_names(&enclosing, &ty).is_empty());
    assert!(common_open_names(&[], &Type::Reference(open("T"))).is_empty());
}

#[test]
fn test_common_open_names_excludes_builtin_names() {
    let enclosing = vec!["String".to_string(), "T".to_string()];
    let ty = Type::Reference(applied(
        TypeReference::Definition(maybe()),
        vec![
            AppliedOpenName::Open("String".into()),
            AppliedOpenName::Open("T".into()),
        ],
    ));
    assert_eq!(common_open_names(&enclosing, &ty), vec!["T"]);
}
