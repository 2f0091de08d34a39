use std::sync::Arc;

use gotyno_ir::{
    AppliedName, AppliedOpenName, Builtin, Definition, Import, ImportedDefinition, Location, Type,
    TypeReference,
};
use pretty_assertions::assert_eq;

use super::*;

const M1: &str = "union Maybe<T> {\n    Nothing\n    Just: T\n}\n";
const M2: &str = "struct Two {\n    f: m1.Maybe<String>\n}\n";

fn field_type(modules: &ModuleMap, module: &str, definition: &str) -> Type {
    modules
        .get(module)
        .and_then(|m| m.get(definition))
        .and_then(|d| d.as_structure())
        .map(|s| s.fields()[0].ty.clone())
        .unwrap()
}

#[test]
fn test_module_names() {
    assert_eq!(module_name_from_filename("basic.gotyno"), "basic");
    assert_eq!(module_name_from_filename("some/dir/basic.gotyno"), "basic");
    assert_eq!(module_name_from_filename("C:\\defs\\basic.gotyno"), "basic");
    assert_eq!(module_name_from_filename("archive.tar.gotyno"), "archive.tar");
    assert_eq!(module_name_from_filename("notes.txt"), "notes");
    assert_eq!(module_name_from_filename("plain"), "plain");
    assert_eq!(module_name_from_filename(".hidden"), ".hidden");
}

#[test]
fn test_qualified_generic_application_across_modules() {
    let modules = parse_modules(&[
        SourceBuffer::new("m1.gotyno", M1),
        SourceBuffer::new("m2.gotyno", M2),
    ])
    .unwrap();

    let maybe = Arc::clone(modules.get("m1").unwrap().get("Maybe").unwrap());
    assert_eq!(
        field_type(&modules, "m2", "Two"),
        Type::Reference(TypeReference::AppliedName(AppliedName {
            reference: Box::new(TypeReference::ImportedDefinition(ImportedDefinition {
                import_name: "m1".to_string(),
                definition: maybe,
            })),
            open_names: vec![AppliedOpenName::Reference(TypeReference::Builtin(
                Builtin::String
            ))],
        }))
    );

    let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["m1", "m2"]);
}

#[test]
fn test_reversed_order_is_unknown_module() {
    let error = parse_modules(&[
        SourceBuffer::new("m2.gotyno", M2),
        SourceBuffer::new("m1.gotyno", M1),
    ])
    .unwrap_err();
    assert_eq!(
        error,
        ModulesError::Parsing {
            filename: "m2.gotyno".to_string(),
            error: ParsingError::UnknownModule {
                name: "m1".to_string(),
                location: Location::new(2, 8),
            },
        }
    );
    assert_eq!(error.filename(), "m2.gotyno");
}

#[test]
fn test_import_alias() {
    let modules = parse_modules(&[
        SourceBuffer::new("defs/m1.gotyno", M1),
        SourceBuffer::new(
            "defs/app.gotyno",
            "import m1 = other\n\nstruct Uses {\n    f: other.Maybe<U8>\n}\n",
        ),
    ])
    .unwrap();

    let app = modules.get("app").unwrap();
    assert_eq!(
        app.definitions()[0].as_ref(),
        &Definition::Import(Import {
            name: gotyno_ir::DefinitionName::new("m1", Location::START),
            alias: "other".to_string(),
        })
    );
    assert!(app.get("other").is_some());

    let Type::Reference(TypeReference::AppliedName(applied)) =
        field_type(&modules, "app", "Uses")
    else {
        panic!("expected an applied name");
    };
    let TypeReference::ImportedDefinition(imported) = *applied.reference else {
        panic!("expected an imported definition");
    };
    assert_eq!(imported.import_name, "other");
    assert_eq!(imported.definition.name().value, "Maybe");
}

#[test]
fn test_import_of_unknown_module() {
    let error = parse_modules(&[SourceBuffer::new("a.gotyno", "import nope\n")]).unwrap_err();
    assert!(matches!(
        error,
        ModulesError::Parsing {
            error: ParsingError::UnknownModule { ref name, location },
            ..
        } if name == "nope" && location == Location::new(1, 8)
    ));
}

#[test]
fn test_repeated_alias_is_duplicate() {
    let error = parse_modules(&[
        SourceBuffer::new("m1.gotyno", M1),
        SourceBuffer::new("app.gotyno", "import m1\nimport m1\n"),
    ])
    .unwrap_err();
    assert_eq!(
        error,
        ModulesError::Parsing {
            filename: "app.gotyno".to_string(),
            error: ParsingError::DuplicateDefinition {
                name: "m1".to_string(),
                location: Location::new(2, 1),
                previous: Location::new(1, 1),
            },
        }
    );
}

#[test]
fn test_qualified_unknown_name() {
    let error = parse_modules(&[
        SourceBuffer::new("m1.gotyno", M1),
        SourceBuffer::new("app.gotyno", "struct T {\n    f: m1.Nope\n}\n"),
    ])
    .unwrap_err();
    assert!(matches!(
        error,
        ModulesError::Parsing {
            error: ParsingError::UnknownReference { ref name, location },
            ..
        } if name == "m1.Nope" && location == Location::new(2, 8)
    ));
}

#[test]
fn test_duplicate_module_name() {
    let error = parse_modules(&[
        SourceBuffer::new("a.gotyno", "struct A {\n}\n"),
        SourceBuffer::new("other/a.gotyno", "struct B {\n}\n"),
    ])
    .unwrap_err();
    assert_eq!(
        error,
        ModulesError::DuplicateModule {
            name: "a".to_string(),
            filename: "other/a.gotyno".to_string(),
            previous: "a.gotyno".to_string(),
        }
    );
    let diagnostic = error.into_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E3001);
    assert!(diagnostic.notes[0].contains("a.gotyno"));
}

#[test]
fn test_later_modules_do_not_see_each_others_names() {
    let error = parse_modules(&[
        SourceBuffer::new("a.gotyno", "struct A {\n}\n"),
        SourceBuffer::new("b.gotyno", "struct B {\n    a: A\n}\n"),
    ])
    .unwrap_err();
    assert!(matches!(
        error,
        ModulesError::Parsing {
            error: ParsingError::UnknownReference { .. },
            ..
        }
    ));
}

#[test]
fn test_empty_batch() {
    assert!(parse_modules(&[]).unwrap().is_empty());
}
