//! End-to-end tests: source batches in, modules or rendered diagnostics out.

use gotyno_diagnostic::ColorMode;
use gotyno_ir::{Builtin, Definition, Type, TypeReference};
use gotynoc::{compile, SourceFile};
use pretty_assertions::assert_eq;

const BASIC: &str = r#"struct Recruiter {
    type: "Recruiter"
    name: String
    emails: [3]?String
    recruiter: ?*Recruiter
    created: U64
}

union Maybe<T> {
    Nothing
    Just: T
}

enum Color {
    red = "FF0000"
    green = "00FF00"
}

union(tag = kind, embedded) Event {
    Hired: Recruiter
}

untagged union Id {
    String
    U64
}
"#;

const APP: &str = "import basic = b\n\nstruct Staff {\n    lead: b.Maybe<b.Recruiter>\n}\n";

#[test]
fn test_compile_batch() {
    let sources = [
        SourceFile::new("defs/basic.gotyno", BASIC),
        SourceFile::new("defs/app.gotyno", APP),
    ];
    let modules = compile(&sources).unwrap();

    let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["basic", "app"]);

    let basic = modules.get("basic").unwrap();
    let kinds: Vec<&str> = basic.definitions().iter().map(|d| d.kind_name()).collect();
    assert_eq!(kinds, vec!["struct", "union", "enum", "union", "untagged union"]);

    let Some(Definition::Structure(recruiter)) = basic.get("Recruiter").map(|d| &**d) else {
        panic!("expected a struct");
    };
    assert_eq!(recruiter.fields()[1].ty, Type::Reference(TypeReference::Builtin(Builtin::String)));
    assert_eq!(recruiter.fields()[3].name, "recruiter");
    assert_eq!(recruiter.fields()[3].ty.to_string(), "?*Recruiter");

    let app = modules.get("app").unwrap();
    assert_eq!(app.filename, "defs/app.gotyno");
    assert_eq!(app.len(), 2);

    let Some(Definition::Structure(staff)) = app.get("Staff").map(|d| &**d) else {
        panic!("expected a struct");
    };
    let lead = &staff.fields()[0].ty;
    assert_eq!(lead.to_string(), "b.Maybe<b.Recruiter>");
    let Type::Reference(TypeReference::AppliedName(applied)) = lead else {
        panic!("expected an applied name, got {lead:?}");
    };
    let TypeReference::ImportedDefinition(maybe) = &*applied.reference else {
        panic!("expected an imported definition");
    };
    assert_eq!(maybe.import_name, "b");
    assert!(std::sync::Arc::ptr_eq(&maybe.definition, basic.get("Maybe").unwrap()));
}

#[test]
fn test_render_unknown_reference() {
    let sources = [SourceFile::new(
        "app.gotyno",
        "struct Foo {\n    bar: Bar\n}\n",
    )];
    let failure = compile(&sources).unwrap_err();
    assert_eq!(failure.filename(), "app.gotyno");

    assert_eq!(
        failure.render(&sources, ColorMode::Never),
        "error[E2001]: unknown reference `Bar`\n\
         \x20 --> app.gotyno:2:10\n\
         \x20  |\n\
         \x202 |     bar: Bar\n\
         \x20  |          ^^^ not defined at this point\n\
         \x20 = note: definitions can only refer to definitions above them and to themselves\n\
         \n\
         error: aborting due to previous error\n"
    );
}

#[test]
fn test_render_points_at_failing_file() {
    let sources = [
        SourceFile::new("ok.gotyno", "struct Ok {\n}\n"),
        SourceFile::new("bad.gotyno", "struct Bad {\n  two: U8\n}\n"),
    ];
    let failure = compile(&sources).unwrap_err();
    let text = failure.render(&sources, ColorMode::Never);

    assert!(text.starts_with("error[E1001]: expected space, found "));
    assert!(text.contains("  --> bad.gotyno:2:3\n"));
    assert!(text.contains(
        " = note: fields, constructors and enum values are indented by exactly four spaces\n"
    ));
}

#[test]
fn test_render_duplicate_module() {
    let sources = [
        SourceFile::new("a/types.gotyno", "struct A {\n}\n"),
        SourceFile::new("b/types.gotyno", "struct B {\n}\n"),
    ];
    let text = compile(&sources).unwrap_err().render(&sources, ColorMode::Never);

    assert!(text.starts_with("error[E3001]: duplicate module `types`\n"));
    assert!(text.contains("`b/types.gotyno` and `a/types.gotyno` both define module `types`"));
    assert!(text.contains(" = help: rename one of the files\n"));
}

#[test]
fn test_render_with_colors() {
    let sources = [SourceFile::new("a.gotyno", "struct A {\n    b: B\n}\n")];
    let failure = compile(&sources).unwrap_err();

    assert!(failure.render(&sources, ColorMode::Always).contains("\x1b["));
    assert!(!failure.render(&sources, ColorMode::Auto).contains("\x1b["));
}

#[test]
fn test_init_tracing_twice() {
    gotynoc::init_tracing();
    gotynoc::init_tracing();
}
