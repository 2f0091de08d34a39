use gotyno_diagnostic::{ColorMode, DiagnosticEmitter, SourceInfo, TerminalEmitter};
use pretty_assertions::assert_eq;

use super::*;
use crate::parse;

fn parse_err(source: &str) -> ParsingError {
    parse("test.gotyno", source).unwrap_err()
}

#[test]
fn test_codes_and_locations() {
    let cases = [
        ("struct A {\n   a: U8\n}\n", ErrorCode::E1001, Location::new(2, 4)),
        ("type A {\n}\n", ErrorCode::E1002, Location::new(1, 1)),
        ("union(wide) A {\n}\n", ErrorCode::E1003, Location::new(1, 7)),
        ("struct A<T, T> {\n}\n", ErrorCode::E1004, Location::new(1, 13)),
        ("struct A {\n    b: B\n}\n", ErrorCode::E2001, Location::new(2, 8)),
        ("import m\n", ErrorCode::E2002, Location::new(1, 8)),
        ("enum A {\n}\nenum A {\n}\n", ErrorCode::E2003, Location::new(3, 1)),
        ("union(embedded) A {\n    X: U8\n}\n", ErrorCode::E2004, Location::new(2, 8)),
        ("struct A {\n    a: U8\n    a: U8\n}\n", ErrorCode::E2005, Location::new(3, 5)),
        ("struct U64 {\n}\n", ErrorCode::E2006, Location::new(1, 8)),
    ];
    for (source, code, location) in cases {
        let error = parse_err(source);
        assert_eq!((error.code(), error.location()), (code, location), "{source:?}");
    }
}

#[test]
fn test_messages() {
    assert_eq!(
        parse_err("struct A {\n    b: B\n}\n").to_string(),
        "unknown reference `B`"
    );
    assert_eq!(
        parse_err("struct A\n").to_string(),
        "expected `{`, found newline"
    );
    assert_eq!(
        parse_err("union(embedded) A {\n    X: U8\n}\n").to_string(),
        "embedded union payload `U8` must be a struct, found builtin"
    );
}

#[test]
fn test_duplicate_diagnostic_has_both_locations() {
    let diagnostic = parse_err("enum A {\n}\nenum A {\n}\n").into_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E2003);
    assert_eq!(diagnostic.labels.len(), 2);
    assert!(diagnostic.labels[0].is_primary);
    assert_eq!(diagnostic.labels[0].location, Location::new(3, 1));
    assert!(!diagnostic.labels[1].is_primary);
    assert_eq!(diagnostic.labels[1].location, Location::new(1, 1));
}

#[test]
fn test_duplicate_member_diagnostic() {
    let error = parse_err("enum Color {\n    red = 1\n    red = 2\n}\n");
    assert_eq!(error.to_string(), "`red` is declared twice in `Color`");

    let diagnostic = error.into_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E2005);
    assert_eq!(
        diagnostic
            .labels
            .iter()
            .map(|label| (label.location, label.width, label.is_primary))
            .collect::<Vec<_>>(),
        vec![(Location::new(3, 5), 3, true), (Location::new(2, 5), 3, false)]
    );
}

#[test]
fn test_reserved_name_message() {
    let error = parse_err("struct String {\n}\n");
    assert_eq!(
        error.to_string(),
        "`String` is a builtin type and cannot be redefined"
    );
    assert_eq!(error.into_diagnostic().labels[0].width, 6);
}

#[test]
fn test_indentation_diagnostic_has_note() {
    let diagnostic = parse_err("struct A {\n  a: U8\n}\n").into_diagnostic();
    assert_eq!(diagnostic.notes.len(), 1);
    assert!(diagnostic.notes[0].contains("four spaces"));
}

#[test]
fn test_unknown_reference_renders_under_name() {
    let source = "struct Foo {\n    bar: Bar\n}\n";
    let diagnostic = parse_err(source).into_diagnostic();

    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
        .with_source(SourceInfo::new("app.gotyno", source));
    emitter.emit(&diagnostic);
    let text = String::from_utf8(emitter.into_inner()).unwrap();

    assert!(text.starts_with("error[E2001]: unknown reference `Bar`\n"));
    assert!(text.contains("  --> app.gotyno:2:10\n"));
    assert!(text.contains(" 2 |     bar: Bar\n"));
    assert!(text.contains("   |          ^^^ not defined at this point\n"));
    assert!(text.contains(
        "  = note: definitions can only refer to definitions above them and to themselves\n"
    ));
}
