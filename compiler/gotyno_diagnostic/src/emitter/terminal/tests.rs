use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;
use gotyno_ir::Location;

fn source() -> SourceInfo {
    SourceInfo::new("app.gotyno", "struct Foo {\n    bar: Bar\n}\n")
}

fn unknown_reference() -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message("unknown reference `Bar`")
        .with_label(Location::new(2, 10), 3, "not defined at this point")
        .with_note("definitions can only refer to definitions above them and to themselves")
}

fn render(mode: ColorMode, source: Option<SourceInfo>, diagnostic: &Diagnostic) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), mode, false);
    emitter.set_source(source);
    emitter.emit(diagnostic);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn test_snippet_with_caret_underline() {
    let text = render(ColorMode::Never, Some(source()), &unknown_reference());
    assert_eq!(
        text,
        "error[E2001]: unknown reference `Bar`\n\
         \x20 --> app.gotyno:2:10\n\
         \x20  |\n\
         \x202 |     bar: Bar\n\
         \x20  |          ^^^ not defined at this point\n\
         \x20 = note: definitions can only refer to definitions above them and to themselves\n\
         \n"
    );
}

#[test]
fn test_secondary_label_uses_dashes() {
    let source = SourceInfo::new("a.gotyno", "struct Foo {\n}\nstruct Foo {\n}\n");
    let diagnostic = Diagnostic::error(ErrorCode::E2003)
        .with_message("duplicate definition `Foo`")
        .with_label(Location::new(3, 1), 6, "redefined here")
        .with_secondary_label(Location::new(1, 1), 6, "first defined here");
    let text = render(ColorMode::Never, Some(source), &diagnostic);

    assert!(text.contains("  --> a.gotyno:3:1\n"));
    assert!(text.contains("  ::: a.gotyno:1:1\n"));
    assert!(text.contains("   | ^^^^^^ redefined here\n"));
    assert!(text.contains("   | ------ first defined here\n"));
}

#[test]
fn test_without_source_prints_locations() {
    let text = render(ColorMode::Never, None, &unknown_reference());
    assert!(text.contains("  --> 2:10: not defined at this point\n"));
    assert!(!text.contains(" |"));
}

#[test]
fn test_suggestion_rendered_as_help() {
    let diagnostic = unknown_reference().with_suggestion("define `Bar` above `Foo`");
    let text = render(ColorMode::Never, Some(source()), &diagnostic);
    assert!(text.contains("  = help: define `Bar` above `Foo`\n"));
}

#[test]
fn test_always_mode_emits_ansi() {
    let text = render(ColorMode::Always, Some(source()), &unknown_reference());
    assert!(text.contains("\x1b["));
    assert!(text.contains("E2001"));
}

#[test]
fn test_never_mode_has_no_ansi() {
    let text = render(ColorMode::Never, Some(source()), &unknown_reference());
    assert!(!text.contains('\x1b'));
}

#[test]
fn test_emit_all() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_all(&[
        Diagnostic::error(ErrorCode::E1001).with_message("error 1"),
        Diagnostic::error(ErrorCode::E3001).with_message("error 2"),
    ]);
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(text.contains("error[E1001]: error 1"));
    assert!(text.contains("error[E3001]: error 2"));
}

#[test]
fn test_emit_summary() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(2, 1);
    emitter.emit_summary(1, 0);
    emitter.emit_summary(0, 3);
    emitter.emit_summary(0, 0);
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(
        text,
        "error: aborting due to 2 previous errors; 1 warning emitted\n\
         error: aborting due to previous error\n\
         warning: 3 warnings emitted\n"
    );
}

// --- ColorMode Tests ---

#[test]
fn test_color_mode_resolve() {
    assert!(ColorMode::Auto.resolve(true, false));
    assert!(!ColorMode::Auto.resolve(false, false));
    assert!(!ColorMode::Auto.resolve(true, true));
    assert!(ColorMode::Always.resolve(false, true));
    assert!(!ColorMode::Never.resolve(true, false));
}

#[test]
fn test_color_mode_default_is_auto() {
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}
