//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//!
//! ```text
//! error[E2001]: unknown reference `Bar`
//!   --> app.gotyno:2:10
//!    |
//!  2 |     bar: Bar
//!    |          ^^^ not defined at this point
//!   = note: definitions can only refer to definitions above them and to themselves
//! ```

use std::io::Write;

use crate::{Diagnostic, Label, Severity, SourceInfo};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors on a TTY, unless `NO_COLOR` is set.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean, reading `NO_COLOR` from the environment.
    ///
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        self.resolve(is_tty, no_color)
    }

    /// Resolve to a boolean with the environment passed in.
    pub fn resolve(self, is_tty: bool, no_color: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty && !no_color,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
///
/// With a [`SourceInfo`] attached, labels are rendered as source snippets
/// with an underline; without one, only their locations are printed.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceInfo>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// `is_tty` is only consulted for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Render labels against this file.
    #[must_use]
    pub fn with_source(mut self, source: SourceInfo) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the file labels are rendered against.
    pub fn set_source(&mut self, source: Option<SourceInfo>) {
        self.source = source;
    }

    /// Consume the emitter and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        self.write_colored(&format!("[{code}]"), colors::BOLD);
    }

    fn write_gutter(&mut self, gutter: &str) {
        self.write_colored(gutter, colors::SECONDARY);
    }

    fn write_label(&mut self, label: &Label, gutter_width: usize) {
        let marker = if label.is_primary { "-->" } else { ":::" };
        let padding = " ".repeat(gutter_width);

        let Some(source) = &self.source else {
            let _ = write!(self.writer, "{padding}{marker} {}: ", label.location);
            self.write_label_message(label);
            let _ = writeln!(self.writer);
            return;
        };
        let path = source.path.clone();
        let line = source.line(label.location.line).map(str::to_string);

        let _ = write!(self.writer, "{padding}");
        self.write_gutter(marker);
        let _ = writeln!(self.writer, " {path}:{}", label.location);

        let Some(line) = line else {
            return;
        };
        let number = label.location.line.to_string();
        self.write_gutter(&format!("{padding} |"));
        let _ = writeln!(self.writer);
        self.write_gutter(&format!("{number:>gutter_width$} |"));
        let _ = writeln!(self.writer, " {line}");
        self.write_gutter(&format!("{padding} |"));

        let indent = " ".repeat(label.location.column.saturating_sub(1) as usize);
        let mark = if label.is_primary { "^" } else { "-" };
        let underline = mark.repeat(label.width as usize);
        let _ = write!(self.writer, " {indent}");
        if label.is_primary {
            self.write_colored(&underline, colors::ERROR);
        } else {
            self.write_colored(&underline, colors::SECONDARY);
        }
        if !label.message.is_empty() {
            let _ = write!(self.writer, " ");
            self.write_label_message(label);
        }
        let _ = writeln!(self.writer);
    }

    fn write_label_message(&mut self, label: &Label) {
        if label.is_primary {
            self.write_colored(&label.message, colors::ERROR);
        } else {
            self.write_colored(&label.message, colors::SECONDARY);
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        let gutter_width = diagnostic
            .labels
            .iter()
            .map(|label| label.location.line.to_string().len())
            .max()
            .unwrap_or(1)
            + 1;

        for label in &diagnostic.labels {
            self.write_label(label, gutter_width);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "{} = ", " ".repeat(gutter_width - 1));
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "{} = ", " ".repeat(gutter_width - 1));
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

#[cfg(test)]
mod tests;
