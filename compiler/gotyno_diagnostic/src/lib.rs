//! Diagnostic system for gotyno error reporting.
//!
//! Every diagnostic carries:
//! - an error code for searchability
//! - a message saying what went wrong
//! - a primary label saying where
//! - optional secondary labels, notes and suggestions
//!
//! Emitters turn diagnostics into text; see [`emitter`].

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity, SourceInfo};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
