//! Error codes for all gotyno diagnostics.
//!
//! The first digit names the stage that produced the error.

use std::fmt;

/// Error codes for all gotyno diagnostics.
///
/// Format: E#### where the first digit indicates the stage:
/// - E1xxx: Syntax errors
/// - E2xxx: Name resolution errors
/// - E3xxx: Module errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Syntax Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Unknown definition keyword
    E1002,
    /// Invalid union option
    E1003,
    /// Type parameter declared twice
    E1004,

    // Name Resolution Errors (E2xxx)
    /// Reference to an undefined name
    E2001,
    /// Import of a module that has not been parsed
    E2002,
    /// Top-level name defined twice
    E2003,
    /// Embedded union payload is not a structure
    E2004,
    /// Field, constructor or enum tag declared twice in one body
    E2005,
    /// Definition named after a builtin type
    E2006,

    // Module Errors (E3xxx)
    /// Two files map to the same module name
    E3001,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E3001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E3001 => "E3001",
        }
    }

    /// One-line description of the error class.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "unknown definition keyword",
            ErrorCode::E1003 => "invalid union option",
            ErrorCode::E1004 => "duplicate type parameter",
            ErrorCode::E2001 => "unknown reference",
            ErrorCode::E2002 => "unknown module",
            ErrorCode::E2003 => "duplicate definition",
            ErrorCode::E2004 => "invalid embedded union payload",
            ErrorCode::E2005 => "duplicate member",
            ErrorCode::E2006 => "builtin type name redefined",
            ErrorCode::E3001 => "duplicate module",
        }
    }

    /// Check if this is a syntax error (E1xxx range).
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004
        )
    }

    /// Check if this is a name resolution error (E2xxx range).
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
        )
    }

    /// Check if this is a module error (E3xxx range).
    pub fn is_module_error(&self) -> bool {
        matches!(self, ErrorCode::E3001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
