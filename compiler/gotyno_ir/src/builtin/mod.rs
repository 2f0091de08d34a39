//! Builtin type identification enum.
//!
//! Gotyno has a fixed set of primitive type names. A bare name that matches
//! one of them always resolves to the builtin, before any definition lookup.
//!
//! ```ignore
//! use gotyno_ir::Builtin;
//!
//! assert_eq!(Builtin::from_name("U32"), Some(Builtin::U32));
//! assert_eq!(Builtin::U32.name(), "U32");
//! ```

use std::fmt;

/// The primitive types of gotyno.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    String,
    Boolean,
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    F32,
    F64,
    F128,
}

impl Builtin {
    /// Every builtin, in declaration order.
    pub const ALL: [Builtin; 15] = [
        Builtin::String,
        Builtin::Boolean,
        Builtin::U8,
        Builtin::U16,
        Builtin::U32,
        Builtin::U64,
        Builtin::U128,
        Builtin::I8,
        Builtin::I16,
        Builtin::I32,
        Builtin::I64,
        Builtin::I128,
        Builtin::F32,
        Builtin::F64,
        Builtin::F128,
    ];

    /// Look up a builtin by its source name. Names are case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "String" => Builtin::String,
            "Boolean" => Builtin::Boolean,
            "U8" => Builtin::U8,
            "U16" => Builtin::U16,
            "U32" => Builtin::U32,
            "U64" => Builtin::U64,
            "U128" => Builtin::U128,
            "I8" => Builtin::I8,
            "I16" => Builtin::I16,
            "I32" => Builtin::I32,
            "I64" => Builtin::I64,
            "I128" => Builtin::I128,
            "F32" => Builtin::F32,
            "F64" => Builtin::F64,
            "F128" => Builtin::F128,
            _ => return None,
        };
        Some(builtin)
    }

    /// The source name of this builtin.
    pub const fn name(self) -> &'static str {
        match self {
            Builtin::String => "String",
            Builtin::Boolean => "Boolean",
            Builtin::U8 => "U8",
            Builtin::U16 => "U16",
            Builtin::U32 => "U32",
            Builtin::U64 => "U64",
            Builtin::U128 => "U128",
            Builtin::I8 => "I8",
            Builtin::I16 => "I16",
            Builtin::I32 => "I32",
            Builtin::I64 => "I64",
            Builtin::I128 => "I128",
            Builtin::F32 => "F32",
            Builtin::F64 => "F64",
            Builtin::F128 => "F128",
        }
    }

    /// True if `name` is the name of a builtin.
    #[inline]
    pub fn is_builtin_name(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    pub const fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            Builtin::U8 | Builtin::U16 | Builtin::U32 | Builtin::U64 | Builtin::U128
        )
    }

    pub const fn is_signed_integer(self) -> bool {
        matches!(
            self,
            Builtin::I8 | Builtin::I16 | Builtin::I32 | Builtin::I64 | Builtin::I128
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Builtin::F32 | Builtin::F64 | Builtin::F128)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
