//! Source locations.

use std::fmt;

/// A 1-based line/column position in a source buffer.
///
/// Columns count characters, not bytes. Ordering is line-major, so locations
/// taken from one buffer compare in source order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// The first character of a buffer.
    pub const START: Location = Location { line: 1, column: 1 };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Location { line, column }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::START
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Location::new(3, 14).to_string(), "3:14");
    }

    #[test]
    fn test_ordering_is_line_major() {
        assert!(Location::new(1, 80) < Location::new(2, 1));
        assert!(Location::new(2, 1) < Location::new(2, 5));
        assert_eq!(Location::default(), Location::START);
    }
}
