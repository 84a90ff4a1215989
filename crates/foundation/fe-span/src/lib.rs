//! Source locations
//!
//! The lexer reports every token by row and column. Declarations and
//! diagnostics carry the same position so a redeclaration can point back at
//! both the original binding and the rejected one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A row/column position in a source file, as reported by the lexer
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Location {
    /// Source row (line), as counted by the lexer
    pub row: u32,
    /// Source column, as counted by the lexer
    pub col: u32,
}

impl Location {
    /// Creates a location from a row and column
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.row, self.col)
    }
}

/// Formats an optional location, falling back to `<unknown>`
#[must_use]
pub fn display_location(location: Option<&Location>) -> String {
    location.map_or_else(|| "<unknown>".to_string(), Location::to_string)
}
