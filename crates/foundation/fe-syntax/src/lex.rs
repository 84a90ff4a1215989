//! Lexer tokens as seen by the tree

use fe_span::Location;

/// A token handed over by the lexer
///
/// Purely informational: binding never looks at it, but lowering threads its
/// location into declarations so diagnostics can point at the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LexUnit {
    id: String,
    symbol: String,
    row: u32,
    col: u32,
}

impl LexUnit {
    /// Creates a token from its text, grammar symbol and position
    #[must_use]
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, row: u32, col: u32) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            row,
            col,
        }
    }

    /// Token text
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Grammar symbol the token was classified as
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Source row
    #[must_use]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Source column
    #[must_use]
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Row and column as a [`Location`]
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.row, self.col)
    }
}
