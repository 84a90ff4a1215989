//! Error types for the declaration model
//!
//! Note: miette's `#[derive(Diagnostic)]` reads these fields through the
//! generated code, which the unused-assignment lint cannot see.

#![allow(unused_assignments, reason = "fields are read by the Diagnostic derive")]

use fe_span::{Location, display_location};
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// What an index-based accessor was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedItem {
    /// Declaration in a context's declaration list
    Decl,
    /// Function parameter
    Param,
    /// Enumerator of an enum declaration
    Enumerator,
    /// Member declaration statement of a record
    Member,
    /// Top-level statement
    Stmt,
}

impl fmt::Display for IndexedItem {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decl => write!(formatter, "declaration"),
            Self::Param => write!(formatter, "parameter"),
            Self::Enumerator => write!(formatter, "enumerator"),
            Self::Member => write!(formatter, "member"),
            Self::Stmt => write!(formatter, "statement"),
        }
    }
}

/// Structural errors in the declaration tree
///
/// These indicate a bug in the caller, never bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DeclError {
    /// Position past the end of an indexed list
    #[error("{what} index {index} is out of range (length {len})")]
    #[diagnostic(code(decl::index_out_of_range))]
    IndexOutOfRange {
        /// Which list was indexed
        what: IndexedItem,
        /// Requested position
        index: usize,
        /// Length of the list
        len: usize,
    },
}

/// Looks up `index` in `items`, reporting a miss as [`DeclError::IndexOutOfRange`]
pub(crate) fn checked<T>(items: &[T], index: usize, what: IndexedItem) -> Result<&T, DeclError> {
    items.get(index).ok_or(DeclError::IndexOutOfRange {
        what,
        index,
        len: items.len(),
    })
}

/// Mutable form of [`checked`]
pub(crate) fn checked_mut<T>(
    items: &mut [T],
    index: usize,
    what: IndexedItem,
) -> Result<&mut T, DeclError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(DeclError::IndexOutOfRange { what, index, len })
}

/// Errors raised while binding names in a scope
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ScopeError {
    /// The name already has a binding the new one would collide with
    #[error("`{name}` is already declared (first declared at {})", display_location(.first.as_ref()))]
    #[diagnostic(
        code(scope::duplicate_declaration),
        help("remove or rename one of the declarations of `{name}`")
    )]
    DuplicateDeclaration {
        /// The redeclared name
        name: String,
        /// Location of the binding that was kept
        first: Option<Location>,
        /// Location of the rejected declaration
        second: Option<Location>,
    },

    /// A symbol table was popped while none was open
    #[error("no open scope to exit")]
    #[diagnostic(code(scope::underflow))]
    ScopeUnderflow,

    /// A symbol was added before any scope was entered
    #[error("cannot declare `{name}` outside of any scope")]
    #[diagnostic(code(scope::no_active_scope))]
    NoActiveScope {
        /// The name that could not be bound
        name: String,
    },
}

impl ScopeError {
    /// The name involved, if the error concerns one
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::DuplicateDeclaration { name, .. } | Self::NoActiveScope { name } => Some(name),
            Self::ScopeUnderflow => None,
        }
    }

    /// Where the offending declaration was written, when known
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::DuplicateDeclaration { second, .. } => *second,
            Self::ScopeUnderflow | Self::NoActiveScope { .. } => None,
        }
    }
}
