//! Named and type declarations

use super::AsNamedDecl;
use crate::error::{DeclError, IndexedItem, checked, checked_mut};
use crate::node::{ExprId, StmtId};
use fe_span::Location;

/// A declaration that introduces a name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedDecl {
    pub(super) name: String,
    pub(super) location: Option<Location>,
}

impl NamedDecl {
    /// Creates a named declaration with no location
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    /// Builder form of [`AsNamedDecl::set_location`]
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl AsNamedDecl for NamedDecl {
    fn as_named(&self) -> &NamedDecl {
        self
    }

    fn as_named_mut(&mut self) -> &mut NamedDecl {
        self
    }
}

/// A declaration that introduces a type name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDecl {
    named: NamedDecl,
}

impl TypeDecl {
    /// Creates a type declaration
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            named: NamedDecl::new(name),
        }
    }
}

impl AsNamedDecl for TypeDecl {
    fn as_named(&self) -> &NamedDecl {
        &self.named
    }

    fn as_named_mut(&mut self) -> &mut NamedDecl {
        &mut self.named
    }
}

/// A `struct` or `union` declaration
///
/// Members are kept as the declaration statements that introduced them, in
/// source order. An empty name means the record is anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecl {
    named: NamedDecl,
    members: Vec<StmtId>,
    is_struct: bool,
}

impl RecordDecl {
    /// Creates a `struct` declaration; use [`RecordDecl::set_union`] for unions
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            named: NamedDecl::new(name),
            members: Vec::new(),
            is_struct: true,
        }
    }

    /// Appends a member declaration statement
    pub fn add_decl_stmt(&mut self, member: StmtId) {
        self.members.push(member);
    }

    /// Number of member declaration statements
    #[must_use]
    pub fn num_decl_stmts(&self) -> usize {
        self.members.len()
    }

    /// Member declaration statement at `pos`
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::IndexOutOfRange`] if `pos` is past the last member
    pub fn decl_stmt(&self, pos: usize) -> Result<StmtId, DeclError> {
        checked(&self.members, pos, IndexedItem::Member).copied()
    }

    /// All member declaration statements
    #[must_use]
    pub fn decl_stmts(&self) -> &[StmtId] {
        &self.members
    }

    /// Whether the record was declared with a name
    #[must_use]
    pub fn has_tag(&self) -> bool {
        !self.named.name.is_empty()
    }

    /// Whether this is a `struct`
    #[must_use]
    pub fn is_struct(&self) -> bool {
        self.is_struct
    }

    /// Whether this is a `union`
    #[must_use]
    pub fn is_union(&self) -> bool {
        !self.is_struct
    }

    /// Marks the record as a `struct`
    pub fn set_struct(&mut self) {
        self.is_struct = true;
    }

    /// Marks the record as a `union`
    pub fn set_union(&mut self) {
        self.is_struct = false;
    }
}

impl AsNamedDecl for RecordDecl {
    fn as_named(&self) -> &NamedDecl {
        &self.named
    }

    fn as_named_mut(&mut self) -> &mut NamedDecl {
        &mut self.named
    }
}

/// One enumerator of an `enum`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerator {
    /// Enumerator name
    pub name: String,
    /// Explicit value, if one was written
    pub value: Option<ExprId>,
}

/// An `enum` declaration
///
/// Enumerators keep source order. Duplicate enumerator names are accepted
/// here and left to semantic analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumDecl {
    named: NamedDecl,
    enumerators: Vec<Enumerator>,
}

impl EnumDecl {
    /// Creates an enum declaration with no enumerators
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            named: NamedDecl::new(name),
            enumerators: Vec::new(),
        }
    }

    /// Appends an enumerator
    pub fn add_enumerator(&mut self, name: impl Into<String>, value: Option<ExprId>) {
        self.enumerators.push(Enumerator {
            name: name.into(),
            value,
        });
    }

    /// Replaces the value of the enumerator at `pos`
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::IndexOutOfRange`] if `pos` is past the last enumerator
    pub fn set_enumerator_expr(&mut self, pos: usize, value: ExprId) -> Result<(), DeclError> {
        checked_mut(&mut self.enumerators, pos, IndexedItem::Enumerator)?.value = Some(value);
        Ok(())
    }

    /// Enumerator at `pos`
    ///
    /// # Errors
    ///
    /// Returns [`DeclError::IndexOutOfRange`] if `pos` is past the last enumerator
    pub fn enumerator(&self, pos: usize) -> Result<&Enumerator, DeclError> {
        checked(&self.enumerators, pos, IndexedItem::Enumerator)
    }

    /// Number of enumerators
    #[must_use]
    pub fn num_enumerators(&self) -> usize {
        self.enumerators.len()
    }

    /// All enumerators in source order
    #[must_use]
    pub fn enumerators(&self) -> &[Enumerator] {
        &self.enumerators
    }

    /// Whether the enum was declared with a name
    #[must_use]
    pub fn has_tag(&self) -> bool {
        !self.named.name.is_empty()
    }
}

impl AsNamedDecl for EnumDecl {
    fn as_named(&self) -> &NamedDecl {
        &self.named
    }

    fn as_named_mut(&mut self) -> &mut NamedDecl {
        &mut self.named
    }
}
