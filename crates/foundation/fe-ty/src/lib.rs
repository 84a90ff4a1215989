//! Qualified type values
//!
//! The type system is an external collaborator. The declaration model only
//! stores and returns the values it hands out: a [`TyId`] into the
//! collaborator's type arena plus the cv-qualifiers written at the use site.
//! Symbol tables copy a [`QualType`] on insertion and on lookup.

use bitflags::bitflags;
use fe_arena::Idx;
use std::fmt;

/// Arena element type behind [`TyId`]
///
/// The type-system collaborator owns the arena and allocates one of these per
/// distinct type; nothing here inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TyIdInner;

/// Type ID - index into the collaborator's type arena
pub type TyId = Idx<TyIdInner>;

bitflags! {
    /// Type qualifiers attached to a use of a type
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Qualifiers: u8 {
        /// `const`
        const CONST = 1;
        /// `volatile`
        const VOLATILE = 1 << 1;
        /// `restrict`
        const RESTRICT = 1 << 2;
    }
}

/// A resolved type together with its qualifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualType {
    ty: TyId,
    quals: Qualifiers,
}

impl QualType {
    /// Creates an unqualified type
    #[must_use]
    pub fn new(ty: TyId) -> Self {
        Self {
            ty,
            quals: Qualifiers::empty(),
        }
    }

    /// Creates a type with the given qualifiers
    #[must_use]
    pub fn with_quals(ty: TyId, quals: Qualifiers) -> Self {
        Self { ty, quals }
    }

    /// The underlying type
    #[must_use]
    pub fn ty(&self) -> TyId {
        self.ty
    }

    /// The qualifiers on this use of the type
    #[must_use]
    pub fn quals(&self) -> Qualifiers {
        self.quals
    }

    /// Whether the type is `const`-qualified
    #[must_use]
    pub fn is_const(&self) -> bool {
        self.quals.contains(Qualifiers::CONST)
    }

    /// Whether the type is `volatile`-qualified
    #[must_use]
    pub fn is_volatile(&self) -> bool {
        self.quals.contains(Qualifiers::VOLATILE)
    }

    /// Returns the same type with `extra` qualifiers added
    #[must_use]
    pub fn qualified(self, extra: Qualifiers) -> Self {
        Self {
            ty: self.ty,
            quals: self.quals | extra,
        }
    }

    /// Returns the same type with every qualifier dropped
    #[must_use]
    pub fn unqualified(self) -> Self {
        Self::new(self.ty)
    }
}

impl fmt::Display for QualType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quals.contains(Qualifiers::CONST) {
            write!(formatter, "const ")?;
        }
        if self.quals.contains(Qualifiers::VOLATILE) {
            write!(formatter, "volatile ")?;
        }
        if self.quals.contains(Qualifiers::RESTRICT) {
            write!(formatter, "restrict ")?;
        }
        write!(formatter, "#{}", u32::from(self.ty.into_raw()))
    }
}
