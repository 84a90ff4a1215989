//! The translation unit root

use crate::global::GlobalContext;

/// Root declaration of one compiled file
///
/// It is both a declaration and the global scope: every top-level
/// declaration, statement and global binding lives in its context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationUnitDecl {
    context: GlobalContext,
}

impl TranslationUnitDecl {
    /// Creates an empty translation unit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The global scope
    #[must_use]
    pub fn context(&self) -> &GlobalContext {
        &self.context
    }

    /// The global scope, mutably
    pub fn context_mut(&mut self) -> &mut GlobalContext {
        &mut self.context
    }
}
