//! Handles to statement and expression nodes
//!
//! Statements and expressions are built by the lowering pass and live in its
//! arenas. Declarations refer to them (function bodies, initializers, record
//! members, enumerator values) only through these indices.

use fe_arena::Idx;

/// Arena element type behind [`StmtId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StmtIdInner;

/// Arena element type behind [`ExprId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprIdInner;

/// Statement handle (compound statements and declaration statements included)
pub type StmtId = Idx<StmtIdInner>;

/// Expression handle
pub type ExprId = Idx<ExprIdInner>;
