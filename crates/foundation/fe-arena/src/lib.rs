//! Indexed arenas for collaborator-owned nodes
//!
//! Types, statements and expressions live in arenas owned by the type system
//! and the lowering pass. The declaration model only ever holds their `Idx`
//! handles, so this crate re-exports `la-arena` for every crate that needs to
//! name them.

pub use la_arena::{Arena, ArenaMap, Idx, RawIdx};
