//! Lyre IR - syntax tree and source index for the Lyre core.
//!
//! The tree is an arena of [`Node`]s addressed by [`NodeId`]. A node's
//! children are owned through the arena (each node appears in exactly one
//! child list); upward links live in a side table inside [`Source`] and are
//! never used for ownership.
//!
//! # Module Structure
//!
//! - `name` / `interner`: interned identifiers
//! - `span`: byte ranges into source text
//! - `node_id`: arena indices and child ranges
//! - `node`: node kinds (`Bind`, `StructureDefinition`, ...)
//! - `arena`: builder used by the parser
//! - `source`: the immutable, indexed tree handed to resolver and evaluator

mod arena;
mod interner;
mod name;
mod node;
mod node_id;
mod source;
mod span;

pub use arena::NodeArena;
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use node::{BinaryOp, Bind, Node, NodeKind, StructureDefinition, TypeAnnotation, UnaryOp};
pub use node_id::{NodeId, NodeRange};
pub use source::{Ancestors, Source};
pub use span::{Span, SpanError};
