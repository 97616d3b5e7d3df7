//! Lexical scope resolution for Lyre.
//!
//! Every query walks from a node up through its ancestors, asking
//! [`Boundary::classify`] what each step contributes. Blocks expose the
//! definitions declared before the path; a structure exposes its visible
//! inputs and ends the walk, so nothing outside a structure is visible inside
//! it. The name part of `subject.name` is not a lexical position and sees
//! nothing.
//!
//! Queries never fail, never mutate the source, and give the same answer
//! every time they are asked.

mod boundary;

use lyre_ir::{Name, NodeId, NodeKind, Source};
use smallvec::SmallVec;

pub use boundary::{Boundary, Visibility};

/// A named definition visible from some position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Definition {
    Bind(NodeId),
    Structure(NodeId),
}

impl Definition {
    /// Definition introduced by `id`, if it introduces one.
    pub fn from_node(source: &Source, id: NodeId) -> Option<Definition> {
        match source.kind(id) {
            NodeKind::Bind(_) => Some(Definition::Bind(id)),
            NodeKind::Structure(_) => Some(Definition::Structure(id)),
            _ => None,
        }
    }

    pub fn node(self) -> NodeId {
        match self {
            Definition::Bind(id) | Definition::Structure(id) => id,
        }
    }

    pub fn name(self, source: &Source) -> Option<Name> {
        source.defined_name(self.node())
    }
}

/// One scope level: definitions in declaration order.
type Level = SmallVec<[Definition; 8]>;

/// Scope queries over one [`Source`].
#[derive(Copy, Clone, Debug)]
pub struct Resolver<'a> {
    source: &'a Source,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a Source) -> Self {
        Resolver { source }
    }

    pub fn source(&self) -> &'a Source {
        self.source
    }

    /// Every definition visible at `node`, innermost level first, declaration
    /// order within a level.
    pub fn definitions_in_scope(&self, node: NodeId) -> Vec<Definition> {
        self.levels(node).into_iter().flatten().collect()
    }

    /// The definition `name` refers to at `node`.
    ///
    /// A name that was never interned cannot be defined anywhere, so the
    /// lookup does not grow the interner.
    pub fn definition_of_name_in_scope(&self, node: NodeId, name: &str) -> Option<Definition> {
        let name = self.source.interner().get(name)?;
        self.definition_of(node, name)
    }

    /// The definition `name` refers to at `node`: innermost level first, and
    /// within a level the nearest preceding declaration.
    pub fn definition_of(&self, node: NodeId, name: Name) -> Option<Definition> {
        let found = self.levels(node).into_iter().find_map(|level| {
            level
                .into_iter()
                .rev()
                .find(|definition| definition.name(self.source) == Some(name))
        });
        tracing::trace!(
            ?node,
            name = self.source.name_text(name),
            ?found,
            "resolved"
        );
        found
    }

    /// Scope levels visible at `node`, innermost first.
    fn levels(&self, node: NodeId) -> Vec<Level> {
        let mut levels = Vec::new();
        let mut child = node;
        while let Some(ancestor) = self.source.parent(child) {
            match Boundary::classify(self.source, ancestor, child) {
                Visibility::Collect(visible) => levels.push(self.level(visible)),
                Visibility::Continue => {}
                Visibility::Stop(visible) => {
                    levels.push(self.level(visible));
                    break;
                }
                Visibility::Opaque => return Vec::new(),
            }
            child = ancestor;
        }
        levels
    }

    fn level(&self, ids: &[NodeId]) -> Level {
        ids.iter()
            .filter_map(|&id| Definition::from_node(self.source, id))
            .collect()
    }
}
