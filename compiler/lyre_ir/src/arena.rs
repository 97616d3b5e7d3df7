//! Arena builder for the node tree.
//!
//! The parser allocates children before their parent, then freezes the arena
//! into a [`Source`](crate::Source), which computes parent links once.

use crate::{Node, NodeId, NodeKind, NodeRange, Span};

/// Contiguous storage for nodes and their child lists.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    lists: Vec<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and return its id.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` nodes.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("node arena exceeded u32::MAX nodes"));
        self.nodes.push(Node::new(kind, span));
        NodeId::new(index)
    }

    /// Store a child list and return its range.
    ///
    /// # Panics
    /// Panics if the flat list exceeds `u32::MAX` entries.
    pub fn alloc_list(&mut self, ids: impl IntoIterator<Item = NodeId>) -> NodeRange {
        let start = self.lists.len();
        self.lists.extend(ids);
        let to_u32 = |n: usize| {
            u32::try_from(n).unwrap_or_else(|_| panic!("node list exceeded u32::MAX entries"))
        };
        NodeRange::new(to_u32(start), to_u32(self.lists.len() - start))
    }

    /// Node by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Ids in a child range.
    #[inline]
    pub fn list(&self, range: NodeRange) -> &[NodeId] {
        &self.lists[range.to_range()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
