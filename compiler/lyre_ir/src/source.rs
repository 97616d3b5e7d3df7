//! The indexed, immutable program tree.
//!
//! `Source` owns the arena and the root, and computes two indexes once at
//! construction: the parent of every node and the pre-order node sequence.
//! Nothing mutates afterwards, so a `&Source` can be shared across threads.

use smallvec::SmallVec;

use crate::{
    Bind, Name, Node, NodeArena, NodeId, NodeKind, NodeRange, SharedInterner, Span,
    StructureDefinition,
};

/// A parsed program.
#[derive(Debug)]
pub struct Source {
    name: String,
    text: String,
    arena: NodeArena,
    root: NodeId,
    parents: Vec<Option<NodeId>>,
    preorder: Vec<NodeId>,
    interner: SharedInterner,
}

impl Source {
    /// Freeze an arena into a source rooted at `root`.
    ///
    /// Every node reachable from `root` must appear in exactly one child list;
    /// unreachable nodes are kept in the arena but never indexed.
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        arena: NodeArena,
        root: NodeId,
        interner: SharedInterner,
    ) -> Self {
        let mut parents = vec![None; arena.len()];
        let mut preorder = Vec::with_capacity(arena.len());

        // Explicit stack: deeply nested programs must not overflow here.
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            preorder.push(id);
            let children = children_in(&arena, id);
            for &child in children.iter().rev() {
                debug_assert!(
                    parents[child.index()].is_none(),
                    "node {child:?} has more than one parent"
                );
                parents[child.index()] = Some(id);
                pending.push(child);
            }
        }

        Source {
            name: name.into(),
            text: text.into(),
            arena,
            root,
            parents,
            preorder,
            interner,
        }
    }

    /// Name the source was created with (file name, or a test label).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full program text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The root block.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.arena.get(id).kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.arena.get(id).span
    }

    /// Ids in a child range.
    #[inline]
    pub fn list(&self, range: NodeRange) -> &[NodeId] {
        self.arena.list(range)
    }

    /// Parent of `id`; `None` for the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Walk from `id`'s parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            source: self,
            next: self.parent(id),
        }
    }

    /// Children of `id` in declaration order.
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        children_in(&self.arena, id)
    }

    /// All nodes in pre-order, starting at the root.
    ///
    /// The sequence is computed once; every call restarts it.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.preorder.iter().copied()
    }

    /// First node in pre-order matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&NodeKind) -> bool) -> Option<NodeId> {
        self.nodes().find(|&id| predicate(self.kind(id)))
    }

    /// Bind payload of `id`, if it is a bind.
    pub fn as_bind(&self, id: NodeId) -> Option<&Bind> {
        match self.kind(id) {
            NodeKind::Bind(bind) => Some(bind),
            _ => None,
        }
    }

    /// Structure payload of `id`, if it is a structure definition.
    pub fn as_structure(&self, id: NodeId) -> Option<&StructureDefinition> {
        match self.kind(id) {
            NodeKind::Structure(structure) => Some(structure),
            _ => None,
        }
    }

    /// Name introduced by a bind or structure definition.
    pub fn defined_name(&self, id: NodeId) -> Option<Name> {
        match self.kind(id) {
            NodeKind::Bind(bind) => Some(bind.name),
            NodeKind::Structure(structure) => Some(structure.name),
            _ => None,
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Resolve an interned name to its text.
    #[inline]
    pub fn name_text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Number of indexed (reachable) nodes.
    pub fn len(&self) -> usize {
        self.preorder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preorder.is_empty()
    }
}

/// Iterator over a node's ancestors, innermost first.
pub struct Ancestors<'a> {
    source: &'a Source,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.source.parent(current);
        Some(current)
    }
}

fn children_in(arena: &NodeArena, id: NodeId) -> SmallVec<[NodeId; 4]> {
    let mut children = SmallVec::new();
    match arena.get(id).kind {
        NodeKind::Block { statements } => children.extend_from_slice(arena.list(statements)),
        NodeKind::Bind(bind) => children.extend(bind.value),
        NodeKind::Structure(structure) => {
            children.extend_from_slice(arena.list(structure.inputs));
            children.extend(structure.body);
        }
        NodeKind::PropertyReference { subject, name } => {
            children.push(subject);
            children.push(name);
        }
        NodeKind::Evaluate { callee, args } => {
            children.push(callee);
            children.extend_from_slice(arena.list(args));
        }
        NodeKind::Binary { left, right, .. } => {
            children.push(left);
            children.push(right);
        }
        NodeKind::Unary { operand, .. } => children.push(operand),
        NodeKind::Conditional { condition, yes, no } => {
            children.push(condition);
            children.push(yes);
            children.push(no);
        }
        NodeKind::MemberName(_)
        | NodeKind::Reference(_)
        | NodeKind::Number(_)
        | NodeKind::Text(_)
        | NodeKind::Boolean(_) => {}
    }
    children
}

#[cfg(test)]
mod tests;
