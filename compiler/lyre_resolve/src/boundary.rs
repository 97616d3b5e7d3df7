//! The single rule deciding what an ancestor contributes to a scope.

use lyre_ir::{NodeId, NodeKind, Source};

/// What one step of the upward walk sees.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visibility<'s> {
    /// Sequential statements declared before the child; keep walking.
    Collect(&'s [NodeId]),
    /// The ancestor adds nothing; keep walking.
    Continue,
    /// Structure inputs visible from the child; nothing beyond is visible.
    Stop(&'s [NodeId]),
    /// The starting position is not lexical: nothing at all is in scope.
    Opaque,
}

/// Scope boundary classification.
pub struct Boundary;

impl Boundary {
    /// Classify the step from `child` up to its parent `ancestor`.
    ///
    /// - block: statements before `child` (declare-before-use)
    /// - structure, from input `i`: inputs `0..i`; from the body: all inputs
    /// - property reference, from its member name: opaque
    /// - anything else: continue
    pub fn classify(source: &Source, ancestor: NodeId, child: NodeId) -> Visibility<'_> {
        match *source.kind(ancestor) {
            NodeKind::Block { statements } => {
                let statements = source.list(statements);
                let index = position(statements, child);
                Visibility::Collect(&statements[..index])
            }
            NodeKind::Structure(structure) => {
                let inputs = source.list(structure.inputs);
                if structure.body == Some(child) {
                    Visibility::Stop(inputs)
                } else {
                    Visibility::Stop(&inputs[..position(inputs, child)])
                }
            }
            NodeKind::PropertyReference { name, .. } if name == child => Visibility::Opaque,
            NodeKind::Bind(_)
            | NodeKind::PropertyReference { .. }
            | NodeKind::MemberName(_)
            | NodeKind::Reference(_)
            | NodeKind::Evaluate { .. }
            | NodeKind::Number(_)
            | NodeKind::Text(_)
            | NodeKind::Boolean(_)
            | NodeKind::Binary { .. }
            | NodeKind::Unary { .. }
            | NodeKind::Conditional { .. } => Visibility::Continue,
        }
    }
}

/// Index of `child` in `list`; the parent table guarantees membership.
fn position(list: &[NodeId], child: NodeId) -> usize {
    list.iter()
        .position(|&id| id == child)
        .unwrap_or(list.len())
}
