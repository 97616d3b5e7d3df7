use pretty_assertions::assert_eq;

use super::*;
use crate::UnaryOp;

/// Builds `bystander: 1  boomy.name` by hand.
fn small_source() -> (Source, [NodeId; 6]) {
    let interner = SharedInterner::new();
    let mut arena = NodeArena::new();

    let one = arena.alloc(NodeKind::number(1.0), Span::new(11, 12));
    let bystander = arena.alloc(
        NodeKind::Bind(Bind {
            name: interner.intern("bystander"),
            ty: None,
            value: Some(one),
        }),
        Span::new(0, 12),
    );
    let boomy = arena.alloc(
        NodeKind::Reference(interner.intern("boomy")),
        Span::new(13, 18),
    );
    let member = arena.alloc(
        NodeKind::MemberName(interner.intern("name")),
        Span::new(19, 23),
    );
    let access = arena.alloc(
        NodeKind::PropertyReference {
            subject: boomy,
            name: member,
        },
        Span::new(13, 23),
    );
    let statements = arena.alloc_list([bystander, access]);
    let root = arena.alloc(NodeKind::Block { statements }, Span::new(0, 23));

    let source = Source::new("test", "bystander: 1 boomy.name", arena, root, interner);
    (source, [root, bystander, one, access, boomy, member])
}

#[test]
fn nodes_are_pre_order() {
    let (source, [root, bystander, one, access, boomy, member]) = small_source();
    let order: Vec<NodeId> = source.nodes().collect();
    assert_eq!(order, vec![root, bystander, one, access, boomy, member]);
}

#[test]
fn nodes_is_restartable() {
    let (source, _) = small_source();
    let first: Vec<NodeId> = source.nodes().collect();
    let second: Vec<NodeId> = source.nodes().collect();
    assert_eq!(first, second);
    assert_eq!(source.nodes().len(), source.len());
}

#[test]
fn parents_point_upward() {
    let (source, [root, bystander, one, access, boomy, member]) = small_source();
    assert_eq!(source.parent(root), None);
    assert_eq!(source.parent(bystander), Some(root));
    assert_eq!(source.parent(one), Some(bystander));
    assert_eq!(source.parent(boomy), Some(access));
    assert_eq!(source.parent(member), Some(access));
    assert_eq!(
        source.ancestors(member).collect::<Vec<_>>(),
        vec![access, root]
    );
}

#[test]
fn find_returns_first_match_in_pre_order() {
    let (source, [_, _, _, access, _, member]) = small_source();
    let found = source.find(|kind| matches!(kind, NodeKind::PropertyReference { .. }));
    assert_eq!(found, Some(access));

    let NodeKind::PropertyReference { name, .. } = *source.kind(access) else {
        panic!("expected a property reference");
    };
    assert_eq!(name, member);
    assert_eq!(
        source.find(|kind| matches!(kind, NodeKind::Conditional { .. })),
        None
    );
}

#[test]
fn children_follow_declaration_order() {
    let (source, [root, bystander, one, access, boomy, member]) = small_source();
    assert_eq!(source.children(root).as_slice(), &[bystander, access]);
    assert_eq!(source.children(bystander).as_slice(), &[one]);
    assert_eq!(source.children(access).as_slice(), &[boomy, member]);
    assert!(source.children(member).is_empty());
}

#[test]
fn defined_names() {
    let (source, [_, bystander, one, ..]) = small_source();
    let name = source.defined_name(bystander).map(|n| source.name_text(n));
    assert_eq!(name, Some("bystander"));
    assert_eq!(source.defined_name(one), None);
    assert!(source.as_bind(bystander).is_some());
    assert!(source.as_structure(bystander).is_none());
}

#[test]
fn deep_trees_index_without_recursion() {
    let interner = SharedInterner::new();
    let mut arena = NodeArena::new();
    let mut current = arena.alloc(NodeKind::number(0.0), Span::DUMMY);
    for _ in 0..100_000 {
        current = arena.alloc(
            NodeKind::Unary {
                op: UnaryOp::Neg,
                operand: current,
            },
            Span::DUMMY,
        );
    }
    let statements = arena.alloc_list([current]);
    let root = arena.alloc(NodeKind::Block { statements }, Span::DUMMY);
    let source = Source::new("deep", "", arena, root, interner);
    assert_eq!(source.len(), 100_002);
}
