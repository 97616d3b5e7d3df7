use lyre_ir::{BinaryOp, NodeId, TypeAnnotation, UnaryOp};
use pretty_assertions::assert_eq;

use super::*;

fn parse_ok(text: &str) -> Source {
    parse_str(text).unwrap_or_else(|e| panic!("parse failed for {text:?}: {e}"))
}

/// Compact S-expression rendering of a subtree.
fn render(source: &Source, id: NodeId) -> String {
    let text = |name| source.name_text(name);
    let list = |ids: &[NodeId]| {
        ids.iter()
            .map(|&child| render(source, child))
            .collect::<Vec<_>>()
            .join(" ")
    };
    match *source.kind(id) {
        NodeKind::Block { statements } => format!("(block {})", list(source.list(statements))),
        NodeKind::Bind(bind) => {
            let ty = match bind.ty {
                None => String::new(),
                Some(TypeAnnotation::Text) => "•\"\"".to_owned(),
                Some(TypeAnnotation::Number) => "•#".to_owned(),
                Some(TypeAnnotation::Boolean) => "•?".to_owned(),
                Some(TypeAnnotation::Named(name)) => format!("•{}", text(name)),
            };
            match bind.value {
                Some(value) => format!("({}{ty}: {})", text(bind.name), render(source, value)),
                None => format!("({}{ty})", text(bind.name)),
            }
        }
        NodeKind::Structure(def) => {
            let body = def
                .body
                .map(|b| format!(" {}", render(source, b)))
                .unwrap_or_default();
            format!(
                "(•{} [{}]{body})",
                text(def.name),
                list(source.list(def.inputs))
            )
        }
        NodeKind::PropertyReference { subject, name } => {
            format!("(. {} {})", render(source, subject), render(source, name))
        }
        NodeKind::MemberName(name) => format!("'{}", text(name)),
        NodeKind::Reference(name) => text(name).to_owned(),
        NodeKind::Evaluate { callee, args } => {
            format!("(call {} [{}])", render(source, callee), list(source.list(args)))
        }
        NodeKind::Number(bits) => format!("{}", f64::from_bits(bits)),
        NodeKind::Text(name) => format!("{:?}", text(name)),
        NodeKind::Boolean(b) => b.to_string(),
        NodeKind::Binary { op, left, right } => format!(
            "({} {} {})",
            op.as_symbol(),
            render(source, left),
            render(source, right)
        ),
        NodeKind::Unary { op, operand } => {
            format!("({} {})", op.as_symbol(), render(source, operand))
        }
        NodeKind::Conditional { condition, yes, no } => format!(
            "(if {} {} {})",
            render(source, condition),
            render(source, yes),
            render(source, no)
        ),
    }
}

fn render_program(text: &str) -> String {
    let source = parse_ok(text);
    render(&source, source.root())
}

#[test]
fn empty_program_is_an_empty_block() {
    assert_eq!(render_program(""), "(block )");
    assert_eq!(render_program("  // nothing\n"), "(block )");
}

#[test]
fn structure_definition_and_member_access() {
    assert_eq!(
        render_program("bystander: 1\n•Cat(name•\"\")\nCat(\"boomy\").name"),
        "(block (bystander: 1) (•Cat [(name•\"\")]) (. (call Cat [\"boomy\"]) 'name))"
    );
}

#[test]
fn structure_inputs_with_types_defaults_and_commas() {
    assert_eq!(
        render_program("•Cat(name•'', legs•#: 4, indoor•?: true, friend•Cat)"),
        "(block (•Cat [(name•\"\") (legs•#: 4) (indoor•?: true) (friend•Cat)]))"
    );
}

#[test]
fn structure_body_must_open_on_the_same_line() {
    assert_eq!(
        render_program("•Cat(name) (greeting: name + \"!\")"),
        "(block (•Cat [(name)] (block (greeting: (+ name \"!\")))))"
    );
    assert_eq!(
        render_program("•Cat(name)\n(1)"),
        "(block (•Cat [(name)]) (block 1))"
    );
}

#[test]
fn evaluation_requires_an_adjacent_paren() {
    assert_eq!(render_program("Cat(1)"), "(block (call Cat [1]))");
    assert_eq!(render_program("Cat (1)"), "(block Cat (block 1))");
}

#[test]
fn postfix_chains_left_to_right() {
    assert_eq!(
        render_program("a.b.c(1, 2).d"),
        "(block (. (call (. (. a 'b) 'c) [1 2]) 'd))"
    );
}

#[test]
fn operator_precedence() {
    assert_eq!(
        render_program("1 + 2 * 3 = 7 & ~false | 1 < 2"),
        "(block (| (& (= (+ 1 (* 2 3)) 7) (~ false)) (< 1 2)))"
    );
    assert_eq!(render_program("1 - 2 - 3"), "(block (- (- 1 2) 3))");
    assert_eq!(render_program("--1"), "(block (- (- 1)))");
}

#[test]
fn unicode_comparison_operators() {
    assert_eq!(
        render_program("a ≠ b ≤ c"),
        render_program("a != b <= c"),
    );
}

#[test]
fn conditional_is_loosest() {
    assert_eq!(
        render_program("x: if a = 1 then \"one\" else \"other\""),
        "(block (x: (if (= a 1) \"one\" \"other\")))"
    );
}

#[test]
fn parenthesized_expression_is_a_block() {
    assert_eq!(render_program("(1 + 2) * 3"), "(block (* (block (+ 1 2)) 3))");
}

#[test]
fn statement_bind_needs_a_value() {
    let err = parse_str("a•#").err();
    assert_eq!(
        err,
        Some(ParseError::UnvaluedBind {
            name: "a".to_owned(),
            span: Span::new(0, 1),
        })
    );
}

#[test]
fn unexpected_token_reports_expectation() {
    let err = parse_str("a: )").err();
    assert_eq!(
        err,
        Some(ParseError::UnexpectedToken {
            expected: "expression",
            found: "`)`",
            span: Span::new(3, 4),
        })
    );
    assert_eq!(err.and_then(|e| e.span()), Some(Span::new(3, 4)));
}

#[test]
fn unclosed_structure_inputs() {
    let err = parse_str("•Cat(name").err();
    assert!(
        matches!(err, Some(ParseError::UnexpectedToken { found: "end of input", .. })),
        "{err:?}"
    );
}

#[test]
fn lex_errors_pass_through() {
    assert!(matches!(
        parse_str("a: $"),
        Err(ParseError::Lex(LexError::UnexpectedCharacter { found: '$', .. }))
    ));
}

#[test]
fn spans_cover_their_syntax() {
    let text = "boomy: Cat(\"boomy\").name";
    let source = parse_ok(text);
    let access = source
        .find(|kind| matches!(kind, NodeKind::PropertyReference { .. }))
        .unwrap_or_else(|| panic!("no property reference"));
    assert_eq!(&text[source.span(access).to_range()], "Cat(\"boomy\").name");
    let bind = source
        .find(|kind| matches!(kind, NodeKind::Bind(_)))
        .unwrap_or_else(|| panic!("no bind"));
    assert_eq!(&text[source.span(bind).to_range()], text);
}

#[test]
fn node_kinds_cover_operators() {
    let source = parse_ok("-a * b");
    let kinds: Vec<_> = source.nodes().map(|id| *source.kind(id)).collect();
    assert!(kinds
        .iter()
        .any(|k| matches!(k, NodeKind::Binary { op: BinaryOp::Mul, .. })));
    assert!(kinds
        .iter()
        .any(|k| matches!(k, NodeKind::Unary { op: UnaryOp::Neg, .. })));
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 20_000;
    let text = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let source = parse_ok(&text);
    assert_eq!(source.len(), depth + 2);
}

#[test]
fn interner_is_shared_with_the_source() {
    let interner = SharedInterner::new();
    let source = parse("shared", "boomy: 1", &interner)
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(source.name(), "shared");
    assert!(interner.get("boomy").is_some());
    assert!(source.interner().get("boomy").is_some());
}
