use lyre_ir::{NodeId, NodeKind, Source, Span};
use pretty_assertions::assert_eq;

use crate::{ConstructionError, Context, EvalErrorKind, EvalLimits, Value};

fn parse(text: &str) -> Source {
    lyre_parse::parse_str(text).unwrap_or_else(|e| panic!("parse failed for {text:?}: {e}"))
}

fn eval(text: &str) -> Value {
    Context::new(&parse(text)).evaluate_root()
}

/// Evaluate and render with the program's own interner.
fn render(text: &str) -> String {
    let source = parse(text);
    let value = Context::new(&source).evaluate_root();
    value.display(source.interner()).to_string()
}

fn error_kind(value: Value) -> EvalErrorKind {
    match value {
        Value::Error(err) => err.kind,
        other => panic!("expected an error, got {other:?}"),
    }
}

fn mismatch(expected: &str, got: &str) -> EvalErrorKind {
    EvalErrorKind::TypeMismatch {
        expected: expected.to_owned(),
        got: got.to_owned(),
    }
}

// Structures and property access

#[test]
fn constructs_and_reads_a_property() {
    assert_eq!(
        eval("•Cat(name•\"\")\nCat(\"boomy\").name"),
        Value::text("boomy")
    );
}

#[test]
fn missing_property_is_undefined() {
    assert_eq!(
        error_kind(eval("•Cat(name•\"\")\nCat(\"boomy\").legs")),
        EvalErrorKind::UndefinedProperty {
            type_name: "Cat".to_owned(),
            property: "legs".to_owned(),
        }
    );
}

#[test]
fn property_access_never_falls_back_to_lexical_scope() {
    assert_eq!(
        error_kind(eval("name: \"outer\"\n•Cat(legs: 4)\nCat().name")),
        EvalErrorKind::UndefinedProperty {
            type_name: "Cat".to_owned(),
            property: "name".to_owned(),
        }
    );
}

#[test]
fn too_many_arguments() {
    assert_eq!(
        error_kind(eval("•Cat(name)\nCat(1, 2)")),
        EvalErrorKind::Construction(ConstructionError::TooManyArguments {
            structure: "Cat".to_owned(),
            expected: 1,
            got: 2,
        })
    );
}

#[test]
fn missing_input_without_default() {
    assert_eq!(
        error_kind(eval("•Cat(name)\nCat()")),
        EvalErrorKind::Construction(ConstructionError::MissingInput {
            structure: "Cat".to_owned(),
            input: "name".to_owned(),
        })
    );
}

#[test]
fn defaults_fill_missing_arguments_in_order() {
    assert_eq!(
        render("•Cat(name, legs: 4, greeting: name + \"!\")\nCat(\"boomy\")"),
        "Cat(name: \"boomy\", legs: 4, greeting: \"boomy!\")"
    );
    assert_eq!(
        render("•Cat(name, legs: 4)\nCat(\"boomy\", 3)"),
        "Cat(name: \"boomy\", legs: 3)"
    );
}

#[test]
fn defaults_cannot_see_later_inputs() {
    assert_eq!(
        error_kind(eval("•Cat(a: b, b: 1)\nCat()")),
        EvalErrorKind::UndefinedName {
            name: "b".to_owned()
        }
    );
}

#[test]
fn outer_binds_are_invisible_inside_structures() {
    let undefined_outer = EvalErrorKind::UndefinedName {
        name: "outer".to_owned(),
    };
    assert_eq!(
        error_kind(eval("outer: 1\n•Cat(x: outer)\nCat()")),
        undefined_outer
    );
    assert_eq!(
        error_kind(eval("outer: 1\n•Cat(x) (y: outer)\nCat(1)")),
        undefined_outer
    );
}

#[test]
fn body_binds_become_properties() {
    assert_eq!(
        eval("•Cat(name) (greeting: \"hi \" + name)\nCat(\"boomy\").greeting"),
        Value::text("hi boomy")
    );
    assert_eq!(
        render("•Cat(name) (greeting: \"hi \" + name\n 1 + 1)\nCat(\"boomy\")"),
        "Cat(name: \"boomy\", greeting: \"hi boomy\")"
    );
}

#[test]
fn structures_nest_inside_bodies() {
    assert_eq!(
        eval("•Outer(x) (•Inner(y) (z: y)\n inner: Inner(x).z)\nOuter(5).inner"),
        Value::Number(5.0)
    );
}

#[test]
fn instances_flow_through_properties() {
    assert_eq!(
        eval("•Cat(name)\n•Owner(pet•Cat)\nOwner(Cat(\"boomy\")).pet.name"),
        Value::text("boomy")
    );
}

#[test]
fn declared_types_are_checked() {
    assert_eq!(
        error_kind(eval("•Cat(name•\"\")\nCat(1)")),
        mismatch("text", "number")
    );
    assert_eq!(
        error_kind(eval("•Cat(legs•#: \"four\")\nCat()")),
        mismatch("number", "text")
    );
    assert_eq!(
        error_kind(eval("•Cat(name)\n•Owner(pet•Cat)\nOwner(1)")),
        mismatch("Cat", "number")
    );
    assert_eq!(error_kind(eval("flag•?: 1")), mismatch("boolean", "number"));
}

#[test]
fn property_on_non_instance_is_a_type_mismatch() {
    assert_eq!(
        error_kind(eval("a: 1\na.name")),
        mismatch("structure instance", "number")
    );
}

#[test]
fn evaluating_a_non_structure_is_a_type_mismatch() {
    assert_eq!(
        error_kind(eval("a: 1\na(2)")),
        mismatch("structure", "number")
    );
}

// Binds and blocks

#[test]
fn binds_are_read_in_declaration_order() {
    assert_eq!(eval("a: 1\nb: a\nb"), Value::Number(1.0));
    assert_eq!(
        error_kind(eval("b: a\na: 1\nb")),
        EvalErrorKind::UndefinedName {
            name: "a".to_owned()
        }
    );
}

#[test]
fn nearest_declaration_wins() {
    assert_eq!(eval("a: 1\na: 2\na"), Value::Number(2.0));
    assert_eq!(eval("a: 1\nb: (a: 2\n a)\nb + a"), Value::Number(3.0));
}

#[test]
fn block_value_is_its_last_statement() {
    assert_eq!(eval(""), Value::None);
    assert_eq!(eval("()"), Value::None);
    assert_eq!(eval("a: 1"), Value::Number(1.0));
    assert_eq!(eval("(1 2 3)"), Value::Number(3.0));
    assert_eq!(render("•Cat(name)"), "•Cat");
}

// Operators

#[test]
fn arithmetic_and_text() {
    assert_eq!(eval("1 + 2 * 3"), Value::Number(7.0));
    assert_eq!(eval("(1 + 2) * 3"), Value::Number(9.0));
    assert_eq!(eval("7 / 2 - 1"), Value::Number(2.5));
    assert_eq!(eval("-(2)"), Value::Number(-2.0));
    assert_eq!(eval("'a' + \"b\""), Value::text("ab"));
}

#[test]
fn comparison_and_logic() {
    assert_eq!(eval("1 < 2 & 2 ≤ 2"), Value::Boolean(true));
    assert_eq!(eval("3 >= 4 | 1 != 1"), Value::Boolean(false));
    assert_eq!(eval("~true | false"), Value::Boolean(false));
    assert_eq!(eval("'a' = 'a'"), Value::Boolean(true));
}

#[test]
fn instances_compare_structurally() {
    assert_eq!(
        eval("•Cat(name)\nCat(\"a\") = Cat(\"a\")"),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("•Cat(name)\nCat(\"a\") ≠ Cat(\"b\")"),
        Value::Boolean(true)
    );
}

#[test]
fn operand_mismatches() {
    assert_eq!(
        error_kind(eval("1 + 'a'")),
        mismatch("numbers or texts for `+`", "number and text")
    );
    assert_eq!(
        error_kind(eval("1 & true")),
        mismatch("booleans for `&`", "number and boolean")
    );
    assert_eq!(
        error_kind(eval("~1")),
        mismatch("boolean for `~`", "number")
    );
}

#[test]
fn conditional_evaluates_only_the_chosen_branch() {
    assert_eq!(
        eval("if 1 = 1 then 'yes' else missing"),
        Value::text("yes")
    );
    assert_eq!(eval("if false then missing else 2"), Value::Number(2.0));
    assert_eq!(
        error_kind(eval("if 1 then 2 else 3")),
        mismatch("boolean", "number")
    );
}

// Limits and diagnostics

#[test]
fn nesting_beyond_the_limit_overflows() {
    let source = parse("((((((1))))))");
    let limits = EvalLimits::default().with_max_depth(4);
    assert_eq!(
        error_kind(Context::with_limits(&source, limits).evaluate_root()),
        EvalErrorKind::StackOverflow { depth: 4 }
    );
    assert_eq!(
        Context::with_limits(&source, EvalLimits::default().with_max_depth(8)).evaluate_root(),
        Value::Number(1.0)
    );
}

#[test]
fn default_limit_applies() {
    let deep = format!("{}1{}", "(".repeat(600), ")".repeat(600));
    assert_eq!(
        error_kind(eval(&deep)),
        EvalErrorKind::StackOverflow { depth: 512 }
    );
    let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(eval(&shallow), Value::Number(1.0));
}

#[test]
fn errors_carry_span_and_backtrace() {
    let text = "•Cat(name)\nCat()";
    let source = parse(text);
    let Value::Error(err) = Context::new(&source).evaluate_root() else {
        panic!("expected an error");
    };
    assert_eq!(err.span.map(|s| &text[s.to_range()]), Some("Cat()"));
    let frames: Vec<_> = err
        .backtrace
        .as_ref()
        .map(|bt| bt.frames().iter().map(|f| f.name.clone()).collect())
        .unwrap_or_default();
    assert_eq!(frames, vec!["Cat".to_owned(), "<block>".to_owned()]);
}

#[test]
fn error_span_is_innermost_node() {
    let text = "•Cat(name)\nx: Cat(\"boomy\").legs";
    let source = parse(text);
    let Value::Error(err) = Context::new(&source).evaluate_root() else {
        panic!("expected an error");
    };
    assert_eq!(err.span.map(|s| &text[s.to_range()]), Some("Cat(\"boomy\").legs"));
    assert_eq!(err.code(), "E3001");
}

#[test]
fn context_is_balanced_after_an_error() {
    let source = parse("•Cat(name)\nCat(1, 2)");
    let mut cx = Context::new(&source);
    assert!(cx.evaluate_root().is_error());
    assert_eq!(cx.depth(), 0);
    assert_eq!(cx.current_structure(), None);
    assert!(cx.evaluate_root().is_error());
}

#[test]
fn evaluates_a_single_node() {
    let source = parse("a: 40 + 2");
    let Some(sum) = source.find(|kind| matches!(kind, NodeKind::Binary { .. })) else {
        panic!("no binary node");
    };
    let mut cx = Context::new(&source);
    assert_eq!(cx.evaluator().evaluate(sum), Value::Number(42.0));
    assert_eq!(source.span(sum), Span::new(3, 9));
}

/// First node matching `pred`.
fn node(source: &Source, pred: impl Fn(&NodeKind) -> bool) -> NodeId {
    source
        .find(pred)
        .unwrap_or_else(|| panic!("no matching node in {:?}", source.text()))
}

fn reference_to(source: &Source, name: &str) -> NodeId {
    node(source, |kind| {
        matches!(kind, NodeKind::Reference(n) if source.name_text(*n) == name)
    })
}

#[test]
fn inner_reference_reads_earlier_bind() {
    let source = parse("a: 1\nb: a");
    let a = reference_to(&source, "a");
    let mut cx = Context::new(&source);
    assert_eq!(cx.evaluator().evaluate(a), Value::Number(1.0));
    assert_eq!(cx.depth(), 0);

    let b = node(&source, |kind| {
        matches!(kind, NodeKind::Bind(bind) if source.name_text(bind.name) == "b")
    });
    assert_eq!(Context::new(&source).evaluator().evaluate(b), Value::Number(1.0));
}

#[test]
fn inner_reference_follows_a_chain_of_binds() {
    let source = parse("a: 2\nb: a * 3\nc: (d: b + 1\n d)");
    let d = reference_to(&source, "d");
    assert_eq!(
        Context::new(&source).evaluator().evaluate(d),
        Value::Number(7.0)
    );
}

#[test]
fn inner_reference_to_an_input_without_argument() {
    let source = parse("•Cat(name, legs: 4) (greeting: name\n count: legs)");
    let name = reference_to(&source, "name");
    assert_eq!(
        error_kind(Context::new(&source).evaluator().evaluate(name)),
        EvalErrorKind::Construction(ConstructionError::MissingInput {
            structure: "Cat".to_owned(),
            input: "name".to_owned(),
        })
    );
    let legs = reference_to(&source, "legs");
    assert_eq!(
        Context::new(&source).evaluator().evaluate(legs),
        Value::Number(4.0)
    );
}

#[test]
fn inner_reference_to_an_invisible_bind_stays_undefined() {
    let source = parse("b: a\na: 1");
    let a = reference_to(&source, "a");
    assert_eq!(
        error_kind(Context::new(&source).evaluator().evaluate(a)),
        EvalErrorKind::UndefinedName {
            name: "a".to_owned()
        }
    );
}

#[test]
fn member_name_alone_is_undefined() {
    let source = parse("boomy: 1\nboomy.name");
    let Some(member) = source.find(|kind| matches!(kind, NodeKind::MemberName(_))) else {
        panic!("no member name");
    };
    assert_eq!(
        error_kind(Context::new(&source).evaluator().evaluate(member)),
        EvalErrorKind::UndefinedName {
            name: "name".to_owned()
        }
    );
}
