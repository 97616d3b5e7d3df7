//! Binary and unary operators.

use lyre_ir::{BinaryOp, StringInterner, UnaryOp};

use crate::errors::{type_mismatch, EvalError, EvalResult};
use crate::Value;

/// Apply a binary operator to two evaluated operands.
pub(crate) fn evaluate_binary(
    op: BinaryOp,
    left: Value,
    right: Value,
    interner: &StringInterner,
) -> EvalResult {
    use Value::{Boolean, Number, Text};

    let value = match (op, &left, &right) {
        (BinaryOp::Add, Number(a), Number(b)) => Number(a + b),
        (BinaryOp::Add, Text(a), Text(b)) => Value::text(format!("{a}{b}")),
        (BinaryOp::Sub, Number(a), Number(b)) => Number(a - b),
        (BinaryOp::Mul, Number(a), Number(b)) => Number(a * b),
        (BinaryOp::Div, Number(a), Number(b)) => Number(a / b),

        (BinaryOp::Eq, _, _) => Boolean(left == right),
        (BinaryOp::NotEq, _, _) => Boolean(left != right),

        (BinaryOp::Lt, Number(a), Number(b)) => Boolean(a < b),
        (BinaryOp::LtEq, Number(a), Number(b)) => Boolean(a <= b),
        (BinaryOp::Gt, Number(a), Number(b)) => Boolean(a > b),
        (BinaryOp::GtEq, Number(a), Number(b)) => Boolean(a >= b),

        (BinaryOp::And, Boolean(a), Boolean(b)) => Boolean(*a && *b),
        (BinaryOp::Or, Boolean(a), Boolean(b)) => Boolean(*a || *b),

        _ => return Err(binary_mismatch(op, &left, &right, interner)),
    };
    Ok(value)
}

/// Apply a unary operator.
pub(crate) fn evaluate_unary(op: UnaryOp, operand: Value, interner: &StringInterner) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (op, other) => {
            let expected = match op {
                UnaryOp::Neg => "number",
                UnaryOp::Not => "boolean",
            };
            Err(type_mismatch(
                &format!("{expected} for `{}`", op.as_symbol()),
                &other.type_name(interner),
            ))
        }
    }
}

#[cold]
fn binary_mismatch(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    interner: &StringInterner,
) -> EvalError {
    let expected = match op {
        BinaryOp::Add => "numbers or texts",
        BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq => "numbers",
        BinaryOp::And | BinaryOp::Or => "booleans",
        BinaryOp::Eq | BinaryOp::NotEq => "values",
    };
    type_mismatch(
        &format!("{expected} for `{}`", op.as_symbol()),
        &format!(
            "{} and {}",
            left.type_name(interner),
            right.type_name(interner)
        ),
    )
}
