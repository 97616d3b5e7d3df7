//! Runtime values.

mod instance;

use std::fmt;
use std::sync::Arc;

use lyre_ir::{Name, NodeId, StringInterner, TypeAnnotation};

use crate::EvalError;

pub use instance::{InstanceBuilder, StructureInstance};

/// A callable reference to a structure definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructureRef {
    pub definition: NodeId,
    pub name: Name,
}

/// Result of evaluating a node.
///
/// Equality is structural; two instances are equal when they come from the
/// same definition and hold equal properties in the same order.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    None,
    Text(Arc<str>),
    Number(f64),
    Boolean(bool),
    Structure(StructureRef),
    Instance(StructureInstance),
    Error(EvalError),
}

impl Value {
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Value::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&StructureInstance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&EvalError> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Name of the value's type as it appears in type mismatch messages.
    pub fn type_name(&self, interner: &StringInterner) -> String {
        match self {
            Value::None => "none".to_owned(),
            Value::Text(_) => "text".to_owned(),
            Value::Number(_) => "number".to_owned(),
            Value::Boolean(_) => "boolean".to_owned(),
            Value::Structure(s) => format!("structure `{}`", interner.lookup(s.name)),
            Value::Instance(i) => interner.lookup(i.type_name()).to_owned(),
            Value::Error(_) => "error".to_owned(),
        }
    }

    /// Whether the value satisfies a declared type.
    pub fn conforms_to(&self, ty: TypeAnnotation) -> bool {
        match (ty, self) {
            (TypeAnnotation::Text, Value::Text(_))
            | (TypeAnnotation::Number, Value::Number(_))
            | (TypeAnnotation::Boolean, Value::Boolean(_)) => true,
            (TypeAnnotation::Named(name), Value::Instance(instance)) => {
                instance.type_name() == name
            }
            _ => false,
        }
    }

    /// Render with names resolved through `interner`.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            interner,
        }
    }
}

/// How a declared type reads in messages.
pub fn describe_type(ty: TypeAnnotation, interner: &StringInterner) -> String {
    match ty {
        TypeAnnotation::Text => "text".to_owned(),
        TypeAnnotation::Number => "number".to_owned(),
        TypeAnnotation::Boolean => "boolean".to_owned(),
        TypeAnnotation::Named(name) => interner.lookup(name).to_owned(),
    }
}

/// [`Value`] paired with the interner its names live in.
pub struct ValueDisplay<'a> {
    value: &'a Value,
    interner: &'a StringInterner,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::None => write!(f, "none"),
            Value::Text(text) => write!(f, "{text:?}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Structure(s) => write!(f, "•{}", self.interner.lookup(s.name)),
            Value::Instance(instance) => {
                write!(f, "{}(", self.interner.lookup(instance.type_name()))?;
                for (i, (name, value)) in instance.properties().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(
                        f,
                        "{}: {}",
                        self.interner.lookup(name),
                        value.display(self.interner)
                    )?;
                }
                write!(f, ")")
            }
            Value::Error(err) => write!(f, "error[{}]: {err}", err.code()),
        }
    }
}
