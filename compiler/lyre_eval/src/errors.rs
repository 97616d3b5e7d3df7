//! Evaluation errors.
//!
//! `EvalErrorKind` carries the structured category; factory functions below
//! are the only constructors. The evaluator attaches the span of the
//! innermost failing node and a backtrace of the active frames as the error
//! propagates.

use std::fmt;

use lyre_ir::Span;

use crate::Value;

/// Result of evaluating one node.
pub type EvalResult = Result<Value, EvalError>;

/// Failure to build an instance from a structure definition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("`{structure}` takes {expected} argument(s), got {got}")]
    TooManyArguments {
        structure: String,
        expected: usize,
        got: usize,
    },
    #[error("`{structure}` needs a value for `{input}`")]
    MissingInput { structure: String, input: String },
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("`{type_name}` has no property `{property}`")]
    UndefinedProperty { type_name: String, property: String },
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("maximum evaluation depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },
    #[error("`{name}` is not defined here")]
    UndefinedName { name: String },
}

impl EvalErrorKind {
    /// Stable diagnostic code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UndefinedProperty { .. } => "E3001",
            Self::Construction(ConstructionError::TooManyArguments { .. }) => "E3002",
            Self::Construction(ConstructionError::MissingInput { .. }) => "E3003",
            Self::TypeMismatch { .. } => "E3004",
            Self::StackOverflow { .. } => "E3005",
            Self::UndefinedName { .. } => "E3006",
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Structure name, or `<block>`.
    pub name: String,
    /// Where the frame was entered.
    pub span: Option<Span>,
}

/// Snapshot of the call stack at an error site, most recent frame first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "evaluation backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Innermost node that failed.
    pub span: Option<Span>,
    /// Active frames when the error was raised.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            backtrace: None,
        }
    }

    #[inline]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Set the span unless an inner node already did.
    #[must_use]
    pub(crate) fn or_span(self, span: Span) -> Self {
        if self.span.is_some() {
            self
        } else {
            self.with_span(span)
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for EvalError {}

// Property access

/// The instance has no property with that name.
#[cold]
pub fn undefined_property(type_name: &str, property: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedProperty {
        type_name: type_name.to_owned(),
        property: property.to_owned(),
    })
}

// Construction

/// More positional arguments than the structure has inputs.
#[cold]
pub fn too_many_arguments(structure: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(
        ConstructionError::TooManyArguments {
            structure: structure.to_owned(),
            expected,
            got,
        }
        .into(),
    )
}

/// An input with neither an argument nor a default.
#[cold]
pub fn missing_input(structure: &str, input: &str) -> EvalError {
    EvalError::from_kind(
        ConstructionError::MissingInput {
            structure: structure.to_owned(),
            input: input.to_owned(),
        }
        .into(),
    )
}

// Types and names

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_owned(),
        got: got.to_owned(),
    })
}

/// Maximum evaluation depth exceeded.
#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

/// A reference with no visible definition, or one whose value is not
/// available in the current frames.
#[cold]
pub fn undefined_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedName {
        name: name.to_owned(),
    })
}
