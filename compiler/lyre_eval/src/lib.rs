//! Lyre evaluator.
//!
//! Walks a [`Source`](lyre_ir::Source) and produces [`Value`]s:
//!
//! - `Context`: per-evaluation state (call stack, bind frames, limits)
//! - `Evaluator`: node-by-node evaluation, including structure construction
//!   and strict property access on instances
//! - `Value` / `StructureInstance`: runtime values
//! - `errors`: structured errors and their factory functions
//!
//! Evaluation is total: failures are returned as [`Value::Error`] rather
//! than panicking or being swallowed.

mod context;
mod diagnostics;
pub mod errors;
mod evaluator;
mod limits;
mod value;

pub use context::Context;
pub use diagnostics::{CallFrame, CallStack, FrameKind};
pub use errors::{
    BacktraceFrame, ConstructionError, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use evaluator::Evaluator;
pub use limits::{EvalLimits, DEFAULT_MAX_DEPTH, MAX_DEPTH_VAR};
pub use value::{
    describe_type, InstanceBuilder, StructureInstance, StructureRef, Value, ValueDisplay,
};
