//! Lyre driver.
//!
//! ```text
//! text ──► lyre_lexer ──► lyre_parse ──► Source
//!                                          │
//!                      ┌───────────────────┴──────────────┐
//!                      ▼                                  ▼
//!               lyre_resolve::Resolver            lyre_eval::Context
//!               (static scope queries)      (evaluation, via the resolver)
//! ```
//!
//! [`evaluate_code`] chains the whole pipeline; [`Program`] keeps the parsed
//! source around for repeated queries and evaluations.

mod program;

use std::sync::Once;

pub use lyre_eval::{
    ConstructionError, Context, EvalError, EvalErrorKind, EvalLimits, StructureInstance, Value,
};
pub use lyre_parse::ParseError;
pub use lyre_resolve::{Definition, Resolver};
pub use program::Program;

/// Parse and evaluate `text`.
///
/// Only parse failures are `Err`; runtime failures are returned as
/// `Ok(Value::Error(..))`.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn evaluate_code(text: &str) -> Result<Value, ParseError> {
    let program = Program::parse("<code>", text)?;
    Ok(program.evaluate())
}

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber.
///
/// Safe to call multiple times. Only takes effect when `RUST_LOG` is set,
/// e.g. `RUST_LOG=lyre_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true);
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(tree)
                .try_init();
        }
    });
}
