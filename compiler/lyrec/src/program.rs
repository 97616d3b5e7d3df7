//! A parsed program and the contexts that evaluate it.

use lyre_eval::{Context, EvalLimits, Value};
use lyre_ir::{SharedInterner, Source};
use lyre_parse::ParseError;
use lyre_resolve::Resolver;

/// A parsed program.
///
/// The program owns its [`Source`]; every evaluation borrows it through a
/// fresh [`Context`], so one program can be evaluated any number of times,
/// from any number of threads.
#[derive(Debug)]
pub struct Program {
    source: Source,
}

impl Program {
    /// Parse `text` with a fresh interner.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, ParseError> {
        Self::parse_with(name, text, &SharedInterner::new())
    }

    /// Parse `text`, sharing `interner` with other programs.
    pub fn parse_with(
        name: impl Into<String>,
        text: &str,
        interner: &SharedInterner,
    ) -> Result<Self, ParseError> {
        lyre_parse::parse(name, text, interner).map(Self::from_source)
    }

    pub fn from_source(source: Source) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Static scope queries over this program.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.source)
    }

    /// A context with limits taken from the environment.
    pub fn context(&self) -> Context<'_> {
        self.context_with_limits(EvalLimits::from_env())
    }

    pub fn context_with_limits(&self, limits: EvalLimits) -> Context<'_> {
        Context::with_limits(&self.source, limits)
    }

    /// Evaluate the whole program in a fresh context.
    pub fn evaluate(&self) -> Value {
        self.context().evaluate_root()
    }
}
