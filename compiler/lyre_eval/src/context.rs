//! Per-evaluation state.

use lyre_ir::{NodeId, Source};
use lyre_resolve::Resolver;
use rustc_hash::FxHashMap;

use crate::diagnostics::CallStack;
use crate::{EvalLimits, Evaluator, Value};

/// Values of the binds evaluated in one block or one construction.
pub(crate) type Frame = FxHashMap<NodeId, Value>;

/// Everything one evaluation of a [`Source`] needs.
///
/// A context borrows the source and owns its own stacks, so independent
/// contexts may evaluate the same source concurrently.
pub struct Context<'a> {
    pub(crate) source: &'a Source,
    pub(crate) resolver: Resolver<'a>,
    pub(crate) limits: EvalLimits,
    pub(crate) call_stack: CallStack,
    pub(crate) frames: Vec<Frame>,
    /// Binds evaluated on demand, outside any live frame.
    pub(crate) demanded: Frame,
}

impl<'a> Context<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self::with_limits(source, EvalLimits::default())
    }

    pub fn with_limits(source: &'a Source, limits: EvalLimits) -> Self {
        Self {
            source,
            resolver: Resolver::new(source),
            limits,
            call_stack: CallStack::new(limits.max_depth),
            frames: Vec::new(),
            demanded: Frame::default(),
        }
    }

    pub fn source(&self) -> &'a Source {
        self.source
    }

    pub fn limits(&self) -> EvalLimits {
        self.limits
    }

    /// Number of active blocks and constructions.
    pub fn depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Definition node of the structure whose instance is being built, if
    /// any.
    pub fn current_structure(&self) -> Option<NodeId> {
        self.call_stack.current_structure()
    }

    pub fn evaluator(&mut self) -> Evaluator<'_, 'a> {
        Evaluator::new(self)
    }

    /// Evaluate the whole program.
    #[tracing::instrument(level = "debug", skip_all, fields(source = self.source.name()))]
    pub fn evaluate_root(&mut self) -> Value {
        let root = self.source.root();
        self.evaluator().evaluate(root)
    }

    /// Value of an evaluated bind, innermost frame first.
    pub(crate) fn lookup(&self, bind: NodeId) -> Option<&Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(&bind))
            .or_else(|| self.demanded.get(&bind))
    }

    /// Store a bind's value in the innermost frame, or with the demanded
    /// binds when no frame is open.
    pub(crate) fn record(&mut self, bind: NodeId, value: Value) {
        match self.frames.last_mut() {
            Some(frame) => frame.insert(bind, value),
            None => self.demanded.insert(bind, value),
        };
    }
}
