//! Call stack tracking for the evaluator.
//!
//! Every block and every structure construction pushes a [`CallFrame`]; the
//! depth check lives in [`CallStack::push`]. When an error surfaces, the live
//! frames are snapshotted into an [`EvalBacktrace`].

use lyre_ir::{Name, NodeId, Span, StringInterner};

use crate::errors::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError};

/// What entered a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Block,
    Construct { structure: NodeId, name: Name },
}

/// A single frame in the live call stack.
#[derive(Copy, Clone, Debug)]
pub struct CallFrame {
    pub kind: FrameKind,
    /// Span of the block or evaluation that entered the frame.
    pub call_span: Option<Span>,
}

/// Live call stack for one evaluation.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, checking the depth limit.
    ///
    /// On overflow the frame is not pushed.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(stack_overflow(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Definition node of the innermost structure under construction.
    pub fn current_structure(&self) -> Option<NodeId> {
        self.frames.iter().rev().find_map(|frame| match frame.kind {
            FrameKind::Construct { structure, .. } => Some(structure),
            FrameKind::Block => None,
        })
    }

    /// Snapshot the stack, most recent frame first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: match frame.kind {
                    FrameKind::Block => "<block>".to_owned(),
                    FrameKind::Construct { name, .. } => interner.lookup(name).to_owned(),
                },
                span: frame.call_span,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already has one or the stack is
    /// empty.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}
