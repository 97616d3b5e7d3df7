//! Tree-walking evaluation.
//!
//! Internally every node evaluates to an [`EvalResult`]; the first error
//! stops evaluation and [`Evaluator::evaluate`] returns it as
//! [`Value::Error`]. Identifiers are resolved through the same
//! [`Resolver`](lyre_resolve::Resolver) that answers static scope queries, so
//! a name the resolver cannot see is never readable at run time.

mod construct;
mod operators;

use lyre_ir::{Bind, Name, NodeId, NodeKind, NodeRange, TypeAnnotation};
use lyre_resolve::Definition;
use lyre_stack::ensure_sufficient_stack;

use crate::context::{Context, Frame};
use crate::diagnostics::{CallFrame, FrameKind};
use crate::errors::{
    missing_input, type_mismatch, undefined_name, undefined_property, EvalError, EvalResult,
};
use crate::value::{describe_type, StructureRef, Value};

/// Evaluates nodes against a [`Context`].
pub struct Evaluator<'c, 'a> {
    cx: &'c mut Context<'a>,
}

impl<'c, 'a> Evaluator<'c, 'a> {
    pub(crate) fn new(cx: &'c mut Context<'a>) -> Self {
        Self { cx }
    }

    /// Evaluate `node` in the context's current frames.
    ///
    /// Never fails: errors come back as [`Value::Error`].
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn evaluate(&mut self, node: NodeId) -> Value {
        match self.eval(node) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(code = err.code(), span = ?err.span, "evaluation failed: {err}");
                Value::Error(err)
            }
        }
    }

    /// Evaluate one node, attaching its span and the live backtrace to any
    /// error raised beneath it.
    pub(crate) fn eval(&mut self, node: NodeId) -> EvalResult {
        ensure_sufficient_stack(|| {
            let span = self.cx.source.span(node);
            self.eval_kind(node).map_err(|err| {
                self.cx
                    .call_stack
                    .attach_backtrace(err.or_span(span), self.cx.source.interner())
            })
        })
    }

    fn eval_kind(&mut self, node: NodeId) -> EvalResult {
        let source = self.cx.source;
        match *source.kind(node) {
            NodeKind::Block { statements } => self.eval_block(node, statements),
            NodeKind::Bind(bind) => self.eval_bind(node, bind),
            NodeKind::Structure(structure) => Ok(Value::Structure(StructureRef {
                definition: node,
                name: structure.name,
            })),
            NodeKind::PropertyReference { subject, name } => self.eval_property(subject, name),
            NodeKind::MemberName(name) | NodeKind::Reference(name) => {
                self.eval_reference(node, name)
            }
            NodeKind::Evaluate { callee, args } => self.eval_evaluate(node, callee, args),
            NodeKind::Number(bits) => Ok(Value::Number(f64::from_bits(bits))),
            NodeKind::Text(text) => Ok(Value::text(source.name_text(text))),
            NodeKind::Boolean(b) => Ok(Value::Boolean(b)),
            NodeKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::evaluate_binary(op, left, right, source.interner())
            }
            NodeKind::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                operators::evaluate_unary(op, operand, source.interner())
            }
            NodeKind::Conditional { condition, yes, no } => match self.eval(condition)? {
                Value::Boolean(true) => self.eval(yes),
                Value::Boolean(false) => self.eval(no),
                other => Err(type_mismatch(
                    "boolean",
                    &other.type_name(source.interner()),
                )),
            },
        }
    }

    /// Statements left to right in a fresh frame; the last value wins.
    fn eval_block(&mut self, node: NodeId, statements: NodeRange) -> EvalResult {
        let source = self.cx.source;
        let frame = CallFrame {
            kind: FrameKind::Block,
            call_span: Some(source.span(node)),
        };
        self.with_frame(frame, |this| {
            let mut last = Value::None;
            for &statement in source.list(statements) {
                last = this.eval(statement)?;
            }
            Ok(last)
        })
    }

    fn eval_bind(&mut self, node: NodeId, bind: Bind) -> EvalResult {
        let source = self.cx.source;
        let Some(value) = bind.value else {
            // Only structure inputs lack a value; reached here outside a
            // construction, nothing supplied one.
            let structure = source
                .parent(node)
                .and_then(|parent| source.defined_name(parent))
                .map_or("", |name| source.name_text(name));
            return Err(missing_input(structure, source.name_text(bind.name)));
        };
        let value = self.eval(value)?;
        self.check_type(bind.ty, &value)?;
        self.cx.record(node, value.clone());
        Ok(value)
    }

    /// Member names are not lexical, so the resolver finds nothing for them
    /// and they read as undefined.
    fn eval_reference(&mut self, node: NodeId, name: Name) -> EvalResult {
        let source = self.cx.source;
        match self.cx.resolver.definition_of(node, name) {
            Some(Definition::Bind(bind)) => match self.cx.lookup(bind) {
                Some(value) => Ok(value.clone()),
                None => self.demand(bind),
            },
            Some(Definition::Structure(definition)) => Ok(Value::Structure(StructureRef {
                definition,
                name,
            })),
            None => Err(undefined_name(source.name_text(name))),
        }
    }

    /// Evaluate a visible bind whose frame is not live, as when an inner
    /// node is evaluated directly. Binds only see earlier declarations, so
    /// this cannot revisit `bind`. An input reached this way has no argument
    /// and falls back to its default or fails with `MissingInput`.
    fn demand(&mut self, bind: NodeId) -> EvalResult {
        tracing::trace!(?bind, "demand");
        let value = self.eval(bind)?;
        self.cx.demanded.insert(bind, value.clone());
        Ok(value)
    }

    /// The subject is evaluated fully, then the name is looked up on the
    /// resulting instance only.
    fn eval_property(&mut self, subject: NodeId, member: NodeId) -> EvalResult {
        let source = self.cx.source;
        let interner = source.interner();
        let subject = self.eval(subject)?;
        let name = match *source.kind(member) {
            NodeKind::MemberName(name) => name,
            ref other => return Err(type_mismatch("member name", other.describe())),
        };
        match subject {
            Value::Instance(instance) => instance.get(name).cloned().ok_or_else(|| {
                undefined_property(
                    interner.lookup(instance.type_name()),
                    interner.lookup(name),
                )
            }),
            other => Err(type_mismatch(
                "structure instance",
                &other.type_name(interner),
            )),
        }
    }

    /// Callee, then arguments left to right, then construction.
    fn eval_evaluate(&mut self, node: NodeId, callee: NodeId, args: NodeRange) -> EvalResult {
        let source = self.cx.source;
        let callee = self.eval(callee)?;
        let args = source
            .list(args)
            .iter()
            .map(|&arg| self.eval(arg))
            .collect::<Result<Vec<_>, _>>()?;
        match callee {
            Value::Structure(structure) => self.construct(structure, args, source.span(node)),
            other => Err(type_mismatch(
                "structure",
                &other.type_name(source.interner()),
            )),
        }
    }

    fn check_type(&self, ty: Option<TypeAnnotation>, value: &Value) -> Result<(), EvalError> {
        match ty {
            Some(ty) if !value.conforms_to(ty) => {
                let interner = self.cx.source.interner();
                Err(type_mismatch(
                    &describe_type(ty, interner),
                    &value.type_name(interner),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Run `f` inside a new call frame and bind frame. Both are popped on
    /// every path; errors leave with the backtrace of the frame that raised
    /// them.
    fn with_frame(
        &mut self,
        frame: CallFrame,
        f: impl FnOnce(&mut Self) -> EvalResult,
    ) -> EvalResult {
        self.cx.call_stack.push(frame)?;
        self.cx.frames.push(Frame::default());
        let result = f(self).map_err(|err| {
            self.cx
                .call_stack
                .attach_backtrace(err, self.cx.source.interner())
        });
        self.cx.frames.pop();
        self.cx.call_stack.pop();
        result
    }
}

#[cfg(test)]
mod tests;
