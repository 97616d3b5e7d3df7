//! Structure construction.

use lyre_ir::{NodeKind, Span};

use super::Evaluator;
use crate::diagnostics::{CallFrame, FrameKind};
use crate::errors::{missing_input, too_many_arguments, type_mismatch, EvalResult};
use crate::value::{InstanceBuilder, StructureRef, Value};

impl Evaluator<'_, '_> {
    /// Build an instance of `structure` from positional `args`.
    ///
    /// Inputs bind in order. An input without an argument evaluates its
    /// default once, seeing only the inputs before it. Binds in the body
    /// block then run with every input visible and become further
    /// properties.
    pub(crate) fn construct(
        &mut self,
        structure: StructureRef,
        args: Vec<Value>,
        call_span: Span,
    ) -> EvalResult {
        let source = self.cx.source;
        let Some(&definition) = source.as_structure(structure.definition) else {
            return Err(type_mismatch(
                "structure definition",
                source.kind(structure.definition).describe(),
            ));
        };
        let name = source.name_text(definition.name);
        let inputs = source.list(definition.inputs);
        if args.len() > inputs.len() {
            return Err(too_many_arguments(name, inputs.len(), args.len()));
        }

        tracing::debug!(structure = name, args = args.len(), "construct");

        let frame = CallFrame {
            kind: FrameKind::Construct {
                structure: structure.definition,
                name: definition.name,
            },
            call_span: Some(call_span),
        };
        self.with_frame(frame, |this| {
            let mut instance = InstanceBuilder::new(definition.name, structure.definition);
            let mut args = args.into_iter();

            for &input in inputs {
                let Some(&bind) = source.as_bind(input) else {
                    continue;
                };
                let value = match (args.next(), bind.value) {
                    (Some(value), _) => value,
                    (None, Some(default)) => this.eval(default)?,
                    (None, None) => {
                        return Err(missing_input(name, source.name_text(bind.name)));
                    }
                };
                this.check_type(bind.ty, &value)?;
                this.cx.record(input, value.clone());
                instance.set(bind.name, value);
            }

            if let Some(body) = definition.body {
                if let NodeKind::Block { statements } = *source.kind(body) {
                    for &statement in source.list(statements) {
                        let value = this.eval(statement)?;
                        if let Some(bind) = source.as_bind(statement) {
                            instance.set(bind.name, value);
                        }
                    }
                }
            }

            Ok(Value::Instance(instance.finish()))
        })
    }
}
