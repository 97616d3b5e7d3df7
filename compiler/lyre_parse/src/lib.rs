//! Recursive descent parser for Lyre.
//!
//! Produces a [`Source`]: a flat [`NodeArena`] frozen with parent links and a
//! pre-order index. Grammar (statements, structures, operator precedence) is
//! documented on the functions in `grammar`.

mod cursor;
mod grammar;

use lyre_ir::{NodeArena, NodeKind, SharedInterner, Source, Span, StringInterner};
use lyre_lexer::{LexError, TokenList};

use cursor::Cursor;

/// Error produced while parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
    #[error("`{name}` at {span} is declared without a value")]
    UnvaluedBind { name: String, span: Span },
}

impl ParseError {
    /// Location of the error, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Lex(
                LexError::UnexpectedCharacter { span, .. } | LexError::UnterminatedText { span },
            )
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::UnvaluedBind { span, .. } => Some(*span),
            ParseError::Lex(LexError::SourceTooLarge) => None,
        }
    }
}

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: NodeArena,
    interner: &'a StringInterner,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: NodeArena::new(),
            interner,
        }
    }

    #[inline]
    fn alloc(&mut self, kind: NodeKind, span: Span) -> lyre_ir::NodeId {
        self.arena.alloc(kind, span)
    }
}

/// Parse `text` into a [`Source`] named `name`, interning into `interner`.
pub fn parse(
    name: impl Into<String>,
    text: &str,
    interner: &SharedInterner,
) -> Result<Source, ParseError> {
    let name = name.into();
    let tokens = lyre_lexer::lex(text, interner)?;
    let mut parser = Parser::new(&tokens, interner);
    let root = parser.parse_program()?;
    let source = Source::new(name, text, parser.arena, root, interner.clone());
    tracing::debug!(source = source.name(), nodes = source.len(), "parsed");
    Ok(source)
}

/// Parse with a fresh interner; convenient for tests and one-off evaluation.
pub fn parse_str(text: &str) -> Result<Source, ParseError> {
    parse("<input>", text, &SharedInterner::new())
}

#[cfg(test)]
mod tests;
