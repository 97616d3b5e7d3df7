//! Node kinds.
//!
//! A closed enumeration: adding a kind forces every `match` in the resolver
//! and evaluator to be revisited.

use std::fmt;

use crate::{Name, NodeId, NodeRange, Span};

/// A syntax node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Node variants.
///
/// All children are arena indices.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    /// Sequential statement list: `( a: 1  b: a  b )`. The program root is
    /// always a block.
    Block { statements: NodeRange },

    /// `name•Type: value`
    Bind(Bind),

    /// `•Name(inputs) (body)`
    Structure(StructureDefinition),

    /// `subject.name`; `name` is always a [`NodeKind::MemberName`].
    PropertyReference { subject: NodeId, name: NodeId },

    /// The name part of a property reference. Not a lexical position.
    MemberName(Name),

    /// An identifier in expression position.
    Reference(Name),

    /// `callee(args)`
    Evaluate { callee: NodeId, args: NodeRange },

    /// Number literal, stored as `f64` bits so the kind stays `Eq + Hash`.
    Number(u64),

    /// Text literal (interned, quotes stripped).
    Text(Name),

    /// `true` / `false`
    Boolean(bool),

    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },

    Unary { op: UnaryOp, operand: NodeId },

    /// `if condition then yes else no`
    Conditional {
        condition: NodeId,
        yes: NodeId,
        no: NodeId,
    },
}

impl NodeKind {
    /// Number literal from an `f64`.
    #[inline]
    pub fn number(value: f64) -> Self {
        NodeKind::Number(value.to_bits())
    }

    /// Short description used in tracing and test failure output.
    pub const fn describe(&self) -> &'static str {
        match self {
            NodeKind::Block { .. } => "block",
            NodeKind::Bind(_) => "bind",
            NodeKind::Structure(_) => "structure definition",
            NodeKind::PropertyReference { .. } => "property reference",
            NodeKind::MemberName(_) => "member name",
            NodeKind::Reference(_) => "reference",
            NodeKind::Evaluate { .. } => "evaluate",
            NodeKind::Number(_) => "number",
            NodeKind::Text(_) => "text",
            NodeKind::Boolean(_) => "boolean",
            NodeKind::Binary { .. } => "binary operation",
            NodeKind::Unary { .. } => "unary operation",
            NodeKind::Conditional { .. } => "conditional",
        }
    }
}

/// A node introducing one name.
///
/// `value` is absent only for structure inputs that must be supplied by the
/// caller.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Bind {
    pub name: Name,
    pub ty: Option<TypeAnnotation>,
    pub value: Option<NodeId>,
}

/// A named structural type: ordered input binds plus an optional body block
/// whose binds become derived properties.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructureDefinition {
    pub name: Name,
    pub inputs: NodeRange,
    pub body: Option<NodeId>,
}

/// Declared type of a bind: `•""`, `•#`, `•?`, or `•Name`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeAnnotation {
    Text,
    Number,
    Boolean,
    Named(Name),
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Source-level symbol, used in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "=",
            Self::NotEq => "≠",
            Self::Lt => "<",
            Self::LtEq => "≤",
            Self::Gt => ">",
            Self::GtEq => "≥",
            Self::And => "&",
            Self::Or => "|",
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `~x`
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "~",
        }
    }
}
