//! Grammar productions.
//!
//! Each module extends `Parser` with methods for one group of productions:
//!
//! - [`item`]: program, blocks, statements, binds and structure definitions
//! - [`expr`]: conditionals, binary and unary operators, postfix, primaries
//! - [`ty`]: type annotations after `•`
//!
//! The parser allocates children before parents and never backtracks; one
//! token of lookahead (`IDENT` followed by `:` or `•`) separates binds from
//! expression statements.

mod expr;
mod item;
mod ty;
