#![warn(missing_docs)]
//! `rbx-validator-treesitter` - Tree-sitter Lua syntax checking for `rbx-validator`.
//!
//! This crate runs the Tree-sitter Lua grammar over a whole source text and reports whether it
//! parsed, and if not, where the first `ERROR` or `MISSING` node sits. Positions are reported in
//! Tree-sitter coordinates (zero-based row, byte column); `rbx-validator` converts them to its
//! own 1-based character positions.

mod checker;

pub use checker::{LuaSyntaxChecker, ParseOutcome, SyntaxError, SyntaxErrorKind, TreeSitterError};
