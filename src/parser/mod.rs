//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! Transforms a stream of tokens into a [`Program`](crate::ast::ast::Program).
//! Expressions use a Pratt parser: NUD (null denotation) handlers start an
//! expression, LED (left denotation) handlers extend it, and binding powers
//! decide how far each operator reaches.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
