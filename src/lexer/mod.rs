//! Lexical analysis module.
//!
//! Converts source text into tokens for the parser. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, integers and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//!
//! The parser only depends on the [`lexer::TokenSource`] pull interface.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
