//! Error types for lexing and parsing.
//!
//! - Error structures with source position information
//! - One variant per failure the front-end can report
//! - Helpful suggestions for display

pub mod errors;
