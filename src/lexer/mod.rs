//! Lexical analysis for the toolchain.
//!
//! Converts source text into a flat token sequence using a table of regex
//! patterns with per-pattern handler functions. Handles keywords,
//! identifiers, numeric/character/string literals with escapes, operators,
//! comments and whitespace, and reports malformed input with the source
//! index it occurred at.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
