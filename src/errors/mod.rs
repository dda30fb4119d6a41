//! Error types for the toolchain.
//!
//! Three independent taxonomies, matching the three places a program can be
//! rejected: `SyntaxError` (lexer/parser, carries a source position),
//! `AnalysisError` (static checking) and `RuntimeError` (execution).

pub mod errors;

#[cfg(test)]
mod tests;
