//! Recursive descent parser.
//!
//! One function per grammar rule:
//!
//! ```text
//! source     ::= field* method*
//! field      ::= 'LET' identifier (':' identifier)? ('=' expr)? ';'
//! method     ::= 'DEF' identifier '(' parameters ')' (':' identifier)? 'DO' stmt* 'END'
//! stmt       ::= decl | if | for | while | return | expr ('=' expr)? ';'
//! expr       ::= logical ::= equality ::= additive ::= multiplicative
//!              ::= secondary ::= primary
//! ```
//!
//! Every expression node gets a fresh `ExprId` so later passes can attach
//! results without touching the tree.

pub mod parser;

#[cfg(test)]
mod tests;
