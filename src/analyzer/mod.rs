//! The static analysis pass.
//!
//! A single depth-first walk over the tree that resolves a type for every
//! expression and a binding for every access and call, enforcing the
//! language's static rules along the way. The pass is fail-fast and writes
//! its results into an `Analysis` side table instead of mutating the tree.

pub mod analyzer;
