//! The tree-walking evaluator.
//!
//! Runs the same tree the analyzer checks, but re-derives everything it
//! needs dynamically: it keeps its own scope chain of runtime values and
//! enforces the operator rules by inspecting runtime kinds, so it works on
//! unanalyzed input too.

pub mod interpreter;
pub mod value;
