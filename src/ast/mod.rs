//! The Abstract Syntax Tree shared by every pass.
//!
//! Nodes are plain data: the analyzer records its results in side tables
//! keyed by `ExprId` rather than mutating the tree, and the interpreter
//! walks the same nodes independently.

pub mod ast;
