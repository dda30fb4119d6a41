//! Java source generation for a validated program.
//!
//! Purely mechanical: the tree and the analysis side tables already hold
//! every decision, this pass only renders them. Output is a single
//! `public class Main` whose static entry point trampolines into the
//! program's own `main` method.

pub mod generator;

#[cfg(test)]
mod tests;
