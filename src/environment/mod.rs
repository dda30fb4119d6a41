//! The fixed built-in type catalog and the lexical scope chain.
//!
//! Types are identity-compared registry entries, so they are modelled as a
//! plain enum. `Scope` is generic over its variable and function payloads:
//! the analyzer stores declared types, the interpreter stores runtime values
//! and callables, and the two chains never share state.

pub mod environment;
pub mod scope;

#[cfg(test)]
mod tests;
