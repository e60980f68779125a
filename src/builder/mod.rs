//! Builder API for programmatic automaton construction.
//!
//! The command language is the primary way to edit an automaton; this
//! builder is the typed counterpart for library users and tests.

pub mod automaton;
pub mod error;

pub use automaton::AutomatonBuilder;
pub use error::BuildError;
