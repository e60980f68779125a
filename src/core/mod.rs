//! The automaton model.
//!
//! This module owns the data the command language edits:
//! - Symbols, single alphanumeric characters
//! - States, named nodes that may be flagged final
//! - The automaton aggregate with its initial state and transition table
//!
//! Identifiers are case-insensitive and stored uppercase. Every mutation
//! keeps the model consistent; callers only ever receive read-only views.

mod automaton;
mod error;
mod state;
mod symbol;

pub use automaton::{
    Automaton, AutomatonData, FinalOutcome, InitialOutcome, StateOutcome, SymbolOutcome,
    Transition, TransitionOutcome,
};
pub use error::{ModelError, StateRole};
pub use state::{canonical_state_name, State};
pub use symbol::Symbol;
