//! Automaton model error types.

use std::fmt;
use thiserror::Error;

/// Which end of a transition a state reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRole {
    /// The state a transition leaves
    From,
    /// The state a transition enters
    To,
}

impl fmt::Display for StateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("Current"),
            Self::To => f.write_str("Next"),
        }
    }
}

/// Errors that can occur when mutating or restoring an automaton.
///
/// None of these leave the model in a modified state: an operation that
/// returns an error has not touched the automaton.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("'{0}' is not allowed as a symbol, length must be 1")]
    SymbolLength(String),

    #[error("Invalid symbol '{0}'. Must be alphanumeric and single character.")]
    InvalidSymbol(String),

    #[error("Invalid state '{0}'. Must be alphanumeric.")]
    InvalidState(String),

    #[error("Symbol '{0}' not declared.")]
    UndeclaredSymbol(String),

    #[error("{role} state '{name}' not declared.")]
    UndeclaredState { role: StateRole, name: String },

    #[error("Initial state '{0}' is not a declared state")]
    UndeclaredInitialState(String),

    #[error("States are declared but no initial state is set (first state '{0}')")]
    MissingInitialState(String),

    #[error("State '{0}' appears more than once")]
    DuplicateState(String),

    #[error("Transition <{symbol},{from}> appears more than once")]
    DuplicateTransition { symbol: String, from: String },
}
