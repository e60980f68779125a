//! Build errors for the automaton builder.

use crate::core::ModelError;
use thiserror::Error;

/// Errors that can occur when building an automaton.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Conflicting transitions for <{symbol},{from}>: {first} and {second}")]
    ConflictingTransition {
        symbol: String,
        from: String,
        first: String,
        second: String,
    },
}
