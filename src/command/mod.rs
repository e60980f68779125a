//! The command language: grammar, diagnostics and dispatch.
//!
//! A raw command string is parsed into a [`Command`] (one variant per
//! keyword), then handed to the [`Dispatcher`], which validates arguments,
//! applies them to the automaton and emits [`Diagnostic`]s.
//!
//! Diagnostics fall into four levels:
//! - **Error**: the command or clause was skipped
//! - **Warning**: the command proceeded, possibly with a correction
//! - **Info**: an implicit change, such as the first state becoming initial
//! - **Output**: listings, traces and verdicts

mod diagnostic;
mod dispatcher;
mod parse;

pub use diagnostic::{Diagnostic, Level, Report};
pub use dispatcher::{Dispatcher, MAX_LOAD_DEPTH};
pub use parse::{Command, ParseError, TransitionClause};
