//! FSM Designer: an editor and simulator for deterministic finite automata
//!
//! Automata are built incrementally with a small command language and then
//! exercised against input words. The interpreter reports every decision it
//! makes (auto-declared states, overridden transitions, rejected tokens) so
//! that scripts behave predictably.
//!
//! # Core Concepts
//!
//! - **Automaton**: symbols, states, an initial state, final states and a
//!   deterministic transition table, kept consistent by its own operations
//! - **Execution**: runs a word from the initial state and reports the trace
//!   of visited states with an accept/reject verdict
//! - **Dispatcher**: parses `;`-terminated commands and applies them
//!
//! # Example
//!
//! ```rust
//! use fsm_designer::command::Dispatcher;
//!
//! let mut dispatcher = Dispatcher::new(Vec::new());
//! for command in [
//!     "SYMBOLS 0 1;",
//!     "STATES Q0 Q1 Q2;",
//!     "INITIAL-STATE Q0;",
//!     "FINAL-STATES Q2;",
//!     "TRANSITIONS 0 Q0 Q1, 1 Q0 Q2, 0 Q1 Q2, 1 Q1 Q1, 0 Q2 Q2, 1 Q2 Q2;",
//! ] {
//!     dispatcher.process(command);
//! }
//!
//! let report = dispatcher.process("EXECUTE 00;");
//! assert_eq!(report.lines(), vec!["Q0 Q1 Q2", "YES"]);
//! ```

pub mod builder;
pub mod command;
pub mod core;
pub mod execution;
pub mod reader;
pub mod session;
pub mod snapshot;
pub mod transcript;

// Re-export commonly used types
pub use builder::AutomatonBuilder;
pub use command::{Command, Diagnostic, Dispatcher, Level, Report};
pub use core::{Automaton, State, Symbol};
pub use execution::{simulate, Run, Trace, Verdict};
