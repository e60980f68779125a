//! Execution of input words against an automaton.
//!
//! A run starts at the initial state and consumes the input one character
//! at a time. Every run produces a [`Trace`] of the visited states (unless it
//! could not start) and a [`Verdict`]:
//!
//! - **Accept**: all input consumed, last state is final
//! - **Reject**: all input consumed in a non-final state, or no transition
//!   matched
//! - **Error**: no initial state, empty input, or an undeclared symbol
//!
//! Simulation is pure: it never mutates the automaton.

mod engine;
mod trace;

pub use engine::{simulate, step, ExecutionError, RejectReason, Run, Step, Verdict};
pub use trace::{Trace, TraceStep};
