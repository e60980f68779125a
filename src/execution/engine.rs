//! Simulation of input words against an automaton.

use crate::core::{Automaton, Symbol};
use crate::execution::trace::{Trace, TraceStep};
use std::fmt;
use tracing::{debug, trace};

/// Errors that stop a run before a verdict can be reached
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error("No initial state defined.")]
    NoInitialState,

    #[error("No input string provided.")]
    NoInput,

    #[error("Symbol '{0}' not declared.")]
    UndeclaredSymbol(char),
}

/// Why a word was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// All input was consumed but the run ended in a non-final state
    NotFinal,

    /// No transition leaves `state` on `symbol`
    NoTransition { state: String, symbol: Symbol },
}

/// Outcome of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
    Error(ExecutionError),
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => f.write_str("YES"),
            Self::Reject(RejectReason::NotFinal) => f.write_str("NO"),
            Self::Reject(RejectReason::NoTransition { state, symbol }) => write!(
                f,
                "NO (No valid transition from state '{state}' with symbol '{symbol}')"
            ),
            Self::Error(error) => write!(f, "Error: {error}"),
        }
    }
}

/// A finished run: the states visited and the verdict.
///
/// `trace` is `None` only when the run could not start at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub trace: Option<Trace>,
    pub verdict: Verdict,
}

impl Run {
    fn failed(error: ExecutionError) -> Self {
        Self {
            trace: None,
            verdict: Verdict::Error(error),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accept
    }
}

/// Result of consuming a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Moved along the transition to the contained state
    Moved { symbol: Symbol, to: &'a str },

    /// The character is a declared symbol but no transition matches
    NoTransition(Symbol),

    /// The character is not a declared symbol
    UndeclaredSymbol,
}

/// Consume one character from state `current` (pure).
pub fn step<'a>(automaton: &'a Automaton, current: &str, input: char) -> Step<'a> {
    let Some(symbol) = automaton.symbol(input) else {
        return Step::UndeclaredSymbol;
    };
    match automaton.destination(symbol, current) {
        Some(to) => Step::Moved { symbol, to },
        None => Step::NoTransition(symbol),
    }
}

/// Run `input` through `automaton` from its initial state.
///
/// The walk halts at the first undeclared symbol (an error) or at the first
/// missing transition (a rejection). Otherwise the word is accepted when the
/// last state reached is final.
///
/// # Example
///
/// ```rust
/// use fsm_designer::builder::AutomatonBuilder;
/// use fsm_designer::execution::{simulate, Verdict};
///
/// let automaton = AutomatonBuilder::new()
///     .symbols(["a"])
///     .states(["even", "odd"])
///     .finals(["even"])
///     .transition("a", "even", "odd")
///     .transition("a", "odd", "even")
///     .build()
///     .unwrap();
///
/// let run = simulate(&automaton, "aa");
/// assert_eq!(run.verdict, Verdict::Accept);
/// assert_eq!(run.trace.unwrap().path(), vec!["EVEN", "ODD", "EVEN"]);
/// ```
pub fn simulate(automaton: &Automaton, input: &str) -> Run {
    let Some(initial) = automaton.initial_state() else {
        return Run::failed(ExecutionError::NoInitialState);
    };
    if input.is_empty() {
        return Run::failed(ExecutionError::NoInput);
    }

    debug!(%input, initial, "simulating");
    let mut trace = Trace::new(initial);

    for c in input.chars() {
        let current = trace.current().to_string();
        let verdict = match step(automaton, &current, c) {
            Step::Moved { symbol, to } => {
                trace!(%symbol, from = %current, to, "step");
                trace.record(TraceStep {
                    symbol,
                    from: current,
                    to: to.to_string(),
                });
                continue;
            }
            Step::NoTransition(symbol) => Verdict::Reject(RejectReason::NoTransition {
                state: current,
                symbol,
            }),
            Step::UndeclaredSymbol => {
                Verdict::Error(ExecutionError::UndeclaredSymbol(c.to_ascii_uppercase()))
            }
        };
        return Run {
            trace: Some(trace),
            verdict,
        };
    }

    let accepted = automaton
        .state(trace.current())
        .is_some_and(|state| state.is_final());
    Run {
        trace: Some(trace),
        verdict: if accepted {
            Verdict::Accept
        } else {
            Verdict::Reject(RejectReason::NotFinal)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AutomatonBuilder;

    /// Accepts binary words that reach Q2, which is absorbing.
    fn sample() -> Automaton {
        AutomatonBuilder::new()
            .symbols(["0", "1"])
            .states(["q0", "q1", "q2"])
            .initial("q0")
            .finals(["q2"])
            .transition("0", "q0", "q1")
            .transition("1", "q0", "q2")
            .transition("0", "q1", "q2")
            .transition("1", "q1", "q1")
            .transition("0", "q2", "q2")
            .transition("1", "q2", "q2")
            .build()
            .unwrap()
    }

    #[test]
    fn accepts_word_ending_in_final_state() {
        let run = simulate(&sample(), "00");
        assert!(run.is_accepted());
        assert_eq!(run.trace.unwrap().path(), vec!["Q0", "Q1", "Q2"]);
    }

    #[test]
    fn rejects_word_ending_in_non_final_state() {
        let run = simulate(&sample(), "01");
        assert_eq!(run.verdict, Verdict::Reject(RejectReason::NotFinal));
        assert_eq!(run.trace.unwrap().to_string(), "Q0 Q1 Q1");
    }

    #[test]
    fn input_is_case_insensitive() {
        let automaton = AutomatonBuilder::new()
            .symbols(["a", "B"])
            .states(["s"])
            .finals(["s"])
            .transition("A", "s", "s")
            .transition("b", "s", "s")
            .build()
            .unwrap();

        assert!(simulate(&automaton, "aAbB").is_accepted());
    }

    #[test]
    fn undeclared_symbol_halts_with_partial_trace() {
        let run = simulate(&sample(), "0x1");
        assert_eq!(
            run.verdict,
            Verdict::Error(ExecutionError::UndeclaredSymbol('X'))
        );
        assert_eq!(run.trace.unwrap().path(), vec!["Q0", "Q1"]);
    }

    #[test]
    fn missing_transition_rejects_with_partial_trace() {
        let automaton = AutomatonBuilder::new()
            .symbols(["0", "1"])
            .states(["q0", "q1"])
            .finals(["q1"])
            .transition("0", "q0", "q1")
            .build()
            .unwrap();

        let run = simulate(&automaton, "01");
        assert_eq!(
            run.verdict,
            Verdict::Reject(RejectReason::NoTransition {
                state: "Q1".to_string(),
                symbol: Symbol::parse("1").unwrap(),
            })
        );
        assert_eq!(run.trace.unwrap().path(), vec!["Q0", "Q1"]);
    }

    #[test]
    fn no_initial_state_is_an_error_for_any_input() {
        let automaton = Automaton::new();
        for input in ["", "0", "01"] {
            let run = simulate(&automaton, input);
            assert_eq!(run.verdict, Verdict::Error(ExecutionError::NoInitialState));
            assert!(run.trace.is_none());
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        let run = simulate(&sample(), "");
        assert_eq!(run.verdict, Verdict::Error(ExecutionError::NoInput));
    }

    #[test]
    fn step_reports_each_case() {
        let automaton = sample();
        assert_eq!(
            step(&automaton, "Q0", '1'),
            Step::Moved {
                symbol: Symbol::parse("1").unwrap(),
                to: "Q2"
            }
        );
        assert_eq!(step(&automaton, "Q0", '7'), Step::UndeclaredSymbol);
        assert_eq!(
            step(&automaton, "NOWHERE", '0'),
            Step::NoTransition(Symbol::parse("0").unwrap())
        );
    }

    #[test]
    fn verdict_renders_like_the_command_language() {
        assert_eq!(Verdict::Accept.to_string(), "YES");
        assert_eq!(Verdict::Reject(RejectReason::NotFinal).to_string(), "NO");
        assert_eq!(
            Verdict::Error(ExecutionError::NoInput).to_string(),
            "Error: No input string provided."
        );
    }
}
