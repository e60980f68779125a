//! Trace of the states visited during a run.

use crate::core::Symbol;
use std::fmt;

/// Record of consuming one input symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    /// The symbol consumed
    pub symbol: Symbol,
    /// The state the symbol was read in
    pub from: String,
    /// The state moved to
    pub to: String,
}

/// Ordered record of a run through an automaton.
///
/// The trace starts at the initial state and grows by one step per consumed
/// symbol. When a run halts early the trace still holds every state reached
/// so far.
///
/// # Example
///
/// ```rust
/// use fsm_designer::core::Symbol;
/// use fsm_designer::execution::{Trace, TraceStep};
///
/// let mut trace = Trace::new("Q0");
/// trace.record(TraceStep {
///     symbol: Symbol::parse("0").unwrap(),
///     from: "Q0".to_string(),
///     to: "Q1".to_string(),
/// });
///
/// assert_eq!(trace.path(), vec!["Q0", "Q1"]);
/// assert_eq!(trace.current(), "Q1");
/// assert_eq!(trace.to_string(), "Q0 Q1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    start: String,
    steps: Vec<TraceStep>,
}

impl Trace {
    /// Create a trace positioned at `start`.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step.
    pub fn record(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    /// The state the run is currently in.
    pub fn current(&self) -> &str {
        self.steps.last().map_or(&self.start, |step| &step.to)
    }

    /// Get the path of states traversed.
    ///
    /// Returns the start state followed by the `to` state of each step.
    pub fn path(&self) -> Vec<&str> {
        std::iter::once(self.start.as_str())
            .chain(self.steps.iter().map(|step| step.to.as_str()))
            .collect()
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(symbol: &str, from: &str, to: &str) -> TraceStep {
        TraceStep {
            symbol: Symbol::parse(symbol).unwrap(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn empty_trace_holds_start_only() {
        let trace = Trace::new("A");
        assert_eq!(trace.path(), vec!["A"]);
        assert_eq!(trace.current(), "A");
        assert!(trace.steps().is_empty());
    }

    #[test]
    fn path_preserves_order() {
        let mut trace = Trace::new("A");
        trace.record(step("0", "A", "B"));
        trace.record(step("1", "B", "B"));
        trace.record(step("0", "B", "C"));

        assert_eq!(trace.path(), vec!["A", "B", "B", "C"]);
        assert_eq!(trace.steps().len(), 3);
        assert_eq!(trace.to_string(), "A B B C");
    }
}
