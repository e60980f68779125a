//! Builder for constructing automata.

use crate::builder::error::BuildError;
use crate::core::{Automaton, TransitionOutcome};

/// Builder for constructing automata with a fluent API.
///
/// Declarations are applied in a fixed order on [`build`](Self::build):
/// symbols, states, initial state, final states, then transitions. The same
/// model policies as the command language apply (first state becomes
/// initial, initial and final states are declared on the fly), but anything
/// the command language reports as an error fails the build.
#[derive(Debug, Default, Clone)]
pub struct AutomatonBuilder {
    symbols: Vec<String>,
    states: Vec<String>,
    initial: Option<String>,
    finals: Vec<String>,
    transitions: Vec<(String, String, String)>,
}

impl AutomatonBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare input symbols.
    pub fn symbols<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.symbols.extend(symbols.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Declare states.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.states.extend(states.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Set the initial state. Defaults to the first declared state.
    pub fn initial(mut self, state: &str) -> Self {
        self.initial = Some(state.to_string());
        self
    }

    /// Declare final states.
    pub fn finals<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.finals.extend(states.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Add a transition.
    pub fn transition(mut self, symbol: &str, from: &str, to: &str) -> Self {
        self.transitions.push((symbol.to_string(), from.to_string(), to.to_string()));
        self
    }

    /// Build the automaton.
    ///
    /// Returns an error on invalid identifiers, undeclared references in
    /// transitions, or two different destinations for one transition key.
    pub fn build(self) -> Result<Automaton, BuildError> {
        let mut automaton = Automaton::new();

        for symbol in &self.symbols {
            automaton.declare_symbol(symbol)?;
        }
        for state in &self.states {
            automaton.declare_state(state)?;
        }
        if let Some(initial) = &self.initial {
            automaton.set_initial_state(initial)?;
        }
        for state in &self.finals {
            automaton.declare_final_state(state)?;
        }
        for (symbol, from, to) in &self.transitions {
            if let TransitionOutcome::Overridden { previous } =
                automaton.add_transition(symbol, from, to)?
            {
                return Err(BuildError::ConflictingTransition {
                    symbol: symbol.to_ascii_uppercase(),
                    from: from.to_ascii_uppercase(),
                    first: previous,
                    second: to.to_ascii_uppercase(),
                });
            }
        }

        Ok(automaton)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModelError;

    #[test]
    fn empty_builder_builds_empty_automaton() {
        let automaton = AutomatonBuilder::new().build().unwrap();
        assert!(automaton.is_empty());
    }

    #[test]
    fn fluent_api_builds_automaton() {
        let automaton = AutomatonBuilder::new()
            .symbols(["a", "b"])
            .states(["s0", "s1"])
            .initial("s1")
            .finals(["s0"])
            .transition("a", "s0", "s1")
            .transition("b", "s1", "s0")
            .build()
            .unwrap();

        assert_eq!(automaton.symbols().len(), 2);
        assert_eq!(automaton.initial_state(), Some("S1"));
        assert_eq!(automaton.final_states().count(), 1);
        assert_eq!(automaton.transition_count(), 2);
    }

    #[test]
    fn first_state_is_initial_by_default() {
        let automaton = AutomatonBuilder::new()
            .states(["x", "y"])
            .build()
            .unwrap();
        assert_eq!(automaton.initial_state(), Some("X"));
    }

    #[test]
    fn builder_rejects_undeclared_references() {
        let result = AutomatonBuilder::new()
            .symbols(["a"])
            .states(["s0"])
            .transition("a", "s0", "s9")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Model(ModelError::UndeclaredState { .. }))
        ));
    }

    #[test]
    fn builder_rejects_invalid_symbols() {
        let result = AutomatonBuilder::new().symbols(["ab"]).build();
        assert!(matches!(
            result,
            Err(BuildError::Model(ModelError::SymbolLength(_)))
        ));
    }

    #[test]
    fn builder_rejects_conflicting_transitions() {
        let result = AutomatonBuilder::new()
            .symbols(["a"])
            .states(["s0", "s1"])
            .transition("a", "s0", "s0")
            .transition("a", "s0", "s1")
            .build();

        match result {
            Err(BuildError::ConflictingTransition { first, second, .. }) => {
                assert_eq!(first, "S0");
                assert_eq!(second, "S1");
            }
            other => panic!("Expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn repeated_identical_transition_is_accepted() {
        let automaton = AutomatonBuilder::new()
            .symbols(["a"])
            .states(["s0"])
            .transition("a", "s0", "s0")
            .transition("A", "S0", "S0")
            .build()
            .unwrap();
        assert_eq!(automaton.transition_count(), 1);
    }
}
