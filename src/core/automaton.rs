//! The automaton aggregate and its mutation primitives.

use super::error::{ModelError, StateRole};
use super::state::{canonical_state_name, State};
use super::symbol::Symbol;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A deterministic transition `(symbol, from) -> to`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Transition {
    pub symbol: Symbol,
    pub from: String,
    pub to: String,
}

/// Result of declaring a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolOutcome {
    Added,
    AlreadyDeclared,
}

/// Result of declaring a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOutcome {
    /// The state was inserted. `became_initial` is set when it was the
    /// first state and took the initial position.
    Added { became_initial: bool },
    AlreadyDeclared,
}

/// Result of setting the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialOutcome {
    /// The state did not exist and was declared on the fly.
    pub auto_declared: bool,
}

/// Result of declaring a final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalOutcome {
    Marked,
    /// The state did not exist and was declared as final on the fly.
    AutoDeclared { became_initial: bool },
    AlreadyFinal,
}

/// Result of adding a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    Added,
    /// The exact same transition already existed.
    Duplicate,
    /// The key existed with another destination, which was replaced.
    Overridden { previous: String },
}

/// Plain serializable form of an automaton.
///
/// This is the shape persisted in snapshots. Converting it back into an
/// [`Automaton`] re-validates every model invariant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonData {
    pub symbols: Vec<Symbol>,
    pub states: Vec<State>,
    pub initial: Option<String>,
    pub transitions: Vec<Transition>,
}

/// A deterministic finite automaton under construction.
///
/// All mutation goes through the methods below, which canonicalize
/// identifiers and keep these invariants:
///
/// - every transition refers to declared symbols and states,
/// - at most one destination exists per `(symbol, from)` key,
/// - the initial state, when set, is a declared state,
/// - final states are declared states (the flag lives on the state itself).
///
/// Collections iterate in insertion order.
///
/// # Example
///
/// ```rust
/// use fsm_designer::core::{Automaton, StateOutcome, TransitionOutcome};
///
/// let mut automaton = Automaton::new();
/// automaton.declare_symbol("a").unwrap();
///
/// let outcome = automaton.declare_state("q0").unwrap();
/// assert_eq!(outcome, StateOutcome::Added { became_initial: true });
/// automaton.declare_state("q1").unwrap();
///
/// automaton.add_transition("a", "q0", "q1").unwrap();
/// let outcome = automaton.add_transition("a", "q0", "q0").unwrap();
/// assert_eq!(outcome, TransitionOutcome::Overridden { previous: "Q1".to_string() });
/// assert_eq!(automaton.initial_state(), Some("Q0"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Automaton {
    symbols: IndexSet<Symbol>,
    states: IndexMap<String, State>,
    initial: Option<String>,
    transitions: IndexMap<(Symbol, String), String>,
}

impl Automaton {
    /// Create an empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an automaton from its plain form, exactly as described.
    ///
    /// No auto-declaration or first-state policy applies here: every
    /// reference must already resolve, and duplicates are rejected.
    pub fn restore(data: AutomatonData) -> Result<Self, ModelError> {
        let mut automaton = Self::new();
        automaton.symbols.extend(data.symbols);

        for state in data.states {
            let name = canonical_state_name(state.name())?;
            if automaton.states.contains_key(&name) {
                return Err(ModelError::DuplicateState(name));
            }
            let is_final = state.is_final();
            automaton.states.insert(name.clone(), State::new(name, is_final));
        }

        if let Some(initial) = data.initial {
            let name = initial.to_ascii_uppercase();
            if !automaton.states.contains_key(&name) {
                return Err(ModelError::UndeclaredInitialState(name));
            }
            automaton.initial = Some(name);
        } else if let Some(first) = automaton.states.keys().next() {
            return Err(ModelError::MissingInitialState(first.clone()));
        }

        for transition in data.transitions {
            let (symbol, from, to) = automaton.resolve_transition(
                &transition.symbol.to_string(),
                &transition.from,
                &transition.to,
            )?;
            if automaton.transitions.contains_key(&(symbol, from.clone())) {
                return Err(ModelError::DuplicateTransition {
                    symbol: symbol.to_string(),
                    from,
                });
            }
            automaton.transitions.insert((symbol, from), to);
        }

        Ok(automaton)
    }

    /// Convert into the plain serializable form.
    pub fn to_data(&self) -> AutomatonData {
        AutomatonData {
            symbols: self.symbols.iter().copied().collect(),
            states: self.states.values().cloned().collect(),
            initial: self.initial.clone(),
            transitions: self.transitions().collect(),
        }
    }

    /// Declare an input symbol.
    pub fn declare_symbol(&mut self, token: &str) -> Result<SymbolOutcome, ModelError> {
        let symbol = Symbol::parse(token)?;
        if self.symbols.insert(symbol) {
            trace!(%symbol, "declared symbol");
            Ok(SymbolOutcome::Added)
        } else {
            Ok(SymbolOutcome::AlreadyDeclared)
        }
    }

    /// Declare a non-final state.
    ///
    /// The first state declared into an automaton without an initial state
    /// becomes the initial state.
    pub fn declare_state(&mut self, name: &str) -> Result<StateOutcome, ModelError> {
        let name = canonical_state_name(name)?;
        if self.states.contains_key(&name) {
            return Ok(StateOutcome::AlreadyDeclared);
        }
        let became_initial = self.insert_state(name, false);
        Ok(StateOutcome::Added { became_initial })
    }

    /// Set the initial state, declaring it first if needed.
    ///
    /// Replaces any previous initial state.
    pub fn set_initial_state(&mut self, name: &str) -> Result<InitialOutcome, ModelError> {
        let name = canonical_state_name(name)?;
        let auto_declared = !self.states.contains_key(&name);
        if auto_declared {
            self.insert_state(name.clone(), false);
        }
        trace!(state = %name, "set initial state");
        self.initial = Some(name);
        Ok(InitialOutcome { auto_declared })
    }

    /// Flag a state as final, declaring it first if needed.
    pub fn declare_final_state(&mut self, name: &str) -> Result<FinalOutcome, ModelError> {
        let name = canonical_state_name(name)?;
        match self.states.get_mut(&name) {
            Some(state) if state.is_final() => Ok(FinalOutcome::AlreadyFinal),
            Some(state) => {
                state.mark_final();
                trace!(state = %name, "marked final");
                Ok(FinalOutcome::Marked)
            }
            None => {
                let became_initial = self.insert_state(name, true);
                Ok(FinalOutcome::AutoDeclared { became_initial })
            }
        }
    }

    /// Add the transition `(symbol, from) -> to`.
    ///
    /// All three references must already be declared. An existing
    /// destination for the same key is replaced.
    pub fn add_transition(
        &mut self,
        symbol: &str,
        from: &str,
        to: &str,
    ) -> Result<TransitionOutcome, ModelError> {
        let (symbol, from, to) = self.resolve_transition(symbol, from, to)?;
        let outcome = match self.transitions.get_mut(&(symbol, from.clone())) {
            Some(existing) if *existing == to => TransitionOutcome::Duplicate,
            Some(existing) => TransitionOutcome::Overridden {
                previous: std::mem::replace(existing, to.clone()),
            },
            None => {
                self.transitions.insert((symbol, from.clone()), to.clone());
                TransitionOutcome::Added
            }
        };
        trace!(%symbol, %from, %to, ?outcome, "added transition");
        Ok(outcome)
    }

    /// Forget everything, including the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
        trace!("reset automaton");
    }

    /// Look up a declared symbol by character.
    pub fn symbol(&self, c: char) -> Option<Symbol> {
        Symbol::from_char(c).filter(|symbol| self.symbols.contains(symbol))
    }

    pub fn symbols(&self) -> &IndexSet<Symbol> {
        &self.symbols
    }

    pub fn states(&self) -> &IndexMap<String, State> {
        &self.states
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.get(&name.to_ascii_uppercase())
    }

    pub fn initial_state(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    /// Final states, in declaration order of the underlying states.
    pub fn final_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.values().filter(|state| state.is_final())
    }

    /// Destination of the transition leaving `from` on `symbol`, if any.
    pub fn destination(&self, symbol: Symbol, from: &str) -> Option<&str> {
        self.transitions
            .get(&(symbol, from.to_string()))
            .map(String::as_str)
    }

    /// All transitions, in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions
            .iter()
            .map(|((symbol, from), to)| Transition {
                symbol: *symbol,
                from: from.clone(),
                to: to.clone(),
            })
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Check if the automaton has been emptied (or never filled).
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
            && self.states.is_empty()
            && self.transitions.is_empty()
            && self.initial.is_none()
    }

    fn insert_state(&mut self, name: String, is_final: bool) -> bool {
        let became_initial = self.initial.is_none();
        if became_initial {
            self.initial = Some(name.clone());
        }
        trace!(state = %name, is_final, became_initial, "declared state");
        self.states.insert(name.clone(), State::new(name, is_final));
        became_initial
    }

    fn resolve_transition(
        &self,
        symbol: &str,
        from: &str,
        to: &str,
    ) -> Result<(Symbol, String, String), ModelError> {
        let symbol = Symbol::parse(symbol)
            .ok()
            .filter(|s| self.symbols.contains(s))
            .ok_or_else(|| ModelError::UndeclaredSymbol(symbol.to_ascii_uppercase()))?;

        let resolve = |name: &str, role: StateRole| {
            let name = name.to_ascii_uppercase();
            if self.states.contains_key(&name) {
                Ok(name)
            } else {
                Err(ModelError::UndeclaredState { role, name })
            }
        };

        Ok((symbol, resolve(from, StateRole::From)?, resolve(to, StateRole::To)?))
    }
}
