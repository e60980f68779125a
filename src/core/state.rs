//! Automaton states.
//!
//! A state is identified by its canonical (uppercase) name and carries a
//! single mutable property, whether it is final. Membership in the initial
//! position is recorded on the automaton, not on the state.

use super::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validate a state name and return its canonical form.
///
/// Names are one or more ASCII alphanumeric characters and are compared
/// case-insensitively.
///
/// # Example
///
/// ```rust
/// use fsm_designer::core::canonical_state_name;
///
/// assert_eq!(canonical_state_name("q0").unwrap(), "Q0");
/// assert!(canonical_state_name("q-0").is_err());
/// assert!(canonical_state_name("").is_err());
/// ```
pub fn canonical_state_name(name: &str) -> Result<String, ModelError> {
    let canonical = name.to_ascii_uppercase();
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(canonical)
    } else {
        Err(ModelError::InvalidState(canonical))
    }
}

/// A named node of the automaton.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct State {
    name: String,
    is_final: bool,
}

impl State {
    /// Create a state from a name that is already canonical.
    pub(crate) fn new(name: String, is_final: bool) -> Self {
        Self { name, is_final }
    }

    /// Get the state's canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if reaching this state at end of input accepts the word.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub(crate) fn mark_final(&mut self) {
        self.is_final = true;
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_is_uppercase() {
        assert_eq!(canonical_state_name("start").unwrap(), "START");
        assert_eq!(canonical_state_name("Q10").unwrap(), "Q10");
        assert_eq!(canonical_state_name("42").unwrap(), "42");
    }

    #[test]
    fn invalid_names_are_reported_in_canonical_form() {
        assert_eq!(
            canonical_state_name("q_1"),
            Err(ModelError::InvalidState("Q_1".to_string()))
        );
        assert!(canonical_state_name(" ").is_err());
    }

    #[test]
    fn mark_final_sets_flag() {
        let mut state = State::new("Q1".to_string(), false);
        assert!(!state.is_final());

        state.mark_final();
        assert!(state.is_final());
        assert_eq!(state.name(), "Q1");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = State::new("Q2".to_string(), true);
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: State = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
