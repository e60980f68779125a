//! Rendering an automaton back into the command language.

use crate::core::{Automaton, State};
use itertools::Itertools;

impl Automaton {
    /// Render the automaton as a replayable command script.
    ///
    /// Empty sections are omitted, since an empty `SYMBOLS;` or `STATES;`
    /// would be a query rather than a declaration. Transitions are written
    /// one clause per line.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fsm_designer::builder::AutomatonBuilder;
    ///
    /// let automaton = AutomatonBuilder::new()
    ///     .symbols(["0"])
    ///     .states(["q0", "q1"])
    ///     .finals(["q1"])
    ///     .transition("0", "q0", "q1")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     automaton.to_script(),
    ///     "SYMBOLS 0;\nSTATES Q0 Q1;\nINITIAL-STATE Q0;\nFINAL-STATES Q1;\nTRANSITIONS 0 Q0 Q1;\n"
    /// );
    /// ```
    pub fn to_script(&self) -> String {
        let mut script = String::new();

        if !self.symbols().is_empty() {
            let symbols = self.symbols().iter().join(" ");
            script.push_str(&format!("SYMBOLS {symbols};\n"));
        }
        if !self.states().is_empty() {
            let states = self.states().keys().join(" ");
            script.push_str(&format!("STATES {states};\n"));
        }
        if let Some(initial) = self.initial_state() {
            script.push_str(&format!("INITIAL-STATE {initial};\n"));
        }

        let finals = self.final_states().map(State::name).join(" ");
        if !finals.is_empty() {
            script.push_str(&format!("FINAL-STATES {finals};\n"));
        }

        let clauses = self
            .transitions()
            .map(|t| format!("{} {} {}", t.symbol, t.from, t.to))
            .join(",\n    ");
        if !clauses.is_empty() {
            script.push_str(&format!("TRANSITIONS {clauses};\n"));
        }

        script
    }
}
