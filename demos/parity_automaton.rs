//! Parity Automaton
//!
//! This example builds an automaton that accepts binary words containing an
//! even number of ones, then runs a few words through it.
//!
//! Key concepts:
//! - Programmatic construction with `AutomatonBuilder`
//! - Pure simulation with a trace of visited states
//! - Accept, reject and error verdicts
//!
//! Run with: cargo run --example parity_automaton

use fsm_designer::builder::AutomatonBuilder;
use fsm_designer::execution::simulate;

fn main() {
    println!("=== Parity Automaton Example ===\n");

    let automaton = AutomatonBuilder::new()
        .symbols(["0", "1"])
        .states(["even", "odd"])
        .finals(["even"])
        .transition("0", "even", "even")
        .transition("1", "even", "odd")
        .transition("0", "odd", "odd")
        .transition("1", "odd", "even")
        .build()
        .unwrap();

    println!("Script form:\n{}", automaton.to_script());

    // "2" is not a declared symbol, so its run ends in an error
    for word in ["0110", "100", "11", "12"] {
        let run = simulate(&automaton, word);
        let trace = run.trace.map(|t| t.to_string()).unwrap_or_default();
        println!("{word:>5}: {trace} -> {}", run.verdict);
    }

    println!("\n=== Example Complete ===");
}
