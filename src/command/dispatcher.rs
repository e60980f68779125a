//! Routing of parsed commands to the automaton, the engine and the sinks.

use crate::command::diagnostic::{Diagnostic, Report};
use crate::command::parse::{Command, TransitionClause};
use crate::core::{Automaton, FinalOutcome, State, StateOutcome, SymbolOutcome, TransitionOutcome};
use crate::execution::{simulate, Verdict};
use crate::reader::{CommandReader, Input};
use crate::snapshot::{self, Snapshot, SnapshotFormat};
use crate::transcript::Transcript;
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// How deeply `LOAD` may nest inside loaded scripts.
pub const MAX_LOAD_DEPTH: usize = 8;

/// Interpreter for the command language.
///
/// The dispatcher owns the automaton being edited and the transcript sink.
/// Every diagnostic is written to the console and, when logging is enabled,
/// to the transcript. Processing a command never fails: problems are turned
/// into diagnostics and the session continues.
///
/// # Example
///
/// ```rust
/// use fsm_designer::command::Dispatcher;
///
/// let mut dispatcher = Dispatcher::new(Vec::new());
/// dispatcher.process("SYMBOLS a;");
/// dispatcher.process("STATES s;");
/// dispatcher.process("FINAL-STATES s;");
/// dispatcher.process("TRANSITIONS a s s;");
///
/// let report = dispatcher.process("EXECUTE aaa;");
/// assert_eq!(report.lines(), vec!["S S S S", "YES"]);
/// ```
pub struct Dispatcher<W: Write> {
    automaton: Automaton,
    transcript: Transcript,
    console: W,
    pending: Vec<Diagnostic>,
    load_depth: usize,
}

impl Dispatcher<io::Stdout> {
    /// Create a dispatcher printing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Dispatcher<W> {
    /// Create a dispatcher with an empty automaton.
    pub fn new(console: W) -> Self {
        Self::with_automaton(Automaton::new(), console)
    }

    /// Create a dispatcher editing an existing automaton.
    pub fn with_automaton(automaton: Automaton, console: W) -> Self {
        Self {
            automaton,
            transcript: Transcript::new(),
            console,
            pending: Vec::new(),
            load_depth: 0,
        }
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn console_mut(&mut self) -> &mut W {
        &mut self.console
    }

    /// Consume the dispatcher, returning the automaton and the console.
    pub fn into_parts(self) -> (Automaton, W) {
        (self.automaton, self.console)
    }

    /// Parse and handle one raw command string.
    pub fn process(&mut self, raw: &str) -> Report {
        self.dispatch_raw(raw);
        Report::new(std::mem::take(&mut self.pending))
    }

    /// Handle an already parsed command.
    pub fn execute(&mut self, command: Command) -> Report {
        self.dispatch(command);
        Report::new(std::mem::take(&mut self.pending))
    }

    /// Write a line that does not belong to any command, such as a banner.
    pub fn notify(&mut self, diagnostic: &Diagnostic) {
        self.write_sinks(diagnostic);
    }

    fn dispatch_raw(&mut self, raw: &str) {
        match Command::parse(raw) {
            Ok(command) => self.dispatch(command),
            Err(e) => self.emit(Diagnostic::error(e.to_string())),
        }
    }

    fn dispatch(&mut self, command: Command) {
        debug!(keyword = command.keyword(), "dispatching command");
        match command {
            Command::Symbols(tokens) if tokens.is_empty() => self.list_symbols(),
            Command::Symbols(tokens) => self.declare_symbols(&tokens),
            Command::States(names) if names.is_empty() => self.list_states(),
            Command::States(names) => self.declare_states(&names),
            Command::InitialState(name) => self.set_initial_state(&name),
            Command::FinalStates(names) => self.declare_final_states(&names),
            Command::Transitions(clauses) => self.add_transitions(&clauses),
            Command::Execute(input) => self.execute_word(&input),
            Command::Clear => {
                self.automaton.reset();
                self.emit(Diagnostic::output("FSM cleared."));
            }
            Command::Print => self.print(),
            Command::Log(target) => self.log(target.as_deref()),
            Command::Compile(path) => self.compile(&path),
            Command::Load(path) => self.load(&path),
            Command::Unsupported(body) => {
                self.emit(Diagnostic::error(format!(
                    "Unsupported or Invalid Command: {body}"
                )));
            }
        }
    }

    fn list_symbols(&mut self) {
        let symbols = braces(self.automaton.symbols().iter());
        self.emit(Diagnostic::output(format!("Current symbols: {symbols}")));
    }

    fn declare_symbols(&mut self, tokens: &[String]) {
        for token in tokens {
            match self.automaton.declare_symbol(token) {
                Ok(SymbolOutcome::Added) => {}
                Ok(SymbolOutcome::AlreadyDeclared) => self.emit(Diagnostic::warning(format!(
                    "Symbol '{token}' was already declared."
                ))),
                Err(e) => self.emit(Diagnostic::warning(e.to_string())),
            }
        }
    }

    fn list_states(&mut self) {
        let states = braces(self.automaton.states().keys());
        let initial = self.automaton.initial_state().unwrap_or("Not Set").to_string();
        let finals = braces(self.automaton.final_states().map(State::name));
        self.emit(Diagnostic::output(format!("Current states: {states}")));
        self.emit(Diagnostic::output(format!("Initial State: {initial}")));
        self.emit(Diagnostic::output(format!("Final States: {finals}")));
    }

    fn declare_states(&mut self, names: &[String]) {
        for name in names {
            match self.automaton.declare_state(name) {
                Ok(StateOutcome::Added { became_initial }) => {
                    if became_initial {
                        self.report_implicit_initial(name);
                    }
                }
                Ok(StateOutcome::AlreadyDeclared) => self.emit(Diagnostic::warning(format!(
                    "State '{}' was already declared.",
                    name.to_ascii_uppercase()
                ))),
                Err(e) => self.emit(Diagnostic::warning(e.to_string())),
            }
        }
    }

    fn set_initial_state(&mut self, name: &str) {
        if name.is_empty() {
            self.emit(Diagnostic::error("No initial state provided."));
            return;
        }
        match self.automaton.set_initial_state(name) {
            Ok(outcome) => {
                let name = name.to_ascii_uppercase();
                if outcome.auto_declared {
                    self.report_auto_declared(&name);
                }
                self.emit(Diagnostic::output(format!("Initial state set to '{name}'.")));
            }
            Err(e) => self.emit(Diagnostic::warning(e.to_string())),
        }
    }

    fn declare_final_states(&mut self, names: &[String]) {
        if names.is_empty() {
            self.emit(Diagnostic::error("No final states provided."));
            return;
        }
        for name in names {
            match self.automaton.declare_final_state(name) {
                Ok(FinalOutcome::Marked) => {}
                Ok(FinalOutcome::AutoDeclared { became_initial }) => {
                    self.report_auto_declared(&name.to_ascii_uppercase());
                    if became_initial {
                        self.report_implicit_initial(name);
                    }
                }
                Ok(FinalOutcome::AlreadyFinal) => self.emit(Diagnostic::warning(format!(
                    "State '{}' was already declared as a final state.",
                    name.to_ascii_uppercase()
                ))),
                Err(e) => self.emit(Diagnostic::warning(e.to_string())),
            }
        }
    }

    fn add_transitions(&mut self, clauses: &[TransitionClause]) {
        if clauses.is_empty() {
            self.emit(Diagnostic::error("No transitions provided."));
            return;
        }
        for clause in clauses {
            let Some((symbol, from, to)) = clause.parts() else {
                self.emit(Diagnostic::error(format!(
                    "Transition must have 3 parts. Found: [{}]",
                    clause.tokens.join(", ")
                )));
                continue;
            };

            let symbol = symbol.to_ascii_uppercase();
            let from = from.to_ascii_uppercase();
            let to = to.to_ascii_uppercase();
            match self.automaton.add_transition(&symbol, &from, &to) {
                Ok(TransitionOutcome::Added) => {}
                Ok(TransitionOutcome::Duplicate) => self.emit(Diagnostic::warning(format!(
                    "Duplicate transition <{symbol},{from},{to}> already exists"
                ))),
                Ok(TransitionOutcome::Overridden { previous }) => {
                    self.emit(Diagnostic::warning(format!(
                        "Overriding existing transition for <{symbol},{from}> from {previous} to {to}"
                    )))
                }
                Err(e) => self.emit(Diagnostic::error(e.to_string())),
            }
        }
    }

    fn execute_word(&mut self, input: &str) {
        let run = simulate(&self.automaton, input);
        if let Some(trace) = &run.trace {
            self.emit(Diagnostic::output(trace.to_string()));
        }
        let diagnostic = match &run.verdict {
            Verdict::Error(e) => Diagnostic::error(e.to_string()),
            verdict => Diagnostic::output(verdict.to_string()),
        };
        self.emit(diagnostic);
    }

    fn print(&mut self) {
        let automaton = &self.automaton;
        let mut lines = vec![
            "---- FSM CURRENT STATE ----".to_string(),
            format!("Symbols: {}", braces(automaton.symbols().iter())),
            format!("States: {}", braces(automaton.states().keys())),
            format!(
                "Initial State: {}",
                automaton.initial_state().unwrap_or("Not Set")
            ),
            format!(
                "Final States: {}",
                braces(automaton.final_states().map(State::name))
            ),
            "Transitions:".to_string(),
        ];
        lines.extend(
            automaton
                .transitions()
                .map(|t| format!("  On '{}' from {} to {}", t.symbol, t.from, t.to)),
        );
        lines.push("----------------------------".to_string());

        for line in lines {
            self.emit(Diagnostic::output(line));
        }
    }

    fn log(&mut self, target: Option<&str>) {
        match target {
            None => {
                let message = if self.transcript.stop() {
                    "STOPPED LOGGING"
                } else {
                    "LOGGING was not enabled"
                };
                self.emit(Diagnostic::output(message));
            }
            Some(path) => {
                if let Err(e) = self.transcript.start(path) {
                    warn!(path, error = %e, "cannot open transcript");
                    self.emit(Diagnostic::error(format!("Cannot open log file: {path}")));
                }
            }
        }
    }

    fn compile(&mut self, path: &str) {
        if path.is_empty() {
            self.emit(Diagnostic::error("No filename provided."));
            return;
        }
        match snapshot::save(&self.automaton, Path::new(path)) {
            Ok(format) => self.emit(Diagnostic::output(format!(
                "FSM saved to {format} file: {path}"
            ))),
            Err(e) => self.emit(Diagnostic::error(format!(
                "Could not save to file {path}: {e}"
            ))),
        }
    }

    fn load(&mut self, path: &str) {
        if path.is_empty() {
            self.emit(Diagnostic::error("No filename provided."));
            return;
        }
        if self.load_depth >= MAX_LOAD_DEPTH {
            self.emit(Diagnostic::error(format!(
                "Cannot load {path}: scripts nested more than {MAX_LOAD_DEPTH} levels deep"
            )));
            return;
        }

        let format = SnapshotFormat::from_path(Path::new(path));
        let loaded = match format {
            SnapshotFormat::Script => File::open(path)
                .map(|file| self.replay(BufReader::new(file), path))
                .map_err(|e| e.to_string()),
            SnapshotFormat::Binary | SnapshotFormat::Json => {
                Snapshot::read(Path::new(path), format)
                    .and_then(Snapshot::restore)
                    .map(|automaton| self.automaton = automaton)
                    .map_err(|e| e.to_string())
            }
        };

        match loaded {
            Ok(()) => {
                info!(path, %format, "loaded automaton");
                self.emit(Diagnostic::output(format!(
                    "FSM loaded from {format} file: {path}"
                )));
            }
            Err(e) => self.emit(Diagnostic::error(format!(
                "Could not load from file {path}: {e}"
            ))),
        }
    }

    /// Run every command of a script through this dispatcher.
    fn replay<R: BufRead>(&mut self, reader: R, origin: &str) {
        self.load_depth += 1;
        let mut reader = CommandReader::new(reader);
        loop {
            match reader.next_input() {
                Ok(Some(Input::Command { text, .. })) => self.dispatch_raw(&text),
                Ok(Some(Input::Incomplete { start_line, .. })) => {
                    self.emit(Diagnostic::warning(format!(
                        "Incomplete command in {origin} at line {start_line}, missing semicolon"
                    )))
                }
                Ok(Some(Input::Exit)) | Ok(None) => break,
                Err(e) => {
                    self.emit(Diagnostic::error(format!(
                        "Could not read {origin} after line {}: {e}",
                        reader.line_number()
                    )));
                    break;
                }
            }
        }
        self.load_depth -= 1;
    }

    fn report_implicit_initial(&mut self, name: &str) {
        self.emit(Diagnostic::info(format!(
            "Initial state set to '{}'.",
            name.to_ascii_uppercase()
        )));
    }

    fn report_auto_declared(&mut self, name: &str) {
        self.emit(Diagnostic::warning(format!(
            "State '{name}' was not previously declared, added automatically."
        )));
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        self.write_sinks(&diagnostic);
        self.pending.push(diagnostic);
    }

    fn write_sinks(&mut self, diagnostic: &Diagnostic) {
        let line = diagnostic.to_string();
        if let Err(e) = writeln!(self.console, "{line}").and_then(|()| self.console.flush()) {
            warn!(error = %e, "console write failed");
        }
        self.transcript.write(&line);
    }
}

fn braces<I>(mut items: I) -> String
where
    I: Iterator,
    I::Item: std::fmt::Display,
{
    format!("{{{}}}", items.join(", "))
}
