//! Parsing of raw command strings.

use thiserror::Error;

/// Errors that prevent a raw string from being parsed at all
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Commands must end with ';'")]
    Unterminated,
}

/// One comma-separated clause of a `TRANSITIONS` command, as raw tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionClause {
    pub tokens: Vec<String>,
}

impl TransitionClause {
    /// Split the clause into `(symbol, from, to)`.
    ///
    /// Tokens after the second are concatenated into the destination name.
    /// Returns `None` when fewer than three tokens are present.
    pub fn parts(&self) -> Option<(&str, &str, String)> {
        match self.tokens.as_slice() {
            [symbol, from, rest @ ..] if !rest.is_empty() => {
                Some((symbol.as_str(), from.as_str(), rest.concat()))
            }
            _ => None,
        }
    }
}

/// A command of the automaton language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Declare symbols, or list them when empty: `SYMBOLS [s ...];`
    Symbols(Vec<String>),
    /// Declare states, or list them when empty: `STATES [q ...];`
    States(Vec<String>),
    /// Set the initial state: `INITIAL-STATE q;`
    InitialState(String),
    /// Flag final states: `FINAL-STATES q ...;`
    FinalStates(Vec<String>),
    /// Add transitions: `TRANSITIONS s from to, ...;`
    Transitions(Vec<TransitionClause>),
    /// Run a word: `EXECUTE word;`
    Execute(String),
    /// Reset the automaton: `CLEAR;`
    Clear,
    /// Show the automaton: `PRINT;`
    Print,
    /// Start logging to a file, or stop when empty: `LOG [file];`
    Log(Option<String>),
    /// Save the automaton: `COMPILE file;`
    Compile(String),
    /// Load an automaton or replay a script: `LOAD file;`
    Load(String),
    /// Anything else; holds the command body
    Unsupported(String),
}

impl Command {
    /// Parse one raw command string.
    ///
    /// Everything up to the first `;` is the command body; anything after it
    /// is ignored. Keywords are case-insensitive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fsm_designer::command::{Command, ParseError};
    ///
    /// assert_eq!(
    ///     Command::parse("states q0  q1 ; ignored"),
    ///     Ok(Command::States(vec!["q0".to_string(), "q1".to_string()]))
    /// );
    /// assert_eq!(Command::parse("PRINT"), Err(ParseError::Unterminated));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let (body, _) = raw.split_once(';').ok_or(ParseError::Unterminated)?;
        let body = body.trim();
        let (keyword, rest) = match body.find(char::is_whitespace) {
            Some(at) => (&body[..at], body[at..].trim()),
            None => (body, ""),
        };

        let command = match keyword.to_ascii_uppercase().as_str() {
            "SYMBOLS" => Self::Symbols(tokens(rest)),
            "STATES" => Self::States(tokens(rest)),
            "INITIAL-STATE" => Self::InitialState(rest.to_string()),
            "FINAL-STATES" => Self::FinalStates(tokens(rest)),
            "TRANSITIONS" => Self::Transitions(clauses(rest)),
            "EXECUTE" => Self::Execute(rest.to_string()),
            "CLEAR" if rest.is_empty() => Self::Clear,
            "PRINT" if rest.is_empty() => Self::Print,
            "LOG" => Self::Log((!rest.is_empty()).then(|| rest.to_string())),
            "COMPILE" => Self::Compile(rest.to_string()),
            "LOAD" => Self::Load(rest.to_string()),
            _ => Self::Unsupported(body.to_string()),
        };
        Ok(command)
    }

    /// The keyword this command was written with, for logging.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Symbols(_) => "SYMBOLS",
            Self::States(_) => "STATES",
            Self::InitialState(_) => "INITIAL-STATE",
            Self::FinalStates(_) => "FINAL-STATES",
            Self::Transitions(_) => "TRANSITIONS",
            Self::Execute(_) => "EXECUTE",
            Self::Clear => "CLEAR",
            Self::Print => "PRINT",
            Self::Log(_) => "LOG",
            Self::Compile(_) => "COMPILE",
            Self::Load(_) => "LOAD",
            Self::Unsupported(_) => "UNSUPPORTED",
        }
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn clauses(text: &str) -> Vec<TransitionClause> {
    text.split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| TransitionClause {
            tokens: tokens(clause),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_semicolon_is_rejected() {
        assert_eq!(Command::parse("SYMBOLS a b"), Err(ParseError::Unterminated));
        assert_eq!(Command::parse(""), Err(ParseError::Unterminated));
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(Command::parse("print;"), Ok(Command::Print));
        assert_eq!(Command::parse("Clear ;"), Ok(Command::Clear));
        assert_eq!(
            Command::parse("initial-state q0;"),
            Ok(Command::InitialState("q0".to_string()))
        );
    }

    #[test]
    fn empty_lists_parse_as_queries() {
        assert_eq!(Command::parse("SYMBOLS;"), Ok(Command::Symbols(Vec::new())));
        assert_eq!(Command::parse("STATES   ;"), Ok(Command::States(Vec::new())));
        assert_eq!(Command::parse("LOG;"), Ok(Command::Log(None)));
    }

    #[test]
    fn tokens_split_on_any_whitespace() {
        assert_eq!(
            Command::parse("SYMBOLS a\tb\n  c;"),
            Ok(Command::Symbols(strings(&["a", "b", "c"])))
        );
    }

    #[test]
    fn multi_line_body_is_accepted() {
        assert_eq!(
            Command::parse("FINAL-STATES\nq1\nq2\n;\n"),
            Ok(Command::FinalStates(strings(&["q1", "q2"])))
        );
    }

    #[test]
    fn transitions_split_into_clauses() {
        let command = Command::parse("TRANSITIONS 0 q0 q1, 1 q0 q 2 ,, 1 q1;").unwrap();
        let Command::Transitions(clauses) = command else {
            panic!("Expected transitions");
        };
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].parts(), Some(("0", "q0", "q1".to_string())));
        assert_eq!(clauses[1].parts(), Some(("1", "q0", "q2".to_string())));
        assert_eq!(clauses[2].parts(), None);
        assert_eq!(clauses[2].tokens, strings(&["1", "q1"]));
    }

    #[test]
    fn text_after_semicolon_is_ignored() {
        assert_eq!(
            Command::parse("EXECUTE 0101; EXECUTE 1;"),
            Ok(Command::Execute("0101".to_string()))
        );
    }

    #[test]
    fn unknown_keyword_is_unsupported() {
        assert_eq!(
            Command::parse("FROBNICATE now;"),
            Ok(Command::Unsupported("FROBNICATE now".to_string()))
        );
        assert_eq!(
            Command::parse("SYMBOLSX;"),
            Ok(Command::Unsupported("SYMBOLSX".to_string()))
        );
        assert_eq!(
            Command::parse("CLEAR everything;"),
            Ok(Command::Unsupported("CLEAR everything".to_string()))
        );
    }

    #[test]
    fn file_commands_keep_their_argument() {
        assert_eq!(
            Command::parse("LOG  session.txt ;"),
            Ok(Command::Log(Some("session.txt".to_string())))
        );
        assert_eq!(
            Command::parse("COMPILE out.fs;"),
            Ok(Command::Compile("out.fs".to_string()))
        );
        assert_eq!(Command::parse("LOAD;"), Ok(Command::Load(String::new())));
    }
}
