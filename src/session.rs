//! Interactive session loop.

use crate::command::{Diagnostic, Dispatcher};
use crate::reader::{CommandReader, Input};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use tracing::debug;
use tracing::level_filters::LevelFilter;

/// Settings for one interpreter session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Prompt printed before each command; empty disables prompting
    pub prompt: String,
    /// Print the version banner on start
    pub show_banner: bool,
    /// Developer log level, written to stderr
    pub verbosity: LevelFilter,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "? ".to_string(),
            show_banner: true,
            verbosity: LevelFilter::WARN,
        }
    }
}

/// The start-up banner, e.g. `FSM DESIGNER 0.1.0 March 4, 2025, 09:30`.
pub fn banner<Tz>(now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "FSM DESIGNER {} {}",
        env!("CARGO_PKG_VERSION"),
        now.format("%B %-d, %Y, %H:%M")
    )
}

/// Read commands from `input` until exit or end of input.
///
/// An unterminated command at the end is reported as a warning. I/O errors
/// on the input end the session and are returned; everything else is
/// handled by the dispatcher.
pub fn run<R, W>(
    config: &SessionConfig,
    input: R,
    dispatcher: &mut Dispatcher<W>,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut reader = CommandReader::new(input);
    loop {
        if !config.prompt.is_empty() {
            let console = dispatcher.console_mut();
            write!(console, "{}", config.prompt)?;
            console.flush()?;
        }

        match reader.next_input()? {
            Some(Input::Command {
                text,
                start_line,
                end_line,
            }) => {
                debug!(start_line, end_line, "read command");
                dispatcher.process(&text);
            }
            Some(Input::Incomplete { start_line, .. }) => {
                dispatcher.notify(&Diagnostic::warning(format!(
                    "Incomplete command starting at line {start_line}, missing semicolon"
                )));
            }
            Some(Input::Exit) | None => {
                dispatcher.notify(&Diagnostic::output("TERMINATED BY USER"));
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn quiet() -> SessionConfig {
        SessionConfig {
            prompt: String::new(),
            ..SessionConfig::default()
        }
    }

    fn console_text(dispatcher: Dispatcher<Vec<u8>>) -> String {
        let (_, console) = dispatcher.into_parts();
        String::from_utf8(console).unwrap()
    }

    #[test]
    fn banner_formats_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 9, 5, 0).unwrap();
        assert_eq!(
            banner(now),
            format!("FSM DESIGNER {} March 4, 2024, 09:05", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn session_runs_until_exit() {
        let mut dispatcher = Dispatcher::new(Vec::new());
        let input = "SYMBOLS a;\nEXIT\nSYMBOLS b;\n";
        run(&quiet(), input.as_bytes(), &mut dispatcher).unwrap();

        assert_eq!(dispatcher.automaton().symbols().len(), 1);
        assert!(console_text(dispatcher).ends_with("TERMINATED BY USER\n"));
    }

    #[test]
    fn session_warns_about_unterminated_tail() {
        let mut dispatcher = Dispatcher::new(Vec::new());
        run(&quiet(), "STATES q0\nq1".as_bytes(), &mut dispatcher).unwrap();

        assert!(dispatcher.automaton().states().is_empty());
        let text = console_text(dispatcher);
        assert!(text.contains("Warning: Incomplete command starting at line 1, missing semicolon"));
    }

    #[test]
    fn prompt_is_written_before_each_command() {
        let mut dispatcher = Dispatcher::new(Vec::new());
        run(&SessionConfig::default(), "PRINT;\n".as_bytes(), &mut dispatcher).unwrap();

        let text = console_text(dispatcher);
        assert!(text.starts_with("? ---- FSM CURRENT STATE ----"));
        assert!(text.ends_with("? TERMINATED BY USER\n"));
    }

    #[test]
    fn invalid_bytes_do_not_end_session() {
        let mut dispatcher = Dispatcher::new(Vec::new());
        let input: &[u8] = b"SYMBOLS \xff;\nSYMBOLS a;\nEXIT\n";
        run(&quiet(), input, &mut dispatcher).unwrap();

        assert_eq!(dispatcher.automaton().symbols().len(), 1);
        let text = console_text(dispatcher);
        assert!(text.contains("Warning: Invalid symbol '\u{FFFD}'"));
        assert!(text.ends_with("TERMINATED BY USER\n"));
    }
}
