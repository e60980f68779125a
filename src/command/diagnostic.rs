//! Diagnostics emitted while processing commands.

use std::fmt;

/// Category of an emitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// The command, or one of its clauses, was skipped
    Error,
    /// The command proceeded but the user should check the input
    Warning,
    /// Informational notice about an implicit change
    Info,
    /// Requested output (listings, traces, verdicts)
    Output,
}

/// A single line of feedback for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(Level::Output, message)
    }

    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Error => write!(f, "Error: {}", self.message),
            Level::Warning => write!(f, "Warning: {}", self.message),
            Level::Info => write!(f, "Info: {}", self.message),
            Level::Output => f.write_str(&self.message),
        }
    }
}

/// Everything one command emitted, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub(crate) fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics of one level, in order.
    pub fn of_level(&self, level: Level) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(move |d| d.level == level)
    }

    pub fn has_errors(&self) -> bool {
        self.of_level(Level::Error).next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.of_level(Level::Warning).next().is_some()
    }

    /// The rendered lines, as the user sees them.
    pub fn lines(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_by_level() {
        assert_eq!(Diagnostic::error("bad").to_string(), "Error: bad");
        assert_eq!(Diagnostic::warning("hmm").to_string(), "Warning: hmm");
        assert_eq!(Diagnostic::info("fyi").to_string(), "Info: fyi");
        assert_eq!(Diagnostic::output("YES").to_string(), "YES");
    }

    #[test]
    fn report_filters_levels() {
        let report = Report::new(vec![
            Diagnostic::warning("w"),
            Diagnostic::output("o"),
            Diagnostic::warning("w2"),
        ]);
        assert!(report.has_warnings());
        assert!(!report.has_errors());
        assert_eq!(report.of_level(Level::Warning).count(), 2);
        assert_eq!(report.lines(), vec!["Warning: w", "o", "Warning: w2"]);
    }
}
