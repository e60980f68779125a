//! Transcript logging of session output to a file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Optional copy of every diagnostic and result line, written to a file.
///
/// A transcript owns at most one open file. Starting a new transcript closes
/// the previous one first; dropping the transcript flushes and closes it.
///
/// # Example
///
/// ```rust
/// use fsm_designer::transcript::Transcript;
///
/// let dir = std::env::temp_dir();
/// let path = dir.join("fsm-designer-doc-transcript.txt");
///
/// let mut transcript = Transcript::new();
/// assert!(!transcript.is_enabled());
///
/// transcript.start(&path).unwrap();
/// transcript.write("hello");
/// assert!(transcript.stop());
///
/// assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
/// # std::fs::remove_file(&path).ok();
/// ```
#[derive(Debug, Default)]
pub struct Transcript {
    target: Option<(PathBuf, BufWriter<File>)>,
}

impl Transcript {
    /// Create a disabled transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start writing to `path`, truncating it.
    ///
    /// Any previous target is closed first, even if opening the new one
    /// fails.
    pub fn start(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        self.stop();
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!(path = %path.display(), "transcript started");
        self.target = Some((path.to_path_buf(), BufWriter::new(file)));
        Ok(())
    }

    /// Stop writing. Returns `true` if a transcript was active.
    pub fn stop(&mut self) -> bool {
        match self.target.take() {
            Some((path, mut writer)) => {
                if let Err(e) = writer.flush() {
                    warn!(path = %path.display(), error = %e, "failed to flush transcript");
                }
                debug!(path = %path.display(), "transcript stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    /// Path of the active transcript file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.target.as_ref().map(|(path, _)| path.as_path())
    }

    /// Append one line.
    ///
    /// A failing write disables the transcript rather than interrupting the
    /// session.
    pub fn write(&mut self, line: &str) {
        let Some((path, writer)) = &mut self.target else {
            return;
        };
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            warn!(path = %path.display(), error = %e, "transcript write failed, disabling");
            self.target = None;
        }
    }
}

impl Drop for Transcript {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn disabled_transcript_ignores_writes() {
        let mut transcript = Transcript::new();
        transcript.write("nothing");
        assert!(!transcript.is_enabled());
        assert!(!transcript.stop());
    }

    #[test]
    fn restart_closes_previous_target() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");

        let mut transcript = Transcript::new();
        transcript.start(&first).unwrap();
        transcript.write("one");
        transcript.start(&second).unwrap();
        transcript.write("two");
        assert_eq!(transcript.path(), Some(second.as_path()));
        drop(transcript);

        assert_eq!(fs::read_to_string(first).unwrap(), "one\n");
        assert_eq!(fs::read_to_string(second).unwrap(), "two\n");
    }

    #[test]
    fn failed_start_leaves_transcript_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.log");
        let bad = dir.path().join("missing").join("bad.log");

        let mut transcript = Transcript::new();
        transcript.start(&good).unwrap();
        assert!(transcript.start(&bad).is_err());
        assert!(!transcript.is_enabled());
    }
}
