//! Assembly of raw input lines into command strings.

use std::io::{self, BufRead};

/// One unit of input handed to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Text up to and including the line holding the terminating `;`
    Command {
        text: String,
        start_line: usize,
        end_line: usize,
    },
    /// A line reading `EXIT` or `QUIT`
    Exit,
    /// Text that was never terminated by `;`
    Incomplete { text: String, start_line: usize },
}

/// Reads commands line by line from any buffered source.
///
/// Lines accumulate until one contains `;`. Between commands, blank lines
/// and lines starting with `;` are skipped, so scripts may carry comments.
/// An exit line ends the input; any text pending at that point, or at end of
/// input, is reported as [`Input::Incomplete`]. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD instead of failing the read.
///
/// # Example
///
/// ```rust
/// use fsm_designer::reader::{CommandReader, Input};
///
/// let source = "; comment\nSTATES q0\n  q1;\nEXIT\n";
/// let inputs: Vec<Input> = CommandReader::new(source.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(
///     inputs,
///     vec![
///         Input::Command {
///             text: "STATES q0\n  q1;\n".to_string(),
///             start_line: 2,
///             end_line: 3,
///         },
///         Input::Exit,
///     ]
/// );
/// ```
pub struct CommandReader<R> {
    reader: R,
    line_number: usize,
    exit_pending: bool,
    finished: bool,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            exit_pending: false,
            finished: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next command, exit request, or incomplete tail.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    pub fn next_input(&mut self) -> io::Result<Option<Input>> {
        if self.finished {
            return Ok(None);
        }
        if self.exit_pending {
            self.finished = true;
            return Ok(Some(Input::Exit));
        }

        let mut text = String::new();
        let mut start_line = 0;
        loop {
            let mut bytes = Vec::new();
            if self.reader.read_until(b'\n', &mut bytes)? == 0 {
                self.finished = true;
                return Ok((!text.is_empty()).then_some(Input::Incomplete { text, start_line }));
            }
            self.line_number += 1;
            let line = String::from_utf8_lossy(&bytes);

            let trimmed = line.trim();
            if is_exit(trimmed) {
                if text.is_empty() {
                    self.finished = true;
                    return Ok(Some(Input::Exit));
                }
                self.exit_pending = true;
                return Ok(Some(Input::Incomplete { text, start_line }));
            }
            if text.is_empty() {
                if trimmed.is_empty() || trimmed.starts_with(';') {
                    continue;
                }
                start_line = self.line_number;
            }

            text.push_str(&line);
            if line.contains(';') {
                return Ok(Some(Input::Command {
                    text,
                    start_line,
                    end_line: self.line_number,
                }));
            }
        }
    }
}

impl<R: BufRead> Iterator for CommandReader<R> {
    type Item = io::Result<Input>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_input().transpose()
    }
}

fn is_exit(line: &str) -> bool {
    let word = line.strip_suffix(';').unwrap_or(line).trim_end();
    word.eq_ignore_ascii_case("EXIT") || word.eq_ignore_ascii_case("QUIT")
}
