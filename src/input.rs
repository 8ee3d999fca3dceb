//! Line-oriented input for the `,` instruction.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Supplies one line of text per `,` instruction.
///
/// `Ok(None)` means the source is exhausted.
pub trait InputSource {
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

/// Reads lines from any buffered reader, e.g. locked stdin.
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line)? {
            0 => Ok(None),
            _ => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Ok(Some(line))
            }
        }
    }
}

/// In-memory lines, handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// An input source with no lines; any `,` faults.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn line_input_strips_line_endings() {
        let mut input = LineInput::new(Cursor::new("42\r\n7\nlast"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("42"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("7"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn scripted_input_drains_in_order() {
        let mut input = ScriptedInput::new(["1", "2"]);
        assert_eq!(input.read_line().unwrap().as_deref(), Some("1"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("2"));
        assert_eq!(input.read_line().unwrap(), None);
    }
}
