use std::io::{self, Write};

use crate::interpreter::ExecutionError;
use crate::program::Program;

/// Pretty-print an [`ExecutionError`] with caret positioning.
/// If `program` is `Some("bf")`, prefix messages with "bf: ...".
pub fn print_execution_error(program: Option<&str>, code: &Program, err: &ExecutionError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    let msg = match err {
        ExecutionError::PointerUnderflow { .. } => {
            prefix_program("Runtime error: pointer moved left of cell 0")
        }
        ExecutionError::InputUnavailable { .. } => {
            prefix_program("Input error: no input line available")
        }
        ExecutionError::InputRead { source, .. } => prefix_program(&format!("I/O error: {source}")),
        ExecutionError::InvalidInput { line, max, .. } => prefix_program(&format!(
            "Input error: '{line}' is not an integer from 0 to {max}"
        )),
    };
    print_error_with_context(&msg, &code.to_string(), err.step());
}

/// Print a concise error with instruction index and a caret context window.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    let _ = write_error_with_context(&mut io::stderr().lock(), prefix, code, pos);
}

/// Write the error line, a window of up to 32 instructions either side of
/// `pos`, and a caret under `pos`.
pub fn write_error_with_context<W: Write>(out: &mut W, prefix: &str, code: &str, pos: usize) -> io::Result<()> {
    writeln!(out, "{prefix} at instruction {pos}")?;

    const WINDOW_CHARS: usize = 32;

    let chars: Vec<char> = code.chars().collect();
    let start = pos.saturating_sub(WINDOW_CHARS).min(chars.len());
    let end = (pos + WINDOW_CHARS + 1).min(chars.len());
    let slice: String = chars[start..end].iter().collect();
    writeln!(out, "  {slice}")?;

    let caret_offset = pos.saturating_sub(start);
    writeln!(out, "  {}^", " ".repeat(caret_offset))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(code: &str, pos: usize) -> String {
        let mut out = Vec::new();
        write_error_with_context(&mut out, "boom", code, pos).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn caret_points_at_position() {
        assert_eq!(render(">+<<", 3), "boom at instruction 3\n  >+<<\n     ^\n");
    }

    #[test]
    fn long_programs_are_windowed() {
        let code = "+".repeat(100);
        let text = render(&code, 50);
        let window = text.lines().nth(1).unwrap();
        assert_eq!(window.trim().len(), 65);
        assert_eq!(text.lines().nth(2).unwrap(), format!("  {}^", " ".repeat(32)));
    }

    #[test]
    fn position_past_the_end_is_tolerated() {
        let text = render("+", 5);
        assert!(text.starts_with("boom at instruction 5"));
    }
}
