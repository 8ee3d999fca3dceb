pub mod run;
pub mod strip;

use std::fs;
use std::io::{self, Write};

/// Resolve program source from `--file` or the concatenated positional parts.
///
/// Returns the exit code to use on failure; usage errors print `usage`.
pub(crate) fn load_source(
    program: &str,
    file: Option<String>,
    code: Vec<String>,
    usage: fn(&str, i32) -> !,
) -> Result<String, i32> {
    if file.is_none() && code.is_empty() {
        usage(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        usage(program, 2);
    }

    match file {
        // Operators are ASCII; invalid UTF-8 can only sit in comments.
        Some(path) => fs::read(&path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|e| {
                eprintln!("{program}: failed to read code file: {e}");
                let _ = io::stderr().flush();
                1
            }),
        None => Ok(code.join("")),
    }
}
