use clap::Args;
use crossterm::{cursor, execute};
use std::env;
use std::io::{self, IsTerminal, StdinLock, Write};
use std::time::Duration;

use bf_live::cli_util::print_execution_error;
use bf_live::render::{Highlight, LiveView, TraceTable};
use bf_live::{
    Cell, CellWidth, EngineConfig, InputSource, Interpreter, LineInput, Matching, NoopObserver,
    Program, Settings,
};

use super::load_source;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Redraw tape, program and output in place after every step
    #[arg(short = 'l', long = "live")]
    pub live: bool,

    /// Print a step-by-step table of operations to stderr
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Pause after every step, in milliseconds (fallback BF_DELAY_MS)
    #[arg(long = "delay", value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Cell width in bits: 8, 16, 32 or 64 (fallback BF_CELL_WIDTH; default 8)
    #[arg(long = "cell-width", value_name = "BITS")]
    pub cell_width: Option<CellWidth>,

    /// Pair loop brackets by nesting depth instead of scanning to the nearest one
    #[arg(long = "balanced")]
    pub balanced: bool,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

enum View {
    Quiet,
    Live(Highlight),
    Trace,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        file,
        live,
        debug,
        delay_ms,
        cell_width,
        balanced,
        code,
        ..
    } = args;

    if live && debug {
        eprintln!("{program}: --live and --debug cannot be combined");
        usage_and_exit(program, 2);
    }

    let source = match load_source(program, file, code, usage_and_exit) {
        Ok(s) => s,
        Err(code) => return code,
    };

    // Resolve settings: flags -> env -> bf.toml -> defaults
    let settings = Settings::load();
    let delay_ms = delay_ms
        .or_else(|| env_parse::<u64>("BF_DELAY_MS"))
        .or(settings.delay_ms)
        .unwrap_or(if live { 1 } else { 0 });
    let width = cell_width
        .or_else(|| env_parse::<CellWidth>("BF_CELL_WIDTH"))
        .or(settings.cell_width)
        .unwrap_or_default();
    let matching = if balanced {
        Matching::Balanced
    } else {
        env_parse::<Matching>("BF_MATCHING")
            .or(settings.matching)
            .unwrap_or_default()
    };

    let config = EngineConfig::new(Duration::from_millis(delay_ms), matching);
    let view = if live {
        if io::stderr().is_terminal() {
            View::Live(Highlight::ansi(settings.colors))
        } else {
            View::Live(Highlight::plain())
        }
    } else if debug {
        View::Trace
    } else {
        View::Quiet
    };

    let program_code = Program::parse(&source);
    match width {
        CellWidth::W8 => run_program::<u8>(program, program_code, config, view),
        CellWidth::W16 => run_program::<u16>(program, program_code, config, view),
        CellWidth::W32 => run_program::<u32>(program, program_code, config, view),
        CellWidth::W64 => run_program::<u64>(program, program_code, config, view),
    }
}

fn run_program<C: Cell>(program: &str, code: Program, config: EngineConfig, view: View) -> i32 {
    let stdin = io::stdin();
    let prompt = shows_prompt(stdin.is_terminal(), &view);
    let mut input = PromptedInput {
        lines: LineInput::new(stdin.lock()),
        prompt,
    };

    let mut bf: Interpreter<C> = Interpreter::with_program(code, config);
    let result = match view {
        View::Quiet => bf.run(&mut input, &mut NoopObserver),
        View::Live(hl) => {
            // Restore the terminal cursor when interrupted mid-run.
            if let Err(e) = ctrlc::set_handler(|| {
                let _ = execute!(io::stderr(), cursor::Show);
                let _ = io::stdout().flush();
                std::process::exit(130);
            }) {
                eprintln!("{program}: failed to set ctrl+c handler: {e}");
            }
            let mut live = LiveView::new(io::stderr(), hl);
            let result = bf.run(&mut input, &mut live);
            report_view_error(program, live.finish());
            result
        }
        View::Trace => {
            let mut table = TraceTable::new(io::stderr());
            let result = bf.run(&mut input, &mut table);
            report_view_error(program, table.finish());
            result
        }
    };

    match result {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            // For readability, ensure output ends with a newline
            let written = stdout
                .write_all(&output)
                .and_then(|_| stdout.write_all(b"\n"))
                .and_then(|_| stdout.flush());
            if let Err(e) = written {
                eprintln!("{program}: failed to write output: {e}");
                return 1;
            }
            0
        }
        Err(err) => {
            print_execution_error(Some(program), bf.program(), &err);
            1
        }
    }
}

/// Line input from stdin that shows a `> ` prompt on stderr for interactive use.
struct PromptedInput<'a> {
    lines: LineInput<StdinLock<'a>>,
    prompt: bool,
}

impl InputSource for PromptedInput<'_> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.prompt {
            let mut stderr = io::stderr();
            write!(stderr, "> ")?;
            stderr.flush()?;
        }
        self.lines.read_line()
    }
}

// The live view redraws a fixed number of lines in place; a prompt and its
// echoed answer between frames would be left behind on screen.
fn shows_prompt(stdin_is_terminal: bool, view: &View) -> bool {
    stdin_is_terminal && !matches!(view, View::Live(_))
}

fn report_view_error(program: &str, result: io::Result<()>) {
    if let Err(e) = result {
        eprintln!("{program}: failed to draw execution view: {e}");
        let _ = io::stderr().flush();
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [options] "<code>"
  {0} run [options] --file <PATH>

Options:
  --file,  -f <PATH>   Read Brainfuck code from PATH instead of positional "<code>"
  --live,  -l          Redraw tape, program and output in place after every step
  --debug, -d          Print a step-by-step table of operations to stderr
  --delay <MS>         Pause after every step (default 1 with --live, else 0)
  --cell-width <BITS>  Cell width: 8, 16, 32 or 64 (default 8)
  --balanced           Pair loop brackets by nesting depth
  --help,  -h          Show this help

Environment:
  BF_DELAY_MS, BF_CELL_WIDTH, BF_MATCHING=scan|balanced, BF_CONFIG=<PATH to bf.toml>

Notes:
- Characters outside of Brainfuck's ><+-.,[] are ignored.
- Input (`,`) reads one line from stdin and stores it as an integer; a missing
  or non-numeric line aborts the run.
- Moving the pointer left of cell 0 aborts the run.
- By default `[` jumps to the nearest `]` and `]` back to the nearest `[`,
  which ignores nesting. Use --balanced for depth-aware matching.

Examples:
- Load Brainfuck code from a file and watch it run:
    {0} run --live --delay 50 --file ./program.bf
- Feed numbers to `,` from a file:
    {0} run ",>,[-<+>]<." < numbers.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_only_for_terminal_stdin_outside_live_view() {
        assert!(shows_prompt(true, &View::Quiet));
        assert!(shows_prompt(true, &View::Trace));
        assert!(!shows_prompt(true, &View::Live(Highlight::plain())));
        assert!(!shows_prompt(false, &View::Quiet));
    }
}
