use clap::Args;
use std::io::{self, Write};

use bf_live::normalize;

use super::load_source;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct StripArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: StripArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let source = match load_source(program, args.file, args.code, usage_and_exit) {
        Ok(s) => s,
        Err(code) => return code,
    };

    println!("{}", normalize(&source));
    let _ = io::stdout().flush();
    0
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} strip "<code>"
  {0} strip --file <PATH>

Options:
  --file,  -f <PATH>  Read Brainfuck code from PATH instead of positional "<code>"
  --help,  -h         Show this help

Description:
  Prints the program with every character outside ><+-.,[] removed.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
