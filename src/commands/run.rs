use clap::Args;
use std::fs;
use std::io::{self, Write};
use tracing::debug;
use crate::cli_util::execute_program;
use crate::commands::ModeArgs;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Read code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// Concatenated code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs { file, mode, code, .. } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        usage_and_exit(program, 2);
    }

    let code_str = if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read code file as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        }
    } else {
        code.join("")
    };

    let settings = mode.settings();
    debug!(?settings, "resolved settings");

    if execute_program(Some(program), &code_str, settings) { 0 } else { 1 }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [OPTIONS] "<code>"
  {0} run [OPTIONS] --file <PATH>

Options:
  --file,    -f <PATH>   Read code from PATH instead of positional "<code>"
  --classic, -c          Wrap the pointer around the tape and cells within 0..=255
  --strict,  -s          Fail on pointer or cell overflow (default)
  --numin                ',' reads a 1 or 2-digit number instead of a character
  --numout               '.' prints the cell as a number instead of a character
  --memory,  -m <CELLS>  Number of tape cells (default 1000)
  --help,    -h          Show this help

Notes:
- Characters other than ><+-.,[] are comments.
- Input (`,`) reads one line from stdin per read; at a terminal, bad
  input is rejected and asked for again.
- Defaults can be set in brain.toml under [defaults] (see BRAIN_CONFIG).

Examples:
- Load code from a file:
    {0} run --file ./program.bf
- Echo one character:
    echo x | {0} run ",."
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
