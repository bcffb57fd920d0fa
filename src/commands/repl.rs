use std::io::{self, IsTerminal, Write};
use clap::Args;

use crate::commands::ModeArgs;
use crate::repl::{bare_loop, repl_loop, select_mode, ModeFlagOverride, ReplMode, HELP};

#[derive(Args, Debug, Default)]
#[command(disable_help_flag = true)]
pub struct ReplArgs {
    /// Force non-interactive bare mode
    #[arg(long = "bare", conflicts_with = "editor")]
    pub bare: bool,

    /// Force interactive mode (errors if stdin is not a TTY)
    #[arg(long = "editor", conflicts_with = "bare")]
    pub editor: bool,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

impl ReplArgs {
    pub fn mode_flag(&self) -> ModeFlagOverride {
        match (self.bare, self.editor) {
            (true, _) => ModeFlagOverride::Bare,
            (_, true) => ModeFlagOverride::Editor,
            _ => ModeFlagOverride::None,
        }
    }
}

// Public entry point for the REPL from main.rs
pub fn run(program: &str, args: ReplArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    // Determine mode: flags -> env -> auto-detect via is_terminal()
    let mode = match select_mode(args.mode_flag()) {
        Ok(m) => m,
        Err(msg) => {
            eprintln!("{program}: {msg}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    // Install SIGINT (ctrl+c) handler to flush and exit(0) immediately
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    let settings = args.mode.settings();

    let result = match mode {
        ReplMode::Editor => {
            // Print banners only if stderr is a TTY
            if io::stderr().is_terminal() {
                eprintln!("\n{HELP}");
                let _ = io::stderr().flush();
            }
            repl_loop(settings)
        }
        ReplMode::Bare => bare_loop(settings),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{program}: REPL error: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} repl [OPTIONS]

Options:
  --help,    -h          Show this help
  --bare                 Force non-interactive bare mode
  --editor               Force interactive editor mode (errors if stdin is not a TTY)
  --classic, -c          Start in classic mode
  --strict,  -s          Start in default (strict) mode
  --numin                Start with numeric input
  --numout               Start with numeric output
  --memory,  -m <CELLS>  Number of tape cells for every run (default 1000)

Description:
  Starts a REPL where you can enter code and execute it live.

Meta commands (line starts with ":")
{1}

Notes:
    - Each execution starts with a fresh tape and pointer.
    - Errors are reported and the REPL keeps going.
    - Mode selection:
        * Flags: --bare|--editor override environment and auto-detection.
        * Env: BRAIN_REPL_MODE=bare|editor overrides auto-detection.
        * Auto-detect: if stdin is a TTY, starts in interactive editor mode; otherwise, bare mode.
        * In bare mode, code is read line by line from stdin and runs until EOF or :quit.
"#,
        program, HELP
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
