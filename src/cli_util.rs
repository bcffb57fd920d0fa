use std::io::{self, IsTerminal, Write};
use crate::theme::Theme;
use crate::{BrainError, Interpreter, Settings};

/// Run `code` once. Output streams to stdout as it is produced; a failure
/// is reported on stderr. A newline always follows the output so the next
/// prompt starts at column 0. Returns whether the run succeeded.
pub fn execute_program(program: Option<&str>, code: &str, settings: Settings) -> bool {
    let result = Interpreter::new(code, settings)
        .map_err(BrainError::from)
        .and_then(|mut bf| {
            bf.set_output_sink(|fragment| {
                let mut stdout = io::stdout();
                let _ = stdout.write_all(fragment.as_bytes());
                let _ = stdout.flush();
            });
            bf.run().map_err(BrainError::from)
        });

    println!();
    let _ = io::stdout().flush();

    match result {
        Ok(_) => true,
        Err(err) => {
            print_run_error(program, &err);
            false
        }
    }
}

/// Print a run failure to stderr.
/// If `program` is `Some("brain")`, the header is prefixed with "brain: ..." for CLI run mode.
/// The header is coloured only when stderr is a terminal.
pub fn print_run_error(program: Option<&str>, err: &BrainError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    let header = match err {
        BrainError::Config(inner) => prefix_program(&format!("Configuration error: {inner}")),
        BrainError::Execution(diagnostic) => prefix_program(&format!(
            "Runtime error at char index {}: {}",
            diagnostic.ip,
            diagnostic.message()
        )),
    };

    let mut stderr = io::stderr().lock();
    if stderr.is_terminal() {
        let _ = writeln!(stderr, "{}", Theme::mocha().error.paint(&header));
    } else {
        let _ = writeln!(stderr, "{header}");
    }
    if let BrainError::Execution(diagnostic) = err {
        let _ = writeln!(stderr, "{diagnostic}");
    }
    let _ = stderr.flush();
}

/// Print an informational REPL line to stderr, dimmed on a terminal.
pub fn print_notice(msg: &str) {
    let mut stderr = io::stderr().lock();
    if stderr.is_terminal() {
        let _ = writeln!(stderr, "{}", Theme::mocha().notice.paint(msg));
    } else {
        let _ = writeln!(stderr, "{msg}");
    }
    let _ = stderr.flush();
}
