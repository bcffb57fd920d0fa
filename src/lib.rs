//! A Brainfuck interpreter with two overflow policies and numeric I/O.
//!
//! Cells are `u32` and the tape length is chosen per run (1000 by default).
//!
//! Features and behaviors:
//! - Strict policy (default): moving off either end of the tape, incrementing
//!   past `2^32 - 1`, or decrementing below 0 is an error.
//! - Classic policy: the pointer wraps around the tape and cells wrap inside
//!   `0..=255`.
//! - `.` prints the cell as a Unicode character, or as a decimal number in
//!   numeric output mode.
//! - `,` reads one character, or one or two digits in numeric input mode.
//! - Characters outside `><+-.,[]` are comments.
//! - Brackets are matched when a jump is taken, so an unbalanced bracket is
//!   only reported if execution reaches it.
//! - Errors carry a source excerpt with a caret and the output produced so far.
//!
//! Quick start:
//!
//! ```
//! use brain::Settings;
//!
//! let code = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
//! let output = brain::run(code, &Settings::default(), || Ok(String::new())).unwrap();
//! assert_eq!(output, "Hello World!\n");
//! ```

pub mod brackets;
pub mod cli_util;
pub mod codec;
pub mod commands;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod interpreter;
pub mod repl;
pub mod tape;
mod theme;

use std::io;

pub use brackets::BracketKind;
pub use diagnostic::Diagnostic;
pub use error::{BrainError, InterpreterError};
pub use interpreter::{Interpreter, Settings, DEFAULT_TAPE_LEN};
pub use tape::{Direction, OverflowPolicy, Tape};

/// Run `program` once and return its output.
///
/// `input` is called once per `,` and must return the text for that read.
pub fn run<F>(program: &str, settings: &Settings, input: F) -> Result<String, BrainError>
where
    F: FnMut() -> io::Result<String> + 'static,
{
    let mut interpreter = Interpreter::new(program, *settings)?;
    interpreter.set_input_provider(input);
    Ok(interpreter.run()?)
}
