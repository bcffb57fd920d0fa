//! The execution engine.
//!
//! The program text itself is the program: there is no parse step, the
//! instruction pointer is a character index into the source, and every
//! character outside `><+-.,[]` is a comment. Loops are resolved by
//! rescanning for the matching bracket each time a jump is taken.

use std::io::{self, BufRead, IsTerminal, Write};

use tracing::{debug, trace};

use crate::brackets::{find_match, BracketKind};
use crate::codec;
use crate::diagnostic::Diagnostic;
use crate::error::InterpreterError;
use crate::tape::{OverflowPolicy, Tape};

/// Tape length used when the caller does not pick one.
pub const DEFAULT_TAPE_LEN: usize = 1000;

/// Per-run configuration. Nothing here survives between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub policy: OverflowPolicy,
    /// `,` reads one or two decimal digits instead of a character.
    pub numeric_input: bool,
    /// `.` writes the cell as a decimal number instead of a character.
    pub numeric_output: bool,
    pub tape_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy: OverflowPolicy::Strict,
            numeric_input: false,
            numeric_output: false,
            tape_len: DEFAULT_TAPE_LEN,
        }
    }
}

impl Settings {
    pub fn classic(mut self, classic: bool) -> Self {
        self.policy = OverflowPolicy::from_classic(classic);
        self
    }

    pub fn numeric_input(mut self, numeric: bool) -> Self {
        self.numeric_input = numeric;
        self
    }

    pub fn numeric_output(mut self, numeric: bool) -> Self {
        self.numeric_output = numeric;
        self
    }

    pub fn tape_len(mut self, len: usize) -> Self {
        self.tape_len = len;
        self
    }
}

type InputProvider = Box<dyn FnMut() -> io::Result<String>>;
type OutputSink = Box<dyn FnMut(&str)>;

/// A single program bound to its tape and I/O hooks.
pub struct Interpreter {
    program: Vec<char>,
    settings: Settings,
    tape: Tape,
    output: String,
    input_provider: Option<InputProvider>,
    output_sink: Option<OutputSink>,
}

impl Interpreter {
    /// Fails if `settings.tape_len` is 0 or too large to allocate.
    pub fn new(program: &str, settings: Settings) -> Result<Self, InterpreterError> {
        let tape = Tape::new(settings.tape_len, settings.policy)?;
        Ok(Self {
            program: program.chars().collect(),
            settings,
            tape,
            output: String::new(),
            input_provider: None,
            output_sink: None,
        })
    }

    /// Supply `,` input. Each call must return the text for one `,`.
    /// Without a provider, `,` prompts on stderr and reads a line from stdin.
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: FnMut() -> io::Result<String> + 'static,
    {
        self.input_provider = Some(Box::new(provider));
    }

    /// Receive each piece of output as `.` produces it, in addition to the
    /// text returned from [`Interpreter::run`].
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The tape as the last run left it.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Run the program from the start on a zeroed tape.
    ///
    /// Returns everything `.` produced. The first failing instruction ends
    /// the run; its error comes back wrapped with source context and the
    /// output produced so far.
    pub fn run(&mut self) -> Result<String, Diagnostic> {
        self.tape.reset();
        self.output.clear();

        debug!(
            program_len = self.program.len(),
            tape_len = self.tape.len(),
            policy = %self.settings.policy,
            numeric_input = self.settings.numeric_input,
            numeric_output = self.settings.numeric_output,
            "run started"
        );

        let mut ip = 0;
        while ip < self.program.len() {
            if let Err(err) = self.step(&mut ip) {
                debug!(ip, error = %err, "run aborted");
                return Err(Diagnostic::wrap(&self.program, ip, &self.output, err));
            }
            ip += 1;
        }

        debug!(output_len = self.output.len(), "run finished");
        Ok(std::mem::take(&mut self.output))
    }

    /// Apply the instruction at `ip`. Jumps move `ip` onto the matching
    /// bracket; the caller's advance then resumes just past it.
    fn step(&mut self, ip: &mut usize) -> Result<(), InterpreterError> {
        let cell = self.tape.current();
        match self.program[*ip] {
            '[' if cell == 0 => self.jump(ip, BracketKind::Open)?,
            ']' if cell != 0 => self.jump(ip, BracketKind::Close)?,
            '[' | ']' => {}
            '<' => self.tape.move_left()?,
            '>' => self.tape.move_right()?,
            '+' => self.tape.increment()?,
            '-' => self.tape.decrement()?,
            '.' => self.write_cell()?,
            ',' => self.read_cell()?,
            _ => {}
        }
        Ok(())
    }

    fn jump(&self, ip: &mut usize, kind: BracketKind) -> Result<(), InterpreterError> {
        let target = find_match(&self.program, *ip, kind)?;
        trace!(from = *ip, to = target, "jump");
        *ip = target;
        Ok(())
    }

    fn write_cell(&mut self) -> Result<(), InterpreterError> {
        let value = self.tape.current();
        let fragment = if self.settings.numeric_output {
            codec::encode_numeric(value)
        } else {
            codec::encode_char(value)?.to_string()
        };

        if let Some(sink) = self.output_sink.as_mut() {
            sink(&fragment);
        }
        self.output.push_str(&fragment);
        Ok(())
    }

    fn read_cell(&mut self) -> Result<(), InterpreterError> {
        let numeric = self.settings.numeric_input;
        let value = match self.input_provider.as_mut() {
            Some(provider) => {
                let text = provider().map_err(|source| InterpreterError::Io { source })?;
                decode_input(&text, numeric)?
            }
            None => {
                let interactive = io::stdin().is_terminal() && io::stderr().is_terminal();
                read_input(&mut io::stdin().lock(), &mut io::stderr(), numeric, interactive)?
            }
        };
        self.tape.set_current(value);
        Ok(())
    }
}

fn decode_input(text: &str, numeric: bool) -> Result<u32, InterpreterError> {
    if numeric {
        codec::decode_numeric(text)
    } else {
        codec::decode_char(text)
    }
}

/// Fallback for `,` when no provider is set: read lines from `reader` until
/// one decodes.
///
/// Only an interactive session prompts on `prompt` and asks again after bad
/// input; otherwise the first line is final. End of input is always final.
fn read_input<R, W>(
    reader: &mut R,
    prompt: &mut W,
    numeric: bool,
    interactive: bool,
) -> Result<u32, InterpreterError>
where
    R: BufRead,
    W: Write,
{
    let io_err = |source| InterpreterError::Io { source };
    loop {
        if interactive {
            if numeric {
                writeln!(prompt, "Please provide a 1 or 2-digit number for ',' input:").map_err(io_err)?;
            } else {
                writeln!(prompt, "Please provide a single character for ',' input:").map_err(io_err)?;
            }
            prompt.flush().map_err(io_err)?;
        }

        let mut line = String::new();
        let read = reader.read_line(&mut line).map_err(io_err)?;
        let text = line.trim_end_matches(['\n', '\r']);

        match decode_input(text, numeric) {
            Err(
                err @ (InterpreterError::InvalidInputLength { .. }
                | InterpreterError::NonDigitNumericInput),
            ) if interactive && read > 0 => {
                debug!(%err, "rejected ',' input");
                writeln!(prompt, "{err}. Please try again.").map_err(io_err)?;
            }
            result => return result,
        }
    }
}
