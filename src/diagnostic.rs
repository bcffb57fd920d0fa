use std::fmt;

use crate::error::InterpreterError;

/// Characters of context shown on each side of the failing instruction.
const WINDOW_CHARS: usize = 14;

/// A fatal run error plus the source context it happened in.
///
/// Rendered as:
///
/// ```text
///              +<
/// Error at      ^      char index 1
///   message: cannot decrement memory pointer below minimum index 0... try setting `classic` to `true`
///    output:
/// ```
#[derive(Debug, thiserror::Error)]
pub struct Diagnostic {
    /// Character index of the failing instruction.
    pub ip: usize,
    /// Fixed-width source window centred on `ip`.
    pub window: String,
    /// Output produced before the failure.
    pub output: String,
    #[source]
    pub source: InterpreterError,
}

impl Diagnostic {
    /// Wrap `source`, raised at `ip` of `program`, with its context.
    pub fn wrap(program: &[char], ip: usize, output: &str, source: InterpreterError) -> Self {
        Self {
            ip,
            window: context_window(program, ip),
            output: output.to_string(),
            source,
        }
    }

    pub fn message(&self) -> String {
        self.source.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.window)?;
        writeln!(f, "Error at{:>7}{:5} char index {}", "^", "", self.ip)?;
        writeln!(f, "  message: {}", self.source)?;
        write!(f, "   output: {}", self.output)
    }
}

/// `WINDOW_CHARS` characters either side of `ip`, space-padded where the
/// program runs out so `ip` always lands in the same column.
/// Line breaks and tabs are flattened to spaces to keep that column stable.
fn context_window(program: &[char], ip: usize) -> String {
    let start = ip.saturating_sub(WINDOW_CHARS);
    let end = (ip + WINDOW_CHARS).min(program.len());

    let mut window = String::with_capacity(WINDOW_CHARS * 2);
    window.extend(std::iter::repeat_n(' ', WINDOW_CHARS - (ip - start)));
    window.extend(
        program[start.min(end)..end]
            .iter()
            .map(|&c| if c.is_whitespace() { ' ' } else { c }),
    );
    window.extend(std::iter::repeat_n(' ', ip + WINDOW_CHARS - end.max(ip)));
    window
}
