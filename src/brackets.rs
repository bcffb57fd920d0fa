use std::fmt;

use crate::error::InterpreterError;

/// Which side of a loop a bracket sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl BracketKind {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '[' => Some(BracketKind::Open),
            ']' => Some(BracketKind::Close),
            _ => None,
        }
    }

    pub(crate) fn counterpart_name(&self) -> &'static str {
        match self {
            BracketKind::Open => "close-brace ]",
            BracketKind::Close => "open-brace [",
        }
    }
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "open-brace ["),
            BracketKind::Close => write!(f, "close-brace ]"),
        }
    }
}

/// Find the bracket matching the `kind` bracket at `ip`.
///
/// Scans forward from `ip + 1` for `[` and backward from `ip - 1` for `]`,
/// tracking nesting depth from 1. Nothing is cached; every call rescans.
/// Returns the index of the matching bracket, or `UnmatchedBracket` if the
/// scan falls off the program.
pub fn find_match(program: &[char], ip: usize, kind: BracketKind) -> Result<usize, InterpreterError> {
    let mut depth: usize = 1;
    match kind {
        BracketKind::Open => {
            for (i, &ch) in program.iter().enumerate().skip(ip + 1) {
                match ch {
                    '[' => depth += 1,
                    ']' => depth -= 1,
                    _ => continue,
                }
                if depth == 0 {
                    return Ok(i);
                }
            }
        }
        BracketKind::Close => {
            for (i, &ch) in program[..ip.min(program.len())].iter().enumerate().rev() {
                match ch {
                    ']' => depth += 1,
                    '[' => depth -= 1,
                    _ => continue,
                }
                if depth == 0 {
                    return Ok(i);
                }
            }
        }
    }

    Err(InterpreterError::UnmatchedBracket { kind })
}
