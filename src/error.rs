use std::io;

use crate::brackets::BracketKind;
use crate::diagnostic::Diagnostic;
use crate::tape::Direction;

/// Errors raised by the primitive operations (tape, bracket matcher, codec).
///
/// These never reach a caller bare: the engine wraps each one in a
/// [`Diagnostic`] carrying the source context at the point of failure.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// The tape was requested with zero cells.
    #[error("must provide at least 1 cell of memory")]
    InvalidConfiguration,

    /// The tape could not be allocated at the requested length.
    #[error("cannot allocate {len} cells of memory")]
    TapeAllocation { len: usize },

    /// A jump scan ran off the program without balancing the bracket.
    #[error("missing {} for this {kind}", .kind.counterpart_name())]
    UnmatchedBracket { kind: BracketKind },

    /// Strict mode only: the pointer tried to leave the tape.
    #[error("cannot {} memory pointer {} index {bound}... try setting `classic` to `true`", .direction.verb(), .direction.limit_name())]
    PointerOutOfBounds { direction: Direction, bound: usize },

    /// Strict mode only: `+` on a cell already at `u32::MAX`.
    #[error("cell {index} is already at maximum allowable value, 2^32 - 1... try setting `classic` to `true`")]
    CellOverflow { index: usize },

    /// Strict mode only: `-` on a cell already at 0.
    #[error("cell {index} is already at minimum allowable value, 0... try setting `classic` to `true`")]
    CellUnderflow { index: usize },

    /// Character output of a value that is not a Unicode scalar value.
    #[error("cell value {value} is not a valid Unicode scalar value")]
    InvalidCodepoint { value: u32 },

    /// Character input that was empty or held more than one scalar value.
    #[error("expected a single character of input, got {len} characters")]
    InvalidInputLength { len: usize },

    /// Numeric input that did not decode to one or two decimal digits.
    #[error("non-digit characters entered in numeric mode")]
    NonDigitNumericInput,

    /// The input source itself failed.
    #[error("failed to read input: {source}")]
    Io {
        #[source]
        source: io::Error,
    },
}

/// Everything [`crate::run`] can fail with.
#[derive(Debug, thiserror::Error)]
pub enum BrainError {
    /// The interpreter could not be built from the given settings.
    #[error(transparent)]
    Config(#[from] InterpreterError),

    /// The program failed while running.
    #[error(transparent)]
    Execution(#[from] Diagnostic),
}
