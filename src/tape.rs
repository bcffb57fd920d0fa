//! The memory tape and its overflow policy.
//!
//! Cells are `u32`. The policy decides what happens at the edges:
//! - [`OverflowPolicy::Strict`]: the pointer must stay on the tape and cells
//!   use the full `0..=u32::MAX` range; stepping past either edge is an error.
//! - [`OverflowPolicy::Classic`]: the pointer wraps around the tape and cells
//!   wrap inside the byte window `0..=255`, even though storage is 32 bits.

use std::fmt;

use crate::error::InterpreterError;

/// Upper bound of the classic-mode cell window.
const CLASSIC_MAX: u32 = 255;

/// How pointer moves and cell arithmetic behave at their limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Wrap the pointer around the tape and cells around `0..=255`.
    Classic,
    /// Fail on any move off the tape or any `u32` overflow.
    #[default]
    Strict,
}

impl OverflowPolicy {
    pub fn from_classic(classic: bool) -> Self {
        if classic { OverflowPolicy::Classic } else { OverflowPolicy::Strict }
    }

    pub fn is_classic(self) -> bool {
        matches!(self, OverflowPolicy::Classic)
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Classic => write!(f, "classic"),
            OverflowPolicy::Strict => write!(f, "default"),
        }
    }
}

/// Which way a pointer move went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub(crate) fn verb(&self) -> &'static str {
        match self {
            Direction::Left => "decrement",
            Direction::Right => "increment",
        }
    }

    pub(crate) fn limit_name(&self) -> &'static str {
        match self {
            Direction::Left => "below minimum",
            Direction::Right => "above maximum",
        }
    }
}

/// A fixed-length tape of `u32` cells with a single data pointer.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<u32>,
    pointer: usize,
    policy: OverflowPolicy,
}

impl Tape {
    /// Build a zeroed tape of `len` cells. `len` must be at least 1 and
    /// small enough to allocate.
    pub fn new(len: usize, policy: OverflowPolicy) -> Result<Self, InterpreterError> {
        if len == 0 {
            return Err(InterpreterError::InvalidConfiguration);
        }
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| InterpreterError::TapeAllocation { len })?;
        cells.resize(len, 0);
        Ok(Self { cells, pointer: 0, policy })
    }

    /// Zero every cell and return the pointer to 0.
    pub fn reset(&mut self) {
        self.cells.fill(0);
        self.pointer = 0;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a tape has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Value of the cell under the pointer.
    pub fn current(&self) -> u32 {
        self.cells[self.pointer]
    }

    /// Overwrite the cell under the pointer. Used by `,`, which may store
    /// values outside the classic byte window.
    pub fn set_current(&mut self, value: u32) {
        self.cells[self.pointer] = value;
    }

    /// `<`
    pub fn move_left(&mut self) -> Result<(), InterpreterError> {
        if self.pointer == 0 {
            match self.policy {
                OverflowPolicy::Classic => self.pointer = self.cells.len() - 1,
                OverflowPolicy::Strict => {
                    return Err(InterpreterError::PointerOutOfBounds {
                        direction: Direction::Left,
                        bound: 0,
                    });
                }
            }
        } else {
            self.pointer -= 1;
        }
        Ok(())
    }

    /// `>`
    pub fn move_right(&mut self) -> Result<(), InterpreterError> {
        let last = self.cells.len() - 1;
        if self.pointer >= last {
            match self.policy {
                OverflowPolicy::Classic => self.pointer = 0,
                OverflowPolicy::Strict => {
                    return Err(InterpreterError::PointerOutOfBounds {
                        direction: Direction::Right,
                        bound: last,
                    });
                }
            }
        } else {
            self.pointer += 1;
        }
        Ok(())
    }

    /// `+`
    pub fn increment(&mut self) -> Result<(), InterpreterError> {
        let index = self.pointer;
        let value = self.cells[index];
        self.cells[index] = match self.policy {
            // Anything at or past the window edge (e.g. a large value read by `,`) wraps to 0.
            OverflowPolicy::Classic if value >= CLASSIC_MAX => 0,
            OverflowPolicy::Classic => value + 1,
            OverflowPolicy::Strict => value
                .checked_add(1)
                .ok_or(InterpreterError::CellOverflow { index })?,
        };
        Ok(())
    }

    /// `-`
    pub fn decrement(&mut self) -> Result<(), InterpreterError> {
        let index = self.pointer;
        let value = self.cells[index];
        self.cells[index] = match self.policy {
            OverflowPolicy::Classic if value == 0 => CLASSIC_MAX,
            OverflowPolicy::Classic => value - 1,
            OverflowPolicy::Strict => value
                .checked_sub(1)
                .ok_or(InterpreterError::CellUnderflow { index })?,
        };
        Ok(())
    }
}
