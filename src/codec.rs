//! Translation between cell values and the text that `.` emits and `,` reads.
//!
//! Character mode maps a cell to exactly one Unicode scalar value. Numeric
//! mode reads and writes one or two decimal digits.
//!
//! Note that numeric input and numeric output split two-digit values
//! differently: input unpacks two 16-bit halves (the first and second
//! character typed), output divides by ten.

use crate::error::InterpreterError;

/// Decimal value of `code` if it is the code point of `'0'..='9'`.
fn ascii_digit(code: u32) -> Option<u32> {
    char::from_u32(code).and_then(|c| c.to_digit(10))
}

/// `.` in character mode.
pub fn encode_char(value: u32) -> Result<char, InterpreterError> {
    char::from_u32(value).ok_or(InterpreterError::InvalidCodepoint { value })
}

/// `.` in numeric mode.
///
/// Single digits print as themselves; values whose tens and ones are both
/// digits print as the two-digit number; anything else prints its plain
/// decimal form.
pub fn encode_numeric(value: u32) -> String {
    if value < 10 {
        return value.to_string();
    }

    let high = value / 10;
    let low = value - 10 * high;
    if high < 10 && low < 10 {
        (high * 10 + low).to_string()
    } else {
        value.to_string()
    }
}

/// `,` in character mode: exactly one scalar value, stored as its code point.
pub fn decode_char(text: &str) -> Result<u32, InterpreterError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch as u32),
        _ => Err(InterpreterError::InvalidInputLength { len: text.chars().count() }),
    }
}

/// `,` in numeric mode: one or two ASCII digits, stored as their value.
///
/// The text is packed into one integer first: a single character is its
/// code point, two characters become `(first << 16) | second`. A packed
/// value that is a digit code is stored as that digit; otherwise both
/// 16-bit halves must be digit codes and form a two-digit number.
pub fn decode_numeric(text: &str) -> Result<u32, InterpreterError> {
    let chars: Vec<char> = text.chars().collect();
    let packed = match chars.as_slice() {
        [only] => *only as u32,
        [first, second] => {
            let (first, second) = (*first as u32, *second as u32);
            if first > 0xFFFF || second > 0xFFFF {
                return Err(InterpreterError::NonDigitNumericInput);
            }
            (first << 16) | second
        }
        _ => return Err(InterpreterError::InvalidInputLength { len: chars.len() }),
    };

    if let Some(digit) = ascii_digit(packed) {
        return Ok(digit);
    }

    match (ascii_digit(packed >> 16), ascii_digit(packed & 0xFFFF)) {
        (Some(high), Some(low)) => Ok(high * 10 + low),
        _ => Err(InterpreterError::NonDigitNumericInput),
    }
}
