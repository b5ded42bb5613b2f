//! Path parsing error types

use thiserror::Error;

/// Why a path string was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedReason {
    /// A letter that is not one of `MmLlHhVvCcSsQqTtAaZz`
    #[error("unknown command letter '{0}'")]
    UnknownCommand(char),

    /// A token that does not lex as a signed decimal number
    #[error("invalid number")]
    InvalidNumber,

    /// A number that overflows to infinity
    #[error("number is out of range")]
    NonFiniteNumber,

    /// Numeric parameters before the first command letter
    #[error("path data must start with a command letter")]
    MissingCommand,

    /// Parameter count is not a positive multiple of the command's arity
    #[error("command '{command}' expects a multiple of {expected} parameters, found {found}")]
    ArityMismatch {
        command: char,
        expected: usize,
        found: usize,
    },

    /// A coordinate that overflows once resolved against the current point
    #[error("resolved coordinates are out of range")]
    CoordinateOverflow,

    /// An arc flag that is neither 0 nor 1
    #[error("arc flag for '{command}' must be 0 or 1, found {value}")]
    InvalidFlag { command: char, value: f64 },
}

/// A path string that could not be parsed
///
/// Conversion is all-or-nothing: when this error is returned no part of the
/// path has been converted.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("malformed path at offset {offset} near \"{fragment}\": {reason}")]
pub struct MalformedPathError {
    /// Byte offset into the input where the problem starts
    pub offset: usize,
    /// The offending substring
    pub fragment: String,
    pub reason: MalformedReason,
}

impl MalformedPathError {
    pub fn new(offset: usize, fragment: impl Into<String>, reason: MalformedReason) -> Self {
        Self {
            offset,
            fragment: fragment.into(),
            reason,
        }
    }
}

/// Result type for path parsing and conversion
pub type Result<T> = std::result::Result<T, MalformedPathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_offset_and_fragment() {
        let err = MalformedPathError::new(4, "B", MalformedReason::UnknownCommand('B'));
        assert_eq!(
            err.to_string(),
            "malformed path at offset 4 near \"B\": unknown command letter 'B'"
        );
    }

    #[test]
    fn test_arity_message() {
        let reason = MalformedReason::ArityMismatch {
            command: 'L',
            expected: 2,
            found: 3,
        };
        assert_eq!(
            reason.to_string(),
            "command 'L' expects a multiple of 2 parameters, found 3"
        );
    }
}
