//! Error types for script parsing and checking.

use std::fmt;

/// Result type for script parsing.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// A parse failure on a specific line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// 1-based line number.
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Why a single line failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The first word is neither `Wait` nor `Frame`.
    UnknownDirective { directive: String },

    /// A `Wait` line does not read `Wait for receiving <n> frames`.
    MalformedWait,

    /// A `Frame` line does not read `Frame <n>, To SP <dst>`.
    MalformedFrame,

    /// A count, sequence number or SP id is not a non-negative integer.
    InvalidNumber { value: String },

    /// Line exceeds the configured limit.
    LineTooLong { len: usize, max: usize },

    /// Inline text payload exceeds the configured limit.
    PayloadTooLong { len: usize, max: usize },
}

/// Frame sequence numbers are not a contiguous run starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceError {
    /// Index of the offending command within the script.
    pub command_index: usize,
    pub expected: u64,
    pub found: u32,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDirective { directive } => {
                write!(f, "unknown directive: {directive:?}")
            }
            Self::MalformedWait => {
                write!(f, "malformed wait, expected \"Wait for receiving <n> frames\"")
            }
            Self::MalformedFrame => {
                write!(f, "malformed frame, expected \"Frame <n>, To SP <dst>\"")
            }
            Self::InvalidNumber { value } => write!(f, "invalid number: {value:?}"),
            Self::LineTooLong { len, max } => {
                write!(f, "line too long: {len} bytes, max {max}")
            }
            Self::PayloadTooLong { len, max } => {
                write!(f, "payload too long: {len} bytes, max {max}")
            }
        }
    }
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame sequence broken at command {}: expected {}, found {}",
            self.command_index, self.expected, self.found
        )
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl std::error::Error for ParseErrorKind {}

impl std::error::Error for SequenceError {}
