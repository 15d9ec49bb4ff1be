//! Configurable limits for bounded script parsing.

/// Limits enforced while parsing a command script.
///
/// The defaults match what an SP process can hold: a 128-byte line buffer
/// (127 characters plus terminator) and a 4096-byte frame with a 16-byte
/// header in front of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLimits {
    /// Maximum length of one line in bytes, excluding the line terminator.
    pub max_line_len: usize,

    /// Maximum length of an inline text payload in bytes.
    ///
    /// The payload is part of its line, so this only binds when it is smaller
    /// than `max_line_len`. With the default line limit a line is rejected
    /// as too long well before its payload reaches this size.
    pub max_payload_bytes: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            max_line_len: 127,
            max_payload_bytes: 4096 - 16,
        }
    }
}

impl ScriptLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_line_len: 64,
            max_payload_bytes: 16,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_line_len: usize::MAX,
            max_payload_bytes: usize::MAX,
        }
    }
}
