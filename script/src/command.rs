//! Single script directives and their text form.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ParseErrorKind;
use crate::limits::ScriptLimits;

/// A service point identifier.
///
/// SP ids index the simulated processes, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpId(u32);

impl SpId {
    /// Creates a new SP id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw SP id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for SpId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<SpId> for u32 {
    fn from(id: SpId) -> Self {
        id.0
    }
}

impl fmt::Display for SpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a frame carries to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// No trailing text; the frame body is the decimal sequence number.
    SeqNum,
    /// Trailing text sent verbatim.
    Text(String),
    /// `$<path>`: the frame body is the file contents.
    File(PathBuf),
}

/// One directive of a command script.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Block until `frames` more data frames have arrived.
    Wait { frames: u32 },
    /// Send frame `seq` to SP `to`.
    Frame {
        seq: u32,
        to: SpId,
        payload: Payload,
    },
}

impl Command {
    /// Creates a wait directive.
    #[must_use]
    pub const fn wait(frames: u32) -> Self {
        Self::Wait { frames }
    }

    /// Creates a frame directive whose body is its own sequence number.
    #[must_use]
    pub const fn frame(seq: u32, to: SpId) -> Self {
        Self::Frame {
            seq,
            to,
            payload: Payload::SeqNum,
        }
    }

    /// Creates a frame directive carrying inline text.
    #[must_use]
    pub fn frame_with_text(seq: u32, to: SpId, text: impl Into<String>) -> Self {
        Self::Frame {
            seq,
            to,
            payload: Payload::Text(text.into()),
        }
    }

    /// Returns the sequence number if this is a frame directive.
    #[must_use]
    pub const fn frame_seq(&self) -> Option<u32> {
        match self {
            Self::Frame { seq, .. } => Some(*seq),
            Self::Wait { .. } => None,
        }
    }

    /// Returns the target SP if this is a frame directive.
    #[must_use]
    pub const fn target(&self) -> Option<SpId> {
        match self {
            Self::Frame { to, .. } => Some(*to),
            Self::Wait { .. } => None,
        }
    }

    /// Parses one line of a script.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments. A single trailing
    /// `\n` or `\r\n` is ignored.
    pub fn parse_line(
        line: &str,
        limits: &ScriptLimits,
    ) -> Result<Option<Self>, ParseErrorKind> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.len() > limits.max_line_len {
            return Err(ParseErrorKind::LineTooLong {
                len: line.len(),
                max: limits.max_line_len,
            });
        }
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (directive, rest) = line.split_once(' ').unwrap_or((line, ""));
        match directive {
            "Wait" => parse_wait(rest).map(Some),
            "Frame" => parse_frame(rest, limits).map(Some),
            other => Err(ParseErrorKind::UnknownDirective {
                directive: other.to_owned(),
            }),
        }
    }
}

impl FromStr for Command {
    type Err = ParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s, &ScriptLimits::default())?.ok_or(ParseErrorKind::UnknownDirective {
            directive: String::new(),
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wait { frames } => write!(f, "Wait for receiving {frames} frames"),
            Self::Frame { seq, to, payload } => {
                write!(f, "Frame {seq}, To SP {to}")?;
                match payload {
                    Payload::SeqNum => Ok(()),
                    Payload::Text(text) => write!(f, " {text}"),
                    Payload::File(path) => write!(f, " ${}", path.display()),
                }
            }
        }
    }
}

fn parse_wait(rest: &str) -> Result<Command, ParseErrorKind> {
    let mut words = rest.split(' ');
    match (
        words.next(),
        words.next(),
        words.next(),
        words.next(),
        words.next(),
    ) {
        (Some("for"), Some("receiving"), Some(count), Some("frame" | "frames"), None) => {
            Ok(Command::wait(parse_number(count)?))
        }
        _ => Err(ParseErrorKind::MalformedWait),
    }
}

fn parse_frame(rest: &str, limits: &ScriptLimits) -> Result<Command, ParseErrorKind> {
    let (seq, rest) = rest
        .split_once(", To SP ")
        .ok_or(ParseErrorKind::MalformedFrame)?;
    let seq = parse_number(seq)?;
    let (to, payload) = match rest.split_once(' ') {
        Some((to, payload)) => (to, Some(payload)),
        None => (rest, None),
    };
    let to = SpId::new(parse_number(to)?);
    let payload = match payload {
        Some(text) => parse_payload(text, limits)?,
        None => Payload::SeqNum,
    };
    Ok(Command::Frame { seq, to, payload })
}

fn parse_payload(text: &str, limits: &ScriptLimits) -> Result<Payload, ParseErrorKind> {
    match text.strip_prefix('$') {
        Some(path) if !path.is_empty() => Ok(Payload::File(PathBuf::from(path))),
        _ => {
            if text.len() > limits.max_payload_bytes {
                return Err(ParseErrorKind::PayloadTooLong {
                    len: text.len(),
                    max: limits.max_payload_bytes,
                });
            }
            Ok(Payload::Text(text.to_owned()))
        }
    }
}

fn parse_number(value: &str) -> Result<u32, ParseErrorKind> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseErrorKind::InvalidNumber {
            value: value.to_owned(),
        });
    }
    value.parse().map_err(|_| ParseErrorKind::InvalidNumber {
        value: value.to_owned(),
    })
}
