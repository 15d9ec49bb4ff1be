//! Whole command scripts.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::command::{Command, Payload, SpId};
use crate::error::{ScriptError, ScriptResult, SequenceError};
use crate::limits::ScriptLimits;

/// An ordered list of commands for one SP.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Script {
    commands: Vec<Command>,
}

/// Summary counters for a script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptStats {
    pub frames: usize,
    pub waits: usize,
    /// Sum of all wait counts.
    pub frames_awaited: u64,
    pub text_payloads: usize,
    pub file_payloads: usize,
    /// Distinct frame targets in ascending order.
    pub targets: Vec<SpId>,
}

impl Script {
    /// Creates an empty script.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Creates a script from already-built commands.
    #[must_use]
    pub const fn from_commands(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Appends a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Parses a full script, skipping blank lines and comments.
    pub fn parse(text: &str, limits: &ScriptLimits) -> ScriptResult<Self> {
        let mut commands = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let parsed = Command::parse_line(line, limits)
                .map_err(|kind| ScriptError { line: idx + 1, kind })?;
            if let Some(command) = parsed {
                commands.push(command);
            }
        }
        Ok(Self { commands })
    }

    /// Checks that frame sequence numbers run `1, 2, 3, ...` with no gaps.
    ///
    /// Wait directives are ignored.
    pub fn check_sequence(&self) -> Result<(), SequenceError> {
        let mut expected = 1u64;
        for (command_index, command) in self.commands.iter().enumerate() {
            let Some(found) = command.frame_seq() else {
                continue;
            };
            if u64::from(found) != expected {
                return Err(SequenceError {
                    command_index,
                    expected,
                    found,
                });
            }
            expected += 1;
        }
        Ok(())
    }

    /// Computes summary counters.
    #[must_use]
    pub fn stats(&self) -> ScriptStats {
        let mut stats = ScriptStats::default();
        let mut targets = BTreeSet::new();
        for command in &self.commands {
            match command {
                Command::Wait { frames } => {
                    stats.waits += 1;
                    stats.frames_awaited += u64::from(*frames);
                }
                Command::Frame { to, payload, .. } => {
                    stats.frames += 1;
                    targets.insert(*to);
                    match payload {
                        Payload::SeqNum => {}
                        Payload::Text(_) => stats.text_payloads += 1,
                        Payload::File(_) => stats.file_payloads += 1,
                    }
                }
            }
        }
        stats.targets = targets.into_iter().collect();
        stats
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &ScriptLimits::default())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            writeln!(f, "{command}")?;
        }
        Ok(())
    }
}

impl From<Vec<Command>> for Script {
    fn from(commands: Vec<Command>) -> Self {
        Self::from_commands(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseErrorKind;

    fn sample() -> Script {
        Script::from_commands(vec![
            Command::wait(2),
            Command::frame(1, SpId::new(5)),
            Command::frame_with_text(2, SpId::new(3), "hallo"),
            Command::wait(5),
            Command::frame(3, SpId::new(5)),
        ])
    }

    #[test]
    fn empty_script_renders_nothing() {
        let script = Script::new();
        assert!(script.is_empty());
        assert_eq!(script.to_string(), "");
        assert!(script.check_sequence().is_ok());
    }

    #[test]
    fn renders_newline_terminated_lines() {
        assert_eq!(
            sample().to_string(),
            "Wait for receiving 2 frames\n\
             Frame 1, To SP 5\n\
             Frame 2, To SP 3 hallo\n\
             Wait for receiving 5 frames\n\
             Frame 3, To SP 5\n"
        );
    }

    #[test]
    fn parse_skips_comments() {
        let text = "# node 3\n\nWait for receiving 2 frames\nFrame 1, To SP 5\n";
        let script = Script::parse(text, &ScriptLimits::default()).unwrap();
        assert_eq!(
            script.into_commands(),
            vec![Command::wait(2), Command::frame(1, SpId::new(5))]
        );
    }

    #[test]
    fn parse_reports_line_number() {
        let text = "Frame 1, To SP 5\n# ok\nFrame 2 To SP 6\n";
        let err = Script::parse(text, &ScriptLimits::default()).unwrap_err();
        assert_eq!(
            err,
            ScriptError {
                line: 3,
                kind: ParseErrorKind::MalformedFrame,
            }
        );
    }

    #[test]
    fn sequence_ok_ignores_waits() {
        assert!(sample().check_sequence().is_ok());
    }

    #[test]
    fn sequence_gap_detected() {
        let script = Script::from_commands(vec![
            Command::frame(1, SpId::new(0)),
            Command::wait(1),
            Command::frame(3, SpId::new(0)),
        ]);
        assert_eq!(
            script.check_sequence(),
            Err(SequenceError {
                command_index: 2,
                expected: 2,
                found: 3,
            })
        );
    }

    #[test]
    fn sequence_must_start_at_one() {
        let script = Script::from_commands(vec![Command::frame(0, SpId::new(0))]);
        let err = script.check_sequence().unwrap_err();
        assert_eq!(err.expected, 1);
        assert_eq!(err.found, 0);
    }

    #[test]
    fn sequence_repeat_detected() {
        let script = Script::from_commands(vec![
            Command::frame(1, SpId::new(0)),
            Command::frame(1, SpId::new(0)),
        ]);
        assert!(script.check_sequence().is_err());
    }

    #[test]
    fn stats_counts_everything() {
        let stats = sample().stats();
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.waits, 2);
        assert_eq!(stats.frames_awaited, 7);
        assert_eq!(stats.text_payloads, 1);
        assert_eq!(stats.file_payloads, 0);
        assert_eq!(stats.targets, vec![SpId::new(3), SpId::new(5)]);
    }

    #[test]
    fn push_and_from_vec() {
        let mut script = Script::new();
        script.push(Command::frame(1, SpId::new(2)));
        assert_eq!(script, Script::from(vec![Command::frame(1, SpId::new(2))]));
        assert_eq!(script.len(), 1);
    }
}
