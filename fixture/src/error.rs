//! Fixture generation errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use script::{ScriptError, SpId};

/// Result type for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Errors that can occur while generating, writing or reading fixtures.
#[derive(Debug)]
#[non_exhaustive]
pub enum FixtureError {
    /// Node count outside the supported range.
    InvalidNodeCount { node_count: u32, min: u32, max: u32 },

    /// Node index is not part of the layout.
    NodeOutOfRange { node: SpId, node_count: u32 },

    /// Filesystem failure on a fixture path.
    Io { path: PathBuf, source: io::Error },

    /// A fixture file could not be parsed as a command script.
    Parse { path: PathBuf, source: ScriptError },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeCount {
                node_count,
                min,
                max,
            } => {
                write!(
                    f,
                    "invalid node count {node_count}: must be between {min} and {max}"
                )
            }
            Self::NodeOutOfRange { node, node_count } => {
                write!(f, "SP {node} out of range for {node_count} nodes")
            }
            Self::Io { path, .. } => write!(f, "i/o error on {}", path.display()),
            Self::Parse { path, .. } => write!(f, "failed to parse {}", path.display()),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidNodeCount { .. } | Self::NodeOutOfRange { .. } => None,
        }
    }
}
