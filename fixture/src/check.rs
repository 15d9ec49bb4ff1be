//! Verifying a fixture set on disk.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use script::{Script, ScriptError, ScriptLimits, SequenceError, SpId};
use tracing::{debug, warn};

use crate::error::{FixtureError, FixtureResult};
use crate::files::FileNaming;
use crate::generate::generate;
use crate::layout::NodeLayout;

/// A problem found in one SP's fixture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// The file does not exist.
    Missing { node: SpId, path: PathBuf },

    /// The file is not valid UTF-8 text.
    NotUtf8 { node: SpId },

    /// The file is not a valid command script.
    Unparsable { node: SpId, error: ScriptError },

    /// Frame numbers do not run `1..=n`.
    BrokenSequence { node: SpId, error: SequenceError },

    /// A frame is addressed to an SP outside the layout.
    TargetOutOfRange { node: SpId, seq: u32, target: SpId },

    /// The file differs from what the generator produces for this layout.
    Stale { node: SpId },
}

impl Finding {
    #[must_use]
    pub const fn node(&self) -> SpId {
        match self {
            Self::Missing { node, .. }
            | Self::NotUtf8 { node }
            | Self::Unparsable { node, .. }
            | Self::BrokenSequence { node, .. }
            | Self::TargetOutOfRange { node, .. }
            | Self::Stale { node } => *node,
        }
    }

    /// Short machine-friendly name of the finding kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::NotUtf8 { .. } => "not_utf8",
            Self::Unparsable { .. } => "unparsable",
            Self::BrokenSequence { .. } => "broken_sequence",
            Self::TargetOutOfRange { .. } => "target_out_of_range",
            Self::Stale { .. } => "stale",
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { node, path } => {
                write!(f, "SP {node}: missing file {}", path.display())
            }
            Self::NotUtf8 { node } => write!(f, "SP {node}: file is not valid UTF-8"),
            Self::Unparsable { node, error } => write!(f, "SP {node}: {error}"),
            Self::BrokenSequence { node, error } => write!(f, "SP {node}: {error}"),
            Self::TargetOutOfRange { node, seq, target } => {
                write!(f, "SP {node}: frame {seq} targets unknown SP {target}")
            }
            Self::Stale { node } => {
                write!(f, "SP {node}: content differs from generated script")
            }
        }
    }
}

/// Outcome of checking a fixture set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub layout: NodeLayout,
    pub checked: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Reads every SP's file back and reports what is wrong with it.
///
/// Problems with individual files, including bytes that are not UTF-8,
/// become [`Finding`]s; only filesystem errors other than a missing file
/// abort the check.
pub fn check_fixtures(
    dir: &Path,
    layout: &NodeLayout,
    naming: &FileNaming,
) -> FixtureResult<CheckReport> {
    let limits = ScriptLimits::default();
    let mut report = CheckReport {
        layout: *layout,
        checked: 0,
        findings: Vec::new(),
    };

    for node in layout.nodes() {
        let path = naming.path_for(dir, node);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                report.findings.push(Finding::Missing { node, path });
                continue;
            }
            Err(source) => return Err(FixtureError::Io { path, source }),
        };
        report.checked += 1;
        let Ok(text) = String::from_utf8(bytes) else {
            report.findings.push(Finding::NotUtf8 { node });
            continue;
        };
        check_script(layout, node, &text, &limits, &mut report.findings)?;
    }

    for finding in &report.findings {
        warn!(kind = finding.kind(), "{finding}");
    }
    debug!(
        checked = report.checked,
        findings = report.findings.len(),
        "fixture check finished"
    );
    Ok(report)
}

fn check_script(
    layout: &NodeLayout,
    node: SpId,
    text: &str,
    limits: &ScriptLimits,
    findings: &mut Vec<Finding>,
) -> FixtureResult<()> {
    let script = match Script::parse(text, limits) {
        Ok(script) => script,
        Err(error) => {
            findings.push(Finding::Unparsable { node, error });
            return Ok(());
        }
    };

    if let Err(error) = script.check_sequence() {
        findings.push(Finding::BrokenSequence { node, error });
    }
    for command in script.commands() {
        if let (Some(seq), Some(target)) = (command.frame_seq(), command.target()) {
            if !layout.contains(target) {
                findings.push(Finding::TargetOutOfRange { node, seq, target });
            }
        }
    }
    if generate(layout, node)?.to_string() != text {
        findings.push(Finding::Stale { node });
    }
    Ok(())
}
