//! Writing fixture sets to disk and reading them back.

use std::fs;
use std::path::{Path, PathBuf};

use script::{Script, ScriptLimits, SpId};
use tracing::{debug, info};

use crate::error::{FixtureError, FixtureResult};
use crate::generate::generate;
use crate::layout::NodeLayout;

/// File prefix the simulator expects by default (`-in=input`).
pub const DEFAULT_PREFIX: &str = "input";

/// How fixture files are named inside the output directory.
///
/// SP `i` is stored at `<dir>/<prefix><i>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNaming {
    pub prefix: String,
}

impl Default for FileNaming {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
        }
    }
}

impl FileNaming {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Path of the fixture file for `node`.
    #[must_use]
    pub fn path_for(&self, dir: &Path, node: SpId) -> PathBuf {
        dir.join(format!("{}{node}", self.prefix))
    }
}

/// Totals for a written fixture set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixtureSummary {
    pub files: usize,
    pub frames: usize,
    pub waits: usize,
    pub bytes: u64,
}

/// Generates and writes one file per SP.
///
/// `dir` must already exist. Existing files are overwritten. The first
/// filesystem error aborts the run; files written before it are kept.
pub fn write_fixtures(
    dir: &Path,
    layout: &NodeLayout,
    naming: &FileNaming,
) -> FixtureResult<FixtureSummary> {
    fs::metadata(dir).map_err(|source| FixtureError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut summary = FixtureSummary::default();
    for node in layout.nodes() {
        let script = generate(layout, node)?;
        let text = script.to_string();
        let path = naming.path_for(dir, node);
        fs::write(&path, &text).map_err(|source| FixtureError::Io {
            path: path.clone(),
            source,
        })?;

        let stats = script.stats();
        debug!(
            node = node.raw(),
            frames = stats.frames,
            waits = stats.waits,
            path = %path.display(),
            "wrote fixture"
        );
        summary.files += 1;
        summary.frames += stats.frames;
        summary.waits += stats.waits;
        summary.bytes += text.len() as u64;
    }

    info!(
        nodes = layout.node_count(),
        frames = summary.frames,
        bytes = summary.bytes,
        dir = %dir.display(),
        "fixture set written"
    );
    Ok(summary)
}

/// Reads and parses a single script file.
pub fn read_script(path: &Path, limits: &ScriptLimits) -> FixtureResult<Script> {
    let text = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Script::parse(&text, limits).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads every SP's script of a fixture set, in SP order.
pub fn read_fixtures(
    dir: &Path,
    layout: &NodeLayout,
    naming: &FileNaming,
) -> FixtureResult<Vec<Script>> {
    let limits = ScriptLimits::default();
    layout
        .nodes()
        .map(|node| read_script(&naming.path_for(dir, node), &limits))
        .collect()
}
