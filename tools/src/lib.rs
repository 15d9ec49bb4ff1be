//! Reports for the `spgen` command-line tool.
//!
//! The binary handles argument parsing and I/O; this crate turns scripts and
//! check results into serializable reports and human-readable text.

use std::fmt::Write as _;

use anyhow::Result;
use fixture::{CheckReport, NodeLayout};
use script::{Script, ScriptLimits, ScriptStats};
use serde::Serialize;

/// What `spgen inspect` reports about one script.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub commands: usize,
    pub stats: ScriptStats,
    pub sequence_error: Option<String>,
}

/// Layout parameters included in check output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayoutReport {
    pub node_count: u32,
    pub q1_start: u32,
    pub q2_start: u32,
    pub q3_start: u32,
}

/// One finding, flattened for output.
#[derive(Debug, Clone, Serialize)]
pub struct FindingReport {
    pub node: u32,
    pub kind: &'static str,
    pub message: String,
}

/// What `spgen check` reports about a fixture set.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    pub layout: LayoutReport,
    pub checked: usize,
    pub clean: bool,
    pub findings: Vec<FindingReport>,
}

/// Parses script text and summarises it.
pub fn inspect_script(text: &str, limits: &ScriptLimits) -> Result<InspectReport> {
    let script = Script::parse(text, limits)?;
    Ok(InspectReport {
        commands: script.len(),
        stats: script.stats(),
        sequence_error: script.check_sequence().err().map(|err| err.to_string()),
    })
}

impl From<&NodeLayout> for LayoutReport {
    fn from(layout: &NodeLayout) -> Self {
        Self {
            node_count: layout.node_count(),
            q1_start: layout.q1_start(),
            q2_start: layout.q2_start(),
            q3_start: layout.q3_start(),
        }
    }
}

impl From<&CheckReport> for CheckOutput {
    fn from(report: &CheckReport) -> Self {
        Self {
            layout: LayoutReport::from(&report.layout),
            checked: report.checked,
            clean: report.is_clean(),
            findings: report
                .findings
                .iter()
                .map(|finding| FindingReport {
                    node: finding.node().raw(),
                    kind: finding.kind(),
                    message: finding.to_string(),
                })
                .collect(),
        }
    }
}

#[must_use]
pub fn format_inspect_pretty(report: &InspectReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();
    let _ = writeln!(out, "commands: {}", report.commands);
    let _ = writeln!(
        out,
        "frames: {} (text: {}, file: {})",
        stats.frames, stats.text_payloads, stats.file_payloads
    );
    let _ = writeln!(
        out,
        "waits: {} ({} frames awaited)",
        stats.waits, stats.frames_awaited
    );
    let targets: Vec<String> = stats.targets.iter().map(ToString::to_string).collect();
    let _ = writeln!(out, "targets: {}", targets.join(", "));
    match &report.sequence_error {
        Some(err) => {
            let _ = write!(out, "sequence: {err}");
        }
        None => {
            let _ = write!(out, "sequence: ok");
        }
    }
    out
}

#[must_use]
pub fn format_check_pretty(output: &CheckOutput) -> String {
    let mut out = String::new();
    let layout = output.layout;
    let _ = writeln!(
        out,
        "nodes: {} quarters: {}/{}/{}",
        layout.node_count, layout.q1_start, layout.q2_start, layout.q3_start
    );
    let _ = write!(
        out,
        "checked: {} findings: {}",
        output.checked,
        output.findings.len()
    );
    for finding in &output.findings {
        let _ = write!(out, "\n  [{}] {}", finding.kind, finding.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use script::SpId;

    #[test]
    fn inspect_reports_stats_and_sequence() {
        let report = inspect_script(
            "Wait for receiving 3 frames\nFrame 1, To SP 2\nFrame 2, To SP 4 hallo\n",
            &ScriptLimits::default(),
        )
        .unwrap();
        assert_eq!(report.commands, 3);
        assert_eq!(report.stats.frames, 2);
        assert_eq!(report.stats.targets, vec![SpId::new(2), SpId::new(4)]);
        assert!(report.sequence_error.is_none());

        let pretty = format_inspect_pretty(&report);
        assert!(pretty.contains("frames: 2 (text: 1, file: 0)"));
        assert!(pretty.contains("targets: 2, 4"));
        assert!(pretty.ends_with("sequence: ok"));
    }

    #[test]
    fn inspect_flags_broken_sequence() {
        let report =
            inspect_script("Frame 2, To SP 1\n", &ScriptLimits::default()).unwrap();
        assert!(report.sequence_error.unwrap().contains("expected 1"));
    }

    #[test]
    fn inspect_rejects_garbage() {
        let err = inspect_script("hello\n", &ScriptLimits::default()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn inspect_report_serializes() {
        let report = inspect_script("Frame 1, To SP 3\n", &ScriptLimits::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["commands"], 1);
        assert_eq!(json["stats"]["frames"], 1);
        assert_eq!(json["stats"]["targets"][0], 3);
    }

    #[test]
    fn check_output_from_report() {
        let report = CheckReport {
            layout: NodeLayout::default(),
            checked: 36,
            findings: vec![fixture::Finding::Stale { node: SpId::new(4) }],
        };
        let output = CheckOutput::from(&report);
        assert!(!output.clean);
        assert_eq!(output.layout.q3_start, 27);
        assert_eq!(output.findings[0].node, 4);
        assert_eq!(output.findings[0].kind, "stale");

        let pretty = format_check_pretty(&output);
        assert!(pretty.starts_with("nodes: 36 quarters: 9/18/27"));
        assert!(pretty.contains("[stale] SP 4"));
    }
}
