//! Per-node command-script generation.
//!
//! Each SP's script is a pure function of the layout and the SP index. The
//! rules run in a fixed order and share one frame counter, so a frame's
//! sequence number depends on which earlier rules fired.

use script::{Command, Script, SpId};

use crate::error::{FixtureError, FixtureResult};
use crate::layout::NodeLayout;

/// Inline text carried by the single text frame a node may send.
pub const GREETING: &str = "hallo";

/// The fill loop keeps emitting frames until this many have been sent.
const FILL_UNTIL_SEQ: u32 = 10;

/// Builds one script while numbering frames from 1.
struct ScriptCursor {
    script: Script,
    next_seq: u32,
}

impl ScriptCursor {
    const fn new() -> Self {
        Self {
            script: Script::new(),
            next_seq: 1,
        }
    }

    const fn next_seq(&self) -> u32 {
        self.next_seq
    }

    fn wait(&mut self, frames: u32) {
        self.script.push(Command::wait(frames));
    }

    fn frame(&mut self, to: u32) {
        self.script.push(Command::frame(self.next_seq, SpId::new(to)));
        self.next_seq += 1;
    }

    fn frame_with_text(&mut self, to: u32, text: &str) {
        self.script
            .push(Command::frame_with_text(self.next_seq, SpId::new(to), text));
        self.next_seq += 1;
    }

    fn finish(self) -> Script {
        self.script
    }
}

/// Generates the command script for one SP.
///
/// Fails only if `node` is not part of `layout`.
pub fn generate(layout: &NodeLayout, node: SpId) -> FixtureResult<Script> {
    if !layout.contains(node) {
        return Err(FixtureError::NodeOutOfRange {
            node,
            node_count: layout.node_count(),
        });
    }
    Ok(build_script(layout, node.raw()))
}

/// Generates scripts for every SP of the layout, in SP order.
pub fn generate_all(layout: &NodeLayout) -> Vec<Script> {
    layout
        .nodes()
        .map(|node| build_script(layout, node.raw()))
        .collect()
}

/// Applies the rules for SP `i`, which must be part of `layout`.
fn build_script(layout: &NodeLayout, i: u32) -> Script {
    let n = layout.node_count();
    let mut out = ScriptCursor::new();

    // Neighbour frames.
    if i % 6 == 1 {
        out.wait(i % 9 + 1);
    }
    if i > 4 {
        out.frame(i - 3);
    }
    if i + 6 < n {
        out.frame(i + 4);
    }
    if i > 6 && i % 4 == 0 {
        out.frame(i - 5);
    }
    if i + 9 < n && i % 3 == 0 {
        out.frame_with_text(i + 7, GREETING);
    }
    if i % 4 == 0 {
        out.wait(i % 7 + 1);
    }

    // Fill loop. The bound is only re-checked after a full pass, so a pass
    // may overshoot it. With at least two nodes either the SP 0 or the
    // last-SP step fires on every pass.
    while out.next_seq() <= FILL_UNTIL_SEQ {
        if i > 10 {
            let seq = out.next_seq();
            out.frame(i - seq);
        }
        if i + 12 < n {
            let seq = out.next_seq();
            out.frame(i + seq);
        }
        if i > 0 {
            out.frame(0);
        }
        if i + 1 < n {
            out.frame(n - 1);
        }
    }

    // Cross-quarter frames.
    let (q1, q2, q3) = (layout.q1_start(), layout.q2_start(), layout.q3_start());
    if i > q1 {
        out.frame(i - q1);
    }
    if i > q2 {
        out.frame(i - q2);
    }
    if i > q3 {
        out.frame(i - q3);
    }
    if i < q1 {
        out.frame(i + q2);
    }
    if i < q2 {
        out.frame(i + q1);
    }
    if i < q3 {
        out.frame(i + 1);
    }

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{MAX_NODE_COUNT, MIN_NODE_COUNT};

    fn lines(node: u32) -> Vec<String> {
        generate(&NodeLayout::default(), SpId::new(node))
            .unwrap()
            .commands()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn node_five_starts_with_neighbour_frames() {
        let lines = lines(5);
        assert_eq!(lines[0], "Frame 1, To SP 2");
        assert_eq!(lines[1], "Frame 2, To SP 9");
        assert!(lines.iter().all(|line| !line.starts_with("Wait")));
    }

    #[test]
    fn node_one_waits_first() {
        let lines = lines(1);
        assert_eq!(lines[0], "Wait for receiving 2 frames");
        assert_eq!(lines[1], "Frame 1, To SP 5");
    }

    #[test]
    fn node_zero_sends_greeting() {
        let lines = lines(0);
        assert_eq!(lines[1], "Frame 2, To SP 7 hallo");
        assert_eq!(lines[2], "Wait for receiving 1 frames");
    }

    #[test]
    fn fill_loop_counts_down_for_high_nodes() {
        let lines = lines(35);
        assert_eq!(lines[3], "Frame 4, To SP 31");
        assert_eq!(lines[4], "Frame 5, To SP 0");
        assert_eq!(lines[5], "Frame 6, To SP 29");
    }

    #[test]
    fn last_node_has_no_greeting_or_wait() {
        let script = generate(&NodeLayout::default(), SpId::new(35)).unwrap();
        let stats = script.stats();
        assert_eq!(stats.waits, 0);
        assert_eq!(stats.text_payloads, 0);
        assert_eq!(stats.frames, 14);
    }

    #[test]
    fn rejects_node_outside_layout() {
        let err = generate(&NodeLayout::default(), SpId::new(36)).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::NodeOutOfRange {
                node_count: 36,
                ..
            }
        ));
    }

    #[test]
    fn smallest_layout_terminates() {
        let layout = NodeLayout::new(2).unwrap();
        let scripts = generate_all(&layout);
        assert_eq!(scripts.len(), 2);
        for script in &scripts {
            assert!(script.stats().frames >= 10);
            assert!(script.check_sequence().is_ok());
        }
    }

    #[test]
    fn generate_all_matches_single_generation() {
        let layout = NodeLayout::default();
        let all = generate_all(&layout);
        assert_eq!(all.len(), 36);
        for (node, script) in layout.nodes().zip(&all) {
            assert_eq!(&generate(&layout, node).unwrap(), script);
        }
    }

    #[test]
    fn generate_all_covers_every_layout() {
        for count in MIN_NODE_COUNT..=MAX_NODE_COUNT {
            let layout = NodeLayout::new(count).unwrap();
            assert_eq!(generate_all(&layout).len(), count as usize);
        }
    }
}
