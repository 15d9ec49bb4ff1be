//! Node layout and derived quarter boundaries.

use script::SpId;

use crate::error::{FixtureError, FixtureResult};

/// Node count of the reference fixture set.
pub const DEFAULT_NODE_COUNT: u32 = 36;

/// Smallest node count for which every node's fill loop terminates.
pub const MIN_NODE_COUNT: u32 = 2;

/// Largest node count the simulator will spawn processes for.
pub const MAX_NODE_COUNT: u32 = 256;

/// The set of SPs a fixture set is generated for.
///
/// The layout splits `0..node_count` into quarters of `ceil(node_count / 4)`
/// nodes; the quarter starts drive the cross-quarter frames at the end of
/// every script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLayout {
    node_count: u32,
    q1_start: u32,
}

impl NodeLayout {
    /// Creates a layout after validating the node count.
    pub fn new(node_count: u32) -> FixtureResult<Self> {
        if node_count < MIN_NODE_COUNT || node_count > MAX_NODE_COUNT {
            return Err(FixtureError::InvalidNodeCount {
                node_count,
                min: MIN_NODE_COUNT,
                max: MAX_NODE_COUNT,
            });
        }
        Ok(Self {
            node_count,
            q1_start: node_count.div_ceil(4),
        })
    }

    #[must_use]
    pub const fn node_count(&self) -> u32 {
        self.node_count
    }

    #[must_use]
    pub const fn q1_start(&self) -> u32 {
        self.q1_start
    }

    #[must_use]
    pub const fn q2_start(&self) -> u32 {
        2 * self.q1_start
    }

    #[must_use]
    pub const fn q3_start(&self) -> u32 {
        self.q1_start + self.q2_start()
    }

    /// The last SP of the layout.
    #[must_use]
    pub const fn last(&self) -> SpId {
        SpId::new(self.node_count - 1)
    }

    #[must_use]
    pub const fn contains(&self, node: SpId) -> bool {
        node.raw() < self.node_count
    }

    /// All SPs in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = SpId> {
        (0..self.node_count).map(SpId::new)
    }
}

impl Default for NodeLayout {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            q1_start: DEFAULT_NODE_COUNT.div_ceil(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_layout_quarters() {
        let layout = NodeLayout::default();
        assert_eq!(layout.node_count(), 36);
        assert_eq!(layout.q1_start(), 9);
        assert_eq!(layout.q2_start(), 18);
        assert_eq!(layout.q3_start(), 27);
        assert_eq!(layout, NodeLayout::new(36).unwrap());
    }

    #[test]
    fn quarter_start_rounds_up() {
        let layout = NodeLayout::new(37).unwrap();
        assert_eq!(layout.q1_start(), 10);
        assert_eq!(layout.q2_start(), 20);
        assert_eq!(layout.q3_start(), 30);

        let layout = NodeLayout::new(2).unwrap();
        assert_eq!(layout.q1_start(), 1);
        assert_eq!(layout.q3_start(), 3);
    }

    #[test]
    fn rejects_out_of_range_counts() {
        assert!(matches!(
            NodeLayout::new(1),
            Err(FixtureError::InvalidNodeCount { node_count: 1, .. })
        ));
        assert!(NodeLayout::new(0).is_err());
        assert!(NodeLayout::new(MAX_NODE_COUNT + 1).is_err());
        assert!(NodeLayout::new(MAX_NODE_COUNT).is_ok());
    }

    #[test]
    fn nodes_and_contains() {
        let layout = NodeLayout::new(4).unwrap();
        let nodes: Vec<u32> = layout.nodes().map(SpId::raw).collect();
        assert_eq!(nodes, vec![0, 1, 2, 3]);
        assert!(layout.contains(SpId::new(3)));
        assert!(!layout.contains(SpId::new(4)));
        assert_eq!(layout.last(), SpId::new(3));
    }
}
