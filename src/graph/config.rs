//! Construction-time configuration for [`Graph`](crate::graph::Graph).

use serde::{Deserialize, Serialize};

use crate::alloc::{DEFAULT_BLOCK_SIZE, DEFAULT_POOL_BLOCK_SIZE};

/// Arc records per arena block.
pub const ARC_BLOCK_SIZE: usize = DEFAULT_BLOCK_SIZE;

/// Orphan node-pointer records per pool block.
pub const NODEPTR_BLOCK_SIZE: usize = DEFAULT_POOL_BLOCK_SIZE;

/// Sizing parameters for a graph.
///
/// `node_num_max` is a hard limit; the remaining fields only tune the
/// allocators.
///
/// ```rust
/// use bkflow::graph::GraphConfig;
///
/// let config = GraphConfig::new(640 * 480)
///     .with_edge_hint(2 * 640 * 480)
///     .with_arc_block_size(4096);
/// assert_eq!(config.node_num_max, 307_200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Maximum number of nodes the graph may hold.
    pub node_num_max: usize,
    /// Expected number of edges, used to pre-size the arc block table.
    pub edge_num_hint: usize,
    /// Arc records per block (at least 2, so an edge pair always fits).
    pub arc_block_size: usize,
    /// Orphan records per block.
    pub orphan_block_size: usize,
}

impl GraphConfig {
    /// Creates a configuration for at most `node_num_max` nodes.
    pub const fn new(node_num_max: usize) -> Self {
        Self {
            node_num_max,
            edge_num_hint: 0,
            arc_block_size: ARC_BLOCK_SIZE,
            orphan_block_size: NODEPTR_BLOCK_SIZE,
        }
    }

    /// Sets the expected edge count.
    #[must_use]
    pub const fn with_edge_hint(mut self, edges: usize) -> Self {
        self.edge_num_hint = edges;
        self
    }

    /// Sets the arc block size.
    #[must_use]
    pub const fn with_arc_block_size(mut self, records: usize) -> Self {
        self.arc_block_size = records;
        self
    }

    /// Sets the orphan block size.
    #[must_use]
    pub const fn with_orphan_block_size(mut self, records: usize) -> Self {
        self.orphan_block_size = records;
        self
    }

    /// Clamps block sizes to their minimums.
    pub(crate) fn normalized(self) -> Self {
        Self {
            arc_block_size: self.arc_block_size.max(2),
            orphan_block_size: self.orphan_block_size.max(1),
            ..self
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
