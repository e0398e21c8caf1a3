//! Node and arc records stored by the graph.
//!
//! Nodes live in a dense `Vec` addressed by [`NodeId`]; arcs live in a
//! [`BlockArena`](crate::alloc::BlockArena) addressed by [`ArcId`]. All links
//! between records are indices, never pointers.

use serde::{Deserialize, Serialize};

use crate::graph::capacity::Capacity;

/// Dense node index in `[0, node_count)`.
pub type NodeId = usize;

/// Index of an arc record in the arc arena.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArcId(pub(crate) usize);

impl ArcId {
    /// Raw arena index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The two terminals, and therefore the two sides of a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Attached to the SOURCE search tree.
    Source,
    /// Attached to the SINK search tree, or never attached at all.
    Sink,
}

/// How a node hangs in its search tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Parent {
    /// Not in any tree.
    #[default]
    None,
    /// Tree root, connected directly to its terminal.
    Terminal,
    /// Lost its parent during augmentation; waiting for adoption.
    Orphan,
    /// Arc from this node toward its parent (`arc.head` is the parent).
    Arc(ArcId),
}

impl Parent {
    #[inline(always)]
    pub(crate) fn is_none(self) -> bool {
        matches!(self, Parent::None)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeRecord<C> {
    /// First outgoing arc.
    pub(crate) first: Option<ArcId>,
    pub(crate) parent: Parent,
    /// Next active node; `Some(self)` marks the last node of a queue.
    pub(crate) next: Option<NodeId>,
    /// Time at which `dist` was last known to be correct.
    pub(crate) ts: u64,
    /// Distance to the terminal along parent arcs.
    pub(crate) dist: u32,
    pub(crate) is_sink: bool,
    /// `> 0`: residual of SOURCE->node; `< 0`: negated residual of node->SINK.
    pub(crate) tr_cap: C,
}

impl<C: Capacity> NodeRecord<C> {
    pub(crate) fn new() -> Self {
        Self {
            first: None,
            parent: Parent::None,
            next: None,
            ts: 0,
            dist: 0,
            is_sink: false,
            tr_cap: C::zero(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ArcRecord<C> {
    /// Node the arc points to.
    pub(crate) head: NodeId,
    /// Next arc leaving the same node.
    pub(crate) next: Option<ArcId>,
    /// Reverse arc.
    pub(crate) sister: ArcId,
    pub(crate) r_cap: C,
}

impl<C: Capacity> Default for ArcRecord<C> {
    fn default() -> Self {
        Self {
            head: 0,
            next: None,
            sister: ArcId::default(),
            r_cap: C::zero(),
        }
    }
}

/// Read-only view of one edge (an arc pair) after or before solving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<C> {
    /// Node the edge was added from.
    pub from: NodeId,
    /// Node the edge was added to.
    pub to: NodeId,
    /// Residual capacity `from -> to`.
    pub residual: C,
    /// Residual capacity `to -> from`.
    pub reverse_residual: C,
}
