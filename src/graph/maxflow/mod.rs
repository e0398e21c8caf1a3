//! The Boykov–Kolmogorov max-flow engine.
//!
//! Two search trees grow from the terminals: the SOURCE tree along arcs with
//! residual capacity away from the source, the SINK tree along arcs with
//! residual capacity toward the sink. When the trees touch, the connecting
//! path is augmented; arcs saturated by the augmentation cut their child
//! nodes loose as orphans, which are then re-adopted inside their tree or
//! released to become free nodes. The solve ends when no active node can grow.
//!
//! ### Distance bookkeeping
//! Each node carries a distance to its root and the time at which that
//! distance was last known to be correct. During adoption a distance is
//! trusted only if its timestamp equals the current time; otherwise it is
//! recomputed by walking to the root once, and every node on the walk is
//! stamped, so later walks in the same adoption phase stop early.
//!
//! ### Performance Characteristics
//! | Phase | Cost per event | Notes |
//! |-------|----------------|-------|
//! | growth | \(O(\deg(v))\) | one scan per activation |
//! | augment | \(O(\text{path length})\) | two walks to the roots |
//! | adopt | \(O(\deg(v) \cdot \text{walk})\) | walks amortized by timestamps |

mod active;
mod adopt;
mod augment;
mod orphans;
mod stats;

pub(crate) use active::ActiveQueue;
pub(crate) use orphans::OrphanList;
pub use stats::SolveStats;

use crate::graph::capacity::{has_residual, Capacity};
use crate::graph::error::GraphError;
use crate::graph::records::{ArcId, NodeId, Parent};
use crate::graph::store::Graph;
use crate::log::log_debug;

impl<C, F> Graph<C, F>
where
    C: Capacity,
    F: Capacity + From<C>,
{
    /// Computes the maximum flow and returns its value.
    ///
    /// Can be called only once; afterwards [`Graph::what_segment`] reports the
    /// minimum cut.
    ///
    /// # Errors
    /// [`GraphError::AlreadySolved`] on a second call, or an allocator error
    /// while recording orphans.
    pub fn maxflow(&mut self) -> Result<F, GraphError> {
        if self.solved {
            return self.fail(GraphError::AlreadySolved);
        }
        self.solved = true;

        log_debug!(
            nodes = self.nodes.len(),
            edges = self.edge_count(),
            "maxflow started"
        );

        self.init_trees();

        let mut current: Option<NodeId> = None;
        loop {
            let mut i = current;
            if let Some(c) = i {
                // Clear the active flag held while augmenting from `c`.
                self.nodes[c].next = None;
                if self.nodes[c].parent.is_none() {
                    i = None;
                }
            }
            let i = match i {
                Some(i) => i,
                None => match self.queue.pop(&mut self.nodes) {
                    Some(i) => i,
                    None => break,
                },
            };

            let bridge = self.grow(i);
            self.stats.growth_steps += 1;
            self.time += 1;

            match bridge {
                Some(bridge) => {
                    // Keep `i` flagged active so it is not queued twice; growth
                    // resumes from it after the trees are repaired.
                    self.nodes[i].next = Some(i);
                    current = Some(i);
                    self.augment(bridge)?;
                    self.adopt_orphans()?;
                }
                None => current = None,
            }
        }

        debug_assert!(self.orphans.is_empty());
        debug_assert!(self.validate_invariants());
        log_debug!(
            flow = ?self.flow,
            augmentations = self.stats.augmentations,
            orphans = self.stats.orphans_processed,
            orphan_records = self.orphans.capacity(),
            growth_steps = self.stats.growth_steps,
            "maxflow finished"
        );
        Ok(self.flow)
    }

    /// Seeds every node with a nonzero terminal residual as a tree root.
    fn init_trees(&mut self) {
        self.queue.clear();
        self.time = 0;
        self.stats = SolveStats::default();

        for i in 0..self.nodes.len() {
            let node = &mut self.nodes[i];
            node.next = None;
            node.ts = 0;
            if node.tr_cap.is_zero() {
                node.parent = Parent::None;
                continue;
            }
            node.is_sink = node.tr_cap < C::zero();
            node.parent = Parent::Terminal;
            node.dist = 1;
            self.queue.push(&mut self.nodes, i);
        }
    }

    /// Grows the tree of `i` by one scan of its arcs.
    ///
    /// Returns the arc joining the two trees, oriented from the SOURCE tree to
    /// the SINK tree, if one was found.
    fn grow(&mut self, i: NodeId) -> Option<ArcId> {
        let is_sink = self.nodes[i].is_sink;
        let (i_ts, i_dist) = (self.nodes[i].ts, self.nodes[i].dist);

        let mut cursor = self.nodes[i].first;
        while let Some(a) = cursor {
            let arc = self.arcs[a.0];
            cursor = arc.next;

            // Residual capacity away from the root of `i`'s tree.
            let residual = if is_sink { self.arcs[arc.sister.0].r_cap } else { arc.r_cap };
            if !has_residual(residual) {
                continue;
            }

            let j = arc.head;
            let node_j = &mut self.nodes[j];
            if node_j.parent.is_none() {
                node_j.is_sink = is_sink;
                node_j.parent = Parent::Arc(arc.sister);
                node_j.ts = i_ts;
                node_j.dist = i_dist + 1;
                self.queue.push(&mut self.nodes, j);
            } else if node_j.is_sink != is_sink {
                return Some(if is_sink { arc.sister } else { a });
            } else if node_j.ts <= i_ts && node_j.dist > i_dist {
                // Shorten `j`'s path to the root through `i`.
                node_j.parent = Parent::Arc(arc.sister);
                node_j.ts = i_ts;
                node_j.dist = i_dist + 1;
            }
        }
        None
    }
}
