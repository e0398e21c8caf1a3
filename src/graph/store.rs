//! `Graph`: node array, arc arena and the construction / query API.
//!
//! A graph is built once, solved once with [`Graph::maxflow`], and then
//! queried with [`Graph::what_segment`]. Nodes are dense indices; every edge
//! is stored as two arc records allocated as one contiguous pair in a
//! [`BlockArena`].
//!
//! # Performance
//! - `add_node` / `add_nodes`: O(count)
//! - `add_edge`: O(1) (amortized over arc block growth)
//! - `set_terminal_weights` / `add_terminal_weights`: O(1)
//! - `what_segment`: O(1)

use crate::alloc::allocator::out_of_memory;
use crate::alloc::{BlockArena, ErrorHandler};
use crate::graph::capacity::{comparable, min_of, Capacity};
use crate::graph::config::GraphConfig;
use crate::graph::error::GraphError;
use crate::graph::maxflow::{ActiveQueue, OrphanList, SolveStats};
use crate::graph::records::{ArcId, ArcRecord, EdgeView, NodeId, NodeRecord, Parent, Segment};
use crate::log::log_debug;

/// A flow network with implicit SOURCE and SINK terminals.
///
/// `C` is the capacity type of edges and terminal links, `F` the type of the
/// accumulated flow (wider than `C` when sums may overflow it).
///
/// ```rust
/// use bkflow::{Graph, Segment};
///
/// let mut g: Graph<i32> = Graph::new(2, 1);
/// let a = g.add_node().unwrap();
/// let b = g.add_node().unwrap();
/// g.set_terminal_weights(a, 10, 0).unwrap();
/// g.set_terminal_weights(b, 0, 10).unwrap();
/// g.add_edge(a, b, 5, 5).unwrap();
///
/// assert_eq!(g.maxflow().unwrap(), 5);
/// assert_eq!(g.what_segment(a).unwrap(), Segment::Source);
/// assert_eq!(g.what_segment(b).unwrap(), Segment::Sink);
/// ```
pub struct Graph<C, F = C>
where
    C: Capacity,
    F: Capacity + From<C>,
{
    pub(crate) nodes: Vec<NodeRecord<C>>,
    pub(crate) arcs: BlockArena<ArcRecord<C>>,
    pub(crate) queue: ActiveQueue,
    pub(crate) orphans: OrphanList,
    pub(crate) flow: F,
    /// Monotonically increasing growth-step counter.
    pub(crate) time: u64,
    pub(crate) stats: SolveStats,
    pub(crate) solved: bool,
    config: GraphConfig,
    on_error: Option<ErrorHandler>,
}

impl<C, F> Graph<C, F>
where
    C: Capacity,
    F: Capacity + From<C>,
{
    /// Creates a graph for at most `node_num_max` nodes, pre-sized for about
    /// `edge_num_hint` edges.
    pub fn new(node_num_max: usize, edge_num_hint: usize) -> Self {
        Self::with_config(GraphConfig::new(node_num_max).with_edge_hint(edge_num_hint))
    }

    /// Creates a graph from an explicit configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        let config = config.normalized();
        log_debug!(
            node_num_max = config.node_num_max,
            edge_num_hint = config.edge_num_hint,
            arc_block_size = config.arc_block_size,
            "graph created"
        );
        // Pre-sizing is a hint; `add_nodes` reports exhaustion.
        let mut nodes = Vec::new();
        let _ = nodes.try_reserve_exact(config.node_num_max);
        Self {
            nodes,
            arcs: BlockArena::with_capacity(config.arc_block_size, 2 * config.edge_num_hint, None),
            queue: ActiveQueue::default(),
            orphans: OrphanList::new(config.orphan_block_size, None),
            flow: F::zero(),
            time: 0,
            stats: SolveStats::default(),
            solved: false,
            config,
            on_error: None,
        }
    }

    /// Installs a handler that receives the message of every error before the
    /// error is returned.
    ///
    /// Without a handler errors are only returned, except allocator memory
    /// exhaustion, which terminates the process.
    #[must_use]
    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.on_error = Some(handler);
        self.arcs.set_error_handler(self.on_error);
        self.orphans.set_error_handler(self.on_error);
        self
    }

    /// Reports `err` to the handler and returns it.
    ///
    /// Allocator errors have already been reported by the allocator itself.
    pub(crate) fn fail<T>(&self, err: GraphError) -> Result<T, GraphError> {
        if let (Some(report), false) = (self.on_error, matches!(err, GraphError::Alloc(_))) {
            report(&err.to_string());
        }
        Err(err)
    }

    fn ensure_building(&self) -> Result<(), GraphError> {
        if self.solved {
            return self.fail(GraphError::AlreadySolved);
        }
        Ok(())
    }

    fn check_node(&self, id: NodeId) -> Result<(), GraphError> {
        if id >= self.nodes.len() {
            return self.fail(GraphError::InvalidNode {
                id,
                count: self.nodes.len(),
            });
        }
        Ok(())
    }

    fn check_terminal_weights(&self, i: NodeId, cap_source: C, cap_sink: C) -> Result<(), GraphError> {
        self.ensure_building()?;
        self.check_node(i)?;
        if !comparable(cap_source, cap_sink) {
            return self.fail(GraphError::InvalidCapacity);
        }
        Ok(())
    }

    /// Adds one node and returns its id. The first call returns 0, the second 1,
    /// and so on.
    ///
    /// # Errors
    /// [`GraphError::NodeCapacityExceeded`] past the configured maximum,
    /// [`GraphError::AlreadySolved`] after solving.
    pub fn add_node(&mut self) -> Result<NodeId, GraphError> {
        self.add_nodes(1)
    }

    /// Adds `count` nodes and returns the id of the first one.
    ///
    /// # Errors
    /// Same as [`Graph::add_node`], or [`GraphError::Alloc`] if the node
    /// array cannot grow; on error no node is added.
    pub fn add_nodes(&mut self, count: usize) -> Result<NodeId, GraphError> {
        self.ensure_building()?;
        let first = self.nodes.len();
        let requested = first.saturating_add(count);
        if requested > self.config.node_num_max {
            return self.fail(GraphError::NodeCapacityExceeded {
                requested,
                max: self.config.node_num_max,
            });
        }
        if self.nodes.try_reserve_exact(count).is_err() {
            return Err(out_of_memory::<NodeRecord<C>>(self.on_error, count).into());
        }
        self.nodes.resize(requested, NodeRecord::new());
        Ok(first)
    }

    /// Adds an edge between `from` and `to` with capacity `cap` in the forward
    /// direction and `rev_cap` in the reverse one. A zero capacity makes the
    /// edge directed.
    ///
    /// # Errors
    /// [`GraphError::InvalidNode`], [`GraphError::InvalidCapacity`] for a
    /// negative (or NaN) capacity, [`GraphError::AlreadySolved`], or an
    /// allocator error.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, cap: C, rev_cap: C) -> Result<(), GraphError> {
        self.ensure_building()?;
        self.check_node(from)?;
        self.check_node(to)?;
        let zero = C::zero();
        if !(cap >= zero && rev_cap >= zero) {
            return self.fail(GraphError::InvalidCapacity);
        }

        let base = self.arcs.allocate(2)?;
        let (a, a_rev) = (ArcId(base), ArcId(base + 1));

        // Prepend to both lists; read `to` after updating `from` so a
        // self-loop keeps both arcs.
        let from_next = self.nodes[from].first.replace(a);
        let to_next = self.nodes[to].first.replace(a_rev);

        let (fwd, rev) = self.arcs.pair_mut(base);
        *fwd = ArcRecord {
            head: to,
            next: from_next,
            sister: a_rev,
            r_cap: cap,
        };
        *rev = ArcRecord {
            head: from,
            next: to_next,
            sister: a,
            r_cap: rev_cap,
        };
        Ok(())
    }

    /// Sets the capacities of `SOURCE -> i` and `i -> SINK`.
    ///
    /// Call at most once per node, before any [`Graph::add_terminal_weights`]
    /// on it. The smaller capacity is pushed straight to the flow total; the
    /// signed difference is kept as the node's terminal residual. Weights may
    /// be negative.
    ///
    /// # Errors
    /// [`GraphError::InvalidNode`], [`GraphError::InvalidCapacity`] for a NaN
    /// weight, or [`GraphError::AlreadySolved`].
    pub fn set_terminal_weights(&mut self, i: NodeId, cap_source: C, cap_sink: C) -> Result<(), GraphError> {
        self.check_terminal_weights(i, cap_source, cap_sink)?;
        self.flow = self.flow + F::from(min_of(cap_source, cap_sink));
        self.nodes[i].tr_cap = cap_source - cap_sink;
        Ok(())
    }

    /// Adds to the capacities of `SOURCE -> i` and `i -> SINK`.
    ///
    /// May be called any number of times; contributions accumulate. Weights
    /// may be negative.
    ///
    /// # Errors
    /// Same as [`Graph::set_terminal_weights`].
    pub fn add_terminal_weights(&mut self, i: NodeId, mut cap_source: C, mut cap_sink: C) -> Result<(), GraphError> {
        self.check_terminal_weights(i, cap_source, cap_sink)?;
        let delta = self.nodes[i].tr_cap;
        if delta > C::zero() {
            cap_source = cap_source + delta;
        } else {
            cap_sink = cap_sink - delta;
        }
        self.flow = self.flow + F::from(min_of(cap_source, cap_sink));
        self.nodes[i].tr_cap = cap_source - cap_sink;
        Ok(())
    }

    /// Returns the side of the minimum cut node `i` belongs to.
    ///
    /// Nodes that ended up in no search tree report [`Segment::Sink`].
    ///
    /// # Errors
    /// [`GraphError::NotSolved`] before [`Graph::maxflow`], or
    /// [`GraphError::InvalidNode`].
    pub fn what_segment(&self, i: NodeId) -> Result<Segment, GraphError> {
        if !self.solved {
            return self.fail(GraphError::NotSolved);
        }
        self.check_node(i)?;
        let node = &self.nodes[i];
        if !node.parent.is_none() && !node.is_sink {
            Ok(Segment::Source)
        } else {
            Ok(Segment::Sink)
        }
    }

    /// Number of nodes added so far.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Maximum number of nodes.
    #[inline]
    pub fn node_capacity(&self) -> usize {
        self.config.node_num_max
    }

    /// Number of arc records (two per edge).
    #[inline]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Number of edges added so far.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.arcs.len() / 2
    }

    /// The effective configuration (block sizes clamped to their minimums).
    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Flow accumulated so far: the terminal contributions before solving, the
    /// maximum flow after.
    #[inline]
    pub fn flow(&self) -> F {
        self.flow
    }

    /// Whether [`Graph::maxflow`] has run.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Counters collected by the last solve.
    #[inline]
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Signed terminal residual of node `i`: positive for remaining
    /// `SOURCE -> i` capacity, negative for remaining `i -> SINK` capacity.
    ///
    /// # Errors
    /// [`GraphError::InvalidNode`].
    pub fn terminal_residual(&self, i: NodeId) -> Result<C, GraphError> {
        self.check_node(i)?;
        Ok(self.nodes[i].tr_cap)
    }

    /// Iterates over all edges in insertion order with their current residual
    /// capacities.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<C>> + '_ {
        self.arcs
            .iter()
            .filter(|(idx, arc)| arc.sister.0 > *idx)
            .map(|(_, arc)| {
                let rev = &self.arcs[arc.sister.0];
                EdgeView {
                    from: rev.head,
                    to: arc.head,
                    residual: arc.r_cap,
                    reverse_residual: rev.r_cap,
                }
            })
    }

    /// Checks structural invariants.
    ///
    /// - every arc's sister points back at it and has the opposite endpoints
    /// - every residual capacity is non-negative
    /// - after solving, no node is left orphaned and every parent arc stays
    ///   inside its node's tree
    pub fn validate_invariants(&self) -> bool {
        let zero = C::zero();
        let n = self.nodes.len();

        for (idx, arc) in self.arcs.iter() {
            let Some(sister) = self.arcs.get(arc.sister.0) else {
                return false;
            };
            if sister.sister.0 != idx || arc.head >= n || sister.head >= n {
                return false;
            }
            if !(arc.r_cap >= zero) {
                return false;
            }
        }

        if self.solved {
            for node in &self.nodes {
                match node.parent {
                    Parent::Orphan => return false,
                    Parent::Arc(a) => {
                        let parent = &self.nodes[self.arcs[a.0].head];
                        if parent.parent.is_none() || parent.is_sink != node.is_sink {
                            return false;
                        }
                    }
                    Parent::None | Parent::Terminal => {}
                }
            }
        }
        true
    }
}

impl<C, F> core::fmt::Debug for Graph<C, F>
where
    C: Capacity,
    F: Capacity + From<C>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edge_count())
            .field("flow", &self.flow)
            .field("solved", &self.solved)
            .finish()
    }
}
