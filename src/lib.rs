//! # `bkflow` - Boykov–Kolmogorov Max-Flow / Min-Cut
//!
//! A max-flow / minimum-cut solver for graphs with two terminals, SOURCE and
//! SINK, implementing the augmenting-path algorithm of Boykov and Kolmogorov
//! ("An Experimental Comparison of Min-Cut/Max-Flow Algorithms for Energy
//! Minimization in Vision", PAMI 2004). It is tuned for the sparse, grid-like
//! graphs produced by segmentation energies.
//!
//! ## Key Features
//!
//! - **Index-addressed records**: nodes and arcs link by index, never by pointer
//! - **Block allocation**: arcs are handed out in contiguous pairs from
//!   fixed-size blocks; nothing is freed until the graph drops
//! - **Folded terminal links**: both terminal arcs of a node share one signed
//!   residual
//! - **Lazy distances**: adoption trusts a distance only when its timestamp is
//!   current, amortizing tree repairs
//!
//! ## Architecture
//!
//! 1. **Bulk allocation** ([`alloc`]): `BlockArena` for arc records,
//!    `BlockPool` for the orphan list's node pointers.
//! 2. **Graph store** ([`graph::Graph`]): nodes, edges and terminal weights.
//! 3. **Max-flow engine** ([`graph::maxflow`]): tree growth, augmentation
//!    and adoption, run once per graph.
//!
//! ## Example
//!
//! ```rust
//! use bkflow::{Graph, Segment};
//!
//! // Three pixels in a row; the first prefers the source, the last the sink.
//! let mut g: Graph<i32> = Graph::new(3, 2);
//! let first = g.add_nodes(3).unwrap();
//! g.add_edge(first, first + 1, 3, 3).unwrap();
//! g.add_edge(first + 1, first + 2, 7, 7).unwrap();
//! g.set_terminal_weights(first, 10, 0).unwrap();
//! g.set_terminal_weights(first + 2, 0, 10).unwrap();
//!
//! assert_eq!(g.maxflow().unwrap(), 3);
//! assert_eq!(g.what_segment(first).unwrap(), Segment::Source);
//! assert_eq!(g.what_segment(first + 1).unwrap(), Segment::Sink);
//! assert_eq!(g.what_segment(first + 2).unwrap(), Segment::Sink);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alloc;
pub mod graph;
mod log;

pub use alloc::{AllocError, BlockArena, BlockPool, ErrorHandler};
pub use graph::{Capacity, EdgeView, Graph, GraphConfig, GraphError, NodeId, Segment, SolveStats};

// Compile-time assertions for record layout and thread-safety claims.
const _: () = {
    use core::mem;

    // Arc ids are plain indices.
    assert!(mem::size_of::<graph::ArcId>() == mem::size_of::<usize>());

    // A node's parent link stays within two words.
    assert!(mem::size_of::<graph::records::Parent>() <= 2 * mem::size_of::<usize>());

    // Independent graphs may be moved to and solved on other threads.
    const fn assert_send<T: Send>() {}
    assert_send::<Graph<i32>>();
    assert_send::<Graph<f32, f64>>();
};
