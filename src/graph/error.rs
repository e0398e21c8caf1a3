//! Errors returned by graph construction, solving and queries.

use crate::alloc::AllocError;

/// Errors reported by [`Graph`](crate::graph::Graph).
///
/// Every variant describes a violated precondition or an exhausted allocator;
/// none of them is transient. When an operation fails, the graph is left
/// exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// Adding nodes would exceed the configured maximum.
    NodeCapacityExceeded {
        /// Node count the call would have produced.
        requested: usize,
        /// Configured maximum.
        max: usize,
    },
    /// A node id outside `[0, node_count)`.
    InvalidNode {
        /// The offending id.
        id: usize,
        /// Current node count.
        count: usize,
    },
    /// A negative edge capacity, or any capacity that is not comparable (NaN).
    InvalidCapacity,
    /// The graph was already solved; it can be neither mutated nor solved again.
    AlreadySolved,
    /// Segments were queried before the max-flow was computed.
    NotSolved,
    /// A block allocator could not grow.
    Alloc(AllocError),
}

impl core::fmt::Display for GraphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NodeCapacityExceeded { requested, max } => write!(
                f,
                "the number of nodes is exceeded! ({requested} requested, {max} allowed)"
            ),
            Self::InvalidNode { id, count } => {
                write!(f, "node {id} does not exist (graph has {count} nodes)")
            }
            Self::InvalidCapacity => f.write_str("capacities must not be NaN and edge capacities must be non-negative"),
            Self::AlreadySolved => f.write_str("maxflow has already been computed for this graph"),
            Self::NotSolved => f.write_str("maxflow has not been computed yet"),
            Self::Alloc(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AllocError> for GraphError {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}
