//! Flow networks with SOURCE/SINK terminals and the max-flow engine.
//!
//! - `store`: node array, arc arena, construction and query API
//! - `maxflow`: search trees, augmentation and orphan adoption
//! - `records`: index-addressed node and arc records

pub mod capacity;
pub mod config;
pub mod error;
pub mod maxflow;
pub mod records;
pub mod store;

pub use capacity::Capacity;
pub use config::{GraphConfig, ARC_BLOCK_SIZE, NODEPTR_BLOCK_SIZE};
pub use error::GraphError;
pub use maxflow::SolveStats;
pub use records::{ArcId, EdgeView, NodeId, Segment};
pub use store::Graph;
