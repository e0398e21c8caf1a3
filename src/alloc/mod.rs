//! Block allocators for graph records.
//!
//! - [`BlockArena`]: append-only, contiguous runs, torn down as a unit
//! - [`BlockPool`]: block-grown pool with free-list reuse for scratch records

pub mod allocator;
pub mod block;
pub mod pool;

pub use allocator::{AllocError, ErrorHandler};
pub use block::{BlockArena, DEFAULT_BLOCK_SIZE};
pub use pool::{BlockPool, DEFAULT_POOL_BLOCK_SIZE};
