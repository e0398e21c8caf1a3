//! `BlockArena`: an append-only arena that hands out runs of records from
//! fixed-size blocks.
//!
//! Records are addressed by a flat `usize` index (`block * block_size + offset`).
//! A run of `count` records is always contiguous inside one block; when the
//! current block cannot hold the whole run, a fresh block is opened and the
//! unused tail of the old block is skipped.
//!
//! # Performance
//! - `allocate`: O(count), one heap allocation per `block_size` records
//! - `get` / indexing: O(1), one division to locate the block
//! - No per-record deallocation: memory is returned when the arena drops
//!
//! ```rust
//! use bkflow::alloc::BlockArena;
//!
//! let mut arena = BlockArena::<u32>::new(4, None);
//! let first = arena.allocate(3).unwrap();
//! arena[first + 2] = 7;
//! // Two more records do not fit after the first three: a new block opens.
//! let next = arena.allocate(2).unwrap();
//! assert_eq!(next, 4);
//! assert_eq!(arena.block_count(), 2);
//! ```

use core::ops::{Index, IndexMut};

use crate::alloc::allocator::{out_of_memory, AllocError, ErrorHandler};
use crate::log::log_trace;

/// Records per block when no size is configured.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// An append-only arena of `T` records grown in fixed-size blocks.
pub struct BlockArena<T> {
    blocks: Vec<Vec<T>>,
    block_size: usize,
    len: usize,
    on_error: Option<ErrorHandler>,
}

impl<T> BlockArena<T> {
    /// Creates an empty arena that grows `block_size` records at a time.
    ///
    /// # Panics
    /// Panics if `block_size` is zero.
    pub fn new(block_size: usize, on_error: Option<ErrorHandler>) -> Self {
        assert!(block_size != 0, "BlockArena block size must be > 0");
        Self {
            blocks: Vec::new(),
            block_size,
            len: 0,
            on_error,
        }
    }

    /// Creates an arena whose block table is pre-sized for `records` records.
    ///
    /// Only the table of block pointers is reserved; blocks themselves are
    /// still allocated on demand.
    pub fn with_capacity(block_size: usize, records: usize, on_error: Option<ErrorHandler>) -> Self {
        let mut arena = Self::new(block_size, on_error);
        // Only a hint: blocks are still reserved fallibly in `grow`.
        let _ = arena.blocks.try_reserve(records.div_ceil(block_size));
        arena
    }

    /// Replaces the handler called when a new block cannot be allocated.
    pub fn set_error_handler(&mut self, on_error: Option<ErrorHandler>) {
        self.on_error = on_error;
    }

    /// Number of records handed out so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Records per block.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks currently owned by the arena.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total records the owned blocks can hold, skipped tails included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.blocks.len() * self.block_size
    }

    #[inline(always)]
    fn locate(&self, index: usize) -> (usize, usize) {
        (index / self.block_size, index % self.block_size)
    }

    /// Returns the record at `index`, if it has been allocated.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        let (b, o) = self.locate(index);
        self.blocks.get(b)?.get(o)
    }

    /// Returns the record at `index` mutably, if it has been allocated.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let (b, o) = self.locate(index);
        self.blocks.get_mut(b)?.get_mut(o)
    }

    /// Returns the records at `index` and `index + 1` mutably.
    ///
    /// Both records must come from the same run, which `allocate(2)`
    /// guarantees.
    ///
    /// # Panics
    /// Panics if either record has not been allocated from the same block.
    pub fn pair_mut(&mut self, index: usize) -> (&mut T, &mut T) {
        let (b, o) = self.locate(index);
        let (lo, hi) = self.blocks[b].split_at_mut(o + 1);
        (&mut lo[o], &mut hi[0])
    }

    /// Iterates over `(index, record)` in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        let block_size = self.block_size;
        self.blocks.iter().enumerate().flat_map(move |(b, block)| {
            block
                .iter()
                .enumerate()
                .map(move |(o, record)| (b * block_size + o, record))
        })
    }

    fn grow(&mut self) -> Result<(), AllocError> {
        let mut block = Vec::new();
        if block.try_reserve_exact(self.block_size).is_err() || self.blocks.try_reserve(1).is_err() {
            return Err(out_of_memory::<T>(self.on_error, self.block_size));
        }
        self.blocks.push(block);
        log_trace!(
            blocks = self.blocks.len(),
            block_size = self.block_size,
            "block arena grew"
        );
        Ok(())
    }
}

impl<T: Default> BlockArena<T> {
    /// Allocates `count` contiguous default-initialized records and returns
    /// the index of the first one.
    ///
    /// # Errors
    /// [`AllocError::RunTooLong`] if `count` exceeds the block size, or
    /// [`AllocError::OutOfMemory`] if a new block cannot be allocated and an
    /// error handler is installed. Without a handler, exhaustion terminates
    /// the process.
    pub fn allocate(&mut self, count: usize) -> Result<usize, AllocError> {
        if count > self.block_size {
            return Err(AllocError::RunTooLong {
                requested: count,
                block_size: self.block_size,
            });
        }

        let fits = self
            .blocks
            .last()
            .is_some_and(|block| block.len() + count <= self.block_size);
        if !fits {
            self.grow()?;
        }

        let block_idx = self.blocks.len() - 1;
        let block = &mut self.blocks[block_idx];
        let offset = block.len();
        // Capacity was reserved exactly, so this never reallocates.
        block.extend((0..count).map(|_| T::default()));
        self.len += count;

        Ok(block_idx * self.block_size + offset)
    }
}

impl<T> Index<usize> for BlockArena<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        let (b, o) = self.locate(index);
        &self.blocks[b][o]
    }
}

impl<T> IndexMut<usize> for BlockArena<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let (b, o) = self.locate(index);
        &mut self.blocks[b][o]
    }
}

impl<T> core::fmt::Debug for BlockArena<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BlockArena")
            .field("len", &self.len)
            .field("block_size", &self.block_size)
            .field("blocks", &self.blocks.len())
            .finish()
    }
}
