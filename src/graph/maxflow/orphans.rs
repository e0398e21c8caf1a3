//! Orphan list: a singly linked list of node pointers kept in a [`BlockPool`].

use crate::alloc::{AllocError, BlockPool, ErrorHandler};
use crate::graph::records::NodeId;

#[derive(Debug, Clone, Copy)]
struct NodePtr {
    node: NodeId,
    next: Option<usize>,
}

/// A detached run of orphan records.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct OrphanChain {
    first: Option<usize>,
    last: Option<usize>,
}

impl OrphanChain {
    pub(crate) fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

#[derive(Debug)]
pub(crate) struct OrphanList {
    pool: BlockPool<NodePtr>,
    chain: OrphanChain,
}

impl OrphanList {
    pub(crate) fn new(block_size: usize, on_error: Option<ErrorHandler>) -> Self {
        Self {
            pool: BlockPool::new(block_size, on_error),
            chain: OrphanChain::default(),
        }
    }

    pub(crate) fn set_error_handler(&mut self, on_error: Option<ErrorHandler>) {
        self.pool.set_error_handler(on_error);
    }

    /// Orphans created by an augmentation go to the front.
    pub(crate) fn push_front(&mut self, node: NodeId) -> Result<(), AllocError> {
        let np = self.pool.alloc(NodePtr {
            node,
            next: self.chain.first,
        })?;
        if self.chain.last.is_none() {
            self.chain.last = Some(np);
        }
        self.chain.first = Some(np);
        Ok(())
    }

    /// Orphans discovered while adopting go to the back.
    pub(crate) fn push_back(&mut self, node: NodeId) -> Result<(), AllocError> {
        let np = self.pool.alloc(NodePtr { node, next: None })?;
        match self.chain.last {
            Some(last) => {
                if let Some(ptr) = self.pool.get_mut(last) {
                    ptr.next = Some(np);
                }
            }
            None => self.chain.first = Some(np),
        }
        self.chain.last = Some(np);
        Ok(())
    }

    pub(crate) fn pop_front(&mut self) -> Option<NodeId> {
        let mut chain = core::mem::take(&mut self.chain);
        let node = self.pop_from(&mut chain);
        self.chain = chain;
        node
    }

    /// Detaches the whole list, leaving it empty.
    pub(crate) fn take(&mut self) -> OrphanChain {
        core::mem::take(&mut self.chain)
    }

    /// Pops the first node of a detached chain, recycling its record.
    pub(crate) fn pop_from(&mut self, chain: &mut OrphanChain) -> Option<NodeId> {
        let np = chain.first?;
        let ptr = self.pool.release(np)?;
        chain.first = ptr.next;
        if chain.first.is_none() {
            chain.last = None;
        }
        Some(ptr.node)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Records allocated so far (live or recycled).
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    pub(crate) fn capacity(&self) -> usize {
        self.pool.capacity()
    }
}
