//! FIFO of active nodes, threaded through the nodes' `next` fields.
//!
//! Two lists are kept: nodes are popped from the current list and pushed onto
//! the next one; when the current list runs dry the lists swap. A node whose
//! `next` is `Some` is already queued (or is the node currently being grown),
//! so pushing it again is a no-op.

use crate::graph::capacity::Capacity;
use crate::graph::records::{NodeId, NodeRecord};

#[derive(Debug, Default)]
pub(crate) struct ActiveQueue {
    first: [Option<NodeId>; 2],
    last: [Option<NodeId>; 2],
}

impl ActiveQueue {
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Marks `i` active by appending it to the next list.
    #[inline]
    pub(crate) fn push<C: Capacity>(&mut self, nodes: &mut [NodeRecord<C>], i: NodeId) {
        if nodes[i].next.is_some() {
            return;
        }
        match self.last[1] {
            Some(last) => nodes[last].next = Some(i),
            None => self.first[1] = Some(i),
        }
        self.last[1] = Some(i);
        nodes[i].next = Some(i);
    }

    /// Pops the next active node that is still attached to a tree.
    ///
    /// Nodes that lost their parent since they were queued are dropped.
    pub(crate) fn pop<C: Capacity>(&mut self, nodes: &mut [NodeRecord<C>]) -> Option<NodeId> {
        loop {
            let i = match self.first[0] {
                Some(i) => i,
                None => {
                    self.first[0] = self.first[1].take();
                    self.last[0] = self.last[1].take();
                    self.first[0]?
                }
            };

            if nodes[i].next == Some(i) {
                self.first[0] = None;
                self.last[0] = None;
            } else {
                self.first[0] = nodes[i].next;
            }
            nodes[i].next = None;

            if !nodes[i].parent.is_none() {
                return Some(i);
            }
        }
    }
}
