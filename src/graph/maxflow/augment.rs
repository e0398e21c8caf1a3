use crate::graph::capacity::Capacity;
use crate::graph::error::GraphError;
use crate::graph::records::{ArcId, NodeId, Parent};
use crate::graph::store::Graph;

impl<C, F> Graph<C, F>
where
    C: Capacity,
    F: Capacity + From<C>,
{
    /// Next arc toward the root of `i`'s tree, or `None` at the root.
    #[inline(always)]
    fn parent_arc(&self, i: NodeId) -> Option<ArcId> {
        match self.nodes[i].parent {
            Parent::Arc(a) => Some(a),
            parent => {
                debug_assert_eq!(parent, Parent::Terminal, "augmenting path left the tree");
                None
            }
        }
    }

    /// Pushes the bottleneck flow along SOURCE -> ... -> `bridge` -> ... -> SINK.
    ///
    /// Nodes whose parent arc (or terminal link) saturates become orphans.
    pub(crate) fn augment(&mut self, bridge: ArcId) -> Result<(), GraphError> {
        let mid = self.arcs[bridge.0];
        let source_end = self.arcs[mid.sister.0].head;
        let sink_end = mid.head;

        // Bottleneck: bridge, source path (flow runs parent -> child, i.e. on
        // the sister of each parent arc), source root link, sink path, sink
        // root link.
        let mut bottleneck = mid.r_cap;
        let mut i = source_end;
        while let Some(a) = self.parent_arc(i) {
            let up = self.arcs[a.0];
            let cap = self.arcs[up.sister.0].r_cap;
            if cap < bottleneck {
                bottleneck = cap;
            }
            i = up.head;
        }
        if self.nodes[i].tr_cap < bottleneck {
            bottleneck = self.nodes[i].tr_cap;
        }

        let mut i = sink_end;
        while let Some(a) = self.parent_arc(i) {
            let up = self.arcs[a.0];
            if up.r_cap < bottleneck {
                bottleneck = up.r_cap;
            }
            i = up.head;
        }
        if -self.nodes[i].tr_cap < bottleneck {
            bottleneck = -self.nodes[i].tr_cap;
        }

        self.arcs[mid.sister.0].r_cap = self.arcs[mid.sister.0].r_cap + bottleneck;
        self.arcs[bridge.0].r_cap = mid.r_cap - bottleneck;

        let mut i = source_end;
        while let Some(a) = self.parent_arc(i) {
            let up = self.arcs[a.0];
            self.arcs[a.0].r_cap = up.r_cap + bottleneck;
            let down = &mut self.arcs[up.sister.0];
            down.r_cap = down.r_cap - bottleneck;
            if down.r_cap.is_zero() {
                self.orphan_front(i)?;
            }
            i = up.head;
        }
        self.nodes[i].tr_cap = self.nodes[i].tr_cap - bottleneck;
        if self.nodes[i].tr_cap.is_zero() {
            self.orphan_front(i)?;
        }

        let mut i = sink_end;
        while let Some(a) = self.parent_arc(i) {
            let up = self.arcs[a.0];
            let down = &mut self.arcs[up.sister.0];
            down.r_cap = down.r_cap + bottleneck;
            self.arcs[a.0].r_cap = up.r_cap - bottleneck;
            if self.arcs[a.0].r_cap.is_zero() {
                self.orphan_front(i)?;
            }
            i = up.head;
        }
        self.nodes[i].tr_cap = self.nodes[i].tr_cap + bottleneck;
        if self.nodes[i].tr_cap.is_zero() {
            self.orphan_front(i)?;
        }

        self.flow = self.flow + F::from(bottleneck);
        self.stats.augmentations += 1;
        Ok(())
    }

    fn orphan_front(&mut self, i: NodeId) -> Result<(), GraphError> {
        self.nodes[i].parent = Parent::Orphan;
        self.orphans.push_front(i)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::records::Parent;
    use crate::Graph;

    #[test]
    fn test_augment_saturates_bottleneck_and_orphans() {
        // 0 (source root) -> 1 -> 2 (sink root), bottleneck on 1 -> 2.
        let mut g: Graph<i32> = Graph::new(3, 2);
        g.add_nodes(3).unwrap();
        g.set_terminal_weights(0, 9, 0).unwrap();
        g.set_terminal_weights(2, 0, 9).unwrap();
        g.add_edge(0, 1, 5, 0).unwrap();
        g.add_edge(1, 2, 2, 0).unwrap();

        g.init_trees();
        // Hand-build the source tree: 1 hangs off 0 through the sister of 0->1.
        let a01 = g.nodes[0].first.unwrap();
        let sister = g.arcs[a01.0].sister;
        g.nodes[1].parent = Parent::Arc(sister);
        g.nodes[1].is_sink = false;

        let bridge = g.nodes[1].first.unwrap();
        assert_eq!(g.arcs[bridge.0].head, 2);
        g.augment(bridge).unwrap();

        assert_eq!(g.flow(), 2);
        assert_eq!(g.arcs[bridge.0].r_cap, 0);
        assert_eq!(g.arcs[a01.0].r_cap, 3);
        assert_eq!(g.nodes[0].tr_cap, 7);
        assert_eq!(g.nodes[2].tr_cap, -7);
        // The bridge is not a parent arc; no tree link saturated.
        assert!(g.orphans.is_empty());
        assert!(g.validate_invariants());
    }
}
