use crate::graph::capacity::{has_residual, Capacity};
use crate::graph::error::GraphError;
use crate::graph::records::{ArcId, NodeId, Parent};
use crate::graph::store::Graph;

impl<C, F> Graph<C, F>
where
    C: Capacity,
    F: Capacity + From<C>,
{
    /// Processes orphans until none are left.
    ///
    /// Orphans from the augmentation are taken one at a time; each one's
    /// cascade (orphans appended while processing it) is drained before the
    /// next one is taken.
    pub(crate) fn adopt_orphans(&mut self) -> Result<(), GraphError> {
        let mut pending = self.orphans.take();
        while let Some(i) = self.orphans.pop_from(&mut pending) {
            self.process_orphan(i)?;
            while let Some(j) = self.orphans.pop_front() {
                self.process_orphan(j)?;
            }
        }
        debug_assert!(pending.is_empty());
        Ok(())
    }

    /// Residual capacity on arc `a` (leaving an orphan) in the direction that
    /// lets the orphan hang below the arc's head in a tree of the given side.
    #[inline(always)]
    fn toward_tree(&self, a: ArcId, is_sink: bool) -> C {
        let arc = &self.arcs[a.0];
        if is_sink {
            arc.r_cap
        } else {
            self.arcs[arc.sister.0].r_cap
        }
    }

    /// Distance from `j` to its terminal, or `None` if the path runs into an
    /// orphan. Distances are trusted only when stamped with the current time.
    fn origin_distance(&mut self, mut j: NodeId) -> Option<u32> {
        let mut d = 0;
        loop {
            let node = &mut self.nodes[j];
            if node.ts == self.time {
                return Some(d + node.dist);
            }
            d += 1;
            match node.parent {
                Parent::Terminal => {
                    node.ts = self.time;
                    node.dist = 1;
                    return Some(d);
                }
                Parent::Arc(a) => j = self.arcs[a.0].head,
                Parent::Orphan | Parent::None => return None,
            }
        }
    }

    /// Stamps the path from `j` up to the first stamped node with exact
    /// distances, starting at `d` for `j`.
    fn stamp_path(&mut self, mut j: NodeId, mut d: u32) {
        while self.nodes[j].ts != self.time {
            let node = &mut self.nodes[j];
            node.ts = self.time;
            node.dist = d;
            d -= 1;
            match node.parent {
                Parent::Arc(a) => j = self.arcs[a.0].head,
                _ => break,
            }
        }
    }

    fn process_orphan(&mut self, i: NodeId) -> Result<(), GraphError> {
        self.stats.orphans_processed += 1;
        let is_sink = self.nodes[i].is_sink;

        let mut best: Option<(ArcId, u32)> = None;
        let mut cursor = self.nodes[i].first;
        while let Some(a0) = cursor {
            let arc = self.arcs[a0.0];
            cursor = arc.next;

            if !has_residual(self.toward_tree(a0, is_sink)) {
                continue;
            }
            let j = arc.head;
            if self.nodes[j].is_sink != is_sink || self.nodes[j].parent.is_none() {
                continue;
            }
            if let Some(d) = self.origin_distance(j) {
                if best.map_or(true, |(_, d_min)| d < d_min) {
                    best = Some((a0, d));
                }
                self.stamp_path(j, d);
            }
        }

        if let Some((a0, d_min)) = best {
            let node = &mut self.nodes[i];
            node.parent = Parent::Arc(a0);
            node.ts = self.time;
            node.dist = d_min + 1;
            return Ok(());
        }

        // No parent: `i` becomes free. Neighbours that could feed it are
        // reactivated so growth can reclaim it; its children become orphans.
        self.stats.adoption_failures += 1;
        self.nodes[i].parent = Parent::None;
        self.nodes[i].ts = 0;

        let mut cursor = self.nodes[i].first;
        while let Some(a0) = cursor {
            let arc = self.arcs[a0.0];
            cursor = arc.next;

            let j = arc.head;
            let parent_j = self.nodes[j].parent;
            if self.nodes[j].is_sink != is_sink || parent_j.is_none() {
                continue;
            }
            if has_residual(self.toward_tree(a0, is_sink)) {
                self.queue.push(&mut self.nodes, j);
            }
            if let Parent::Arc(pa) = parent_j {
                if self.arcs[pa.0].head == i {
                    self.nodes[j].parent = Parent::Orphan;
                    self.orphans.push_back(j)?;
                }
            }
        }
        Ok(())
    }
}
