#![allow(dead_code)]

use std::collections::VecDeque;

use bkflow::{Graph, GraphError, Segment};
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};

/// A flow network described independently of the solver.
#[derive(Debug, Clone)]
pub struct Network {
    pub nodes: usize,
    /// `(from, to, cap, rev_cap)` in insertion order.
    pub edges: Vec<(usize, usize, i64, i64)>,
    /// `(to_source, to_sink)` per node.
    pub terminals: Vec<(i64, i64)>,
}

impl Network {
    pub fn new(nodes: usize) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
            terminals: vec![(0, 0); nodes],
        }
    }

    pub fn edge(mut self, from: usize, to: usize, cap: i64, rev_cap: i64) -> Self {
        self.edges.push((from, to, cap, rev_cap));
        self
    }

    pub fn terminal(mut self, node: usize, to_source: i64, to_sink: i64) -> Self {
        self.terminals[node] = (to_source, to_sink);
        self
    }

    /// A `width x height` 4-connected grid with deterministic pseudo-random
    /// weights, shaped like a segmentation energy.
    pub fn grid(width: usize, height: usize, seed: u64) -> Self {
        let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let mut next = move |modulo: i64| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) % modulo as u64) as i64
        };

        let mut net = Network::new(width * height);
        for y in 0..height {
            for x in 0..width {
                let i = y * width + x;
                net.terminals[i] = (next(20), next(20));
                if x + 1 < width {
                    let w = next(10);
                    net.edges.push((i, i + 1, w, w));
                }
                if y + 1 < height {
                    let w = next(10);
                    net.edges.push((i, i + width, w, next(10)));
                }
            }
        }
        net
    }

    pub fn build(&self) -> Result<Graph<i64>, GraphError> {
        let mut g = Graph::new(self.nodes, self.edges.len());
        if self.nodes > 0 {
            g.add_nodes(self.nodes)?;
        }
        for (i, &(s, t)) in self.terminals.iter().enumerate() {
            g.set_terminal_weights(i, s, t)?;
        }
        for &(u, v, c, rc) in &self.edges {
            g.add_edge(u, v, c, rc)?;
        }
        Ok(g)
    }

    /// Same network with `f64` capacities.
    pub fn build_f64(&self) -> Result<Graph<f64>, GraphError> {
        let mut g = Graph::new(self.nodes, self.edges.len());
        if self.nodes > 0 {
            g.add_nodes(self.nodes)?;
        }
        for (i, &(s, t)) in self.terminals.iter().enumerate() {
            g.set_terminal_weights(i, s as f64, t as f64)?;
        }
        for &(u, v, c, rc) in &self.edges {
            g.add_edge(u, v, c as f64, rc as f64)?;
        }
        Ok(g)
    }

    /// Reference max-flow (Edmonds–Karp on a dense matrix with explicit
    /// terminals `nodes` and `nodes + 1`). Terminal weights must be
    /// non-negative.
    pub fn edmonds_karp(&self) -> i64 {
        let n = self.nodes + 2;
        let (s, t) = (self.nodes, self.nodes + 1);
        let mut cap = vec![vec![0i64; n]; n];
        for &(u, v, c, rc) in &self.edges {
            cap[u][v] += c;
            cap[v][u] += rc;
        }
        for (i, &(src, snk)) in self.terminals.iter().enumerate() {
            cap[s][i] += src;
            cap[i][t] += snk;
        }

        let mut flow = 0;
        loop {
            let mut prev = vec![usize::MAX; n];
            prev[s] = s;
            let mut queue = VecDeque::from([s]);
            while let Some(u) = queue.pop_front() {
                for v in 0..n {
                    if prev[v] == usize::MAX && cap[u][v] > 0 {
                        prev[v] = u;
                        queue.push_back(v);
                    }
                }
            }
            if prev[t] == usize::MAX {
                return flow;
            }

            let mut bottleneck = i64::MAX;
            let mut v = t;
            while v != s {
                let u = prev[v];
                bottleneck = bottleneck.min(cap[u][v]);
                v = u;
            }
            let mut v = t;
            while v != s {
                let u = prev[v];
                cap[u][v] -= bottleneck;
                cap[v][u] += bottleneck;
                v = u;
            }
            flow += bottleneck;
        }
    }

    /// Capacity of the cut induced by `labels`.
    pub fn cut_value(&self, labels: &[Segment]) -> i64 {
        let mut total = 0;
        for (i, &(src, snk)) in self.terminals.iter().enumerate() {
            total += match labels[i] {
                Segment::Source => snk,
                Segment::Sink => src,
            };
        }
        for &(u, v, c, rc) in &self.edges {
            match (labels[u], labels[v]) {
                (Segment::Source, Segment::Sink) => total += c,
                (Segment::Sink, Segment::Source) => total += rc,
                _ => {}
            }
        }
        total
    }
}

pub fn labels(g: &Graph<i64>) -> Vec<Segment> {
    (0..g.node_count())
        .map(|i| g.what_segment(i).expect("solved graph"))
        .collect()
}

/// The residual network of a solved graph, with explicit terminal nodes.
pub struct Residual {
    pub graph: DiGraph<(), ()>,
    pub source: NodeIndex,
    pub sink: NodeIndex,
}

impl Residual {
    pub fn of(g: &Graph<i64>) -> Self {
        let n = g.node_count();
        let mut graph = DiGraph::with_capacity(n + 2, 2 * g.edge_count() + n);
        for _ in 0..n + 2 {
            graph.add_node(());
        }
        let (source, sink) = (NodeIndex::new(n), NodeIndex::new(n + 1));

        for e in g.edges() {
            if e.residual > 0 {
                graph.add_edge(NodeIndex::new(e.from), NodeIndex::new(e.to), ());
            }
            if e.reverse_residual > 0 {
                graph.add_edge(NodeIndex::new(e.to), NodeIndex::new(e.from), ());
            }
        }
        for i in 0..n {
            let tr = g.terminal_residual(i).expect("valid node");
            if tr > 0 {
                graph.add_edge(source, NodeIndex::new(i), ());
            } else if tr < 0 {
                graph.add_edge(NodeIndex::new(i), sink, ());
            }
        }
        Self { graph, source, sink }
    }

    pub fn has_augmenting_path(&self) -> bool {
        has_path_connecting(&self.graph, self.source, self.sink, None)
    }

    pub fn reachable_from_source(&self, node: usize) -> bool {
        has_path_connecting(&self.graph, self.source, NodeIndex::new(node), None)
    }
}

/// Checks capacity bounds and flow conservation of a solved graph against the
/// network it was built from.
pub fn assert_feasible(net: &Network, g: &Graph<i64>) {
    let mut net_inflow = vec![0i64; net.nodes];
    for (&(u, v, c, rc), e) in net.edges.iter().zip(g.edges()) {
        assert_eq!((e.from, e.to), (u, v), "edge order changed");
        assert!(e.residual >= 0 && e.reverse_residual >= 0);
        assert_eq!(e.residual + e.reverse_residual, c + rc, "edge {u}->{v} lost capacity");
        assert!(e.residual <= c + rc);

        let pushed = c - e.residual;
        net_inflow[v] += pushed;
        net_inflow[u] -= pushed;
    }

    for (i, &(src, snk)) in net.terminals.iter().enumerate() {
        let tr = g.terminal_residual(i).unwrap();
        // Flow arriving through edges must leave through the terminals.
        assert_eq!(net_inflow[i], tr - (src - snk), "conservation violated at node {i}");
    }
}
