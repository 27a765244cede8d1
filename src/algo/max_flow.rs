/*!
# Maximum Flows and Minimum Cuts

Edmonds-Karp maximum flow on a residual arc list, used to obtain minimum
s-t cuts in undirected capacitated graphs. An undirected edge of capacity
`c` becomes a pair of opposite arcs of capacity `c` where each arc doubles
as the reverse arc of the other, so pushing flow over one frees capacity
on its partner.
*/

use std::collections::VecDeque;

use stream_bitset::prelude::*;

use super::*;

/// Index into [`FlowNetwork::arcs`]. Arcs are stored in pairs, the partner
/// of arc `a` is `a ^ 1`.
type ArcId = u32;

const INVALID_ARC: ArcId = ArcId::MAX;

#[derive(Clone)]
struct Arc {
    to: Node,
    cap: Capacity,
}

/// A residual flow network between two fixed terminals.
pub struct FlowNetwork {
    arcs: Vec<Arc>,
    out: Vec<Vec<ArcId>>,
    s: Node,
    t: Node,
}

/// A minimum s-t cut: its value and the set of nodes on the source side.
///
/// `source_side` always contains `s` and never `t`. Among all minimum cuts
/// the one returned is the residual-reachable side of `s`, which depends on
/// the order augmenting paths were found in.
pub struct MinCut {
    pub value: Capacity,
    pub source_side: NodeBitSet,
}

impl FlowNetwork {
    /// Builds the network of an undirected capacitated graph: one arc pair
    /// per edge, both arcs carrying the full edge capacity.
    /// ** Panics if `s == t` **
    pub fn bidirected<G: CapacityAdjacency>(graph: &G, s: Node, t: Node) -> Self {
        assert_ne!(s, t);
        let n = graph.vertices_range().end;

        let mut net = Self {
            arcs: Vec::with_capacity(2 * graph.edges(true).count()),
            out: vec![Vec::new(); n as usize],
            s,
            t,
        };

        for (Edge(u, v), c) in graph.edges(true) {
            net.out[u as usize].push(net.arcs.len() as ArcId);
            net.arcs.push(Arc { to: v, cap: c });
            net.out[v as usize].push(net.arcs.len() as ArcId);
            net.arcs.push(Arc { to: u, cap: c });
        }

        net
    }

    /// BFS over arcs with residual capacity. Fills `pred` with the arc used
    /// to reach each node and returns *true* if `t` was reached.
    fn bfs(&self, pred: &mut [ArcId]) -> bool {
        pred.fill(INVALID_ARC);

        let mut queue = VecDeque::new();
        queue.push_back(self.s);

        while let Some(u) = queue.pop_front() {
            for &a in &self.out[u as usize] {
                let arc = &self.arcs[a as usize];
                if arc.cap == 0 || arc.to == self.s || pred[arc.to as usize] != INVALID_ARC {
                    continue;
                }
                pred[arc.to as usize] = a;
                if arc.to == self.t {
                    return true;
                }
                queue.push_back(arc.to);
            }
        }

        false
    }

    /// Augments along shortest residual paths until none remains and returns
    /// the total flow pushed.
    pub fn max_flow(&mut self) -> Capacity {
        let mut pred = vec![INVALID_ARC; self.out.len()];
        let mut flow = 0;

        while self.bfs(&mut pred) {
            let mut bottleneck = Capacity::MAX;
            let mut v = self.t;
            while v != self.s {
                let arc = &self.arcs[pred[v as usize] as usize];
                bottleneck = bottleneck.min(arc.cap);
                v = self.arcs[(pred[v as usize] ^ 1) as usize].to;
            }

            let mut v = self.t;
            while v != self.s {
                let a = pred[v as usize] as usize;
                self.arcs[a].cap -= bottleneck;
                self.arcs[a ^ 1].cap += bottleneck;
                v = self.arcs[a ^ 1].to;
            }

            flow += bottleneck;
        }

        flow
    }

    /// Computes the maximum flow and returns the induced minimum cut: the
    /// nodes still residual-reachable from `s` form the source side.
    pub fn min_cut(mut self) -> MinCut {
        let value = self.max_flow();

        let mut source_side = NodeBitSet::new(self.out.len() as NumNodes);
        source_side.set_bit(self.s);

        let mut queue = VecDeque::new();
        queue.push_back(self.s);
        while let Some(u) = queue.pop_front() {
            for &a in &self.out[u as usize] {
                let arc = &self.arcs[a as usize];
                if arc.cap > 0 && !source_side.set_bit(arc.to) {
                    queue.push_back(arc.to);
                }
            }
        }

        assert!(!source_side.get_bit(self.t));
        MinCut { value, source_side }
    }
}

/// Minimum s-t cuts for any undirected capacitated graph.
pub trait MinimumCut: CapacityAdjacency {
    /// Returns a minimum cut separating `s` from `t`.
    /// ** Panics if `s == t` **
    fn min_st_cut(&self, s: Node, t: Node) -> MinCut;
}

impl<G> MinimumCut for G
where
    G: CapacityAdjacency,
{
    fn min_st_cut(&self, s: Node, t: Node) -> MinCut {
        FlowNetwork::bidirected(self, s, t).min_cut()
    }
}
