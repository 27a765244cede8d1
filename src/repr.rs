/*!
# Graph Representation

A single representation suffices here: an adjacency-map graph with `u64`
capacities on the edges. Contraction and node removal are the hot operations
of the cut-tree construction, so each node stores its weighted neighborhood
as a `FxHashMap` and removed nodes leave a hole in the id space instead of
triggering a relabeling.
*/

use fxhash::FxHashMap;
use stream_bitset::prelude::*;

use crate::{edge::*, node::*, ops::*, Error};

/// An undirected graph with non-negative integer capacities on its edges.
///
/// Node ids live in `0..slots` where `slots` is fixed at construction time
/// (see [`CapacityGraph::with_node_slots`]). Removing a node keeps its slot;
/// adding a node reuses no slot but claims the next unallocated one.
#[derive(Clone)]
pub struct CapacityGraph {
    /// Weighted neighborhoods, indexed by node id. Symmetric for live edges.
    nbs: Vec<FxHashMap<Node, Capacity>>,
    /// Live nodes. Removed slots stay allocated but unset.
    alive: NodeBitSet,
    /// Number of slots handed out so far (live or since removed).
    allocated: NumNodes,
    num_edges: NumEdges,
}

impl CapacityGraph {
    /// Creates a graph with `n` live nodes and no edges.
    pub fn new(n: NumNodes) -> Self {
        Self::with_node_slots(n, n)
    }

    /// Creates a graph with `n` live nodes and room for `slots - n` further
    /// nodes added later via [`CapacityGraph::add_node`].
    /// ** Panics if `slots < n` **
    pub fn with_node_slots(n: NumNodes, slots: NumNodes) -> Self {
        assert!(n <= slots);
        Self {
            nbs: vec![FxHashMap::default(); slots as usize],
            alive: NodeBitSet::new_with_bits_set(slots, 0..n),
            allocated: n,
            num_edges: 0,
        }
    }

    /// Creates a graph with `n` nodes from an edge list with capacities.
    /// Returns an error if an endpoint is out of range or an edge is a loop.
    /// Parallel edges are summed.
    pub fn try_from_edges<E, I>(n: NumNodes, edges: I) -> Result<Self, Error>
    where
        E: Into<Edge>,
        I: IntoIterator<Item = (E, Capacity)>,
    {
        let mut graph = Self::new(n);
        for (e, c) in edges {
            let Edge(u, v) = e.into();
            if u >= n || v >= n {
                return Err(Error::NodeOutOfRange {
                    node: u.max(v),
                    order: n,
                });
            }
            if u == v {
                return Err(Error::SelfLoop { node: u });
            }
            graph.add_capacity(u, v, c);
        }
        Ok(graph)
    }

    /// Creates a graph with `n` nodes from an edge list with capacities.
    /// ** Panics on out-of-range endpoints or loops **
    pub fn from_edges<E, I>(n: NumNodes, edges: I) -> Self
    where
        E: Into<Edge>,
        I: IntoIterator<Item = (E, Capacity)>,
    {
        Self::try_from_edges(n, edges).unwrap()
    }

    /// Claims the next unallocated slot and returns it as a new isolated node.
    /// ** Panics if all slots are allocated **
    pub fn add_node(&mut self) -> Node {
        assert!(
            (self.allocated as usize) < self.nbs.len(),
            "all {} node slots allocated",
            self.nbs.len()
        );
        let u = self.allocated;
        self.allocated += 1;
        self.alive.set_bit(u);
        u
    }

    /// Removes node `u` and all edges at it. The slot is not reused.
    /// ** Panics if `u` is not a live node **
    pub fn remove_node(&mut self, u: Node) {
        assert!(self.alive.clear_bit(u), "node {u} is not live");
        let nbs = std::mem::take(&mut self.nbs[u as usize]);
        self.num_edges -= nbs.len() as NumEdges;
        for (v, _) in nbs {
            self.nbs[v as usize].remove(&u);
        }
    }

    /// Contracts the node set `nodes` into its smallest member and returns it.
    /// Edges internal to the set vanish; edges leaving the set are merged onto
    /// the representative, parallel capacities summing up. A merged capacity
    /// of `0` produces no edge.
    /// ** Panics if `nodes` is empty or contains a non-live node **
    pub fn contract(&mut self, nodes: &NodeBitSet) -> Node {
        let mut members = nodes.bitmask_stream().iter_set_bits();
        let rep = members.next().expect("contraction of an empty node set");

        let mut merged: FxHashMap<Node, Capacity> = FxHashMap::default();
        for u in std::iter::once(rep).chain(members) {
            assert!(self.alive.get_bit(u), "node {u} is not live");
            for (&v, &c) in &self.nbs[u as usize] {
                if !nodes.get_bit(v) && c > 0 {
                    *merged.entry(v).or_default() += c;
                }
            }
            if u != rep {
                self.remove_node(u);
            }
        }

        // The representative may still carry stale capacities towards the
        // outside; rebuild its neighborhood from the merge.
        let stale = std::mem::take(&mut self.nbs[rep as usize]);
        for (v, _) in stale {
            self.nbs[v as usize].remove(&rep);
            self.num_edges -= 1;
        }

        self.num_edges += merged.len() as NumEdges;
        for (&v, &c) in &merged {
            self.nbs[v as usize].insert(rep, c);
        }
        self.nbs[rep as usize] = merged;

        rep
    }
}

impl GraphNodeOrder for CapacityGraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.alive.cardinality()
    }

    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.alive.bitmask_stream().iter_set_bits()
    }

    fn vertices_range(&self) -> std::ops::Range<Node> {
        0..(self.nbs.len() as Node)
    }

    fn has_node(&self, u: Node) -> bool {
        u < self.nbs.len() as Node && self.alive.get_bit(u)
    }
}

impl GraphEdgeOrder for CapacityGraph {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl CapacityAdjacency for CapacityGraph {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Capacity)> + '_ {
        self.nbs[u as usize].iter().map(|(&v, &c)| (v, c))
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nbs[u as usize].len() as NumNodes
    }

    fn capacity_between(&self, u: Node, v: Node) -> Option<Capacity> {
        self.nbs[u as usize].get(&v).copied()
    }
}

impl CapacityEdgeEditing for CapacityGraph {
    fn add_capacity(&mut self, u: Node, v: Node, c: Capacity) {
        assert_ne!(u, v, "loops are not supported");
        assert!(self.has_node(u) && self.has_node(v));
        if let Some(cap) = self.nbs[u as usize].get_mut(&v) {
            *cap += c;
            *self.nbs[v as usize].get_mut(&u).unwrap() += c;
        } else {
            self.nbs[u as usize].insert(v, c);
            self.nbs[v as usize].insert(u, c);
            self.num_edges += 1;
        }
    }

    fn set_capacity(&mut self, u: Node, v: Node, c: Capacity) {
        assert_ne!(u, v, "loops are not supported");
        assert!(self.has_node(u) && self.has_node(v));
        if self.nbs[u as usize].insert(v, c).is_none() {
            self.num_edges += 1;
        }
        self.nbs[v as usize].insert(u, c);
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> Option<Capacity> {
        let c = self.nbs[u as usize].remove(&v)?;
        self.nbs[v as usize].remove(&u);
        self.num_edges -= 1;
        Some(c)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn sorted_edges(g: &CapacityGraph) -> Vec<(Node, Node, Capacity)> {
        g.edges(true)
            .map(|(Edge(u, v), c)| (u, v, c))
            .sorted()
            .collect_vec()
    }

    #[test]
    fn add_capacity_sums_parallel_edges() {
        let mut g = CapacityGraph::new(3);
        g.add_capacity(0, 1, 2);
        g.add_capacity(1, 0, 3);
        g.add_capacity(1, 2, 7);

        assert_eq!(g.number_of_edges(), 2);
        assert_eq!(g.capacity_between(0, 1), Some(5));
        assert_eq!(g.capacity_between(1, 0), Some(5));
        assert_eq!(g.capacity_between(0, 2), None);
        assert_eq!(sorted_edges(&g), vec![(0, 1, 5), (1, 2, 7)]);
    }

    #[test]
    fn from_edges_validates_input() {
        assert!(CapacityGraph::try_from_edges(3, [((0u32, 1u32), 1u64)]).is_ok());
        assert!(matches!(
            CapacityGraph::try_from_edges(3, [((0u32, 3u32), 1u64)]),
            Err(Error::NodeOutOfRange { node: 3, order: 3 })
        ));
        assert!(matches!(
            CapacityGraph::try_from_edges(3, [((2u32, 2u32), 1u64)]),
            Err(Error::SelfLoop { node: 2 })
        ));
    }

    #[test]
    fn set_and_remove_edges() {
        let mut g = CapacityGraph::new(3);
        g.add_capacity(0, 1, 2);
        g.set_capacity(0, 1, 9);
        g.set_capacity(1, 2, 4);

        assert_eq!(g.capacity_between(1, 0), Some(9));
        assert_eq!(g.number_of_edges(), 2);

        assert_eq!(g.remove_edge(0, 1), 9);
        assert_eq!(g.try_remove_edge(0, 1), None);
        assert_eq!(sorted_edges(&g), vec![(1, 2, 4)]);
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut g = CapacityGraph::from_edges(4, [((0, 1), 1u64), ((1, 2), 2), ((2, 3), 3)]);
        g.remove_node(1);

        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(g.number_of_edges(), 1);
        assert!(!g.has_node(1));
        assert_eq!(g.vertices().collect_vec(), vec![0, 2, 3]);
        assert_eq!(sorted_edges(&g), vec![(2, 3, 3)]);
    }

    #[test]
    fn contract_merges_parallel_capacities() {
        // Contracting {1, 2} merges the edges towards 0 and towards 3.
        let mut g = CapacityGraph::from_edges(
            4,
            [
                ((0, 1), 1u64),
                ((0, 2), 2),
                ((1, 2), 10),
                ((1, 3), 4),
                ((2, 3), 8),
            ],
        );
        let rep = g.contract(&NodeBitSet::new_with_bits_set(4, [1, 2]));

        assert_eq!(rep, 1);
        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(sorted_edges(&g), vec![(0, 1, 3), (1, 3, 12)]);
    }

    #[test]
    fn contract_keeps_representative_edges() {
        let mut g = CapacityGraph::from_edges(4, [((0, 1), 5u64), ((2, 3), 1)]);
        let rep = g.contract(&NodeBitSet::new_with_bits_set(4, [0, 3]));

        assert_eq!(rep, 0);
        assert_eq!(sorted_edges(&g), vec![(0, 1, 5), (0, 2, 1)]);
    }

    #[test]
    #[should_panic]
    fn contract_rejects_empty_set() {
        let mut g = CapacityGraph::new(3);
        g.contract(&NodeBitSet::new(3));
    }

    #[test]
    fn add_node_uses_preallocated_slots() {
        let mut g = CapacityGraph::with_node_slots(2, 4);
        g.add_capacity(0, 1, 1);

        let u = g.add_node();
        assert_eq!(u, 2);
        g.add_capacity(u, 0, 3);

        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(g.vertices_range(), 0..4);
        assert_eq!(sorted_edges(&g), vec![(0, 1, 1), (0, 2, 3)]);
    }
}
