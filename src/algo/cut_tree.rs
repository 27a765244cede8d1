/*!
# Gomory-Hu Cut Trees

A Gomory-Hu tree of an undirected capacitated graph `G` is a tree on the
nodes of `G` whose edges carry capacities such that for any two nodes `u`
and `v`, the minimum capacity on the tree path between them equals the
value of a minimum u-v cut in `G`. All `n * (n - 1) / 2` pairwise cut
values are thus encoded by `n - 1` flow computations.

The construction here is the classical contraction-based one, not the
Gusfield variant: it maintains a partition tree whose nodes are clusters
of original nodes. Each round picks a cluster with at least two members,
contracts everything outside of it component-wise, splits it along a
minimum cut between two of its members and reattaches the incident tree
edges to whichever side fully contains their cluster. After `n - 1`
rounds every cluster is a singleton and the partition tree is the result.
*/

use itertools::Itertools;
use stream_bitset::prelude::*;

use super::*;
use crate::{Error, repr::CapacityGraph};

/// Construction state for the Gomory-Hu tree of a fixed input graph.
///
/// ```
/// use cuttree::{prelude::*, algo::*};
///
/// let graph = CapacityGraph::from_edges(3, [((0, 1), 3u64), ((1, 2), 1), ((0, 2), 2)]);
/// let tree = GomoryHu::new(&graph).unwrap().compute();
/// assert_eq!(tree.min_cut_between(0, 1), Some(4));
/// ```
pub struct GomoryHu<'a> {
    graph: &'a CapacityGraph,
    /// Partition tree; edges carry cut values.
    tree: CapacityGraph,
    /// Cluster of original nodes per live tree node, `None` for dead slots.
    clusters: Vec<Option<NodeBitSet>>,
}

impl<'a> GomoryHu<'a> {
    /// Prepares the construction for `graph`. The initial partition tree is
    /// a single node holding all of the graph's nodes.
    /// Fails on a graph without nodes.
    pub fn new(graph: &'a CapacityGraph) -> Result<Self, Error> {
        if graph.is_empty() {
            return Err(Error::EmptyGraph);
        }

        // Every round retires one tree node and creates two.
        let slots = 2 * graph.number_of_nodes() - 1;
        let mut tree = CapacityGraph::with_node_slots(0, slots);
        tree.add_node();

        Ok(Self {
            graph,
            tree,
            clusters: vec![Some(graph.vertex_bitset_set())],
        })
    }

    /// Runs the remaining rounds and returns the finished tree.
    pub fn compute(mut self) -> CutTree {
        while let Some(x) = self.next_splittable() {
            self.split(x);
        }
        self.expand()
    }

    /// Returns a live tree node whose cluster still has at least two members.
    fn next_splittable(&self) -> Option<Node> {
        self.tree
            .vertices()
            .find(|&x| self.cluster(x).cardinality() > 1)
    }

    fn cluster(&self, x: Node) -> &NodeBitSet {
        self.clusters[x as usize].as_ref().unwrap()
    }

    /// Contracts each connected component of the tree without `x` into a
    /// single node of a copy of the input graph. Returns the contracted
    /// graph and the (representative, member set) pair per component, with
    /// member sets over original node ids.
    fn contract_tree_components(&self, x: Node) -> (CapacityGraph, Vec<(Node, NodeBitSet)>) {
        let mut gp = self.graph.clone();
        let mut super_clusters = Vec::new();

        for component in self.tree.connected_components_exclude_nodes([x]) {
            let mut members = self.graph.vertex_bitset_unset();
            for y in component {
                members.set_bits(self.cluster(y).iter_set_bits());
            }

            let rep = gp.contract(&members);
            super_clusters.push((rep, members));
        }

        (gp, super_clusters)
    }

    /// One round: splits the cluster of tree node `x` along a minimum cut
    /// between two of its members.
    fn split(&mut self, x: Node) {
        let (gp, super_clusters) = self.contract_tree_components(x);

        // Two smallest members act as terminals; both survive contraction
        // since only nodes outside the cluster are contracted.
        let (s, t) = self
            .cluster(x)
            .iter_set_bits()
            .next_tuple()
            .expect("split of a singleton cluster");

        let cut = gp.min_st_cut(s, t);

        // Split the cluster along the cut. `s` and `t` guarantee that
        // neither side is empty.
        let cluster = self.clusters[x as usize].take().unwrap();
        let mut a = self.graph.vertex_bitset_unset();
        let mut b = self.graph.vertex_bitset_unset();
        for u in cluster.iter_set_bits() {
            if cut.source_side.get_bit(u) {
                a.set_bit(u);
            } else {
                b.set_bit(u);
            }
        }
        assert!(a.get_bit(s) && b.get_bit(t));

        // Fold each contracted component onto the side of its representative
        // to obtain the full bipartition of the original node set.
        let mut full_a = a.clone();
        let mut full_b = b.clone();
        for (rep, members) in &super_clusters {
            if cut.source_side.get_bit(*rep) {
                full_a.set_bits(members.iter_set_bits());
            } else {
                full_b.set_bits(members.iter_set_bits());
            }
        }

        let neighbors = self.tree.neighbors_of(x).collect_vec();

        let na = self.add_tree_node(a);
        let nb = self.add_tree_node(b);

        // Every neighboring cluster lies entirely on one side of the cut;
        // its tree edge keeps its capacity and moves to that side.
        for (y, c) in neighbors {
            let on_a = self.cluster(y).iter_set_bits().all(|u| full_a.get_bit(u));
            let on_b = self.cluster(y).iter_set_bits().all(|u| full_b.get_bit(u));
            assert!(
                on_a || on_b,
                "cluster {:?} of tree node {y} straddles the ({s},{t})-cut of node {x}: A = {:?}, B = {:?}",
                self.cluster(y).iter_set_bits().collect_vec(),
                full_a.iter_set_bits().collect_vec(),
                full_b.iter_set_bits().collect_vec()
            );
            self.tree.add_capacity(if on_a { na } else { nb }, y, c);
        }

        self.tree.add_capacity(na, nb, cut.value);
        self.tree.remove_node(x);
    }

    fn add_tree_node(&mut self, cluster: NodeBitSet) -> Node {
        let u = self.tree.add_node();
        debug_assert_eq!(u as usize, self.clusters.len());
        self.clusters.push(Some(cluster));
        u
    }

    /// Maps every (by now singleton) tree node back to its original node.
    fn expand(self) -> CutTree {
        let mut original = vec![INVALID_NODE; self.tree.vertices_range().end as usize];
        for x in self.tree.vertices() {
            let mut members = self.cluster(x).iter_set_bits();
            let u = members.next().unwrap();
            assert!(members.next().is_none(), "non-singleton cluster {x} left");
            original[x as usize] = u;
        }

        let nodes = self.graph.vertex_bitset_set();
        let mut nbs = vec![Vec::new(); nodes.number_of_bits() as usize];
        let mut edges = Vec::with_capacity(self.tree.len().saturating_sub(1));

        for (Edge(x, y), c) in self.tree.edges(true) {
            let (u, v) = (original[x as usize], original[y as usize]);
            edges.push((Edge(u, v).normalized(), c));
            nbs[u as usize].push((v, c));
            nbs[v as usize].push((u, c));
        }

        CutTree {
            num_nodes: self.graph.number_of_nodes(),
            nodes,
            edges,
            nbs,
        }
    }
}

/// A finished Gomory-Hu tree over the nodes of the input graph.
///
/// Carries `n - 1` capacitated tree edges; the minimum capacity on the path
/// between two nodes is the value of a minimum cut separating them in the
/// input graph. Nodes in different connected components of the input are
/// joined by edges of capacity `0`.
pub struct CutTree {
    num_nodes: NumNodes,
    nodes: NodeBitSet,
    edges: Vec<(Edge, Capacity)>,
    nbs: Vec<Vec<(Node, Capacity)>>,
}

impl CutTree {
    pub fn number_of_nodes(&self) -> NumNodes {
        self.num_nodes
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    /// Normalized tree edges with their cut values.
    pub fn edges(&self) -> impl Iterator<Item = (Edge, Capacity)> + '_ {
        self.edges.iter().copied()
    }

    /// Tree neighbors of `u` with the capacities of the connecting edges.
    /// ** Panics if `u` is outside the node-id space **
    pub fn neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Capacity)> + '_ {
        self.nbs[u as usize].iter().copied()
    }

    /// Value of a minimum cut separating `u` and `v` in the input graph,
    /// i.e. the smallest capacity on the tree path between them.
    /// Returns `None` if `u == v` or either id is not a node of the tree.
    pub fn min_cut_between(&self, u: Node, v: Node) -> Option<Capacity> {
        let in_tree =
            |w: Node| w < self.nodes.number_of_bits() && self.nodes.get_bit(w);
        if u == v || !in_tree(u) || !in_tree(v) {
            return None;
        }

        // DFS from u, tracking the smallest capacity on the path so far.
        let mut visited = NodeBitSet::new_with_bits_set(self.nodes.number_of_bits(), [u]);
        let mut stack = vec![(u, Capacity::MAX)];

        while let Some((w, path_min)) = stack.pop() {
            for &(z, c) in &self.nbs[w as usize] {
                let path_min = path_min.min(c);
                if z == v {
                    return Some(path_min);
                }
                if !visited.set_bit(z) {
                    stack.push((z, path_min));
                }
            }
        }

        unreachable!("cut tree spans all nodes");
    }
}

/// Gomory-Hu tree construction for any capacitated graph.
pub trait CutTreeConstruction {
    /// Builds the Gomory-Hu tree of the graph with `n - 1` minimum-cut
    /// computations. Fails on a graph without nodes.
    fn gomory_hu_tree(&self) -> Result<CutTree, Error>;
}

impl CutTreeConstruction for CapacityGraph {
    fn gomory_hu_tree(&self) -> Result<CutTree, Error> {
        Ok(GomoryHu::new(self)?.compute())
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::gens::WeightedGnm;

    fn all_pairs_matrix(tree: &CutTree, n: Node) -> Vec<Vec<Option<Capacity>>> {
        (0..n)
            .map(|u| (0..n).map(|v| tree.min_cut_between(u, v)).collect())
            .collect()
    }

    #[test]
    fn empty_graph_is_rejected() {
        let graph = CapacityGraph::new(0);
        assert!(matches!(GomoryHu::new(&graph), Err(Error::EmptyGraph)));
    }

    #[test]
    fn single_node() {
        let tree = CapacityGraph::new(1).gomory_hu_tree().unwrap();
        assert_eq!(tree.number_of_nodes(), 1);
        assert_eq!(tree.number_of_edges(), 0);
        assert_eq!(tree.min_cut_between(0, 0), None);
    }

    #[test]
    fn two_nodes() {
        let graph = CapacityGraph::from_edges(2, [((0, 1), 42u64)]);
        let tree = graph.gomory_hu_tree().unwrap();

        assert_eq!(tree.edges().collect_vec(), vec![(Edge(0, 1), 42)]);
        assert_eq!(tree.min_cut_between(0, 1), Some(42));
        assert_eq!(tree.min_cut_between(1, 0), Some(42));
    }

    #[test]
    fn triangle() {
        let graph = CapacityGraph::from_edges(3, [((0, 1), 3u64), ((1, 2), 1), ((0, 2), 2)]);
        let tree = graph.gomory_hu_tree().unwrap();

        assert_eq!(tree.number_of_edges(), 2);
        assert_eq!(tree.min_cut_between(0, 1), Some(4));
        assert_eq!(tree.min_cut_between(1, 2), Some(3));
        assert_eq!(tree.min_cut_between(0, 2), Some(3));
    }

    #[test]
    fn query_rejects_invalid_pairs() {
        let graph = CapacityGraph::from_edges(2, [((0, 1), 1u64)]);
        let tree = graph.gomory_hu_tree().unwrap();

        assert_eq!(tree.min_cut_between(0, 0), None);
        assert_eq!(tree.min_cut_between(0, 2), None);
        assert_eq!(tree.min_cut_between(5, 0), None);
    }

    #[test]
    fn disconnected_components_are_bridged_with_zero() {
        // two triangles without a connection
        let graph = CapacityGraph::from_edges(
            6,
            [
                ((0, 1), 2u64),
                ((1, 2), 2),
                ((0, 2), 2),
                ((3, 4), 5),
                ((4, 5), 5),
                ((3, 5), 5),
            ],
        );
        let tree = graph.gomory_hu_tree().unwrap();

        assert_eq!(tree.number_of_edges(), 5);
        assert_eq!(tree.edges().filter(|&(_, c)| c == 0).count(), 1);
        assert_eq!(tree.min_cut_between(0, 3), Some(0));
        assert_eq!(tree.min_cut_between(0, 1), Some(4));
        assert_eq!(tree.min_cut_between(3, 5), Some(10));
    }

    #[test]
    fn zero_capacity_edges_do_not_connect() {
        let graph = CapacityGraph::from_edges(3, [((0, 1), 5u64), ((1, 2), 0)]);
        let tree = graph.gomory_hu_tree().unwrap();

        assert_eq!(tree.min_cut_between(0, 1), Some(5));
        assert_eq!(tree.min_cut_between(1, 2), Some(0));
        assert_eq!(tree.min_cut_between(0, 2), Some(0));
    }

    #[test]
    fn tree_shape() {
        let rng = &mut Pcg64::seed_from_u64(12345);
        let graph = WeightedGnm::new()
            .nodes(20)
            .edges(50)
            .max_capacity(10)
            .generate(rng);
        let tree = graph.gomory_hu_tree().unwrap();

        assert_eq!(tree.number_of_nodes(), 20);
        assert_eq!(tree.number_of_edges(), 19);

        // n - 1 edges and connected, hence a tree
        let mut seen = NodeBitSet::new_with_bits_set(20, [0u32]);
        let mut stack = vec![0];
        while let Some(u) = stack.pop() {
            for (v, _) in tree.neighbors_of(u) {
                if !seen.set_bit(v) {
                    stack.push(v);
                }
            }
        }
        assert_eq!(seen.cardinality(), 20);
    }

    #[test]
    fn path_minimum_matches_direct_min_cut() {
        let rng = &mut Pcg64::seed_from_u64(314159);

        for (n, m) in [(8, 12), (12, 25), (15, 40)] {
            let graph = WeightedGnm::new()
                .nodes(n)
                .edges(m)
                .max_capacity(8)
                .generate(rng);
            let tree = graph.gomory_hu_tree().unwrap();

            for u in 0..n {
                for v in (u + 1)..n {
                    assert_eq!(
                        tree.min_cut_between(u, v),
                        Some(graph.min_st_cut(u, v).value),
                        "pair ({u},{v}) of G(n={n},m={m})"
                    );
                }
            }
        }
    }

    #[test]
    fn tree_edges_conserve_crossing_capacity() {
        let rng = &mut Pcg64::seed_from_u64(2718);
        let graph = WeightedGnm::new()
            .nodes(12)
            .edges(30)
            .max_capacity(9)
            .generate(rng);
        let tree = graph.gomory_hu_tree().unwrap();

        for (Edge(u, v), c) in tree.edges() {
            // side of u after removing the tree edge {u, v}
            let mut side = NodeBitSet::new_with_bits_set(12, [u]);
            let mut stack = vec![u];
            while let Some(w) = stack.pop() {
                for (z, _) in tree.neighbors_of(w) {
                    if (w, z) != (u, v) && (z, w) != (u, v) && !side.set_bit(z) {
                        stack.push(z);
                    }
                }
            }

            assert_eq!(graph.cut_capacity(&side), c, "tree edge ({u},{v})");
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let rng = &mut Pcg64::seed_from_u64(99);
        let graph = WeightedGnm::new()
            .nodes(14)
            .edges(35)
            .max_capacity(6)
            .generate(rng);

        let first = graph.gomory_hu_tree().unwrap();
        let second = graph.gomory_hu_tree().unwrap();

        assert_eq!(
            first.edges().map(|(_, c)| c).sorted().collect_vec(),
            second.edges().map(|(_, c)| c).sorted().collect_vec()
        );
        assert_eq!(
            all_pairs_matrix(&first, 14),
            all_pairs_matrix(&second, 14)
        );
    }
}
