use std::ops::Range;

use stream_bitset::prelude::*;

use crate::{edge::*, node::*};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of (non-removed) nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_;

    /// Returns a range over the raw node-id space of the graph.
    /// In contrast to `self.vertices()`, the range returned by `self.vertices_range()` does
    /// not borrow self and hence may be used where additional mutable references of self are needed
    ///
    /// # Warning
    /// This range may include removed nodes (if supported by an implementation). It is the
    /// responsibility of the caller to identify and treat them accordingly.
    fn vertices_range(&self) -> Range<Node>;

    /// Returns *true* if `u` is a (non-removed) node of the graph
    fn has_node(&self, u: Node) -> bool {
        self.vertices().any(|v| v == u)
    }

    /// Returns empty bitset with one entry per node-id
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.vertices_range().end)
    }

    /// Returns a bitset over the node-id space with exactly the (non-removed) nodes set
    fn vertex_bitset_set(&self) -> NodeBitSet {
        NodeBitSet::new_with_bits_set(self.vertices_range().end, self.vertices())
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton_graph(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for weighted neighborhoods & edges
pub trait CapacityAdjacency: GraphNodeOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given vertex
    /// together with the capacity of the connecting edge.
    /// ** Panics if `u` is outside the node-id space **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Capacity)> + '_;

    /// Returns the number of neighbors of `u`
    /// ** Panics if `u` is outside the node-id space **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns the capacity of the edge `{u, v}` or `None` if no such edge exists
    /// ** Panics if `u` is outside the node-id space **
    fn capacity_between(&self, u: Node, v: Node) -> Option<Capacity>;

    /// Returns *true* if the edge `{u, v}` exists in the graph
    /// ** Panics if `u` is outside the node-id space **
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.capacity_between(u, v).is_some()
    }

    /// Returns an iterator over all edges in the graph with their capacities.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are emitted;
    /// otherwise every edge appears in both orientations.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = (Edge, Capacity)> + '_ {
        self.vertices().flat_map(move |u| {
            self.neighbors_of(u)
                .map(move |(v, c)| (Edge(u, v), c))
                .filter(move |(e, _)| !only_normalized || e.is_normalized())
        })
    }

    /// Sums the capacities of all edges with exactly one endpoint in `side`.
    /// ** Panics if `side` does not span the node-id space of the graph **
    fn cut_capacity(&self, side: &NodeBitSet) -> Capacity {
        self.edges(true)
            .filter(|(Edge(u, v), _)| side.get_bit(*u) != side.get_bit(*v))
            .map(|(_, c)| c)
            .sum()
    }
}

/// Provides functions to insert/delete weighted edges
pub trait CapacityEdgeEditing {
    /// Adds capacity `c` to the edge `{u, v}`, creating the edge if it does not
    /// exist. Parallel insertions thus sum up into a single edge.
    /// ** Panics if `u == v` or either endpoint is not a node of the graph **
    fn add_capacity(&mut self, u: Node, v: Node, c: Capacity);

    /// Overwrites the capacity of the edge `{u, v}`, creating the edge if it does not exist.
    /// ** Panics if `u == v` or either endpoint is not a node of the graph **
    fn set_capacity(&mut self, u: Node, v: Node, c: Capacity);

    /// Removes the edge `{u, v}` and returns its capacity, or `None` if no such edge exists.
    /// ** Panics if either endpoint is outside the node-id space **
    fn try_remove_edge(&mut self, u: Node, v: Node) -> Option<Capacity>;

    /// Removes the edge `{u, v}` and returns its capacity.
    /// ** Panics if the edge is not present **
    fn remove_edge(&mut self, u: Node, v: Node) -> Capacity {
        let c = self.try_remove_edge(u, v);
        assert!(c.is_some(), "edge ({u},{v}) is not present");
        c.unwrap()
    }
}
