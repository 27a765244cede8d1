use std::collections::VecDeque;
use std::iter::FusedIterator;

use stream_bitset::prelude::*;

use super::*;

/// Extension trait providing connected-component iterators on weighted graphs.
pub trait Connectivity: CapacityAdjacency + Sized {
    fn connected_components(&self) -> ConnectedComponents<'_, Self>;

    /// Components of the graph with `ignore` treated as removed
    fn connected_components_exclude_nodes<I>(&self, ignore: I) -> ConnectedComponents<'_, Self>
    where
        I: IntoIterator<Item = Node>;

    /// Returns *true* if all (non-removed) nodes lie in one component
    fn is_connected(&self) -> bool {
        let mut ccs = self.connected_components();
        ccs.next()
            .is_some_and(|cc| cc.len() == self.len() && ccs.next().is_none())
    }
}

impl<G> Connectivity for G
where
    G: CapacityAdjacency + Sized,
{
    fn connected_components(&self) -> ConnectedComponents<'_, Self> {
        ConnectedComponents::new(self)
    }

    fn connected_components_exclude_nodes<I>(&self, ignore: I) -> ConnectedComponents<'_, Self>
    where
        I: IntoIterator<Item = Node>,
    {
        ConnectedComponents::new(self).exclude_nodes(ignore)
    }
}

/// Iterator emitting the connected components of a graph one `Vec<Node>` at a
/// time. Removed node slots are never visited; excluded nodes are treated as
/// removed together with their edges.
pub struct ConnectedComponents<'a, G>
where
    G: CapacityAdjacency,
{
    graph: &'a G,
    // bits set = already emitted, excluded, or a dead slot
    visited: NodeBitSet,
    queue: VecDeque<Node>,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: CapacityAdjacency,
{
    pub fn new(graph: &'a G) -> Self {
        let visited =
            NodeBitSet::new_with_bits_cleared(graph.vertices_range().end, graph.vertices());

        Self {
            graph,
            visited,
            queue: VecDeque::new(),
        }
    }

    pub fn set_exclude_nodes<I>(&mut self, exclude: I)
    where
        I: IntoIterator<Item = Node>,
    {
        self.visited.set_bits(exclude);
    }

    pub fn exclude_nodes<I>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.set_exclude_nodes(exclude);
        self
    }

    fn next_unvisited(&self) -> Option<Node> {
        self.visited.iter_cleared_bits().next()
    }
}

impl<'a, G> Iterator for ConnectedComponents<'a, G>
where
    G: CapacityAdjacency,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_unvisited()?;
        self.visited.set_bit(start);

        let mut cc = Vec::new();
        self.queue.push_back(start);
        while let Some(u) = self.queue.pop_front() {
            cc.push(u);
            for (v, _) in self.graph.neighbors_of(u) {
                if !self.visited.set_bit(v) {
                    self.queue.push_back(v);
                }
            }
        }

        Some(cc)
    }
}

impl<'a, G> FusedIterator for ConnectedComponents<'a, G> where G: CapacityAdjacency {}

/// Sorts the nodes in each component increasingly and then the components themselves lexicographically.
pub fn sort_components(mut components: Vec<Vec<Node>>) -> Vec<Vec<Node>> {
    components.iter_mut().for_each(|comp| comp.sort_unstable());
    components.sort_by(|a, b| a[0].cmp(&b[0]));
    components
}
