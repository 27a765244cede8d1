/*!
# Random Graph Generation

Generator for uniform random capacitated graphs, mainly used to drive the
property tests of the cut-tree construction.
*/

use fxhash::FxHashSet;
use rand::Rng;

use crate::{edge::*, node::*, ops::*, repr::CapacityGraph};

/// Generator for uniform `G(n,m)` random graphs with capacities drawn
/// uniformly from `1..=max_capacity`.
///
/// Parameterized via chainable setters:
/// - `.nodes(n)` — total number of nodes
/// - `.edges(m)` — total number of distinct edges
/// - `.max_capacity(c)` — largest possible edge capacity (default `1`)
#[derive(Debug, Copy, Clone)]
pub struct WeightedGnm {
    n: NumNodes,
    m: NumEdges,
    max_capacity: Capacity,
}

impl Default for WeightedGnm {
    fn default() -> Self {
        Self {
            n: 0,
            m: 0,
            max_capacity: 1,
        }
    }
}

impl WeightedGnm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }

    pub fn edges(mut self, m: NumEdges) -> Self {
        self.m = m;
        self
    }

    pub fn max_capacity(mut self, c: Capacity) -> Self {
        assert!(c > 0);
        self.max_capacity = c;
        self
    }

    /// Samples a graph with the configured parameters: `m` distinct edges
    /// drawn uniformly without replacement.
    ///
    /// # Panics
    /// - If `n == 0`
    /// - If `m` exceeds the number of possible edges
    pub fn generate<R: Rng>(&self, rng: &mut R) -> CapacityGraph {
        assert!(self.n > 0, "At least one node must be generated!");
        let possible = self.n as u64 * (self.n as u64 - 1) / 2;
        assert!(self.m as u64 <= possible);

        let mut graph = CapacityGraph::new(self.n);
        let mut chosen: FxHashSet<Edge> = FxHashSet::default();

        while chosen.len() < self.m as usize {
            let u = rng.random_range(0..self.n);
            let v = rng.random_range(0..self.n);
            if u == v {
                continue;
            }

            let e = Edge(u, v).normalized();
            if chosen.insert(e) {
                graph.add_capacity(e.0, e.1, rng.random_range(1..=self.max_capacity));
            }
        }

        graph
    }
}
