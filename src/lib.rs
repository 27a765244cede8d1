/*!
`cuttree` builds **Gomory-Hu cut trees** for undirected graphs with non-negative
integer edge capacities.

A Gomory-Hu tree encodes the values of all `n * (n - 1) / 2` pairwise minimum
cuts of a graph in a single tree with `n - 1` capacitated edges: the minimum
cut separating two nodes equals the smallest capacity on the tree path between
them. The tree is built with `n - 1` maximum-flow computations using the
classical contraction-based construction (repeated minimum cut plus node-set
contraction), not the Gusfield variant.

# Representation

**Nodes** are `u32` in the range `0..n`, **capacities** are `u64`. Graphs are
stored as [`CapacityGraph`](repr::CapacityGraph), an adjacency-map structure
that supports the node removal and contraction operations the construction is
built on. Parallel edges passed to the graph are summed into one.

# Usage

```
use cuttree::{prelude::*, algo::*};

// a triangle with capacities 3, 1 and 2
let graph = CapacityGraph::from_edges(3, [((0, 1), 3u64), ((1, 2), 1), ((0, 2), 2)]);

let tree = graph.gomory_hu_tree().unwrap();
assert_eq!(tree.min_cut_between(0, 1), Some(4));
assert_eq!(tree.min_cut_between(1, 2), Some(3));
assert_eq!(tree.min_cut_between(0, 2), Some(3));
```

Disconnected inputs are supported: nodes in different components end up joined
by tree edges of capacity `0`.

There are *4* submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, capacities, the graph
  operation traits and [`CapacityGraph`](repr::CapacityGraph),
- [`algo`] includes the cut-tree construction itself along with the minimum-cut
  and connected-component routines it is built from,
- [`gens`] includes a random weighted graph generator,
- [`repr`] for lower-level access to the graph representation.

In most use-cases, `use cuttree::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod edge;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;

use node::{Node, NumNodes};

/// Errors reported for invalid inputs before any computation starts.
/// Violations of internal invariants during the construction are defects
/// and panic instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("node {node} is out of range for a graph with {order} nodes")]
    NodeOutOfRange { node: Node, order: NumNodes },

    #[error("self loops (at node {node}) are not supported")]
    SelfLoop { node: Node },

    #[error("the graph has no nodes")]
    EmptyGraph,
}

/// `cuttree::prelude` includes definitions for nodes, edges and capacities, all
/// graph operation traits as well as the graph representation.
pub mod prelude {
    pub use super::{Error, edge::*, node::*, ops::*, repr::*};
}
