/*!
# Algorithms

This module provides the algorithms of this crate on top of [`CapacityGraph`](crate::repr::CapacityGraph).
All of them are re-exported at the top level of this module, so you can simply do:
```rust
use cuttree::algo::*;
```
Connected components are provided as an iterator; the cut-tree construction is a
configured struct that is consumed by [`GomoryHu::compute`].
*/

mod components;
mod cut_tree;
mod max_flow;

use crate::prelude::*;

pub use components::*;
pub use cut_tree::*;
pub use max_flow::*;
