//! Graph search over a weighted 4-neighbour grid.
//!
//! This crate provides the four search strategies a user can animate:
//!
//! - **Depth-first** descent ([`Searcher::dfs`])
//! - **Breadth-first** minimum-hop search ([`Searcher::bfs`])
//! - **Dijkstra** minimum-weight search ([`Searcher::dijkstra`])
//! - **A\*** Manhattan-guided best-first search at unit step cost ([`Searcher::astar`])
//!
//! Every run returns a [`SearchOutcome`]: whether the end was reached, the
//! visitation trace in the exact order cells were marked visited, and the
//! predecessor table that [`reconstruct`] walks to recover the path.
//! Algorithms never sleep or touch cell flags; pacing and rendering belong
//! to the caller.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | DFS, BFS |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`Pather`] | A* |

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod neighbors;
mod path;
mod searcher;
mod traits;

pub use distance::manhattan;
pub use path::reconstruct;
pub use searcher::{Algorithm, Predecessors, SearchOutcome, Searcher, UNREACHABLE, UnknownAlgorithm};
pub use traits::{AstarPather, Pather, WeightedPather};
