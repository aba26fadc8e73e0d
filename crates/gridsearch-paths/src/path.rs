use gridsearch_core::Pos;

use crate::searcher::Predecessors;

/// Walk `predecessors` back from `end` to `start`.
///
/// Returns the cells strictly between `start` and `end` in start-to-end
/// order. Returns an empty path when the chain from `end` does not reach
/// `start`. The walk is bounded by the lattice size, so it terminates even
/// on a malformed table.
pub fn reconstruct(predecessors: &Predecessors, start: Pos, end: Pos) -> Vec<Pos> {
    let limit = predecessors.dims().len();
    let mut path = Vec::new();
    let mut cur = end;
    loop {
        let Some(prev) = predecessors.get(cur) else {
            return Vec::new();
        };
        if prev == start {
            break;
        }
        if path.len() >= limit {
            return Vec::new();
        }
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}
