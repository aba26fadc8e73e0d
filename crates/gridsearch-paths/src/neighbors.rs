use gridsearch_core::{CARDINALS, Dims, Grid, MAX_WEIGHT, Pos};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Push the cardinal neighbors of `p` accepted by `keep` into `buf`.
///
/// Order is fixed: east, south, west, north. That order decides DFS descent
/// and BFS tie-breaking, so every search reaches neighbors through here.
#[inline]
fn push_cardinal(p: Pos, keep: &impl Fn(Pos) -> bool, buf: &mut Vec<Pos>) {
    for d in CARDINALS {
        let n = p + d;
        if keep(n) {
            buf.push(n);
        }
    }
}

/// In-bounds, non-wall cardinal neighbors.
impl Pather for Grid {
    #[inline]
    fn dims(&self) -> Dims {
        Grid::dims(self)
    }

    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        push_cardinal(p, &|n| self.is_walkable(n), buf);
    }
}

/// Entering a cell costs its weight.
impl WeightedPather for Grid {
    #[inline]
    fn cost(&self, _from: Pos, to: Pos) -> i32 {
        self.weight(to).map_or(i32::from(MAX_WEIGHT), i32::from)
    }
}

impl AstarPather for Grid {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        manhattan(from, to)
    }
}
