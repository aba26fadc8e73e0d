use gridsearch_core::{Dims, Pos};

/// Minimal search interface: lattice extent plus neighbor enumeration.
pub trait Pather {
    /// Extent of the searchable lattice.
    fn dims(&self) -> Dims;

    /// Append the traversable neighbors of `p` into `buf`, in priority order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

/// Pather with weighted (positive-cost) cells.
pub trait WeightedPather: Pather {
    /// Cost of stepping from `from` onto adjacent `to`. Must be > 0.
    fn cost(&self, from: Pos, to: Pos) -> i32;
}

/// Pather with a heuristic for best-first search.
///
/// Best-first search moves at unit cost per step and does not consult
/// [`WeightedPather::cost`].
pub trait AstarPather: Pather {
    /// Estimate of the number of steps from `from` to `to`.
    fn estimate(&self, from: Pos, to: Pos) -> i32;
}
