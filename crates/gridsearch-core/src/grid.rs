//! The dense weighted lattice searched by every algorithm.
//!
//! [`Grid`] stores one [`Cell`] per position in a row-major `Vec`. Its
//! dimensions never change after creation; everything else (weights and
//! flags) is mutated in place.

use rand::Rng;

use crate::cell::{Cell, Flags, MAX_WEIGHT, MIN_WEIGHT};
use crate::geom::{Dims, Pos};

/// A fixed-size rectangular grid of weighted cells.
///
/// Invariants kept by every mutating method:
/// - a wall is never a start or end cell;
/// - at most one cell carries [`Flags::START`] and at most one [`Flags::END`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dims: Dims,
    cells: Vec<Cell>,
    start: Option<Pos>,
    end: Option<Pos>,
}

/// Draw a uniformly random weight in `[MIN_WEIGHT, MAX_WEIGHT]`.
#[inline]
pub fn random_weight(rng: &mut impl Rng) -> u8 {
    rng.random_range(MIN_WEIGHT..=MAX_WEIGHT)
}

impl Grid {
    /// Create a `rows x cols` grid with random weights and no flags.
    pub fn new(rows: i32, cols: i32, rng: &mut impl Rng) -> Self {
        let dims = Dims::new(rows, cols);
        let cells = (0..dims.len())
            .map(|_| Cell::with_weight(random_weight(rng)))
            .collect();
        Self {
            dims,
            cells,
            start: None,
            end: None,
        }
    }

    /// Create a `rows x cols` grid where every cell has the same weight.
    pub fn uniform(rows: i32, cols: i32, weight: u8) -> Self {
        let dims = Dims::new(rows, cols);
        let weight = weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
        Self {
            dims,
            cells: vec![Cell::with_weight(weight); dims.len()],
            start: None,
            end: None,
        }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.dims.cols
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.dims.contains(p)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Pos) -> Option<Cell> {
        self.dims.index(p).map(|i| self.cells[i])
    }

    /// The weight at `p`, or `None` if out of bounds.
    #[inline]
    pub fn weight(&self, p: Pos) -> Option<u8> {
        self.at(p).map(|c| c.weight)
    }

    /// Set the weight at `p`, clamped to `[MIN_WEIGHT, MAX_WEIGHT]`.
    pub fn set_weight(&mut self, p: Pos, weight: u8) {
        if let Some(i) = self.dims.index(p) {
            self.cells[i].weight = weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
        }
    }

    /// Flags at `p`. Out-of-bounds positions report no flags.
    #[inline]
    pub fn flags(&self, p: Pos) -> Flags {
        self.at(p).map_or(Flags::NONE, |c| c.flags)
    }

    #[inline]
    pub fn is_wall(&self, p: Pos) -> bool {
        self.flags(p).contains(Flags::WALL)
    }

    /// Whether `p` is in bounds and not a wall.
    #[inline]
    pub fn is_walkable(&self, p: Pos) -> bool {
        self.at(p).is_some_and(|c| !c.is_wall())
    }

    /// The current start cell, if any.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// The current end cell, if any.
    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Set `flag` on the cell at `p`. Returns whether anything changed.
    ///
    /// Marking [`Flags::START`] or [`Flags::END`] moves the endpoint: the
    /// previous holder loses the flag, and a wall at `p` is removed.
    /// Marking [`Flags::WALL`] on an endpoint is refused.
    pub fn mark(&mut self, p: Pos, flag: Flags) -> bool {
        let Some(i) = self.dims.index(p) else {
            return false;
        };
        let mut flag = flag;
        if flag.contains(Flags::WALL) && (self.cells[i].is_endpoint() || flag.intersects(Flags::ENDPOINT)) {
            flag.remove(Flags::WALL);
        }
        let before = self.cells[i].flags;

        if flag.contains(Flags::START) {
            if let Some(prev) = self.start.filter(|&s| s != p) {
                self.unmark(prev, Flags::START);
            }
            self.cells[i].flags.remove(Flags::WALL);
            self.start = Some(p);
        }
        if flag.contains(Flags::END) {
            if let Some(prev) = self.end.filter(|&e| e != p) {
                self.unmark(prev, Flags::END);
            }
            self.cells[i].flags.remove(Flags::WALL);
            self.end = Some(p);
        }
        self.cells[i].flags.insert(flag);
        self.cells[i].flags != before
    }

    /// Clear `flag` on the cell at `p`. Returns whether anything changed.
    pub fn unmark(&mut self, p: Pos, flag: Flags) -> bool {
        let Some(i) = self.dims.index(p) else {
            return false;
        };
        let before = self.cells[i].flags;
        self.cells[i].flags.remove(flag);
        if flag.contains(Flags::START) && self.start == Some(p) {
            self.start = None;
        }
        if flag.contains(Flags::END) && self.end == Some(p) {
            self.end = None;
        }
        self.cells[i].flags != before
    }

    /// Flip the wall flag at `p`.
    ///
    /// Silently does nothing on start/end cells and out-of-bounds positions.
    /// Returns whether the cell changed.
    pub fn toggle_wall(&mut self, p: Pos) -> bool {
        let Some(i) = self.dims.index(p) else {
            return false;
        };
        if self.cells[i].is_endpoint() {
            return false;
        }
        let flags = &mut self.cells[i].flags;
        if flags.contains(Flags::WALL) {
            flags.remove(Flags::WALL);
        } else {
            flags.insert(Flags::WALL);
        }
        true
    }

    /// Reassign random weights to every cell except the start and end.
    ///
    /// Flags are untouched.
    pub fn regenerate_weights(&mut self, rng: &mut impl Rng) {
        for cell in self.cells.iter_mut() {
            if !cell.is_endpoint() {
                cell.weight = random_weight(rng);
            }
        }
    }

    /// Clear [`Flags::VISITED`] and [`Flags::PATH`] everywhere.
    ///
    /// Returns the positions that changed, in row-major order.
    pub fn clear_transient_flags(&mut self) -> Vec<Pos> {
        let mut changed = Vec::new();
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if cell.flags.intersects(Flags::TRANSIENT) {
                cell.flags.remove(Flags::TRANSIENT);
                changed.push(self.dims.pos(i));
            }
        }
        changed
    }

    /// Clear every flag, including walls and endpoints.
    pub fn clear_all_flags(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.flags = Flags::NONE;
        }
        self.start = None;
        self.end = None;
    }

    /// Apply `f` to every cell in row-major order.
    ///
    /// Endpoint flags belong to [`mark`](Self::mark) / [`unmark`](Self::unmark):
    /// changes `f` makes to START or END are discarded, and a wall placed
    /// on an endpoint is removed again.
    pub fn update_cells(&mut self, mut f: impl FnMut(Pos, &mut Cell)) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let endpoint = cell.flags & Flags::ENDPOINT;
            f(self.dims.pos(i), cell);
            cell.flags.remove(Flags::ENDPOINT);
            cell.flags.insert(endpoint);
            if !endpoint.is_empty() {
                cell.flags.remove(Flags::WALL);
            }
            cell.weight = cell.weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
        }
    }

    /// Number of cells carrying every bit of `flag`.
    pub fn count_flag(&self, flag: Flags) -> usize {
        self.cells.iter().filter(|c| c.flags.contains(flag)).count()
    }

    /// Iterate over `(Pos, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (self.dims.pos(i), *c))
    }
}
