//! Geometry primitives: [`Pos`] and [`Dims`].
//!
//! Positions are `(row, col)` pairs. Rows grow down, columns grow right.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A cell coordinate on the lattice.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

/// Direction offsets in resolver priority order: east, south, west, north.
pub const CARDINALS: [Pos; 4] = [
    Pos::new(0, 1),
    Pos::new(1, 0),
    Pos::new(0, -1),
    Pos::new(-1, 0),
];

impl Pos {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four cardinal neighbours in east, south, west, north order.
    ///
    /// No bounds filtering happens here.
    #[inline]
    pub fn neighbors_4(self) -> [Pos; 4] {
        CARDINALS.map(|d| self + d)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// Grid dimensions. Valid positions are `[0, rows) x [0, cols)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub rows: i32,
    pub cols: i32,
}

impl Dims {
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Whether the dimensions describe no cells at all.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether `p` lies inside the lattice.
    #[inline]
    pub const fn contains(self, p: Pos) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// Row-major flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Inverse of [`index`](Self::index). The caller guarantees `idx < len()`.
    #[inline]
    pub fn pos(self, idx: usize) -> Pos {
        let cols = self.cols.max(1) as usize;
        Pos::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Iterate over every position in row-major order.
    pub fn iter(self) -> DimsIter {
        DimsIter {
            dims: self,
            next: 0,
        }
    }
}

/// Row-major iterator over the positions of a [`Dims`].
#[derive(Clone, Debug)]
pub struct DimsIter {
    dims: Dims,
    next: usize,
}

impl Iterator for DimsIter {
    type Item = Pos;

    #[inline]
    fn next(&mut self) -> Option<Pos> {
        if self.next >= self.dims.len() {
            return None;
        }
        let p = self.dims.pos(self.next);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dims.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DimsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_arithmetic() {
        let a = Pos::new(1, 2);
        let b = Pos::new(3, 4);
        assert_eq!(a + b, Pos::new(4, 6));
        assert_eq!(b - a, Pos::new(2, 2));
        assert_eq!(a.shift(-1, 1), Pos::new(0, 3));
    }

    #[test]
    fn neighbors_in_east_south_west_north_order() {
        let n = Pos::new(5, 5).neighbors_4();
        assert_eq!(
            n,
            [
                Pos::new(5, 6),
                Pos::new(6, 5),
                Pos::new(5, 4),
                Pos::new(4, 5)
            ]
        );
    }

    #[test]
    fn pos_orders_row_major() {
        let mut v = vec![Pos::new(1, 0), Pos::new(0, 2), Pos::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Pos::new(0, 1), Pos::new(0, 2), Pos::new(1, 0)]);
    }

    #[test]
    fn dims_contains_and_index() {
        let d = Dims::new(2, 3);
        assert_eq!(d.len(), 6);
        assert!(d.contains(Pos::new(1, 2)));
        assert!(!d.contains(Pos::new(2, 0)));
        assert!(!d.contains(Pos::new(0, -1)));
        assert_eq!(d.index(Pos::new(1, 1)), Some(4));
        assert_eq!(d.index(Pos::new(0, 3)), None);
        assert_eq!(d.pos(4), Pos::new(1, 1));
    }

    #[test]
    fn dims_iter_is_row_major() {
        let pts: Vec<_> = Dims::new(2, 2).iter().collect();
        assert_eq!(
            pts,
            vec![
                Pos::new(0, 0),
                Pos::new(0, 1),
                Pos::new(1, 0),
                Pos::new(1, 1)
            ]
        );
        assert_eq!(Dims::new(0, 5).iter().count(), 0);
    }
}
