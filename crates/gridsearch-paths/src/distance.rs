use gridsearch_core::Pos;

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
