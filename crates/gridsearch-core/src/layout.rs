//! Text layouts: build a [`Grid`] from ASCII art and print one back.
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | open cell, weight 1 |
//! | `1`..`9` | open cell with that weight |
//! | `#` | wall (weight 1) |
//! | `S` | start (weight 1) |
//! | `E` | end (weight 1) |
//!
//! Lines are separated by `'\n'` and must all have the same width. Leading
//! and trailing whitespace of the whole string is trimmed, as is leading
//! whitespace of each line, so layouts can be indented inside raw strings.

use std::fmt;

use crate::cell::{Flags, MIN_WEIGHT};
use crate::geom::Pos;
use crate::grid::Grid;

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout has no cells.
    Empty,
    /// A line's width differs from the first line's.
    InconsistentWidth { line: i32, expected: i32, found: i32 },
    /// A character outside the layout alphabet.
    InvalidChar { ch: char, pos: Pos },
    /// More than one `S` or `E`.
    DuplicateEndpoint { ch: char, pos: Pos },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: no cells"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateEndpoint { ch, pos } => {
                write!(f, "layout: second \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

impl Grid {
    /// Parse an ASCII layout. See the [module docs](self) for the alphabet.
    pub fn parse(s: &str) -> Result<Grid, LayoutError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim_start).collect();
        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        if rows == 0 || cols == 0 {
            return Err(LayoutError::Empty);
        }

        let mut grid = Grid::uniform(rows, cols, MIN_WEIGHT);
        for (row, line) in lines.iter().enumerate() {
            let row = row as i32;
            let found = line.chars().count() as i32;
            if found != cols {
                return Err(LayoutError::InconsistentWidth {
                    line: row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row, col as i32);
                match ch {
                    '.' => {}
                    '#' => {
                        grid.toggle_wall(pos);
                    }
                    'S' | 'E' => {
                        let (flag, prev) = if ch == 'S' {
                            (Flags::START, grid.start())
                        } else {
                            (Flags::END, grid.end())
                        };
                        if prev.is_some() {
                            return Err(LayoutError::DuplicateEndpoint { ch, pos });
                        }
                        grid.mark(pos, flag);
                    }
                    '1'..='9' => grid.set_weight(pos, ch as u8 - b'0'),
                    _ => return Err(LayoutError::InvalidChar { ch, pos }),
                }
            }
        }
        Ok(grid)
    }
}

/// Prints the grid one row per line: `S`/`E` endpoints, `#` walls, `*` path,
/// `o` visited, otherwise the cell weight.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            if row > 0 {
                f.write_str("\n")?;
            }
            for col in 0..self.cols() {
                let Some(cell) = self.at(Pos::new(row, col)) else {
                    continue;
                };
                let fl = cell.flags;
                let ch = if fl.contains(Flags::START) {
                    'S'
                } else if fl.contains(Flags::END) {
                    'E'
                } else if fl.contains(Flags::WALL) {
                    '#'
                } else if fl.contains(Flags::PATH) {
                    '*'
                } else if fl.contains(Flags::VISITED) {
                    'o'
                } else {
                    char::from(b'0' + cell.weight)
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
