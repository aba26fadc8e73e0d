//! **gridsearch-core**: the weighted lattice that search algorithms run on.
//!
//! This crate provides the foundational types used across the *gridsearch*
//! workspace: `(row, col)` geometry, cells with a weight and state flags,
//! the dense [`Grid`] itself, and an ASCII layout parser for fixtures.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, Flags, MAX_WEIGHT, MIN_WEIGHT};
pub use geom::{CARDINALS, Dims, Pos};
pub use grid::{Grid, random_weight};
pub use layout::LayoutError;
