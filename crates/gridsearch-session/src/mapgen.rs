//! Random obstacle generation.

use gridsearch_core::{Flags, Grid, Pos};
use rand::Rng;

/// Default chance that a cell becomes a wall.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.3;

/// Scatters walls independently over a grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MazeGen {
    wall_probability: f64,
}

impl Default for MazeGen {
    fn default() -> Self {
        Self::new(DEFAULT_WALL_PROBABILITY)
    }
}

impl MazeGen {
    /// `wall_probability` is clamped to `[0, 1]`; NaN counts as 0.
    pub fn new(wall_probability: f64) -> Self {
        let wall_probability = if wall_probability.is_nan() {
            0.0
        } else {
            wall_probability.clamp(0.0, 1.0)
        };
        Self { wall_probability }
    }

    #[inline]
    pub fn wall_probability(&self) -> f64 {
        self.wall_probability
    }

    /// Regenerate walls.
    ///
    /// Every cell except the start and end loses its wall, visited and path
    /// flags, then becomes a wall with probability `wall_probability`.
    /// Returns the cells whose flags changed, in row-major order.
    pub fn generate(&self, grid: &mut Grid, rng: &mut impl Rng) -> Vec<Pos> {
        let mut changed = Vec::new();
        grid.update_cells(|p, cell| {
            if cell.is_endpoint() {
                return;
            }
            let before = cell.flags;
            cell.flags.remove(Flags::WALL | Flags::TRANSIENT);
            if rng.random_bool(self.wall_probability) {
                cell.flags.insert(Flags::WALL);
            }
            if cell.flags != before {
                changed.push(p);
            }
        });
        changed
    }
}
