//! The three-stage selection machine: pick start, pick end, edit walls.

use gridsearch_core::{Flags, Grid, Pos};

/// Which mutation a cell activation performs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    #[default]
    AwaitingStart,
    AwaitingEnd,
    Ready,
}

impl Stage {
    /// Instruction text shown while in this stage.
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::AwaitingStart => "Select the starting node from the grid",
            Self::AwaitingEnd => "Select the ending node from the grid",
            Self::Ready => "Generate a maze if you want and apply any of the algorithms",
        }
    }
}

/// What an activation did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// The start moved to the activated cell.
    StartSet { previous: Option<Pos> },
    /// The end moved to the activated cell.
    EndSet { previous: Option<Pos> },
    /// The activated cell's wall flag flipped; `wall` is the new state.
    WallToggled { wall: bool },
    /// Disallowed cell for this stage. Not an error.
    Ignored,
}

/// Preview highlight for a cell under the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverHint {
    Start,
    End,
}

/// Selection stage.
///
/// The endpoints themselves live in the [`Grid`] (`Grid::start`,
/// `Grid::end`); every operation here reads them from the grid it is given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    stage: Stage,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Apply a single "cell activated" input at `pos`.
    pub fn activate(&mut self, grid: &mut Grid, pos: Pos) -> Activation {
        if !grid.contains(pos) {
            return Activation::Ignored;
        }
        match self.stage {
            Stage::AwaitingStart => {
                if grid.end() == Some(pos) {
                    return Activation::Ignored;
                }
                let previous = grid.start().filter(|&s| s != pos);
                grid.mark(pos, Flags::START);
                self.stage = Stage::AwaitingEnd;
                Activation::StartSet { previous }
            }
            Stage::AwaitingEnd => {
                if grid.start() == Some(pos) {
                    return Activation::Ignored;
                }
                let previous = grid.end().filter(|&e| e != pos);
                grid.mark(pos, Flags::END);
                self.stage = Stage::Ready;
                Activation::EndSet { previous }
            }
            Stage::Ready => {
                if !grid.toggle_wall(pos) {
                    return Activation::Ignored;
                }
                Activation::WallToggled {
                    wall: grid.is_wall(pos),
                }
            }
        }
    }

    /// Which endpoint an activation at `pos` would place, if any.
    pub fn hover(&self, grid: &Grid, pos: Pos) -> Option<HoverHint> {
        match self.stage {
            Stage::AwaitingStart if grid.end() != Some(pos) => Some(HoverHint::Start),
            Stage::AwaitingEnd if grid.start() != Some(pos) => Some(HoverHint::End),
            _ => None,
        }
    }

    /// Back to [`Stage::AwaitingStart`].
    ///
    /// Only the stage is reset; clearing the grid is the caller's job.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
