//! Interactive session state around grid searches.
//!
//! A [`Session`] owns a weighted [`Grid`](gridsearch_core::Grid), walks the
//! user through picking a start and an end, lets them edit walls or scatter
//! a random maze, and animates search runs as a paced stream of [`Event`]s.
//! Rendering and input capture live outside this crate: feed clicks to
//! [`Session::activate_cell`] and paint whatever the events report.

pub mod config;
pub mod error;
pub mod events;
pub mod mapgen;
pub mod scheduler;
pub mod selection;
pub mod session;

pub use config::{RunPolicy, SessionConfig};
pub use error::SessionError;
pub use events::Timeline;
pub use mapgen::{DEFAULT_WALL_PROBABILITY, MazeGen};
pub use scheduler::{Pacing, RunId, Step, StepKind, StepScheduler};
pub use selection::{Activation, HoverHint, Selection, Stage};
pub use session::{Event, RunStatus, Session};
