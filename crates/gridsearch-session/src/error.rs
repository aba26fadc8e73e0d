use std::fmt;

use gridsearch_core::Pos;

use crate::scheduler::RunId;

/// Errors reported by [`Session`](crate::Session) operations.
///
/// None of them leave the session in a modified state.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    /// A run was requested before both endpoints were chosen.
    MissingEndpoints { start: bool, end: bool },
    /// A run was requested while another is still animating and the
    /// session is configured to reject overlapping runs.
    RunInProgress(RunId),
    /// A cell coordinate outside the grid.
    OutOfBounds(Pos),
    /// The session configuration is unusable.
    InvalidConfig(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints { .. } => f.write_str("Set both start and end nodes."),
            Self::RunInProgress(run) => write!(f, "{run} is still in progress"),
            Self::OutOfBounds(p) => write!(f, "cell {p} is outside the grid"),
            Self::InvalidConfig(msg) => write!(f, "invalid session config: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}
