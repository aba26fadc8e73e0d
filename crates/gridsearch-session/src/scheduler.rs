//! Pacing of search runs into time-spaced, observable steps.
//!
//! Algorithms produce a complete [`SearchOutcome`] up front. The
//! [`StepScheduler`] lays its trace and path out on a session clock: each
//! visited cell holds the clock for [`Pacing::visit`] before the next step,
//! each path cell for [`Pacing::path`]. The caller advances the clock and
//! receives the steps that fell due, one at a time and strictly in order.
//!
//! Every run gets a fresh [`RunId`]. Scheduling or cancelling bumps the
//! current id, drops the superseded run's pending steps, and any stale step
//! that still surfaces is discarded on release.

use std::fmt;
use std::time::Duration;

use gridsearch_core::Pos;
use gridsearch_paths::{Algorithm, SearchOutcome};

use crate::events::Timeline;

/// Generation marker of a search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run #{}", self.0)
    }
}

/// Hold times between steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pacing {
    /// Hold after each visited cell.
    pub visit: Duration,
    /// Hold after each path cell.
    pub path: Duration,
}

impl Pacing {
    /// No holds at all: every step is due immediately.
    pub const INSTANT: Self = Self {
        visit: Duration::ZERO,
        path: Duration::ZERO,
    };
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            visit: Duration::from_millis(10),
            path: Duration::from_millis(30),
        }
    }
}

/// What a step does when released.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// Mark the cell visited.
    Visit(Pos),
    /// Mark the cell as part of the final path.
    Path(Pos),
    /// The run is over.
    Finished { found: bool, path_len: usize },
}

/// One released unit of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub run: RunId,
    pub algorithm: Algorithm,
    pub kind: StepKind,
    /// Clock time at which the step became due.
    pub due: Duration,
}

/// Turns search outcomes into paced step sequences.
pub struct StepScheduler {
    timeline: Timeline<Step>,
    pacing: Pacing,
    clock: Duration,
    current: RunId,
}

impl StepScheduler {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            timeline: Timeline::new(),
            pacing,
            clock: Duration::ZERO,
            current: RunId::default(),
        }
    }

    #[inline]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Change hold times. Applies to runs scheduled afterwards.
    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }

    /// Current session clock.
    #[inline]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// The newest run token. Steps carrying any other id are stale.
    #[inline]
    pub fn current(&self) -> RunId {
        self.current
    }

    /// Whether steps of the current run are still pending.
    #[inline]
    pub fn is_busy(&self) -> bool {
        !self.timeline.is_empty()
    }

    /// Number of pending steps.
    #[inline]
    pub fn pending(&self) -> usize {
        self.timeline.len()
    }

    /// Lay out `outcome` on the clock, superseding any pending run.
    ///
    /// Visits come first in trace order, then path cells walking back from
    /// the end toward the start, then a single `Finished` step.
    pub fn schedule(&mut self, outcome: &SearchOutcome) -> RunId {
        let run = self.bump();
        let algorithm = outcome.algorithm;
        let path = outcome.path();
        let mut due = self.clock;

        for &p in &outcome.trace {
            self.push(run, algorithm, StepKind::Visit(p), due);
            due += self.pacing.visit;
        }
        for &p in path.iter().rev() {
            self.push(run, algorithm, StepKind::Path(p), due);
            due += self.pacing.path;
        }
        self.push(
            run,
            algorithm,
            StepKind::Finished {
                found: outcome.found,
                path_len: path.len(),
            },
            due,
        );
        run
    }

    /// Invalidate the current run. Returns its id if steps were pending.
    pub fn cancel(&mut self) -> Option<RunId> {
        if !self.is_busy() {
            return None;
        }
        let cancelled = self.current;
        self.bump();
        Some(cancelled)
    }

    /// Move the clock forward by `dt` and release every step now due.
    pub fn advance(&mut self, dt: Duration) -> Vec<Step> {
        self.clock += dt;
        let mut released = Vec::new();
        while let Some((step, _)) = self.timeline.pop_due(self.clock) {
            if step.run == self.current {
                released.push(step);
            }
        }
        released
    }

    /// Release every pending step now, moving the clock to the last one.
    pub fn flush(&mut self) -> Vec<Step> {
        let mut released = Vec::new();
        while let Some((step, due)) = self.timeline.pop() {
            self.clock = self.clock.max(due);
            if step.run == self.current {
                released.push(step);
            }
        }
        released
    }

    /// Time left until the next step falls due, if any is pending.
    pub fn until_next(&self) -> Option<Duration> {
        self.timeline
            .peek_due()
            .map(|due| due.saturating_sub(self.clock))
    }

    fn push(&mut self, run: RunId, algorithm: Algorithm, kind: StepKind, due: Duration) {
        self.timeline.push(
            Step {
                run,
                algorithm,
                kind,
                due,
            },
            due,
        );
    }

    /// Start a new generation and drop every step of older ones.
    fn bump(&mut self) -> RunId {
        self.current = RunId(self.current.0 + 1);
        let current = self.current;
        self.timeline.retain(|s| s.run == current);
        current
    }
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self::new(Pacing::default())
    }
}
