//! The session facade: one grid, one selection, at most one animated run.

use std::thread;
use std::time::Duration;

use gridsearch_core::{Flags, Grid, Pos};
use gridsearch_paths::{Algorithm, Searcher};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{RunPolicy, SessionConfig};
use crate::error::SessionError;
use crate::mapgen::MazeGen;
use crate::scheduler::{RunId, Step, StepKind, StepScheduler};
use crate::selection::{Activation, HoverHint, Selection, Stage};

/// How a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    /// A path of `len` cells, endpoints excluded, was drawn.
    PathFound { len: usize },
    /// The end was never reached.
    NoPath,
}

/// Observable state changes, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A cell's flags changed; `flags` is the new value.
    CellChanged { pos: Pos, flags: Flags },
    /// Weights were redrawn across the grid.
    WeightsChanged,
    /// The grid was replaced by a fresh one.
    GridReset,
    StageChanged(Stage),
    RunStarted { run: RunId, algorithm: Algorithm },
    RunFinished {
        run: RunId,
        algorithm: Algorithm,
        status: RunStatus,
    },
    RunCancelled { run: RunId, algorithm: Algorithm },
}

/// Owns the grid and everything that mutates it.
///
/// Inputs arrive as method calls. The resulting changes are queued as
/// [`Event`]s and handed out by [`take_events`](Self::take_events),
/// [`advance`](Self::advance), [`finish_run`](Self::finish_run) or
/// [`play`](Self::play). Searches run to completion when requested; only
/// their animation is spread over time.
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    selection: Selection,
    searcher: Searcher,
    scheduler: StepScheduler,
    mazegen: MazeGen,
    rng: StdRng,
    outbox: Vec<Event>,
    active: Option<(RunId, Algorithm)>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let grid = Grid::new(config.rows, config.cols, &mut rng);
        Ok(Self {
            searcher: Searcher::new(grid.dims()),
            scheduler: StepScheduler::new(config.pacing()),
            mazegen: MazeGen::new(config.wall_probability),
            selection: Selection::new(),
            outbox: vec![Event::StageChanged(Stage::AwaitingStart)],
            active: None,
            grid,
            rng,
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn stage(&self) -> Stage {
        self.selection.stage()
    }

    /// Instruction text for the current stage.
    pub fn instruction(&self) -> &'static str {
        self.stage().instruction()
    }

    /// The run currently being animated.
    pub fn active_run(&self) -> Option<RunId> {
        self.active.map(|(run, _)| run)
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn clock(&self) -> Duration {
        self.scheduler.clock()
    }

    /// Handle a click on the cell at `(row, col)`.
    ///
    /// Toggling a wall cancels any active run.
    pub fn activate_cell(&mut self, row: i32, col: i32) -> Result<Activation, SessionError> {
        let pos = self.checked_pos(row, col)?;
        let stage = self.selection.stage();
        let activation = self.selection.activate(&mut self.grid, pos);
        match activation {
            Activation::StartSet { previous } | Activation::EndSet { previous } => {
                if let Some(prev) = previous {
                    self.cell_changed(prev);
                }
                self.cell_changed(pos);
            }
            Activation::WallToggled { .. } => {
                // The animated run was computed against the old walls.
                self.cancel_run();
                self.cell_changed(pos);
            }
            Activation::Ignored => {}
        }
        if self.selection.stage() != stage {
            self.outbox.push(Event::StageChanged(self.selection.stage()));
        }
        Ok(activation)
    }

    /// Preview hint for the cell under the pointer. Out-of-bounds cells get none.
    pub fn hover(&self, row: i32, col: i32) -> Option<HoverHint> {
        let pos = Pos::new(row, col);
        if !self.grid.contains(pos) {
            return None;
        }
        self.selection.hover(&self.grid, pos)
    }

    /// Scatter fresh walls. Cancels any active run.
    pub fn request_maze_generation(&mut self) {
        self.cancel_run();
        let changed = self.mazegen.generate(&mut self.grid, &mut self.rng);
        log::debug!(
            "maze generated: {} walls, {} cells changed",
            self.grid.count_flag(Flags::WALL),
            changed.len()
        );
        for p in changed {
            self.cell_changed(p);
        }
    }

    /// Redraw every weight except the endpoints'.
    pub fn request_weight_regeneration(&mut self) {
        self.grid.regenerate_weights(&mut self.rng);
        log::debug!("weights regenerated");
        self.outbox.push(Event::WeightsChanged);
    }

    /// Replace the grid and start selecting again. Cancels any active run.
    pub fn request_reset(&mut self) {
        self.cancel_run();
        self.grid = Grid::new(self.config.rows, self.config.cols, &mut self.rng);
        self.selection.reset();
        log::debug!("grid reset to {}x{}", self.grid.rows(), self.grid.cols());
        self.outbox.push(Event::GridReset);
        self.outbox.push(Event::StageChanged(Stage::AwaitingStart));
    }

    /// Search from start to end with `algorithm` and schedule its animation.
    ///
    /// Flags left by earlier runs are cleared first. With
    /// [`RunPolicy::Supersede`] a run still animating is cancelled; with
    /// [`RunPolicy::Reject`] the request fails instead.
    pub fn request_run(&mut self, algorithm: Algorithm) -> Result<RunId, SessionError> {
        let (Some(start), Some(end)) = (self.grid.start(), self.grid.end()) else {
            return Err(SessionError::MissingEndpoints {
                start: self.grid.start().is_none(),
                end: self.grid.end().is_none(),
            });
        };
        if let Some((run, _)) = self.active {
            if self.config.run_policy == RunPolicy::Reject {
                return Err(SessionError::RunInProgress(run));
            }
        }
        self.cancel_run();

        for p in self.grid.clear_transient_flags() {
            self.cell_changed(p);
        }
        let outcome = self.searcher.run(algorithm, &self.grid, start, end);
        let run = self.scheduler.schedule(&outcome);
        log::debug!(
            "{algorithm} {run} started from {start} to {end}: {} visits, found: {}",
            outcome.trace.len(),
            outcome.found
        );
        self.active = Some((run, algorithm));
        self.outbox.push(Event::RunStarted { run, algorithm });
        Ok(run)
    }

    /// Stop animating the active run. Flags already drawn stay.
    pub fn cancel_run(&mut self) -> Option<RunId> {
        let (run, algorithm) = self.active.take()?;
        self.scheduler.cancel();
        log::debug!("{algorithm} {run} cancelled");
        self.outbox.push(Event::RunCancelled { run, algorithm });
        Some(run)
    }

    /// Move the clock by `dt`, apply the steps that fell due, and return
    /// every queued event.
    pub fn advance(&mut self, dt: Duration) -> Vec<Event> {
        for step in self.scheduler.advance(dt) {
            self.apply(step);
        }
        self.take_events()
    }

    /// Apply every pending step at once and return every queued event.
    pub fn finish_run(&mut self) -> Vec<Event> {
        for step in self.scheduler.flush() {
            self.apply(step);
        }
        self.take_events()
    }

    /// Animate the active run in real time, feeding each event to `sink`.
    ///
    /// Blocks the calling thread until the run has finished.
    pub fn play(&mut self, mut sink: impl FnMut(&Event)) {
        for event in self.take_events() {
            sink(&event);
        }
        while let Some(wait) = self.scheduler.until_next() {
            if !wait.is_zero() {
                thread::sleep(wait);
            }
            for event in self.advance(wait) {
                sink(&event);
            }
        }
    }

    /// Drain the queued events.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.outbox)
    }

    fn checked_pos(&self, row: i32, col: i32) -> Result<Pos, SessionError> {
        let pos = Pos::new(row, col);
        if self.grid.contains(pos) {
            Ok(pos)
        } else {
            Err(SessionError::OutOfBounds(pos))
        }
    }

    fn cell_changed(&mut self, pos: Pos) {
        self.outbox.push(Event::CellChanged {
            pos,
            flags: self.grid.flags(pos),
        });
    }

    fn apply(&mut self, step: Step) {
        let Some((run, algorithm)) = self.active.filter(|&(run, _)| run == step.run) else {
            log::trace!("dropping stale step of {}", step.run);
            return;
        };
        log::trace!("{run}: {:?} at {:?}", step.kind, step.due);
        match step.kind {
            StepKind::Visit(p) => {
                if self.grid.mark(p, Flags::VISITED) {
                    self.cell_changed(p);
                }
            }
            StepKind::Path(p) => {
                if self.grid.mark(p, Flags::PATH) {
                    self.cell_changed(p);
                }
            }
            StepKind::Finished { found, path_len } => {
                self.active = None;
                let status = if found {
                    RunStatus::PathFound { len: path_len }
                } else {
                    RunStatus::NoPath
                };
                match status {
                    RunStatus::PathFound { len } => {
                        log::info!("{algorithm} {run} found a path of {len} cells")
                    }
                    RunStatus::NoPath => log::info!("{algorithm} {run}: no path"),
                }
                self.outbox.push(Event::RunFinished {
                    run,
                    algorithm,
                    status,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: i32, cols: i32) -> SessionConfig {
        SessionConfig {
            rows,
            cols,
            seed: Some(42),
            ..SessionConfig::default()
        }
    }

    /// A 1x5 session with start at the west end and end at the east end.
    fn corridor(policy: RunPolicy) -> Session {
        let mut s = Session::new(SessionConfig {
            run_policy: policy,
            ..config(1, 5)
        })
        .unwrap();
        s.activate_cell(0, 0).unwrap();
        s.activate_cell(0, 4).unwrap();
        s.take_events();
        s
    }

    fn finished(events: &[Event]) -> Vec<(RunId, RunStatus)> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::RunFinished { run, status, .. } => Some((*run, *status)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn new_session_awaits_start() {
        let mut s = Session::new(config(4, 4)).unwrap();
        assert_eq!(s.take_events(), vec![Event::StageChanged(Stage::AwaitingStart)]);
        assert_eq!(s.instruction(), "Select the starting node from the grid");
        assert_eq!(s.grid().count_flag(Flags::WALL), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Session::new(config(0, 4)).err();
        assert!(matches!(err, Some(SessionError::InvalidConfig(_))));
    }

    #[test]
    fn same_seed_same_weights() {
        let a = Session::new(config(6, 7)).unwrap();
        let b = Session::new(config(6, 7)).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn selection_emits_cell_and_stage_events() {
        let mut s = Session::new(config(3, 3)).unwrap();
        s.take_events();

        s.activate_cell(0, 0).unwrap();
        assert_eq!(
            s.take_events(),
            vec![
                Event::CellChanged {
                    pos: Pos::new(0, 0),
                    flags: Flags::START
                },
                Event::StageChanged(Stage::AwaitingEnd),
            ]
        );

        assert_eq!(s.activate_cell(0, 0).unwrap(), Activation::Ignored);
        assert!(s.take_events().is_empty());

        s.activate_cell(2, 2).unwrap();
        assert_eq!(s.stage(), Stage::Ready);
        assert_eq!(s.take_events().last(), Some(&Event::StageChanged(Stage::Ready)));

        assert_eq!(
            s.activate_cell(1, 1).unwrap(),
            Activation::WallToggled { wall: true }
        );
        assert_eq!(
            s.take_events(),
            vec![Event::CellChanged {
                pos: Pos::new(1, 1),
                flags: Flags::WALL
            }]
        );
    }

    #[test]
    fn out_of_bounds_activation_is_an_error() {
        let mut s = Session::new(config(3, 3)).unwrap();
        assert_eq!(
            s.activate_cell(3, 0),
            Err(SessionError::OutOfBounds(Pos::new(3, 0)))
        );
        assert_eq!(s.hover(-1, 0), None);
        assert_eq!(s.hover(0, 0), Some(HoverHint::Start));
    }

    #[test]
    fn run_needs_both_endpoints_and_changes_nothing() {
        let mut s = Session::new(config(3, 3)).unwrap();
        assert_eq!(
            s.request_run(Algorithm::Bfs),
            Err(SessionError::MissingEndpoints {
                start: true,
                end: true
            })
        );
        s.activate_cell(0, 0).unwrap();
        s.take_events();
        let before = s.grid().clone();

        let err = s.request_run(Algorithm::Dijkstra).unwrap_err();
        assert_eq!(
            err,
            SessionError::MissingEndpoints {
                start: false,
                end: true
            }
        );
        assert_eq!(err.to_string(), "Set both start and end nodes.");
        assert_eq!(s.grid(), &before);
        assert!(s.take_events().is_empty());
        assert!(!s.is_running());
    }

    #[test]
    fn bfs_run_draws_visits_then_path() {
        let mut s = corridor(RunPolicy::Supersede);
        let run = s.request_run(Algorithm::Bfs).unwrap();
        assert!(s.is_running());
        assert_eq!(
            s.take_events(),
            vec![Event::RunStarted {
                run,
                algorithm: Algorithm::Bfs
            }]
        );

        let events = s.finish_run();
        let changed: Vec<(Pos, Flags)> = events
            .iter()
            .filter_map(|e| match e {
                Event::CellChanged { pos, flags } => Some((*pos, *flags)),
                _ => None,
            })
            .collect();
        let v = Flags::VISITED;
        let vp = Flags::VISITED | Flags::PATH;
        assert_eq!(
            changed,
            vec![
                (Pos::new(0, 1), v),
                (Pos::new(0, 2), v),
                (Pos::new(0, 3), v),
                (Pos::new(0, 3), vp),
                (Pos::new(0, 2), vp),
                (Pos::new(0, 1), vp),
            ]
        );
        assert_eq!(finished(&events), vec![(run, RunStatus::PathFound { len: 3 })]);
        assert!(!s.is_running());
        assert_eq!(s.grid().count_flag(Flags::PATH), 3);
    }

    #[test]
    fn advance_paces_the_animation() {
        let mut s = corridor(RunPolicy::Supersede);
        s.request_run(Algorithm::Dfs).unwrap();
        s.take_events();

        let first = s.advance(Duration::ZERO);
        assert_eq!(first.len(), 1);
        assert!(s.advance(Duration::from_millis(9)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(1)).len(), 1);
        assert!(s.is_running());
        // Remaining: one visit, three path cells, then the finish.
        let rest = s.advance(Duration::from_secs(1));
        assert_eq!(rest.len(), 5);
        assert!(!s.is_running());
    }

    #[test]
    fn walled_off_end_reports_no_path() {
        let mut s = corridor(RunPolicy::Supersede);
        s.activate_cell(0, 2).unwrap();
        let run = s.request_run(Algorithm::Dijkstra).unwrap();
        let events = s.finish_run();
        assert_eq!(finished(&events), vec![(run, RunStatus::NoPath)]);
        assert_eq!(s.grid().count_flag(Flags::PATH), 0);
        assert_eq!(s.grid().count_flag(Flags::VISITED), 1);
    }

    #[test]
    fn new_run_supersedes_the_active_one() {
        let mut s = corridor(RunPolicy::Supersede);
        let first = s.request_run(Algorithm::Dfs).unwrap();
        s.advance(Duration::from_millis(10));
        assert_eq!(s.grid().count_flag(Flags::VISITED), 2);

        let second = s.request_run(Algorithm::Bfs).unwrap();
        let events = s.take_events();
        assert!(events.contains(&Event::RunCancelled {
            run: first,
            algorithm: Algorithm::Dfs
        }));
        assert_eq!(s.grid().count_flag(Flags::VISITED), 0);

        let events = s.finish_run();
        assert_eq!(finished(&events), vec![(second, RunStatus::PathFound { len: 3 })]);
        assert_eq!(s.grid().count_flag(Flags::VISITED), 3);
        assert_eq!(s.grid().count_flag(Flags::PATH), 3);
    }

    #[test]
    fn reject_policy_refuses_overlapping_runs() {
        let mut s = corridor(RunPolicy::Reject);
        let first = s.request_run(Algorithm::Astar).unwrap();
        assert_eq!(
            s.request_run(Algorithm::Bfs),
            Err(SessionError::RunInProgress(first))
        );
        assert_eq!(s.active_run(), Some(first));
        s.finish_run();
        assert!(s.request_run(Algorithm::Bfs).is_ok());
    }

    #[test]
    fn wall_placed_mid_run_is_never_painted() {
        let mut s = corridor(RunPolicy::Supersede);
        let run = s.request_run(Algorithm::Bfs).unwrap();
        s.advance(Duration::ZERO);
        s.take_events();

        assert_eq!(
            s.activate_cell(0, 2).unwrap(),
            Activation::WallToggled { wall: true }
        );
        assert!(!s.is_running());
        assert_eq!(
            s.take_events(),
            vec![
                Event::RunCancelled {
                    run,
                    algorithm: Algorithm::Bfs
                },
                Event::CellChanged {
                    pos: Pos::new(0, 2),
                    flags: Flags::WALL
                },
            ]
        );

        s.finish_run();
        assert_eq!(s.grid().flags(Pos::new(0, 2)), Flags::WALL);
        assert_eq!(s.grid().count_flag(Flags::PATH), 0);
        assert!(
            s.grid()
                .iter()
                .all(|(_, c)| !(c.is_wall() && c.flags.intersects(Flags::TRANSIENT)))
        );
    }

    #[test]
    fn cancelled_run_stops_drawing() {
        let mut s = corridor(RunPolicy::Supersede);
        let run = s.request_run(Algorithm::Bfs).unwrap();
        s.advance(Duration::ZERO);
        assert_eq!(s.cancel_run(), Some(run));
        assert_eq!(s.cancel_run(), None);
        s.take_events();

        assert!(s.advance(Duration::from_secs(5)).is_empty());
        assert_eq!(s.grid().count_flag(Flags::VISITED), 1);
        assert_eq!(s.grid().count_flag(Flags::PATH), 0);
    }

    #[test]
    fn reruns_leave_identical_grids() {
        let mut s = Session::new(config(8, 8)).unwrap();
        s.activate_cell(1, 1).unwrap();
        s.activate_cell(6, 5).unwrap();
        s.activate_cell(3, 3).unwrap();
        for algorithm in Algorithm::ALL {
            s.request_run(algorithm).unwrap();
            s.finish_run();
            let once = s.grid().clone();
            s.request_run(algorithm).unwrap();
            s.finish_run();
            assert_eq!(s.grid(), &once, "{algorithm}");
        }
    }

    #[test]
    fn maze_generation_cancels_and_keeps_endpoints() {
        let mut s = Session::new(config(10, 10)).unwrap();
        s.activate_cell(0, 0).unwrap();
        s.activate_cell(9, 9).unwrap();
        let run = s.request_run(Algorithm::Bfs).unwrap();
        s.take_events();

        s.request_maze_generation();
        let events = s.take_events();
        assert_eq!(
            events.first(),
            Some(&Event::RunCancelled {
                run,
                algorithm: Algorithm::Bfs
            })
        );
        assert!(!s.is_running());
        assert!(!s.grid().is_wall(Pos::new(0, 0)));
        assert!(!s.grid().is_wall(Pos::new(9, 9)));
        assert_eq!(s.grid().start(), Some(Pos::new(0, 0)));
        assert_eq!(s.grid().end(), Some(Pos::new(9, 9)));
        assert!(s.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn weight_regeneration_keeps_endpoint_weights() {
        let mut s = Session::new(config(5, 5)).unwrap();
        s.activate_cell(2, 2).unwrap();
        let w = s.grid().weight(Pos::new(2, 2));
        s.take_events();
        s.request_weight_regeneration();
        assert_eq!(s.take_events(), vec![Event::WeightsChanged]);
        assert_eq!(s.grid().weight(Pos::new(2, 2)), w);
    }

    #[test]
    fn reset_starts_over() {
        let mut s = corridor(RunPolicy::Supersede);
        s.request_run(Algorithm::Bfs).unwrap();
        s.take_events();

        s.request_reset();
        let events = s.take_events();
        assert!(matches!(events[0], Event::RunCancelled { .. }));
        assert_eq!(
            &events[1..],
            &[Event::GridReset, Event::StageChanged(Stage::AwaitingStart)]
        );
        assert_eq!(s.stage(), Stage::AwaitingStart);
        assert_eq!(s.grid().start(), None);
        assert!(s.grid().iter().all(|(_, c)| c.flags.is_empty()));
    }

    #[test]
    fn play_delivers_every_event() {
        let mut s = Session::new(SessionConfig {
            visit_delay: Duration::ZERO,
            path_delay: Duration::ZERO,
            ..config(1, 5)
        })
        .unwrap();
        s.activate_cell(0, 0).unwrap();
        s.activate_cell(0, 4).unwrap();
        s.request_run(Algorithm::Bfs).unwrap();

        let mut seen = Vec::new();
        s.play(|e| seen.push(e.clone()));
        assert_eq!(seen.first(), Some(&Event::StageChanged(Stage::AwaitingStart)));
        assert!(matches!(
            seen.last(),
            Some(Event::RunFinished {
                status: RunStatus::PathFound { len: 3 },
                ..
            })
        ));
        assert!(!s.is_running());
    }
}
