use std::time::Duration;

use crate::error::SessionError;
use crate::mapgen::DEFAULT_WALL_PROBABILITY;
use crate::scheduler::Pacing;

/// What to do when a run is requested while another is still animating.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RunPolicy {
    /// Cancel the running animation and start the new one.
    #[default]
    Supersede,
    /// Refuse with [`SessionError::RunInProgress`].
    Reject,
}

/// Session settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub rows: i32,
    pub cols: i32,
    /// Chance that maze generation turns a cell into a wall.
    pub wall_probability: f64,
    /// Hold after each visited cell.
    pub visit_delay: Duration,
    /// Hold after each path cell.
    pub path_delay: Duration,
    /// Seed for weights and walls. `None` draws one from the OS.
    pub seed: Option<u64>,
    pub run_policy: RunPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 30,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            visit_delay: Duration::from_millis(10),
            path_delay: Duration::from_millis(30),
            seed: None,
            run_policy: RunPolicy::Supersede,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(SessionError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(SessionError::InvalidConfig(format!(
                "wall probability {} is outside [0, 1]",
                self.wall_probability
            )));
        }
        Ok(())
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            visit: self.visit_delay,
            path: self.path_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SessionConfig::default();
        assert_eq!((c.rows, c.cols), (20, 30));
        assert_eq!(c.wall_probability, 0.3);
        assert_eq!(c.pacing(), Pacing::default());
        assert_eq!(c.run_policy, RunPolicy::Supersede);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            SessionConfig {
                rows: 0,
                ..SessionConfig::default()
            },
            SessionConfig {
                cols: -3,
                ..SessionConfig::default()
            },
            SessionConfig {
                wall_probability: 1.2,
                ..SessionConfig::default()
            },
            SessionConfig {
                wall_probability: f64::NAN,
                ..SessionConfig::default()
            },
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(SessionError::InvalidConfig(_))));
        }
    }
}
