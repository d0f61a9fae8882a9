//! Fixed-length trajectory generation.
//!
//! A trajectory is produced once per committed parameter set: the integrator
//! runs through a transient that is thrown away, then records every state of
//! the following steps. Nothing here is incremental, a parameter change
//! always means a full regeneration.

use std::time::Instant;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::integrator::{step, Parameters, SystemState};

pub const DT: f64 = 0.01;
pub const TRANSIENT_STEPS: usize = 1_000;
pub const POINT_COUNT: usize = 10_000;
pub const INITIAL_STATE: SystemState = SystemState::new(0.1, 0.0, 0.0);

/// Integration constants used for every generation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectorySettings {
    pub dt: f64,
    pub transient_steps: usize,
    pub point_count: usize,
    pub initial_state: SystemState,
}

impl Default for TrajectorySettings {
    fn default() -> Self {
        Self {
            dt: DT,
            transient_steps: TRANSIENT_STEPS,
            point_count: POINT_COUNT,
            initial_state: INITIAL_STATE,
        }
    }
}

impl TrajectorySettings {
    pub fn generate(&self, params: Parameters) -> Trajectory {
        let started = Instant::now();
        let Parameters { a, b, c } = params;

        let mut state = self.initial_state;
        for _ in 0..self.transient_steps {
            state = step(state, a, b, c, self.dt);
        }

        let mut points = Vec::with_capacity(self.point_count);
        for _ in 0..self.point_count {
            state = step(state, a, b, c, self.dt);
            points.push(state);
        }

        let trajectory = Trajectory { params, points };
        debug!(
            "Generated {} points for a={} b={} c={} in {:.2}ms",
            trajectory.len(),
            a,
            b,
            c,
            started.elapsed().as_secs_f64() * 1000.0
        );
        if let Some(index) = trajectory.first_non_finite() {
            warn!(
                "Trajectory for a={} b={} c={} diverges at point {} of {}",
                a,
                b,
                c,
                index,
                trajectory.len()
            );
        }
        trajectory
    }
}

/// Generate with the default constants: `dt = 0.01`, 1000 transient steps,
/// 10 000 recorded points, starting from `(0.1, 0, 0)`.
pub fn generate(a: f64, b: f64, c: f64) -> Trajectory {
    TrajectorySettings::default().generate(Parameters::new(a, b, c))
}

/// Ordered, immutable sequence of states. Index order is temporal order.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    params: Parameters,
    points: Vec<SystemState>,
}

impl Trajectory {
    pub fn params(&self) -> Parameters {
        self.params
    }

    pub fn points(&self) -> &[SystemState] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SystemState> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SystemState> {
        self.points.iter()
    }

    /// Index of the first point with a NaN or infinite coordinate.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.points.iter().position(|p| !p.is_finite())
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a SystemState;
    type IntoIter = std::slice::Iter<'a, SystemState>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
