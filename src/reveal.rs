//! Progressive reveal of a trajectory, one batch of points per frame.

use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const BATCH_SIZE: usize = 20;
pub const HUE_RATE: f64 = 0.05;
pub const LOOP_PERIOD: f64 = 30.0;
pub const LOOP_THRESHOLD: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStatus {
    Filling,     // Prefix still growing
    HoldingFull, // Whole trajectory visible
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    /// Points added per tick.
    pub batch_size: usize,
    /// Hue cycles per second.
    pub hue_rate: f64,
    /// Restart the reveal periodically once full.
    pub looping: bool,
    pub loop_period: f64,
    pub loop_threshold: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            hue_rate: HUE_RATE,
            looping: false,
            loop_period: LOOP_PERIOD,
            loop_threshold: LOOP_THRESHOLD,
        }
    }
}

/// Per-frame state machine exposing a growing prefix of the trajectory.
#[derive(Clone, Debug)]
pub struct RevealController {
    settings: RevealSettings,
    len: usize,
    visible_count: usize,
    hue: f64,
    status: RevealStatus,
    cycles: u64,
}

impl RevealController {
    pub fn new(len: usize, settings: RevealSettings) -> Self {
        Self {
            settings,
            len,
            visible_count: 0,
            hue: 0.0,
            status: RevealStatus::Filling,
            cycles: 0,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn status(&self) -> RevealStatus {
        self.status
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Completed reveal cycles since creation.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn is_looping(&self) -> bool {
        self.settings.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.settings.looping = looping;
    }

    /// Switch to a freshly generated trajectory of `len` points.
    pub fn install(&mut self, len: usize) {
        self.len = len;
        self.reset();
    }

    /// User-requested restart; valid from any state.
    pub fn restart(&mut self) {
        debug!("Reveal restarted at {}/{}", self.visible_count, self.len);
        self.reset();
    }

    fn reset(&mut self) {
        self.visible_count = 0;
        self.status = RevealStatus::Filling;
    }

    /// Advance one frame. `elapsed` is wall-clock seconds since start.
    pub fn tick(&mut self, elapsed: f64) {
        self.hue = (elapsed * self.settings.hue_rate).rem_euclid(1.0);

        // Frame times rarely land on the period boundary, hence the window.
        if self.settings.looping
            && self.status == RevealStatus::HoldingFull
            && elapsed.rem_euclid(self.settings.loop_period) < self.settings.loop_threshold
        {
            debug!("Loop period reached at {:.2}s, restarting reveal", elapsed);
            self.reset();
        }

        if self.visible_count < self.len {
            self.visible_count = (self.visible_count + self.settings.batch_size).min(self.len);
        }

        if self.status == RevealStatus::Filling && self.visible_count == self.len {
            self.status = RevealStatus::HoldingFull;
            self.cycles += 1;
            info!("Reveal complete: {} points visible", self.len);
        }
    }
}
