//! Live and committed parameters with a debounced commit.
//!
//! Every edit updates the live value at once and (re)schedules a commit.
//! Only when no further edit arrives for the debounce delay does the
//! committed value catch up, so a burst of clicks costs one regeneration.
//!
//! Time is passed in explicitly as a [`Duration`] since startup, which keeps
//! the session independent of any particular clock.

use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::integrator::{Param, Parameters};

pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);
pub const PARAM_STEP: f64 = 0.1;

/// Cancellable delayed task that fires at most once per schedule.
#[derive(Clone, Copy, Debug)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Replace any pending deadline with `now + delay`.
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub debounce_ms: u64,
    pub step: f64,
    pub defaults: Parameters,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_DELAY.as_millis() as u64,
            step: PARAM_STEP,
            defaults: Parameters::DEFAULT,
        }
    }
}

/// Round to one decimal place so repeated stepping never shows drift.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug)]
pub struct ParameterSession {
    live: Parameters,
    committed: Parameters,
    timer: DebounceTimer,
    step: f64,
    defaults: Parameters,
    closed: bool,
}

impl ParameterSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            live: settings.defaults,
            committed: settings.defaults,
            timer: DebounceTimer::new(Duration::from_millis(settings.debounce_ms)),
            step: settings.step,
            defaults: settings.defaults,
            closed: false,
        }
    }

    pub fn live(&self) -> Parameters {
        self.live
    }

    pub fn committed(&self) -> Parameters {
        self.committed
    }

    /// True while an edit is waiting out the debounce delay.
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn on_param_change(&mut self, new_live: Parameters, now: Duration) {
        if self.closed {
            warn!("Ignoring parameter change after teardown");
            return;
        }
        self.live = new_live;
        self.timer.cancel();
        self.timer.schedule(now);
        debug!(
            "Live parameters a={} b={} c={}, commit pending",
            new_live.a, new_live.b, new_live.c
        );
    }

    pub fn increment(&mut self, param: Param, now: Duration) {
        self.nudge(param, self.step, now);
    }

    pub fn decrement(&mut self, param: Param, now: Duration) {
        self.nudge(param, -self.step, now);
    }

    fn nudge(&mut self, param: Param, delta: f64, now: Duration) {
        let value = round_to_tenth(self.live.get(param) + delta);
        self.on_param_change(self.live.with(param, value), now);
    }

    /// Restore the defaults and commit them without waiting.
    pub fn reset(&mut self) -> Option<Parameters> {
        if self.closed {
            warn!("Ignoring reset after teardown");
            return None;
        }
        self.live = self.defaults;
        self.timer.cancel();
        Some(self.commit())
    }

    /// Poll the debounce timer. Returns the newly committed parameters when
    /// the quiet period has elapsed.
    pub fn on_tick(&mut self, now: Duration) -> Option<Parameters> {
        if self.timer.poll(now) {
            Some(self.commit())
        } else {
            None
        }
    }

    fn commit(&mut self) -> Parameters {
        self.committed = self.live;
        info!(
            "Parameters committed: a={} b={} c={}",
            self.committed.a, self.committed.b, self.committed.c
        );
        self.committed
    }

    /// Cancel any pending commit. The session accepts no edits afterwards.
    pub fn teardown(&mut self) {
        if self.timer.is_pending() {
            debug!("Cancelling pending commit on teardown");
        }
        self.timer.cancel();
        self.closed = true;
    }
}

impl Default for ParameterSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}
