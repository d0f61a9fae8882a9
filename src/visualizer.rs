//! Wiring of session, generator, reveal controller and render adapter.
//!
//! The host calls [`Visualizer::handle`] for every control event and
//! [`Visualizer::frame`] once per rendered frame. Generation happens inside
//! `frame` on the same thread, so a newly committed trajectory is installed
//! before the reveal controller next looks at it.

use std::time::Duration;

use log::{debug, info};

use crate::config::VisualizerConfig;
use crate::integrator::{Param, Parameters};
use crate::render::{RenderAdapter, Renderer};
use crate::reveal::{RevealController, RevealStatus};
use crate::session::ParameterSession;
use crate::trajectory::{Trajectory, TrajectorySettings};

/// Discrete input from the parameter controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    Increment(Param),
    Decrement(Param),
    /// Restore default parameters.
    Reset,
    /// Replay the reveal from the first point.
    Restart,
    TogglePause,
    ToggleLooping,
}

pub struct Visualizer {
    settings: TrajectorySettings,
    session: ParameterSession,
    trajectory: Trajectory,
    reveal: RevealController,
    adapter: RenderAdapter,
    frame: u64,
    generations: u64,
    paused: bool,
    pending_commit: Option<Parameters>,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        let session = ParameterSession::new(config.session);
        let trajectory = config.trajectory.generate(session.committed());
        let reveal = RevealController::new(trajectory.len(), config.reveal);
        let mut adapter = RenderAdapter::new(config.render);
        adapter.load(&trajectory);
        info!(
            "Visualizer ready with {} points (a={} b={} c={})",
            trajectory.len(),
            trajectory.params().a,
            trajectory.params().b,
            trajectory.params().c
        );
        Self {
            settings: config.trajectory,
            session,
            trajectory,
            reveal,
            adapter,
            frame: 0,
            generations: 1,
            paused: false,
            pending_commit: None,
        }
    }

    pub fn session(&self) -> &ParameterSession {
        &self.session
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn adapter(&self) -> &RenderAdapter {
        &self.adapter
    }

    /// Frames advanced while not paused.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Number of trajectories generated, the initial one included.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn handle(&mut self, event: ControlEvent, now: Duration) {
        match event {
            ControlEvent::Increment(param) => self.session.increment(param, now),
            ControlEvent::Decrement(param) => self.session.decrement(param, now),
            ControlEvent::Reset => {
                // Applied on the next frame, through the same path as a timer commit.
                self.pending_commit = self.session.reset();
            }
            ControlEvent::Restart => self.reveal.restart(),
            ControlEvent::TogglePause => {
                self.paused = !self.paused;
                info!("Paused: {}", self.paused);
            }
            ControlEvent::ToggleLooping => {
                let looping = !self.reveal.is_looping();
                self.reveal.set_looping(looping);
                info!("Looping reveal: {}", looping);
            }
        }
    }

    /// Advance one frame and draw through `renderer`.
    ///
    /// `now` drives the debounce timer; its value in seconds is also the
    /// wall clock for hue and loop timing.
    pub fn frame<R: Renderer + ?Sized>(&mut self, now: Duration, renderer: &mut R) {
        let committed = self.pending_commit.take().or_else(|| self.session.on_tick(now));
        if let Some(params) = committed {
            self.regenerate(params);
        }

        if !self.paused {
            self.reveal.tick(now.as_secs_f64());
            self.frame += 1;
        }

        self.adapter.draw(
            renderer,
            self.reveal.visible_count(),
            self.reveal.hue(),
            self.frame,
        );
    }

    fn regenerate(&mut self, params: Parameters) {
        if params == self.trajectory.params() {
            debug!("Committed parameters unchanged, restarting reveal only");
            self.reveal.restart();
            return;
        }
        self.trajectory = self.settings.generate(params);
        self.adapter.load(&self.trajectory);
        self.reveal.install(self.trajectory.len());
        self.generations += 1;
    }

    /// Status line used by the periodic stats log.
    pub fn describe(&self) -> String {
        let status = match self.reveal.status() {
            RevealStatus::Filling => "Filling",
            RevealStatus::HoldingFull => "HoldingFull",
        };
        format!(
            "{} {}/{} points, hue {:.2}, {} generations{}",
            status,
            self.reveal.visible_count(),
            self.trajectory.len(),
            self.reveal.hue(),
            self.generations,
            if self.session.is_pending() { ", commit pending" } else { "" }
        )
    }

    /// Cancel the pending commit before the visualizer goes away.
    pub fn teardown(&mut self) {
        self.session.teardown();
        self.pending_commit = None;
        info!("Visualizer torn down after {} frames", self.frame);
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(VisualizerConfig::default())
    }
}
