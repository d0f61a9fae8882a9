//! Visualizer configuration.
//!
//! Every constant of the visualization has a default here. A JSON file
//! named by `ROSSLER_CONFIG` may override any subset of them:
//!
//! ```json
//! { "reveal": { "looping": true }, "session": { "debounce_ms": 250 } }
//! ```

use std::env;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::camera::CameraSettings;
use crate::error::{Result, VisualizerError};
use crate::render::RenderSettings;
use crate::reveal::RevealSettings;
use crate::session::SessionSettings;
use crate::trajectory::TrajectorySettings;

pub const CONFIG_ENV_VAR: &str = "ROSSLER_CONFIG";

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub trajectory: TrajectorySettings,
    pub reveal: RevealSettings,
    pub session: SessionSettings,
    pub camera: CameraSettings,
    pub render: RenderSettings,
}

impl VisualizerConfig {
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| VisualizerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| VisualizerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `ROSSLER_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.trajectory;
        if !(t.dt.is_finite() && t.dt > 0.0) {
            return Err(VisualizerError::InvalidConfig("trajectory.dt must be positive"));
        }
        if t.point_count == 0 {
            return Err(VisualizerError::InvalidConfig("trajectory.point_count must be non-zero"));
        }
        if !t.initial_state.is_finite() {
            return Err(VisualizerError::InvalidConfig("trajectory.initial_state must be finite"));
        }

        let r = &self.reveal;
        if r.batch_size == 0 {
            return Err(VisualizerError::InvalidConfig("reveal.batch_size must be non-zero"));
        }
        if !r.hue_rate.is_finite() {
            return Err(VisualizerError::InvalidConfig("reveal.hue_rate must be finite"));
        }
        if !(r.loop_period > 0.0 && r.loop_threshold >= 0.0 && r.loop_threshold < r.loop_period) {
            return Err(VisualizerError::InvalidConfig(
                "reveal.loop_threshold must lie within reveal.loop_period",
            ));
        }

        let s = &self.session;
        if s.debounce_ms == 0 {
            return Err(VisualizerError::InvalidConfig("session.debounce_ms must be non-zero"));
        }
        // Stepped values are rounded to tenths, so the step must be whole tenths.
        let tenths = s.step * 10.0;
        if !s.step.is_finite() || s.step < 0.1 || (tenths - tenths.round()).abs() > 1e-9 {
            return Err(VisualizerError::InvalidConfig(
                "session.step must be a positive multiple of 0.1",
            ));
        }

        let c = &self.camera;
        if !(0.0..=1.0).contains(&c.damping) || c.damping == 0.0 {
            return Err(VisualizerError::InvalidConfig("camera.damping must be in (0, 1]"));
        }
        Ok(())
    }
}
