//! Animated Rössler attractor.
//!
//! The system is integrated with a fixed-step Euler scheme, the resulting
//! trajectory is revealed a batch of points per frame while its hue cycles
//! with wall-clock time, and the coefficients can be tuned live through a
//! debounced parameter session.
//!
//! Data flows one way:
//!
//! ```text
//! ControlEvent -> ParameterSession -> TrajectorySettings::generate
//!              -> RevealController -> RenderAdapter -> Renderer
//! ```
//!
//! [`visualizer::Visualizer`] wires these together; the binary supplies a
//! macroquad-backed [`render::Renderer`].

pub mod camera;
pub mod config;
pub mod error;
pub mod integrator;
pub mod render;
pub mod reveal;
pub mod session;
pub mod trajectory;
pub mod visualizer;

pub use camera::{CameraSettings, OrbitCamera};
pub use config::VisualizerConfig;
pub use error::VisualizerError;
pub use integrator::{step, Param, Parameters, SystemState};
pub use render::{DrawCall, RenderAdapter, Renderer};
pub use reveal::{RevealController, RevealStatus};
pub use session::{DebounceTimer, ParameterSession};
pub use trajectory::{generate, Trajectory, TrajectorySettings};
pub use visualizer::{ControlEvent, Visualizer};
