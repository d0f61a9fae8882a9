//! Bridge between the reveal state and whatever draws the curve.
//!
//! The adapter owns the only draw buffer. Reveal progress, hue and frame
//! number come in on every call so no animation state hides in here.

use std::f64::consts::TAU;

use log::debug;
use macroquad::color::{hsl_to_rgb, Color};
use macroquad::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::trajectory::Trajectory;

/// Radians of rotation added per rendered frame.
pub const ROTATION_PER_FRAME: f32 = 0.001;
pub const SATURATION: f32 = 1.0;
pub const LIGHTNESS: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub rotation_per_frame: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            rotation_per_frame: ROTATION_PER_FRAME,
        }
    }
}

/// One polyline draw: the visible prefix, its color and the rotation about
/// the vertical axis to apply to every point.
#[derive(Clone, Copy, Debug)]
pub struct DrawCall<'a> {
    pub points: &'a [Vec3],
    pub color: Color,
    pub rotation: f32,
}

impl<'a> DrawCall<'a> {
    /// Consecutive point pairs forming the line segments of the polyline.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + 'a {
        let rotation = Quat::from_rotation_y(self.rotation);
        let points = self.points;
        points
            .windows(2)
            .map(move |pair| (rotation * pair[0], rotation * pair[1]))
    }
}

/// Anything able to draw a solid-colored polyline.
pub trait Renderer {
    fn draw_polyline(&mut self, call: &DrawCall<'_>);
}

/// Solid color for `hue` at full saturation and mid lightness.
pub fn hue_color(hue: f64) -> Color {
    hsl_to_rgb(hue.rem_euclid(1.0) as f32, SATURATION, LIGHTNESS)
}

#[derive(Debug, Default)]
pub struct RenderAdapter {
    settings: RenderSettings,
    buffer: Vec<Vec3>,
    drawable_len: usize,
}

impl RenderAdapter {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            buffer: Vec::new(),
            drawable_len: 0,
        }
    }

    /// Copy a trajectory into the draw buffer, reusing its allocation.
    ///
    /// Drawing stops at the first point with a non-finite coordinate.
    pub fn load(&mut self, trajectory: &Trajectory) {
        self.buffer.clear();
        self.buffer.extend(
            trajectory
                .iter()
                .map(|p| Vec3::new(p.x as f32, p.y as f32, p.z as f32)),
        );
        // Finite f64 values can still overflow f32.
        self.drawable_len = self
            .buffer
            .iter()
            .position(|p| !p.is_finite())
            .unwrap_or(self.buffer.len());
        // Divergence itself is already reported by generation.
        if self.drawable_len < self.buffer.len() {
            debug!(
                "Only {} of {} points are drawable",
                self.drawable_len,
                self.buffer.len()
            );
        }
    }

    pub fn drawable_len(&self) -> usize {
        self.drawable_len
    }

    pub fn prepare(&self, visible_count: usize, hue: f64, frame: u64) -> DrawCall<'_> {
        let count = visible_count.min(self.drawable_len);
        DrawCall {
            points: &self.buffer[..count],
            color: hue_color(hue),
            rotation: self.rotation_at(frame),
        }
    }

    /// Rotation after `frame` ticks, wrapped to one turn so long runs keep precision.
    pub fn rotation_at(&self, frame: u64) -> f32 {
        (frame as f64 * self.settings.rotation_per_frame as f64).rem_euclid(TAU) as f32
    }

    /// Prepare and hand the draw call to `renderer`.
    pub fn draw<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        visible_count: usize,
        hue: f64,
        frame: u64,
    ) {
        renderer.draw_polyline(&self.prepare(visible_count, hue, frame));
    }
}
