//! Damped orbit camera around the origin.

use std::f32::consts::{PI, TAU};

use macroquad::math::Vec3;
use serde::{Deserialize, Serialize};

const MIN_POLAR: f32 = 0.01;
const MIN_RADIUS: f32 = 1.0;
const MAX_RADIUS: f32 = 500.0;
const ZOOM_BASE: f32 = 0.95;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Fraction of pending motion applied (and removed) each frame.
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            damping: 0.05,
            rotate_speed: 0.5,
            zoom_speed: 0.8,
            position: [25.0, 25.0, 25.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Orbit camera expressed in spherical coordinates around `target`.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    settings: CameraSettings,
    target: Vec3,
    /// Distance from the target point.
    radius: f32,
    /// Angle around the vertical axis, measured from +Z.
    azimuth: f32,
    /// Angle down from the vertical axis.
    polar: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,
}

impl OrbitCamera {
    pub fn new(settings: CameraSettings) -> Self {
        let target = Vec3::from(settings.target);
        let offset = Vec3::from(settings.position) - target;
        let radius = offset.length().max(MIN_RADIUS);
        Self {
            settings,
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + Vec3::new(
                self.radius * sin_polar * self.azimuth.sin(),
                self.radius * self.polar.cos(),
                self.radius * sin_polar * self.azimuth.cos(),
            )
    }

    /// Queue a drag of `dx`/`dy` pixels on a viewport `viewport_height` tall.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let scale = TAU * self.settings.rotate_speed / viewport_height;
        self.pending_azimuth -= dx * scale;
        self.pending_polar -= dy * scale;
    }

    /// Queue a zoom of `notches` wheel steps; positive zooms in.
    pub fn zoom(&mut self, notches: f32) {
        self.pending_scale *= ZOOM_BASE.powf(self.settings.zoom_speed * notches);
    }

    /// Apply a damped share of queued motion. Call once per frame.
    pub fn update(&mut self) {
        let damping = self.settings.damping.clamp(0.0, 1.0);

        self.azimuth += self.pending_azimuth * damping;
        self.polar = (self.polar + self.pending_polar * damping).clamp(MIN_POLAR, PI - MIN_POLAR);
        self.pending_azimuth *= 1.0 - damping;
        self.pending_polar *= 1.0 - damping;

        let step = self.pending_scale.powf(damping);
        self.radius = (self.radius * step).clamp(MIN_RADIUS, MAX_RADIUS);
        self.pending_scale /= step;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_initial_position_round_trips() {
        let camera = OrbitCamera::default();
        assert!(close(camera.position(), Vec3::new(25.0, 25.0, 25.0)));
        assert_eq!(camera.target(), Vec3::ZERO);
    }

    #[test]
    fn test_update_without_input_is_stable() {
        let mut camera = OrbitCamera::default();
        let before = camera.position();
        for _ in 0..100 {
            camera.update();
        }
        assert!(close(camera.position(), before));
    }

    #[test]
    fn test_drag_is_damped_over_frames() {
        let mut camera = OrbitCamera::default();
        let start = camera.position();
        camera.drag(100.0, 0.0, 720.0);
        camera.update();
        let after_one = camera.position();
        assert!(!close(after_one, start));
        for _ in 0..500 {
            camera.update();
        }
        let settled = camera.position();
        camera.update();
        assert!(close(camera.position(), settled));
        // Horizontal drags keep distance and height.
        assert!((settled.length() - start.length()).abs() < 1e-2);
        assert!((settled.y - start.y).abs() < 1e-2);
    }

    #[test]
    fn test_zoom_in_reduces_radius() {
        let mut camera = OrbitCamera::default();
        let radius = camera.radius();
        camera.zoom(3.0);
        for _ in 0..200 {
            camera.update();
        }
        assert!(camera.radius() < radius);
        assert!(camera.radius() >= MIN_RADIUS);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.drag(0.0, 1.0e6, 720.0);
        for _ in 0..200 {
            camera.update();
        }
        assert!(camera.position().y.is_finite());
        assert!(camera.position().y < camera.radius());
    }
}
