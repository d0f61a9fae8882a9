//! Forward Euler step for the Rössler system.

use serde::{Deserialize, Serialize};

/// Instantaneous point of the dynamical system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SystemState {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// False once the trajectory has run off to NaN or infinity.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Equation coefficients `a`, `b` and `c`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Parameters {
    pub const DEFAULT: Parameters = Parameters { a: 0.2, b: 0.2, c: 5.7 };

    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn get(&self, param: Param) -> f64 {
        match param {
            Param::A => self.a,
            Param::B => self.b,
            Param::C => self.c,
        }
    }

    /// Copy with one coefficient replaced.
    pub fn with(mut self, param: Param, value: f64) -> Self {
        match param {
            Param::A => self.a = value,
            Param::B => self.b = value,
            Param::C => self.c = value,
        }
        self
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Names one of the three coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    A,
    B,
    C,
}

impl Param {
    pub const ALL: [Param; 3] = [Param::A, Param::B, Param::C];

    pub fn label(self) -> &'static str {
        match self {
            Param::A => "a",
            Param::B => "b",
            Param::C => "c",
        }
    }
}

/// Advance `state` by one explicit Euler step of size `dt`.
///
/// ```text
/// dx = (-y - z)      * dt
/// dy = (x + a*y)     * dt
/// dz = (b + z*(x-c)) * dt
/// ```
///
/// Never fails; diverging coefficients simply produce non-finite output,
/// which callers check with [`SystemState::is_finite`].
#[inline]
pub fn step(state: SystemState, a: f64, b: f64, c: f64, dt: f64) -> SystemState {
    let SystemState { x, y, z } = state;
    let dx = (-y - z) * dt;
    let dy = (x + a * y) * dt;
    let dz = (b + z * (x - c)) * dt;
    SystemState::new(x + dx, y + dy, z + dz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_from_initial_condition() {
        let next = step(SystemState::new(0.1, 0.0, 0.0), 0.2, 0.2, 5.7, 0.01);
        assert_eq!(next.x, 0.1);
        assert!((next.y - 0.001).abs() < 1e-15);
        assert!((next.z - 0.002).abs() < 1e-15);
    }

    #[test]
    fn test_step_is_deterministic() {
        let s = SystemState::new(1.25, -3.5, 0.75);
        let first = step(s, 0.2, 0.2, 5.7, 0.01);
        let second = step(s, 0.2, 0.2, 5.7, 0.01);
        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.y.to_bits(), second.y.to_bits());
        assert_eq!(first.z.to_bits(), second.z.to_bits());
    }

    #[test]
    fn test_zero_dt_is_identity() {
        let s = SystemState::new(4.0, -2.0, 9.0);
        assert_eq!(step(s, 0.2, 0.2, 5.7, 0.0), s);
    }

    #[test]
    fn test_divergence_is_silent() {
        let mut s = SystemState::new(0.1, 0.0, 0.0);
        for _ in 0..5_000 {
            s = step(s, 5.0, 5.0, -50.0, 0.5);
        }
        assert!(!s.is_finite());
    }

    #[test]
    fn test_parameters_with_and_get() {
        let p = Parameters::default().with(Param::C, 9.0);
        assert_eq!(p.get(Param::A), 0.2);
        assert_eq!(p.get(Param::B), 0.2);
        assert_eq!(p.get(Param::C), 9.0);
    }
}
