//! A point turning on the unit circle.
//!
//! The state is an angle in radians and a command is an angle increment.
//! The point is only observed through the quarter of the circle it faces, so
//! this is the smallest system where [`Exposed`] and [`Detailed`] make a
//! visible difference.
//!
//! [`Exposed`]: skein_core::Exposed
//! [`Detailed`]: skein_core::Detailed

use std::f64::consts::FRAC_1_SQRT_2;

use rand::Rng;
use skein_core::{System, TransparentSystem};

/// Which quarter of the circle the point faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Up,
    Down,
    Left,
    Right,
}

impl Orientation {
    /// The orientation of a point at angle `theta`.
    ///
    /// Left and right win on the diagonals.
    #[must_use]
    pub fn of(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();

        if cos > FRAC_1_SQRT_2 {
            Orientation::Right
        } else if cos < -FRAC_1_SQRT_2 {
            Orientation::Left
        } else if sin > FRAC_1_SQRT_2 {
            Orientation::Up
        } else {
            Orientation::Down
        }
    }
}

/// A point on the unit circle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Circle {
    theta: f64,
}

impl Circle {
    #[must_use]
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Draws an angle in `[0, 2π)`.
    pub fn random_state<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        rng.random_range(0.0..std::f64::consts::TAU)
    }
}

impl System for Circle {
    type State = f64;
    type Observation = Orientation;
    type Command = f64;
    type Report = ();

    fn assign(&mut self, theta: f64) {
        self.theta = theta;
    }

    fn observe(&self) -> Orientation {
        Orientation::of(self.theta)
    }

    fn step(&mut self, increment: f64) {
        self.theta += increment;
    }

    fn is_alive(&self) -> bool {
        true
    }
}

impl TransparentSystem for Circle {
    fn state(&self) -> f64 {
        self.theta
    }
}
