use std::f64::consts::PI;

use thiserror::Error;

/// Physical and termination parameters of a [`CartPole`].
///
/// [`CartPole`]: super::CartPole
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,

    /// Mass of the cart (kg).
    pub cart_mass: f64,

    /// Mass of the pole (kg).
    pub pole_mass: f64,

    /// Distance from the pivot to the pole's center of mass (m).
    pub half_pole_length: f64,

    /// Magnitude of the force applied by a push (N).
    pub push_force: f64,

    /// Duration of one step (s).
    pub time_step: f64,

    /// The episode ends once the pole leans further than this (rad).
    pub theta_threshold: f64,

    /// The episode ends once the cart is further than this from center (m).
    pub x_threshold: f64,

    /// Random starting positions are drawn from `[-start_x_range, start_x_range]`.
    pub start_x_range: f64,

    /// Random starting angles are drawn from `[-start_theta_range, start_theta_range]`.
    pub start_theta_range: f64,
}

/// Errors that can occur when validating a cart-pole config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be finite and strictly positive")]
    NotPositive(&'static str),

    #[error("{0} must be finite and non-negative")]
    Negative(&'static str),
}

impl Default for Config {
    fn default() -> Self {
        let theta_threshold = 12.0 * 2.0 * PI / 360.0;

        Self {
            gravity: 9.81,
            cart_mass: 1.0,
            pole_mass: 0.1,
            half_pole_length: 0.5,
            push_force: 10.0,
            time_step: 0.02,
            theta_threshold,
            x_threshold: 2.4,
            start_x_range: 0.5,
            start_theta_range: theta_threshold / 2.0,
        }
    }
}

impl Config {
    /// Checks that every parameter is physically meaningful.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("cart_mass", self.cart_mass),
            ("pole_mass", self.pole_mass),
            ("half_pole_length", self.half_pole_length),
            ("time_step", self.time_step),
            ("theta_threshold", self.theta_threshold),
            ("x_threshold", self.x_threshold),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive(name));
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("push_force", self.push_force),
            ("start_x_range", self.start_x_range),
            ("start_theta_range", self.start_theta_range),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative(name));
            }
        }

        Ok(())
    }

    pub(super) fn total_mass(&self) -> f64 {
        self.cart_mass + self.pole_mass
    }

    pub(super) fn pole_moment(&self) -> f64 {
        self.pole_mass * self.half_pole_length
    }
}
