//! The classic cart-pole balancing task.
//!
//! A pole is hinged on a cart that moves along a frictionless track.
//! Each step pushes the cart left or right with a fixed force.
//! The episode ends when the pole leans too far or the cart leaves the track.
//!
//! - State and observation: [`State`] (position, angle, and their rates).
//! - Command: [`Push`].
//! - Report: the reward, `1.0` for every step taken while alive, including the
//!   step on which the pole falls, and `0.0` for the no-op steps after that.

mod config;

pub use config::{Config, ConfigError};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use skein_core::{System, TransparentSystem};
use tracing::debug;

/// The configuration of the cart and pole.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct State {
    /// Cart position from the center of the track (m).
    pub x: f64,
    /// Cart velocity (m/s).
    pub x_dot: f64,
    /// Pole angle from vertical (rad).
    pub theta: f64,
    /// Pole angular velocity (rad/s).
    pub theta_dot: f64,
}

/// The direction in which the cart is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Push {
    Left,
    Right,
}

impl Distribution<Push> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Push {
        if rng.random() { Push::Left } else { Push::Right }
    }
}

/// A cart-pole simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPole {
    config: Config,
    state: State,
    terminated: bool,
}

impl CartPole {
    /// Creates an upright, centered cart-pole with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            state: State::default(),
            terminated: false,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Draws a random starting state, at rest, near the center and upright.
    pub fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> State {
        let Config {
            start_x_range,
            start_theta_range,
            ..
        } = self.config;

        State {
            x: symmetric(rng, start_x_range),
            x_dot: 0.0,
            theta: symmetric(rng, start_theta_range),
            theta_dot: 0.0,
        }
    }

    /// Non-finite positions or angles count as out of bounds.
    fn out_of_bounds(&self) -> bool {
        let State { x, theta, .. } = self.state;

        !x.is_finite()
            || !theta.is_finite()
            || x.abs() > self.config.x_threshold
            || theta.abs() > self.config.theta_threshold
    }
}

impl Default for CartPole {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(Config::default()).unwrap()
    }
}

impl System for CartPole {
    type State = State;
    type Observation = State;
    type Command = Push;
    type Report = f64;

    fn assign(&mut self, state: State) {
        self.state = state;
        self.terminated = self.out_of_bounds();
    }

    fn observe(&self) -> State {
        self.state
    }

    fn step(&mut self, command: Push) -> f64 {
        if self.terminated {
            return 0.0;
        }

        let c = &self.config;
        let force = match command {
            Push::Left => -c.push_force,
            Push::Right => c.push_force,
        };

        let State {
            x,
            x_dot,
            theta,
            theta_dot,
        } = self.state;
        let (sin_theta, cos_theta) = theta.sin_cos();

        let temp = (force + c.pole_moment() * theta_dot * theta_dot * sin_theta) / c.total_mass();
        let theta_acc = (c.gravity * sin_theta - cos_theta * temp)
            / (c.half_pole_length
                * (4.0 / 3.0 - c.pole_mass * cos_theta * cos_theta / c.total_mass()));
        let x_acc = temp - c.pole_moment() * theta_acc * cos_theta / c.total_mass();

        let dt = c.time_step;
        self.state = State {
            x: x + dt * x_dot,
            x_dot: x_dot + dt * x_acc,
            theta: theta + dt * theta_dot,
            theta_dot: theta_dot + dt * theta_acc,
        };

        self.terminated = self.out_of_bounds();
        if self.terminated {
            debug!(x = self.state.x, theta = self.state.theta, "pole fell");
        }

        1.0
    }

    fn is_alive(&self) -> bool {
        !self.terminated
    }
}

impl TransparentSystem for CartPole {
    fn state(&self) -> State {
        self.state
    }
}

/// Draws uniformly from `[-range, range]`.
fn symmetric<R: Rng + ?Sized>(rng: &mut R, range: f64) -> f64 {
    (rng.random::<f64>() * 2.0 - 1.0) * range
}
