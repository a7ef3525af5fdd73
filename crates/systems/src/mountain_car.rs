//! An under-powered car that must rock itself out of a valley.
//!
//! The engine alone cannot climb the right slope, so the car has to build
//! momentum by driving back and forth.
//! Every step costs a reward of `-1.0` until the car reaches the goal, which
//! ends the episode.

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use skein_core::{System, TransparentSystem};
use thiserror::Error;
use tracing::debug;

/// Track bounds, goal, and dynamics of a [`MountainCar`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub min_position: f64,
    pub max_position: f64,
    pub max_speed: f64,
    pub goal_position: f64,
    pub goal_velocity: f64,
    pub start_position: (f64, f64),
    pub start_velocity: (f64, f64),
    pub force: f64,
    pub gravity: f64,
}

/// Errors that can occur when validating a mountain car config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("min_position must be below max_position")]
    Track,

    #[error("goal_position must lie on the track")]
    Goal,

    #[error("max_speed must be finite and strictly positive")]
    MaxSpeed,

    #[error("start ranges must be ordered and lie within the track and speed limits")]
    Start,

    #[error("force and gravity must be finite and non-negative")]
    Dynamics,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_position: -1.2,
            max_position: 0.6,
            max_speed: 0.07,
            goal_position: 0.5,
            goal_velocity: 0.0,
            start_position: (-0.6, -0.4),
            start_velocity: (0.0, 0.0),
            force: 0.001,
            gravity: 0.0025,
        }
    }
}

impl Config {
    /// Checks that the track, goal, and start ranges are consistent.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_position.is_finite()
            && self.max_position.is_finite()
            && self.min_position < self.max_position)
        {
            return Err(ConfigError::Track);
        }
        if !(self.min_position..=self.max_position).contains(&self.goal_position) {
            return Err(ConfigError::Goal);
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(ConfigError::MaxSpeed);
        }

        let (p_lo, p_hi) = self.start_position;
        let (v_lo, v_hi) = self.start_velocity;
        let positions = self.min_position..=self.max_position;
        let speeds = -self.max_speed..=self.max_speed;
        if !(p_lo <= p_hi && positions.contains(&p_lo) && positions.contains(&p_hi))
            || !(v_lo <= v_hi && speeds.contains(&v_lo) && speeds.contains(&v_hi))
        {
            return Err(ConfigError::Start);
        }

        if !(self.force.is_finite() && self.force >= 0.0)
            || !(self.gravity.is_finite() && self.gravity >= 0.0)
        {
            return Err(ConfigError::Dynamics);
        }

        Ok(())
    }
}

/// Position and velocity of the car.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct State {
    pub position: f64,
    pub velocity: f64,
}

/// What the engine does during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Throttle {
    Reverse,
    Coast,
    Forward,
}

impl Distribution<Throttle> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Throttle {
        match rng.random_range(0..3) {
            0 => Throttle::Reverse,
            1 => Throttle::Coast,
            _ => Throttle::Forward,
        }
    }
}

/// A mountain car simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct MountainCar {
    config: Config,
    state: State,
}

impl MountainCar {
    /// Creates a car at rest in the middle of the configured start range.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let (p_lo, p_hi) = config.start_position;
        let (v_lo, v_hi) = config.start_velocity;

        Ok(Self {
            config,
            state: State {
                position: 0.5 * (p_lo + p_hi),
                velocity: 0.5 * (v_lo + v_hi),
            },
        })
    }

    /// Draws a random starting state from the configured start ranges.
    pub fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> State {
        let (p_lo, p_hi) = self.config.start_position;
        let (v_lo, v_hi) = self.config.start_velocity;

        State {
            position: rng.random_range(p_lo..=p_hi),
            velocity: rng.random_range(v_lo..=v_hi),
        }
    }

    fn at_goal(&self) -> bool {
        self.state.position >= self.config.goal_position
            && self.state.velocity >= self.config.goal_velocity
    }
}

impl Default for MountainCar {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(Config::default()).unwrap()
    }
}

impl System for MountainCar {
    type State = State;
    type Observation = State;
    type Command = Throttle;
    type Report = f64;

    fn assign(&mut self, state: State) {
        self.state = state;
    }

    fn observe(&self) -> State {
        self.state
    }

    fn step(&mut self, command: Throttle) -> f64 {
        if self.at_goal() {
            return 0.0;
        }

        let c = &self.config;
        let push = match command {
            Throttle::Reverse => -c.force,
            Throttle::Coast => 0.0,
            Throttle::Forward => c.force,
        };

        let State { position, velocity } = self.state;
        let velocity =
            (velocity + push - c.gravity * (3.0 * position).cos()).clamp(-c.max_speed, c.max_speed);
        let position = (position + velocity).clamp(c.min_position, c.max_position);

        // The left wall is inelastic.
        let velocity = if position <= c.min_position && velocity < 0.0 {
            0.0
        } else {
            velocity
        };

        self.state = State { position, velocity };
        if self.at_goal() {
            debug!(position, velocity, "car reached the goal");
        }

        -1.0
    }

    fn is_alive(&self) -> bool {
        !self.at_goal()
    }
}

impl TransparentSystem for MountainCar {
    fn state(&self) -> State {
        self.state
    }
}
