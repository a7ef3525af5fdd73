//! A rocket flying straight up and down inside a hangar.
//!
//! The rocket is subject to gravity and to a drag force proportional to its
//! speed. A command fires the engine with a constant thrust for some
//! duration, and the motion over that interval is integrated exactly.
//! The episode ends when the rocket hits the floor or the ceiling.
//!
//! The rocket is transparent: its observation is its state.

use rand::Rng;
use skein_core::{System, TransparentSystem};
use thiserror::Error;
use tracing::debug;
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Force, Length, Mass, MassRate, Time, Velocity},
    force::newton,
    length::meter,
    mass::kilogram,
    mass_rate::kilogram_per_second,
    time::second,
    velocity::meter_per_second,
};

/// Physical parameters of a [`Rocket`] and its hangar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub ceiling: Length,
    pub mass: Mass,
    /// Drag force per unit of speed.
    pub drag: MassRate,
    pub gravity: Acceleration,
}

/// Errors that can occur when validating a rocket config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ceiling must be finite and above the floor")]
    Ceiling,

    #[error("mass must be finite and strictly positive")]
    Mass,

    #[error("drag must be finite and non-negative")]
    Drag,

    #[error("gravity must be finite and non-negative")]
    Gravity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ceiling: Length::new::<meter>(1000.0),
            mass: Mass::new::<kilogram>(1.0),
            drag: MassRate::new::<kilogram_per_second>(1.0),
            gravity: Acceleration::new::<meter_per_second_squared>(9.81),
        }
    }
}

impl Config {
    /// Checks that the hangar and the rocket are physically meaningful.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ceiling = self.ceiling.get::<meter>();
        if !ceiling.is_finite() || ceiling <= 0.0 {
            return Err(ConfigError::Ceiling);
        }

        let mass = self.mass.get::<kilogram>();
        if !mass.is_finite() || mass <= 0.0 {
            return Err(ConfigError::Mass);
        }

        let drag = self.drag.get::<kilogram_per_second>();
        if !drag.is_finite() || drag < 0.0 {
            return Err(ConfigError::Drag);
        }

        let gravity = self.gravity.get::<meter_per_second_squared>();
        if !gravity.is_finite() || gravity < 0.0 {
            return Err(ConfigError::Gravity);
        }

        Ok(())
    }

    /// The thrust that exactly balances gravity.
    #[must_use]
    pub fn hover_thrust(&self) -> Force {
        self.mass * self.gravity
    }
}

/// Height above the floor and vertical speed, positive upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub height: Length,
    pub speed: Velocity,
}

impl State {
    /// A rocket at rest at the given height.
    #[must_use]
    pub fn at_rest(height: Length) -> Self {
        Self {
            height,
            speed: Velocity::new::<meter_per_second>(0.0),
        }
    }
}

/// Fires the engine with a constant upward force for a while.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thrust {
    pub force: Force,
    pub duration: Time,
}

impl Thrust {
    /// The duration used by [`Rocket::random_command`].
    pub const DEFAULT_DURATION: f64 = 0.1;
}

/// A rocket simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Rocket {
    config: Config,
    state: State,
}

impl Rocket {
    /// Creates a rocket at rest halfway up the hangar.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            state: State::at_rest(config.ceiling / 2.0),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Draws a random height in the hangar, at rest.
    pub fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> State {
        let ceiling = self.config.ceiling.get::<meter>();
        State::at_rest(Length::new::<meter>(rng.random_range(0.0..=ceiling)))
    }

    /// Draws a thrust between zero and twice the hover thrust.
    pub fn random_command<R: Rng + ?Sized>(&self, rng: &mut R) -> Thrust {
        let max = 2.0 * self.config.hover_thrust().get::<newton>();

        Thrust {
            force: Force::new::<newton>(rng.random_range(0.0..=max)),
            duration: Time::new::<second>(Thrust::DEFAULT_DURATION),
        }
    }

    fn inside(&self) -> bool {
        let height = self.state.height.get::<meter>();
        (0.0..=self.config.ceiling.get::<meter>()).contains(&height)
    }
}

impl Default for Rocket {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(Config::default()).unwrap()
    }
}

impl System for Rocket {
    type State = State;
    type Observation = State;
    type Command = Thrust;
    type Report = ();

    fn assign(&mut self, state: State) {
        self.state = state;
    }

    fn observe(&self) -> State {
        self.state
    }

    fn step(&mut self, thrust: Thrust) {
        if !self.inside() {
            return;
        }

        let m = self.config.mass.get::<kilogram>();
        let k = self.config.drag.get::<kilogram_per_second>();
        let g = self.config.gravity.get::<meter_per_second_squared>();
        let force = thrust.force.get::<newton>();
        let t = thrust.duration.get::<second>();
        let v0 = self.state.speed.get::<meter_per_second>();

        let (rise, v) = if k > 0.0 {
            let tau = m / k;
            let terminal = (force - m * g) / k;
            let decay = (-t / tau).exp();
            (
                terminal * t + (v0 - terminal) * tau * (1.0 - decay),
                terminal + (v0 - terminal) * decay,
            )
        } else {
            let a = force / m - g;
            (v0 * t + 0.5 * a * t * t, v0 + a * t)
        };

        self.state = State {
            height: self.state.height + Length::new::<meter>(rise),
            speed: Velocity::new::<meter_per_second>(v),
        };

        if !self.inside() {
            debug!(
                height = self.state.height.get::<meter>(),
                speed = v,
                "rocket crashed"
            );
        }
    }

    fn is_alive(&self) -> bool {
        self.inside()
    }
}

impl TransparentSystem for Rocket {
    fn state(&self) -> State {
        self.state
    }
}
