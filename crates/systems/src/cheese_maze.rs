//! A small, partially observable maze with a piece of cheese in it.
//!
//! The maze has eleven cells laid out as a corridor with three dead ends
//! hanging below it:
//!
//! ```text
//!  C1  C2  C3  C4  C5
//!  C6      C7      C8
//!  C9     C10     C11
//! ```
//!
//! The cheese sits in `C10`. A mouse only sees the walls around its cell,
//! so several cells look alike: the observation is a [`Walls`] pattern and
//! the true [`Cell`] is only available through [`TransparentSystem::state`].
//!
//! Moves are slippery. With probability `mishap`, the mouse moves in a
//! random direction instead of the requested one.
//! Reaching the cheese earns `5.0` and ends the episode, bumping into a wall
//! costs `-1.0`, and every other move is free.

use std::fmt;

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use skein_core::{System, TransparentSystem};
use thiserror::Error;
use tracing::{debug, trace};

/// Reward for reaching the cheese.
pub const CHEESE_REWARD: f64 = 5.0;

/// Reward for bumping into a wall.
pub const BUMP_REWARD: f64 = -1.0;

/// A cell of the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cell {
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7,
    C8,
    C9,
    C10,
    C11,
}

impl Cell {
    /// All cells, in numbering order.
    pub const ALL: [Cell; 11] = [
        Cell::C1,
        Cell::C2,
        Cell::C3,
        Cell::C4,
        Cell::C5,
        Cell::C6,
        Cell::C7,
        Cell::C8,
        Cell::C9,
        Cell::C10,
        Cell::C11,
    ];

    /// The cell holding the cheese.
    pub const CHEESE: Cell = Cell::C10;

    /// The cell reached by moving in `direction`, ignoring mishaps.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Cell {
        use Cell::*;

        // Left, Right, Up, Down
        let row = match self {
            C1 => [C1, C2, C1, C6],
            C2 => [C1, C3, C2, C2],
            C3 => [C2, C4, C3, C7],
            C4 => [C3, C5, C4, C4],
            C5 => [C4, C5, C5, C8],
            C6 => [C6, C6, C1, C9],
            C7 => [C7, C7, C3, C10],
            C8 => [C8, C8, C5, C11],
            C9 => [C9, C9, C6, C9],
            C10 => [C10, C10, C7, C10],
            C11 => [C11, C11, C8, C11],
        };

        row[direction as usize]
    }

    /// The walls a mouse sees from this cell.
    #[must_use]
    pub fn walls(self) -> Walls {
        use Cell::*;

        match self {
            C1 => Walls::LeftUp,
            C2 | C4 => Walls::BottomUp,
            C3 => Walls::Up,
            C5 => Walls::UpRight,
            C6 | C7 | C8 => Walls::LeftRight,
            C9 | C10 | C11 => Walls::BottomLeftRight,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", *self as usize + 1)
    }
}

impl Distribution<Cell> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::ALL[rng.random_range(0..Cell::ALL.len())]
    }
}

/// A direction the mouse tries to move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

impl Distribution<Direction> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.random_range(0..4)]
    }
}

/// The local wall pattern around a cell.
///
/// Displayed as four characters for the bottom, left, up and right sides,
/// with a letter where there is a wall and a dot where there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Walls {
    LeftUp,
    BottomUp,
    Up,
    UpRight,
    LeftRight,
    BottomLeftRight,
}

impl fmt::Display for Walls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Walls::LeftUp => ".LU.",
            Walls::BottomUp => "B.U.",
            Walls::Up => "..U.",
            Walls::UpRight => "..UR",
            Walls::LeftRight => ".L.R",
            Walls::BottomLeftRight => "BL.R",
        })
    }
}

/// Configuration of a [`CheeseMaze`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Probability that a move goes in a random direction.
    pub mishap: f64,
}

/// Errors that can occur when validating a cheese maze config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("mishap probability must be in [0, 1], got {0}")]
    Mishap(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self { mishap: 0.1 }
    }
}

impl Config {
    /// Checks that the mishap probability is a probability.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Mishap`] if it is not in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&self.mishap) {
            Ok(())
        } else {
            Err(ConfigError::Mishap(self.mishap))
        }
    }
}

/// The cheese maze simulator.
///
/// The maze owns the random number generator used for mishaps, so seeding
/// it makes episodes reproducible.
#[derive(Debug, Clone)]
pub struct CheeseMaze<R> {
    config: Config,
    rng: R,
    cell: Cell,
}

impl<R: Rng> CheeseMaze<R> {
    /// Creates a maze with the mouse in `C1`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: Config, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            rng,
            cell: Cell::C1,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consumes the maze, returning its random number generator.
    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<R: Rng> System for CheeseMaze<R> {
    type State = Cell;
    type Observation = Walls;
    type Command = Direction;
    type Report = f64;

    fn assign(&mut self, cell: Cell) {
        self.cell = cell;
    }

    fn observe(&self) -> Walls {
        self.cell.walls()
    }

    fn step(&mut self, direction: Direction) -> f64 {
        if !self.is_alive() {
            return 0.0;
        }

        let direction = if self.rng.random::<f64>() < self.config.mishap {
            let slipped: Direction = self.rng.random();
            trace!(?direction, ?slipped, "mishap");
            slipped
        } else {
            direction
        };

        let from = self.cell;
        self.cell = from.neighbor(direction);

        if self.cell == Cell::CHEESE {
            debug!(%from, "mouse found the cheese");
            CHEESE_REWARD
        } else if self.cell == from {
            BUMP_REWARD
        } else {
            0.0
        }
    }

    fn is_alive(&self) -> bool {
        self.cell != Cell::CHEESE
    }
}

impl<R: Rng> TransparentSystem for CheeseMaze<R> {
    fn state(&self) -> Cell {
        self.cell
    }
}
