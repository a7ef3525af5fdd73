//! A walker on a rectangular grid looking for a goal cell.
//!
//! Cells are numbered row by row from the north-west corner, so cell `i` sits
//! in column `i % width` and row `i / width`.
//! Moving into the edge of the grid leaves the walker in place and costs
//! `-1.0`, reaching the goal earns `1.0` and ends the episode, and every other
//! move is free.

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use skein_core::{System, TransparentSystem};
use thiserror::Error;
use tracing::debug;

/// A compass direction to move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    South,
    West,
    East,
}

impl Heading {
    /// All headings, in declaration order.
    pub const ALL: [Heading; 4] = [Self::North, Self::South, Self::West, Self::East];
}

impl Distribution<Heading> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Heading {
        Heading::ALL[rng.random_range(0..4)]
    }
}

/// Errors that can occur when building a grid world.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must be at least one cell wide and tall, got {width}x{height}")]
    Empty { width: usize, height: usize },

    #[error("a {width}x{height} grid has more cells than can be numbered")]
    TooLarge { width: usize, height: usize },

    #[error("goal cell {goal} is outside a grid of {cells} cells")]
    GoalOutside { goal: usize, cells: usize },
}

/// A grid world simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    width: usize,
    height: usize,
    cells: usize,
    goal: usize,
    cell: usize,
}

impl GridWorld {
    /// Creates a grid with the walker in cell zero.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if the grid has no cells, too many cells to
    /// number, or the goal is not one of them.
    pub fn new(width: usize, height: usize, goal: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }

        let cells = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;
        if goal >= cells {
            return Err(GridError::GoalOutside { goal, cells });
        }

        Ok(Self {
            width,
            height,
            cells,
            goal,
            cell: 0,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn goal(&self) -> usize {
        self.goal
    }

    /// Returns the `(column, row)` of a cell.
    #[must_use]
    pub fn coordinates(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    /// Draws a random cell other than the goal, or the goal if it is the only
    /// cell.
    pub fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if self.cells == 1 {
            return self.goal;
        }

        let cell = rng.random_range(0..self.cells - 1);
        if cell >= self.goal { cell + 1 } else { cell }
    }

    /// The cell one move away, or `None` if the move would leave the grid.
    fn neighbor(&self, heading: Heading) -> Option<usize> {
        let (column, row) = self.coordinates(self.cell);

        let (column, row) = match heading {
            Heading::North => (column, row.checked_sub(1)?),
            Heading::South => (column, Some(row + 1).filter(|&r| r < self.height)?),
            Heading::West => (column.checked_sub(1)?, row),
            Heading::East => (Some(column + 1).filter(|&c| c < self.width)?, row),
        };

        Some(row * self.width + column)
    }
}

impl System for GridWorld {
    type State = usize;
    type Observation = usize;
    type Command = Heading;
    type Report = f64;

    /// Places the walker.
    ///
    /// Cells beyond the grid are clamped to the last cell.
    fn assign(&mut self, cell: usize) {
        self.cell = cell.min(self.cells - 1);
    }

    fn observe(&self) -> usize {
        self.cell
    }

    fn step(&mut self, heading: Heading) -> f64 {
        if !self.is_alive() {
            return 0.0;
        }

        let Some(next) = self.neighbor(heading) else {
            return -1.0;
        };

        self.cell = next;
        if next == self.goal {
            debug!(cell = next, "walker reached the goal");
            1.0
        } else {
            0.0
        }
    }

    fn is_alive(&self) -> bool {
        self.cell != self.goal
    }
}

impl TransparentSystem for GridWorld {
    fn state(&self) -> usize {
        self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use skein_core::{OrbitExt, TransitionsExt};

    #[test]
    fn walks_along_the_edge_to_the_goal() {
        // 3x2 grid, goal in the south-east corner.
        let mut grid = GridWorld::new(3, 2, 5).unwrap();

        let transitions: Vec<_> = [Heading::North, Heading::East, Heading::East, Heading::South]
            .into_iter()
            .orbit(&mut grid)
            .transitions()
            .collect();

        let cells: Vec<_> = transitions.iter().map(|t| t.next_observation).collect();
        let rewards: Vec<_> = transitions.iter().map(|t| t.report).collect();
        assert_eq!(cells, vec![0, 1, 2, 5]);
        assert_eq!(rewards, vec![-1.0, 0.0, 0.0, 1.0]);
        assert!(transitions[3].is_terminal());
    }

    #[test]
    fn commands_after_the_goal_are_never_applied() {
        let mut grid = GridWorld::new(2, 1, 1).unwrap();

        let points: Vec<_> = std::iter::repeat(Heading::East)
            .orbit(&mut grid)
            .take(10)
            .collect();

        assert_eq!(points.len(), 2);
        assert_eq!(points[1].observation, 1);
        assert_eq!(points[1].next_command, None);
    }

    #[test]
    fn every_edge_is_a_wall() {
        let single = GridWorld::new(1, 1, 0).unwrap();
        assert!(!single.is_alive());

        let mut grid = GridWorld::new(3, 3, 8).unwrap();
        for heading in Heading::ALL {
            grid.assign(4);
            assert_eq!(grid.step(heading), 0.0);
            assert_ne!(grid.state(), 4);
        }

        for (corner, blocked) in [
            (0, [Heading::North, Heading::West]),
            (2, [Heading::North, Heading::East]),
            (6, [Heading::South, Heading::West]),
        ] {
            for heading in blocked {
                grid.assign(corner);
                assert_eq!(grid.step(heading), -1.0);
                assert_eq!(grid.state(), corner);
            }
        }
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        assert_eq!(
            GridWorld::new(0, 4, 0),
            Err(GridError::Empty {
                width: 0,
                height: 4
            })
        );
        assert_eq!(
            GridWorld::new(2, 2, 4),
            Err(GridError::GoalOutside { goal: 4, cells: 4 })
        );
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert_eq!(
            GridWorld::new(usize::MAX, 2, 0),
            Err(GridError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );
    }

    #[test]
    fn out_of_range_cells_are_clamped() {
        let mut grid = GridWorld::new(3, 2, 0).unwrap();
        grid.assign(100);
        assert_eq!(grid.state(), 5);
    }

    #[test]
    fn random_states_avoid_the_goal() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let grid = GridWorld::new(4, 3, 6).unwrap();

        for _ in 0..200 {
            let cell = grid.random_state(&mut rng);
            assert!(cell < 12);
            assert_ne!(cell, 6);
        }
    }

    proptest! {
        #[test]
        fn walker_never_leaves_the_grid(
            start in 0_usize..20,
            moves in prop::collection::vec(0_usize..4, 0..40),
        ) {
            let mut grid = GridWorld::new(5, 4, 19).unwrap();
            grid.assign(start);

            for heading in moves.into_iter().map(|i| Heading::ALL[i]) {
                let was_alive = grid.is_alive();
                grid.step(heading);
                prop_assert!(grid.state() < 20);
                prop_assert!(was_alive || !grid.is_alive());
            }
        }
    }
}
