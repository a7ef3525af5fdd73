use std::{iter::FusedIterator, mem};

use tracing::{debug, trace};

use crate::{CommandSource, System};

/// One point along the trajectory of a driven system.
///
/// A point records what the driver saw, what it is about to do, and what the
/// transition that led here reported:
///
/// - `previous_report` is `None` only for the first point of an orbit.
/// - `next_command` is `None` only for the last point of an orbit, which is
///   reached when the system becomes terminal or the command source runs dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrbitPoint<O, C, R> {
    /// The observation of the system at this point.
    pub observation: O,

    /// The command that will be applied to leave this point, if any.
    pub next_command: Option<C>,

    /// The report of the transition that led to this point, if any.
    pub previous_report: Option<R>,
}

impl<O, C, R> OrbitPoint<O, C, R> {
    /// Returns `true` if no transition led to this point.
    pub fn is_first(&self) -> bool {
        self.previous_report.is_none()
    }

    /// Returns `true` if no command will be applied from this point.
    pub fn is_last(&self) -> bool {
        self.next_command.is_none()
    }
}

/// The [`OrbitPoint`] type produced when driving a system `S`.
pub type PointOf<S> =
    OrbitPoint<<S as System>::Observation, <S as System>::Command, <S as System>::Report>;

/// A lazy trajectory of a system driven by a command source.
///
/// An `Orbit` is an iterator over [`OrbitPoint`]s.
/// It wraps a system, usually as a `&mut` borrow, and a [`CommandSource`].
/// Nothing happens until the first point is requested:
///
/// 1. The first call to [`next`] observes the system without stepping it, and
///    pulls the first command.
/// 2. Each later call applies the pending command with one [`System::step`],
///    observes the result, then pulls the next command. The step always
///    happens before the pull, so a controller sees the post-transition
///    observation.
/// 3. A pulled command is discarded if the system is now terminal.
///    The point carrying no command is the last one; after it the orbit is
///    exhausted.
///
/// A system that becomes terminal after `k` steps therefore yields `k + 1`
/// points, the last one reporting the final observation.
/// At least one point is always produced, even for a system that is terminal
/// from the start.
///
/// Dropping the orbit, or simply not asking for more points, stops the
/// traversal; nothing is computed ahead of demand.
///
/// # Example
///
/// ```
/// use skein_core::{OrbitExt, System, pulse};
///
/// /// Walks towards a wall at position 3.
/// struct Walker(u32);
///
/// impl System for Walker {
///     type State = u32;
///     type Observation = u32;
///     type Command = u32;
///     type Report = ();
///
///     fn assign(&mut self, state: u32) { self.0 = state; }
///     fn observe(&self) -> u32 { self.0 }
///     fn step(&mut self, stride: u32) {
///         if self.is_alive() {
///             self.0 = (self.0 + stride).min(3);
///         }
///     }
///     fn is_alive(&self) -> bool { self.0 < 3 }
/// }
///
/// let mut walker = Walker(0);
/// let positions: Vec<_> = pulse(|| 1)
///     .orbit(&mut walker)
///     .map(|point| point.observation)
///     .collect();
///
/// assert_eq!(positions, vec![0, 1, 2, 3]);
/// assert!(!walker.is_alive());
/// ```
///
/// [`next`]: Iterator::next
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Orbit<S, Src>
where
    S: System,
{
    system: S,
    source: Src,
    cursor: Cursor<S::Command>,
    steps: usize,
}

/// Where an [`Orbit`] stands between two calls to `next`.
enum Cursor<C> {
    /// No point has been produced yet.
    Start,
    /// The last point produced carries this command.
    Pending(C),
    /// The last point has been produced.
    Finished,
}

impl<S, Src> Orbit<S, Src>
where
    S: System,
    Src: CommandSource<S>,
{
    /// Creates an orbit driving `system` with commands from `source`.
    ///
    /// The system is neither observed nor stepped until the first point is
    /// requested.
    pub fn new(system: S, source: Src) -> Self {
        Self {
            system,
            source,
            cursor: Cursor::Start,
            steps: 0,
        }
    }

    /// Returns a reference to the driven system.
    pub fn system(&self) -> &S {
        &self.system
    }

    /// Returns the number of transitions applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns `true` once the last point has been produced.
    pub fn is_finished(&self) -> bool {
        matches!(self.cursor, Cursor::Finished)
    }

    /// Consumes the orbit, returning the driven system.
    pub fn into_inner(self) -> S {
        self.system
    }

    /// Consumes the orbit, returning the driven system and the command source.
    pub fn into_parts(self) -> (S, Src) {
        (self.system, self.source)
    }

    /// Pulls one command, discarding it if the system is terminal.
    fn pull(&mut self) -> Option<S::Command> {
        let command = self.source.pull(&self.system);

        if !self.system.is_alive() {
            trace!(steps = self.steps, "system is terminal, no further command");
            return None;
        }
        if command.is_none() {
            trace!(steps = self.steps, "command source is exhausted");
        }

        command
    }

    /// Builds the point at the current configuration and moves the cursor.
    fn emit(&mut self, previous_report: Option<S::Report>) -> PointOf<S>
    where
        S::Command: Clone,
    {
        let observation = self.system.observe();
        let next_command = self.pull();

        self.cursor = match &next_command {
            Some(command) => Cursor::Pending(command.clone()),
            None => {
                debug!(steps = self.steps, "orbit reached its final point");
                Cursor::Finished
            }
        };

        OrbitPoint {
            observation,
            next_command,
            previous_report,
        }
    }
}

impl<S, Src> Iterator for Orbit<S, Src>
where
    S: System,
    S::Command: Clone,
    Src: CommandSource<S>,
{
    type Item = PointOf<S>;

    fn next(&mut self) -> Option<Self::Item> {
        match mem::replace(&mut self.cursor, Cursor::Finished) {
            Cursor::Start => Some(self.emit(None)),
            Cursor::Pending(command) => {
                let report = self.system.step(command);
                self.steps += 1;
                trace!(steps = self.steps, "applied command");

                Some(self.emit(Some(report)))
            }
            Cursor::Finished => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Cursor::Finished => (0, Some(0)),
            Cursor::Start | Cursor::Pending(_) => (1, None),
        }
    }
}

/// Marks that iteration always ends after the first `None`.
impl<S, Src> FusedIterator for Orbit<S, Src>
where
    S: System,
    S::Command: Clone,
    Src: CommandSource<S>,
{
}

/// Extension methods turning any [`CommandSource`] into an [`Orbit`].
///
/// This allows pipelines to read left to right:
///
/// ```ignore
/// pulse(|| random_command(&mut rng))
///     .orbit(&mut system)
///     .take(20)
///     .transitions()
/// ```
pub trait OrbitExt<S>: CommandSource<S> + Sized
where
    S: System,
{
    /// Drives `system` with the commands from this source.
    fn orbit(self, system: S) -> Orbit<S, Self> {
        Orbit::new(system, self)
    }
}

impl<S, Src> OrbitExt<S> for Src
where
    S: System,
    Src: CommandSource<S>,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use proptest::prelude::*;

    use crate::{
        TransparentSystem, controller, pulse,
        test_utils::{Countdown, Hallway, Room},
    };

    #[test]
    fn hallway_scenario() {
        let mut hallway = Hallway::default();

        let points: Vec<_> = vec!["advance"].into_iter().orbit(&mut hallway).collect();

        assert_eq!(
            points,
            vec![
                OrbitPoint {
                    observation: Room::A,
                    next_command: Some("advance"),
                    previous_report: None,
                },
                OrbitPoint {
                    observation: Room::B,
                    next_command: None,
                    previous_report: Some("A -> B"),
                },
            ]
        );
        assert!(points[0].is_first());
        assert!(points[1].is_last());
    }

    #[test]
    fn terminal_after_k_steps_yields_k_plus_one_points() {
        let mut countdown = Countdown::new(4);

        let points: Vec<_> = pulse(|| 1).orbit(&mut countdown).collect();

        assert_eq!(points.len(), 5);
        let observations: Vec<_> = points.iter().map(|p| p.observation).collect();
        assert_eq!(observations, vec![4, 3, 2, 1, 0]);
        assert!(points[..4].iter().all(|p| p.next_command == Some(1)));
        assert!(points[1..].iter().all(|p| p.previous_report == Some(1)));
        assert!(points[4].is_last());
    }

    #[test]
    fn exhausted_source_ends_the_orbit() {
        let mut countdown = Countdown::new(100);

        let points: Vec<_> = vec![5, 10].into_iter().orbit(&mut countdown).collect();

        assert_eq!(points.len(), 3);
        assert_eq!(points[2].observation, 85);
        assert_eq!(points[2].next_command, None);
        assert_eq!(points[2].previous_report, Some(10));
        assert!(countdown.is_alive());
    }

    #[test]
    fn terminal_system_with_empty_source_yields_one_point() {
        let mut countdown = Countdown::new(0);

        let points: Vec<_> = std::iter::empty::<u32>().orbit(&mut countdown).collect();

        assert_eq!(
            points,
            vec![OrbitPoint {
                observation: 0,
                next_command: None,
                previous_report: None,
            }]
        );
    }

    #[test]
    fn initially_terminal_system_gets_no_command() {
        let mut hallway = Hallway::default();
        hallway.assign(Room::B);

        let mut orbit = pulse(|| "advance").orbit(&mut hallway);

        let first = orbit.next().expect("an orbit always has a first point");
        assert_eq!(first.observation, Room::B);
        assert_eq!(first.next_command, None);
        assert!(orbit.is_finished());
        assert_eq!(orbit.next(), None);
        assert_eq!(orbit.next(), None);
    }

    #[test]
    fn nothing_happens_before_demand() {
        let pulls = RefCell::new(0);
        let mut countdown = Countdown::new(3);

        {
            let orbit = pulse(|| {
                *pulls.borrow_mut() += 1;
                1
            })
            .orbit(&mut countdown);
            assert_eq!(orbit.steps(), 0);
        }

        assert_eq!(*pulls.borrow(), 0);
        assert_eq!(countdown.observe(), 3);
    }

    #[test]
    fn each_advance_steps_once_and_pulls_once() {
        let pulls = RefCell::new(0);
        let mut countdown = Countdown::new(10);

        let mut orbit = pulse(|| {
            *pulls.borrow_mut() += 1;
            2
        })
        .orbit(&mut countdown);

        orbit.next();
        assert_eq!((orbit.steps(), *pulls.borrow()), (0, 1));
        orbit.next();
        assert_eq!((orbit.steps(), *pulls.borrow()), (1, 2));
        orbit.next();
        assert_eq!((orbit.steps(), *pulls.borrow()), (2, 3));
        assert_eq!(orbit.system().observe(), 6);
    }

    #[test]
    fn truncation_leaves_system_mid_orbit() {
        let mut countdown = Countdown::new(50);

        let taken = pulse(|| 3).orbit(&mut countdown).take(4).count();

        assert_eq!(taken, 4);
        assert_eq!(countdown.state(), 41);
    }

    #[test]
    fn controller_sees_post_transition_observation() {
        let mut countdown = Countdown::new(20);
        let seen = RefCell::new(Vec::new());

        let points: Vec<_> = controller(|remaining: &u32| {
            seen.borrow_mut().push(*remaining);
            remaining / 2 + 1
        })
        .orbit(&mut countdown)
        .collect();

        // Each command is half the observation at the same point, plus one.
        for point in &points {
            if let Some(command) = point.next_command {
                assert_eq!(command, point.observation / 2 + 1);
            }
        }
        let observations: Vec<_> = points.iter().map(|p| p.observation).collect();
        assert_eq!(observations, vec![20, 9, 4, 1, 0]);
        assert_eq!(*seen.borrow(), vec![20, 9, 4, 1, 0]);
    }

    #[test]
    fn owned_system_is_returned() {
        let mut orbit = Orbit::new(Countdown::new(2), pulse(|| 1));
        while orbit.next().is_some() {}

        assert_eq!(orbit.steps(), 2);
        assert_eq!(orbit.into_inner(), Countdown::new(0));
    }

    proptest! {
        #[test]
        fn orbit_length_bound(start in 0_u32..200) {
            let mut countdown = Countdown::new(start);
            let count = pulse(|| 1).orbit(&mut countdown).count();
            prop_assert_eq!(count, start as usize + 1);
        }

        #[test]
        fn commands_are_applied_in_source_order(commands in prop::collection::vec(0_u32..3, 0..30)) {
            let mut countdown = Countdown::new(1_000);

            let applied: Vec<_> = commands
                .clone()
                .into_iter()
                .orbit(&mut countdown)
                .filter_map(|point| point.next_command)
                .collect();

            prop_assert_eq!(applied, commands);
        }
    }
}
