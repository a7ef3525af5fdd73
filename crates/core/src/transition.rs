use std::{iter::FusedIterator, mem};

use tracing::debug;

use crate::{OrbitPoint, System};

/// Two consecutive orbit points reified as a single record.
///
/// A transition captures the observation, the command applied from it, the
/// report of that step, and where the system ended up, together with the
/// command that will be applied next.
/// A transition whose `next_command` is `None` is terminal: it ends its
/// episode, either because the system became terminal or because the command
/// source ran dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition<O, C, R> {
    pub observation: O,
    pub command: C,
    pub report: R,
    pub next_observation: O,
    pub next_command: Option<C>,
}

impl<O, C, R> Transition<O, C, R> {
    /// Returns `true` if this transition ends its episode.
    ///
    /// Useful for filtering end-of-episode records out of a dataset:
    ///
    /// ```ignore
    /// dataset.iter().filter(|t| !t.is_terminal())
    /// ```
    pub fn is_terminal(&self) -> bool {
        self.next_command.is_none()
    }
}

/// The [`Transition`] type produced when driving a system `S`.
pub type TransitionOf<S> =
    Transition<<S as System>::Observation, <S as System>::Command, <S as System>::Report>;

/// An iterator pairing consecutive orbit points into [`Transition`]s.
///
/// Created by [`TransitionsExt::transitions`].
/// It slides a window of two points along the underlying orbit: an orbit of
/// `n` points yields `n - 1` transitions, and an orbit of zero or one point
/// yields none.
///
/// Pairing requires the earlier point to carry a command and the later one to
/// carry the report of the step between them.
/// Points that break this (which a well-formed [`Orbit`] never produces) end
/// the iteration instead of producing a malformed record.
///
/// [`Orbit`]: crate::Orbit
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Transitions<I>
where
    I: Iterator,
{
    points: I,
    window: Window<I::Item>,
}

/// The state of the sliding window.
enum Window<P> {
    /// No point has been read yet.
    Empty,
    /// The latest point read, waiting for its successor.
    Holding(P),
    /// The underlying orbit is exhausted.
    Closed,
}

impl<I> Transitions<I>
where
    I: Iterator,
{
    /// Creates a transition iterator over the given orbit points.
    pub fn new(points: I) -> Self {
        Self {
            points,
            window: Window::Empty,
        }
    }

    /// Consumes the iterator, returning the underlying orbit.
    pub fn into_inner(self) -> I {
        self.points
    }
}

impl<I, O, C, R> Iterator for Transitions<I>
where
    I: Iterator<Item = OrbitPoint<O, C, R>>,
    O: Clone,
    C: Clone,
{
    type Item = Transition<O, C, R>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = match mem::replace(&mut self.window, Window::Closed) {
            Window::Empty => self.points.next()?,
            Window::Holding(point) => point,
            Window::Closed => return None,
        };
        let mut next = self.points.next()?;

        let Some(command) = current.next_command else {
            debug!("orbit continues past a point without a command, stopping");
            return None;
        };
        let Some(report) = next.previous_report.take() else {
            debug!("orbit point is missing the report of its transition, stopping");
            return None;
        };

        let transition = Transition {
            observation: current.observation,
            command,
            report,
            next_observation: next.observation.clone(),
            next_command: next.next_command.clone(),
        };
        self.window = Window::Holding(next);

        Some(transition)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.points.size_hint();
        match self.window {
            Window::Empty => (lower.saturating_sub(1), upper.map(|n| n.saturating_sub(1))),
            Window::Holding(_) => (lower, upper),
            Window::Closed => (0, Some(0)),
        }
    }
}

/// Marks that iteration always ends after the first `None`.
impl<I, O, C, R> FusedIterator for Transitions<I>
where
    I: Iterator<Item = OrbitPoint<O, C, R>>,
    O: Clone,
    C: Clone,
{
}

/// Extension methods pairing any iterator of orbit points into transitions.
pub trait TransitionsExt<O, C, R>: Iterator<Item = OrbitPoint<O, C, R>> + Sized {
    /// Pairs consecutive orbit points into [`Transition`]s.
    fn transitions(self) -> Transitions<Self> {
        Transitions::new(self)
    }
}

impl<I, O, C, R> TransitionsExt<O, C, R> for I where I: Iterator<Item = OrbitPoint<O, C, R>> {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        OrbitExt, pulse,
        test_utils::{Countdown, Hallway, Room},
    };

    fn point(
        observation: char,
        next_command: Option<u8>,
        previous_report: Option<i32>,
    ) -> OrbitPoint<char, u8, i32> {
        OrbitPoint {
            observation,
            next_command,
            previous_report,
        }
    }

    #[test]
    fn pairs_three_points_into_two_transitions() {
        let orbit = vec![
            point('a', Some(1), None),
            point('b', Some(2), Some(10)),
            point('c', None, Some(20)),
        ];

        let transitions: Vec<_> = orbit.into_iter().transitions().collect();

        assert_eq!(
            transitions,
            vec![
                Transition {
                    observation: 'a',
                    command: 1,
                    report: 10,
                    next_observation: 'b',
                    next_command: Some(2),
                },
                Transition {
                    observation: 'b',
                    command: 2,
                    report: 20,
                    next_observation: 'c',
                    next_command: None,
                },
            ]
        );
        assert!(!transitions[0].is_terminal());
        assert!(transitions[1].is_terminal());
    }

    #[test]
    fn short_orbits_yield_nothing() {
        let empty: Vec<OrbitPoint<char, u8, i32>> = Vec::new();
        assert_eq!(empty.into_iter().transitions().count(), 0);

        let single = vec![point('a', None, None)];
        assert_eq!(single.into_iter().transitions().count(), 0);
    }

    #[test]
    fn never_pairs_past_a_final_point() {
        let malformed = vec![
            point('a', Some(1), None),
            point('b', None, Some(10)),
            point('c', Some(3), Some(20)),
            point('d', None, Some(30)),
        ];

        let transitions: Vec<_> = malformed.into_iter().transitions().collect();

        assert_eq!(transitions.len(), 1);
        assert!(transitions[0].is_terminal());
    }

    #[test]
    fn hallway_scenario_yields_one_terminal_transition() {
        let mut hallway = Hallway::default();

        let transitions: Vec<_> = vec!["advance"]
            .into_iter()
            .orbit(&mut hallway)
            .transitions()
            .collect();

        assert_eq!(
            transitions,
            vec![Transition {
                observation: Room::A,
                command: "advance",
                report: "A -> B",
                next_observation: Room::B,
                next_command: None,
            }]
        );
        assert!(transitions[0].is_terminal());
    }

    #[test]
    fn truncated_orbit_ends_without_terminal_transition() {
        let mut countdown = Countdown::new(100);

        let transitions: Vec<_> = pulse(|| 1)
            .orbit(&mut countdown)
            .take(5)
            .transitions()
            .collect();

        assert_eq!(transitions.len(), 4);
        assert!(transitions.iter().all(|t| !t.is_terminal()));
        assert!(transitions.iter().all(|t| t.report == 1));
        assert_eq!(transitions[3].next_observation, 96);
    }

    #[test]
    fn consecutive_transitions_chain() {
        let mut countdown = Countdown::new(7);

        let transitions: Vec<_> = pulse(|| 2).orbit(&mut countdown).transitions().collect();

        assert_eq!(transitions.len(), 4);
        for pair in transitions.windows(2) {
            assert_eq!(pair[0].next_observation, pair[1].observation);
            assert_eq!(pair[0].next_command, Some(pair[1].command));
        }
        let last = transitions.last().expect("at least one transition");
        assert_eq!(last.report, 1);
        assert_eq!(last.next_observation, 0);
        assert!(last.is_terminal());
    }
}
