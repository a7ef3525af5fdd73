use std::iter::FusedIterator;

use crate::{Controller, System};

/// A supply of commands for driving a [`System`].
///
/// An [`Orbit`] pulls exactly one command from its source after each
/// transition, lending the source a shared borrow of the system for the
/// duration of the pull.
/// Because the source never holds on to that borrow, a source that reads the
/// system (such as [`Controlled`]) and the orbit that mutates it can never
/// alias the system at the same time.
///
/// Every iterator over `S::Command` is a source that ignores the system.
/// A finite iterator models a source that runs dry; returning `None` ends the
/// orbit after its current point.
///
/// [`Orbit`]: crate::Orbit
pub trait CommandSource<S>
where
    S: System + ?Sized,
{
    /// Produces the next command, or `None` if the source is exhausted.
    fn pull(&mut self, system: &S) -> Option<S::Command>;
}

impl<S, I> CommandSource<S> for I
where
    S: System + ?Sized,
    I: Iterator<Item = S::Command>,
{
    fn pull(&mut self, _system: &S) -> Option<S::Command> {
        self.next()
    }
}

/// An infinite iterator that calls a function each time a value is demanded.
///
/// Created by [`pulse`].
/// The function is called exactly once per call to [`next`], never ahead of
/// demand, so side effects such as drawing from a random generator happen in
/// lockstep with consumption.
///
/// A `Pulse` is a single forward cursor and cannot be restarted.
///
/// [`next`]: Iterator::next
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Pulse<F> {
    produce: F,
}

/// Creates an infinite command source from a zero-argument function.
///
/// # Example
///
/// ```
/// use skein_core::pulse;
///
/// let mut next = 0;
/// let values: Vec<_> = pulse(|| {
///     next += 2;
///     next
/// })
/// .take(3)
/// .collect();
///
/// assert_eq!(values, vec![2, 4, 6]);
/// ```
pub fn pulse<T, F>(produce: F) -> Pulse<F>
where
    F: FnMut() -> T,
{
    Pulse { produce }
}

impl<T, F> Iterator for Pulse<F>
where
    F: FnMut() -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some((self.produce)())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<T, F> FusedIterator for Pulse<F> where F: FnMut() -> T {}

/// A command source that asks a [`Controller`] what to do next.
///
/// Created by [`controller`].
/// Each pull observes the system as it is at that moment, so within an orbit
/// the controller always sees the observation produced by the transition that
/// has just been applied.
#[derive(Debug, Clone, Copy)]
pub struct Controlled<P> {
    policy: P,
}

/// Creates a command source driven by a controller.
///
/// The source reads the observation from whatever system it is pulled
/// against, which inside an [`Orbit`] is the system being driven.
///
/// [`Orbit`]: crate::Orbit
pub fn controller<P>(policy: P) -> Controlled<P> {
    Controlled { policy }
}

impl<P> Controlled<P> {
    /// Returns a reference to the wrapped controller.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Consumes the source, returning the wrapped controller.
    pub fn into_inner(self) -> P {
        self.policy
    }
}

impl<S, P> CommandSource<S> for Controlled<P>
where
    S: System + ?Sized,
    P: Controller<S::Observation, S::Command>,
{
    fn pull(&mut self, system: &S) -> Option<S::Command> {
        Some(self.policy.command(&system.observe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use crate::test_utils::Countdown;

    #[test]
    fn pulse_calls_function_once_per_value() {
        let calls = Cell::new(0);
        let mut source = pulse(|| {
            calls.set(calls.get() + 1);
            calls.get()
        });

        assert_eq!(calls.get(), 0, "nothing is produced before demand");
        assert_eq!(source.next(), Some(1));
        assert_eq!(source.next(), Some(2));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn pulse_never_ends() {
        let count = pulse(|| 'x').take(1000).count();
        assert_eq!(count, 1000);
    }

    #[test]
    fn iterators_ignore_the_system() {
        let system = Countdown::new(3);
        let mut source = vec![7, 8].into_iter();

        assert_eq!(CommandSource::<Countdown>::pull(&mut source, &system), Some(7));
        assert_eq!(CommandSource::<Countdown>::pull(&mut source, &system), Some(8));
        assert_eq!(CommandSource::<Countdown>::pull(&mut source, &system), None);
    }

    #[test]
    fn controlled_reads_current_observation() {
        let mut system = Countdown::new(6);
        let mut source = controller(|remaining: &u32| remaining / 2);

        assert_eq!(source.pull(&system), Some(3));

        system.step(4);
        assert_eq!(source.pull(&system), Some(1));
    }
}
