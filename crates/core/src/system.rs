/// A discrete-time dynamical system.
///
/// A `System` is a mutable state machine that a driver can reset, observe,
/// and advance one command at a time.
/// It is always in exactly one of two conditions: alive, meaning further
/// [`step`] calls produce meaningful transitions, or terminal.
///
/// # Contract
///
/// Implementations must uphold the following, which the iterators in this
/// crate rely on:
///
/// - [`assign`] fully resets the configuration, including any derived
///   liveness or report bookkeeping. No stale value survives a reset.
/// - [`observe`] and [`is_alive`] never mutate the system, and repeated calls
///   without an intervening [`assign`] or [`step`] return the same result.
/// - Once [`is_alive`] returns `false`, it keeps returning `false` until the
///   next [`assign`].
/// - Calling [`step`] on a terminal system changes nothing and returns the
///   conventional "nothing happened" report for `Report` (for example `0.0`
///   for a reward, or `()` when nothing is reported).
///
/// None of these operations can fail.
/// Validation of externally supplied states belongs to the concrete system,
/// typically at construction or when parsing a state.
///
/// [`assign`]: System::assign
/// [`observe`]: System::observe
/// [`step`]: System::step
/// [`is_alive`]: System::is_alive
pub trait System {
    /// The full internal configuration needed to reset the system.
    type State;

    /// What a driver is allowed to see of the current configuration.
    ///
    /// This may be the state itself or a strict projection of it.
    type Observation;

    /// The external action applied at each step.
    type Command;

    /// Feedback produced by a single transition, such as a reward.
    ///
    /// Use `()` when a transition has nothing to report.
    type Report;

    /// Resets the system to the given state.
    fn assign(&mut self, state: Self::State);

    /// Returns the observation of the current configuration.
    fn observe(&self) -> Self::Observation;

    /// Applies one command and returns the report of the transition.
    ///
    /// On a terminal system this is a no-op returning the sentinel report.
    fn step(&mut self, command: Self::Command) -> Self::Report;

    /// Returns `true` if the system is not in a terminal state.
    fn is_alive(&self) -> bool;
}

/// A [`System`] whose true internal state can be read back.
///
/// The returned state must be consistent with the latest observation, and
/// must round-trip: capturing [`state`] and later passing it to
/// [`System::assign`] reconstructs an equivalent system.
///
/// [`state`]: TransparentSystem::state
pub trait TransparentSystem: System {
    /// Returns the current internal state.
    fn state(&self) -> Self::State;
}

/// A mutable borrow of a system is itself a system.
///
/// This lets orbits and adapters either own a system or borrow one for the
/// duration of a traversal, leaving it usable afterwards.
impl<S> System for &mut S
where
    S: System + ?Sized,
{
    type State = S::State;
    type Observation = S::Observation;
    type Command = S::Command;
    type Report = S::Report;

    fn assign(&mut self, state: Self::State) {
        (**self).assign(state);
    }

    fn observe(&self) -> Self::Observation {
        (**self).observe()
    }

    fn step(&mut self, command: Self::Command) -> Self::Report {
        (**self).step(command)
    }

    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }
}

impl<S> TransparentSystem for &mut S
where
    S: TransparentSystem + ?Sized,
{
    fn state(&self) -> Self::State {
        (**self).state()
    }
}
